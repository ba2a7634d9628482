//! SVG thumbnails of boundary rings.

mod color;
mod proj;
mod thumbnail;
mod writer;

pub(crate) use color::*;
pub(crate) use proj::*;
pub use thumbnail::{render_thumbnail, ThumbnailOptions};
pub(crate) use writer::*;
