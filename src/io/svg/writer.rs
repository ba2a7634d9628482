//! SVG writing operations.

use std::io::Write;

use anyhow::{Context, Result};

use crate::geom::BBox;

/// In-memory SVG writer; thumbnails are embedded in records, never written to disk.
pub(crate) struct SvgStringWriter {
    buffer: Vec<u8>
}

/// Implement std::io::Write so `write!` / `writeln!` work.
impl Write for SvgStringWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> { Ok(()) }
}

impl SvgStringWriter {
    pub(crate) fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    pub(crate) fn into_string(self) -> Result<String> {
        String::from_utf8(self.buffer)
            .context("[io::svg] SVG output is not valid UTF-8")
    }

    /// Write the opening <svg> tag and the background.
    pub(crate) fn write_header(&mut self, width: u32, height: u32, bounds: &BBox, background: &str) -> Result<()> {
        write_svg_header(self, width, height, bounds, background)
    }

    /// Write the boundary style class.
    pub(crate) fn write_styles(&mut self, style: &BoundaryStyle<'_>) -> Result<()> {
        write_svg_styles(self, style)
    }

    /// Write the closing </svg> tag.
    pub(crate) fn write_footer(&mut self) -> Result<()> {
        write_svg_footer(self)
    }
}

/// Paint for the boundary polygon.
pub(crate) struct BoundaryStyle<'a> {
    pub(crate) fill: &'a str,
    pub(crate) fill_opacity: f64,
    pub(crate) stroke: &'a str,
    pub(crate) stroke_width: f64,
}

/// Write SVG header to any writer. The geographic bounds are kept as data
/// attributes so consumers can map pixels back to coordinates.
pub(crate) fn write_svg_header<W: Write>(writer: &mut W, width: u32, height: u32, bounds: &BBox, background: &str) -> Result<()> {
    writeln!(writer, r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" data-lng-min="{lng_min}" data-lng-max="{lng_max}" data-lat-min="{lat_min}" data-lat-max="{lat_max}">"##,
        lng_min = bounds.min_lng,
        lng_max = bounds.max_lng,
        lat_min = bounds.min_lat,
        lat_max = bounds.max_lat,
    )?;
    writeln!(writer, r##"<rect width="100%" height="100%" fill="{background}"/>"##)?;
    Ok(())
}

pub(crate) fn write_svg_styles<W: Write>(writer: &mut W, style: &BoundaryStyle<'_>) -> Result<()> {
    writeln!(writer, r##"<defs>
<style>
    .boundary {{ fill: {fill}; fill-opacity: {opacity}; stroke: {stroke}; stroke-width: {width}; stroke-linejoin: round; }}
    .vertex {{ fill: {stroke}; }}
</style>
</defs>"##,
        fill = style.fill,
        opacity = style.fill_opacity,
        stroke = style.stroke,
        width = style.stroke_width,
    )?;
    Ok(())
}

pub(crate) fn write_svg_footer<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "</svg>")?;
    Ok(())
}
