use std::{io::Write, sync::LazyLock};

use anyhow::{anyhow, ensure, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    error::{BoundaryError, BoundaryResult},
    geom::BBox,
    store::ThumbnailData,
    types::GeoPoint,
};
use super::{quality_color, ring_to_points, BoundaryStyle, Projection, SvgStringWriter};

/// CSS colors accepted in thumbnail options: hex, named, or functional notation.
static CSS_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(#[0-9A-Fa-f]{3,8}|[A-Za-z]{3,20}|(rgb|rgba|hsl|hsla)\([0-9., %]{5,40}\))$")
        .expect("static regex")
});

/// Canvas and paint for boundary thumbnails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ThumbnailOptions {
    pub width: u32,
    pub height: u32,
    pub padding: u32,
    pub fill_color: String,
    pub fill_opacity: f64,
    /// Fixed stroke color; when unset the stroke is tinted by quality score.
    pub stroke_color: Option<String>,
    pub stroke_width: f64,
    pub background_color: String,
    /// Draw a dot on every vertex.
    pub show_vertices: bool,
}

impl Default for ThumbnailOptions {
    fn default() -> Self {
        Self {
            width: 200,
            height: 150,
            padding: 10,
            fill_color: "#3b82f6".into(),
            fill_opacity: 0.3,
            stroke_color: None,
            stroke_width: 2.0,
            background_color: "#f8fafc".into(),
            show_vertices: false,
        }
    }
}

impl ThumbnailOptions {
    pub fn check(&self) -> BoundaryResult<()> {
        let margins = self.padding.saturating_mul(2);
        if self.width <= margins || self.height <= margins {
            return Err(BoundaryError::invalid_option("padding", "leaves no room to draw inside the canvas"));
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(BoundaryError::invalid_option("fillOpacity", "must lie in [0, 1]"));
        }
        if !(self.stroke_width.is_finite() && self.stroke_width >= 0.0) {
            return Err(BoundaryError::invalid_option("strokeWidth", "must be a non-negative number"));
        }
        let colors = [
            ("fillColor", Some(&self.fill_color)),
            ("strokeColor", self.stroke_color.as_ref()),
            ("backgroundColor", Some(&self.background_color)),
        ];
        for (key, color) in colors {
            match color {
                Some(color) if !CSS_COLOR.is_match(color) => {
                    return Err(BoundaryError::invalid_option(key, format!("'{color}' is not a CSS color")));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Render `ring` as an SVG polygon fitted into the thumbnail canvas.
pub fn render_thumbnail(ring: &[GeoPoint], quality: Option<u8>, options: &ThumbnailOptions) -> Result<ThumbnailData> {
    ensure!(ring.len() >= 3, "[io::svg] A thumbnail needs at least 3 points, got {}", ring.len());

    let bounds = BBox::from_points(ring)
        .ok_or_else(|| anyhow!("[io::svg] Could not determine bounds; nothing to draw."))?;
    let projection = Projection::fit(bounds, options.width as f64, options.height as f64, options.padding as f64)
        .ok_or_else(|| anyhow!("[io::svg] Boundary has no extent or the padding leaves no room"))?;

    let stroke = options.stroke_color.clone()
        .unwrap_or_else(|| quality_color(quality).to_string());
    let style = BoundaryStyle {
        fill: &options.fill_color,
        fill_opacity: options.fill_opacity,
        stroke: &stroke,
        stroke_width: options.stroke_width,
    };

    let mut writer = SvgStringWriter::new();
    writer.write_header(options.width, options.height, &bounds, &options.background_color)?;
    writer.write_styles(&style)?;
    writeln!(writer, r#"<polygon class="boundary" points="{}"/>"#, ring_to_points(ring, &projection))?;
    if options.show_vertices {
        let radius = (options.stroke_width * 1.5).max(1.5);
        for p in ring.iter().filter(|p| p.is_finite()) {
            let (x, y) = projection.project(p);
            writeln!(writer, r#"<circle class="vertex" cx="{x:.2}" cy="{y:.2}" r="{radius:.1}"/>"#)?;
        }
    }
    writer.write_footer()?;

    Ok(ThumbnailData {
        svg: writer.into_string()?,
        width: options.width,
        height: options.height,
        format: "svg".to_string(),
    })
}
