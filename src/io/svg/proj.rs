use crate::{geom::BBox, types::GeoPoint};

/// Fit of geographic bounds into a pixel canvas: uniform scale, centered,
/// Y axis pointing down.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Projection {
    bounds: BBox,
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl Projection {
    /// Fit `bounds` into `width` x `height` pixels leaving `padding` on every side.
    ///
    /// A zero-extent axis (a vertical or horizontal sliver) is centered and
    /// the other axis alone sets the scale. Returns `None` when both extents
    /// are zero or the padding leaves no room.
    pub(crate) fn fit(bounds: BBox, width: f64, height: f64, padding: f64) -> Option<Self> {
        let (inner_w, inner_h) = (width - 2.0 * padding, height - 2.0 * padding);
        if inner_w <= 0.0 || inner_h <= 0.0 { return None }

        let scale_x = (bounds.width() > 0.0).then(|| inner_w / bounds.width());
        let scale_y = (bounds.height() > 0.0).then(|| inner_h / bounds.height());
        let scale = match (scale_x, scale_y) {
            (Some(x), Some(y)) => x.min(y),
            (Some(s), None) | (None, Some(s)) => s,
            (None, None) => return None,
        };
        if !scale.is_finite() { return None }

        Some(Self {
            bounds,
            scale,
            offset_x: padding + (inner_w - bounds.width() * scale) / 2.0,
            offset_y: padding + (inner_h - bounds.height() * scale) / 2.0,
        })
    }

    /// lng/lat -> SVG coords (Y down)
    #[inline]
    pub(crate) fn project(&self, p: &GeoPoint) -> (f64, f64) {
        let x = self.offset_x + (p.lng - self.bounds.min_lng) * self.scale;
        let y = self.offset_y + (self.bounds.max_lat - p.lat) * self.scale;
        (x, y)
    }
}

/// Build an SVG points string for a ring.
pub(crate) fn ring_to_points(ring: &[GeoPoint], projection: &Projection) -> String {
    let mut out = String::new();

    for (i, p) in ring.iter().enumerate() {
        let (x, y) = projection.project(p);
        if i > 0 { out.push(' ') }
        out.push_str(&format!("{x:.2},{y:.2}"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_bounds_are_centered_vertically() {
        // 2 wide by 1 tall into 200x150 with padding 10: scale 90, 90px tall
        let bounds = BBox::new(0.0, 1.0, 0.0, 2.0);
        let proj = Projection::fit(bounds, 200.0, 150.0, 10.0).unwrap();
        assert_eq!(proj.project(&GeoPoint::new(1.0, 0.0)), (10.0, 30.0));
        assert_eq!(proj.project(&GeoPoint::new(0.0, 2.0)), (190.0, 120.0));
    }

    #[test]
    fn degenerate_bounds() {
        let point = BBox::new(1.0, 1.0, 2.0, 2.0);
        assert!(Projection::fit(point, 200.0, 150.0, 10.0).is_none());

        let line = BBox::new(0.0, 1.0, 5.0, 5.0);
        let proj = Projection::fit(line, 200.0, 150.0, 10.0).unwrap();
        assert_eq!(proj.project(&GeoPoint::new(0.5, 5.0)), (100.0, 75.0));

        assert!(Projection::fit(BBox::new(0.0, 1.0, 0.0, 1.0), 20.0, 20.0, 10.0).is_none());
    }

    #[test]
    fn points_string() {
        let bounds = BBox::new(0.0, 1.0, 0.0, 1.0);
        let proj = Projection::fit(bounds, 120.0, 120.0, 10.0).unwrap();
        let ring = [GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert_eq!(ring_to_points(&ring, &proj), "10.00,110.00 110.00,10.00");
    }
}
