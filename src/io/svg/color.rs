//! Color mapping utilities for SVG thumbnails.

use std::fmt;

/// Simple RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Rgb {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
}

impl fmt::Display for Rgb {
    /// Format as CSS hex: #rrggbb
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

const UNSCORED: Rgb = Rgb { r: 100, g: 116, b: 139 };

/// Stroke color ramp for a 0-100 quality score: red through amber to green.
pub(crate) fn quality_color(score: Option<u8>) -> Rgb {
    let Some(score) = score else { return UNSCORED };

    // [lower, upper) buckets; the last includes 100.
    const BREAKS: &[(u8, u8, Rgb)] = &[
        ( 0,  40, Rgb { r: 220, g:  38, b:  38 }),
        (40,  60, Rgb { r: 234, g:  88, b:  12 }),
        (60,  75, Rgb { r: 217, g: 119, b:   6 }),
        (75,  90, Rgb { r: 101, g: 163, b:  13 }),
        (90, 100, Rgb { r:  22, g: 163, b:  74 }),
    ];

    let score = score.min(100);
    for &(lo, hi, color) in BREAKS {
        if score >= lo && (score < hi || (hi == 100 && score <= hi)) { return color }
    }

    UNSCORED
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ramp_buckets() {
        assert_eq!(quality_color(Some(0)).to_string(), "#dc2626");
        assert_eq!(quality_color(Some(59)).to_string(), "#ea580c");
        assert_eq!(quality_color(Some(90)).to_string(), "#16a34a");
        assert_eq!(quality_color(Some(100)).to_string(), "#16a34a");
        assert_eq!(quality_color(None), UNSCORED);
    }
}
