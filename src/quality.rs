//! Quality scoring of validation outcomes.

use serde::{Deserialize, Serialize};

use crate::{error::IssueKind, validate::ValidationResult};

const ERROR_PENALTY: i32 = 20;
const WARNING_PENALTY: i32 = 5;
const DUPLICATE_PENALTY: i32 = 2;
const DUPLICATE_PENALTY_CAP: i32 = 10;
const OUT_OF_BOUNDS_PENALTY: i32 = 3;
const OUT_OF_BOUNDS_PENALTY_CAP: i32 = 15;

/// Score a validation outcome from 0 (unusable) to 100 (clean).
///
/// Starts at 100 and deducts 20 per error, 5 per warning, 2 per removed
/// duplicate (at most 10) and 3 per dropped point (at most 15).
pub fn score(validation: &ValidationResult) -> u8 {
    let meta = &validation.metadata;
    let total = [
        penalty(validation.errors.len(), ERROR_PENALTY),
        penalty(validation.warnings.len(), WARNING_PENALTY),
        penalty(meta.duplicates_removed, DUPLICATE_PENALTY).min(DUPLICATE_PENALTY_CAP),
        penalty(meta.out_of_bounds_count, OUT_OF_BOUNDS_PENALTY).min(OUT_OF_BOUNDS_PENALTY_CAP),
    ]
    .into_iter()
    .fold(0i32, i32::saturating_add);

    (100 - total.min(100)) as u8
}

fn penalty(count: usize, each: i32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX).saturating_mul(each)
}

/// Overall verdict of a validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityStatus {
    Valid,
    ValidWithWarnings,
    Invalid,
}

/// Human-facing digest of a validation outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualitySummary {
    pub status: QualityStatus,
    pub error_count: usize,
    pub warning_count: usize,
    pub quality: u8,
    pub recommendations: Vec<String>,
}

/// Summarize a validation outcome with recommendations for the user.
pub fn summarize(validation: &ValidationResult) -> QualitySummary {
    let status = match (validation.is_valid, validation.warnings.is_empty()) {
        (false, _) => QualityStatus::Invalid,
        (true, true) => QualityStatus::Valid,
        (true, false) => QualityStatus::ValidWithWarnings,
    };

    QualitySummary {
        status,
        error_count: validation.errors.len(),
        warning_count: validation.warnings.len(),
        quality: score(validation),
        recommendations: recommendations(validation),
    }
}

fn recommendations(validation: &ValidationResult) -> Vec<String> {
    let meta = &validation.metadata;
    let mut out = Vec::new();

    if !validation.is_valid {
        out.push("Redraw the boundary: it could not be repaired automatically.".to_string());
    }
    if meta.duplicates_removed > 0 {
        out.push(format!(
            "{} duplicate point(s) were removed; click each corner only once when drawing.",
            meta.duplicates_removed
        ));
    }
    if meta.out_of_bounds_count > 0 {
        out.push(format!(
            "{} point(s) fell outside the service area and were dropped; check the boundary covers the intended property.",
            meta.out_of_bounds_count
        ));
    }

    let advice = [
        (IssueKind::ExcessiveComplexity, "The shape is highly irregular; simplify the outline or split it into separate areas."),
        (IssueKind::SelfIntersecting, "Boundary edges cross each other; redraw so the outline does not overlap itself."),
        (IssueKind::PolygonNotClosed, "The boundary was closed automatically; finish drawing at the starting point."),
        (IssueKind::InvalidArea, "The measured area is outside the expected range; confirm the boundary and zoom level."),
        (IssueKind::InvalidPerimeter, "The perimeter is unusually short or long; confirm the boundary was drawn around the right area."),
    ];
    for (kind, text) in advice {
        if validation.has_issue(kind) {
            out.push(text.to_string());
        }
    }

    if out.is_empty() {
        out.push("Boundary looks good; no changes needed.".to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Issue,
        types::GeoPoint,
        validate::{validate_coordinates, ValidateOptions},
    };

    fn clean() -> ValidationResult {
        let square = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)].map(GeoPoint::from);
        validate_coordinates(&square, &ValidateOptions::default())
    }

    #[test]
    fn clean_boundary_scores_100() {
        let validation = clean();
        assert_eq!(score(&validation), 100);
        let summary = summarize(&validation);
        assert_eq!(summary.status, QualityStatus::Valid);
        assert_eq!(summary.recommendations, vec!["Boundary looks good; no changes needed.".to_string()]);
    }

    #[test]
    fn penalties_are_capped_per_category() {
        let mut validation = clean();
        validation.metadata.duplicates_removed = 3;
        validation.metadata.out_of_bounds_count = 1;
        // 100 - 6 - 3
        assert_eq!(score(&validation), 91);

        validation.metadata.duplicates_removed = 50;
        validation.metadata.out_of_bounds_count = 50;
        // 100 - 10 - 15
        assert_eq!(score(&validation), 75);
    }

    #[test]
    fn many_issues_clamp_to_zero() {
        let mut validation = clean();
        validation.errors = vec![Issue::new(IssueKind::InvalidArea, "area"); 5];
        validation.warnings = vec![Issue::new(IssueKind::SelfIntersecting, "crossing"); 10];
        assert_eq!(score(&validation), 0);
    }

    #[test]
    fn summary_recommends_by_issue() {
        let mut validation = clean();
        validation.metadata.duplicates_removed = 2;
        validation.warnings.push(Issue::new(IssueKind::DuplicateVertices, "2 duplicates"));
        validation.warnings.push(Issue::new(IssueKind::ExcessiveComplexity, "irregular"));

        let summary = summarize(&validation);
        assert_eq!(summary.status, QualityStatus::ValidWithWarnings);
        assert_eq!(summary.warning_count, 2);
        assert_eq!(summary.quality, 100 - 10 - 4);
        assert_eq!(summary.recommendations.len(), 2);
        assert!(summary.recommendations[0].contains("duplicate"));
        assert!(summary.recommendations[1].contains("irregular"));
    }

    #[test]
    fn invalid_status_serializes_snake_case() {
        let validation = validate_coordinates(&[], &ValidateOptions::default());
        let summary = summarize(&validation);
        assert_eq!(summary.status, QualityStatus::Invalid);
        assert_eq!(summary.quality, 80);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["errorCount"], 1);
        assert_eq!(serde_json::to_value(QualityStatus::ValidWithWarnings).unwrap(), "valid_with_warnings");
    }
}
