use serde::{Deserialize, Serialize};

use crate::{error::{Issue, IssueKind}, types::GeoPoint};
use super::GeometryValidation;

/// Counters describing what validation did to the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationMetadata {
    pub original_count: usize,
    /// Points in the corrected ring (closing point included).
    pub valid_count: usize,
    pub duplicates_removed: usize,
    pub out_of_bounds_count: usize,
    /// Decimal places of the corrected coordinates.
    pub precision: u32,
}

/// Outcome of validating a raw coordinate sequence.
///
/// `is_valid` is false only for failures that cannot be repaired; every
/// other issue is a warning and `corrected_coordinates` is usable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
    pub corrected_coordinates: Option<Vec<GeoPoint>>,
    pub metadata: ValidationMetadata,
}

impl ValidationResult {
    pub(super) fn new(original_count: usize, precision: u32) -> Self {
        Self {
            is_valid: false,
            errors: Vec::new(),
            warnings: Vec::new(),
            corrected_coordinates: None,
            metadata: ValidationMetadata { original_count, precision, ..Default::default() },
        }
    }

    /// Mark the result as structurally invalid.
    pub(super) fn reject(mut self, kind: IssueKind, message: impl Into<String>) -> Self {
        self.errors.push(Issue::new(kind, message));
        self.is_valid = false;
        self.corrected_coordinates = None;
        self
    }

    /// Any error or warning of `kind` fired.
    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.errors.iter().chain(&self.warnings).any(|issue| issue.kind == kind)
    }

    /// Append the issues found by geometry validation.
    ///
    /// Geometry errors are recorded but do not change `is_valid`, which only
    /// reflects the coordinates themselves.
    pub fn absorb_geometry(&mut self, geometry: &GeometryValidation) {
        self.errors.extend(geometry.errors.iter().cloned());
        self.warnings.extend(geometry.warnings.iter().cloned());
    }

    /// Corrected ring, or an empty slice when validation failed.
    pub fn coordinates(&self) -> &[GeoPoint] {
        self.corrected_coordinates.as_deref().unwrap_or(&[])
    }
}
