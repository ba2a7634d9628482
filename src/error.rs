//! Error types for the boundary pipeline.
//!
//! Validation diagnostics are values ([`Issue`]) carried inside results;
//! operation failures are [`BoundaryError`]s returned through `Result`.

use std::{fmt, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Kind of a validation issue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueKind {
    /// Empty, malformed, non-numeric or out-of-range coordinates.
    InvalidCoordinates,
    /// Fewer vertices than a polygon needs.
    InsufficientVertices,
    /// More vertices than the validator accepts.
    ExcessiveVertices,
    /// Area outside the accepted range.
    InvalidArea,
    /// First and last vertex differ; a closing vertex was appended.
    PolygonNotClosed,
    /// Near-coincident vertices were removed.
    DuplicateVertices,
    /// Non-adjacent edges cross each other.
    SelfIntersecting,
    /// Shape is too irregular for its area.
    ExcessiveComplexity,
    /// Perimeter outside the accepted range.
    InvalidPerimeter,
}

impl IssueKind {
    /// Whether this kind of issue makes a boundary unusable.
    pub fn is_fatal(self) -> bool {
        matches!(self,
            Self::InvalidCoordinates
            | Self::InsufficientVertices
            | Self::ExcessiveVertices
            | Self::InvalidArea)
    }

    /// Stable identifier, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidCoordinates => "INVALID_COORDINATES",
            Self::InsufficientVertices => "INSUFFICIENT_VERTICES",
            Self::ExcessiveVertices => "EXCESSIVE_VERTICES",
            Self::InvalidArea => "INVALID_AREA",
            Self::PolygonNotClosed => "POLYGON_NOT_CLOSED",
            Self::DuplicateVertices => "DUPLICATE_VERTICES",
            Self::SelfIntersecting => "SELF_INTERSECTING",
            Self::ExcessiveComplexity => "EXCESSIVE_COMPLEXITY",
            Self::InvalidPerimeter => "INVALID_PERIMETER",
        }
    }
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation error or warning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    pub message: String,
}

impl Issue {
    pub fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Errors raised by key-value store backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend (or the store's own limits) cannot hold the write.
    #[error("Storage quota exceeded: {needed} bytes needed, limit is {limit} bytes")]
    QuotaExceeded { needed: usize, limit: usize },

    /// Backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// I/O error in a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Stored value could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by boundary operations.
#[derive(Error, Debug)]
pub enum BoundaryError {
    /// The coordinates failed structural validation; nothing was stored.
    #[error("Boundary validation failed: {}", join_issues(.issues))]
    Validation { issues: Vec<Issue> },

    /// No record is stored under the requested tool type.
    #[error("No boundary stored for '{0}'")]
    NotFound(String),

    /// The tool type cannot be used as a storage key.
    #[error("Invalid tool type '{0}': expected 1-128 characters of [A-Za-z0-9_.:-]")]
    InvalidKey(String),

    /// An option value is out of range.
    #[error("Invalid option '{key}': {reason}")]
    InvalidOption { key: String, reason: String },

    /// A stored record could not be decoded.
    #[error("Stored record for '{key}' is corrupted: {reason}")]
    CorruptRecord { key: String, reason: String },

    /// Imported data could not be parsed.
    #[error("Failed to import {format} data: {reason}")]
    Import { format: String, reason: String },

    /// A record could not be rendered in the requested format.
    #[error("Failed to export {format} data: {reason}")]
    Export { format: String, reason: String },

    /// The storage backend failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoundaryError {
    pub(crate) fn invalid_option(key: &str, reason: impl Into<String>) -> Self {
        Self::InvalidOption { key: key.to_string(), reason: reason.into() }
    }

    pub(crate) fn import(format: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::Import { format: format.to_string(), reason: reason.to_string() }
    }

    pub(crate) fn export(format: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Self::Export { format: format.to_string(), reason: reason.to_string() }
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues.iter().map(|issue| issue.message.as_str()).collect::<Vec<_>>().join("; ")
}

/// Result type alias for boundary operations.
pub type BoundaryResult<T> = Result<T, BoundaryError>;
