//! # Error Hierarchy
//!
//! Structured error types for the practice compliance workspace, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The compliance computations themselves are total and never return these
//! errors. They surface only at the boundary: when identifiers, dates, or
//! filter names are parsed from external input, and when snapshots are
//! canonicalized or loaded.

use thiserror::Error;

/// Top-level error type for the practice compliance workspace.
#[derive(Error, Debug)]
pub enum PraxisError {
    /// Canonicalization failure during digest computation.
    #[error("canonicalization error: {0}")]
    Canonicalization(#[from] CanonicalizationError),

    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML serialization/deserialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Errors during canonical serialization.
#[derive(Error, Debug)]
pub enum CanonicalizationError {
    /// Float values have no stable canonical form.
    #[error("float values are not permitted in canonical representations: {0}")]
    FloatRejected(f64),

    /// JSON serialization failed during canonicalization.
    #[error("serialization failed: {0}")]
    SerializationFailed(#[from] serde_json::Error),
}

/// Validation errors for boundary input.
///
/// Each variant carries the offending input so that a bad row in an
/// exported snapshot can be located without guesswork.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// An identifier was empty or whitespace-only.
    #[error("invalid {kind}: must be non-empty")]
    EmptyIdentifier {
        /// Which identifier type was being constructed.
        kind: &'static str,
    },

    /// Date string is not a valid ISO 8601 calendar date.
    #[error("invalid date: \"{value}\" ({reason})")]
    InvalidDate {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Status filter name is not one of the known filters.
    #[error("unknown status filter: \"{0}\" (expected all, trained, untrained, expiring, or expired)")]
    UnknownStatusFilter(String),

    /// Snapshot file extension is not one of the supported formats.
    #[error("unsupported snapshot format: \"{0}\" (expected .json, .yaml, or .yml)")]
    UnsupportedSnapshotFormat(String),
}
