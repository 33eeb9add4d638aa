//! Error Types
//!
//! One enum per failure concern. Only artifact loading and the classifier
//! call can fail a prediction; rule evaluation never does.

use std::path::PathBuf;
use thiserror::Error;

use super::model::Domain;

// ============================================================================
// LOAD ERRORS
// ============================================================================

/// Artifact missing, unreadable or malformed. Fatal for that domain.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{domain} artifact not found: {}", .path.display())]
    Missing { domain: Domain, path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {domain} metadata: {reason}")]
    InvalidMetadata { domain: Domain, reason: String },

    #[error("{domain} feature layout mismatch: {reason}")]
    LayoutMismatch { domain: Domain, reason: String },

    #[error("checksum mismatch for {}: expected {expected}, got {actual}", .path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("failed to load classifier {}: {reason}", .path.display())]
    Model { path: PathBuf, reason: String },
}

// ============================================================================
// INFERENCE ERRORS
// ============================================================================

/// Classifier invocation failure
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("inference failed: {0}")]
    Runtime(String),

    #[error("classifier produced no output")]
    EmptyOutput,

    #[error("classifier produced a non-finite probability ({0})")]
    NonFinite(f32),
}

// ============================================================================
// VALIDATION ERRORS
// ============================================================================

/// Malformed `HH:MM` input.
///
/// The encoders resolve this by substitution; it only escapes through
/// [`crate::logic::features::clock::validate_clock_time`], which shells use to
/// reject input up front.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("time {0:?} is missing the ':' separator")]
    MissingSeparator(String),

    #[error("time {0:?} is not HH:MM")]
    Malformed(String),
}

// ============================================================================
// PREDICTION ERRORS
// ============================================================================

/// What a shell sees when a prediction cannot be produced
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("prediction unavailable: {0}")]
    Unavailable(#[from] LoadError),

    #[error("prediction unavailable: {0}")]
    Inference(#[from] InferenceError),
}

impl PredictError {
    /// Whether the domain's artifacts could not be loaded
    pub fn is_load_failure(&self) -> bool {
        matches!(self, PredictError::Unavailable(_))
    }
}
