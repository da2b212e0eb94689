//! Error types for the creative layout engine.

use thiserror::Error;

/// Top-level error type for the creative layout engine.
#[derive(Debug, Error)]
pub enum CreativeError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Reflow(#[from] ReflowError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Errors while converting a design-rule record into a layout tree.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Design not found: {design_id}")]
    NotFound { design_id: String },

    #[error("Design {design_id} is not a rule record: {reason}")]
    MalformedRecord { design_id: String, reason: String },

    #[error("Invalid container dimensions for design {design_id}: {detail}")]
    InvalidDimensions { design_id: String, detail: String },

    #[error("Failed to convert layer '{layer}' of design {design_id}: {reason}")]
    ConversionFailure {
        design_id: String,
        layer: String,
        reason: String,
    },
}

/// Errors while reflowing a layout tree.
///
/// Only `InvalidDimensions` ever reaches a caller; distribution failures are
/// absorbed by the engine, which falls back to the source tree.
#[derive(Debug, Error)]
pub enum ReflowError {
    #[error("Invalid reflow target: {width}x{height}")]
    InvalidDimensions { width: f64, height: f64 },

    #[error("Box distribution failed: {reason}")]
    DistributionFailed { reason: String },
}

/// Errors while persisting a serialized design.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("I/O error while persisting design: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode design: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Design {design_id} rejected: {reason}")]
    Rejected { design_id: String, reason: String },
}
