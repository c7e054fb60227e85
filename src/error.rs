//! Error types for the smithy-cli-gen crate.

use thiserror::Error;

/// Errors surfaced while resolving the shape graph and extracting
/// operations. Every variant aborts generation: the compiler emits a
/// complete program or nothing at all.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SchemaError {
    #[error("shape not found: {shape}")]
    ShapeNotFound { shape: String },

    #[error("unsupported shape type: {kind}")]
    UnsupportedType { kind: String },

    #[error("cyclic shape reference involving {shape}")]
    CyclicShape { shape: String },

    #[error("operation {operation} is missing the smithy.api#http trait")]
    MissingHttpRoute { operation: String },

    #[error("invalid shape reference: {target} (expected namespace#Name)")]
    InvalidShapeRef { target: String },
}
