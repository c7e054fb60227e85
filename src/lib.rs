//! Generate a CLI from a Smithy model.
//!
//! Resolves the model's shape graph into a typed IR, extracts the service's
//! operations, and renders a commander-based CLI program (one subcommand per
//! operation) that wraps a pre-existing generated Smithy client package.
//!
//! # Usage
//!
//! ```no_run
//! use smithy_cli_gen::{generate, GenConfig};
//!
//! let model: serde_json::Value =
//!     serde_json::from_str(r#"{"shapes":{}}"#).unwrap();
//!
//! let config = GenConfig::new("widgets", "Widget service CLI", "@example/widget-client")
//!     .client_version("^2.0.0");
//!
//! let artifacts = generate(&model, "com.example#WidgetService", &config);
//! ```

pub mod error;
pub mod handling;
pub mod operation;
pub mod params;
pub mod render;
pub mod shape;

pub use error::SchemaError;
pub use handling::{field_handling, needs_handling};
pub use operation::{
    extract_service, AuthPolicy, HttpRoute, OperationDescriptor, ServiceDescriptor,
};
pub use params::{
    doc_lines, flag_specs, json_file_example, mixed_usage_example, required_paths, usage_example,
    FieldPath, FlagSpec, ParserKind,
};
pub use render::{generate, GenConfig, GeneratedArtifacts};
pub use shape::{resolve_type, Field, ShapeRef, TypeDescriptor};
