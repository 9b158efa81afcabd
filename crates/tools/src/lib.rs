//! Capabilities for the Tata assistant.
//!
//! The [`ToolRegistry`] is the catalog of tasks the model may invoke, and
//! [`DocumentProcessor`] is the reference generator behind every one of them.
//! [`render`] turns a generated document into Markdown or plain text.

pub mod processors;
pub mod registry;
pub mod render;
pub mod schema;

pub use processors::DocumentProcessor;
pub use registry::{CapabilityDescriptor, ParamType, ParameterSpec, ToolRegistry};
pub use render::{OutputFormat, render};
pub use schema::{SchemaError, validate_parameter_schema};
