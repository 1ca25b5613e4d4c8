//! POJO Generator
//!
//! Compiles JSON schema documents into Java class declarations: concrete
//! data classes, interfaces, and enums, together with JSON marshaling code
//! that tolerates schema evolution between writers and readers.
//!
//! ## Features
//!
//! - **Reference Resolution**: `$ref` and `$recursiveRef` resolve across
//!   documents, recursion included
//! - **Class Generation**: fields, accessors, `hashCode`/`equals`, `toString`
//! - **Adapter Marshaling**: absent keys restore declared defaults on read,
//!   null fields are skipped on write
//! - **Instance Factories**: interface-typed payloads dispatch on their
//!   `concreteType` key
//! - **Dependency Graph**: fan-out, reference cycles, GraphViz DOT export
//!
//! ## Architecture
//!
//! ```text
//! schemas/*.json
//!     │  loader
//!     ▼
//! ObjectSchema ───lint──▶ findings
//!     │  registry (intern + resolve references)
//!     ▼
//! SchemaRegistry ───graph──▶ cycles / DOT
//!     │  codegen (one class per root, handlers per concern)
//!     ▼
//! CodeModel ───render──▶ org/example/Pet.java
//! ```

pub mod schema;
pub mod loader;
pub mod lint;
pub mod registry;
pub mod graph;
pub mod model;
pub mod codegen;
pub mod adapter;
pub mod config;
pub mod error;

pub use codegen::{DriverOptions, GenerationDriver, GenerationOutput};
pub use config::GeneratorConfig;
pub use error::{GeneratorError, Result};
pub use graph::SchemaGraph;
pub use lint::SchemaLinter;
pub use loader::{LoaderOptions, SchemaLoader};
pub use model::CodeModel;
pub use registry::SchemaRegistry;
pub use schema::ObjectSchema;
