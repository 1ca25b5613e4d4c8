//! Error types for schema resolution and code generation

use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GeneratorError>;

/// Generator errors
///
/// Every variant is fatal for the run it occurs in: an inconsistent schema
/// set is never patched around, and there is no partial output mode.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("More than one schema was found with id={0}")]
    DuplicateId(String),

    #[error("Cannot find the referenced schema: {reference}")]
    UnresolvedReference {
        reference: String,
        closest: Option<String>,
    },

    #[error("Found a $recursiveRef but did not find a matching $recursiveAnchor")]
    RecursiveRefWithoutAnchor,

    #[error("Found a recursive reference to a schema without an id")]
    RecursiveRefToAnonymousSchema,

    #[error("The schema of the defaultConcreteType {concrete} defined on the {interface} interface is not defined")]
    DefaultConcreteTypeMissing { concrete: String, interface: String },

    #[error("The schema for the {0} interface is not defined")]
    InterfaceTypeMissing(String),

    #[error("The defaultConcreteType {concrete} does not implement the interface {interface}")]
    DefaultConcreteTypeNotAssignable { concrete: String, interface: String },

    #[error("Cannot find the class {0} in the generated output")]
    TypeResolution(String),

    #[error("A class named {0} was already defined")]
    DuplicateClass(String),

    #[error("Map keys must be string schemas: {0}")]
    UnsupportedMapKey(String),

    #[error("Arrays of arrays are currently not supported")]
    NestedArray,

    #[error("Maps are not supported as container elements: {0}")]
    UnsupportedContainerElement(String),

    #[error("Lint reported {0} denied finding(s)")]
    LintDenied(usize),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GeneratorError {
    /// An optional follow-up hint for CLI output, beyond the error message.
    pub fn hint(&self) -> Option<String> {
        match self {
            GeneratorError::UnresolvedReference {
                closest: Some(closest),
                ..
            } => Some(format!("closest registered id: {}", closest)),
            _ => None,
        }
    }
}
