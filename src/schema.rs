//! Schema types and structures
//!
//! The dialect implemented here is a restricted JSON Schema draft with
//! extensions: `extends`, `implements`, `$recursiveRef`/`$recursiveAnchor`
//! and `defaultConcreteType`. Unknown keys are ignored on read so documents
//! written against a later revision of the dialect still load.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The reference token a schema uses to point at its own document (`"#"`).
pub const SELF_REFERENCE: &str = "#";

/// The kind of value a schema describes.
///
/// Each kind carries its fixed Java representation and the adapter accessor
/// generated marshaling code reads it with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
    Any,
    Interface,
}

impl SchemaKind {
    /// The token this kind uses in schema documents.
    pub fn json_name(&self) -> &'static str {
        match self {
            SchemaKind::String => "string",
            SchemaKind::Number => "number",
            SchemaKind::Integer => "integer",
            SchemaKind::Boolean => "boolean",
            SchemaKind::Object => "object",
            SchemaKind::Array => "array",
            SchemaKind::Null => "null",
            SchemaKind::Any => "any",
            SchemaKind::Interface => "interface",
        }
    }

    /// Whether the kind has an unboxed Java representation.
    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            SchemaKind::Number | SchemaKind::Integer | SchemaKind::Boolean
        )
    }

    /// The boxed Java type used for fields of this kind.
    ///
    /// Scalar fields are boxed so an absent JSON key can be represented as
    /// null, which the marshaling and equality contracts depend on.
    pub fn java_type(&self) -> &'static str {
        match self {
            SchemaKind::String => "java.lang.String",
            SchemaKind::Number => "java.lang.Double",
            SchemaKind::Integer => "java.lang.Long",
            SchemaKind::Boolean => "java.lang.Boolean",
            SchemaKind::Array => "java.util.List",
            SchemaKind::Object
            | SchemaKind::Null
            | SchemaKind::Any
            | SchemaKind::Interface => "java.lang.Object",
        }
    }

    /// The adapter method generated reader code fetches this kind with.
    pub fn adapter_accessor(&self) -> &'static str {
        match self {
            SchemaKind::String => "getString",
            SchemaKind::Number => "getDouble",
            SchemaKind::Integer => "getLong",
            SchemaKind::Boolean => "getBoolean",
            SchemaKind::Array => "getJSONArray",
            SchemaKind::Object
            | SchemaKind::Null
            | SchemaKind::Any
            | SchemaKind::Interface => "getJSONObject",
        }
    }
}

/// String formats with a dedicated Java representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaFormat {
    DateTime,
    Uri,
    #[serde(other)]
    Other,
}

/// One enumeration literal.
///
/// Documents may spell constants as bare strings or as objects with a
/// name and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnumValue {
    Name(String),
    Detailed {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        description: Option<String>,
    },
}

impl EnumValue {
    pub fn name(&self) -> &str {
        match self {
            EnumValue::Name(name) => name,
            EnumValue::Detailed { name, .. } => name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            EnumValue::Name(_) => None,
            EnumValue::Detailed { description, .. } => description.as_deref(),
        }
    }
}

/// A single schema document, as parsed from JSON.
///
/// This is the unresolved tree form: reference slots still hold `$ref` /
/// `$recursiveRef` pointer strings. Resolution interns the tree into a
/// [`SchemaRegistry`](crate::registry::SchemaRegistry) and rewrites every
/// pointer into a direct node link.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSchema {
    /// Globally unique name for this schema. Duplicates are a hard error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub schema_type: Option<SchemaKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        rename = "packageName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub package_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Pointer to another schema by id, or `"#"` for the enclosing document.
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Recursive pointer; only the `"#"` form is meaningful.
    #[serde(
        rename = "$recursiveRef",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub recursive_ref: Option<String>,

    /// Marks this node as a valid target for `$recursiveRef` beneath it.
    #[serde(rename = "$recursiveAnchor", default)]
    pub recursive_anchor: bool,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, ObjectSchema>,

    #[serde(
        rename = "additionalProperties",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<Box<ObjectSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<ObjectSchema>>,

    #[serde(
        rename = "additionalItems",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_items: Option<Box<ObjectSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<Box<ObjectSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Box<ObjectSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<Box<ObjectSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implements: Option<Vec<ObjectSchema>>,

    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<EnumValue>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<SchemaFormat>,

    #[serde(rename = "uniqueItems", default)]
    pub unique_items: bool,

    #[serde(default)]
    pub required: bool,

    #[serde(
        rename = "default",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<serde_json::Value>,

    /// Only meaningful on interface schemas: the fully-qualified name of the
    /// class instantiated when a payload names no concrete type.
    #[serde(
        rename = "defaultConcreteType",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub default_concrete_type: Option<String>,
}

impl ObjectSchema {
    /// Create an empty schema of the given kind.
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            schema_type: Some(kind),
            ..Self::default()
        }
    }

    /// The effective kind; documents without a `type` key describe objects.
    pub fn kind(&self) -> SchemaKind {
        self.schema_type.unwrap_or(SchemaKind::Object)
    }

    /// Whether this node is still an unresolved pointer.
    pub fn is_reference(&self) -> bool {
        self.reference.is_some() || self.recursive_ref.is_some()
    }
}
