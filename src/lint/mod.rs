//! Schema linting
//!
//! Naming and wiring checks over parsed documents, before resolution. The
//! linter never mutates a schema and never aborts on its own; it reports
//! findings and the CLI decides whether errors fail the run.
//!
//! ## Lints
//! 1. **ID_NOT_QUALIFIED**: schema id carries no package prefix (warning)
//! 2. **TYPE_NAME_CASE**: type names should be PascalCase (warning)
//! 3. **PROPERTY_NAME_CASE**: property keys should be camelCase (warning)
//! 4. **KEYWORD_PROPERTY**: property key is a Java keyword (warning)
//! 5. **DANGLING_CONCRETE_TYPE**: defaultConcreteType names no schema in
//!    the set (error)

use std::collections::HashSet;

use regex::Regex;

use crate::codegen::names;
use crate::schema::ObjectSchema;

/// Result of linting one schema document
#[derive(Debug, Default)]
pub struct LintResult {
    pub schema_id: String,
    pub errors: Vec<LintError>,
    pub warnings: Vec<LintWarning>,
}

impl LintResult {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[derive(Debug)]
pub struct LintError {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

#[derive(Debug)]
pub struct LintWarning {
    pub code: &'static str,
    pub message: String,
    pub path: String,
}

/// The schema naming linter
pub struct SchemaLinter {
    /// PascalCase type names
    type_name: Regex,
    /// camelCase property keys
    property_name: Regex,
}

impl Default for SchemaLinter {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLinter {
    pub fn new() -> Self {
        Self {
            type_name: Regex::new(r"^[A-Z][A-Za-z0-9]*$").unwrap(),
            property_name: Regex::new(r"^[a-z][A-Za-z0-9]*$").unwrap(),
        }
    }

    /// Lint a whole document set. Cross-document checks resolve against
    /// every id in the set; documents with no findings are dropped.
    pub fn lint_set(&self, schemas: &[ObjectSchema]) -> Vec<LintResult> {
        let mut known = HashSet::new();
        for schema in schemas {
            collect_ids(schema, &mut known);
        }
        schemas
            .iter()
            .map(|schema| self.lint_document(schema, &known))
            .filter(|result| !result.is_clean() || result.has_warnings())
            .collect()
    }

    /// Lint a single document against its own ids.
    pub fn lint(&self, schema: &ObjectSchema) -> LintResult {
        let mut known = HashSet::new();
        collect_ids(schema, &mut known);
        self.lint_document(schema, &known)
    }

    fn lint_document(&self, schema: &ObjectSchema, known: &HashSet<String>) -> LintResult {
        let mut result = LintResult {
            schema_id: schema
                .id
                .clone()
                .unwrap_or_else(|| "<anonymous>".to_string()),
            ..Default::default()
        };
        self.lint_node(schema, "", known, &mut result);
        result
    }

    fn lint_node(
        &self,
        schema: &ObjectSchema,
        path: &str,
        known: &HashSet<String>,
        result: &mut LintResult,
    ) {
        if let Some(id) = &schema.id {
            if !id.contains('.') {
                result.warnings.push(LintWarning {
                    code: "ID_NOT_QUALIFIED",
                    message: format!(
                        "Schema id '{}' has no package; its class lands in the default package",
                        id
                    ),
                    path: path.to_string(),
                });
            }
            let (_, simple) = names::split_fqn(id);
            if !self.type_name.is_match(simple) {
                result.warnings.push(LintWarning {
                    code: "TYPE_NAME_CASE",
                    message: format!("Type name '{}' should be PascalCase", simple),
                    path: path.to_string(),
                });
            }
        }

        if let Some(name) = &schema.name {
            if !self.type_name.is_match(name) {
                result.warnings.push(LintWarning {
                    code: "TYPE_NAME_CASE",
                    message: format!("Type name '{}' should be PascalCase", name),
                    path: join(path, "name"),
                });
            }
        }

        if let Some(concrete) = &schema.default_concrete_type {
            if !known.contains(concrete) {
                result.errors.push(LintError {
                    code: "DANGLING_CONCRETE_TYPE",
                    message: format!(
                        "defaultConcreteType '{}' does not match any schema id in the set",
                        concrete
                    ),
                    path: path.to_string(),
                });
            }
        }

        for (key, child) in &schema.properties {
            let child_path = join(path, &format!("properties.{}", key));
            if names::is_keyword(key) {
                result.warnings.push(LintWarning {
                    code: "KEYWORD_PROPERTY",
                    message: format!(
                        "Property '{}' is a Java keyword; its field will be named '_{}'",
                        key, key
                    ),
                    path: child_path.clone(),
                });
            } else if !self.property_name.is_match(key) {
                result.warnings.push(LintWarning {
                    code: "PROPERTY_NAME_CASE",
                    message: format!("Property '{}' should be camelCase", key),
                    path: child_path.clone(),
                });
            }
            self.lint_node(child, &child_path, known, result);
        }

        if let Some(child) = &schema.additional_properties {
            self.lint_node(child, &join(path, "additionalProperties"), known, result);
        }
        if let Some(child) = &schema.items {
            self.lint_node(child, &join(path, "items"), known, result);
        }
        if let Some(child) = &schema.additional_items {
            self.lint_node(child, &join(path, "additionalItems"), known, result);
        }
        if let Some(child) = &schema.key {
            self.lint_node(child, &join(path, "key"), known, result);
        }
        if let Some(child) = &schema.value {
            self.lint_node(child, &join(path, "value"), known, result);
        }
        if let Some(child) = &schema.extends {
            self.lint_node(child, &join(path, "extends"), known, result);
        }
        if let Some(interfaces) = &schema.implements {
            for (i, child) in interfaces.iter().enumerate() {
                self.lint_node(child, &join(path, &format!("implements[{}]", i)), known, result);
            }
        }
    }
}

fn join(path: &str, segment: &str) -> String {
    if path.is_empty() {
        segment.to_string()
    } else {
        format!("{}.{}", path, segment)
    }
}

/// Every id declared anywhere in the document, nested schemas included.
fn collect_ids(schema: &ObjectSchema, ids: &mut HashSet<String>) {
    if let Some(id) = &schema.id {
        ids.insert(id.clone());
    }
    for child in schema.properties.values() {
        collect_ids(child, ids);
    }
    if let Some(child) = &schema.additional_properties {
        collect_ids(child, ids);
    }
    if let Some(child) = &schema.items {
        collect_ids(child, ids);
    }
    if let Some(child) = &schema.additional_items {
        collect_ids(child, ids);
    }
    if let Some(child) = &schema.key {
        collect_ids(child, ids);
    }
    if let Some(child) = &schema.value {
        collect_ids(child, ids);
    }
    if let Some(child) = &schema.extends {
        collect_ids(child, ids);
    }
    if let Some(interfaces) = &schema.implements {
        for child in interfaces {
            collect_ids(child, ids);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> ObjectSchema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_clean_schema() {
        let linter = SchemaLinter::new();
        let result = linter.lint(&parse(json!({
            "id": "org.example.Pet",
            "type": "object",
            "properties": {
                "name": { "type": "string" },
                "ownerCount": { "type": "integer" }
            }
        })));
        assert!(result.is_clean());
        assert!(!result.has_warnings());
        assert_eq!(result.schema_id, "org.example.Pet");
    }

    #[test]
    fn test_unqualified_id_warns() {
        let linter = SchemaLinter::new();
        let result = linter.lint(&parse(json!({ "id": "Pet", "type": "object" })));
        assert!(result.is_clean());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == "ID_NOT_QUALIFIED"));
    }

    #[test]
    fn test_type_name_case() {
        let linter = SchemaLinter::new();
        let result = linter.lint(&parse(json!({
            "id": "org.example.petRecord",
            "type": "object"
        })));
        assert!(result.warnings.iter().any(|w| w.code == "TYPE_NAME_CASE"));
    }

    #[test]
    fn test_property_case_and_keyword() {
        let linter = SchemaLinter::new();
        let result = linter.lint(&parse(json!({
            "id": "org.example.Pet",
            "type": "object",
            "properties": {
                "content-type": { "type": "string" },
                "class": { "type": "string" }
            }
        })));
        let codes: Vec<_> = result.warnings.iter().map(|w| w.code).collect();
        assert!(codes.contains(&"PROPERTY_NAME_CASE"));
        assert!(codes.contains(&"KEYWORD_PROPERTY"));
    }

    #[test]
    fn test_nested_property_path() {
        let linter = SchemaLinter::new();
        let result = linter.lint(&parse(json!({
            "id": "org.example.Owner",
            "type": "object",
            "properties": {
                "address": {
                    "type": "object",
                    "name": "Address",
                    "properties": {
                        "street-name": { "type": "string" }
                    }
                }
            }
        })));
        let warning = result
            .warnings
            .iter()
            .find(|w| w.code == "PROPERTY_NAME_CASE")
            .unwrap();
        assert_eq!(warning.path, "properties.address.properties.street-name");
    }

    #[test]
    fn test_dangling_concrete_type_is_error() {
        let linter = SchemaLinter::new();
        let result = linter.lint(&parse(json!({
            "id": "org.example.Pet",
            "type": "interface",
            "defaultConcreteType": "org.example.Dog"
        })));
        assert!(!result.is_clean());
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == "DANGLING_CONCRETE_TYPE"));
    }

    #[test]
    fn test_concrete_type_found_across_documents() {
        let linter = SchemaLinter::new();
        let schemas = vec![
            parse(json!({
                "id": "org.example.Pet",
                "type": "interface",
                "defaultConcreteType": "org.example.Dog"
            })),
            parse(json!({
                "id": "org.example.Dog",
                "type": "object",
                "implements": [ { "$ref": "org.example.Pet" } ]
            })),
        ];
        assert!(linter.lint_set(&schemas).is_empty());
    }
}
