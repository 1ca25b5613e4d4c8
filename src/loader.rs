//! Loading schema documents from disk
//!
//! A source can be a single file or a directory tree. Each file holds either
//! one schema document or a top-level JSON array of them. Roots loaded from
//! single-document files inherit their name from the file stem when the
//! document does not carry one.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{GeneratorError, Result};
use crate::schema::ObjectSchema;

/// Options controlling which files are loaded and how roots are completed.
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// File extensions treated as schema documents.
    pub extensions: Vec<String>,
    /// Whether directory sources are walked recursively.
    pub recursive: bool,
    /// Package assigned to roots that do not declare one.
    pub package: Option<String>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["json".to_string()],
            recursive: true,
            package: None,
        }
    }
}

/// Reads schema documents from a file or directory source.
pub struct SchemaLoader {
    options: LoaderOptions,
}

impl SchemaLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Load every schema document under `path`.
    ///
    /// Directory entries are visited in file-name order so registration
    /// order, and with it duplicate-id reporting, is stable across runs.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<ObjectSchema>> {
        let path = path.as_ref();
        if path.is_file() {
            return self.load_file(path);
        }

        let max_depth = if self.options.recursive {
            usize::MAX
        } else {
            1
        };
        let mut schemas = Vec::new();
        for entry in WalkDir::new(path)
            .max_depth(max_depth)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.path().is_file() {
                continue;
            }
            if !self.matches_extension(entry.path()) {
                continue;
            }
            schemas.extend(self.load_file(entry.path())?);
        }
        debug!(source = %path.display(), count = schemas.len(), "loaded schema documents");
        Ok(schemas)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.options.extensions.iter().any(|e| e == ext))
            .unwrap_or(false)
    }

    fn load_file(&self, path: &Path) -> Result<Vec<ObjectSchema>> {
        let content = fs::read_to_string(path)?;
        let value: serde_json::Value =
            serde_json::from_str(&content).map_err(|source| GeneratorError::Parse {
                path: path.display().to_string(),
                source,
            })?;

        let mut schemas = Vec::new();
        match value {
            serde_json::Value::Array(documents) => {
                for document in documents {
                    let mut schema: ObjectSchema = serde_json::from_value(document)
                        .map_err(|source| GeneratorError::Parse {
                            path: path.display().to_string(),
                            source,
                        })?;
                    self.finish_root(&mut schema, path, false);
                    schemas.push(schema);
                }
            }
            document => {
                let mut schema: ObjectSchema = serde_json::from_value(document).map_err(
                    |source| GeneratorError::Parse {
                        path: path.display().to_string(),
                        source,
                    },
                )?;
                self.finish_root(&mut schema, path, true);
                schemas.push(schema);
            }
        }
        Ok(schemas)
    }

    /// Fill in name, package and id for a root document. Reference roots are
    /// left untouched so they still resolve to their target.
    fn finish_root(&self, schema: &mut ObjectSchema, path: &Path, name_from_stem: bool) {
        if schema.is_reference() {
            return;
        }
        if schema.name.is_none() && name_from_stem {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                schema.name = Some(stem.replace(".schema", ""));
            }
        }
        if schema.package_name.is_none() {
            schema.package_name = self.options.package.clone();
        }
        if schema.id.is_none() {
            if let (Some(package), Some(name)) = (&schema.package_name, &schema.name) {
                schema.id = Some(format!("{}.{}", package, name));
            }
        }
    }
}
