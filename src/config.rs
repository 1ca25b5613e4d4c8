//! Configuration management for the generator
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (pojogen.toml)
//! - Environment variables (POJOGEN_*)
//!
//! ## Example config file (pojogen.toml):
//! ```toml
//! [generator]
//! package = "org.example.model"
//! adapter_package = "org.pojogen.adapter"
//! register_class = "org.example.model.Register"
//! factories = true
//!
//! [output]
//! directory = "generated-java"
//! overwrite = true
//!
//! [loader]
//! extensions = ["json"]
//! recursive = true
//!
//! [lint]
//! enabled = true
//! deny = ["PROPERTY_NAME_CASE"]
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Generation settings
    #[serde(default)]
    pub generator: GeneratorSection,

    /// Output settings
    #[serde(default)]
    pub output: OutputSection,

    /// Schema loading settings
    #[serde(default)]
    pub loader: LoaderSection,

    /// Lint settings
    #[serde(default)]
    pub lint: LintSection,
}

/// Generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorSection {
    /// Package assigned to schemas without one
    #[serde(default)]
    pub package: Option<String>,

    /// Package the adapter interfaces live in
    #[serde(default = "default_adapter_package")]
    pub adapter_package: String,

    /// Fully-qualified name of the aggregate register class, if wanted
    #[serde(default)]
    pub register_class: Option<String>,

    /// Whether interface instance factories are generated
    #[serde(default = "default_true")]
    pub factories: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSection {
    /// Directory the generated sources are written to
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,

    /// Overwrite existing files
    #[serde(default = "default_true")]
    pub overwrite: bool,
}

/// Schema loading settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderSection {
    /// File extensions treated as schema documents
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Walk directory sources recursively
    #[serde(default = "default_true")]
    pub recursive: bool,
}

/// Lint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintSection {
    /// Run the linter before generation
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Rule codes whose warnings fail the run
    #[serde(default)]
    pub deny: Vec<String>,
}

// Default value functions
fn default_adapter_package() -> String {
    "org.pojogen.adapter".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("generated-java")
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            package: None,
            adapter_package: default_adapter_package(),
            register_class: None,
            factories: true,
        }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            overwrite: true,
        }
    }
}

impl Default for LoaderSection {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
            recursive: true,
        }
    }
}

impl Default for LintSection {
    fn default() -> Self {
        Self {
            enabled: true,
            deny: Vec::new(),
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorSection::default(),
            output: OutputSection::default(),
            loader: LoaderSection::default(),
            lint: LintSection::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "pojogen.toml",
            ".pojogen.toml",
            "config/pojogen.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "pojogen", "pojogen") {
            let xdg_config = config_dir.config_dir().join("pojogen.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (POJOGEN_*)
        builder = builder.add_source(
            Environment::with_prefix("POJOGEN")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the output directory (resolves relative paths)
    pub fn output_directory(&self) -> PathBuf {
        if self.output.directory.is_absolute() {
            self.output.directory.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.output.directory)
        }
    }
}
