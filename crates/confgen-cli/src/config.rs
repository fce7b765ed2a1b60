//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables, `CONFGEN__<SECTION>__<KEY>`
//! 3. `--config FILE`, or `./confgen.toml` when present
//! 4. User-wide config file (see [`AppConfig::global_config_path`])
//! 5. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "confgen.toml";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Generation settings.
    pub generation: GenerationConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Searched in order; earlier roots win file-name ties in error messages.
    pub resource_roots: Vec<PathBuf>,
    pub output_dir: PathBuf,
    pub base_package: String,
    pub test_source_only: bool,
    /// Custom Handlebars template; the built-in Java one when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<PathBuf>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            resource_roots: vec![
                PathBuf::from("src/test/resources"),
                PathBuf::from("src/main/resources"),
            ],
            output_dir: PathBuf::from("target/generated-sources/config"),
            base_package: "gen.config".into(),
            test_source_only: false,
            template: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration, layering files and environment over the defaults.
    ///
    /// Defaults come from `#[serde(default)]`, so only keys a source actually
    /// sets are overridden. `config_file` is the path passed via `--config`;
    /// it must exist when given.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let mut builder = Config::builder();

        if let Some(global) = Self::global_config_path() {
            builder = builder.add_source(
                File::from(global.as_path())
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        let (file, required) = match config_file {
            Some(path) => (path.as_path(), true),
            None => (Path::new(LOCAL_CONFIG_FILE), false),
        };
        builder = builder.add_source(File::from(file).format(FileFormat::Toml).required(required));

        let config = builder
            .add_source(
                Environment::with_prefix("CONFGEN")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("generation.resource_roots")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration values")
    }

    /// Path of the user-wide configuration file, if the platform has one.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness.
    pub fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "confgen", "confgen")
            .map(|d| d.config_dir().join("config.toml"))
    }

    /// Path of the project-local configuration file.
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    /// Look up a single value by dotted key, rendered as text.
    pub fn get(&self, key: &str) -> Option<String> {
        let g = &self.generation;
        let value = match key {
            "generation.resource_roots" => g
                .resource_roots
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(","),
            "generation.output_dir" => g.output_dir.display().to_string(),
            "generation.base_package" => g.base_package.clone(),
            "generation.test_source_only" => g.test_source_only.to_string(),
            "generation.template" => g
                .template
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }
}
