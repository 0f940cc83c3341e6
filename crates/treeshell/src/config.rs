//! Shell configuration
//!
//! Settings are read from an optional TOML file named by `--config <path>` or
//! the `TREESHELL_CONFIG` environment variable. Every field has a default, so
//! an empty file (or no file at all) is valid.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tree_render::RenderOptions;
use tree_service::ServiceConfig;

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "TREESHELL_CONFIG";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "treeshell", about = "Edit a tree of uniquely named nodes")]
pub struct Cli {
    /// TOML config file
    #[arg(long, env = CONFIG_ENV)]
    pub config: Option<PathBuf>,
}

/// Settings for one shell session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Keep the tree in this JSON file between sessions; memory only if unset
    pub state_file: Option<PathBuf>,

    /// Name given to the root by `create-root` without an argument
    pub root_name: String,

    /// Default file name for `save`
    pub save_file: String,

    /// Drawing surface and layout
    pub render: RenderOptions,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            state_file: None,
            root_name: "Root".to_string(),
            save_file: "tree.json".to_string(),
            render: RenderOptions::default(),
        }
    }
}

impl ShellConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Persist the tree to `path`
    pub fn state_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.state_file = Some(path.into());
        self
    }

    /// Set the default root name
    pub fn root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Set the default save file name
    pub fn save_file(mut self, name: impl Into<String>) -> Self {
        self.save_file = name.into();
        self
    }

    /// Set the render options
    pub fn render(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }

    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse config")
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: ShellConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Resolve the config named on the command line or in [`CONFIG_ENV`],
    /// falling back to the defaults
    pub fn resolve(cli: &Cli) -> Result<Self> {
        match &cli.config {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The service settings carried by this config
    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig::new()
            .root_name(self.root_name.clone())
            .save_filename(self.save_file.clone())
    }
}
