//! Generator configuration
//!
//! Configuration file: ~/.config/xwf/config.yaml
//!
//! Every field is optional. Command-line flags take precedence over
//! anything set here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global generator configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// App name used instead of prompting
    #[serde(default)]
    pub default_app_name: Option<String>,

    /// Directory of template files overriding the built-in ones
    #[serde(default)]
    pub template_dir: Option<PathBuf>,

    /// Post-scaffold dependency installation
    #[serde(default)]
    pub install: InstallConfig,
}

/// Settings for the dependency installation step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallConfig {
    /// Never run the install commands
    #[serde(default)]
    pub skip: bool,

    /// Commands run in the project directory, in order
    #[serde(default = "default_install_commands")]
    pub commands: Vec<String>,
}

fn default_install_commands() -> Vec<String> {
    vec!["npm install".to_string(), "bower install".to_string()]
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            skip: false,
            commands: default_install_commands(),
        }
    }
}

impl Config {
    /// Load configuration from a path such as [`crate::Paths::config_file`], falling back to defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;

        // An empty file is a valid, all-defaults config
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config from {:?}", path))
    }

    /// Render as YAML, as it would be saved
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {:?}", parent))?;
        }
        let content = self.to_yaml()?;
        std::fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))?;
        Ok(())
    }
}
