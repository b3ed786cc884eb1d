//! Configuration management using Figment
//!
//! Sources, highest precedence first:
//! 1. Environment variables (prefix: `SEEDLING_`)
//! 2. `./seedling.toml`
//! 3. `<config dir>/config.toml` (e.g. `~/.config/seedling/config.toml`)
//! 4. Default values

use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Project-local config file name
pub const LOCAL_CONFIG_FILE: &str = "seedling.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Figment(#[from] Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Tool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Never run git after generating a project
    #[serde(default)]
    pub skip_git: bool,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            skip_git: false,
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from every standard location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_paths(&Self::find_config_paths())
    }

    /// Load settings from the given files, lowest priority first, then the environment
    pub fn load_from_paths(paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));

        for path in paths {
            if path.exists() {
                tracing::debug!("Loading configuration from: {}", path.display());
                figment = figment.merge(Toml::file(path));
            }
        }

        figment = figment.merge(Env::prefixed("SEEDLING_"));

        Ok(figment.extract()?)
    }

    /// Config files in ascending priority
    fn find_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(dirs) = project_dirs() {
            paths.push(dirs.config_dir().join("config.toml"));
        }

        paths.push(Path::new(LOCAL_CONFIG_FILE).to_path_buf());

        paths
    }
}

/// Platform directories for seedling
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("dev", "seedling", "seedling")
}
