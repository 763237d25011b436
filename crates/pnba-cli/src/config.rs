//! CLI configuration

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::Context;
use pnba_core::HeuristicKind;
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;

/// Get default config file path
pub fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pnba")
        .join("config.toml")
}

/// Config file path, preferring an explicit override
pub fn config_file_path(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf).unwrap_or_else(default_config_path)
}

/// Where the forward search direction runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunnerKind {
    /// A dedicated OS thread
    #[default]
    Thread,
    /// The tokio blocking thread pool
    Tokio,
}

impl fmt::Display for RunnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Thread => write!(f, "thread"),
            Self::Tokio => write!(f, "tokio"),
        }
    }
}

impl FromStr for RunnerKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "thread" => Ok(Self::Thread),
            "tokio" => Ok(Self::Tokio),
            other => anyhow::bail!("unknown runner '{}' (expected thread or tokio)", other),
        }
    }
}

/// Configuration for the CLI
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub heuristic: HeuristicKind,
    pub runner: RunnerKind,
    pub format: OutputFormat,
}

impl Config {
    /// Load config from `path`, using defaults if the file does not exist
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Write config to `path`, creating parent directories
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Saved config to {:?}", path);
        Ok(())
    }

    pub fn keys() -> &'static [&'static str] {
        &["heuristic", "runner", "format"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "heuristic" => Some(self.heuristic.to_string()),
            "runner" => Some(self.runner.to_string()),
            "format" => Some(self.format.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "heuristic" => self.heuristic = value.parse()?,
            "runner" => self.runner = value.parse()?,
            "format" => self.format = value.parse()?,
            _ => anyhow::bail!(
                "Unknown config key: {} (available keys: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}
