//! TOML configuration for the `folio` CLI and embedding hosts.
//!
//! Only `[data]` is required; every other section falls back to defaults.
//! See `config/folio.example.toml` for a commented example.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_filter_core::WriteOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub state: StateConfig,
    #[serde(default)]
    pub query: QueryConfig,
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    /// Project collection file (`.json` or `.toml`).
    pub projects: PathBuf,
}

/// Where the persisted filter criteria live.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StateBackend {
    /// TOML state file shared across invocations.
    #[default]
    File,
    /// Query string of a location such as `/?tech=react`.
    Url,
    /// Process-local; nothing survives the invocation.
    Memory,
}

impl StateBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StateBackend::File => "file",
            StateBackend::Url => "url",
            StateBackend::Memory => "memory",
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct StateConfig {
    #[serde(default)]
    pub backend: StateBackend,
    #[serde(default = "default_state_path")]
    pub path: PathBuf,
    /// Initial location for the `url` backend.
    #[serde(default = "default_location")]
    pub location: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            backend: StateBackend::default(),
            path: default_state_path(),
            location: default_location(),
        }
    }
}

fn default_state_path() -> PathBuf {
    PathBuf::from("data/filter-state.toml")
}
fn default_location() -> String {
    "/".to_string()
}

/// Query parameter names used by the `url` backend.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    #[serde(default = "default_search_param")]
    pub search_param: String,
    #[serde(default = "default_technology_param")]
    pub technology_param: String,
    #[serde(default = "default_category_param")]
    pub category_param: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_param: default_search_param(),
            technology_param: default_technology_param(),
            category_param: default_category_param(),
        }
    }
}

fn default_search_param() -> String {
    "q".to_string()
}
fn default_technology_param() -> String {
    "tech".to_string()
}
fn default_category_param() -> String {
    "category".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct SchedulerConfig {
    /// Delay before a scheduled commit is written. `0` yields once instead.
    #[serde(default)]
    pub commit_delay_ms: u64,
    #[serde(default = "default_preserve_scroll")]
    pub preserve_scroll: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            commit_delay_ms: 0,
            preserve_scroll: default_preserve_scroll(),
        }
    }
}

fn default_preserve_scroll() -> bool {
    true
}

impl SchedulerConfig {
    pub fn commit_delay(&self) -> Duration {
        Duration::from_millis(self.commit_delay_ms)
    }

    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            preserve_scroll: self.preserve_scroll,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

const MAX_COMMIT_DELAY_MS: u64 = 10_000;

impl Config {
    /// Defaults for running without a config file.
    pub fn minimal(projects: PathBuf) -> Self {
        Self {
            data: DataConfig { projects },
            state: StateConfig::default(),
            query: QueryConfig::default(),
            scheduler: SchedulerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        let names = [
            ("query.search_param", &self.query.search_param),
            ("query.technology_param", &self.query.technology_param),
            ("query.category_param", &self.query.category_param),
        ];
        for (key, name) in names {
            if name.trim().is_empty() {
                anyhow::bail!("{} must not be empty", key);
            }
        }
        if names[0].1 == names[1].1 || names[0].1 == names[2].1 || names[1].1 == names[2].1 {
            anyhow::bail!(
                "query parameter names must be distinct (got '{}', '{}', '{}')",
                names[0].1,
                names[1].1,
                names[2].1
            );
        }

        if self.scheduler.commit_delay_ms > MAX_COMMIT_DELAY_MS {
            anyhow::bail!(
                "scheduler.commit_delay_ms must be <= {}",
                MAX_COMMIT_DELAY_MS
            );
        }

        if self.state.backend == StateBackend::Url && !self.state.location.starts_with('/') {
            anyhow::bail!(
                "state.location must start with '/' (got '{}')",
                self.state.location
            );
        }

        Ok(())
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let mut config: Config =
        toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Relative data/state paths resolve against the config file's directory.
    if let Some(base) = path.parent() {
        if config.data.projects.is_relative() {
            config.data.projects = base.join(&config.data.projects);
        }
        if config.state.path.is_relative() {
            config.state.path = base.join(&config.state.path);
        }
    }

    config.validate()?;
    Ok(config)
}
