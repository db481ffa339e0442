//! Configuration file loading for quell.
//!
//! Reads `.quell/quell.json` and provides typed access to all settings.
//! Falls back to sensible defaults when the config file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Top-level quell configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuellConfig {
    #[serde(default = "default_version")]
    pub version: String,
    /// Messages, categories or checkers enabled for the whole run.
    #[serde(default)]
    pub enable: Vec<String>,
    /// Messages, categories or checkers disabled for the whole run.
    #[serde(default)]
    pub disable: Vec<String>,
    /// Accepted confidence names; empty accepts every confidence.
    #[serde(default)]
    pub confidence: Vec<String>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub stats: StatsConfig,
}

/// Reporter settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_format")]
    pub format: String,
    /// Prefix stripped from absolute paths when displaying a location.
    #[serde(default)]
    pub path_strip_prefix: String,
}

/// Statistics persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsConfig {
    #[serde(default = "default_true")]
    pub persistent: bool,
    #[serde(default = "default_stats_db")]
    pub db: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}
fn default_true() -> bool {
    true
}
fn default_format() -> String {
    "text".to_string()
}
fn default_stats_db() -> String {
    "stats.db".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            path_strip_prefix: String::new(),
        }
    }
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            persistent: true,
            db: default_stats_db(),
        }
    }
}

impl Default for QuellConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            enable: vec![],
            disable: vec![],
            confidence: vec![],
            output: OutputConfig::default(),
            stats: StatsConfig::default(),
        }
    }
}

impl QuellConfig {
    /// Load configuration from `quell.json` inside the given quell directory.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(quell_dir: &Path) -> Self {
        let config_path = quell_dir.join("quell.json");
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }
}

/// Live run settings consulted while messages are decided.
///
/// `enable` and `disable` mirror the run-wide toggle map: they are rebuilt
/// from it after every run-scoped change, sorted by message id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub enable: Vec<String>,
    pub disable: Vec<String>,
    pub confidence: Vec<String>,
}

impl RunConfig {
    /// Whether a confidence name passes the configured filter.
    pub fn accepts_confidence(&self, name: &str) -> bool {
        self.confidence.is_empty() || self.confidence.iter().any(|c| c == name)
    }
}

impl From<&QuellConfig> for RunConfig {
    fn from(cfg: &QuellConfig) -> Self {
        Self {
            enable: vec![],
            disable: vec![],
            confidence: cfg.confidence.clone(),
        }
    }
}
