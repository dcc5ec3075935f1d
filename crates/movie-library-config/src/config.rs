use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub search: SearchOptions,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchOptions {
    /// Ceiling on provider search attempts before the lookup is abandoned.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// At most this many raw hits are considered per search.
    #[serde(default = "default_raw_hit_budget")]
    pub raw_hit_budget: usize,
    /// At most this many qualifying candidates are presented for selection.
    #[serde(default = "default_candidate_cap")]
    pub candidate_cap: usize,
}

fn default_base_url() -> String {
    "https://api.reelvault.dev/imdb".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> u32 {
    20
}

fn default_raw_hit_budget() -> usize {
    20
}

fn default_candidate_cap() -> usize {
    10
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            raw_hit_budget: default_raw_hit_budget(),
            candidate_cap: default_candidate_cap(),
        }
    }
}

impl Config {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load the config file if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }
}
