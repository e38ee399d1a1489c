use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Error, Result};

/// Top-level configuration, loadable from a TOML file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub stats: StatsConfig,
}

/// Query engine tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search_cache_capacity: usize, // entries, oldest-inserted evicted first
    pub default_search_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            search_cache_capacity: 100,
            default_search_limit: 50,
        }
    }
}

/// Statistics aggregator limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub top_themes: usize,
    pub top_tags: usize,
    pub top_authors: usize,
    pub suggestion_count: usize,
    pub recent_window: usize, // books inspected to infer the current reading level
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            top_themes: 10,
            top_tags: 15,
            top_authors: 10,
            suggestion_count: 3,
            recent_window: 5,
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(content)?;
        // LruCache needs a non-zero bound
        config.engine.search_cache_capacity = config.engine.search_cache_capacity.max(1);
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml_str("[stats]\ntop_tags = 5\n").unwrap();
        assert_eq!(config.stats.top_tags, 5);
        assert_eq!(config.stats.top_themes, 10);
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn zero_cache_capacity_is_clamped() {
        let config = Config::from_toml_str("[engine]\nsearch_cache_capacity = 0\n").unwrap();
        assert_eq!(config.engine.search_cache_capacity, 1);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = Config::from_toml_str("[engine\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
