// src/config.rs
//! Pipeline configuration: TOML file with env-var overrides.
//!
//! Resolution order: $PIPELINE_CONFIG_PATH, then `config/pipeline.toml`,
//! then built-in defaults. Individual values can be overridden via env
//! after the file is read. Classifier thresholds are deliberately absent
//! here — they are fixed design constants in `classify`.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_PIPELINE_CONFIG_PATH: &str = "config/pipeline.toml";
pub const ENV_PIPELINE_CONFIG_PATH: &str = "PIPELINE_CONFIG_PATH";
pub const ENV_DEFAULT_TOP_N: &str = "PIPELINE_DEFAULT_TOP_N";
pub const ENV_CACHE_CAPACITY: &str = "PIPELINE_CACHE_CAPACITY";
pub const ENV_BIND_ADDR: &str = "PIPELINE_BIND_ADDR";

pub const DEFAULT_CACHE_CAPACITY: usize = 64;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub aggregation: AggregationSection,
    #[serde(default)]
    pub cache: CacheSection,
    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AggregationSection {
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSection {
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_top_n() -> usize {
    crate::aggregate::DEFAULT_TOP_N
}
fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}
fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

impl Default for AggregationSection {
    fn default() -> Self {
        Self {
            default_top_n: default_top_n(),
        }
    }
}
impl Default for CacheSection {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}
impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}
impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationSection::default(),
            cache: CacheSection::default(),
            server: ServerSection::default(),
        }
    }
}

impl PipelineConfig {
    /// Load using env path + fallbacks, then apply env overrides.
    /// A missing default file is not an error; a path set explicitly via
    /// env must exist.
    pub fn load() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_PIPELINE_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!(
                    "{} points to non-existent path {}",
                    ENV_PIPELINE_CONFIG_PATH,
                    pb.display()
                ));
            }
            Self::from_path(&pb)?
        } else {
            let default = PathBuf::from(DEFAULT_PIPELINE_CONFIG_PATH);
            if default.exists() {
                Self::from_path(&default)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading pipeline config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: PipelineConfig = toml::from_str(s).context("parsing pipeline config TOML")?;
        Ok(cfg)
    }

    /// Single-value env overrides, clamped to sane minimums.
    fn apply_env_overrides(&mut self) {
        if let Some(n) = parse_usize_env(ENV_DEFAULT_TOP_N) {
            self.aggregation.default_top_n = n.max(1);
        }
        if let Some(n) = parse_usize_env(ENV_CACHE_CAPACITY) {
            self.cache.capacity = n.max(1);
        }
        if let Ok(addr) = std::env::var(ENV_BIND_ADDR) {
            if !addr.trim().is_empty() {
                self.server.bind_addr = addr;
            }
        }
    }
}

fn parse_usize_env(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
}
