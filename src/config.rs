//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/treebench/treebench.toml`
//! 3. Explicit config file (`--config`)
//! 4. Environment variables: `TREEBENCH_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::builder::{DEFAULT_FAN_OUT, MIN_FAN_OUT};
use crate::errors::{BenchError, BenchResult};

pub const ENV_PREFIX: &str = "TREEBENCH";

/// Size list of the reference run: 2,000 then 200,000..=2,000,000 in 200,000 steps.
pub fn default_sizes() -> Vec<usize> {
    std::iter::once(2_000)
        .chain((1..=10).map(|step| step * 200_000))
        .collect()
}

/// Unified configuration for treebench.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Values strictly greater than this are collected
    pub threshold: i64,
    /// Timed traversals per variant and sample
    pub iterations: u32,
    /// Requested node counts, benchmarked in order
    pub sizes: Vec<usize>,
    /// Node count of the smoke-test tree
    pub smoke_size: usize,
    /// Children per inner node
    pub fan_out: usize,
    /// Seed for reproducible trees (unseeded when absent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            threshold: 80,
            iterations: 10,
            sizes: default_sizes(),
            smoke_size: 30,
            fan_out: DEFAULT_FAN_OUT,
            seed: None,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub threshold: Option<i64>,
    pub iterations: Option<u32>,
    pub sizes: Option<Vec<usize>>,
    pub smoke_size: Option<usize>,
    pub fan_out: Option<usize>,
    pub seed: Option<u64>,
}

/// Get the XDG config directory for treebench.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "treebench").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("treebench.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> BenchResult<RawSettings> {
    let content = std::fs::read_to_string(path).map_err(|e| BenchError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| BenchError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins wherever it specifies a value; arrays are replaced, not merged.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            threshold: overlay.threshold.unwrap_or(self.threshold),
            iterations: overlay.iterations.unwrap_or(self.iterations),
            sizes: overlay.sizes.clone().unwrap_or_else(|| self.sizes.clone()),
            smoke_size: overlay.smoke_size.unwrap_or(self.smoke_size),
            fan_out: overlay.fan_out.unwrap_or(self.fan_out),
            seed: overlay.seed.or(self.seed),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; it must exist
    pub fn load(config_file: Option<&Path>) -> BenchResult<Self> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw);
            }
        }

        if let Some(path) = config_file {
            let raw = load_raw_settings(path)?;
            current = current.merge_with(&raw);
        }

        Self::apply_env_overrides(current, Self::environment())
    }

    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("sizes")
    }

    /// Apply `TREEBENCH_*` variables from `env` as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> BenchResult<Self> {
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        if let Some(val) = lookup::<i64>(&config, "threshold")? {
            settings.threshold = val;
        }
        if let Some(val) = lookup::<u32>(&config, "iterations")? {
            settings.iterations = val;
        }
        if let Some(val) = lookup::<Vec<usize>>(&config, "sizes")? {
            settings.sizes = val;
        }
        if let Some(val) = lookup::<usize>(&config, "smoke_size")? {
            settings.smoke_size = val;
        }
        if let Some(val) = lookup::<usize>(&config, "fan_out")? {
            settings.fan_out = val;
        }
        if let Some(val) = lookup::<u64>(&config, "seed")? {
            settings.seed = Some(val);
        }

        Ok(settings)
    }

    /// Reject settings the harness cannot run with.
    pub fn validate(&self) -> BenchResult<()> {
        if self.iterations == 0 {
            return Err(BenchError::InvalidSettings(
                "iterations must be at least 1".into(),
            ));
        }
        if self.fan_out < MIN_FAN_OUT {
            return Err(BenchError::InvalidSettings(format!(
                "fan_out must be at least {MIN_FAN_OUT}"
            )));
        }
        if self.smoke_size == 0 {
            return Err(BenchError::InvalidSettings(
                "smoke_size must be at least 1".into(),
            ));
        }
        if self.sizes.is_empty() {
            return Err(BenchError::InvalidSettings("sizes must not be empty".into()));
        }
        if self.sizes.contains(&0) {
            return Err(BenchError::InvalidSettings(
                "sizes must all be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> BenchResult<String> {
        toml::to_string_pretty(self).map_err(|e| BenchError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# treebench configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/treebench/treebench.toml
#   File:   --config <FILE>
#   Env:    TREEBENCH_* environment variables (TREEBENCH_SIZES=1000,2000)
#   Flags:  command line options

# Values strictly greater than the threshold are collected
# threshold = 80

# Timed traversals per variant and tree size
# iterations = 10

# Tree sizes to benchmark, in order
# sizes = [2000, 200000, 400000, 600000, 800000, 1000000, 1200000, 1400000, 1600000, 1800000, 2000000]

# Node count of the smoke-test tree
# smoke_size = 30

# Children per inner node
# fan_out = 8

# Seed for reproducible trees (random when unset)
# seed = 42
"#
        .to_string()
    }
}

fn lookup<T: serde::de::DeserializeOwned>(config: &Config, key: &str) -> BenchResult<Option<T>> {
    match config.get::<T>(key) {
        Ok(val) => Ok(Some(val)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(BenchError::Config {
            message: format!("{ENV_PREFIX}_{}: {e}", key.to_uppercase()),
        }),
    }
}

fn config_err(e: ConfigError) -> BenchError {
    BenchError::Config {
        message: e.to_string(),
    }
}
