use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::error::{SpliceError, SpliceResult};

/// Name of the scaffolding binary driven by the e2e scenarios
pub const DEFAULT_SCAFFOLD_BIN: &str = "kubebuilder";

/// Permission bits for rewritten fixture files
pub const DEFAULT_FILE_MODE: u32 = 0o644;

const CONFIG_PATH_ENV: &str = "SCAFFOLD_E2E_CONFIG";
const FILE_MODE_ENV: &str = "SCAFFOLD_E2E_FILE_MODE";
const ATOMIC_WRITES_ENV: &str = "SCAFFOLD_E2E_ATOMIC_WRITES";
const SCAFFOLD_BIN_ENV: &str = "SCAFFOLD_E2E_BIN";

/// Settings shared by every file splice
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpliceConfig {
    /// Mode applied when a file is created or atomically replaced
    #[serde(default = "default_file_mode")]
    pub file_mode: u32,

    /// Write through a temp file and rename instead of truncating in place
    #[serde(default)]
    pub atomic_writes: bool,

    /// Scaffolding binary name
    #[serde(default = "default_scaffold_bin")]
    pub scaffold_bin: String,
}

fn default_file_mode() -> u32 {
    DEFAULT_FILE_MODE
}

fn default_scaffold_bin() -> String {
    DEFAULT_SCAFFOLD_BIN.to_string()
}

impl Default for SpliceConfig {
    fn default() -> Self {
        Self {
            file_mode: default_file_mode(),
            atomic_writes: false,
            scaffold_bin: default_scaffold_bin(),
        }
    }
}

impl SpliceConfig {
    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> SpliceResult<Self> {
        let config: SpliceConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> SpliceResult<()> {
        if self.file_mode > 0o777 {
            return Err(SpliceError::config(format!(
                "file_mode {:o} exceeds 0o777",
                self.file_mode
            )));
        }
        if self.scaffold_bin.trim().is_empty() {
            return Err(SpliceError::config("scaffold_bin must not be empty"));
        }
        Ok(())
    }

    /// Apply `SCAFFOLD_E2E_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> SpliceResult<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary lookup, mainly so tests avoid touching the real environment
    pub fn apply_overrides<F>(&mut self, lookup: F) -> SpliceResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(mode) = lookup(FILE_MODE_ENV) {
            self.file_mode = parse_mode(&mode)?;
        }
        if let Some(atomic) = lookup(ATOMIC_WRITES_ENV) {
            self.atomic_writes = parse_bool(ATOMIC_WRITES_ENV, &atomic)?;
        }
        if let Some(bin) = lookup(SCAFFOLD_BIN_ENV) {
            self.scaffold_bin = bin;
        }
        self.validate()
    }
}

fn parse_mode(value: &str) -> SpliceResult<u32> {
    let digits = value.trim();
    let digits = digits.strip_prefix("0o").unwrap_or(digits);
    u32::from_str_radix(digits, 8)
        .map_err(|e| SpliceError::config(format!("{FILE_MODE_ENV}={value:?}: {e}")))
}

fn parse_bool(key: &str, value: &str) -> SpliceResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(SpliceError::config(format!(
            "{key}={other:?} is not a boolean"
        ))),
    }
}

/// The configuration loader
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that only uses defaults and environment overrides
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set a custom config path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Use `SCAFFOLD_E2E_CONFIG` as the config path when it is set
    pub fn from_env() -> Self {
        Self {
            config_path: env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
        }
    }

    /// Load the configuration, falling back to defaults when the file is missing
    pub fn load(&self) -> SpliceResult<SpliceConfig> {
        let mut config = self
            .read_file()
            .map_err(|e| SpliceError::config(format!("{e:#}")))?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    fn read_file(&self) -> Result<SpliceConfig> {
        let Some(path) = &self.config_path else {
            return Ok(SpliceConfig::default());
        };

        if !path.exists() {
            debug!("Config file {} not found, using defaults", path.display());
            return Ok(SpliceConfig::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = SpliceConfig::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
