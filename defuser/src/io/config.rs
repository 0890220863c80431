//! Defuser configuration stored in `defuser.toml`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::state::DEFAULT_MAX_STRIKES;

pub const DEFAULT_CONFIG_FILE: &str = "defuser.toml";

/// Defuser configuration (TOML).
///
/// Missing fields default to the published rules: three strikes end a device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DefuserConfig {
    /// Strikes after which the device explodes.
    pub max_strikes: u32,

    /// Tracing filter used when `RUST_LOG` is unset (e.g. `info` to log every action).
    pub log_filter: String,

    /// Print the status block and prompts in interactive sessions.
    pub prompt: bool,
}

impl Default for DefuserConfig {
    fn default() -> Self {
        Self {
            max_strikes: DEFAULT_MAX_STRIKES,
            log_filter: "warn".to_string(),
            prompt: true,
        }
    }
}

impl DefuserConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_strikes == 0 {
            return Err(anyhow!("max_strikes must be > 0"));
        }
        if self.log_filter.trim().is_empty() {
            return Err(anyhow!("log_filter must be non-empty"));
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `DefuserConfig::default()`.
pub fn load_config(path: &Path) -> Result<DefuserConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config missing, using defaults");
        let cfg = DefuserConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DefuserConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, cfg: &DefuserConfig) -> Result<()> {
    cfg.validate()?;
    let mut buf = toml::to_string_pretty(cfg).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

pub(crate) fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let parent = path
        .parent()
        .with_context(|| format!("path missing parent {}", path.display()))?;
    fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp file {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_returns_default() {
        let temp = tempfile::tempdir().expect("tempdir");
        let cfg = load_config(&temp.path().join("missing.toml")).expect("load");
        assert_eq!(cfg, DefuserConfig::default());
    }

    #[test]
    fn write_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("defuser.toml");
        let cfg = DefuserConfig {
            max_strikes: 5,
            log_filter: "defuser=info".to_string(),
            prompt: false,
        };
        write_config(&path, &cfg).expect("write");
        let loaded = load_config(&path).expect("load");
        assert_eq!(loaded, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("defuser.toml");
        fs::write(&path, "max_strikes = 1\n").expect("write");
        let cfg = load_config(&path).expect("load");
        assert_eq!(cfg.max_strikes, 1);
        assert_eq!(cfg.log_filter, "warn");
        assert!(cfg.prompt);
    }

    #[test]
    fn zero_strikes_is_rejected() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("defuser.toml");
        fs::write(&path, "max_strikes = 0\n").expect("write");
        let err = load_config(&path).expect_err("invalid");
        assert!(err.to_string().contains("max_strikes"));
    }
}
