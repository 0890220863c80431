//! Device setup files: the facts read off a device before any module.
//!
//! ```toml
//! serial = "AL5QF2"
//! batteries = 2
//! holders = 1
//! indicators = ["FRK", "PARALLEL"]
//! lit = ["FRK"]
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::core::state::{DeviceSetup, DeviceState};
use crate::io::config::{DefuserConfig, write_atomic};

/// Load a device setup from TOML.
pub fn load_setup(path: &Path) -> Result<DeviceSetup> {
    debug!(path = %path.display(), "loading device setup");
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let setup: DeviceSetup =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    Ok(setup)
}

/// Atomically write a device setup (temp file + rename).
pub fn write_setup(path: &Path, setup: &DeviceSetup) -> Result<()> {
    let mut buf = toml::to_string_pretty(setup).context("serialize setup toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

/// Build the session's device state from a setup and the configured strike limit.
pub fn build_state(setup: &DeviceSetup, cfg: &DefuserConfig) -> Result<DeviceState> {
    let state = DeviceState::from_setup(setup, cfg.max_strikes).context("invalid device setup")?;
    info!(
        serial = state.serial(),
        odd = state.is_odd(),
        vowel = state.has_vowel(),
        batteries = state.battery_count(),
        holders = state.holder_count(),
        indicators = ?state.indicators().collect::<Vec<_>>(),
        lit = ?state.lit_indicators().collect::<Vec<_>>(),
        "device set up"
    );
    Ok(state)
}
