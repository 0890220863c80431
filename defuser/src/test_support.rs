//! Test-only helpers for constructing device states.

use crate::core::state::{DEFAULT_MAX_STRIKES, DeviceSetup, DeviceState};

/// Setup with an even, vowel-free serial, no batteries and no indicators.
pub fn plain_setup() -> DeviceSetup {
    DeviceSetup {
        serial: "BC2".to_string(),
        ..DeviceSetup::default()
    }
}

/// Setup whose serial contains a vowel (and is still even).
pub fn vowel_setup() -> DeviceSetup {
    DeviceSetup {
        serial: "AB2".to_string(),
        ..DeviceSetup::default()
    }
}

/// Build a state from `setup` that is already waiting for modules.
pub fn state_from(setup: DeviceSetup) -> DeviceState {
    let mut state =
        DeviceState::from_setup(&setup, DEFAULT_MAX_STRIKES).expect("valid test setup");
    state.begin().expect("begin session");
    state
}

/// Started device with [`plain_setup`].
pub fn device() -> DeviceState {
    state_from(plain_setup())
}

/// Started device whose serial ends in an odd digit.
pub fn odd_device() -> DeviceState {
    state_from(DeviceSetup {
        serial: "BC3".to_string(),
        ..DeviceSetup::default()
    })
}

/// Setup with explicit batteries, indicators and lit subset.
pub fn setup_with(serial: &str, batteries: u32, indicators: &[&str], lit: &[&str]) -> DeviceSetup {
    DeviceSetup {
        serial: serial.to_string(),
        batteries,
        holders: batteries.div_ceil(2),
        indicators: indicators.iter().map(ToString::to_string).collect(),
        lit: lit.iter().map(ToString::to_string).collect(),
    }
}
