//! Session-wide device state consulted by the solvers.
//!
//! One `DeviceState` exists per device. Solvers only read it; the session
//! driver owns every mutation (strikes, lit indicators, committed memory,
//! phase transitions).

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::error::{SolveError, SolveResult};
use crate::core::memory::MemoryProgress;
use crate::core::types::{Color, MemoryUpdate, Resolution};

pub const DEFAULT_MAX_STRIKES: u32 = 3;

/// Serial used when the operator leaves the serial blank.
pub const FALLBACK_SERIAL: &str = "A0";

pub const CAR: &str = "CAR";
pub const FRK: &str = "FRK";
pub const BOB: &str = "BOB";
pub const NSA: &str = "NSA";
pub const PARALLEL: &str = "PARALLEL";
pub const DVI_D: &str = "DVI-D";

/// Labels the rules can ask about as lit.
pub const LIGHTABLE_INDICATORS: [&str; 4] = [FRK, CAR, BOB, NSA];

/// Operator-reported facts about a device, as captured at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceSetup {
    pub serial: String,
    pub batteries: u32,
    pub holders: u32,
    /// Every indicator (and port) present, lit or not.
    pub indicators: Vec<String>,
    /// Subset of `indicators` that is lit.
    pub lit: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Defused,
    ExplodedOnStrikes,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Unstarted,
    AwaitingModule,
    Resolved(Outcome),
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unstarted => f.write_str("unstarted"),
            Phase::AwaitingModule => f.write_str("waiting"),
            Phase::Resolved(Outcome::Defused) => f.write_str("defused"),
            Phase::Resolved(Outcome::ExplodedOnStrikes) => f.write_str("exploded (strikes)"),
            Phase::Resolved(Outcome::TimedOut) => f.write_str("exploded (time)"),
        }
    }
}

/// Serial-number facts, fixed once computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerialFlags {
    pub is_odd: bool,
    pub has_vowel: bool,
}

impl SerialFlags {
    /// Parity comes from the last digit in the serial. A serial without any
    /// digit counts as even.
    pub fn from_serial(serial: &str) -> Self {
        let is_odd = serial
            .chars()
            .rev()
            .find_map(|c| c.to_digit(10))
            .is_some_and(|digit| digit % 2 == 1);
        let has_vowel = serial
            .chars()
            .any(|c| matches!(c.to_ascii_uppercase(), 'A' | 'E' | 'I' | 'O' | 'U'));
        Self { is_odd, has_vowel }
    }
}

/// Memory that two modules carry between calls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossModuleMemory {
    pub simon: Vec<Color>,
    pub memory_module: MemoryProgress,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceState {
    strike_count: u32,
    max_strikes: u32,
    battery_count: u32,
    holder_count: u32,
    indicators: BTreeSet<String>,
    lit_indicators: BTreeSet<String>,
    serial: String,
    flags: SerialFlags,
    memory: CrossModuleMemory,
    phase: Phase,
}

impl DeviceState {
    /// Build the state for a freshly discovered device.
    ///
    /// Labels are uppercased. A lit label that is not among the indicators
    /// is rejected, as is a serial with non-alphanumeric characters.
    pub fn from_setup(setup: &DeviceSetup, max_strikes: u32) -> SolveResult<Self> {
        let serial = match setup.serial.trim() {
            "" => FALLBACK_SERIAL.to_string(),
            raw => raw.to_ascii_uppercase(),
        };
        if !serial.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SolveError::malformed(
                "an alphanumeric serial",
                format!("'{serial}'"),
            ));
        }
        if max_strikes == 0 {
            return Err(SolveError::malformed("max strikes >= 1", "0"));
        }

        let indicators: BTreeSet<String> = normalize_labels(&setup.indicators);
        let lit_indicators: BTreeSet<String> = normalize_labels(&setup.lit);
        if let Some(stray) = lit_indicators.difference(&indicators).next() {
            return Err(SolveError::malformed(
                "lit indicators to be present on the device",
                format!("lit '{stray}' without that indicator"),
            ));
        }
        if let Some(dark) = lit_indicators.iter().find(|label| !is_lightable(label)) {
            return Err(not_lightable(dark));
        }

        let flags = SerialFlags::from_serial(&serial);
        Ok(Self {
            strike_count: 0,
            max_strikes,
            battery_count: setup.batteries,
            holder_count: setup.holders,
            indicators,
            lit_indicators,
            serial,
            flags,
            memory: CrossModuleMemory::default(),
            phase: Phase::Unstarted,
        })
    }

    pub fn strike_count(&self) -> u32 {
        self.strike_count
    }

    pub fn max_strikes(&self) -> u32 {
        self.max_strikes
    }

    pub fn battery_count(&self) -> u32 {
        self.battery_count
    }

    pub fn holder_count(&self) -> u32 {
        self.holder_count
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn is_odd(&self) -> bool {
        self.flags.is_odd
    }

    pub fn is_even(&self) -> bool {
        !self.flags.is_odd
    }

    pub fn has_vowel(&self) -> bool {
        self.flags.has_vowel
    }

    pub fn has_indicator(&self, label: &str) -> bool {
        self.indicators.contains(label)
    }

    pub fn is_lit(&self, label: &str) -> bool {
        self.lit_indicators.contains(label)
    }

    pub fn indicators(&self) -> impl Iterator<Item = &str> {
        self.indicators.iter().map(String::as_str)
    }

    pub fn lit_indicators(&self) -> impl Iterator<Item = &str> {
        self.lit_indicators.iter().map(String::as_str)
    }

    pub fn memory(&self) -> &CrossModuleMemory {
        &self.memory
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// `Unstarted -> AwaitingModule`. Idempotent while awaiting.
    pub fn begin(&mut self) -> SolveResult<()> {
        match self.phase {
            Phase::Unstarted | Phase::AwaitingModule => {
                self.phase = Phase::AwaitingModule;
                Ok(())
            }
            phase @ Phase::Resolved(_) => Err(SolveError::SessionNotAccepting { phase }),
        }
    }

    /// Record an operator-reported strike. Reaching the limit ends the session.
    pub fn record_strike(&mut self) -> SolveResult<Phase> {
        self.ensure_awaiting()?;
        self.strike_count += 1;
        if self.strike_count >= self.max_strikes {
            self.phase = Phase::Resolved(Outcome::ExplodedOnStrikes);
        }
        Ok(self.phase)
    }

    pub fn defuse(&mut self) -> SolveResult<()> {
        self.ensure_awaiting()?;
        self.phase = Phase::Resolved(Outcome::Defused);
        Ok(())
    }

    pub fn time_out(&mut self) -> SolveResult<()> {
        self.ensure_awaiting()?;
        self.phase = Phase::Resolved(Outcome::TimedOut);
        Ok(())
    }

    /// Change whether a present indicator is lit.
    pub fn set_lit(&mut self, label: &str, lit: bool) -> SolveResult<()> {
        let label = label.trim().to_ascii_uppercase();
        if !self.indicators.contains(&label) {
            return Err(SolveError::malformed(
                "an indicator present on the device",
                format!("'{label}'"),
            ));
        }
        if !is_lightable(&label) {
            return Err(not_lightable(&label));
        }
        if lit {
            self.lit_indicators.insert(label);
        } else {
            self.lit_indicators.remove(&label);
        }
        Ok(())
    }

    /// Apply the memory a stateful solver handed back with its resolution.
    pub fn commit(&mut self, resolution: &Resolution) {
        match &resolution.memory {
            Some(MemoryUpdate::Simon(sequence)) => self.memory.simon = sequence.clone(),
            Some(MemoryUpdate::Memory(progress)) => self.memory.memory_module = progress.clone(),
            None => {}
        }
    }

    pub fn ensure_awaiting(&self) -> SolveResult<()> {
        match self.phase {
            Phase::AwaitingModule => Ok(()),
            phase => Err(SolveError::SessionNotAccepting { phase }),
        }
    }
}

fn is_lightable(label: &str) -> bool {
    LIGHTABLE_INDICATORS.contains(&label)
}

fn not_lightable(label: &str) -> SolveError {
    SolveError::malformed(
        format!("one of {}", LIGHTABLE_INDICATORS.join(", ")),
        format!("'{label}'"),
    )
}

fn normalize_labels(labels: &[String]) -> BTreeSet<String> {
    labels
        .iter()
        .map(|label| label.trim().to_ascii_uppercase())
        .filter(|label| !label.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(serial: &str) -> DeviceSetup {
        DeviceSetup {
            serial: serial.to_string(),
            batteries: 2,
            holders: 1,
            indicators: vec!["car".to_string(), "PARALLEL".to_string()],
            lit: vec!["CAR".to_string()],
        }
    }

    #[test]
    fn serial_flags_use_last_digit() {
        assert_eq!(
            SerialFlags::from_serial("AB3"),
            SerialFlags {
                is_odd: true,
                has_vowel: true
            }
        );
        assert!(!SerialFlags::from_serial("XY4").is_odd);
        assert!(SerialFlags::from_serial("XY7Z").is_odd);
        assert!(!SerialFlags::from_serial("XYZ").is_odd);
        assert!(!SerialFlags::from_serial("BCD9").has_vowel);
    }

    #[test]
    fn blank_serial_falls_back_to_even_with_vowel() {
        let state = DeviceState::from_setup(&setup("  "), DEFAULT_MAX_STRIKES).expect("state");
        assert_eq!(state.serial(), FALLBACK_SERIAL);
        assert!(state.is_even());
        assert!(state.has_vowel());
    }

    #[test]
    fn labels_are_uppercased() {
        let state = DeviceState::from_setup(&setup("b1"), DEFAULT_MAX_STRIKES).expect("state");
        assert!(state.has_indicator(CAR));
        assert!(state.is_lit(CAR));
        assert!(!state.is_lit(PARALLEL));
        assert_eq!(state.serial(), "B1");
    }

    #[test]
    fn lit_label_must_be_present() {
        let mut bad = setup("b1");
        bad.lit.push("FRK".to_string());
        let err = DeviceState::from_setup(&bad, DEFAULT_MAX_STRIKES).expect_err("stray lit");
        assert!(matches!(err, SolveError::MalformedInput { .. }));
    }

    #[test]
    fn strikes_end_session_at_limit() {
        let mut state = DeviceState::from_setup(&setup("b1"), 3).expect("state");
        state.begin().expect("begin");
        assert_eq!(state.record_strike(), Ok(Phase::AwaitingModule));
        assert_eq!(state.record_strike(), Ok(Phase::AwaitingModule));
        assert_eq!(
            state.record_strike(),
            Ok(Phase::Resolved(Outcome::ExplodedOnStrikes))
        );
        assert_eq!(state.strike_count(), 3);
        assert!(matches!(
            state.record_strike(),
            Err(SolveError::SessionNotAccepting { .. })
        ));
    }

    #[test]
    fn strike_before_begin_is_rejected() {
        let mut state = DeviceState::from_setup(&setup("b1"), 3).expect("state");
        assert_eq!(
            state.record_strike(),
            Err(SolveError::SessionNotAccepting {
                phase: Phase::Unstarted
            })
        );
        assert_eq!(state.strike_count(), 0);
    }

    #[test]
    fn set_lit_keeps_subset_invariant() {
        let mut state = DeviceState::from_setup(&setup("b1"), 3).expect("state");
        state.set_lit("CAR", false).expect("present");
        assert!(!state.is_lit(CAR));
        state.set_lit("car", true).expect("present");
        assert!(state.is_lit(CAR));
        assert!(state.set_lit("NSA", true).is_err());
    }

    #[test]
    fn ports_never_light() {
        let mut state = DeviceState::from_setup(&setup("b1"), 3).expect("state");
        let err = state.set_lit("parallel", true).expect_err("port");
        assert_eq!(
            err,
            SolveError::malformed("one of FRK, CAR, BOB, NSA", "'PARALLEL'")
        );
        assert!(!state.is_lit(PARALLEL));

        let mut lit_port = setup("b1");
        lit_port.lit.push(PARALLEL.to_string());
        assert!(DeviceState::from_setup(&lit_port, 3).is_err());
    }

    #[test]
    fn commit_replaces_simon_memory() {
        let mut state = DeviceState::from_setup(&setup("b1"), 3).expect("state");
        let resolution = Resolution {
            action: crate::core::types::Action::Flash { colors: vec![] },
            memory: Some(MemoryUpdate::Simon(vec![Color::Red, Color::Green])),
        };
        state.commit(&resolution);
        assert_eq!(state.memory().simon, vec![Color::Red, Color::Green]);
    }
}
