//! Simon Says: translate flashed colors into the colors to press.
//!
//! The operator relays the sequence incrementally. A leading `!` stands for
//! the previously accepted sequence so only new flashes need to be spoken.

use crate::core::error::{SolveError, SolveResult};
use crate::core::state::DeviceState;
use crate::core::types::Color;

pub const REPLAY_ALIAS: &str = "!";

pub const SIMON_COLORS: [Color; 4] = [Color::Red, Color::Blue, Color::Green, Color::Yellow];

/// One row per strike count, each mapping `SIMON_COLORS[i]` to `row[i]`.
const WITH_VOWEL: [[Color; 4]; 3] = [
    [Color::Blue, Color::Red, Color::Yellow, Color::Green],
    [Color::Yellow, Color::Green, Color::Blue, Color::Red],
    [Color::Green, Color::Red, Color::Yellow, Color::Blue],
];

const WITHOUT_VOWEL: [[Color; 4]; 3] = [
    [Color::Blue, Color::Yellow, Color::Green, Color::Red],
    [Color::Red, Color::Blue, Color::Yellow, Color::Green],
    [Color::Yellow, Color::Green, Color::Blue, Color::Red],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimonEntry {
    Replay,
    Flash(Color),
}

impl SimonEntry {
    pub fn parse(raw: &str) -> SolveResult<Self> {
        if raw == REPLAY_ALIAS {
            return Ok(SimonEntry::Replay);
        }
        let color: Color = raw.parse()?;
        if !SIMON_COLORS.contains(&color) {
            return Err(SolveError::malformed(
                "a Simon color (red, blue, green, yellow) or !",
                format!("'{raw}'"),
            ));
        }
        Ok(SimonEntry::Flash(color))
    }
}

/// Result of one Simon relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimonOutcome {
    /// Colors to press, in order.
    pub press: Vec<Color>,
    /// Expanded flash sequence; becomes the replay source for the next call.
    pub accepted: Vec<Color>,
}

/// Replace a leading replay alias with the previously accepted sequence.
pub fn expand_sequence(entries: &[SimonEntry], previous: &[Color]) -> SolveResult<Vec<Color>> {
    let mut expanded = Vec::with_capacity(previous.len() + entries.len());
    for (idx, entry) in entries.iter().enumerate() {
        match entry {
            SimonEntry::Replay if idx == 0 => expanded.extend_from_slice(previous),
            SimonEntry::Replay => {
                return Err(SolveError::malformed(
                    format!("{REPLAY_ALIAS} only as the first token"),
                    format!("{REPLAY_ALIAS} at position {}", idx + 1),
                ));
            }
            SimonEntry::Flash(color) => expanded.push(*color),
        }
    }
    if expanded.is_empty() {
        return Err(SolveError::malformed(
            "at least one flashed color",
            "an empty sequence",
        ));
    }
    Ok(expanded)
}

/// Substitute each flashed color through the table selected by the serial
/// vowel flag and the current strike count (capped at the last row).
pub fn substitute(sequence: &[Color], state: &DeviceState) -> SolveResult<Vec<Color>> {
    let table = if state.has_vowel() {
        &WITH_VOWEL
    } else {
        &WITHOUT_VOWEL
    };
    let row_idx = usize::try_from(state.strike_count())
        .unwrap_or(usize::MAX)
        .min(table.len() - 1);
    let row = &table[row_idx];

    sequence
        .iter()
        .map(|color| {
            SIMON_COLORS
                .iter()
                .position(|from| from == color)
                .map(|idx| row[idx])
                .ok_or_else(|| SolveError::unknown("simon substitution", color.as_str()))
        })
        .collect()
}

/// Expand against the remembered sequence, then substitute.
pub fn solve_simon(entries: &[SimonEntry], state: &DeviceState) -> SolveResult<SimonOutcome> {
    let accepted = expand_sequence(entries, &state.memory().simon)?;
    let press = substitute(&accepted, state)?;
    Ok(SimonOutcome { press, accepted })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{MemoryUpdate, Resolution};
    use crate::test_support::{device, state_from, vowel_setup};
    use Color::{Blue, Green, Red, Yellow};

    #[test]
    fn vowel_table_by_strikes() {
        let mut state = state_from(vowel_setup());
        assert_eq!(
            substitute(&[Red, Blue, Green, Yellow], &state),
            Ok(vec![Blue, Red, Yellow, Green])
        );
        state.record_strike().expect("strike");
        assert_eq!(
            substitute(&[Red, Blue, Green, Yellow], &state),
            Ok(vec![Yellow, Green, Blue, Red])
        );
        state.record_strike().expect("strike");
        assert_eq!(
            substitute(&[Red, Blue, Green, Yellow], &state),
            Ok(vec![Green, Red, Yellow, Blue])
        );
    }

    #[test]
    fn no_vowel_table_by_strikes() {
        let mut state = device();
        assert_eq!(
            substitute(&[Red, Blue, Green, Yellow], &state),
            Ok(vec![Blue, Yellow, Green, Red])
        );
        state.record_strike().expect("strike");
        assert_eq!(
            substitute(&[Red, Blue, Green, Yellow], &state),
            Ok(vec![Red, Blue, Yellow, Green])
        );
        state.record_strike().expect("strike");
        assert_eq!(
            substitute(&[Red, Blue, Green, Yellow], &state),
            Ok(vec![Yellow, Green, Blue, Red])
        );
    }

    #[test]
    fn replay_prefixes_previous_sequence() {
        let mut state = device();
        let first = solve_simon(&[SimonEntry::Flash(Red)], &state).expect("first");
        assert_eq!(first.press, vec![Blue]);
        state.commit(&Resolution {
            action: crate::core::types::Action::Flash {
                colors: first.press.clone(),
            },
            memory: Some(MemoryUpdate::Simon(first.accepted.clone())),
        });

        let second = solve_simon(&[SimonEntry::Replay, SimonEntry::Flash(Green)], &state)
            .expect("second");
        assert_eq!(second.accepted, vec![Red, Green]);
        assert_eq!(second.press, vec![Blue, Green]);
    }

    #[test]
    fn replay_alias_must_lead() {
        let err = expand_sequence(&[SimonEntry::Flash(Red), SimonEntry::Replay], &[])
            .expect_err("alias second");
        assert!(matches!(err, SolveError::MalformedInput { .. }));
    }

    #[test]
    fn replay_of_nothing_is_rejected() {
        assert!(expand_sequence(&[SimonEntry::Replay], &[]).is_err());
    }

    #[test]
    fn parse_rejects_non_simon_colors() {
        assert_eq!(SimonEntry::parse("!"), Ok(SimonEntry::Replay));
        assert_eq!(SimonEntry::parse("GREEN"), Ok(SimonEntry::Flash(Green)));
        assert!(SimonEntry::parse("white").is_err());
    }
}
