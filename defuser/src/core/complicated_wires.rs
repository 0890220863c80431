//! Complicated wires: one cut/keep decision per wire from its markings.
//!
//! Each wire is described by letters: `r` red, `b` blue, `s` star, `l` lit
//! LED, or `x` for a plain wire with none of them.

use crate::core::error::{SolveError, SolveResult};
use crate::core::state::{DeviceState, PARALLEL};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Never,
    Always,
    SerialEven,
    ParallelPort,
    TwoBatteries,
}

/// Canonical (sorted) marking -> rule.
const DIAGRAM: [(&str, Rule); 16] = [
    ("x", Rule::Always),
    ("r", Rule::SerialEven),
    ("b", Rule::SerialEven),
    ("br", Rule::SerialEven),
    ("rs", Rule::Always),
    ("brs", Rule::ParallelPort),
    ("blrs", Rule::Never),
    ("blr", Rule::SerialEven),
    ("lr", Rule::TwoBatteries),
    ("s", Rule::Always),
    ("bl", Rule::ParallelPort),
    ("bls", Rule::ParallelPort),
    ("ls", Rule::TwoBatteries),
    ("lrs", Rule::TwoBatteries),
    ("bs", Rule::Never),
    ("l", Rule::Never),
];

/// Order-independent key for a wire marking.
pub fn canonicalize(marking: &str) -> String {
    let mut letters: Vec<char> = marking.to_ascii_lowercase().chars().collect();
    letters.sort_unstable();
    letters.into_iter().collect()
}

/// Cut decision for each wire, in input order.
pub fn solve_complicated_wires(markings: &[String], state: &DeviceState) -> SolveResult<Vec<bool>> {
    if markings.is_empty() {
        return Err(SolveError::malformed("at least one wire", "no wires"));
    }
    markings
        .iter()
        .map(|marking| {
            let key = canonicalize(marking);
            let rule = DIAGRAM
                .iter()
                .find(|(combo, _)| *combo == key)
                .map(|(_, rule)| *rule)
                .ok_or_else(|| SolveError::unknown("complicated wires", key))?;
            Ok(should_cut(rule, state))
        })
        .collect()
}

fn should_cut(rule: Rule, state: &DeviceState) -> bool {
    match rule {
        Rule::Never => false,
        Rule::Always => true,
        Rule::SerialEven => state.is_even(),
        Rule::ParallelPort => state.has_indicator(PARALLEL),
        Rule::TwoBatteries => state.battery_count() > 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{device, odd_device, setup_with, state_from};

    fn wires(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(ToString::to_string).collect()
    }

    #[test]
    fn canonical_key_ignores_order_and_case() {
        assert_eq!(canonicalize("SRB"), "brs");
        assert_eq!(canonicalize("lbrs"), "blrs");
    }

    #[test]
    fn fixed_rules() {
        assert_eq!(
            solve_complicated_wires(&wires("x sr s rbsl bs l"), &odd_device()),
            Ok(vec![true, true, true, false, false, false])
        );
    }

    #[test]
    fn serial_dependent_rules() {
        let ws = wires("r b rb rbl");
        assert_eq!(solve_complicated_wires(&ws, &device()), Ok(vec![true; 4]));
        assert_eq!(
            solve_complicated_wires(&ws, &odd_device()),
            Ok(vec![false; 4])
        );
    }

    #[test]
    fn parallel_and_battery_rules() {
        let ws = wires("bsr bl bls lr ls lrs");
        let with_port = state_from(setup_with("BC3", 2, &[PARALLEL], &[]));
        assert_eq!(solve_complicated_wires(&ws, &with_port), Ok(vec![true; 6]));
        assert_eq!(
            solve_complicated_wires(&ws, &odd_device()),
            Ok(vec![false; 6])
        );
    }

    #[test]
    fn battery_rule_needs_at_least_two() {
        let ws = wires("lr ls lrs");
        let one = state_from(setup_with("BC2", 1, &[], &[]));
        let two = state_from(setup_with("BC2", 2, &[], &[]));
        assert_eq!(solve_complicated_wires(&ws, &one), Ok(vec![false; 3]));
        assert_eq!(solve_complicated_wires(&ws, &two), Ok(vec![true; 3]));
    }

    #[test]
    fn unknown_marking_is_unknown_configuration() {
        let err = solve_complicated_wires(&wires("r rr"), &device()).expect_err("rr");
        assert_eq!(err, SolveError::unknown("complicated wires", "rr"));
        assert!(solve_complicated_wires(&[], &device()).is_err());
    }
}
