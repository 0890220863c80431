//! Complex keypad (modded): a larger keypad whose press order may be
//! reversed, or skipped altogether, depending on the device.

use serde::Serialize;

use crate::core::error::{SolveError, SolveResult};
use crate::core::keypad::{check_vocabulary, order_by_columns};
use crate::core::state::{BOB, DVI_D, DeviceState, PARALLEL};

pub const COMPLEX_KEYPAD_COLUMNS: [[&str; 10]; 5] = [
    ["a", "e", "th", "ps", "m", "x", "z", "s", "b", "bd"],
    ["p", "a", "z", "o", "d", "g", "n", "ho", "ma", "ck"],
    ["ph", "ck", "o", "g", "th", "b", "e", "p", "ha", "bd"],
    ["ha", "ho", "ph", "e", "m", "o", "a", "s", "ck", "up"],
    ["g", "o", "m", "d", "up", "le", "x", "a", "n", "b"],
];

pub const COMPLEX_KEYPAD_LEGEND: &[(&str, &str)] = &[
    ("e", "epsilon"),
    ("ho", "hook"),
    ("ha", "half of.. a shape"),
    ("p", "pi"),
    ("m", "mu"),
    ("bd", "capital delta"),
    ("o", "omega"),
    ("g", "capital gamma"),
    ("x", "capital xi"),
    ("up", "opening up with dot"),
    ("z", "zeta"),
    ("le", "opening left"),
    ("ph", "phi"),
    ("th", "theta"),
    ("ck", "cyrillic k"),
    ("a", "alpha"),
    ("ps", "psi"),
    ("b", "beta"),
    ("n", "eta, looks like n"),
    ("d", "delta"),
    ("s", "sigma"),
    ("ma", "ma"),
];

/// How the device says to treat the complex keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeypadPlan {
    /// Ignore the columns and press in reading order.
    Disregard,
    Normal,
    Reversed,
}

/// Decide, before looking at the symbols, how the keypad is to be solved.
pub fn complex_keypad_plan(state: &DeviceState) -> KeypadPlan {
    if state.battery_count() > 2 && state.has_indicator(PARALLEL) {
        KeypadPlan::Disregard
    } else if state.has_indicator(DVI_D) && state.is_lit(BOB) {
        KeypadPlan::Reversed
    } else {
        KeypadPlan::Normal
    }
}

/// Press order for the given symbols under a `Normal` or `Reversed` plan.
pub fn solve_complex_keypad(symbols: &[String], plan: KeypadPlan) -> SolveResult<Vec<usize>> {
    let width = COMPLEX_KEYPAD_COLUMNS[0].len();
    if symbols.is_empty() || symbols.len() > width {
        return Err(SolveError::malformed(
            format!("1-{width} complex keypad symbols"),
            format!("{} symbols", symbols.len()),
        ));
    }
    let known: Vec<&str> = COMPLEX_KEYPAD_LEGEND
        .iter()
        .map(|(token, _)| *token)
        .collect();
    check_vocabulary(symbols, &known, "complex keypad")?;

    let mut order = order_by_columns(&COMPLEX_KEYPAD_COLUMNS, symbols, "complex keypad")?;
    match plan {
        KeypadPlan::Normal => {}
        KeypadPlan::Reversed => order.reverse(),
        KeypadPlan::Disregard => {
            return Err(SolveError::malformed(
                "a keypad that is not disregarded",
                "symbols for a disregarded keypad",
            ));
        }
    }
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{device, setup_with, state_from};

    fn symbols(raw: &str) -> Vec<String> {
        raw.split_whitespace().map(ToString::to_string).collect()
    }

    fn with(batteries: u32, indicators: &[&str], lit: &[&str]) -> DeviceState {
        state_from(setup_with("BC2", batteries, indicators, lit))
    }

    #[test]
    fn plan_disregards_with_parallel_and_three_batteries() {
        assert_eq!(
            complex_keypad_plan(&with(3, &[PARALLEL, DVI_D, BOB], &[BOB])),
            KeypadPlan::Disregard
        );
        assert_eq!(
            complex_keypad_plan(&with(2, &[PARALLEL], &[])),
            KeypadPlan::Normal
        );
    }

    #[test]
    fn plan_reverses_with_dvi_and_lit_bob() {
        assert_eq!(
            complex_keypad_plan(&with(0, &[DVI_D, BOB], &[BOB])),
            KeypadPlan::Reversed
        );
        assert_eq!(
            complex_keypad_plan(&with(0, &[DVI_D, BOB], &[])),
            KeypadPlan::Normal
        );
        assert_eq!(complex_keypad_plan(&device()), KeypadPlan::Normal);
    }

    #[test]
    fn normal_order_follows_column() {
        // Column 1: a e th ps m x z s b bd
        assert_eq!(
            solve_complex_keypad(&symbols("bd m a th"), KeypadPlan::Normal),
            Ok(vec![3, 4, 2, 1])
        );
    }

    #[test]
    fn reversed_order() {
        assert_eq!(
            solve_complex_keypad(&symbols("bd m a th"), KeypadPlan::Reversed),
            Ok(vec![1, 2, 4, 3])
        );
    }

    #[test]
    fn later_column_when_first_lacks_symbol() {
        // le only appears in column 5: g o m d up le x a n b
        assert_eq!(
            solve_complex_keypad(&symbols("le g b"), KeypadPlan::Normal),
            Ok(vec![2, 1, 3])
        );
    }

    #[test]
    fn rejects_disregarded_plan_and_bad_symbols() {
        assert!(solve_complex_keypad(&symbols("a e"), KeypadPlan::Disregard).is_err());
        assert!(solve_complex_keypad(&symbols("a qq"), KeypadPlan::Normal).is_err());
        assert!(solve_complex_keypad(&[], KeypadPlan::Normal).is_err());
        assert!(solve_complex_keypad(&symbols("le bd"), KeypadPlan::Normal).is_err());
    }
}
