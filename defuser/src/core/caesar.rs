//! Caesar cipher (modded): rotate the shown text by a device-derived shift.

use crate::core::error::{SolveError, SolveResult};
use crate::core::state::{CAR, DeviceState, NSA, PARALLEL};

const ALPHABET_LEN: i64 = 26;

/// Letters to shift by. Positive moves toward Z.
pub fn caesar_shift(state: &DeviceState) -> i64 {
    if state.has_indicator(PARALLEL) && state.is_lit(NSA) {
        return 0;
    }
    let mut shift = i64::from(state.battery_count());
    if state.has_vowel() {
        shift -= 1;
    }
    if state.is_even() {
        shift += 1;
    }
    if state.has_indicator(CAR) {
        shift += 1;
    }
    shift
}

/// Uppercase and rotate every letter; other characters pass through.
pub fn solve_caesar(text: &str, state: &DeviceState) -> SolveResult<String> {
    if text.trim().is_empty() {
        return Err(SolveError::malformed("text to encode", "nothing"));
    }
    let shift = caesar_shift(state).rem_euclid(ALPHABET_LEN);
    Ok(text
        .chars()
        .map(|c| {
            if c.is_ascii_alphabetic() {
                let offset = i64::from(c.to_ascii_uppercase() as u8 - b'A');
                let rotated = (offset + shift).rem_euclid(ALPHABET_LEN) as u8;
                char::from(b'A' + rotated)
            } else {
                c
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{device, setup_with, state_from};

    #[test]
    fn shift_adds_up_device_facts() {
        // Even serial with a vowel, two batteries, CAR present: -1 + 2 + 1 + 1.
        let state = state_from(setup_with("AB2", 2, &[CAR], &[]));
        assert_eq!(caesar_shift(&state), 3);
        assert_eq!(solve_caesar("abc", &state), Ok("DEF".to_string()));
    }

    #[test]
    fn shift_wraps_backwards() {
        // Odd serial with a vowel and no batteries: shift -1.
        let state = state_from(setup_with("AB3", 0, &[], &[]));
        assert_eq!(caesar_shift(&state), -1);
        assert_eq!(solve_caesar("ABZ", &state), Ok("ZAY".to_string()));
    }

    #[test]
    fn shift_wraps_forwards_past_alphabet() {
        let state = state_from(setup_with("BC3", 27, &[], &[]));
        assert_eq!(solve_caesar("XYZ", &state), Ok("YZA".to_string()));
    }

    #[test]
    fn parallel_with_lit_nsa_cancels_shift() {
        let state = state_from(setup_with("BC2", 4, &[PARALLEL, NSA, CAR], &[NSA]));
        assert_eq!(caesar_shift(&state), 0);
        assert_eq!(solve_caesar("hello", &state), Ok("HELLO".to_string()));
    }

    #[test]
    fn non_letters_pass_through_and_empty_is_rejected() {
        // Even serial, no vowel: shift 1.
        assert_eq!(solve_caesar("a-b c", &device()), Ok("B-C D".to_string()));
        assert!(solve_caesar("  ", &device()).is_err());
    }
}
