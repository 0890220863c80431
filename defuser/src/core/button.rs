//! The button: tap or hold, then the release digit while holding.

use std::fmt;
use std::str::FromStr;

use crate::core::error::SolveError;
use crate::core::state::{CAR, DeviceState, FRK};
use crate::core::types::Color;

/// Word engraved on the button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonText {
    Abort,
    Detonate,
    Hold,
    Press,
}

impl fmt::Display for ButtonText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ButtonText::Abort => "abort",
            ButtonText::Detonate => "detonate",
            ButtonText::Hold => "hold",
            ButtonText::Press => "press",
        })
    }
}

impl FromStr for ButtonText {
    type Err = SolveError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "abort" => Ok(ButtonText::Abort),
            "detonate" => Ok(ButtonText::Detonate),
            "hold" => Ok(ButtonText::Hold),
            "press" => Ok(ButtonText::Press),
            _ => Err(SolveError::malformed(
                "button text abort, detonate, hold or press",
                format!("'{raw}'"),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Tap,
    Hold,
}

/// Decide whether to tap the button or hold it.
pub fn solve_button(color: Color, text: ButtonText, state: &DeviceState) -> Press {
    let batteries = state.battery_count();
    if color == Color::Blue && text == ButtonText::Abort {
        Press::Hold
    } else if batteries > 1 && text == ButtonText::Detonate {
        Press::Tap
    } else if color == Color::White && state.is_lit(CAR) {
        Press::Hold
    } else if batteries > 2 && state.is_lit(FRK) {
        Press::Tap
    } else if color == Color::Yellow {
        Press::Hold
    } else if color == Color::Red && text == ButtonText::Hold {
        Press::Tap
    } else {
        Press::Hold
    }
}

const RELEASE_DIGITS: [(Color, u8); 4] = [
    (Color::Blue, 4),
    (Color::White, 1),
    (Color::Yellow, 5),
    (Color::Red, 1),
];

const DEFAULT_RELEASE_DIGIT: u8 = 1;

/// Digit on the timer at which to release a held button, given the color of
/// the strip lit while holding.
pub fn release_digit(strip: Color) -> u8 {
    RELEASE_DIGITS
        .iter()
        .find(|(color, _)| *color == strip)
        .map_or(DEFAULT_RELEASE_DIGIT, |(_, digit)| *digit)
}
