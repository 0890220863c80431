//! Shared value types passed between solvers, the dispatcher and callers.
//!
//! These are plain data: nothing here reads device state or performs I/O.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::complex_keypad::KeypadPlan;
use crate::core::error::SolveError;
use crate::core::memory::MemoryProgress;

/// Every color any module can show. Each solver narrows this to the colors
/// its module actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Red,
    Blue,
    Green,
    Yellow,
    White,
    Black,
}

impl Color {
    pub const fn as_str(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = SolveError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "red" => Ok(Color::Red),
            "blue" => Ok(Color::Blue),
            "green" => Ok(Color::Green),
            "yellow" => Ok(Color::Yellow),
            "white" => Ok(Color::White),
            "black" => Ok(Color::Black),
            _ => Err(SolveError::malformed(
                "a color (red, blue, green, yellow, white, black)",
                format!("'{raw}'"),
            )),
        }
    }
}

/// A maze cell as (column, row), both 1-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: u8,
    pub y: u8,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What the operator must do next.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    CutWire { position: usize, color: Color },
    TapButton,
    HoldButton,
    ReleaseOn { digit: u8 },
    PressOrder { positions: Vec<usize> },
    /// Complex keypad escape hatch: press left to right, top to bottom.
    PressInReadingOrder,
    KeypadPlan { plan: KeypadPlan },
    Flash { colors: Vec<Color> },
    PressMemory { label: u8, position: usize },
    MemoryReset,
    PressWord { word: String },
    CutWires { cut: Vec<bool> },
    NavigateMaze { maze: u8, start: Cell, end: Cell },
    Transmit { text: String },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::CutWire { position, color } => {
                write!(f, "Cut the {} wire! ({color})", ordinal(*position))
            }
            Action::TapButton => f.write_str("Press and release!"),
            Action::HoldButton => f.write_str("Hold and report color!"),
            Action::ReleaseOn { digit } => write!(f, "Release on {digit}"),
            Action::PressOrder { positions } => write!(f, "Order: {}", join(positions)),
            Action::PressInReadingOrder => {
                f.write_str("Press the keypad in order, left to right, up to down.")
            }
            Action::KeypadPlan { plan } => match plan {
                KeypadPlan::Disregard => {
                    f.write_str("Press the keypad in order, left to right, up to down.")
                }
                KeypadPlan::Normal => f.write_str("Report the keypad symbols."),
                KeypadPlan::Reversed => {
                    f.write_str("Report the keypad symbols (order will be reversed).")
                }
            },
            Action::Flash { colors } => write!(f, "New order: {}", join(colors)),
            Action::PressMemory { label, position } => {
                write!(f, "Press the button in position {position} (label {label})")
            }
            Action::MemoryReset => f.write_str("Memory reset, back to stage 1"),
            Action::PressWord { word } => write!(f, "Answer: {word}"),
            Action::CutWires { cut } => {
                let positions: Vec<usize> = cut
                    .iter()
                    .enumerate()
                    .filter(|(_, cut)| **cut)
                    .map(|(idx, _)| idx + 1)
                    .collect();
                if positions.is_empty() {
                    f.write_str("Cut: none")
                } else {
                    let rendered: Vec<String> = positions.iter().map(ToString::to_string).collect();
                    write!(f, "Cut: {}", rendered.join(" "))
                }
            }
            Action::NavigateMaze { maze, start, end } => {
                write!(f, "Maze {maze}: route from {start} to {end}")
            }
            Action::Transmit { text } => write!(f, "Next text: {text}"),
        }
    }
}

/// Cross-module memory replacement produced by a stateful solver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryUpdate {
    /// Last accepted (alias-expanded) Simon Says input.
    Simon(Vec<Color>),
    /// Five-stage memory after this call, already transitioned.
    Memory(MemoryProgress),
}

/// Dispatcher output: the solver's action plus any memory the caller must
/// commit before the next call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub action: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryUpdate>,
}

impl Resolution {
    pub fn stateless(action: Action) -> Self {
        Self {
            action,
            memory: None,
        }
    }
}

fn ordinal(position: usize) -> String {
    match position {
        1 => "first".to_string(),
        2 => "second".to_string(),
        3 => "third".to_string(),
        4 => "fourth".to_string(),
        5 => "fifth".to_string(),
        6 => "sixth".to_string(),
        other => format!("#{other}"),
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_parse_is_case_insensitive() {
        assert_eq!("Yellow".parse::<Color>(), Ok(Color::Yellow));
        assert_eq!("BLACK".parse::<Color>(), Ok(Color::Black));
    }

    #[test]
    fn color_parse_rejects_unknown_words() {
        let err = "purple".parse::<Color>().expect_err("purple is not a color");
        assert!(matches!(err, SolveError::MalformedInput { .. }));
    }

    #[test]
    fn cut_wire_message_uses_ordinal_and_color() {
        let action = Action::CutWire {
            position: 2,
            color: Color::Blue,
        };
        assert_eq!(action.to_string(), "Cut the second wire! (blue)");
    }

    #[test]
    fn cut_wires_message_lists_positions() {
        let action = Action::CutWires {
            cut: vec![true, false, true],
        };
        assert_eq!(action.to_string(), "Cut: 1 3");
        let none = Action::CutWires {
            cut: vec![false, false],
        };
        assert_eq!(none.to_string(), "Cut: none");
    }

    #[test]
    fn action_serializes_with_tag() {
        let json = serde_json::to_string(&Action::ReleaseOn { digit: 4 }).expect("json");
        assert_eq!(json, r#"{"action":"release_on","digit":4}"#);
    }
}
