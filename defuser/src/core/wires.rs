//! Simple wires: choose the single wire to cut.

use crate::core::error::{SolveError, SolveResult};
use crate::core::state::DeviceState;
use crate::core::types::Color;

pub const WIRE_COLORS: [Color; 5] = [
    Color::Red,
    Color::Blue,
    Color::Yellow,
    Color::White,
    Color::Black,
];

/// Return the 1-indexed wire to cut.
///
/// Each wire count has its own ordered rule list; the first matching rule
/// wins. Only the serial parity is read from `state`.
pub fn solve_wires(wires: &[Color], state: &DeviceState) -> SolveResult<usize> {
    if let Some(bad) = wires.iter().find(|color| !WIRE_COLORS.contains(color)) {
        return Err(SolveError::malformed(
            "wire colors red, blue, yellow, white or black",
            format!("'{bad}'"),
        ));
    }

    let count = |color: Color| wires.iter().filter(|wire| **wire == color).count();
    let last_is = |color: Color| wires.last() == Some(&color);
    let odd = state.is_odd();

    let position = match wires.len() {
        3 => {
            if count(Color::Red) == 0 {
                2
            } else if last_is(Color::White) {
                3
            } else if count(Color::Blue) > 1 {
                last_occurrence(wires, Color::Blue)
            } else {
                3
            }
        }
        4 => {
            if count(Color::Red) > 1 && odd {
                last_occurrence(wires, Color::Red)
            } else if last_is(Color::Yellow) && count(Color::Red) == 0 {
                1
            } else if count(Color::Blue) == 1 {
                1
            } else if count(Color::Yellow) > 1 {
                4
            } else {
                2
            }
        }
        5 => {
            if last_is(Color::Black) && odd {
                4
            } else if count(Color::Red) == 1 && count(Color::Yellow) > 1 {
                1
            } else if count(Color::Black) == 0 {
                2
            } else {
                1
            }
        }
        6 => {
            if count(Color::Yellow) == 0 && odd {
                3
            } else if count(Color::Yellow) == 1 && count(Color::White) > 1 {
                4
            } else if count(Color::Red) == 0 {
                6
            } else {
                4
            }
        }
        other => {
            return Err(SolveError::malformed("3-6 wires", format!("{other} wires")));
        }
    };
    Ok(position)
}

/// 1-indexed position of the last wire of `color`. Callers only ask after
/// counting at least one.
fn last_occurrence(wires: &[Color], color: Color) -> usize {
    wires
        .iter()
        .rposition(|wire| *wire == color)
        .map_or(wires.len(), |idx| idx + 1)
}
