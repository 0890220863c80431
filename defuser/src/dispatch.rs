//! Route raw operator input to the matching solver.
//!
//! The dispatcher owns input shape checks and result packaging only. It
//! never mutates the device state; stateful solvers hand back a
//! [`MemoryUpdate`] inside the [`Resolution`] for the caller to commit.

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info};

use crate::core::button::{ButtonText, Press, release_digit, solve_button};
use crate::core::caesar::solve_caesar;
use crate::core::complex_keypad::{KeypadPlan, complex_keypad_plan, solve_complex_keypad};
use crate::core::complicated_wires::solve_complicated_wires;
use crate::core::error::{SolveError, SolveResult};
use crate::core::keypad::solve_keypad;
use crate::core::maze::{cell, maze_for_circle};
use crate::core::memory::{MEMORY_BUTTONS, MemoryProgress, solve_memory};
use crate::core::simon::{SimonEntry, solve_simon};
use crate::core::state::DeviceState;
use crate::core::types::{Action, Color, MemoryUpdate, Resolution};
use crate::core::whos_on_first::solve_whos_on_first;
use crate::core::wires::solve_wires;

/// Token that resets the memory module instead of solving a stage.
pub const MEMORY_RESET: &str = "r";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleKind {
    Wires,
    Button,
    ButtonRelease,
    Keypad,
    Simon,
    Memory,
    Maze,
    WhosOnFirst,
    ComplicatedWires,
    ComplexKeypadCheck,
    ComplexKeypad,
    Caesar,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 12] = [
        ModuleKind::Wires,
        ModuleKind::Button,
        ModuleKind::ButtonRelease,
        ModuleKind::Keypad,
        ModuleKind::Simon,
        ModuleKind::Memory,
        ModuleKind::Maze,
        ModuleKind::WhosOnFirst,
        ModuleKind::ComplicatedWires,
        ModuleKind::ComplexKeypadCheck,
        ModuleKind::ComplexKeypad,
        ModuleKind::Caesar,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ModuleKind::Wires => "wires",
            ModuleKind::Button => "button",
            ModuleKind::ButtonRelease => "button-release",
            ModuleKind::Keypad => "keypad",
            ModuleKind::Simon => "simon",
            ModuleKind::Memory => "memory",
            ModuleKind::Maze => "maze",
            ModuleKind::WhosOnFirst => "whos-on-first",
            ModuleKind::ComplicatedWires => "complicated-wires",
            ModuleKind::ComplexKeypadCheck => "complex-keypad-check",
            ModuleKind::ComplexKeypad => "complex-keypad",
            ModuleKind::Caesar => "caesar",
        }
    }

    /// Expected input, as shown to the operator.
    pub const fn usage(self) -> &'static str {
        match self {
            ModuleKind::Wires => "<color>... (3-6 wires, top to bottom)",
            ModuleKind::Button => "<color> <text>",
            ModuleKind::ButtonRelease => "<strip color>",
            ModuleKind::Keypad => "<symbol> x4 (? for legend)",
            ModuleKind::Simon => "[!] <color>... (! replays the last sequence)",
            ModuleKind::Memory => "<display> <label> x4, or r to reset",
            ModuleKind::Maze => "<circle x y> <start x y> <end x y>",
            ModuleKind::WhosOnFirst => "<display word> <button word> x6",
            ModuleKind::ComplicatedWires => "<r|b|s|l letters or x>... per wire",
            ModuleKind::ComplexKeypadCheck => "(no input)",
            ModuleKind::ComplexKeypad => "<symbol>... (? for legend)",
            ModuleKind::Caesar => "<text>",
        }
    }

    /// Modules whose solver reads or replaces cross-module memory.
    pub const fn is_stateful(self) -> bool {
        matches!(self, ModuleKind::Simon | ModuleKind::Memory)
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = SolveError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        let kind = match normalized.as_str() {
            "wires" | "simple-wires" => ModuleKind::Wires,
            "button" => ModuleKind::Button,
            "button-release" | "release" => ModuleKind::ButtonRelease,
            "keypad" => ModuleKind::Keypad,
            "simon" | "simon-says" => ModuleKind::Simon,
            "memory" => ModuleKind::Memory,
            "maze" => ModuleKind::Maze,
            "whos-on-first" | "who's-on-first" | "won" => ModuleKind::WhosOnFirst,
            "complicated-wires" | "comp-wires" => ModuleKind::ComplicatedWires,
            "complex-keypad-check" => ModuleKind::ComplexKeypadCheck,
            "complex-keypad" => ModuleKind::ComplexKeypad,
            "caesar" | "caesar-cipher" => ModuleKind::Caesar,
            _ => {
                return Err(SolveError::malformed(
                    "a module name (see `defuser modules`)",
                    format!("'{raw}'"),
                ));
            }
        };
        Ok(kind)
    }
}

/// Resolve one module encounter.
///
/// `raw` is the operator's input with tokens separated by whitespace. The
/// state is only read; commit the returned resolution to apply memory.
pub fn resolve(kind: ModuleKind, raw: &str, state: &DeviceState) -> SolveResult<Resolution> {
    state.ensure_awaiting()?;
    debug!(module = %kind, input = raw, "resolving module");

    let tokens: Vec<String> = raw
        .split_whitespace()
        .map(str::to_ascii_lowercase)
        .collect();

    let resolution = match kind {
        ModuleKind::Wires => {
            let wires = parse_colors(&tokens)?;
            let position = solve_wires(&wires, state)?;
            Resolution::stateless(Action::CutWire {
                position,
                color: wires[position - 1],
            })
        }
        ModuleKind::Button => {
            expect_count(&tokens, 2, "a button color and its text")?;
            let color: Color = tokens[0].parse()?;
            let text: ButtonText = tokens[1].parse()?;
            match solve_button(color, text, state) {
                Press::Tap => Resolution::stateless(Action::TapButton),
                Press::Hold => Resolution::stateless(Action::HoldButton),
            }
        }
        ModuleKind::ButtonRelease => {
            expect_count(&tokens, 1, "the strip color")?;
            let strip: Color = tokens[0].parse()?;
            Resolution::stateless(Action::ReleaseOn {
                digit: release_digit(strip),
            })
        }
        ModuleKind::Keypad => Resolution::stateless(Action::PressOrder {
            positions: solve_keypad(&tokens)?,
        }),
        ModuleKind::Simon => {
            let entries = tokens
                .iter()
                .map(|token| SimonEntry::parse(token))
                .collect::<SolveResult<Vec<_>>>()?;
            let outcome = solve_simon(&entries, state)?;
            Resolution {
                action: Action::Flash {
                    colors: outcome.press,
                },
                memory: Some(MemoryUpdate::Simon(outcome.accepted)),
            }
        }
        ModuleKind::Memory => resolve_memory(&tokens, state)?,
        ModuleKind::Maze => {
            let coords = parse_numbers(&tokens, 6, "circle, start and end coordinates")?;
            let maze = maze_for_circle(cell(coords[0], coords[1])?)?;
            Resolution::stateless(Action::NavigateMaze {
                maze,
                start: cell(coords[2], coords[3])?,
                end: cell(coords[4], coords[5])?,
            })
        }
        ModuleKind::WhosOnFirst => {
            let (display, buttons) = tokens.split_first().ok_or_else(|| {
                SolveError::malformed("a display word and six button words", "nothing")
            })?;
            Resolution::stateless(Action::PressWord {
                word: solve_whos_on_first(display, buttons)?,
            })
        }
        ModuleKind::ComplicatedWires => Resolution::stateless(Action::CutWires {
            cut: solve_complicated_wires(&tokens, state)?,
        }),
        ModuleKind::ComplexKeypadCheck => {
            expect_count(&tokens, 0, "no input")?;
            Resolution::stateless(Action::KeypadPlan {
                plan: complex_keypad_plan(state),
            })
        }
        ModuleKind::ComplexKeypad => match complex_keypad_plan(state) {
            KeypadPlan::Disregard => Resolution::stateless(Action::PressInReadingOrder),
            plan => Resolution::stateless(Action::PressOrder {
                positions: solve_complex_keypad(&tokens, plan)?,
            }),
        },
        ModuleKind::Caesar => Resolution::stateless(Action::Transmit {
            text: solve_caesar(raw.trim(), state)?,
        }),
    };

    info!(module = %kind, input = raw, action = %resolution.action, "module resolved");
    Ok(resolution)
}

fn resolve_memory(tokens: &[String], state: &DeviceState) -> SolveResult<Resolution> {
    if tokens.len() == 1 && tokens[0] == MEMORY_RESET {
        return Ok(Resolution {
            action: Action::MemoryReset,
            memory: Some(MemoryUpdate::Memory(MemoryProgress::reset())),
        });
    }
    let numbers = parse_numbers(
        tokens,
        MEMORY_BUTTONS + 1,
        "the display number and four button labels",
    )?;
    let progress = &state.memory().memory_module;
    let outcome = solve_memory(progress.stage(), numbers[0], &numbers[1..], progress)?;
    Ok(Resolution {
        action: Action::PressMemory {
            label: outcome.label,
            position: outcome.position,
        },
        memory: Some(MemoryUpdate::Memory(outcome.progress)),
    })
}

fn expect_count(tokens: &[String], expected: usize, what: &str) -> SolveResult<()> {
    if tokens.len() != expected {
        return Err(SolveError::malformed(
            format!("{expected} token(s): {what}"),
            format!("{} token(s)", tokens.len()),
        ));
    }
    Ok(())
}

fn parse_colors(tokens: &[String]) -> SolveResult<Vec<Color>> {
    tokens.iter().map(|token| token.parse()).collect()
}

fn parse_numbers(tokens: &[String], expected: usize, what: &str) -> SolveResult<Vec<u8>> {
    expect_count(tokens, expected, what)?;
    tokens
        .iter()
        .map(|token| {
            token
                .parse::<u8>()
                .map_err(|_| SolveError::malformed("a small number", format!("'{token}'")))
        })
        .collect()
}
