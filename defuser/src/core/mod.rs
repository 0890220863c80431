//! Deterministic rule evaluation for every supported module.
//!
//! Core modules must be free of I/O side effects. Solvers read the device
//! state and return values; the two stateful modules return their new memory
//! instead of writing it.

pub mod button;
pub mod caesar;
pub mod complex_keypad;
pub mod complicated_wires;
pub mod error;
pub mod keypad;
pub mod maze;
pub mod memory;
pub mod simon;
pub mod state;
pub mod types;
pub mod whos_on_first;
pub mod wires;
