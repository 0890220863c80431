//! Stable exit codes for defuser CLI commands.

/// Command succeeded, or the device was defused.
pub const OK: i32 = 0;
/// Malformed module input, an invalid setup or config, or any I/O failure.
pub const INVALID: i32 = 1;
/// Well-formed input that matches no entry of a rule table.
pub const UNRESOLVED: i32 = 2;
/// The device exploded (strike limit or timeout).
pub const EXPLODED: i32 = 3;
