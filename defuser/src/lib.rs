//! Rule engine for defusing a device one module at a time.
//!
//! The operator reports what a module shows; the engine answers with the
//! action the published rules call for, given facts about the whole device
//! (serial number, batteries, indicators, strikes so far) and the memory two
//! modules carry between calls.
//!
//! - **[`core`]**: Pure, deterministic rule evaluation and device state.
//!   No I/O, fully testable in isolation.
//! - **[`io`]**: Config and device setup files.
//!
//! Orchestration modules ([`dispatch`], [`session`]) coordinate core logic
//! with operator I/O to implement CLI commands.

pub mod core;
pub mod dispatch;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod session;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
