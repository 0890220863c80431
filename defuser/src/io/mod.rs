//! File I/O for defuser commands.

pub mod config;
pub mod setup;
