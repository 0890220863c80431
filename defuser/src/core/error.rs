//! Errors surfaced by solvers and the dispatcher.
//!
//! Every lookup miss becomes one of these kinds. Nothing is defaulted
//! silently; the few documented defaults live in the solvers themselves.

use thiserror::Error;

use crate::core::state::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// Wrong arity, shape, range or vocabulary. The caller should re-prompt.
    #[error("malformed input: expected {expected}, got {actual}")]
    MalformedInput { expected: String, actual: String },

    /// A rule table has no entry for an otherwise well-formed key.
    #[error("no {table} entry for '{key}'")]
    UnknownConfiguration { table: &'static str, key: String },

    /// Module input arrived while the session is not waiting for a module.
    #[error("session is {phase}, not accepting module input")]
    SessionNotAccepting { phase: Phase },
}

impl SolveError {
    pub fn malformed(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::MalformedInput {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    pub fn unknown(table: &'static str, key: impl Into<String>) -> Self {
        Self::UnknownConfiguration {
            table,
            key: key.into(),
        }
    }

    /// True when the operator can simply re-enter the module input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::MalformedInput { .. })
    }
}

pub type SolveResult<T> = Result<T, SolveError>;
