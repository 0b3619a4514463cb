//! Calculator core: the event-driven evaluator and everything it computes with
//!
//! The core never fails. Division by zero yields 0, trig noise snaps to 0 and
//! every event is valid in every state. [`CalcError`] only covers the edges
//! around the core: parsing tokens, looking up buttons, loading configuration.

pub mod evaluator;
pub mod event;
pub mod format;
mod operations;

pub use evaluator::{CalculatorState, Evaluator, Variant};
pub use event::{Digit, Event};
pub use operations::{AngleMode, BinaryOp, TrigFunction, NOISE_TOLERANCE};

use thiserror::Error;

/// Result type for fallible calculator edges
pub type CalcResult<T> = Result<T, CalcError>;

/// Errors raised outside the evaluator's total transition function
#[derive(Debug, Error)]
pub enum CalcError {
    /// A token did not name any event
    #[error("Unknown token: {token:?}")]
    UnknownToken {
        /// The offending token
        token: String,
    },

    /// A digit value outside 0-9
    #[error("Invalid digit: {0} (expected 0-9)")]
    InvalidDigit(u8),

    /// No keypad button carries the given id
    #[error("Unknown button: {id:?}")]
    UnknownButton {
        /// The requested button id
        id: String,
    },

    /// An event needs the scientific variant
    #[error("Event {event} requires the scientific calculator")]
    RequiresScientific {
        /// Display name of the rejected event
        event: String,
    },

    /// A driver showed something other than the expected behaviour
    #[error("Mismatch after `{input}`: expected {expected:?}, got {actual:?}")]
    Mismatch {
        /// Keys pressed, or the step being checked
        input: String,
        /// Expected observation
        expected: String,
        /// Observed value
        actual: String,
    },

    /// A state snapshot the evaluator could never reach
    #[error("Invalid calculator state: {reason}")]
    InvalidState {
        /// What is wrong with the snapshot
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML (de)serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl CalcError {
    /// Create an unknown-token error
    #[must_use]
    pub fn unknown_token(token: impl Into<String>) -> Self {
        Self::UnknownToken {
            token: token.into(),
        }
    }

    /// Create an unknown-button error
    #[must_use]
    pub fn unknown_button(id: impl Into<String>) -> Self {
        Self::UnknownButton { id: id.into() }
    }

    /// Create a mismatch error
    #[must_use]
    pub fn mismatch(
        input: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Mismatch {
            input: input.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid-state error
    #[must_use]
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }
}
