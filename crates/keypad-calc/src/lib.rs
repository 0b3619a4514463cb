//! Keypad Calculator - event-driven evaluator for a pocket calculator
//!
//! The evaluator is a small state machine fed one key press at a time. A
//! basic variant offers the four arithmetic operators; the scientific variant
//! adds `sin`, `cos`, `tan` and a degrees/radians toggle.
//!
//! # Behaviour
//!
//! - **Left-to-right chaining**: `6 + 4 × 2 =` shows `20`, not `14`
//! - **Operator replacement**: `5 + × 3 =` shows `15`
//! - **Division by zero** shows `0`
//! - **Trig noise snapping**: `sin(180°)` shows exactly `0`
//!
//! # Example
//!
//! ```rust
//! use keypad_calc::prelude::*;
//!
//! let mut calc = Evaluator::new();
//! for token in ["1", "2", "+", "3", "0", "="] {
//!     calc.press(token.parse().unwrap());
//! }
//! assert_eq!(calc.display(), "42");
//!
//! let mut sci = Evaluator::scientific();
//! let tape = Tape::parse("1 8 0 sin").unwrap();
//! let transcript = tape.replay(&mut sci);
//! assert_eq!(transcript.final_display(), "0");
//! assert_eq!(sci.angle_mode(), Some(AngleMode::Degrees));
//! ```

// Allow common test patterns
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod keypad;
pub mod tape;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{CalculatorConfig, CalculatorConfigBuilder};
    pub use crate::core::format::{format_number, parse_number};
    pub use crate::core::{
        AngleMode, BinaryOp, CalcError, CalcResult, CalculatorState, Digit, Evaluator, Event,
        TrigFunction, Variant,
    };
    pub use crate::driver::{CalculatorDriver, KeypadDriver};
    pub use crate::keypad::{Keypad, KeypadButton};
    pub use crate::tape::{Observation, Tape, Transcript};
}
