//! Input events accepted by the evaluator
//!
//! The presentation layer turns every button press into exactly one
//! [`Event`]. Textual tokens (`7`, `+`, `sin`, `AC`) parse into events so that
//! tapes and the command line can drive the evaluator without a keypad.

use super::{BinaryOp, CalcError, CalcResult, TrigFunction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A decimal digit, 0 through 9
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// Creates a digit, returning `None` outside 0-9
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= 9 {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Returns the numeric value
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the digit as an ASCII character
    #[must_use]
    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = CalcError;

    fn try_from(value: u8) -> CalcResult<Self> {
        Self::new(value).ok_or(CalcError::InvalidDigit(value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One discrete input to the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Event {
    /// A digit key
    Digit(Digit),
    /// The decimal point key
    DecimalPoint,
    /// The AC key
    Clear,
    /// A binary operator key
    Operator(BinaryOp),
    /// The equals key
    Equals,
    /// A trig function key (scientific variant)
    TrigFunction(TrigFunction),
    /// The DEG/RAD key (scientific variant)
    ToggleAngleMode,
}

impl Event {
    /// Creates a digit event
    pub fn digit(value: u8) -> CalcResult<Self> {
        Digit::try_from(value).map(Self::Digit)
    }

    /// Returns true for events only the scientific variant understands
    #[must_use]
    pub const fn requires_scientific(&self) -> bool {
        matches!(self, Self::TrigFunction(_) | Self::ToggleAngleMode)
    }

    /// Returns the canonical token for this event
    #[must_use]
    pub fn token(&self) -> String {
        match self {
            Self::Digit(d) => d.to_string(),
            Self::DecimalPoint => ".".to_string(),
            Self::Clear => "AC".to_string(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::Equals => "=".to_string(),
            Self::TrigFunction(f) => f.name().to_string(),
            Self::ToggleAngleMode => "mode".to_string(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.token())
    }
}

impl FromStr for Event {
    type Err = CalcError;

    fn from_str(token: &str) -> CalcResult<Self> {
        let event = match token {
            "." | "," => Self::DecimalPoint,
            "C" | "c" | "AC" | "ac" | "clear" => Self::Clear,
            "+" => Self::Operator(BinaryOp::Add),
            "-" | "−" => Self::Operator(BinaryOp::Subtract),
            "*" | "×" | "x" => Self::Operator(BinaryOp::Multiply),
            "/" | "÷" => Self::Operator(BinaryOp::Divide),
            "=" => Self::Equals,
            "sin" => Self::TrigFunction(TrigFunction::Sin),
            "cos" => Self::TrigFunction(TrigFunction::Cos),
            "tan" => Self::TrigFunction(TrigFunction::Tan),
            "mode" | "deg" | "rad" | "DEG" | "RAD" => Self::ToggleAngleMode,
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Self::digit(c as u8 - b'0')?,
                    _ => return Err(CalcError::unknown_token(token)),
                }
            }
        };
        Ok(event)
    }
}
