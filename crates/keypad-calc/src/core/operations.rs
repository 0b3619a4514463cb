//! Binary operators, trig functions and the angle mode
//!
//! Every operation here is total. Division by zero is defined to be 0 and
//! trig results within [`NOISE_TOLERANCE`] of zero are snapped to exactly 0.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Trig results with a smaller magnitude than this are displayed as `0`
pub const NOISE_TOLERANCE: f64 = 1e-10;

/// The four binary operators of the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (×)
    Multiply,
    /// Division (÷)
    Divide,
}

impl BinaryOp {
    /// All operators in keypad order
    pub const ALL: [Self; 4] = [Self::Add, Self::Subtract, Self::Multiply, Self::Divide];

    /// Returns the symbol printed on the keypad
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Returns the lowercase operator name used in button ids
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
        }
    }

    /// Applies the operator to a left and right operand
    ///
    /// A zero divisor produces 0 rather than an infinity or an error.
    #[must_use]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => {
                if right == 0.0 {
                    0.0
                } else {
                    left / right
                }
            }
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Angle unit used when evaluating trig functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AngleMode {
    /// Operands are degrees
    #[default]
    Degrees,
    /// Operands are radians
    Radians,
}

impl AngleMode {
    /// Returns the other mode
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Short label shown on the mode button
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Degrees => "DEG",
            Self::Radians => "RAD",
        }
    }

    /// Converts an operand in this mode to radians
    #[must_use]
    pub fn to_radians(self, value: f64) -> f64 {
        match self {
            Self::Degrees => value.to_radians(),
            Self::Radians => value,
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Single-argument trig functions of the scientific keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrigFunction {
    /// Sine
    Sin,
    /// Cosine
    Cos,
    /// Tangent
    Tan,
}

impl TrigFunction {
    /// All functions in keypad order
    pub const ALL: [Self; 3] = [Self::Sin, Self::Cos, Self::Tan];

    /// Returns the function name as printed on the keypad
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
        }
    }

    /// Evaluates the function for an operand expressed in `mode`
    ///
    /// Results closer to zero than [`NOISE_TOLERANCE`] become exactly 0, so
    /// `sin(180°)` is 0 and not `1.2246467991473532e-16`.
    #[must_use]
    pub fn evaluate(&self, value: f64, mode: AngleMode) -> f64 {
        let radians = mode.to_radians(value);
        let result = match self {
            Self::Sin => radians.sin(),
            Self::Cos => radians.cos(),
            Self::Tan => radians.tan(),
        };
        snap_noise(result)
    }
}

impl fmt::Display for TrigFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn snap_noise(value: f64) -> f64 {
    if value.abs() < NOISE_TOLERANCE {
        0.0
    } else {
        value
    }
}
