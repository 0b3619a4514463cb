//! Calculator configuration
//!
//! Picks the variant and the starting angle mode. Loaded from YAML or JSON,
//! or assembled with [`CalculatorConfigBuilder`].

use crate::core::{AngleMode, CalcError, CalcResult, CalculatorState, Evaluator, Variant};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for a calculator session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Which keypad to serve
    pub variant: Variant,
    /// Angle mode at start-up (ignored by the basic variant)
    pub angle_mode: AngleMode,
}

impl CalculatorConfig {
    /// Create a new configuration builder
    #[must_use]
    pub fn builder() -> CalculatorConfigBuilder {
        CalculatorConfigBuilder::new()
    }

    /// Parses a YAML document
    pub fn from_yaml_str(yaml: &str) -> CalcResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parses a JSON document
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration file, choosing the format by extension
    pub fn load(path: impl AsRef<Path>) -> CalcResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> CalcResult<Self> = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(CalcError::config(format!(
                    "unsupported config file {}: expected .yaml, .yml or .json",
                    path.display()
                )))
            }
        };
        let config = parse(&std::fs::read_to_string(path)?)?;
        tracing::info!(
            path = %path.display(),
            variant = ?config.variant,
            angle_mode = %config.angle_mode,
            "loaded config"
        );
        Ok(config)
    }

    /// Serializes to YAML
    pub fn to_yaml(&self) -> CalcResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Creates an evaluator in the configured initial state
    #[must_use]
    pub fn build_evaluator(&self) -> Evaluator {
        Evaluator::from_state(
            self.variant,
            CalculatorState::with_angle_mode(self.angle_mode),
        )
    }
}

/// Builder for [`CalculatorConfig`]
#[derive(Debug, Default)]
pub struct CalculatorConfigBuilder {
    config: CalculatorConfig,
}

impl CalculatorConfigBuilder {
    /// Create a new builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the variant
    #[must_use]
    pub const fn variant(mut self, variant: Variant) -> Self {
        self.config.variant = variant;
        self
    }

    /// Shorthand for the scientific variant
    #[must_use]
    pub const fn scientific(self) -> Self {
        self.variant(Variant::Scientific)
    }

    /// Set the starting angle mode
    #[must_use]
    pub const fn angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.config.angle_mode = angle_mode;
        self
    }

    /// Build the configuration
    #[must_use]
    pub const fn build(self) -> CalculatorConfig {
        self.config
    }
}
