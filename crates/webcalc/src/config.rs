//! Calculator configuration

use crate::core::FailureKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Errors from loading a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is outside its allowed range
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Tunables for the calculation cycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Number of calculations kept in the history log
    pub history_capacity: usize,
    /// How long an error notification stays visible, in milliseconds
    pub error_clear_delay_ms: u64,
    /// Message shown for malformed expressions
    pub invalid_input_message: String,
    /// Message shown for NaN or infinite results
    pub invalid_calculation_message: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_capacity: 10,
            error_clear_delay_ms: 2000,
            invalid_input_message: "Invalid input".to_string(),
            invalid_calculation_message: "Invalid calculation".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a JSON configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::invalid("history_capacity must be at least 1"));
        }
        Ok(())
    }

    /// Set history capacity
    #[must_use]
    pub const fn with_history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Set error notification delay
    #[must_use]
    pub const fn with_error_clear_delay_ms(mut self, delay_ms: u64) -> Self {
        self.error_clear_delay_ms = delay_ms;
        self
    }

    /// Set both user-facing error messages
    #[must_use]
    pub fn with_messages(
        mut self,
        invalid_input: impl Into<String>,
        invalid_calculation: impl Into<String>,
    ) -> Self {
        self.invalid_input_message = invalid_input.into();
        self.invalid_calculation_message = invalid_calculation.into();
        self
    }

    /// Returns the error notification delay
    #[must_use]
    pub const fn error_clear_delay(&self) -> Duration {
        Duration::from_millis(self.error_clear_delay_ms)
    }

    /// Returns the user-facing message for a failure
    #[must_use]
    pub fn message_for(&self, kind: FailureKind) -> &str {
        match kind {
            FailureKind::InvalidSyntax => &self.invalid_input_message,
            FailureKind::NonFinite => &self.invalid_calculation_message,
        }
    }
}
