//! Numbers that may arrive as JSON numbers or as strings.
//!
//! Coordinates come from multipart forms (always text) and from JSON bodies
//! (either form), so both are accepted and compared as `f64`.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// A number or a numeric string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl NumericInput {
    /// Coerce to `f64`, reporting `field` on failure
    pub fn to_f64(&self, field: &str) -> Result<f64, SharedError> {
        match self {
            Self::Number(value) if value.is_finite() => Ok(*value),
            Self::Number(_) => Err(SharedError::validation(field, format!("{} must be a finite number", field))),
            Self::Text(text) => parse_number(field, text),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Parse a trimmed numeric string
pub fn parse_number(field: &str, text: &str) -> Result<f64, SharedError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| SharedError::validation(field, format!("{} must be a number", field)))
}

/// Coerce an optional input, falling back to `default` when absent
pub fn coerce_or(input: Option<&NumericInput>, field: &str, default: f64) -> Result<f64, SharedError> {
    input.map_or(Ok(default), |value| value.to_f64(field))
}
