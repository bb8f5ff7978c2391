// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Boundary validation and the sanitization step applied to admitted input.
//!
//! Validation failures surface as HTTP 400 at the handler layer; they
//! never reach the rate limiter.

use crate::config::SanitizeConfig;
use thiserror::Error;
use tracing::debug;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Input too large: {actual} bytes exceeds the {limit} byte limit")]
    InputTooLarge { limit: usize, actual: usize },
}

/// Input sanitizer for the secure-ai endpoint.
pub struct InputSanitizer {
    config: SanitizeConfig,
}

impl InputSanitizer {
    /// Create a new sanitizer with the given configuration.
    pub fn new(config: SanitizeConfig) -> Self {
        Self { config }
    }

    /// Validate the raw `input` field before any admission decision.
    pub fn validate(&self, input: Option<&str>) -> Result<(), ValidationError> {
        let input = match input {
            Some(s) => s,
            None => {
                debug!("missing input field");
                return Err(ValidationError::MissingField("input"));
            }
        };

        if input.len() > self.config.max_input_bytes {
            debug!(
                actual = input.len(),
                limit = self.config.max_input_bytes,
                "input over size limit"
            );
            return Err(ValidationError::InputTooLarge {
                limit: self.config.max_input_bytes,
                actual: input.len(),
            });
        }

        Ok(())
    }

    /// Sanitize admitted input: trim surrounding whitespace and, when
    /// configured, drop ASCII control characters (tab and newline kept).
    pub fn sanitize(&self, input: &str) -> String {
        let trimmed = input.trim();

        if !self.config.strip_control_chars {
            return trimmed.to_string();
        }

        trimmed
            .chars()
            .filter(|&c| !c.is_ascii_control() || matches!(c, '\t' | '\n'))
            .collect()
    }
}
