//! Handler configuration.

use serde::Deserialize;
use signdoc_core::{ValidatorOptions, DEFAULT_MAX_DEPTH};

/// Configuration for a [`crate::SignModeHandler`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    /// Nesting limit for messages and envelopes, shared by validation and
    /// encoding.
    pub max_recursion_depth: usize,
    /// Accept unknown non-critical fields in the body. Legacy amino JSON
    /// signing is strict, so this is off by default.
    pub allow_non_critical_body_fields: bool,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            max_recursion_depth: DEFAULT_MAX_DEPTH,
            allow_non_critical_body_fields: false,
        }
    }
}

impl HandlerConfig {
    pub fn validator_options(&self) -> ValidatorOptions {
        let options = if self.allow_non_critical_body_fields {
            ValidatorOptions::allow_non_critical()
        } else {
            ValidatorOptions::strict()
        };
        options.with_max_depth(self.max_recursion_depth)
    }
}
