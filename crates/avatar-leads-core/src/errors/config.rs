// ABOUTME: Configuration error types for missing or malformed settings
// ABOUTME: Raised while building AppConfig, never after components are constructed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Errors raised while assembling configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A required setting was absent or blank
    #[error("Missing required configuration: {key}")]
    Missing {
        /// Setting (usually an environment variable) that was missing
        key: &'static str,
    },

    /// A setting was present but unusable
    #[error("Invalid configuration for {key}: {reason}")]
    Invalid {
        /// Setting that failed validation
        key: &'static str,
        /// Why it was rejected
        reason: String,
    },
}
