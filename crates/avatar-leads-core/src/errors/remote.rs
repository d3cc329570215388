// ABOUTME: Error taxonomy for calls to the remote conversational API
// ABOUTME: Separates transport failures from non-2xx responses and malformed bodies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Errors raised by the remote persona/conversation client
///
/// A "not found" answer is never represented here: lookups return `None`
/// and message queries return an empty list instead.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// No response was obtained (connect failure, timeout, broken body)
    #[error("Transport failure calling {endpoint}: {reason}")]
    Transport {
        /// Endpoint path that was being called
        endpoint: String,
        /// Underlying client error, rendered
        reason: String,
    },

    /// The remote answered with a non-2xx status
    #[error("Remote API returned {status} for {endpoint}: {body}")]
    Status {
        /// Endpoint path that was called
        endpoint: String,
        /// HTTP status code
        status: u16,
        /// Raw response body
        body: String,
    },

    /// A 2xx body did not have the expected shape
    #[error("Failed to decode {context} response")]
    Decode {
        /// Which response was being decoded
        context: &'static str,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// The caller passed an empty identifier
    #[error("{field} is required")]
    EmptyIdentifier {
        /// Name of the missing argument
        field: &'static str,
    },

    /// A response lacked an identifier the caller needs
    #[error("{context} response is missing '{field}'")]
    MissingField {
        /// Which response was inspected
        context: &'static str,
        /// Field that was absent
        field: &'static str,
    },
}

impl RemoteError {
    /// Whether a caller-side retry could plausibly succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Decode { .. } | Self::EmptyIdentifier { .. } | Self::MissingField { .. } => {
                false
            }
        }
    }

    /// HTTP status carried by the error, if any
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Ensure an identifier argument is non-blank
    ///
    /// # Errors
    ///
    /// Returns `EmptyIdentifier` when `value` is empty or whitespace
    pub fn require_identifier<'a>(field: &'static str, value: &'a str) -> Result<&'a str, Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Self::EmptyIdentifier { field });
        }
        Ok(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        let transport = RemoteError::Transport {
            endpoint: "/personas".to_owned(),
            reason: "connection refused".to_owned(),
        };
        assert!(transport.is_retryable());

        let server = RemoteError::Status {
            endpoint: "/personas".to_owned(),
            status: 503,
            body: String::new(),
        };
        assert!(server.is_retryable());
        assert_eq!(server.status(), Some(503));

        let bad_request = RemoteError::Status {
            endpoint: "/personas".to_owned(),
            status: 400,
            body: "bad".to_owned(),
        };
        assert!(!bad_request.is_retryable());
    }

    #[test]
    fn test_require_identifier() {
        assert_eq!(
            RemoteError::require_identifier("conversation_id", " c123 ").ok(),
            Some("c123")
        );
        assert!(matches!(
            RemoteError::require_identifier("conversation_id", "   "),
            Err(RemoteError::EmptyIdentifier {
                field: "conversation_id"
            })
        ));
    }
}
