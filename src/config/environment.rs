// ABOUTME: Environment configuration for the conversational API, webhook, store, and parser
// ABOUTME: Builds an explicit AppConfig that is passed into constructors instead of global lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration
//!
//! Nothing outside this module reads the process environment. Components
//! receive the slice of [`AppConfig`] they need, which keeps them testable
//! with fake transports and throwaway stores.

use crate::lead_parser::ParserStrictness;
use avatar_leads_core::constants::{defaults, env_keys};
use avatar_leads_core::errors::ConfigError;
use avatar_leads_core::models::CreateConversationRequest;
use std::env;
use std::fmt;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Connection settings for the conversational API
#[derive(Clone)]
pub struct ApiConfig {
    /// Per-deployment secret sent on every request
    pub api_key: String,
    /// API root, e.g. `https://tavusapi.com/v2`
    pub base_url: Url,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl ApiConfig {
    /// Settings with the default timeout
    pub fn new(api_key: impl Into<String>, base_url: Url) -> Self {
        Self {
            api_key: api_key.into(),
            base_url,
            timeout: Duration::from_secs(defaults::API_TIMEOUT_SECS),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Lead webhook destination
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    /// Where leads are POSTed; `None` disables forwarding
    pub url: Option<Url>,
    /// Delivery timeout
    pub timeout: Duration,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: Duration::from_secs(defaults::WEBHOOK_TIMEOUT_SECS),
        }
    }
}

/// Identifiers used when the presentation layer starts a conversation
#[derive(Debug, Clone)]
pub struct ConversationDefaults {
    /// Replica rendered in the video call
    pub replica_id: String,
    /// Persona created by provisioning
    pub persona_id: Option<String>,
    /// Where the remote pushes conversation events
    pub callback_url: Option<Url>,
}

impl Default for ConversationDefaults {
    fn default() -> Self {
        Self {
            replica_id: defaults::REPLICA_ID.to_owned(),
            persona_id: None,
            callback_url: None,
        }
    }
}

impl ConversationDefaults {
    /// Configured persona id
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when no persona has been configured
    pub fn require_persona_id(&self) -> Result<&str, ConfigError> {
        self.persona_id.as_deref().ok_or(ConfigError::Missing {
            key: env_keys::PERSONA_ID,
        })
    }

    /// Conversation request from the defaults, optionally overriding the persona
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` when neither an override nor a default persona exists
    pub fn conversation_request(
        &self,
        persona_override: Option<&str>,
    ) -> Result<CreateConversationRequest, ConfigError> {
        let persona_id = match persona_override {
            Some(id) => id,
            None => self.require_persona_id()?,
        };
        Ok(
            CreateConversationRequest::new(persona_id, self.replica_id.clone())
                .with_callback_url(self.callback_url.as_ref().map(ToString::to_string)),
        )
    }
}

/// Settings for capturing leads from transcript text already in hand
///
/// Everything here is optional in the environment, so commands that never
/// reach the remote API can load it without an API key.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Lead webhook
    pub webhook: WebhookConfig,
    /// Lead store location (`sqlite:` URL)
    pub database_url: String,
    /// Lead parser strictness
    pub parser_strictness: ParserStrictness,
}

impl CaptureConfig {
    /// Load capture settings from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any value fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load capture settings through an arbitrary key lookup
    ///
    /// # Errors
    ///
    /// Returns an error if any value fails validation
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let webhook_url = get(env_keys::WEBHOOK_URL)
            .map(|raw| parse_http_url(env_keys::WEBHOOK_URL, &raw))
            .transpose()?;

        let webhook_timeout = get(env_keys::WEBHOOK_TIMEOUT_SECS)
            .map(|raw| parse_secs(env_keys::WEBHOOK_TIMEOUT_SECS, &raw))
            .transpose()?
            .unwrap_or(Duration::from_secs(defaults::WEBHOOK_TIMEOUT_SECS));

        let parser_strictness = get(env_keys::PARSER_STRICTNESS)
            .map(|raw| {
                raw.parse::<ParserStrictness>()
                    .map_err(|reason| ConfigError::Invalid {
                        key: env_keys::PARSER_STRICTNESS,
                        reason,
                    })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            webhook: WebhookConfig {
                url: webhook_url,
                timeout: webhook_timeout,
            },
            database_url: get(env_keys::DATABASE_URL)
                .unwrap_or_else(|| defaults::DATABASE_URL.to_owned()),
            parser_strictness,
        })
    }

    /// Log a configuration summary
    pub fn log_summary(&self) {
        info!(
            webhook.enabled = self.webhook.url.is_some(),
            webhook.timeout_secs = self.webhook.timeout.as_secs(),
            parser.strictness = %self.parser_strictness,
            "Capture configuration loaded"
        );
    }
}

/// Complete configuration consumed by the core
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Conversational API
    pub api: ApiConfig,
    /// Lead webhook
    pub webhook: WebhookConfig,
    /// Conversation defaults
    pub defaults: ConversationDefaults,
    /// Lead store location (`sqlite:` URL)
    pub database_url: String,
    /// Lead parser strictness
    pub parser_strictness: ParserStrictness,
}

impl AppConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or any value fails validation
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or any value fails validation
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        let api_key = get(env_keys::API_KEY)
            .or_else(|| get(env_keys::API_KEY_FALLBACK))
            .ok_or(ConfigError::Missing {
                key: env_keys::API_KEY,
            })?;

        let base_url = parse_http_url(
            env_keys::API_BASE_URL,
            &get(env_keys::API_BASE_URL).unwrap_or_else(|| defaults::API_BASE_URL.to_owned()),
        )?;

        let api_timeout = get(env_keys::API_TIMEOUT_SECS)
            .map(|raw| parse_secs(env_keys::API_TIMEOUT_SECS, &raw))
            .transpose()?
            .unwrap_or(Duration::from_secs(defaults::API_TIMEOUT_SECS));

        let callback_url = get(env_keys::CALLBACK_URL)
            .map(|raw| parse_http_url(env_keys::CALLBACK_URL, &raw))
            .transpose()?;

        let capture = CaptureConfig::from_lookup(&lookup)?;

        Ok(Self {
            api: ApiConfig {
                api_key,
                base_url,
                timeout: api_timeout,
            },
            webhook: capture.webhook,
            defaults: ConversationDefaults {
                replica_id: get(env_keys::REPLICA_ID)
                    .unwrap_or_else(|| defaults::REPLICA_ID.to_owned()),
                persona_id: get(env_keys::PERSONA_ID),
                callback_url,
            },
            database_url: capture.database_url,
            parser_strictness: capture.parser_strictness,
        })
    }

    /// The local capture settings, without the remote API
    #[must_use]
    pub fn capture(&self) -> CaptureConfig {
        CaptureConfig {
            webhook: self.webhook.clone(),
            database_url: self.database_url.clone(),
            parser_strictness: self.parser_strictness,
        }
    }

    /// Lead store location alone, for commands that never reach the remote API
    #[must_use]
    pub fn database_url_from_env() -> String {
        env::var(env_keys::DATABASE_URL)
            .ok()
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| defaults::DATABASE_URL.to_owned())
    }

    /// Log a configuration summary without secrets
    pub fn log_summary(&self) {
        info!(
            api.base_url = %self.api.base_url,
            api.timeout_secs = self.api.timeout.as_secs(),
            webhook.enabled = self.webhook.url.is_some(),
            webhook.timeout_secs = self.webhook.timeout.as_secs(),
            conversation.replica_id = %self.defaults.replica_id,
            conversation.persona_configured = self.defaults.persona_id.is_some(),
            conversation.callback_enabled = self.defaults.callback_url.is_some(),
            parser.strictness = %self.parser_strictness,
            "Configuration loaded"
        );
    }
}

fn parse_http_url(key: &'static str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        key,
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Invalid {
            key,
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

fn parse_secs(key: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key,
            reason: "timeout must be at least one second".to_owned(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}
