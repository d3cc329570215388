// ABOUTME: Best-effort delivery of captured leads to an external webhook sink
// ABOUTME: Failures are logged and reported as an outcome, never raised to the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Lead Webhook
//!
//! Delivery is fire-and-forget from the caller's point of view: a missing
//! destination, a network failure, a timeout, and a non-2xx answer all come
//! back as a [`DeliveryOutcome`] rather than an error.

use crate::config::WebhookConfig;
use crate::utils::http_client::webhook_client;
use crate::utils::redaction::mask_optional_email;
use avatar_leads_core::models::{Lead, NewLead};
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// JSON body POSTed to the webhook sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadWebhookPayload {
    /// Originating conversation, when known
    pub conversation_id: Option<String>,
    /// Parsed name
    pub name: Option<String>,
    /// Parsed email
    pub email: Option<String>,
    /// Full transcript text the lead was parsed from
    pub transcript: String,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
}

impl LeadWebhookPayload {
    /// Payload for a stored lead, stamped with its creation time
    #[must_use]
    pub fn from_lead(lead: &Lead, transcript: impl Into<String>) -> Self {
        Self {
            conversation_id: lead.conversation_id.clone(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            transcript: transcript.into(),
            timestamp: iso_timestamp(lead.created_at),
        }
    }

    /// Payload for a lead that was never stored, stamped with the current time
    #[must_use]
    pub fn from_new_lead(lead: &NewLead, transcript: impl Into<String>) -> Self {
        Self {
            conversation_id: lead.conversation_id.clone(),
            name: lead.name.clone(),
            email: lead.email.clone(),
            transcript: transcript.into(),
            timestamp: iso_timestamp(Utc::now()),
        }
    }
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// What happened to a delivery attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// No destination configured; nothing was sent
    Skipped,
    /// The sink answered 2xx
    Delivered {
        /// Response status
        status: u16,
    },
    /// The request failed or the sink answered non-2xx
    Failed {
        /// Rendered failure cause
        reason: String,
    },
}

impl DeliveryOutcome {
    /// The sink accepted the lead
    #[must_use]
    pub const fn is_delivered(&self) -> bool {
        matches!(self, Self::Delivered { .. })
    }
}

/// Posts lead payloads to the configured webhook URL
#[derive(Clone)]
pub struct WebhookForwarder {
    url: Option<Url>,
    client: Client,
}

impl WebhookForwarder {
    /// Forwarder for `config`; a missing URL yields a no-op forwarder
    #[must_use]
    pub fn new(config: &WebhookConfig) -> Self {
        Self {
            url: config.url.clone(),
            client: webhook_client(config.timeout),
        }
    }

    /// Forwarder that never sends anything
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(&WebhookConfig::default())
    }

    /// Whether a destination is configured
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.url.is_some()
    }

    /// Deliver `payload` once, without retries
    pub async fn forward(&self, payload: &LeadWebhookPayload) -> DeliveryOutcome {
        let Some(url) = &self.url else {
            debug!("No lead webhook configured, skipping delivery");
            return DeliveryOutcome::Skipped;
        };

        let started = Instant::now();
        let outcome = match self.client.post(url.clone()).json(payload).send().await {
            Ok(response) if response.status().is_success() => DeliveryOutcome::Delivered {
                status: response.status().as_u16(),
            },
            Ok(response) => DeliveryOutcome::Failed {
                reason: format!("webhook answered {}", response.status()),
            },
            Err(e) if e.is_timeout() => DeliveryOutcome::Failed {
                reason: format!("webhook timed out: {e}"),
            },
            Err(e) => DeliveryOutcome::Failed {
                reason: e.to_string(),
            },
        };

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &outcome {
            DeliveryOutcome::Delivered { status } => info!(
                webhook.host = url.host_str().unwrap_or("unknown"),
                webhook.status = status,
                webhook.duration_ms = elapsed_ms,
                conversation.id = payload.conversation_id.as_deref().unwrap_or("none"),
                lead.email = %mask_optional_email(payload.email.as_deref()),
                "Lead forwarded to webhook"
            ),
            DeliveryOutcome::Failed { reason } => warn!(
                webhook.host = url.host_str().unwrap_or("unknown"),
                webhook.duration_ms = elapsed_ms,
                conversation.id = payload.conversation_id.as_deref().unwrap_or("none"),
                error = %reason,
                "Lead webhook delivery failed"
            ),
            DeliveryOutcome::Skipped => {}
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use avatar_leads_core::models::LeadId;
    use chrono::TimeZone;
    use serde_json::Map;

    #[test]
    fn test_payload_from_lead_uses_created_at() {
        let created_at = Utc
            .with_ymd_and_hms(2025, 3, 1, 10, 0, 0)
            .single()
            .unwrap_or_else(Utc::now);
        let lead = Lead {
            id: LeadId::new(1),
            conversation_id: Some("c1".to_owned()),
            name: Some("Ada".to_owned()),
            email: None,
            phone: None,
            company: None,
            source: Some("transcript".to_owned()),
            extra: Map::new(),
            created_at,
        };
        let payload = LeadWebhookPayload::from_lead(&lead, "my name is Ada");
        assert_eq!(payload.timestamp, "2025-03-01T10:00:00.000Z");
        assert_eq!(payload.transcript, "my name is Ada");
        assert_eq!(payload.conversation_id.as_deref(), Some("c1"));
    }

    #[tokio::test]
    async fn test_disabled_forwarder_skips() {
        let forwarder = WebhookForwarder::disabled();
        assert!(!forwarder.is_enabled());
        let payload = LeadWebhookPayload::from_new_lead(&NewLead::default(), "");
        assert_eq!(forwarder.forward(&payload).await, DeliveryOutcome::Skipped);
    }
}
