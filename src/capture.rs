// ABOUTME: Lead capture pipeline wiring transcript extraction, parsing, storage, and forwarding
// ABOUTME: Storage and webhook delivery are independent; neither is skipped when the other fails
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::database::LeadStore;
use crate::lead_parser::LeadParser;
use crate::transcript::TranscriptExtractor;
use crate::utils::redaction::mask_optional_email;
use crate::webhook::{DeliveryOutcome, LeadWebhookPayload, WebhookForwarder};
use avatar_leads_core::constants::env_keys;
use avatar_leads_core::constants::leads::SOURCE_TRANSCRIPT;
use avatar_leads_core::errors::{AppResult, ConfigError, RemoteError};
use avatar_leads_core::models::{Lead, NewLead, ParsedLead};
use tracing::{info, warn};

/// Result of one successful capture
#[derive(Debug, Clone)]
pub struct CaptureOutcome {
    /// The stored row
    pub lead: Lead,
    /// What the parser found
    pub parsed: ParsedLead,
    /// Transcript the lead was parsed from
    pub transcript: String,
    /// Webhook delivery result
    pub delivery: DeliveryOutcome,
}

/// Extract, parse, store, forward
#[derive(Clone)]
pub struct LeadCaptureService {
    extractor: Option<TranscriptExtractor>,
    parser: LeadParser,
    store: LeadStore,
    forwarder: WebhookForwarder,
}

impl LeadCaptureService {
    /// Assemble the pipeline from its components
    #[must_use]
    pub const fn new(
        extractor: TranscriptExtractor,
        parser: LeadParser,
        store: LeadStore,
        forwarder: WebhookForwarder,
    ) -> Self {
        Self {
            extractor: Some(extractor),
            parser,
            store,
            forwarder,
        }
    }

    /// Pipeline for transcripts already in hand; conversation fetches fail
    #[must_use]
    pub const fn without_remote(
        parser: LeadParser,
        store: LeadStore,
        forwarder: WebhookForwarder,
    ) -> Self {
        Self {
            extractor: None,
            parser,
            store,
            forwarder,
        }
    }

    /// The underlying store, for read-only listings
    #[must_use]
    pub const fn store(&self) -> &LeadStore {
        &self.store
    }

    /// Fetch a conversation's transcript and capture a lead from it
    ///
    /// The id is trimmed once here, so the fetched, stored, and forwarded ids
    /// are identical.
    ///
    /// # Errors
    ///
    /// Returns an error if no remote API is configured, the id is blank, the
    /// transcript cannot be fetched, or the lead cannot be stored. Webhook
    /// failures are never returned.
    pub async fn capture_from_conversation(&self, conversation_id: &str) -> AppResult<CaptureOutcome> {
        let Some(extractor) = &self.extractor else {
            return Err(ConfigError::Missing {
                key: env_keys::API_KEY,
            }
            .into());
        };
        let conversation_id = RemoteError::require_identifier("conversation_id", conversation_id)?;
        let transcript = extractor.extract_transcript(conversation_id).await?;
        self.capture_from_transcript(Some(conversation_id), transcript)
            .await
    }

    /// Capture a lead from transcript text already in hand
    ///
    /// A lead row is written even when nothing was recognised, with
    /// `extra.parsed = false`, so every processed conversation leaves a trace.
    ///
    /// # Errors
    ///
    /// Returns an error if the lead cannot be stored; the webhook is still
    /// attempted first
    pub async fn capture_from_transcript(
        &self,
        conversation_id: Option<&str>,
        transcript: String,
    ) -> AppResult<CaptureOutcome> {
        let parsed = self.parser.parse(&transcript);
        let new_lead = NewLead::from_parsed(
            conversation_id.map(ToOwned::to_owned),
            parsed.clone(),
            SOURCE_TRANSCRIPT,
        )
        .with_extra("parsed", !parsed.is_empty())
        .with_extra("name_found", parsed.name.is_some())
        .with_extra("email_found", parsed.email.is_some())
        .with_extra("strictness", self.parser.strictness().as_str());

        let stored = self.store.insert_lead(&new_lead).await;

        let payload = match &stored {
            Ok(lead) => LeadWebhookPayload::from_lead(lead, transcript.clone()),
            Err(e) => {
                warn!(
                    conversation.id = conversation_id.unwrap_or("none"),
                    error = %e,
                    "Lead insert failed, forwarding anyway"
                );
                LeadWebhookPayload::from_new_lead(&new_lead, transcript.clone())
            }
        };
        let delivery = self.forwarder.forward(&payload).await;

        let lead = stored?;
        info!(
            lead.id = %lead.id,
            conversation.id = conversation_id.unwrap_or("none"),
            lead.name_found = parsed.name.is_some(),
            lead.email = %mask_optional_email(parsed.email.as_deref()),
            webhook.delivered = delivery.is_delivered(),
            "Lead captured"
        );

        Ok(CaptureOutcome {
            lead,
            parsed,
            transcript,
            delivery,
        })
    }
}
