// ABOUTME: Transcript extraction from heterogeneous conversation message records
// ABOUTME: Flattens remote messages or pushed conversation payloads into line-per-turn text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::remote::ConversationApi;
use avatar_leads_core::constants::wire::{PAYLOAD_MESSAGE_FIELDS, PAYLOAD_TRANSCRIPT_FIELDS};
use avatar_leads_core::errors::RemoteError;
use avatar_leads_core::models::ConversationMessage;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Builds plain-text transcripts from the conversational API
#[derive(Clone)]
pub struct TranscriptExtractor {
    api: Arc<dyn ConversationApi>,
}

impl TranscriptExtractor {
    /// Create an extractor reading through `api`
    #[must_use]
    pub fn new(api: Arc<dyn ConversationApi>) -> Self {
        Self { api }
    }

    /// Transcript of a conversation's messages, one turn per line
    ///
    /// A conversation with no messages, or none carrying text, yields an
    /// empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the message fetch fails
    pub async fn extract_transcript(&self, conversation_id: &str) -> Result<String, RemoteError> {
        let messages = self.api.get_conversation_messages(conversation_id).await?;
        let transcript = join_messages(&messages);
        debug!(
            conversation.id = %conversation_id,
            transcript.messages = messages.len(),
            transcript.chars = transcript.len(),
            "Transcript extracted from messages"
        );
        Ok(transcript)
    }

    /// Transcript read from the conversation detail record instead of the
    /// message endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the conversation fetch fails
    pub async fn extract_from_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<String, RemoteError> {
        let payload = self.api.get_conversation(conversation_id).await?;
        Ok(transcript_from_payload(&payload))
    }
}

/// Join the resolved text of each message in delivery order, one per line
///
/// Messages without text under any candidate field are skipped.
#[must_use]
pub fn join_messages(messages: &[ConversationMessage]) -> String {
    messages
        .iter()
        .filter_map(ConversationMessage::text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Plain-text transcript from a conversation payload
///
/// Whole-transcript string fields win; otherwise a message array (`messages`,
/// or `transcript` as pushed to callback URLs) is joined line by line. Event
/// envelopes that nest the record under `properties` are unwrapped first.
#[must_use]
pub fn transcript_from_payload(payload: &Value) -> String {
    let record = payload
        .get("properties")
        .filter(|inner| inner.is_object())
        .unwrap_or(payload);

    let whole = PAYLOAD_TRANSCRIPT_FIELDS.iter().find_map(|key| {
        record
            .get(*key)
            .and_then(Value::as_str)
            .filter(|text| !text.trim().is_empty())
    });
    if let Some(text) = whole {
        return text.to_owned();
    }

    PAYLOAD_MESSAGE_FIELDS
        .iter()
        .filter_map(|key| record.get(*key).and_then(Value::as_array))
        .map(|items| {
            let messages: Vec<ConversationMessage> =
                items.iter().cloned().map(ConversationMessage::new).collect();
            join_messages(&messages)
        })
        .find(|text| !text.is_empty())
        .unwrap_or_default()
}
