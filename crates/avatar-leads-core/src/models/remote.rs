// ABOUTME: Records exchanged with the remote persona/conversation API
// ABOUTME: Documents, personas, conversations, and loosely-shaped transcript messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::wire::MESSAGE_TEXT_FIELDS;
use crate::errors::RemoteError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Remote collections that support lookup by display name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCollection {
    /// Knowledge documents
    Documents,
    /// Personas
    Personas,
}

impl ResourceCollection {
    /// Path of the listing endpoint relative to the API base
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Documents => "/documents",
            Self::Personas => "/personas",
        }
    }

    /// Context label used in decode errors
    #[must_use]
    pub const fn list_context(self) -> &'static str {
        match self {
            Self::Documents => "document list",
            Self::Personas => "persona list",
        }
    }
}

/// A remote record with a human-assigned name
pub trait NamedResource {
    /// Display name, if the record carries one
    fn resource_name(&self) -> Option<&str>;
}

/// Knowledge document registered from a URL
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Remote identifier
    #[serde(default)]
    pub document_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub document_name: Option<String>,
    /// Source URL the document was ingested from
    #[serde(default)]
    pub document_url: Option<String>,
    /// Ingestion status reported by the remote
    #[serde(default)]
    pub status: Option<String>,
    /// Fields this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Document {
    /// Identifier, required by callers that reference the document
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when the remote omitted `document_id`
    pub fn id(&self) -> Result<&str, RemoteError> {
        self.document_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(RemoteError::MissingField {
                context: "document",
                field: "document_id",
            })
    }
}

impl NamedResource for Document {
    fn resource_name(&self) -> Option<&str> {
        self.document_name.as_deref()
    }
}

/// Conversational persona
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    /// Remote identifier
    #[serde(default)]
    pub persona_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub persona_name: Option<String>,
    /// System prompt the persona runs with
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Knowledge documents attached to the persona
    #[serde(default)]
    pub document_ids: Option<Vec<String>>,
    /// Fields this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Persona {
    /// Identifier, required to start conversations
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when the remote omitted `persona_id`
    pub fn id(&self) -> Result<&str, RemoteError> {
        self.persona_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(RemoteError::MissingField {
                context: "persona",
                field: "persona_id",
            })
    }
}

impl NamedResource for Persona {
    fn resource_name(&self) -> Option<&str> {
        self.persona_name.as_deref()
    }
}

/// Parameters for starting a conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateConversationRequest {
    /// Persona to talk to
    pub persona_id: String,
    /// Replica (video avatar) to render
    pub replica_id: String,
    /// Where the remote pushes lifecycle events; `None` means the caller polls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Optional label shown in the remote dashboard
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_name: Option<String>,
}

impl CreateConversationRequest {
    /// Request without callback or label
    pub fn new(persona_id: impl Into<String>, replica_id: impl Into<String>) -> Self {
        Self {
            persona_id: persona_id.into(),
            replica_id: replica_id.into(),
            callback_url: None,
            conversation_name: None,
        }
    }

    /// Ask the remote to push events to `url`
    #[must_use]
    pub fn with_callback_url(mut self, url: Option<String>) -> Self {
        self.callback_url = url;
        self
    }
}

/// A started conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Remote identifier
    #[serde(default)]
    pub conversation_id: Option<String>,
    /// Join URL for the video call
    #[serde(default)]
    pub conversation_url: Option<String>,
    /// Label, if one was given
    #[serde(default)]
    pub conversation_name: Option<String>,
    /// Lifecycle status
    #[serde(default)]
    pub status: Option<String>,
    /// Fields this crate does not model
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Conversation {
    /// Identifier, required for follow-up calls
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when the remote omitted `conversation_id`
    pub fn id(&self) -> Result<&str, RemoteError> {
        self.conversation_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or(RemoteError::MissingField {
                context: "conversation",
                field: "conversation_id",
            })
    }
}

/// Outcome of ending a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndConversationAck {
    /// The remote accepted the request (with or without a JSON body)
    Ended,
    /// The conversation had already ended; not a failure
    AlreadyEnded,
}

/// One turn of a conversation transcript
///
/// The remote is inconsistent about where a turn's text lives, so the raw
/// record is kept and inspected on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationMessage(Value);

impl ConversationMessage {
    /// Wrap a raw message record
    #[must_use]
    pub const fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// Raw record as received
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.0
    }

    /// Text payload of the turn
    ///
    /// Bare strings are taken as-is; objects are searched for `text`,
    /// `content`, `message`, then `transcript`, and the first non-blank
    /// string wins.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.0 {
            Value::String(text) => non_blank(text),
            Value::Object(fields) => MESSAGE_TEXT_FIELDS
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str).and_then(non_blank)),
            _ => None,
        }
    }

    /// Speaker role, when present
    #[must_use]
    pub fn role(&self) -> Option<&str> {
        self.0.get("role").and_then(Value::as_str)
    }
}

impl From<Value> for ConversationMessage {
    fn from(raw: Value) -> Self {
        Self::new(raw)
    }
}

fn non_blank(text: &str) -> Option<&str> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}
