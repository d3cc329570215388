// ABOUTME: Remote persona/conversation API abstraction and its HTTP implementation
// ABOUTME: Defines the ConversationApi trait consumed by transcript extraction and provisioning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Remote Conversational API
//!
//! The [`ConversationApi`] trait is the seam between lead capture and the
//! third-party service that hosts personas and video conversations. The
//! production implementation is [`TavusClient`]; tests substitute in-process
//! fakes.
//!
//! Every call is a single request/response with a bounded timeout and no
//! automatic retry. Failures surface as [`RemoteError`]; "not found" answers
//! on lookups and message queries surface as `None` or an empty list.

/// HTTP client for the conversational API
pub mod client;

pub use client::TavusClient;

use async_trait::async_trait;
use avatar_leads_core::errors::RemoteError;
use avatar_leads_core::models::{
    Conversation, ConversationMessage, CreateConversationRequest, Document, EndConversationAck,
    Persona,
};
use serde_json::Value;

/// Operations the lead-capture core needs from the conversational service
///
/// All implementations must be `Send + Sync` so one client can be shared by
/// the presentation layer and the capture pipeline.
#[async_trait]
pub trait ConversationApi: Send + Sync {
    /// Register a knowledge document from a public URL
    async fn create_document(&self, name: &str, source_url: &str) -> Result<Document, RemoteError>;

    /// Single page of documents
    async fn list_documents(&self) -> Result<Vec<Document>, RemoteError>;

    /// First document whose name matches exactly, or `None`
    async fn find_document_by_name(&self, name: &str) -> Result<Option<Document>, RemoteError>;

    /// Create a persona backed by the given documents
    async fn create_persona(
        &self,
        name: &str,
        system_prompt: &str,
        document_ids: &[String],
    ) -> Result<Persona, RemoteError>;

    /// Single page of personas
    async fn list_personas(&self) -> Result<Vec<Persona>, RemoteError>;

    /// First persona whose name matches exactly, or `None`
    async fn find_persona_by_name(&self, name: &str) -> Result<Option<Persona>, RemoteError>;

    /// Start a conversation; with a callback URL the remote pushes events there
    async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation, RemoteError>;

    /// End a conversation; ending an already-ended one is not an error
    async fn end_conversation(&self, conversation_id: &str)
        -> Result<EndConversationAck, RemoteError>;

    /// Raw conversation detail record
    async fn get_conversation(&self, conversation_id: &str) -> Result<Value, RemoteError>;

    /// Transcript messages in delivery order; empty when the remote has none yet
    async fn get_conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ConversationMessage>, RemoteError>;
}
