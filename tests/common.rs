// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory lead stores, configs, and a fake conversational API
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `avatar_leads`

use async_trait::async_trait;
use avatar_leads::config::{ApiConfig, WebhookConfig};
use avatar_leads::database::LeadStore;
use avatar_leads::errors::RemoteError;
use avatar_leads::models::{
    Conversation, ConversationMessage, CreateConversationRequest, Document, EndConversationAck,
    Persona,
};
use avatar_leads::remote::ConversationApi;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Mutex, Once};
use std::time::Duration;
use url::Url;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Fresh in-memory lead store
pub async fn create_test_store() -> LeadStore {
    init_test_logging();
    LeadStore::new("sqlite::memory:").await.unwrap()
}

/// API settings pointed at a mock server
pub fn api_config_for(base_url: &str) -> ApiConfig {
    let mut config = ApiConfig::new("test-api-key", Url::parse(base_url).unwrap());
    config.timeout = Duration::from_secs(5);
    config
}

/// Webhook settings pointed at `url` with a short timeout
pub fn webhook_config_for(url: &str, timeout: Duration) -> WebhookConfig {
    WebhookConfig {
        url: Some(Url::parse(url).unwrap()),
        timeout,
    }
}

/// In-process stand-in for the conversational API
///
/// Messages are served per conversation id; unknown ids answer with an
/// empty list like the real client does on 404. Every call is recorded.
#[derive(Default)]
pub struct FakeConversationApi {
    pub messages: Mutex<HashMap<String, Vec<Value>>>,
    pub details: Mutex<HashMap<String, Value>>,
    pub documents: Mutex<Vec<Document>>,
    pub personas: Mutex<Vec<Persona>>,
    pub calls: Mutex<Vec<String>>,
    pub fail_messages: bool,
}

impl FakeConversationApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_messages(self, conversation_id: &str, messages: Vec<Value>) -> Self {
        self.messages
            .lock()
            .unwrap()
            .insert(conversation_id.to_owned(), messages);
        self
    }

    pub fn with_detail(self, conversation_id: &str, detail: Value) -> Self {
        self.details
            .lock()
            .unwrap()
            .insert(conversation_id.to_owned(), detail);
        self
    }

    pub fn with_document(self, id: &str, name: &str) -> Self {
        self.documents.lock().unwrap().push(Document {
            document_id: Some(id.to_owned()),
            document_name: Some(name.to_owned()),
            ..Document::default()
        });
        self
    }

    pub fn with_persona(self, id: &str, name: &str) -> Self {
        self.personas.lock().unwrap().push(Persona {
            persona_id: Some(id.to_owned()),
            persona_name: Some(name.to_owned()),
            ..Persona::default()
        });
        self
    }

    pub fn failing_messages(mut self) -> Self {
        self.fail_messages = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

#[async_trait]
impl ConversationApi for FakeConversationApi {
    async fn create_document(&self, name: &str, _source_url: &str) -> Result<Document, RemoteError> {
        self.record(format!("create_document:{name}"));
        let document = Document {
            document_id: Some(format!("doc-{}", self.documents.lock().unwrap().len() + 1)),
            document_name: Some(name.to_owned()),
            ..Document::default()
        };
        self.documents.lock().unwrap().push(document.clone());
        Ok(document)
    }

    async fn list_documents(&self) -> Result<Vec<Document>, RemoteError> {
        self.record("list_documents");
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn find_document_by_name(&self, name: &str) -> Result<Option<Document>, RemoteError> {
        self.record(format!("find_document:{name}"));
        Ok(self
            .documents
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.document_name.as_deref() == Some(name))
            .cloned())
    }

    async fn create_persona(
        &self,
        name: &str,
        system_prompt: &str,
        document_ids: &[String],
    ) -> Result<Persona, RemoteError> {
        self.record(format!("create_persona:{name}"));
        let persona = Persona {
            persona_id: Some(format!("p-{}", self.personas.lock().unwrap().len() + 1)),
            persona_name: Some(name.to_owned()),
            system_prompt: Some(system_prompt.to_owned()),
            document_ids: Some(document_ids.to_vec()),
            ..Persona::default()
        };
        self.personas.lock().unwrap().push(persona.clone());
        Ok(persona)
    }

    async fn list_personas(&self) -> Result<Vec<Persona>, RemoteError> {
        self.record("list_personas");
        Ok(self.personas.lock().unwrap().clone())
    }

    async fn find_persona_by_name(&self, name: &str) -> Result<Option<Persona>, RemoteError> {
        self.record(format!("find_persona:{name}"));
        Ok(self
            .personas
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.persona_name.as_deref() == Some(name))
            .cloned())
    }

    async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation, RemoteError> {
        self.record(format!("create_conversation:{}", request.persona_id));
        Ok(serde_json::from_value(json!({
            "conversation_id": "c-fake",
            "conversation_url": "https://example.com/c-fake",
            "status": "active"
        }))
        .unwrap())
    }

    async fn end_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<EndConversationAck, RemoteError> {
        self.record(format!("end_conversation:{conversation_id}"));
        Ok(EndConversationAck::Ended)
    }

    async fn get_conversation(&self, conversation_id: &str) -> Result<Value, RemoteError> {
        self.record(format!("get_conversation:{conversation_id}"));
        self.details
            .lock()
            .unwrap()
            .get(conversation_id)
            .cloned()
            .ok_or_else(|| RemoteError::Status {
                endpoint: format!("/conversations/{conversation_id}"),
                status: 404,
                body: "not found".to_owned(),
            })
    }

    async fn get_conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ConversationMessage>, RemoteError> {
        self.record(format!("get_messages:{conversation_id}"));
        if self.fail_messages {
            return Err(RemoteError::Transport {
                endpoint: format!("/conversations/{conversation_id}/messages"),
                reason: "connection refused".to_owned(),
            });
        }
        Ok(self
            .messages
            .lock()
            .unwrap()
            .get(conversation_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .map(ConversationMessage::new)
            .collect())
    }
}
