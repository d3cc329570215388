// ABOUTME: REST client for the conversational-avatar API (documents, personas, conversations)
// ABOUTME: Handles API key auth, status mapping, not-found tolerance, and name lookups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Conversational API REST client
//!
//! Requests carry the per-deployment secret in the `x-api-key` header and
//! JSON bodies. Non-2xx answers become [`RemoteError::Status`] with the raw
//! body attached; network-level failures become [`RemoteError::Transport`].

use super::ConversationApi;
use crate::config::ApiConfig;
use crate::utils::http_client::api_client;
use async_trait::async_trait;
use avatar_leads_core::constants::{defaults, wire};
use avatar_leads_core::errors::RemoteError;
use avatar_leads_core::models::{
    Conversation, ConversationMessage, CreateConversationRequest, Document, EndConversationAck,
    NamedResource, Persona, ResourceCollection,
};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Listing endpoints wrap their single page in `data`
#[derive(Debug, Deserialize)]
struct ListPage<T> {
    data: Vec<T>,
}

/// Status and body of a completed exchange
struct RawResponse {
    status: StatusCode,
    body: String,
}

/// Conversational API client for REST operations
pub struct TavusClient {
    config: ApiConfig,
    client: Client,
}

impl TavusClient {
    /// Create a client whose requests are bounded by `config.timeout`
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        let client = api_client(config.timeout);
        Self { config, client }
    }

    /// Create a client around an existing `reqwest::Client`
    #[must_use]
    pub const fn with_client(config: ApiConfig, client: Client) -> Self {
        Self { config, client }
    }

    /// First record in `collection` whose name equals `name` exactly
    ///
    /// The remote offers no server-side filter, so this scans the single
    /// listing page. Absence is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing request fails or cannot be decoded
    pub async fn lookup_by_name<T>(
        &self,
        collection: ResourceCollection,
        name: &str,
    ) -> Result<Option<T>, RemoteError>
    where
        T: DeserializeOwned + NamedResource,
    {
        let items: Vec<T> = self.list(collection).await?;
        let found = items
            .into_iter()
            .find(|item| item.resource_name() == Some(name));
        debug!(
            remote.collection = collection.path(),
            lookup.name = %name,
            lookup.found = found.is_some(),
            "Name lookup"
        );
        Ok(found)
    }

    async fn list<T: DeserializeOwned>(
        &self,
        collection: ResourceCollection,
    ) -> Result<Vec<T>, RemoteError> {
        let segment = collection.path().trim_start_matches('/');
        let response = self.execute(Method::GET, &[segment], None).await?;
        let body = ensure_success(response, collection.path())?;
        let page: ListPage<T> = decode(&body, collection.list_context())?;
        Ok(page.data)
    }

    fn endpoint_url(&self, segments: &[&str]) -> Result<Url, RemoteError> {
        let mut url = self.config.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| RemoteError::Transport {
                endpoint: segments.join("/"),
                reason: "base URL cannot carry a path".to_owned(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn execute(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&Value>,
    ) -> Result<RawResponse, RemoteError> {
        let url = self.endpoint_url(segments)?;
        let endpoint = url.path().to_owned();
        let started = Instant::now();

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(wire::API_KEY_HEADER, &self.config.api_key);
        if let Some(json_body) = body {
            request = request.json(json_body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(
                remote.method = %method,
                remote.endpoint = %endpoint,
                error = %e,
                "Conversational API request failed"
            );
            RemoteError::Transport {
                endpoint: endpoint.clone(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| RemoteError::Transport {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        })?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        debug!(
            remote.method = %method,
            remote.endpoint = %endpoint,
            remote.status = status.as_u16(),
            remote.duration_ms = elapsed_ms,
            "Conversational API call"
        );

        Ok(RawResponse { status, body: text })
    }
}

#[async_trait]
impl ConversationApi for TavusClient {
    async fn create_document(&self, name: &str, source_url: &str) -> Result<Document, RemoteError> {
        info!(document.name = %name, "Creating document from URL");
        let payload = json!({
            "document_url": source_url,
            "document_name": name,
        });
        let response = self
            .execute(Method::POST, &["documents"], Some(&payload))
            .await?;
        let body = ensure_success(response, "/documents")?;
        decode(&body, "document")
    }

    async fn list_documents(&self) -> Result<Vec<Document>, RemoteError> {
        self.list(ResourceCollection::Documents).await
    }

    async fn find_document_by_name(&self, name: &str) -> Result<Option<Document>, RemoteError> {
        self.lookup_by_name(ResourceCollection::Documents, name)
            .await
    }

    async fn create_persona(
        &self,
        name: &str,
        system_prompt: &str,
        document_ids: &[String],
    ) -> Result<Persona, RemoteError> {
        info!(
            persona.name = %name,
            persona.documents = document_ids.len(),
            "Creating persona"
        );
        let payload = json!({
            "pipeline_mode": defaults::PIPELINE_MODE,
            "persona_name": name,
            "system_prompt": system_prompt,
            "document_ids": document_ids,
        });
        let response = self
            .execute(Method::POST, &["personas"], Some(&payload))
            .await?;
        let body = ensure_success(response, "/personas")?;
        decode(&body, "persona")
    }

    async fn list_personas(&self) -> Result<Vec<Persona>, RemoteError> {
        self.list(ResourceCollection::Personas).await
    }

    async fn find_persona_by_name(&self, name: &str) -> Result<Option<Persona>, RemoteError> {
        self.lookup_by_name(ResourceCollection::Personas, name)
            .await
    }

    async fn create_conversation(
        &self,
        request: &CreateConversationRequest,
    ) -> Result<Conversation, RemoteError> {
        RemoteError::require_identifier("persona_id", &request.persona_id)?;
        RemoteError::require_identifier("replica_id", &request.replica_id)?;

        let payload = serde_json::to_value(request).map_err(|e| RemoteError::Decode {
            context: "conversation request",
            source: e,
        })?;
        let response = self
            .execute(Method::POST, &["conversations"], Some(&payload))
            .await?;
        let body = ensure_success(response, "/conversations")?;
        let conversation: Conversation = decode(&body, "conversation")?;

        info!(
            conversation.id = conversation.conversation_id.as_deref().unwrap_or("unknown"),
            conversation.push_events = request.callback_url.is_some(),
            "Conversation created"
        );
        Ok(conversation)
    }

    async fn end_conversation(
        &self,
        conversation_id: &str,
    ) -> Result<EndConversationAck, RemoteError> {
        let id = RemoteError::require_identifier("conversation_id", conversation_id)?;
        let response = self
            .execute(Method::POST, &["conversations", id, "end"], None)
            .await?;

        if response.status.is_success() {
            // Some deployments answer with an empty or non-JSON body
            info!(conversation.id = %id, "Conversation ended");
            return Ok(EndConversationAck::Ended);
        }

        if reports_already_ended(response.status, &response.body) {
            info!(conversation.id = %id, "Conversation was already ended");
            return Ok(EndConversationAck::AlreadyEnded);
        }

        Err(status_error(response, &format!("/conversations/{id}/end")))
    }

    async fn get_conversation(&self, conversation_id: &str) -> Result<Value, RemoteError> {
        let id = RemoteError::require_identifier("conversation_id", conversation_id)?;
        let response = self
            .execute(Method::GET, &["conversations", id], None)
            .await?;
        let body = ensure_success(response, &format!("/conversations/{id}"))?;
        decode(&body, "conversation detail")
    }

    async fn get_conversation_messages(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<ConversationMessage>, RemoteError> {
        let id = RemoteError::require_identifier("conversation_id", conversation_id)?;
        let response = self
            .execute(Method::GET, &["conversations", id, "messages"], None)
            .await?;

        if response.status == StatusCode::NOT_FOUND {
            debug!(conversation.id = %id, "No transcript messages yet");
            return Ok(Vec::new());
        }

        let body = ensure_success(response, &format!("/conversations/{id}/messages"))?;
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }
        let value: Value = decode(&body, "conversation messages")?;
        Ok(messages_from_value(value))
    }
}

/// Normalise a messages response: `{"data": [...]}`, a bare array, or nothing
fn messages_from_value(value: Value) -> Vec<ConversationMessage> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut fields) => match fields.remove("data") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };
    items.into_iter().map(ConversationMessage::new).collect()
}

fn reports_already_ended(status: StatusCode, body: &str) -> bool {
    matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::NOT_FOUND | StatusCode::CONFLICT | StatusCode::GONE
    ) && body.to_lowercase().contains("ended")
}

fn ensure_success(response: RawResponse, endpoint: &str) -> Result<String, RemoteError> {
    if response.status.is_success() {
        Ok(response.body)
    } else {
        Err(status_error(response, endpoint))
    }
}

fn status_error(response: RawResponse, endpoint: &str) -> RemoteError {
    warn!(
        remote.endpoint = %endpoint,
        remote.status = response.status.as_u16(),
        "Conversational API returned an error status"
    );
    RemoteError::Status {
        endpoint: endpoint.to_owned(),
        status: response.status.as_u16(),
        body: response.body,
    }
}

fn decode<T: DeserializeOwned>(body: &str, context: &'static str) -> Result<T, RemoteError> {
    serde_json::from_str(body).map_err(|e| RemoteError::Decode { context, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_from_value_shapes() {
        let wrapped = messages_from_value(json!({"data": [{"text": "a"}, {"content": "b"}]}));
        assert_eq!(wrapped.len(), 2);

        let bare = messages_from_value(json!([{"text": "a"}]));
        assert_eq!(bare.len(), 1);

        assert!(messages_from_value(json!({"status": "ok"})).is_empty());
        assert!(messages_from_value(json!({"data": "nope"})).is_empty());
        assert!(messages_from_value(json!(7)).is_empty());
    }

    #[test]
    fn test_reports_already_ended() {
        assert!(reports_already_ended(
            StatusCode::BAD_REQUEST,
            r#"{"message": "Conversation has already Ended"}"#
        ));
        assert!(!reports_already_ended(StatusCode::BAD_REQUEST, "invalid id"));
        assert!(!reports_already_ended(
            StatusCode::INTERNAL_SERVER_ERROR,
            "ended"
        ));
    }

    #[test]
    fn test_endpoint_url_joins_segments() {
        let config = ApiConfig::new(
            "key",
            Url::parse("https://api.example.com/v2/").unwrap_or_else(|_| unreachable!()),
        );
        let client = TavusClient::new(config);
        let url = client
            .endpoint_url(&["conversations", "c 1", "messages"])
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(
            url.as_str(),
            "https://api.example.com/v2/conversations/c%201/messages"
        );
    }
}
