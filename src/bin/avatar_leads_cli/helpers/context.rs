// ABOUTME: Builds core components from environment configuration for CLI commands
// ABOUTME: Applies the --database-url override before the store is opened; local capture needs no API key

use avatar_leads::capture::LeadCaptureService;
use avatar_leads::config::{AppConfig, CaptureConfig};
use avatar_leads::database::LeadStore;
use avatar_leads::errors::AppResult;
use avatar_leads::lead_parser::LeadParser;
use avatar_leads::remote::TavusClient;
use avatar_leads::transcript::TranscriptExtractor;
use avatar_leads::webhook::WebhookForwarder;
use std::sync::Arc;

/// Full configuration, with the store URL override applied
pub fn load_config(database_url: Option<String>) -> AppResult<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(url) = database_url {
        config.database_url = url;
    }
    config.log_summary();
    Ok(config)
}

/// Remote client for `config`
pub fn api_client(config: &AppConfig) -> Arc<TavusClient> {
    Arc::new(TavusClient::new(config.api.clone()))
}

/// Capture pipeline wired to the remote API, the store, and the webhook
pub async fn capture_service(
    config: &AppConfig,
    extractor: TranscriptExtractor,
) -> AppResult<LeadCaptureService> {
    let store = LeadStore::new(&config.database_url).await?;
    Ok(LeadCaptureService::new(
        extractor,
        LeadParser::new(config.parser_strictness),
        store,
        WebhookForwarder::new(&config.webhook),
    ))
}

/// Capture settings alone, with the store URL override applied; no API key needed
pub fn load_capture_config(database_url: Option<String>) -> AppResult<CaptureConfig> {
    let mut config = CaptureConfig::from_env()?;
    if let Some(url) = database_url {
        config.database_url = url;
    }
    config.log_summary();
    Ok(config)
}

/// Capture pipeline for transcripts read locally, without the remote API
pub async fn local_capture_service(config: &CaptureConfig) -> AppResult<LeadCaptureService> {
    let store = LeadStore::new(&config.database_url).await?;
    Ok(LeadCaptureService::without_remote(
        LeadParser::new(config.parser_strictness),
        store,
        WebhookForwarder::new(&config.webhook),
    ))
}
