// ABOUTME: Main library entry point for conversational-avatar lead capture
// ABOUTME: Provides the remote API client, transcript extraction, lead parsing, storage, and forwarding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Avatar Leads
//!
//! Client and lead-capture core for a third-party conversational-avatar
//! service. Visitors talk to a persona in a video conversation; afterwards
//! the conversation's transcript is fetched, a name and email are pulled out
//! of it, the lead is stored locally, and it is relayed to a webhook.
//!
//! ## Architecture
//!
//! - **Remote**: [`remote::ConversationApi`] and its HTTP client
//! - **Transcript**: flattens remote messages into plain text
//! - **Lead parser**: regex extraction of name and email
//! - **Database**: append-only SQLite lead store with additive migrations
//! - **Webhook**: best-effort forwarding of captured leads
//! - **Capture**: the pipeline tying the above together
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use avatar_leads::capture::LeadCaptureService;
//! use avatar_leads::config::AppConfig;
//! use avatar_leads::database::LeadStore;
//! use avatar_leads::errors::AppResult;
//! use avatar_leads::lead_parser::LeadParser;
//! use avatar_leads::remote::TavusClient;
//! use avatar_leads::transcript::TranscriptExtractor;
//! use avatar_leads::webhook::WebhookForwarder;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::from_env()?;
//!     let api = Arc::new(TavusClient::new(config.api.clone()));
//!     let service = LeadCaptureService::new(
//!         TranscriptExtractor::new(api),
//!         LeadParser::new(config.parser_strictness),
//!         LeadStore::new(&config.database_url).await?,
//!         WebhookForwarder::new(&config.webhook),
//!     );
//!
//!     let outcome = service.capture_from_conversation("c123").await?;
//!     println!("stored lead {}", outcome.lead.id);
//!     Ok(())
//! }
//! ```

/// Lead capture pipeline
pub mod capture;

/// Environment configuration
pub mod config;

/// SQLite lead store
pub mod database;

/// Name and email extraction from transcripts
pub mod lead_parser;

/// Structured logging setup
pub mod logging;

/// Find-or-create provisioning of the document and persona
pub mod provisioning;

/// Conversational API abstraction and HTTP client
pub mod remote;

/// Transcript extraction
pub mod transcript;

/// HTTP client builders and log redaction
pub mod utils;

/// Lead webhook forwarding
pub mod webhook;

pub use avatar_leads_core::{constants, errors, models};
