// ABOUTME: Constants for environment keys, remote API defaults, and wire field names
// ABOUTME: Grouped by domain so configuration and parsing share one source of truth
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment variable names read by `AppConfig::from_env`
pub mod env_keys {
    /// Secret key for the conversational API
    pub const API_KEY: &str = "API_KEY";
    /// Alternate name for the API key
    pub const API_KEY_FALLBACK: &str = "TAVUS_API_KEY";
    /// Base URL override for the conversational API
    pub const API_BASE_URL: &str = "TAVUS_BASE_URL";
    /// Request timeout for the conversational API, in seconds
    pub const API_TIMEOUT_SECS: &str = "TAVUS_TIMEOUT_SECS";
    /// Destination for captured leads
    pub const WEBHOOK_URL: &str = "LEAD_WEBHOOK_URL";
    /// Webhook delivery timeout, in seconds
    pub const WEBHOOK_TIMEOUT_SECS: &str = "LEAD_WEBHOOK_TIMEOUT_SECS";
    /// Default replica used when starting conversations
    pub const REPLICA_ID: &str = "TAVUS_REPLICA_ID";
    /// Default persona used when starting conversations
    pub const PERSONA_ID: &str = "TAVUS_PERSONA_ID";
    /// Callback URL the remote service pushes conversation events to
    pub const CALLBACK_URL: &str = "TAVUS_CALLBACK_URL";
    /// Lead store location
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Lead parser strictness (`lenient` or `strict`)
    pub const PARSER_STRICTNESS: &str = "LEAD_PARSER_STRICTNESS";
}

/// Defaults applied when the environment is silent
pub mod defaults {
    /// Public endpoint of the conversational API
    pub const API_BASE_URL: &str = "https://tavusapi.com/v2";
    /// Finite timeout for conversational API calls
    pub const API_TIMEOUT_SECS: u64 = 30;
    /// Connect timeout shared by all outbound clients
    pub const CONNECT_TIMEOUT_SECS: u64 = 10;
    /// Webhook calls must not stall lead capture
    pub const WEBHOOK_TIMEOUT_SECS: u64 = 10;
    /// Stock replica used by the demo front-end
    pub const REPLICA_ID: &str = "rfe12d8b9597";
    /// Local lead store
    pub const DATABASE_URL: &str = "sqlite:leads.db";
    /// Persona pipeline mode sent on creation
    pub const PIPELINE_MODE: &str = "full";
}

/// Field names used on the remote API wire format
pub mod wire {
    /// Header carrying the per-deployment secret
    pub const API_KEY_HEADER: &str = "x-api-key";

    /// Candidate fields holding a message's text, checked in order
    pub const MESSAGE_TEXT_FIELDS: [&str; 4] = ["text", "content", "message", "transcript"];

    /// String fields that may hold a whole transcript on a conversation payload
    pub const PAYLOAD_TRANSCRIPT_FIELDS: [&str; 3] =
        ["transcript", "full_transcript", "conversation_transcript"];

    /// Array fields that may hold the message list on a conversation payload
    pub const PAYLOAD_MESSAGE_FIELDS: [&str; 2] = ["messages", "transcript"];
}

/// Lead capture vocabulary
pub mod leads {
    /// Source tag for leads parsed from a conversation transcript
    pub const SOURCE_TRANSCRIPT: &str = "transcript";
    /// Name of the backing table
    pub const TABLE: &str = "leads";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Binary and log service name
    pub const AVATAR_LEADS: &str = "avatar-leads";
}
