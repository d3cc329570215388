// ABOUTME: Integration tests for environment configuration loading
// ABOUTME: Covers defaults, required keys, validation failures, and conversation defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use avatar_leads::config::{AppConfig, CaptureConfig};
use avatar_leads::errors::{AppError, ConfigError, ErrorCode};
use avatar_leads::lead_parser::ParserStrictness;
use serial_test::serial;
use std::collections::HashMap;
use std::env;
use std::time::Duration;

fn load(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn test_defaults_with_only_api_key() {
    let config = load(&[("API_KEY", "secret")]).unwrap();

    assert_eq!(config.api.api_key, "secret");
    assert_eq!(config.api.base_url.as_str(), "https://tavusapi.com/v2");
    assert_eq!(config.api.timeout, Duration::from_secs(30));
    assert!(config.webhook.url.is_none());
    assert_eq!(config.webhook.timeout, Duration::from_secs(10));
    assert_eq!(config.defaults.replica_id, "rfe12d8b9597");
    assert!(config.defaults.persona_id.is_none());
    assert_eq!(config.database_url, "sqlite:leads.db");
    assert_eq!(config.parser_strictness, ParserStrictness::Lenient);
}

#[test]
fn test_missing_api_key() {
    let err = load(&[]).unwrap_err();
    assert_eq!(err, ConfigError::Missing { key: "API_KEY" });

    let blank = load(&[("API_KEY", "   ")]).unwrap_err();
    assert_eq!(blank, ConfigError::Missing { key: "API_KEY" });

    let app_error = AppError::from(err);
    assert_eq!(app_error.code, ErrorCode::ConfigMissing);
}

#[test]
fn test_capture_config_needs_no_api_key() {
    let vars: HashMap<&str, &str> = [
        ("LEAD_WEBHOOK_URL", "https://hooks.example.com/leads"),
        ("LEAD_PARSER_STRICTNESS", "strict"),
        ("DATABASE_URL", "sqlite:/tmp/capture.db"),
    ]
    .into_iter()
    .collect();

    let config =
        CaptureConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_owned())).unwrap();

    assert_eq!(
        config.webhook.url.as_ref().map(url::Url::as_str),
        Some("https://hooks.example.com/leads")
    );
    assert_eq!(config.parser_strictness, ParserStrictness::Strict);
    assert_eq!(config.database_url, "sqlite:/tmp/capture.db");

    let defaults = CaptureConfig::from_lookup(|_| None).unwrap();
    assert!(defaults.webhook.url.is_none());
    assert_eq!(defaults.database_url, "sqlite:leads.db");
    assert_eq!(defaults.parser_strictness, ParserStrictness::Lenient);
}

#[test]
fn test_capture_config_matches_full_config() {
    let full = load(&[("API_KEY", "secret"), ("LEAD_WEBHOOK_TIMEOUT_SECS", "3")]).unwrap();
    let capture = full.capture();
    assert_eq!(capture.webhook.timeout, Duration::from_secs(3));
    assert_eq!(capture.database_url, full.database_url);
}

#[test]
fn test_fallback_api_key_name() {
    let config = load(&[("TAVUS_API_KEY", "fallback")]).unwrap();
    assert_eq!(config.api.api_key, "fallback");
}

#[test]
fn test_full_configuration() {
    let config = load(&[
        ("API_KEY", "secret"),
        ("TAVUS_BASE_URL", "http://localhost:9000/v2"),
        ("TAVUS_TIMEOUT_SECS", "12"),
        ("LEAD_WEBHOOK_URL", "https://hooks.example.com/leads"),
        ("LEAD_WEBHOOK_TIMEOUT_SECS", "3"),
        ("TAVUS_REPLICA_ID", "r-custom"),
        ("TAVUS_PERSONA_ID", "p-123"),
        ("TAVUS_CALLBACK_URL", "https://app.example.com/events"),
        ("DATABASE_URL", "sqlite::memory:"),
        ("LEAD_PARSER_STRICTNESS", "strict"),
    ])
    .unwrap();

    assert_eq!(config.api.timeout, Duration::from_secs(12));
    assert_eq!(
        config.webhook.url.as_ref().map(url::Url::as_str),
        Some("https://hooks.example.com/leads")
    );
    assert_eq!(config.webhook.timeout, Duration::from_secs(3));
    assert_eq!(config.database_url, "sqlite::memory:");
    assert_eq!(config.parser_strictness, ParserStrictness::Strict);

    let request = config.defaults.conversation_request(None).unwrap();
    assert_eq!(request.persona_id, "p-123");
    assert_eq!(request.replica_id, "r-custom");
    assert_eq!(
        request.callback_url.as_deref(),
        Some("https://app.example.com/events")
    );
}

#[test]
fn test_invalid_values_are_rejected() {
    for (key, value) in [
        ("LEAD_WEBHOOK_URL", "not a url"),
        ("TAVUS_BASE_URL", "ftp://example.com"),
        ("TAVUS_TIMEOUT_SECS", "0"),
        ("LEAD_WEBHOOK_TIMEOUT_SECS", "ten"),
        ("LEAD_PARSER_STRICTNESS", "paranoid"),
    ] {
        let err = load(&[("API_KEY", "secret"), (key, value)]).unwrap_err();
        assert!(
            matches!(&err, ConfigError::Invalid { key: k, .. } if *k == key),
            "{key}={value} gave {err:?}"
        );
    }
}

#[test]
fn test_persona_required_for_conversation() {
    let config = load(&[("API_KEY", "secret")]).unwrap();

    assert_eq!(
        config.defaults.require_persona_id().unwrap_err(),
        ConfigError::Missing {
            key: "TAVUS_PERSONA_ID"
        }
    );
    let request = config.defaults.conversation_request(Some("p-override")).unwrap();
    assert_eq!(request.persona_id, "p-override");
    assert!(request.callback_url.is_none());
}

#[test]
fn test_debug_output_hides_api_key() {
    let config = load(&[("API_KEY", "super-secret-value")]).unwrap();
    assert!(!format!("{config:?}").contains("super-secret-value"));
}

#[test]
#[serial]
fn test_from_process_environment() {
    env::set_var("API_KEY", "from-env");
    env::set_var("LEAD_PARSER_STRICTNESS", "strict");
    env::remove_var("TAVUS_PERSONA_ID");

    let config = AppConfig::from_env().unwrap();

    assert_eq!(config.api.api_key, "from-env");
    assert_eq!(config.parser_strictness, ParserStrictness::Strict);

    env::remove_var("API_KEY");
    env::remove_var("LEAD_PARSER_STRICTNESS");
}

#[test]
#[serial]
fn test_database_url_from_env() {
    env::set_var("DATABASE_URL", "sqlite:/tmp/other.db");
    assert_eq!(AppConfig::database_url_from_env(), "sqlite:/tmp/other.db");

    env::remove_var("DATABASE_URL");
    assert_eq!(AppConfig::database_url_from_env(), "sqlite:leads.db");
}
