// ABOUTME: Integration tests for the SQLite lead store
// ABOUTME: Covers append-only inserts, listings, metadata round trips, and additive migration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use avatar_leads::database::LeadStore;
use avatar_leads::models::{LeadId, NewLead, ParsedLead};
use serde_json::json;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tempfile::TempDir;

fn sample_lead(conversation_id: &str) -> NewLead {
    NewLead::from_parsed(
        Some(conversation_id.to_owned()),
        ParsedLead {
            name: Some("Alice".to_owned()),
            email: Some("alice@example.com".to_owned()),
        },
        "transcript",
    )
    .with_extra("parsed", true)
}

#[tokio::test]
async fn test_identical_inserts_get_distinct_ids() {
    let store = common::create_test_store().await;
    let lead = sample_lead("c1");

    let first = store.save_lead(&lead).await.unwrap();
    let second = store.save_lead(&lead).await.unwrap();

    assert_ne!(first, second);
    assert!(second > first);
    assert_eq!(store.count_leads().await.unwrap(), 2);
    assert_eq!(store.leads_for_conversation("c1").await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_stored_lead_round_trip() {
    let store = common::create_test_store().await;
    let mut lead = sample_lead("c2").with_extra("strictness", "lenient");
    lead.phone = Some("+1 555 0100".to_owned());
    lead.company = Some("Acme".to_owned());

    let id = store.save_lead(&lead).await.unwrap();
    let stored = store.get_lead(id).await.unwrap().unwrap();

    assert_eq!(stored.id, id);
    assert_eq!(stored.conversation_id.as_deref(), Some("c2"));
    assert_eq!(stored.name.as_deref(), Some("Alice"));
    assert_eq!(stored.email.as_deref(), Some("alice@example.com"));
    assert_eq!(stored.phone.as_deref(), Some("+1 555 0100"));
    assert_eq!(stored.company.as_deref(), Some("Acme"));
    assert_eq!(stored.source.as_deref(), Some("transcript"));
    assert_eq!(stored.extra.get("parsed"), Some(&json!(true)));
    assert_eq!(stored.extra.get("strictness"), Some(&json!("lenient")));
}

#[tokio::test]
async fn test_lead_without_fields_is_stored() {
    let store = common::create_test_store().await;
    let lead = NewLead::from_parsed(None, ParsedLead::default(), "transcript");

    let id = store.save_lead(&lead).await.unwrap();
    let stored = store.get_lead(id).await.unwrap().unwrap();

    assert_eq!(stored.conversation_id, None);
    assert_eq!(stored.name, None);
    assert_eq!(stored.email, None);
    assert!(stored.extra.is_empty());
}

#[tokio::test]
async fn test_missing_lead_is_none() {
    let store = common::create_test_store().await;
    assert!(store.get_lead(LeadId::new(42)).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_leads_newest_first_with_limit() {
    let store = common::create_test_store().await;
    for conversation in ["c1", "c2", "c3"] {
        store.save_lead(&sample_lead(conversation)).await.unwrap();
    }

    let latest = store.list_leads(2).await.unwrap();

    let conversations: Vec<_> = latest
        .iter()
        .map(|lead| lead.conversation_id.as_deref().unwrap())
        .collect();
    assert_eq!(conversations, vec!["c3", "c2"]);
}

#[tokio::test]
async fn test_schema_has_every_column() {
    let store = common::create_test_store().await;
    let columns = store.column_names().await.unwrap();
    for expected in [
        "id",
        "conversation_id",
        "name",
        "email",
        "created_at",
        "phone",
        "company",
        "source",
        "extra",
    ] {
        assert!(columns.iter().any(|c| c == expected), "missing {expected}");
    }
}

#[tokio::test]
async fn test_additive_migration_keeps_legacy_rows() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("leads.db").display());

    // Database as written before phone/company/source/extra existed
    let legacy = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(
            SqliteConnectOptions::from_str(&url)
                .unwrap()
                .create_if_missing(true),
        )
        .await
        .unwrap();
    sqlx::query(
        "CREATE TABLE leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            conversation_id TEXT,
            name TEXT,
            email TEXT,
            created_at TEXT NOT NULL
        )",
    )
    .execute(&legacy)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO leads (conversation_id, name, email, created_at)
         VALUES ('old-conv', 'Legacy', 'legacy@example.com', '2024-05-01 12:00:00')",
    )
    .execute(&legacy)
    .await
    .unwrap();
    legacy.close().await;

    let store = LeadStore::new(&url).await.unwrap();

    let columns = store.column_names().await.unwrap();
    for added in ["phone", "company", "source", "extra"] {
        assert!(columns.iter().any(|c| c == added), "missing {added}");
    }

    let old = store.leads_for_conversation("old-conv").await.unwrap();
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].name.as_deref(), Some("Legacy"));
    assert_eq!(old[0].source, None);
    assert_eq!(old[0].phone, None);
    assert!(old[0].extra.is_empty());
    assert_eq!(old[0].created_at.to_rfc3339(), "2024-05-01T12:00:00+00:00");

    let new_id = store.save_lead(&sample_lead("new-conv")).await.unwrap();
    assert!(new_id > old[0].id);
}

#[tokio::test]
async fn test_reopening_migrated_store_is_idempotent() {
    common::init_test_logging();
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("leads.db").display());

    let first = LeadStore::new(&url).await.unwrap();
    first.save_lead(&sample_lead("c1")).await.unwrap();
    first.pool().close().await;

    let reopened = LeadStore::new(&url).await.unwrap();
    reopened.migrate().await.unwrap();

    assert_eq!(reopened.count_leads().await.unwrap(), 1);
}
