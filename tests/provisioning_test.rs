// ABOUTME: Integration tests for find-or-create persona provisioning
// ABOUTME: Verifies reuse of existing resources and creation order against a fake API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use avatar_leads::provisioning::{provision_persona, ProvisioningPlan};
use common::FakeConversationApi;

fn plan() -> ProvisioningPlan {
    ProvisioningPlan {
        document_name: "Knowledge Base v1".to_owned(),
        document_url: "https://example.com/kb.txt".to_owned(),
        persona_name: "Assistant v1".to_owned(),
        system_prompt: "Ask for the visitor's name, then their email.".to_owned(),
    }
}

#[tokio::test]
async fn test_fresh_account_creates_both() {
    common::init_test_logging();
    let api = FakeConversationApi::new();

    let result = provision_persona(&api, &plan()).await.unwrap();

    assert!(result.document_created);
    assert!(result.persona_created);
    assert_eq!(result.document_id, "doc-1");
    assert_eq!(result.persona_id, "p-1");

    let personas = api.personas.lock().unwrap().clone();
    assert_eq!(
        personas[0].document_ids.as_deref(),
        Some(&["doc-1".to_owned()][..])
    );
}

#[tokio::test]
async fn test_rerun_creates_nothing() {
    common::init_test_logging();
    let api = FakeConversationApi::new();

    let first = provision_persona(&api, &plan()).await.unwrap();
    let second = provision_persona(&api, &plan()).await.unwrap();

    assert_eq!(first.persona_id, second.persona_id);
    assert_eq!(first.document_id, second.document_id);
    assert!(!second.document_created);
    assert!(!second.persona_created);
    assert_eq!(
        api.calls()
            .iter()
            .filter(|call| call.starts_with("create_"))
            .count(),
        2
    );
}

#[tokio::test]
async fn test_existing_document_new_persona() {
    common::init_test_logging();
    let api = FakeConversationApi::new().with_document("d-existing", "Knowledge Base v1");

    let result = provision_persona(&api, &plan()).await.unwrap();

    assert_eq!(result.document_id, "d-existing");
    assert!(!result.document_created);
    assert!(result.persona_created);
    assert_eq!(
        api.calls(),
        vec![
            "find_document:Knowledge Base v1".to_owned(),
            "find_persona:Assistant v1".to_owned(),
            "create_persona:Assistant v1".to_owned(),
        ]
    );
}

#[tokio::test]
async fn test_existing_persona_is_reused() {
    common::init_test_logging();
    let api = FakeConversationApi::new()
        .with_document("d-1", "Knowledge Base v1")
        .with_persona("p-9", "Assistant v1");

    let result = provision_persona(&api, &plan()).await.unwrap();

    assert_eq!(result.persona_id, "p-9");
    assert!(!result.persona_created);
}
