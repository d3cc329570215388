// ABOUTME: Lead records captured from conversation transcripts
// ABOUTME: Covers parser output, the insert payload, and the persisted immutable row
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Surrogate key assigned by the lead store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(i64);

impl LeadId {
    /// Wrap a raw row id
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw row id
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fields recovered from a transcript by the lead parser
///
/// Both fields are best-effort and independent of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLead {
    /// Name from a self-introduction phrase
    pub name: Option<String>,
    /// First email-shaped token
    pub email: Option<String>,
}

impl ParsedLead {
    /// Neither field was found
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

/// A lead ready to be inserted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    /// Originating conversation, when known
    pub conversation_id: Option<String>,
    /// Captured name
    pub name: Option<String>,
    /// Captured email
    pub email: Option<String>,
    /// Captured phone number
    pub phone: Option<String>,
    /// Captured company
    pub company: Option<String>,
    /// How the lead was captured (e.g. `"transcript"`)
    pub source: String,
    /// Open bag for parser metadata
    pub extra: Map<String, Value>,
}

impl NewLead {
    /// Build an insert payload from parser output
    #[must_use]
    pub fn from_parsed(
        conversation_id: Option<String>,
        parsed: ParsedLead,
        source: impl Into<String>,
    ) -> Self {
        Self {
            conversation_id,
            name: parsed.name,
            email: parsed.email,
            source: source.into(),
            ..Self::default()
        }
    }

    /// Attach a metadata entry
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

/// A persisted lead; never updated once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Store-assigned identifier
    pub id: LeadId,
    /// Originating conversation (not unique across leads)
    pub conversation_id: Option<String>,
    /// Captured name
    pub name: Option<String>,
    /// Captured email
    pub email: Option<String>,
    /// Captured phone number
    pub phone: Option<String>,
    /// Captured company
    pub company: Option<String>,
    /// Capture source; empty for rows written before the column existed
    pub source: Option<String>,
    /// Parser metadata
    pub extra: Map<String, Value>,
    /// When the store persisted the row (UTC)
    pub created_at: DateTime<Utc>,
}
