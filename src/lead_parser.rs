// ABOUTME: Heuristic extraction of a contact name and email from transcript text
// ABOUTME: Regex-based, first-match-wins, with a configurable strictness level
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Lead parser
//!
//! Names are recovered from self-introductions ("my name is ...", "I'm ...")
//! and emails from the first `local@domain.tld`-shaped token. The two
//! extractions are independent; either may be absent without the other
//! being affected, and no input is ever an error.

use avatar_leads_core::models::ParsedLead;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Words kept from a name under [`ParserStrictness::Strict`]
const STRICT_MAX_NAME_WORDS: usize = 3;
/// RFC 5321 limit on the local part
const STRICT_MAX_LOCAL_LEN: usize = 64;
/// RFC 5321 limit on a whole address
const STRICT_MAX_EMAIL_LEN: usize = 254;
/// RFC 1035 limit on a DNS label
const STRICT_MAX_LABEL_LEN: usize = 63;

/// How aggressively candidate matches are filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParserStrictness {
    /// Take the first raw match of each pattern
    #[default]
    Lenient,
    /// Trim names to leading capitalised words and bound email lengths
    Strict,
}

impl ParserStrictness {
    /// Lower-case label used in config and lead metadata
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lenient => "lenient",
            Self::Strict => "strict",
        }
    }
}

impl fmt::Display for ParserStrictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParserStrictness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" | "default" => Ok(Self::Lenient),
            "strict" => Ok(Self::Strict),
            other => Err(format!("unknown parser strictness '{other}'")),
        }
    }
}

/// Extracts a [`ParsedLead`] from transcript text
#[derive(Debug, Clone, Copy, Default)]
pub struct LeadParser {
    strictness: ParserStrictness,
}

impl LeadParser {
    /// Create a parser with the given strictness
    #[must_use]
    pub const fn new(strictness: ParserStrictness) -> Self {
        Self { strictness }
    }

    /// Strictness this parser applies
    #[must_use]
    pub const fn strictness(&self) -> ParserStrictness {
        self.strictness
    }

    /// Parse a transcript into name and email
    #[must_use]
    pub fn parse(&self, transcript: &str) -> ParsedLead {
        ParsedLead {
            name: self.extract_name(transcript),
            email: self.extract_email(transcript),
        }
    }

    /// First self-introduced name in the text
    #[must_use]
    pub fn extract_name(&self, transcript: &str) -> Option<String> {
        let regex = name_regex()?;
        regex
            .captures_iter(transcript)
            .filter_map(|caps| caps.get(1))
            .find_map(|run| match self.strictness {
                ParserStrictness::Lenient => non_empty(run.as_str().trim()),
                ParserStrictness::Strict => strict_name(run.as_str()),
            })
    }

    /// First email-shaped token in the text
    #[must_use]
    pub fn extract_email(&self, transcript: &str) -> Option<String> {
        let regex = email_regex()?;
        let mut candidates = regex.find_iter(transcript).map(|m| m.as_str());
        match self.strictness {
            ParserStrictness::Lenient => candidates.next().map(ToOwned::to_owned),
            ParserStrictness::Strict => candidates
                .find(|candidate| within_strict_bounds(candidate))
                .map(ToOwned::to_owned),
        }
    }
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

fn strict_name(run: &str) -> Option<String> {
    let words: Vec<&str> = run
        .split_whitespace()
        .take_while(|word| word.chars().next().is_some_and(char::is_uppercase))
        .take(STRICT_MAX_NAME_WORDS)
        .collect();
    non_empty(&words.join(" "))
}

fn within_strict_bounds(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    email.len() <= STRICT_MAX_EMAIL_LEN
        && local.len() <= STRICT_MAX_LOCAL_LEN
        && domain
            .split('.')
            .all(|label| !label.is_empty() && label.len() <= STRICT_MAX_LABEL_LEN)
}

/// Self-introduction phrase followed by a run of letters and spaces
fn name_regex() -> Option<&'static Regex> {
    static NAME_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    NAME_REGEX
        .get_or_init(|| Regex::new(r"(?i)\b(?:my\s+name\s+is|i['’]m)\s+([\p{Alphabetic} ]+)").ok())
        .as_ref()
}

/// Conservative `local@domain.tld` token shape
fn email_regex() -> Option<&'static Regex> {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"[\w.%+-]+@(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}").ok())
        .as_ref()
}
