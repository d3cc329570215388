// ABOUTME: PII masking helpers for log output
// ABOUTME: Masks captured email addresses so leads never appear raw in logs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;
use std::sync::OnceLock;

/// Mask email addresses for PII protection
///
/// Every email-shaped token is masked the way [`mask_address`] masks a known
/// address. Text without an email is returned unchanged.
#[must_use]
pub fn mask_email(text: &str) -> String {
    email_regex().map_or_else(
        || text.to_owned(),
        |regex| {
            regex
                .replace_all(text, |caps: &regex::Captures| mask_address(&caps[0]))
                .into_owned()
        },
    )
}

/// Mask an optional email for a structured log field
#[must_use]
pub fn mask_optional_email(email: Option<&str>) -> String {
    email.map_or_else(|| "none".to_owned(), mask_address)
}

/// Mask a single known address without re-scanning it
///
/// Keeps the first character of the local part and of the first domain label,
/// e.g. `john@acme.co` becomes `j***@a***.co`. One-character parts become `*`.
/// Input without an `@` is masked whole.
#[must_use]
pub fn mask_address(email: &str) -> String {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return first_char_masked(email.trim());
    };

    let masked_domain = domain.split_once('.').map_or_else(
        || first_char_masked(domain),
        |(label, rest)| format!("{}.{rest}", first_char_masked(label)),
    );

    format!("{}@{masked_domain}", first_char_masked(local))
}

fn first_char_masked(part: &str) -> String {
    let mut chars = part.chars();
    match (chars.next(), chars.next()) {
        (Some(first), Some(_)) => format!("{first}***"),
        (Some(_), None) => "*".to_owned(),
        (None, _) => String::new(),
    }
}

/// Get compiled email regex (cached)
///
/// Returns None if regex compilation fails (should never happen with hardcoded pattern)
fn email_regex() -> Option<&'static Regex> {
    static EMAIL_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL_REGEX
        .get_or_init(|| Regex::new(r"[\w.%+-]+@[\w.-]+\.\w{2,}").ok())
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("john@acme.co"), "j***@a***.co");
        assert_eq!(
            mask_email("reach foo.bar@example.com today"),
            "reach f***@e***.com today"
        );
        assert_eq!(mask_email("no email here"), "no email here");
        assert_eq!(mask_email("write to josé@acme.co"), "write to j***@a***.co");
    }

    #[test]
    fn test_mask_optional_email() {
        assert_eq!(mask_optional_email(None), "none");
        assert_eq!(mask_optional_email(Some("john@acme.co")), "j***@a***.co");
    }

    #[test]
    fn test_single_character_parts_are_masked() {
        assert_eq!(mask_address("a@b.io"), "*@*.io");
        assert_eq!(mask_optional_email(Some("a@acme.co")), "*@a***.co");
    }

    #[test]
    fn test_non_ascii_address_is_masked() {
        assert_eq!(mask_address("josé@acme.co"), "j***@a***.co");
        assert_eq!(mask_address("ñ@exämple.de"), "*@e***.de");
    }
}
