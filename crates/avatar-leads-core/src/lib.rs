// ABOUTME: Core types and constants for the avatar lead-capture toolkit
// ABOUTME: Foundation crate with error handling, domain models, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Avatar Leads Core
//!
//! Foundation crate shared by the lead-capture library and its binary. It holds
//! the types that cross component boundaries and has no HTTP or database
//! dependency.
//!
//! ## Modules
//!
//! - **errors**: `AppError`/`ErrorCode` plus the `RemoteError` and `ConfigError` taxonomies
//! - **models**: leads, conversation messages, and remote persona/document/conversation records
//! - **constants**: environment keys, defaults, and wire field names

/// Unified error handling with error codes and domain-specific errors
pub mod errors;

/// Domain models for leads and the remote conversational API
pub mod models;

/// Application constants organized by domain
pub mod constants;
