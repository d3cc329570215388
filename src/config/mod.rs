// ABOUTME: Configuration management module for the lead-capture toolkit
// ABOUTME: Exposes the environment-sourced AppConfig and its per-component sections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Environment configuration
pub mod environment;

pub use environment::{ApiConfig, AppConfig, CaptureConfig, ConversationDefaults, WebhookConfig};
