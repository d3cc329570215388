// ABOUTME: Shared helpers for the avatar-leads CLI
// ABOUTME: Component wiring from configuration and console output formatting

pub mod context;
pub mod display;
