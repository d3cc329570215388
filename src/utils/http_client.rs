// ABOUTME: Shared HTTP client builders with connection pooling and timeout configuration
// ABOUTME: Gives the remote API client and the webhook forwarder bounded request times

use avatar_leads_core::constants::defaults;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::warn;

/// Build an HTTP client with custom timeout settings
///
/// # Errors
///
/// Returns the builder error when the TLS backend cannot be initialised
pub fn try_create_client(timeout: Duration, connect_timeout: Duration) -> reqwest::Result<Client> {
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout.min(timeout))
        .user_agent(concat!("avatar-leads/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Create a new HTTP client with custom timeout settings
///
/// Every outbound call made by this crate goes through a client built here,
/// so no request can block longer than `timeout`.
///
/// # Arguments
/// * `timeout` - Whole-request timeout
/// * `connect_timeout` - Connection establishment timeout
///
/// # Returns
/// A new `reqwest::Client`. If the builder fails, a default client is returned
/// and the lost timeout is reported at `warn` level.
#[must_use]
pub fn create_client_with_timeout(timeout: Duration, connect_timeout: Duration) -> Client {
    try_create_client(timeout, connect_timeout).unwrap_or_else(|e| {
        warn!(
            error = %e,
            http.timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            "HTTP client builder failed, falling back to a client without request timeout"
        );
        Client::new()
    })
}

/// Client for the conversational API
#[must_use]
pub fn api_client(timeout: Duration) -> Client {
    create_client_with_timeout(
        timeout,
        Duration::from_secs(defaults::CONNECT_TIMEOUT_SECS),
    )
}

/// Client for best-effort webhook delivery
///
/// The connect timeout never exceeds the (short) request timeout, so an
/// unreachable sink fails fast.
#[must_use]
pub fn webhook_client(timeout: Duration) -> Client {
    create_client_with_timeout(timeout, timeout)
}
