//! Client configuration
//!
//! Everything the client needs to reach the trading service is carried
//! explicitly here; nothing is hardcoded at call sites.

use std::time::Duration;

/// Default base URL of the trading service
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Default account identifier
pub const DEFAULT_ACCOUNT_ID: &str = "usr_001";

/// Tick interval shared by the portfolio and trade-feed engines
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Bound on any single request to the service
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Connection settings for the trading service
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the trading service, without a trailing slash
    pub base_url: String,
    /// Account whose state is synchronized
    pub account_id: String,
    /// Interval between sync ticks, measured from tick completion
    pub poll_interval: Duration,
    /// Per-request timeout enforced by the transport
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            account_id: DEFAULT_ACCOUNT_ID.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
