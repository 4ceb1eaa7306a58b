//! HTTP client construction for provider calls

use std::time::Duration;

use reqwest::Client;

use crate::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use crate::error::{ProviderError, ProviderResult};

const USER_AGENT: &str = concat!("socialite/", env!("CARGO_PKG_VERSION"));

/// Client with every request bounded by `timeout`.
pub fn http_client(timeout: Duration) -> ProviderResult<Client> {
	Client::builder()
		.timeout(timeout)
		.user_agent(USER_AGENT)
		.build()
		.map_err(ProviderError::unknown)
}

/// Client with the default timeout.
pub fn default_http_client() -> ProviderResult<Client> {
	http_client(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
}
