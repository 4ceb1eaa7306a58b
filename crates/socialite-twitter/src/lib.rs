//! # Socialite Twitter
//!
//! Twitter provider: OAuth 1.0a login and a REST API v1.1 session.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use socialite_core::{AppConfig, ProviderDescriptor, ProviderRegistry};
//! use socialite_twitter::{PROVIDER_ID, TwitterProvider};
//!
//! let provider = Arc::new(TwitterProvider::new());
//! provider
//! 	.configure(&AppConfig::new("key", "secret", "http://localhost:1515/auth/twitter/callback"))
//! 	.unwrap();
//!
//! let mut registry = ProviderRegistry::new();
//! registry.register(PROVIDER_ID, provider).unwrap();
//! ```

pub mod client;
pub mod errors;
pub mod mapper;
pub mod oauth;
pub mod session;
pub mod types;

use std::sync::OnceLock;
use std::time::Duration;

use socialite_core::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use socialite_core::flow::{OAuth1Client, OAuth1Endpoints, OAuth1Signer, OAuth1Token};
use socialite_core::utils::http::http_client;
use socialite_core::{
	AppConfig, Credentials, ErrorKind, OAuthFlow, ProviderDescriptor, ProviderError, ProviderResult,
	ProviderSession, RegistryError,
};

pub use client::TwitterClient;
pub use errors::{TwitterError, provider_error};
pub use oauth::TwitterOAuth;
pub use session::TwitterSession;

pub const PROVIDER_ID: &str = "twitter";

/// Where the provider sends its requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwitterEndpoints {
	pub request_token_url: String,
	pub authorize_url: String,
	pub access_token_url: String,
	/// REST API v1.1 root
	pub api_base: String,
}

impl Default for TwitterEndpoints {
	fn default() -> Self {
		Self {
			request_token_url: "https://api.twitter.com/oauth/request_token".into(),
			authorize_url: "https://api.twitter.com/oauth/authenticate".into(),
			access_token_url: "https://api.twitter.com/oauth/access_token".into(),
			api_base: "https://api.twitter.com/1.1".into(),
		}
	}
}

impl TwitterEndpoints {
	/// Every endpoint under `base`, using the public URL layout.
	pub fn with_base_url(base: &str) -> Self {
		let base = base.trim_end_matches('/');
		Self {
			request_token_url: format!("{}/oauth/request_token", base),
			authorize_url: format!("{}/oauth/authenticate", base),
			access_token_url: format!("{}/oauth/access_token", base),
			api_base: format!("{}/1.1", base),
		}
	}

	fn oauth1(&self) -> OAuth1Endpoints {
		OAuth1Endpoints {
			request_token_url: self.request_token_url.clone(),
			authorize_url: self.authorize_url.clone(),
			access_token_url: self.access_token_url.clone(),
		}
	}
}

/// Twitter provider descriptor.
pub struct TwitterProvider {
	app: OnceLock<AppConfig>,
	endpoints: TwitterEndpoints,
	timeout: Duration,
}

impl Default for TwitterProvider {
	fn default() -> Self {
		Self::new()
	}
}

impl TwitterProvider {
	pub fn new() -> Self {
		Self {
			app: OnceLock::new(),
			endpoints: TwitterEndpoints::default(),
			timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
		}
	}

	pub fn with_endpoints(mut self, endpoints: TwitterEndpoints) -> Self {
		self.endpoints = endpoints;
		self
	}

	/// Bound on every HTTP call made by flows and sessions.
	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn endpoints(&self) -> &TwitterEndpoints {
		&self.endpoints
	}

	fn app(&self) -> ProviderResult<&AppConfig> {
		self.app
			.get()
			.ok_or_else(|| ProviderError::new(ErrorKind::ProviderNotConfigured))
	}

	fn signer(&self) -> ProviderResult<OAuth1Signer> {
		let app = self.app()?;
		Ok(OAuth1Signer::new(&app.app_id, &app.app_secret))
	}
}

impl ProviderDescriptor for TwitterProvider {
	fn id(&self) -> &str {
		PROVIDER_ID
	}

	fn configure(&self, config: &AppConfig) -> Result<(), RegistryError> {
		if config.app_id.is_empty() || config.app_secret.is_empty() {
			return Err(RegistryError::InvalidConfig {
				provider: PROVIDER_ID.into(),
				reason: "app_id and app_secret are required".into(),
			});
		}
		self.app
			.set(config.clone())
			.map_err(|_| RegistryError::AlreadyConfigured(PROVIDER_ID.into()))
	}

	fn open_session(&self, credentials: &Credentials) -> ProviderResult<Box<dyn ProviderSession>> {
		let Credentials::OAuth1(creds) = credentials else {
			return Err(ProviderError::with_message(
				ErrorKind::NoCredentials,
				"twitter requires OAuth1 credentials",
			));
		};
		if creds.access_token.is_empty() || creds.access_token_secret.is_empty() {
			return Err(ProviderError::new(ErrorKind::NoCredentials));
		}

		let client = TwitterClient::new(
			self.signer()?,
			OAuth1Token::new(&creds.access_token, &creds.access_token_secret),
			&self.endpoints.api_base,
			http_client(self.timeout)?,
		);
		Ok(Box::new(TwitterSession::new(client)))
	}

	fn new_oauth(&self) -> ProviderResult<Box<dyn OAuthFlow>> {
		let app = self.app()?;
		let client = OAuth1Client::new(self.signer()?, self.endpoints.oauth1(), http_client(self.timeout)?);
		Ok(Box::new(TwitterOAuth::new(client, &app.oauth_callback)))
	}
}
