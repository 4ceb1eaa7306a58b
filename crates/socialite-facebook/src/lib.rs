//! # Socialite Facebook
//!
//! Facebook provider: OAuth 2.0 login (including Page tokens) and a Graph
//! API session.

pub mod client;
pub mod errors;
pub mod mapper;
pub mod oauth;
pub mod session;
pub mod types;

use std::sync::OnceLock;
use std::time::Duration;

use chrono::Utc;
use socialite_core::config::DEFAULT_REQUEST_TIMEOUT_SECS;
use socialite_core::flow::{OAuth2Config, OAuth2Flow};
use socialite_core::utils::http::http_client;
use socialite_core::{
	AppConfig, Credentials, ErrorKind, OAuthFlow, ProviderDescriptor, ProviderError, ProviderResult,
	ProviderSession, RegistryError,
};

pub use client::{GRAPH_API_VERSION, GraphClient};
pub use errors::{FacebookError, provider_error};
pub use oauth::FacebookOAuth;
pub use session::FacebookSession;

pub const PROVIDER_ID: &str = "facebook";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacebookEndpoints {
	pub auth_url: String,
	pub token_url: String,
	/// Versioned Graph API root
	pub graph_base: String,
}

impl Default for FacebookEndpoints {
	fn default() -> Self {
		Self {
			auth_url: format!("https://www.facebook.com/{}/dialog/oauth", GRAPH_API_VERSION),
			token_url: format!("https://graph.facebook.com/{}/oauth/access_token", GRAPH_API_VERSION),
			graph_base: format!("https://graph.facebook.com/{}", GRAPH_API_VERSION),
		}
	}
}

impl FacebookEndpoints {
	/// Every endpoint under `base`, using the public URL layout.
	pub fn with_base_url(base: &str) -> Self {
		let base = base.trim_end_matches('/');
		Self {
			auth_url: format!("{}/{}/dialog/oauth", base, GRAPH_API_VERSION),
			token_url: format!("{}/{}/oauth/access_token", base, GRAPH_API_VERSION),
			graph_base: format!("{}/{}", base, GRAPH_API_VERSION),
		}
	}
}

/// Facebook provider descriptor.
pub struct FacebookProvider {
	app: OnceLock<AppConfig>,
	endpoints: FacebookEndpoints,
	timeout: Duration,
}

impl Default for FacebookProvider {
	fn default() -> Self {
		Self::new()
	}
}

impl FacebookProvider {
	pub fn new() -> Self {
		Self {
			app: OnceLock::new(),
			endpoints: FacebookEndpoints::default(),
			timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
		}
	}

	pub fn with_endpoints(mut self, endpoints: FacebookEndpoints) -> Self {
		self.endpoints = endpoints;
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn endpoints(&self) -> &FacebookEndpoints {
		&self.endpoints
	}

	fn app(&self) -> ProviderResult<&AppConfig> {
		self.app
			.get()
			.ok_or_else(|| ProviderError::new(ErrorKind::ProviderNotConfigured))
	}
}

impl ProviderDescriptor for FacebookProvider {
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

	/// Validates the bearer token locally; the first Graph call reports a
	/// token the provider no longer accepts.
	fn open_session(&self, credentials: &Credentials) -> ProviderResult<Box<dyn ProviderSession>> {
		let Credentials::OAuth2(creds) = credentials else {
			return Err(ProviderError::with_message(
				ErrorKind::NoCredentials,
				"facebook requires OAuth2 credentials",
			));
		};
		if creds.access_token.is_empty() {
			return Err(ProviderError::new(ErrorKind::NoCredentials));
		}
		if creds.is_expired_at(Utc::now()) {
			return Err(ProviderError::new(ErrorKind::ExpiredToken));
		}

		let graph = GraphClient::new(&creds.access_token, &self.endpoints.graph_base, http_client(self.timeout)?);
		Ok(Box::new(FacebookSession::new(graph)))
	}

	fn new_oauth(&self) -> ProviderResult<Box<dyn OAuthFlow>> {
		let app = self.app()?;
		let http = http_client(self.timeout)?;
		let config = OAuth2Config {
			client_id: app.app_id.clone(),
			client_secret: app.app_secret.clone(),
			redirect_url: app.oauth_callback.clone(),
			auth_url: self.endpoints.auth_url.clone(),
			token_url: self.endpoints.token_url.clone(),
		};
		Ok(Box::new(FacebookOAuth::new(
			OAuth2Flow::new(config, http.clone()),
			&self.endpoints.graph_base,
			http,
		)))
	}
}
