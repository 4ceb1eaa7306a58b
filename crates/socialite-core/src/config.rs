//! Application credentials and runtime settings
//!
//! ```toml
//! state_secret = "change-me"
//! request_timeout_secs = 30
//!
//! [providers.twitter]
//! app_id = "consumer-key"
//! app_secret = "consumer-secret"
//! oauth_callback = "http://localhost:1515/auth/twitter/callback"
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default bound on a single provider HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// OAuth application registered with one provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
	pub app_id: String,
	pub app_secret: String,
	/// Redirect URL registered with the provider
	pub oauth_callback: String,
}

impl AppConfig {
	pub fn new(
		app_id: impl Into<String>,
		app_secret: impl Into<String>,
		oauth_callback: impl Into<String>,
	) -> Self {
		Self {
			app_id: app_id.into(),
			app_secret: app_secret.into(),
			oauth_callback: oauth_callback.into(),
		}
	}
}

/// Application configs keyed by provider id.
pub type ProviderConfigs = BTreeMap<String, AppConfig>;

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("failed to read config file {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},
	#[error("invalid config: {0}")]
	Parse(#[from] toml::de::Error),
	#[error("state_secret must not be empty")]
	EmptyStateSecret,
	#[error("request_timeout_secs must be greater than zero")]
	ZeroRequestTimeout,
	#[error("provider {0} is configured more than once")]
	DuplicateProvider(String),
}

/// Top-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialConfig {
	/// HMAC key for state tokens
	pub state_secret: String,
	#[serde(default = "default_request_timeout_secs")]
	pub request_timeout_secs: u64,
	#[serde(default)]
	pub providers: ProviderConfigs,
}

fn default_request_timeout_secs() -> u64 {
	DEFAULT_REQUEST_TIMEOUT_SECS
}

impl SocialConfig {
	pub fn new(state_secret: impl Into<String>) -> Self {
		Self {
			state_secret: state_secret.into(),
			request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
			providers: ProviderConfigs::new(),
		}
	}

	pub fn with_provider(mut self, id: &str, app: AppConfig) -> Self {
		self.providers.insert(id.trim().to_lowercase(), app);
		self
	}

	pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
		let mut config: SocialConfig = toml::from_str(text)?;
		config.normalize()?;
		config.validate()?;
		Ok(config)
	}

	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
		let path = path.as_ref();
		let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_toml_str(&text)
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}

	/// Lowercases provider keys. Keys that only differ in case are
	/// rejected rather than merged.
	fn normalize(&mut self) -> Result<(), ConfigError> {
		let mut providers = ProviderConfigs::new();
		for (id, app) in std::mem::take(&mut self.providers) {
			let id = id.trim().to_lowercase();
			if providers.contains_key(&id) {
				return Err(ConfigError::DuplicateProvider(id));
			}
			providers.insert(id, app);
		}
		self.providers = providers;
		Ok(())
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.state_secret.is_empty() {
			return Err(ConfigError::EmptyStateSecret);
		}
		if self.request_timeout_secs == 0 {
			return Err(ConfigError::ZeroRequestTimeout);
		}
		Ok(())
	}
}
