//! # Socialite
//!
//! Log users in through social networks and read their profiles and posts
//! through one provider contract.
//!
//! ## Feature Flags
//!
//! - `twitter` (default) - Twitter provider (OAuth 1.0a)
//! - `facebook` (default) - Facebook provider (OAuth 2.0, Page tokens)
//! - `full` - Every provider
//!
//! A provider that is not linked is absent from the registry; configuration
//! entries naming it are skipped.
//!
//! ## Quick Example
//!
//! ```rust,no_run
//! use socialite::{AuthorizeOptions, Socialite, SocialConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = SocialConfig::from_path("socialite.toml")?;
//! let protocol = Socialite::bootstrap(&config)?;
//!
//! let pending = protocol
//! 	.authorize("twitter", "rw", AuthorizeOptions::default())
//! 	.await?;
//! println!("redirect to {}", pending.url);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

pub use socialite_core::*;

#[cfg(feature = "facebook")]
pub use socialite_facebook as facebook;
#[cfg(feature = "twitter")]
pub use socialite_twitter as twitter;

use socialite_core::config::DEFAULT_REQUEST_TIMEOUT_SECS;

/// Errors raised while assembling the protocol from configuration.
#[derive(Debug, thiserror::Error)]
pub enum BootstrapError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),

	#[error("Registry error: {0}")]
	Registry(#[from] RegistryError),
}

/// Registry holding every provider linked into this build.
pub fn linked_registry() -> Result<ProviderRegistry, RegistryError> {
	linked_registry_with_timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
}

/// Like [`linked_registry`], with `timeout` applied to provider HTTP calls.
#[allow(unused_mut, unused_variables)]
pub fn linked_registry_with_timeout(timeout: Duration) -> Result<ProviderRegistry, RegistryError> {
	let mut registry = ProviderRegistry::new();

	#[cfg(feature = "twitter")]
	registry.register(
		twitter::PROVIDER_ID,
		Arc::new(twitter::TwitterProvider::new().with_timeout(timeout)),
	)?;

	#[cfg(feature = "facebook")]
	registry.register(
		facebook::PROVIDER_ID,
		Arc::new(facebook::FacebookProvider::new().with_timeout(timeout)),
	)?;

	Ok(registry)
}

/// Entry point wiring configuration, providers and the OAuth protocol.
pub struct Socialite;

impl Socialite {
	/// Builds the linked registry, configures it from `config` and returns
	/// a protocol signing state tokens with `config.state_secret`.
	pub fn bootstrap(config: &SocialConfig) -> Result<OAuthProtocol, BootstrapError> {
		config.validate()?;
		let registry = linked_registry_with_timeout(config.request_timeout())?;
		registry.configure_all(&config.providers)?;

		tracing::info!(
			providers = ?registry.provider_ids(),
			configured = config.providers.len(),
			"Socialite ready"
		);
		Ok(OAuthProtocol::new(
			Arc::new(registry),
			config.state_secret.as_bytes(),
		))
	}
}
