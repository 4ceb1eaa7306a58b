//! Provider registry
//!
//! Maps provider ids to their descriptors. Populated once at startup and
//! shared read-only afterwards (typically behind an `Arc`).

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppConfig, ProviderConfigs};
use crate::credentials::Credentials;
use crate::error::{ErrorKind, ProviderError, ProviderResult};
use crate::oauth::OAuthFlow;
use crate::provider_id::ProviderId;
use crate::session::ProviderSession;

/// Plugin contract every provider implements.
pub trait ProviderDescriptor: Send + Sync {
	fn id(&self) -> &str;

	/// Stores the application credentials. Called at most once.
	fn configure(&self, config: &AppConfig) -> Result<(), RegistryError>;

	/// Opens an authenticated session for previously exchanged credentials.
	fn open_session(&self, credentials: &Credentials) -> ProviderResult<Box<dyn ProviderSession>>;

	/// Creates the provider's OAuth flow.
	fn new_oauth(&self) -> ProviderResult<Box<dyn OAuthFlow>>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
	#[error("provider {0} is already registered")]
	AlreadyRegistered(ProviderId),
	#[error("provider {0} is already configured")]
	AlreadyConfigured(ProviderId),
	#[error("invalid configuration for provider {provider}: {reason}")]
	InvalidConfig { provider: ProviderId, reason: String },
}

/// Id-keyed descriptor table.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
	providers: BTreeMap<ProviderId, Arc<dyn ProviderDescriptor>>,
}

impl ProviderRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a descriptor under `id`. Existing entries are never replaced.
	pub fn register(
		&mut self,
		id: impl Into<ProviderId>,
		descriptor: Arc<dyn ProviderDescriptor>,
	) -> Result<(), RegistryError> {
		let id = id.into();
		if self.providers.contains_key(&id) {
			return Err(RegistryError::AlreadyRegistered(id));
		}
		tracing::debug!(provider = %id, "Registered provider");
		self.providers.insert(id, descriptor);
		Ok(())
	}

	pub fn lookup(&self, id: &str) -> ProviderResult<Arc<dyn ProviderDescriptor>> {
		let id = ProviderId::new(id);
		self.providers.get(&id).cloned().ok_or_else(|| {
			ProviderError::with_message(
				ErrorKind::UnknownProvider,
				format!("{}: {}", ErrorKind::UnknownProvider, id),
			)
		})
	}

	pub fn contains(&self, id: &str) -> bool {
		self.providers.contains_key(&ProviderId::new(id))
	}

	/// Configures every registered provider that has an entry in `configs`.
	///
	/// Entries naming providers that are not linked in are skipped.
	pub fn configure_all(&self, configs: &ProviderConfigs) -> Result<(), RegistryError> {
		for (id, app) in configs {
			match self.providers.get(&ProviderId::new(id)) {
				Some(descriptor) => {
					descriptor.configure(app)?;
					tracing::debug!(provider = %id, "Configured provider");
				}
				None => {
					tracing::debug!(provider = %id, "Skipping config for unregistered provider");
				}
			}
		}
		Ok(())
	}

	/// Registered ids, sorted.
	pub fn provider_ids(&self) -> Vec<ProviderId> {
		self.providers.keys().cloned().collect()
	}

	pub fn len(&self) -> usize {
		self.providers.len()
	}

	pub fn is_empty(&self) -> bool {
		self.providers.is_empty()
	}

	pub fn new_oauth(&self, id: &str) -> ProviderResult<Box<dyn OAuthFlow>> {
		self.lookup(id)?.new_oauth()
	}

	pub fn open_session(
		&self,
		id: &str,
		credentials: &Credentials,
	) -> ProviderResult<Box<dyn ProviderSession>> {
		self.lookup(id)?.open_session(credentials)
	}
}

impl std::fmt::Debug for ProviderRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ProviderRegistry")
			.field("providers", &self.providers.keys().collect::<Vec<_>>())
			.finish()
	}
}
