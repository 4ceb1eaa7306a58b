//! Stateless OAuth authorize / callback protocol
//!
//! `authorize` hands out a provider URL carrying a signed state token;
//! `callback` verifies that token, lets the provider exchange its
//! authorization artifacts, and fetches the authenticated user. Nothing is
//! stored between the two steps.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::credentials::Credentials;
use crate::entity::User;
use crate::error::{ErrorKind, ProviderError, ProviderResult};
use crate::oauth::CallbackParams;
use crate::permission::Permission;
use crate::provider_id::ProviderId;
use crate::query::Query;
use crate::registry::ProviderRegistry;
use crate::state::{StateClaims, StateTokenAuth};

/// Loopback route that forwards to the provider callback.
pub const LOOPBACK_CALLBACK_ROUTE: &str = "googleapi";

/// Per-request authorization options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorizeOptions {
	/// Ask the provider to re-prompt for credentials
	pub force_login: bool,
}

/// Result of [`OAuthProtocol::authorize`]: where to send the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingAuthorization {
	pub provider: ProviderId,
	pub url: String,
	pub state_token: String,
	pub expires_at: DateTime<Utc>,
}

/// Everything the callback produced, including a failure.
///
/// `credentials` and `user` hold whatever was obtained before `error`
/// occurred.
#[derive(Debug)]
pub struct CallbackOutcome {
	pub provider: ProviderId,
	pub credentials: Vec<Credentials>,
	pub user: Option<User>,
	pub error: Option<ProviderError>,
}

/// A completed login.
#[derive(Debug, Clone)]
pub struct Authenticated {
	pub provider: ProviderId,
	/// Index 0 is the primary identity
	pub credentials: Vec<Credentials>,
	pub user: User,
}

impl CallbackOutcome {
	fn failed(provider: ProviderId, error: ProviderError) -> Self {
		Self {
			provider,
			credentials: Vec::new(),
			user: None,
			error: Some(error),
		}
	}

	pub fn is_success(&self) -> bool {
		self.error.is_none() && self.user.is_some()
	}

	pub fn into_result(self) -> ProviderResult<Authenticated> {
		if let Some(error) = self.error {
			return Err(error);
		}
		let user = self
			.user
			.ok_or_else(|| ProviderError::new(ErrorKind::UserFetchFailed))?;
		Ok(Authenticated {
			provider: self.provider,
			credentials: self.credentials,
			user,
		})
	}
}

/// Authorize / callback driver over a provider registry.
#[derive(Debug, Clone)]
pub struct OAuthProtocol {
	registry: Arc<ProviderRegistry>,
	state: Arc<StateTokenAuth>,
}

impl OAuthProtocol {
	pub fn new(registry: Arc<ProviderRegistry>, state_secret: &[u8]) -> Self {
		Self {
			registry,
			state: Arc::new(StateTokenAuth::new(state_secret)),
		}
	}

	pub fn registry(&self) -> &Arc<ProviderRegistry> {
		&self.registry
	}

	pub fn state_auth(&self) -> &StateTokenAuth {
		&self.state
	}

	/// Ids of the providers that can be authorized against.
	pub fn list_providers(&self) -> Vec<ProviderId> {
		self.registry.provider_ids()
	}

	/// Starts an authorization. `perm_param` is the raw `perm` request
	/// parameter; empty or unknown values request read access.
	pub async fn authorize(
		&self,
		provider: &str,
		perm_param: &str,
		options: AuthorizeOptions,
	) -> ProviderResult<PendingAuthorization> {
		self.authorize_at(provider, perm_param, options, Utc::now()).await
	}

	pub async fn authorize_at(
		&self,
		provider: &str,
		perm_param: &str,
		options: AuthorizeOptions,
		now: DateTime<Utc>,
	) -> ProviderResult<PendingAuthorization> {
		let flow = self.registry.new_oauth(provider)?;
		let provider = ProviderId::new(flow.provider_id());

		let mut claims = StateClaims::new(provider.as_str(), Permission::decode(perm_param), now);
		if options.force_login {
			claims = claims.with_extra("force_login", true);
		}
		let state_token = self.state.sign(&claims)?;
		let url = flow.authorization_url(&state_token, &claims).await?;

		tracing::debug!(provider = %provider, perm = %claims.perm, "Issued authorization URL");

		Ok(PendingAuthorization {
			expires_at: claims.expires_at().unwrap_or(now),
			provider,
			url,
			state_token,
		})
	}

	/// Completes an authorization from the provider's callback parameters.
	pub async fn callback(&self, provider: &str, params: &CallbackParams) -> CallbackOutcome {
		self.callback_at(provider, params, Utc::now()).await
	}

	pub async fn callback_at(
		&self,
		provider: &str,
		params: &CallbackParams,
		now: DateTime<Utc>,
	) -> CallbackOutcome {
		let provider_id = ProviderId::new(provider);

		let flow = match self.registry.new_oauth(provider_id.as_str()) {
			Ok(flow) => flow,
			Err(err) => return CallbackOutcome::failed(provider_id, err),
		};

		let claims = match self.state.verify_for(params.state(), provider_id.as_str(), now) {
			Ok(claims) => claims,
			Err(err) => {
				tracing::warn!(provider = %provider_id, error = %err, "Rejected OAuth state token");
				return CallbackOutcome::failed(provider_id, err.into());
			}
		};

		if let Some(denial) = params.denial() {
			tracing::info!(provider = %provider_id, "Authorization denied by user or provider");
			return CallbackOutcome::failed(
				provider_id,
				ProviderError::new(ErrorKind::AuthorizationFailed).caused_by_msg(denial),
			);
		}

		if params.get(flow.verifier_param()).is_empty() {
			return CallbackOutcome::failed(
				provider_id,
				ProviderError::new(ErrorKind::EmptyAuthorizationCode),
			);
		}

		let mut credentials = match flow.exchange(params).await {
			Ok(credentials) if credentials.is_empty() => {
				return CallbackOutcome::failed(
					provider_id,
					ProviderError::new(ErrorKind::AuthorizationFailed)
						.caused_by_msg("provider returned no credentials"),
				);
			}
			Ok(credentials) => credentials,
			Err(err) => return CallbackOutcome::failed(provider_id, err),
		};
		for creds in &mut credentials {
			creds.set_permission(&claims.perm);
		}

		let user = match self.fetch_user(&provider_id, &credentials[0]).await {
			Ok(user) => user,
			Err(err) => {
				return CallbackOutcome {
					provider: provider_id,
					credentials,
					user: None,
					error: Some(err),
				};
			}
		};

		tracing::info!(
			provider = %provider_id,
			user_id = %user.id,
			credentials = credentials.len(),
			"Completed OAuth callback"
		);

		CallbackOutcome {
			provider: provider_id,
			credentials,
			user: Some(user),
			error: None,
		}
	}

	async fn fetch_user(&self, provider: &ProviderId, credentials: &Credentials) -> ProviderResult<User> {
		let session = self.registry.open_session(provider.as_str(), credentials)?;
		session.get_user(&Query::none()).await
	}

	/// Redirect target for a loopback `route`, carrying `query` along.
	///
	/// Only [`LOOPBACK_CALLBACK_ROUTE`] redirects; other routes yield `None`.
	pub fn loopback(&self, route: &str, state_token: &str, query: &str) -> ProviderResult<Option<String>> {
		self.loopback_at(route, state_token, query, Utc::now())
	}

	pub fn loopback_at(
		&self,
		route: &str,
		state_token: &str,
		query: &str,
		now: DateTime<Utc>,
	) -> ProviderResult<Option<String>> {
		let claims = self.state.verify_at(state_token, now)?;
		if claims.provider.is_empty() {
			return Err(ProviderError::with_message(
				ErrorKind::AuthorizationFailed,
				"invalid provider id",
			));
		}

		match route {
			LOOPBACK_CALLBACK_ROUTE => Ok(Some(format!(
				"/auth/{}/callback?{}",
				claims.provider,
				query.trim_start_matches('?')
			))),
			_ => Ok(None),
		}
	}
}
