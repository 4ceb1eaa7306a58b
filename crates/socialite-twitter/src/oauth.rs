//! Twitter OAuth 1.0a flow

use async_trait::async_trait;
use socialite_core::flow::OAuth1Client;
use socialite_core::{
	CallbackParams, Credentials, ErrorKind, OAuth1Credentials, OAuthFlow, ProviderError, ProviderResult,
	StateClaims,
};

use crate::PROVIDER_ID;

/// Callback parameter carrying the verifier.
pub const VERIFIER_PARAM: &str = "oauth_verifier";

pub struct TwitterOAuth {
	client: OAuth1Client,
	callback_url: String,
}

impl TwitterOAuth {
	pub fn new(client: OAuth1Client, callback_url: impl Into<String>) -> Self {
		Self {
			client,
			callback_url: callback_url.into(),
		}
	}

	/// Registered callback with the state token attached.
	///
	/// OAuth 1.0a has no `state` parameter, so the token rides along in the
	/// callback URL itself.
	pub fn callback_with_state(&self, state_token: &str) -> String {
		let separator = if self.callback_url.contains('?') { '&' } else { '?' };
		format!("{}{}state={}", self.callback_url, separator, state_token)
	}
}

#[async_trait]
impl OAuthFlow for TwitterOAuth {
	fn provider_id(&self) -> &str {
		PROVIDER_ID
	}

	fn verifier_param(&self) -> &'static str {
		VERIFIER_PARAM
	}

	async fn authorization_url(&self, state_token: &str, claims: &StateClaims) -> ProviderResult<String> {
		let request_token = self
			.client
			.request_token(&self.callback_with_state(state_token))
			.await?;

		let extra: &[(&str, &str)] = if claims.force_login() {
			&[("force_login", "true")]
		} else {
			&[]
		};
		self.client.authorize_url(&request_token, extra)
	}

	async fn exchange(&self, callback: &CallbackParams) -> ProviderResult<Vec<Credentials>> {
		let request_token = callback.get("oauth_token");
		if request_token.is_empty() {
			return Err(ProviderError::new(ErrorKind::AuthorizationFailed)
				.caused_by_msg("missing oauth_token in twitter callback"));
		}

		let access = self
			.client
			.access_token(request_token, callback.get(VERIFIER_PARAM))
			.await?;

		let mut creds = OAuth1Credentials::new(PROVIDER_ID, access.token, access.secret);
		if let Some(user_id) = access.user_id {
			creds = creds.with_provider_user_id(user_id);
		}
		Ok(vec![creds.into()])
	}
}
