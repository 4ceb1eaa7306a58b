//! Provider-specific OAuth flow contract

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::credentials::Credentials;
use crate::error::ProviderResult;
use crate::state::StateClaims;

/// The authorize / exchange half of a provider integration.
///
/// Implementations never see the protocol's bookkeeping: they receive an
/// already-signed state token to embed in the authorization URL, and an
/// already-verified callback to exchange.
#[async_trait]
pub trait OAuthFlow: Send + Sync {
	fn provider_id(&self) -> &str;

	/// Name of the callback parameter carrying the authorization artifact
	/// (`code` for OAuth2, `oauth_verifier` for OAuth1).
	fn verifier_param(&self) -> &'static str;

	/// Builds the URL the user is redirected to.
	///
	/// `state_token` must come back unchanged in the callback's `state`
	/// parameter. `claims` are the decoded contents of that token.
	async fn authorization_url(
		&self,
		state_token: &str,
		claims: &StateClaims,
	) -> ProviderResult<String>;

	/// Exchanges the callback's authorization artifacts for credentials.
	///
	/// Page-based providers may return several credential sets; index 0 is
	/// the primary identity.
	async fn exchange(&self, callback: &CallbackParams) -> ProviderResult<Vec<Credentials>>;
}

/// Query parameters of an OAuth callback request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
	params: BTreeMap<String, String>,
}

impl CallbackParams {
	pub fn new(params: BTreeMap<String, String>) -> Self {
		Self { params }
	}

	/// Parses a raw `a=b&c=d` query string; malformed pairs are dropped.
	pub fn from_query_str(query: &str) -> Self {
		let params = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
			.into_owned()
			.collect();
		Self { params }
	}

	/// Value of `key`, or `""` when absent.
	pub fn get(&self, key: &str) -> &str {
		self.params.get(key).map(String::as_str).unwrap_or("")
	}

	pub fn contains(&self, key: &str) -> bool {
		self.params.contains_key(key)
	}

	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
		self.params.insert(key.into(), value.into());
	}

	/// The signed state token.
	pub fn state(&self) -> &str {
		self.get("state")
	}

	/// Explicit denial sent back by the provider, formatted for diagnostics.
	///
	/// OAuth2 providers use `error`, `error_reason` and `error_description`;
	/// Twitter sends `denied` instead.
	pub fn denial(&self) -> Option<String> {
		let error = self.get("error");
		if !error.is_empty() {
			return Some(format!(
				"Error:{},  ErrorReason:{},  ErrorDescription:{}",
				error,
				self.get("error_reason"),
				self.get("error_description")
			));
		}

		let denied = self.get("denied");
		if !denied.is_empty() {
			return Some(format!("Error:access_denied,  Denied:{}", denied));
		}
		None
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Re-encodes the parameters as a query string.
	pub fn to_query_string(&self) -> String {
		url::form_urlencoded::Serializer::new(String::new())
			.extend_pairs(self.params.iter())
			.finish()
	}
}

impl<K, V> FromIterator<(K, V)> for CallbackParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			params: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}
