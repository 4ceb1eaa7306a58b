//! Unified credential model
//!
//! A provider's exchange step yields exactly one of the two shapes below.
//! Both are reachable through the same accessor set on [`Credentials`], so
//! callers that only need a token never have to match on the variant, while
//! callers that care can match exhaustively.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::permission::Permission;
use crate::provider_id::ProviderId;

/// Token and token-secret pair issued by an OAuth 1.0a provider.
///
/// OAuth1 tokens carry no refresh token and (for the providers supported
/// here) never expire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth1Credentials {
	pub provider_id: ProviderId,
	#[serde(default)]
	pub provider_user_id: String,
	pub access_token: String,
	pub access_token_secret: String,
	#[serde(default)]
	pub permission: Permission,
}

impl OAuth1Credentials {
	pub fn new(
		provider_id: impl Into<ProviderId>,
		access_token: impl Into<String>,
		access_token_secret: impl Into<String>,
	) -> Self {
		Self {
			provider_id: provider_id.into(),
			provider_user_id: String::new(),
			access_token: access_token.into(),
			access_token_secret: access_token_secret.into(),
			permission: Permission::None,
		}
	}

	pub fn with_provider_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.provider_user_id = user_id.into();
		self
	}
}

/// Bearer token issued by an OAuth 2.0 provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Credentials {
	pub provider_id: ProviderId,
	#[serde(default)]
	pub provider_user_id: String,
	pub access_token: String,
	#[serde(default = "default_token_type")]
	pub token_type: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expires_at: Option<DateTime<Utc>>,
	#[serde(default)]
	pub permission: Permission,
}

fn default_token_type() -> String {
	"Bearer".to_string()
}

impl OAuth2Credentials {
	pub fn new(provider_id: impl Into<ProviderId>, access_token: impl Into<String>) -> Self {
		Self {
			provider_id: provider_id.into(),
			provider_user_id: String::new(),
			access_token: access_token.into(),
			token_type: default_token_type(),
			refresh_token: None,
			expires_at: None,
			permission: Permission::None,
		}
	}

	pub fn with_provider_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.provider_user_id = user_id.into();
		self
	}

	pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(refresh_token.into());
		self
	}

	pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
		self.expires_at = Some(expires_at);
		self
	}

	pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = token_type.into();
		self
	}

	/// Whether the token is past its expiry at `now`.
	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		self.expires_at.is_some_and(|expiry| expiry <= now)
	}
}

/// Credentials held by the caller and passed into every session operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Credentials {
	OAuth1(OAuth1Credentials),
	OAuth2(OAuth2Credentials),
}

impl Credentials {
	pub fn provider_id(&self) -> &ProviderId {
		match self {
			Credentials::OAuth1(c) => &c.provider_id,
			Credentials::OAuth2(c) => &c.provider_id,
		}
	}

	pub fn provider_user_id(&self) -> &str {
		match self {
			Credentials::OAuth1(c) => &c.provider_user_id,
			Credentials::OAuth2(c) => &c.provider_user_id,
		}
	}

	pub fn access_token(&self) -> &str {
		match self {
			Credentials::OAuth1(c) => &c.access_token,
			Credentials::OAuth2(c) => &c.access_token,
		}
	}

	/// Token secret; empty for OAuth2 credentials.
	pub fn access_token_secret(&self) -> &str {
		match self {
			Credentials::OAuth1(c) => &c.access_token_secret,
			Credentials::OAuth2(_) => "",
		}
	}

	/// Refresh token; empty when the provider issued none.
	pub fn refresh_token(&self) -> &str {
		match self {
			Credentials::OAuth1(_) => "",
			Credentials::OAuth2(c) => c.refresh_token.as_deref().unwrap_or(""),
		}
	}

	/// Expiry instant, `None` when the token does not expire.
	pub fn expires_at(&self) -> Option<DateTime<Utc>> {
		match self {
			Credentials::OAuth1(_) => None,
			Credentials::OAuth2(c) => c.expires_at,
		}
	}

	pub fn permission(&self) -> Permission {
		match self {
			Credentials::OAuth1(c) => c.permission,
			Credentials::OAuth2(c) => c.permission,
		}
	}

	/// Sets the permission from its text encoding (see [`Permission::decode`]).
	pub fn set_permission(&mut self, perm: &str) {
		let perm = Permission::decode(perm);
		match self {
			Credentials::OAuth1(c) => c.permission = perm,
			Credentials::OAuth2(c) => c.permission = perm,
		}
	}

	pub fn is_oauth1(&self) -> bool {
		matches!(self, Credentials::OAuth1(_))
	}

	pub fn is_oauth2(&self) -> bool {
		matches!(self, Credentials::OAuth2(_))
	}
}

impl From<OAuth1Credentials> for Credentials {
	fn from(creds: OAuth1Credentials) -> Self {
		Credentials::OAuth1(creds)
	}
}

impl From<OAuth2Credentials> for Credentials {
	fn from(creds: OAuth2Credentials) -> Self {
		Credentials::OAuth2(creds)
	}
}
