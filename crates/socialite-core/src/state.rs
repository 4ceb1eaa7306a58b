//! Signed OAuth state token
//!
//! The only data carried across the provider redirect. Nothing is stored
//! server-side: the token is an HS256 JWT naming the provider and the
//! requested permission, valid for [`STATE_TOKEN_TTL`].

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{ErrorKind, ProviderError};
use crate::permission::Permission;

/// Subject every state token is issued for.
pub const STATE_SUBJECT: &str = "OAuthCallback";

/// Lifetime of a state token.
pub const STATE_TOKEN_TTL: Duration = Duration::minutes(15);

/// Claims of a state token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateClaims {
	pub sub: String,
	pub provider: String,
	pub perm: String,
	pub iat: i64,
	pub exp: i64,
	/// Flow options such as `force_login`
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_json::Value>,
}

impl StateClaims {
	/// Claims for a callback to `provider`, issued at `now`.
	pub fn new(provider: impl Into<String>, perm: Permission, now: DateTime<Utc>) -> Self {
		Self {
			sub: STATE_SUBJECT.to_string(),
			provider: provider.into(),
			perm: perm.to_string(),
			iat: now.timestamp(),
			exp: (now + STATE_TOKEN_TTL).timestamp(),
			extra: BTreeMap::new(),
		}
	}

	pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Decoded `perm` claim.
	pub fn permission(&self) -> Permission {
		Permission::decode(&self.perm)
	}

	/// Whether the user asked to re-enter their credentials at the provider.
	pub fn force_login(&self) -> bool {
		match self.extra.get("force_login") {
			Some(serde_json::Value::Bool(flag)) => *flag,
			Some(serde_json::Value::String(flag)) => flag == "true",
			_ => false,
		}
	}

	pub fn expires_at(&self) -> Option<DateTime<Utc>> {
		DateTime::from_timestamp(self.exp, 0)
	}

	pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
		now.timestamp() > self.exp
	}
}

/// Reasons a state token is rejected.
#[derive(Debug, Error)]
pub enum StateTokenError {
	#[error("state token is missing")]
	Missing,
	#[error("state token is malformed or has an invalid signature: {0}")]
	Invalid(#[from] jsonwebtoken::errors::Error),
	#[error("state token expired")]
	Expired,
	#[error("state token has unexpected subject {0:?}")]
	WrongSubject(String),
	#[error("state token was issued for provider {actual:?}, not {expected:?}")]
	WrongProvider { expected: String, actual: String },
}

impl From<StateTokenError> for ProviderError {
	fn from(err: StateTokenError) -> Self {
		ProviderError::new(ErrorKind::AuthorizationFailed).caused_by(err)
	}
}

/// Signs and verifies state tokens with a shared secret.
pub struct StateTokenAuth {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
}

impl StateTokenAuth {
	/// Creates a signer for the given secret.
	///
	/// # Examples
	///
	/// ```
	/// use socialite_core::state::{StateClaims, StateTokenAuth};
	/// use socialite_core::Permission;
	///
	/// let auth = StateTokenAuth::new(b"secret");
	/// let token = auth.sign(&StateClaims::new("twitter", Permission::Read, chrono::Utc::now())).unwrap();
	/// let claims = auth.verify(&token).unwrap();
	/// assert_eq!(claims.provider, "twitter");
	/// assert_eq!(claims.perm, "r");
	/// ```
	pub fn new(secret: &[u8]) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		// Expiry is checked against an injectable clock in `verify_at`.
		validation.validate_exp = false;
		validation.leeway = 0;
		validation.required_spec_claims.clear();
		Self {
			encoding_key: EncodingKey::from_secret(secret),
			decoding_key: DecodingKey::from_secret(secret),
			validation,
		}
	}

	pub fn sign(&self, claims: &StateClaims) -> Result<String, StateTokenError> {
		Ok(encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)?)
	}

	/// Issues a token for `provider` at `now`.
	pub fn sign_at(
		&self,
		provider: &str,
		perm: Permission,
		now: DateTime<Utc>,
	) -> Result<(String, StateClaims), StateTokenError> {
		let claims = StateClaims::new(provider, perm, now);
		let token = self.sign(&claims)?;
		Ok((token, claims))
	}

	/// Verifies signature, subject and expiry against the current time.
	pub fn verify(&self, token: &str) -> Result<StateClaims, StateTokenError> {
		self.verify_at(token, Utc::now())
	}

	/// Verifies signature, subject and expiry against `now`.
	pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<StateClaims, StateTokenError> {
		if token.is_empty() {
			return Err(StateTokenError::Missing);
		}

		let claims = decode::<StateClaims>(token, &self.decoding_key, &self.validation)?.claims;
		if claims.sub != STATE_SUBJECT {
			return Err(StateTokenError::WrongSubject(claims.sub));
		}
		if claims.is_expired_at(now) {
			return Err(StateTokenError::Expired);
		}
		Ok(claims)
	}

	/// [`StateTokenAuth::verify_at`] plus a check that the token names `provider`.
	pub fn verify_for(
		&self,
		token: &str,
		provider: &str,
		now: DateTime<Utc>,
	) -> Result<StateClaims, StateTokenError> {
		let claims = self.verify_at(token, now)?;
		if claims.provider != provider {
			return Err(StateTokenError::WrongProvider {
				expected: provider.to_string(),
				actual: claims.provider,
			});
		}
		Ok(claims)
	}
}

impl std::fmt::Debug for StateTokenAuth {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("StateTokenAuth").finish_non_exhaustive()
	}
}
