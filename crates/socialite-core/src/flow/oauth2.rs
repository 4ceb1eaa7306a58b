//! OAuth 2.0 authorization-code flow helpers

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::credentials::OAuth2Credentials;
use crate::error::{ErrorKind, ProviderError, ProviderResult};
use crate::provider_id::ProviderId;

/// Client registration plus the provider's endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth2Config {
	pub client_id: String,
	pub client_secret: String,
	pub redirect_url: String,
	pub auth_url: String,
	pub token_url: String,
}

/// Token endpoint response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
	pub access_token: String,
	#[serde(default = "default_token_type")]
	pub token_type: String,
	#[serde(default)]
	pub expires_in: Option<i64>,
	#[serde(default)]
	pub refresh_token: Option<String>,
	#[serde(default)]
	pub scope: Option<String>,
}

fn default_token_type() -> String {
	"Bearer".to_string()
}

impl TokenResponse {
	pub fn expires_at(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
		self.expires_in
			.filter(|secs| *secs > 0)
			.map(|secs| now + Duration::seconds(secs))
	}

	/// Credentials for `provider`, with the expiry resolved against `now`.
	pub fn into_credentials(self, provider: impl Into<ProviderId>, now: DateTime<Utc>) -> OAuth2Credentials {
		let expires_at = self.expires_at(now);
		let mut creds = OAuth2Credentials::new(provider, self.access_token).with_token_type(self.token_type);
		if let Some(refresh_token) = self.refresh_token.filter(|token| !token.is_empty()) {
			creds = creds.with_refresh_token(refresh_token);
		}
		if let Some(expires_at) = expires_at {
			creds = creds.with_expiry(expires_at);
		}
		creds
	}
}

/// Authorization-code flow over one [`OAuth2Config`].
#[derive(Debug, Clone)]
pub struct OAuth2Flow {
	config: OAuth2Config,
	http: Client,
}

impl OAuth2Flow {
	pub fn new(config: OAuth2Config, http: Client) -> Self {
		Self { config, http }
	}

	pub fn config(&self) -> &OAuth2Config {
		&self.config
	}

	/// Builds the authorization URL. `params` are appended after the
	/// standard `response_type`, `client_id`, `redirect_uri` and `state`.
	pub fn authorization_url(&self, state: &str, params: &[(&str, &str)]) -> ProviderResult<String> {
		let mut url = Url::parse(&self.config.auth_url)
			.map_err(|err| ProviderError::new(ErrorKind::Unknown).caused_by(err))?;
		{
			let mut query = url.query_pairs_mut();
			query
				.append_pair("response_type", "code")
				.append_pair("client_id", &self.config.client_id)
				.append_pair("redirect_uri", &self.config.redirect_url)
				.append_pair("state", state);
			for (key, value) in params {
				query.append_pair(key, value);
			}
		}
		Ok(url.into())
	}

	/// Exchanges an authorization code at the token endpoint.
	pub async fn exchange_code(&self, code: &str) -> ProviderResult<TokenResponse> {
		let params = [
			("grant_type", "authorization_code"),
			("code", code),
			("redirect_uri", self.config.redirect_url.as_str()),
			("client_id", self.config.client_id.as_str()),
			("client_secret", self.config.client_secret.as_str()),
		];

		tracing::debug!(url = %self.config.token_url, "Exchanging OAuth2 authorization code");
		let response = self
			.http
			.post(&self.config.token_url)
			.form(&params)
			.send()
			.await
			.map_err(ProviderError::unknown)?;

		let status = response.status();
		if !status.is_success() {
			let body = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown error".to_string());
			let kind = if status == reqwest::StatusCode::UNAUTHORIZED {
				ErrorKind::AuthorizationFailed
			} else {
				ErrorKind::Unknown
			};
			return Err(ProviderError::new(kind)
				.caused_by_msg(format!("Token exchange failed ({}): {}", status, body)));
		}

		response
			.json::<TokenResponse>()
			.await
			.map_err(|err| ProviderError::new(ErrorKind::AuthorizationFailed).caused_by(err))
	}
}
