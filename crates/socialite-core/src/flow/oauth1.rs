//! OAuth 1.0a three-legged flow and request signing (HMAC-SHA1)

use std::time::{SystemTime, UNIX_EPOCH};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use rand::RngCore;
use reqwest::{Client, Method, StatusCode};
use sha1::Sha1;
use url::Url;

use crate::error::{ErrorKind, ProviderError, ProviderResult};

/// RFC 3986 unreserved characters stay as they are; everything else is
/// percent-encoded.
const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
	.remove(b'-')
	.remove(b'.')
	.remove(b'_')
	.remove(b'~');

/// Percent-encodes a value for OAuth 1.0a signatures.
pub fn percent_encode(value: &str) -> String {
	utf8_percent_encode(value, OAUTH_ENCODE_SET).to_string()
}

/// Token / token-secret pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OAuth1Token {
	pub token: String,
	pub secret: String,
}

impl OAuth1Token {
	pub fn new(token: impl Into<String>, secret: impl Into<String>) -> Self {
		Self {
			token: token.into(),
			secret: secret.into(),
		}
	}
}

/// Signs requests on behalf of a consumer application.
#[derive(Debug, Clone)]
pub struct OAuth1Signer {
	consumer_key: String,
	consumer_secret: String,
}

impl OAuth1Signer {
	pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
		Self {
			consumer_key: consumer_key.into(),
			consumer_secret: consumer_secret.into(),
		}
	}

	pub fn consumer_key(&self) -> &str {
		&self.consumer_key
	}

	/// Builds the `Authorization` header for a request with a fresh nonce and
	/// the current timestamp.
	///
	/// `params` are the query and form parameters of the request; they take
	/// part in the signature but not in the header.
	pub fn authorization_header(
		&self,
		method: &Method,
		url: &str,
		params: &[(String, String)],
		token: Option<&OAuth1Token>,
	) -> ProviderResult<String> {
		let timestamp = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|elapsed| elapsed.as_secs())
			.unwrap_or(0);
		self.authorization_header_with(method, url, params, token, &[], &generate_nonce(), timestamp)
	}

	/// Same as [`OAuth1Signer::authorization_header`] with explicit
	/// protocol parameters (`oauth_callback`, `oauth_verifier`), nonce and
	/// timestamp.
	#[allow(clippy::too_many_arguments)]
	pub fn authorization_header_with(
		&self,
		method: &Method,
		url: &str,
		params: &[(String, String)],
		token: Option<&OAuth1Token>,
		protocol_params: &[(&str, &str)],
		nonce: &str,
		timestamp: u64,
	) -> ProviderResult<String> {
		let mut oauth_params: Vec<(String, String)> = vec![
			("oauth_consumer_key".into(), self.consumer_key.clone()),
			("oauth_nonce".into(), nonce.to_string()),
			("oauth_signature_method".into(), "HMAC-SHA1".into()),
			("oauth_timestamp".into(), timestamp.to_string()),
			("oauth_version".into(), "1.0".into()),
		];
		if let Some(token) = token.filter(|token| !token.token.is_empty()) {
			oauth_params.push(("oauth_token".into(), token.token.clone()));
		}
		for (key, value) in protocol_params {
			oauth_params.push(((*key).to_string(), (*value).to_string()));
		}

		let mut signed_params = oauth_params.clone();
		signed_params.extend(params.iter().cloned());
		let token_secret = token.map(|token| token.secret.as_str()).unwrap_or("");
		let signature = self.signature(method, url, &signed_params, token_secret)?;
		oauth_params.push(("oauth_signature".into(), signature));
		oauth_params.sort();

		let header = oauth_params
			.iter()
			.map(|(key, value)| format!("{}=\"{}\"", percent_encode(key), percent_encode(value)))
			.collect::<Vec<_>>()
			.join(", ");
		Ok(format!("OAuth {}", header))
	}

	/// HMAC-SHA1 signature over the normalized request.
	///
	/// Query parameters embedded in `url` are included in the signature.
	pub fn signature(
		&self,
		method: &Method,
		url: &str,
		params: &[(String, String)],
		token_secret: &str,
	) -> ProviderResult<String> {
		let parsed = Url::parse(url).map_err(|err| ProviderError::new(ErrorKind::InvalidQuery).caused_by(err))?;
		let base_url = &parsed[..url::Position::AfterPath];

		let mut all_params: Vec<(String, String)> = params
			.iter()
			.map(|(key, value)| (percent_encode(key), percent_encode(value)))
			.collect();
		for (key, value) in parsed.query_pairs() {
			all_params.push((percent_encode(&key), percent_encode(&value)));
		}
		all_params.sort();

		let param_string = all_params
			.iter()
			.map(|(key, value)| format!("{}={}", key, value))
			.collect::<Vec<_>>()
			.join("&");

		let base_string = format!(
			"{}&{}&{}",
			method.as_str().to_uppercase(),
			percent_encode(base_url),
			percent_encode(&param_string)
		);
		let signing_key = format!(
			"{}&{}",
			percent_encode(&self.consumer_secret),
			percent_encode(token_secret)
		);

		let mut mac = Hmac::<Sha1>::new_from_slice(signing_key.as_bytes())
			.map_err(|err| ProviderError::new(ErrorKind::Unknown).caused_by_msg(err.to_string()))?;
		mac.update(base_string.as_bytes());
		Ok(BASE64.encode(mac.finalize().into_bytes()))
	}
}

fn generate_nonce() -> String {
	let mut bytes = [0u8; 16];
	rand::thread_rng().fill_bytes(&mut bytes);
	bytes.iter().map(|byte| format!("{:02x}", byte)).collect()
}

/// Endpoints of the three OAuth 1.0a legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuth1Endpoints {
	pub request_token_url: String,
	pub authorize_url: String,
	pub access_token_url: String,
}

/// Temporary credentials from the first leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
	pub token: String,
	pub secret: String,
	pub callback_confirmed: bool,
}

/// Token credentials from the last leg.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
	pub token: String,
	pub secret: String,
	pub user_id: Option<String>,
	pub screen_name: Option<String>,
}

/// Runs the request-token / authorize / access-token legs.
#[derive(Debug, Clone)]
pub struct OAuth1Client {
	signer: OAuth1Signer,
	endpoints: OAuth1Endpoints,
	http: Client,
}

impl OAuth1Client {
	pub fn new(signer: OAuth1Signer, endpoints: OAuth1Endpoints, http: Client) -> Self {
		Self {
			signer,
			endpoints,
			http,
		}
	}

	pub fn signer(&self) -> &OAuth1Signer {
		&self.signer
	}

	/// First leg: obtains a request token bound to `callback_url`.
	pub async fn request_token(&self, callback_url: &str) -> ProviderResult<RequestToken> {
		let url = &self.endpoints.request_token_url;
		let header = self.signer.authorization_header_with(
			&Method::POST,
			url,
			&[],
			None,
			&[("oauth_callback", callback_url)],
			&generate_nonce(),
			now_secs(),
		)?;

		tracing::debug!(url = %url, "Requesting OAuth1 request token");
		let body = self.post_for_body(url, header, &[]).await?;
		parse_request_token(&body)
	}

	/// Second leg: where the user approves the request token.
	pub fn authorize_url(&self, request_token: &RequestToken, extra: &[(&str, &str)]) -> ProviderResult<String> {
		let mut url = Url::parse(&self.endpoints.authorize_url)
			.map_err(|err| ProviderError::new(ErrorKind::Unknown).caused_by(err))?;
		{
			let mut query = url.query_pairs_mut();
			query.append_pair("oauth_token", &request_token.token);
			for (key, value) in extra {
				query.append_pair(key, value);
			}
		}
		Ok(url.into())
	}

	/// Last leg: trades the approved request token and verifier for token
	/// credentials.
	///
	/// The request-token secret is not carried across the redirect, so the
	/// exchange is signed with the request token alone.
	pub async fn access_token(&self, request_token: &str, verifier: &str) -> ProviderResult<AccessToken> {
		let url = &self.endpoints.access_token_url;
		let token = OAuth1Token::new(request_token, "");
		let form = vec![("oauth_verifier".to_string(), verifier.to_string())];
		let header = self
			.signer
			.authorization_header(&Method::POST, url, &form, Some(&token))?;

		tracing::debug!(url = %url, "Exchanging OAuth1 verifier for access token");
		let body = self.post_for_body(url, header, &form).await?;
		parse_access_token(&body)
	}

	async fn post_for_body(
		&self,
		url: &str,
		header: String,
		form: &[(String, String)],
	) -> ProviderResult<String> {
		let response = self
			.http
			.post(url)
			.header(reqwest::header::AUTHORIZATION, header)
			.form(form)
			.send()
			.await
			.map_err(ProviderError::unknown)?;

		let status = response.status();
		let body = response.text().await.map_err(ProviderError::unknown)?;
		if !status.is_success() {
			return Err(ProviderError::new(token_failure_kind(status))
				.caused_by_msg(format!("OAuth1 token request failed ({}): {}", status, body)));
		}
		Ok(body)
	}
}

/// A refused token request is an authorization failure; a failing server
/// is not.
fn token_failure_kind(status: StatusCode) -> ErrorKind {
	if status.is_server_error() {
		ErrorKind::ProviderDown
	} else if status.is_client_error() {
		ErrorKind::AuthorizationFailed
	} else {
		ErrorKind::Unknown
	}
}

fn now_secs() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_secs())
		.unwrap_or(0)
}

fn parse_form(body: &str) -> ProviderResult<std::collections::HashMap<String, String>> {
	serde_urlencoded::from_str(body).map_err(|err| ProviderError::new(ErrorKind::AuthorizationFailed).caused_by(err))
}

fn required(params: &std::collections::HashMap<String, String>, key: &str) -> ProviderResult<String> {
	params
		.get(key)
		.filter(|value| !value.is_empty())
		.cloned()
		.ok_or_else(|| {
			ProviderError::new(ErrorKind::AuthorizationFailed).caused_by_msg(format!("missing {} in token response", key))
		})
}

pub fn parse_request_token(body: &str) -> ProviderResult<RequestToken> {
	let params = parse_form(body)?;
	Ok(RequestToken {
		token: required(&params, "oauth_token")?,
		secret: required(&params, "oauth_token_secret")?,
		callback_confirmed: params
			.get("oauth_callback_confirmed")
			.is_some_and(|value| value == "true"),
	})
}

pub fn parse_access_token(body: &str) -> ProviderResult<AccessToken> {
	let params = parse_form(body)?;
	Ok(AccessToken {
		token: required(&params, "oauth_token")?,
		secret: required(&params, "oauth_token_secret")?,
		user_id: params.get("user_id").cloned(),
		screen_name: params.get("screen_name").cloned(),
	})
}
