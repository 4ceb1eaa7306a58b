//! Signed REST API v1.1 client

use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use socialite_core::flow::{OAuth1Signer, OAuth1Token};

use crate::errors::TwitterError;
use crate::types::ErrorResponse;

/// Request parameters, signed together with the OAuth parameters.
pub type Params = Vec<(String, String)>;

/// Issues user-context requests signed with OAuth 1.0a.
#[derive(Debug, Clone)]
pub struct TwitterClient {
	signer: OAuth1Signer,
	token: OAuth1Token,
	api_base: String,
	http: Client,
}

impl TwitterClient {
	pub fn new(signer: OAuth1Signer, token: OAuth1Token, api_base: impl Into<String>, http: Client) -> Self {
		Self {
			signer,
			token,
			api_base: api_base.into().trim_end_matches('/').to_string(),
			http,
		}
	}

	fn endpoint(&self, resource: &str) -> String {
		format!("{}/{}.json", self.api_base, resource)
	}

	/// `GET {api_base}/{resource}.json`
	pub async fn get<T: DeserializeOwned>(&self, resource: &str, params: Params) -> Result<T, TwitterError> {
		self.send(Method::GET, resource, params).await
	}

	/// `POST {api_base}/{resource}.json` with a form body
	pub async fn post<T: DeserializeOwned>(&self, resource: &str, params: Params) -> Result<T, TwitterError> {
		self.send(Method::POST, resource, params).await
	}

	async fn send<T: DeserializeOwned>(
		&self,
		method: Method,
		resource: &str,
		params: Params,
	) -> Result<T, TwitterError> {
		let url = self.endpoint(resource);
		let header = self
			.signer
			.authorization_header(&method, &url, &params, Some(&self.token))
			.map_err(|err| TwitterError::Signing(err.to_string()))?;

		tracing::debug!(provider = "twitter", method = %method, resource, "Calling twitter api");
		let request = self
			.http
			.request(method.clone(), &url)
			.header(reqwest::header::AUTHORIZATION, header);
		let request = if method == Method::GET {
			request.query(&params)
		} else {
			request.form(&params)
		};

		let response = request.send().await?;
		decode(response).await
	}
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, TwitterError> {
	let status = response.status();
	let body = response.bytes().await?;
	if !status.is_success() {
		let errors = serde_json::from_slice::<ErrorResponse>(&body)
			.map(|parsed| parsed.errors)
			.unwrap_or_default();
		return Err(TwitterError::Api {
			status: status.as_u16(),
			errors,
		});
	}
	Ok(serde_json::from_slice(&body)?)
}

/// Appends `key=value` when `value` is not empty.
pub(crate) fn push_param(params: &mut Params, key: &str, value: &str) {
	if !value.is_empty() {
		params.push((key.to_string(), value.to_string()));
	}
}
