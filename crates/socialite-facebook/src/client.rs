//! Graph API client

use reqwest::{Client, Response};
use serde::de::DeserializeOwned;

use crate::errors::FacebookError;
use crate::types::ErrorEnvelope;

/// Graph API version every request is pinned to.
pub const GRAPH_API_VERSION: &str = "v2.11";

/// Issues Graph API requests with one access token.
#[derive(Debug, Clone)]
pub struct GraphClient {
	access_token: String,
	graph_base: String,
	http: Client,
}

impl GraphClient {
	pub fn new(access_token: impl Into<String>, graph_base: impl Into<String>, http: Client) -> Self {
		Self {
			access_token: access_token.into(),
			graph_base: graph_base.into().trim_end_matches('/').to_string(),
			http,
		}
	}

	/// `GET {graph_base}/{path}`
	pub async fn get<T: DeserializeOwned>(&self, path: &str, params: &[(&str, &str)]) -> Result<T, FacebookError> {
		let url = format!("{}/{}", self.graph_base, path.trim_start_matches('/'));
		tracing::debug!(provider = "facebook", path, "Calling graph api");

		let response = self
			.http
			.get(&url)
			.query(params)
			.query(&[("access_token", self.access_token.as_str())])
			.send()
			.await?;
		decode(response).await
	}
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, FacebookError> {
	let status = response.status();
	let body = response.bytes().await?;
	if !status.is_success() {
		let envelope = serde_json::from_slice::<ErrorEnvelope>(&body).unwrap_or_default();
		return Err(match envelope.error {
			Some(error) => FacebookError::Graph {
				status: status.as_u16(),
				error,
			},
			None => FacebookError::Http {
				status: status.as_u16(),
				body: String::from_utf8_lossy(&body).into_owned(),
			},
		});
	}
	Ok(serde_json::from_slice(&body)?)
}
