//! Facebook OAuth 2.0 flow
//!
//! Besides the user token, the exchange collects a token for every Page
//! the user manages.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use socialite_core::flow::OAuth2Flow;
use socialite_core::{
	CallbackParams, Credentials, ErrorKind, OAuth2Credentials, OAuthFlow, Permission, ProviderError,
	ProviderResult, StateClaims,
};

use crate::PROVIDER_ID;
use crate::client::GraphClient;
use crate::types::AccountsResponse;

// https://developers.facebook.com/docs/facebook-login/permissions/v2.11
pub const LOGIN_SCOPE: &[&str] = &["public_profile", "email", "user_location"];
pub const READ_SCOPE: &[&str] = &[
	"user_friends",
	"user_posts",
	"user_status",
	"user_likes",
	"user_photos",
	"user_videos",
];
pub const WRITE_SCOPE: &[&str] = &["manage_pages", "publish_pages", "publish_actions"];

/// Scopes requested for `perm`. Login scopes are always included.
pub fn scopes(perm: Permission) -> Vec<&'static str> {
	let mut scope = LOGIN_SCOPE.to_vec();
	match perm {
		Permission::Read => scope.extend_from_slice(READ_SCOPE),
		Permission::Write => scope.extend_from_slice(WRITE_SCOPE),
		Permission::ReadWrite => {
			scope.extend_from_slice(READ_SCOPE);
			scope.extend_from_slice(WRITE_SCOPE);
		}
		Permission::None => {}
	}
	scope
}

pub struct FacebookOAuth {
	flow: OAuth2Flow,
	graph_base: String,
	http: Client,
}

impl FacebookOAuth {
	pub fn new(flow: OAuth2Flow, graph_base: impl Into<String>, http: Client) -> Self {
		Self {
			flow,
			graph_base: graph_base.into(),
			http,
		}
	}

	/// Tokens for the pages the user manages. They reuse the user token's
	/// type, refresh token and expiry.
	async fn page_credentials(&self, user: &OAuth2Credentials) -> Vec<Credentials> {
		let graph = GraphClient::new(&user.access_token, &self.graph_base, self.http.clone());
		let accounts: AccountsResponse = match graph.get("me/accounts", &[]).await {
			Ok(accounts) => accounts,
			Err(err) => {
				tracing::debug!(provider = PROVIDER_ID, error = %err, "Could not list facebook pages");
				return Vec::new();
			}
		};

		accounts
			.data
			.into_iter()
			.filter(|account| !account.access_token.is_empty())
			.map(|account| {
				let mut page = user.clone();
				page.access_token = account.access_token;
				page.provider_user_id = account.id;
				Credentials::OAuth2(page)
			})
			.collect()
	}
}

#[async_trait]
impl OAuthFlow for FacebookOAuth {
	fn provider_id(&self) -> &str {
		PROVIDER_ID
	}

	fn verifier_param(&self) -> &'static str {
		"code"
	}

	async fn authorization_url(&self, state_token: &str, claims: &StateClaims) -> ProviderResult<String> {
		let scope = scopes(claims.permission()).join(",");
		let mut params = vec![
			("access_type", "offline"),
			("approval_prompt", "force"),
			("scope", scope.as_str()),
		];
		if claims.force_login() {
			params.push(("auth_type", "reauthenticate"));
		}
		self.flow.authorization_url(state_token, &params)
	}

	async fn exchange(&self, callback: &CallbackParams) -> ProviderResult<Vec<Credentials>> {
		if let Some(denial) = callback.denial() {
			return Err(ProviderError::new(ErrorKind::AuthorizationFailed).caused_by_msg(denial));
		}
		let code = callback.get("code");
		if code.is_empty() {
			return Err(ProviderError::new(ErrorKind::EmptyAuthorizationCode)
				.caused_by_msg("empty code in facebook callback"));
		}

		let user = self.flow.exchange_code(code).await?.into_credentials(PROVIDER_ID, Utc::now());
		let pages = self.page_credentials(&user).await;

		tracing::debug!(provider = PROVIDER_ID, pages = pages.len(), "Exchanged facebook code");
		let mut creds = Vec::with_capacity(pages.len() + 1);
		creds.push(Credentials::OAuth2(user));
		creds.extend(pages);
		Ok(creds)
	}
}
