//! Authenticated Facebook session

use async_trait::async_trait;
use socialite_core::{ErrorKind, Page, Post, ProviderError, ProviderResult, ProviderSession, Query, User};

use crate::PROVIDER_ID;
use crate::client::GraphClient;
use crate::errors::is_node_type_page;
use crate::mapper::{BASIC_FIELDS, USER_FIELDS, map_user};
use crate::types::UserProfile;

pub struct FacebookSession {
	graph: GraphClient,
}

impl FacebookSession {
	pub fn new(graph: GraphClient) -> Self {
		Self { graph }
	}
}

#[async_trait]
impl ProviderSession for FacebookSession {
	fn provider_id(&self) -> &str {
		PROVIDER_ID
	}

	async fn search(&self, _query: &Query) -> ProviderResult<Page<Post>> {
		Err(ProviderError::new(ErrorKind::Unsupported))
	}

	/// The authenticated user, or a node by `user_id`. Lookups by username
	/// are not offered by the Graph API.
	async fn get_user(&self, query: &Query) -> ProviderResult<User> {
		let node = if !query.user_id.is_empty() {
			query.user_id.as_str()
		} else if !query.username.is_empty() {
			return Err(ProviderError::new(ErrorKind::UsernameSearchUnsupported));
		} else {
			"me"
		};

		let profile: UserProfile = match self.graph.get(node, &[("fields", USER_FIELDS)]).await {
			Ok(profile) => profile,
			Err(err) if is_node_type_page(&err) => {
				tracing::debug!(provider = PROVIDER_ID, node, "Node is a page, retrying with basic fields");
				self.graph.get(node, &[("fields", BASIC_FIELDS)]).await?
			}
			Err(err) => return Err(err.into()),
		};
		Ok(map_user(&profile))
	}
}
