//! Provider session contract

use async_trait::async_trait;

use crate::cursor::Page;
use crate::entity::{Post, User};
use crate::error::{ErrorKind, ProviderError, ProviderResult};
use crate::query::Query;

/// Authenticated handle to one provider, bound to one set of credentials.
///
/// Every provider exposes the same operation set. An operation a provider
/// cannot serve fails with [`ErrorKind::Unsupported`] (the network has no
/// such capability) or [`ErrorKind::NotImplemented`] (not wired up yet),
/// which is what the default bodies return.
#[async_trait]
pub trait ProviderSession: Send + Sync {
	/// Id of the provider this session talks to
	fn provider_id(&self) -> &str;

	/// Publishes `message`, appending `share_link` when given, and returns the
	/// created post.
	async fn post(&self, _message: &str, _share_link: &str) -> ProviderResult<Post> {
		Err(ProviderError::new(ErrorKind::NotImplemented))
	}

	/// Searches content on the provider network.
	async fn search(&self, _query: &Query) -> ProviderResult<Page<Post>> {
		Err(ProviderError::new(ErrorKind::NotImplemented))
	}

	/// The user's feed / wall.
	async fn get_feed(&self, _query: &Query) -> ProviderResult<Page<Post>> {
		Err(ProviderError::new(ErrorKind::NotImplemented))
	}

	/// The user's own posts.
	async fn get_posts(&self, _query: &Query) -> ProviderResult<Page<Post>> {
		Err(ProviderError::new(ErrorKind::NotImplemented))
	}

	/// A profile: by `user_id`, by `username`, or the authenticated user for
	/// [`Query::none`].
	async fn get_user(&self, query: &Query) -> ProviderResult<User>;

	/// Accounts the user follows.
	async fn get_friends(&self, _query: &Query) -> ProviderResult<Page<User>> {
		Err(ProviderError::new(ErrorKind::NotImplemented))
	}

	/// Accounts following the user.
	async fn get_followers(&self, _query: &Query) -> ProviderResult<Page<User>> {
		Err(ProviderError::new(ErrorKind::NotImplemented))
	}
}
