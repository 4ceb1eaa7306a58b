//! Authenticated Twitter session

use async_trait::async_trait;
use socialite_core::{
	Cursor, ErrorKind, Page, Post, ProviderError, ProviderResult, ProviderSession, Query, Sort, User,
};

use crate::PROVIDER_ID;
use crate::client::{Params, TwitterClient, push_param};
use crate::mapper::{map_raw_tweet, map_raw_tweets, map_user};
use crate::types::{CursoredUsers, SearchResponse, TwitterUser};

/// Session bound to one user's token credentials.
pub struct TwitterSession {
	client: TwitterClient,
}

impl TwitterSession {
	pub fn new(client: TwitterClient) -> Self {
		Self { client }
	}

	async fn timeline(&self, resource: &str, query: &Query, mut params: Params) -> ProviderResult<Page<Post>> {
		push_paging(&mut params, query);
		params.push(("tweet_mode".into(), "extended".into()));

		let raw: Vec<serde_json::Value> = self.client.get(resource, params).await?;
		Ok(filtered_page(query, map_raw_tweets(raw)?))
	}

	async fn users(&self, resource: &str, query: &Query) -> ProviderResult<Page<User>> {
		let mut params = user_selector(query)
			.ok_or_else(|| ProviderError::with_message(ErrorKind::InvalidQuery, "user id or username required"))?;
		params.push(("count".into(), query.limit.to_string()));
		params.push(("skip_status".into(), "true".into()));
		push_param(&mut params, "cursor", user_cursor(query));

		let response: CursoredUsers = self.client.get(resource, params).await?;
		let users: Vec<User> = response.users.iter().map(map_user).collect();
		let cursor = Cursor::new(
			query,
			cursor_marker(&response.previous_cursor_str),
			cursor_marker(&response.next_cursor_str),
		);
		Ok(Page::with_cursor(users, cursor))
	}
}

/// `user_id` wins over `screen_name`.
fn user_selector(query: &Query) -> Option<Params> {
	if !query.user_id.is_empty() {
		Some(vec![("user_id".into(), query.user_id.clone())])
	} else if !query.username.is_empty() {
		Some(vec![("screen_name".into(), query.username.clone())])
	} else {
		None
	}
}

fn push_paging(params: &mut Params, query: &Query) {
	params.push(("count".into(), query.limit.to_string()));
	push_param(params, "since_id", &query.since_id);
	push_param(params, "max_id", &query.until_id);
}

/// Twitter reports the end of a cursored list as `"0"`.
fn cursor_marker(raw: &str) -> String {
	if raw == "0" { String::new() } else { raw.to_string() }
}

/// Twitter list cursor to request: `prev` pages carry it in `since_id`,
/// `next` pages in `until_id`.
fn user_cursor(query: &Query) -> &str {
	if query.since_id.is_empty() {
		&query.until_id
	} else {
		&query.since_id
	}
}

/// Page over the fetched batch. The cursor comes from the batch before
/// `query.filter` is applied, so an all-filtered batch still pages on.
fn filtered_page(query: &Query, posts: Vec<Post>) -> Page<Post> {
	let cursor = Cursor::from_items(query, &posts);
	Page::with_cursor(filter_posts(posts, &query.filter), cursor)
}

/// Keeps posts whose contents mention `filter`, case-insensitively.
fn filter_posts(posts: Vec<Post>, filter: &str) -> Vec<Post> {
	let filter = filter.trim().to_lowercase();
	if filter.is_empty() {
		return posts;
	}
	posts
		.into_iter()
		.filter(|post| post.contents.to_lowercase().contains(&filter))
		.collect()
}

/// Message with `share_link` appended unless it already contains it.
pub fn compose_status(message: &str, share_link: &str) -> String {
	let share_link = share_link.trim();
	if share_link.is_empty() || message.contains(share_link) {
		message.to_string()
	} else if message.is_empty() {
		share_link.to_string()
	} else {
		format!("{} {}", message, share_link)
	}
}

#[async_trait]
impl ProviderSession for TwitterSession {
	fn provider_id(&self) -> &str {
		PROVIDER_ID
	}

	async fn post(&self, message: &str, share_link: &str) -> ProviderResult<Post> {
		let status = compose_status(message, share_link);
		if status.is_empty() {
			return Err(ProviderError::with_message(ErrorKind::InvalidContent, "empty status"));
		}

		let raw: serde_json::Value = self
			.client
			.post("statuses/update", vec![("status".into(), status)])
			.await?;
		let mut post = map_raw_tweet(raw)?;
		post.url = format!("https://twitter.com/statuses/{}", post.id);

		tracing::info!(provider = PROVIDER_ID, post_id = %post.id, "Published status");
		Ok(post)
	}

	async fn search(&self, query: &Query) -> ProviderResult<Page<Post>> {
		if !query.username.is_empty() {
			let params = vec![("screen_name".into(), query.username.clone())];
			return self.timeline("statuses/user_timeline", query, params).await;
		}

		let keywords = query.search.keywords(true);
		if keywords.is_empty() {
			return Err(ProviderError::with_message(ErrorKind::InvalidQuery, "empty search"));
		}

		let result_type = match query.sort {
			Sort::Popular => "mixed",
			Sort::Recent => "recent",
		};
		let mut params: Params = vec![
			("q".into(), keywords),
			("result_type".into(), result_type.into()),
			("tweet_mode".into(), "extended".into()),
		];
		push_paging(&mut params, query);

		let response: SearchResponse = self.client.get("search/tweets", params).await?;
		Ok(filtered_page(query, map_raw_tweets(response.statuses)?))
	}

	async fn get_feed(&self, query: &Query) -> ProviderResult<Page<Post>> {
		self.timeline("statuses/home_timeline", query, Vec::new()).await
	}

	async fn get_posts(&self, query: &Query) -> ProviderResult<Page<Post>> {
		self.timeline("statuses/user_timeline", query, Vec::new()).await
	}

	async fn get_user(&self, query: &Query) -> ProviderResult<User> {
		let user: TwitterUser = match user_selector(query) {
			Some(params) => self.client.get("users/show", params).await?,
			None => {
				let params = vec![
					("include_email".into(), "true".into()),
					("skip_status".into(), "true".into()),
				];
				self.client.get("account/verify_credentials", params).await?
			}
		};
		Ok(map_user(&user))
	}

	async fn get_friends(&self, query: &Query) -> ProviderResult<Page<User>> {
		self.users("friends/list", query).await
	}

	async fn get_followers(&self, query: &Query) -> ProviderResult<Page<User>> {
		self.users("followers/list", query).await
	}
}
