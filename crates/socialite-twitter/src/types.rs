//! REST API v1.1 payloads

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct TwitterUser {
	pub id_str: String,
	pub screen_name: String,
	pub name: String,
	pub email: Option<String>,
	pub profile_image_url_https: String,
	pub statuses_count: i64,
	pub followers_count: i64,
	pub friends_count: i64,
	pub lang: Option<String>,
	pub location: String,
	pub time_zone: Option<String>,
	pub protected: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tweet {
	pub id_str: String,
	pub created_at: String,
	pub text: String,
	/// Set instead of `text` for `tweet_mode=extended`
	pub full_text: Option<String>,
	pub user: TwitterUser,
	pub retweet_count: i64,
	pub favorite_count: i64,
	pub entities: Entities,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Entities {
	pub hashtags: Vec<Hashtag>,
	pub urls: Vec<UrlEntity>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Hashtag {
	pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UrlEntity {
	pub url: String,
	pub expanded_url: Option<String>,
}

/// `search/tweets` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchResponse {
	pub statuses: Vec<serde_json::Value>,
}

/// `friends/list` and `followers/list` response
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CursoredUsers {
	pub users: Vec<TwitterUser>,
	pub next_cursor_str: String,
	pub previous_cursor_str: String,
}

/// Error body returned with non-2xx responses
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorResponse {
	pub errors: Vec<ApiErrorItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiErrorItem {
	pub code: i64,
	pub message: String,
}
