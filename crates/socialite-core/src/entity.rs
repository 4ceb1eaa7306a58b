//! Normalized users and posts
//!
//! Flattened, provider-tagged records built by each provider's mapper. The
//! original payload of a post is kept in [`Post::raw`] for callers that need
//! provider-specific fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cursor::Identified;

/// A social profile, normalized across providers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
	pub provider: String,
	pub id: String,
	pub username: String,
	pub name: String,
	pub email: String,
	pub profile_url: String,
	pub avatar_url: String,
	pub num_posts: i32,
	pub num_followers: i32,
	pub num_following: i32,
	pub lang: String,
	pub location: String,
	pub timezone: String,
	pub private: bool,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_sync_at: Option<DateTime<Utc>>,
}

impl Identified for User {
	fn id(&self) -> &str {
		&self.id
	}
}

/// A post (tweet, status, ...), normalized across providers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
	pub id: String,
	pub provider: String,
	pub url: String,
	pub author: User,
	pub contents: String,
	pub num_shares: i32,
	pub num_likes: i32,
	#[serde(default)]
	pub tags: Vec<String>,
	#[serde(default)]
	pub links: Vec<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub published_at: Option<DateTime<Utc>>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub updated_at: Option<DateTime<Utc>>,
	/// Provider payload the post was mapped from
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub raw: Option<serde_json::Value>,
}

impl Identified for Post {
	fn id(&self) -> &str {
		&self.id
	}
}

/// Clamps a provider counter into the normalized `i32` range.
pub fn count(value: impl TryInto<i32>) -> i32 {
	value.try_into().unwrap_or(i32::MAX)
}
