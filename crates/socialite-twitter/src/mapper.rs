//! Twitter payloads to normalized entities

use std::sync::LazyLock;

use regex::Regex;
use socialite_core::entity::count;
use socialite_core::utils::time::parse_utc_opt;
use socialite_core::{Post, User};

use crate::PROVIDER_ID;
use crate::errors::TwitterError;
use crate::types::{Tweet, TwitterUser};

/// `created_at` layout, e.g. `Wed Aug 27 13:08:45 +0000 2008`
pub const TIME_LAYOUT: &str = "%a %b %d %H:%M:%S %z %Y";

static AVATAR_SIZE_SUFFIX: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?i)_normal(\.[a-z0-9]+)?$").unwrap());

/// Full-size avatar URL: drops the `_normal` size suffix before the
/// extension.
pub fn original_avatar_url(url: &str) -> String {
	AVATAR_SIZE_SUFFIX.replace(url, "$1").into_owned()
}

pub fn profile_url(screen_name: &str) -> String {
	format!("https://twitter.com/{}", screen_name)
}

pub fn status_url(screen_name: &str, id: &str) -> String {
	format!("https://twitter.com/{}/status/{}", screen_name, id)
}

pub fn map_user(user: &TwitterUser) -> User {
	User {
		provider: PROVIDER_ID.to_string(),
		id: user.id_str.clone(),
		username: user.screen_name.clone(),
		name: user.name.clone(),
		email: user.email.clone().unwrap_or_default(),
		profile_url: profile_url(&user.screen_name),
		avatar_url: original_avatar_url(&user.profile_image_url_https),
		num_posts: count(user.statuses_count),
		num_followers: count(user.followers_count),
		num_following: count(user.friends_count),
		lang: user.lang.clone().unwrap_or_default(),
		location: user.location.clone(),
		timezone: user.time_zone.clone().unwrap_or_default(),
		private: user.protected,
		last_sync_at: None,
	}
}

pub fn map_tweet(tweet: &Tweet) -> Post {
	let author = map_user(&tweet.user);
	Post {
		id: tweet.id_str.clone(),
		provider: PROVIDER_ID.to_string(),
		url: status_url(&author.username, &tweet.id_str),
		contents: tweet.full_text.clone().unwrap_or_else(|| tweet.text.clone()),
		num_shares: count(tweet.retweet_count),
		num_likes: count(tweet.favorite_count),
		tags: tweet
			.entities
			.hashtags
			.iter()
			.map(|tag| tag.text.clone())
			.collect(),
		links: tweet
			.entities
			.urls
			.iter()
			.map(|link| link.expanded_url.clone().unwrap_or_else(|| link.url.clone()))
			.collect(),
		published_at: parse_utc_opt(&tweet.created_at, TIME_LAYOUT),
		updated_at: None,
		raw: None,
		author,
	}
}

/// Maps a raw status payload, keeping it on the post.
pub fn map_raw_tweet(raw: serde_json::Value) -> Result<Post, TwitterError> {
	let tweet: Tweet = serde_json::from_value(raw.clone())?;
	let mut post = map_tweet(&tweet);
	post.raw = Some(raw);
	Ok(post)
}

pub fn map_raw_tweets(raw: Vec<serde_json::Value>) -> Result<Vec<Post>, TwitterError> {
	raw.into_iter().map(map_raw_tweet).collect()
}
