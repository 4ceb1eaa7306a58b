//! Integration test utilities for socialite
//!
//! Wires the bundled providers against a local mock provider server.

use std::sync::Arc;

use socialite::facebook::{FacebookEndpoints, FacebookProvider};
use socialite::twitter::{TwitterEndpoints, TwitterProvider};
use socialite::{
	AppConfig, Credentials, OAuth1Credentials, OAuth2Credentials, OAuthProtocol, ProviderDescriptor,
	ProviderRegistry, ProviderSession,
};

pub mod mock_server;

pub use mock_server::{MockProviderServer, MockResponse, RecordedRequest};

pub const STATE_SECRET: &[u8] = b"integration-state-secret";
pub const TWITTER_CALLBACK: &str = "http://localhost:1515/auth/twitter/callback";
pub const FACEBOOK_CALLBACK: &str = "http://localhost:1515/auth/facebook/callback";

pub fn twitter_provider(server: &MockProviderServer) -> TwitterProvider {
	let provider = TwitterProvider::new().with_endpoints(TwitterEndpoints::with_base_url(&server.base_url()));
	provider
		.configure(&AppConfig::new("twitter-key", "twitter-secret", TWITTER_CALLBACK))
		.expect("twitter config is valid");
	provider
}

pub fn facebook_provider(server: &MockProviderServer) -> FacebookProvider {
	let provider =
		FacebookProvider::new().with_endpoints(FacebookEndpoints::with_base_url(&server.base_url()));
	provider
		.configure(&AppConfig::new("fb-app", "fb-secret", FACEBOOK_CALLBACK))
		.expect("facebook config is valid");
	provider
}

/// Registry with both providers pointed at `server`.
pub fn mock_registry(server: &MockProviderServer) -> ProviderRegistry {
	let mut registry = ProviderRegistry::new();
	registry
		.register("twitter", Arc::new(twitter_provider(server)))
		.expect("twitter registers once");
	registry
		.register("facebook", Arc::new(facebook_provider(server)))
		.expect("facebook registers once");
	registry
}

pub fn mock_protocol(server: &MockProviderServer) -> OAuthProtocol {
	OAuthProtocol::new(Arc::new(mock_registry(server)), STATE_SECRET)
}

pub fn twitter_session(server: &MockProviderServer) -> Box<dyn ProviderSession> {
	let creds: Credentials = OAuth1Credentials::new("twitter", "user-token", "user-secret").into();
	twitter_provider(server)
		.open_session(&creds)
		.expect("twitter session opens")
}

pub fn facebook_session(server: &MockProviderServer) -> Box<dyn ProviderSession> {
	let creds: Credentials = OAuth2Credentials::new("facebook", "user-token").into();
	facebook_provider(server)
		.open_session(&creds)
		.expect("facebook session opens")
}

/// Value of `key` in the query string of `url`.
pub fn query_value(url: &str, key: &str) -> Option<String> {
	url::Url::parse(url)
		.ok()?
		.query_pairs()
		.find(|(k, _)| k == key)
		.map(|(_, v)| v.into_owned())
}

pub fn twitter_user_json(id: &str, screen_name: &str) -> serde_json::Value {
	serde_json::json!({
		"id_str": id,
		"screen_name": screen_name,
		"name": "Jane Doe",
		"email": "jane@example.com",
		"profile_image_url_https": "https://pbs.twimg.com/profile_images/1/avatar_normal.jpg",
		"statuses_count": 1200,
		"followers_count": 340,
		"friends_count": 56,
		"lang": "en",
		"location": "Vancouver",
		"time_zone": "Pacific Time (US & Canada)",
		"protected": false
	})
}

pub fn tweet_json(id: &str, text: &str) -> serde_json::Value {
	serde_json::json!({
		"id_str": id,
		"created_at": "Wed Aug 27 13:08:45 +0000 2008",
		"full_text": text,
		"user": twitter_user_json("12345", "jane"),
		"retweet_count": 3,
		"favorite_count": 7,
		"entities": {
			"hashtags": [{"text": "rust"}],
			"urls": [{"url": "https://t.co/x", "expanded_url": "https://www.rust-lang.org"}]
		}
	})
}
