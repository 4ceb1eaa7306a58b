//! Twitter session calls against a mock REST API

use hyper::Method;
use rstest::*;
use serde_json::json;
use socialite::{ErrorKind, Query};
use socialite_integration_tests::{
	MockProviderServer, MockResponse, tweet_json, twitter_session, twitter_user_json,
};

#[rstest]
#[tokio::test]
async fn test_get_user_by_username() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/users/show.json",
		MockResponse::json(200, twitter_user_json("783214", "rustlang")),
	);
	let session = twitter_session(&server);

	// Act
	let user = session
		.get_user(&Query::none().with_username("rustlang"))
		.await
		.unwrap();

	// Assert
	assert_eq!(user.id, "783214");
	assert_eq!(user.username, "rustlang");
	assert_eq!(user.profile_url, "https://twitter.com/rustlang");
	assert_eq!(
		user.avatar_url,
		"https://pbs.twimg.com/profile_images/1/avatar.jpg"
	);

	let requests = server.requests_to("/1.1/users/show.json");
	assert_eq!(requests[0].param("screen_name").as_deref(), Some("rustlang"));
	let header = requests[0].authorization.clone().unwrap();
	assert!(header.contains(r#"oauth_token="user-token""#));
}

#[rstest]
#[tokio::test]
async fn test_feed_pages_with_cursor() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/statuses/home_timeline.json",
		MockResponse::json(
			200,
			json!([
				tweet_json("300", "newest #rust"),
				tweet_json("200", "middle"),
				tweet_json("100", "oldest")
			]),
		),
	);
	let session = twitter_session(&server);
	let query = Query::from_query_str("limit=3&until_id=301");

	// Act
	let page = session.get_feed(&query).await.unwrap();

	// Assert
	let ids: Vec<&str> = page.items.iter().map(|post| post.id.as_str()).collect();
	assert_eq!(ids, vec!["300", "200", "100"]);
	assert_eq!(page.cursor.prev.since_id, "300");
	assert_eq!(page.cursor.next.until_id, "100");
	assert_eq!(page.items[0].tags, vec!["rust".to_string()]);
	assert_eq!(page.items[0].links, vec!["https://www.rust-lang.org".to_string()]);
	assert!(page.items[0].raw.is_some());

	let request = &server.requests_to("/1.1/statuses/home_timeline.json")[0];
	assert_eq!(request.param("count").as_deref(), Some("3"));
	assert_eq!(request.param("max_id").as_deref(), Some("301"));
	assert_eq!(request.param("tweet_mode").as_deref(), Some("extended"));
}

#[rstest]
#[tokio::test]
async fn test_filter_is_applied_to_contents() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/statuses/user_timeline.json",
		MockResponse::json(200, json!([tweet_json("2", "Shipping RUST today"), tweet_json("1", "lunch")])),
	);
	let session = twitter_session(&server);

	// Act
	let page = session
		.get_posts(&Query::from_query_str("filter=rust"))
		.await
		.unwrap();

	// Assert
	assert_eq!(page.len(), 1);
	assert_eq!(page.items[0].id, "2");
}

#[rstest]
#[case::popular("sort=popular", "mixed")]
#[case::recent("", "recent")]
#[tokio::test]
async fn test_search_keywords(#[case] sort: &str, #[case] result_type: &str) {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/search/tweets.json",
		MockResponse::json(200, json!({"statuses": [tweet_json("42", "hello #rust")]})),
	);
	let session = twitter_session(&server);
	let query = Query::from_query_str(&format!("q=%23rust+hello&{}", sort));

	// Act
	let page = session.search(&query).await.unwrap();

	// Assert
	assert_eq!(page.len(), 1);
	let request = &server.requests_to("/1.1/search/tweets.json")[0];
	assert_eq!(request.param("q").as_deref(), Some("#rust hello"));
	assert_eq!(request.param("result_type").as_deref(), Some(result_type));
}

#[rstest]
#[tokio::test]
async fn test_search_by_username_uses_timeline() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/statuses/user_timeline.json",
		MockResponse::json(200, json!([tweet_json("7", "from jane")])),
	);
	let session = twitter_session(&server);

	// Act
	let page = session
		.search(&Query::from_query_str("q=%40jane"))
		.await
		.unwrap();

	// Assert
	assert_eq!(page.len(), 1);
	let request = &server.requests_to("/1.1/statuses/user_timeline.json")[0];
	assert_eq!(request.param("screen_name").as_deref(), Some("jane"));
	assert!(server.requests_to("/1.1/search/tweets.json").is_empty());
}

#[rstest]
#[tokio::test]
async fn test_empty_search_is_invalid_query() {
	// Arrange
	let server = MockProviderServer::new().await;
	let session = twitter_session(&server);

	// Act
	let err = session.search(&Query::none()).await.unwrap_err();

	// Assert
	assert_eq!(err.kind(), ErrorKind::InvalidQuery);
	assert!(server.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_post_status_with_share_link() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::POST,
		"/1.1/statuses/update.json",
		MockResponse::json(200, tweet_json("9001", "Hello https://example.com")),
	);
	let session = twitter_session(&server);

	// Act
	let post = session.post("Hello", "https://example.com").await.unwrap();

	// Assert
	assert_eq!(post.id, "9001");
	assert_eq!(post.url, "https://twitter.com/statuses/9001");
	let request = &server.requests_to("/1.1/statuses/update.json")[0];
	assert_eq!(request.method, Method::POST);
	assert_eq!(request.param("status").as_deref(), Some("Hello https://example.com"));
}

#[rstest]
#[tokio::test]
async fn test_followers_cursor() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/followers/list.json",
		MockResponse::json(
			200,
			json!({
				"users": [twitter_user_json("1", "alice"), twitter_user_json("2", "bob")],
				"next_cursor_str": "1489467234237774933",
				"previous_cursor_str": "0"
			}),
		),
	);
	let session = twitter_session(&server);

	// Act
	let page = session
		.get_followers(&Query::none().with_username("jane"))
		.await
		.unwrap();

	// Assert
	assert_eq!(page.len(), 2);
	assert!(!page.cursor.has_prev());
	assert_eq!(page.cursor.next.until_id, "1489467234237774933");
	let request = &server.requests_to("/1.1/followers/list.json")[0];
	assert_eq!(request.param("screen_name").as_deref(), Some("jane"));
}

#[rstest]
#[tokio::test]
async fn test_followers_prev_cursor_is_sent() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/followers/list.json",
		MockResponse::json(
			200,
			json!({
				"users": [twitter_user_json("3", "carol")],
				"next_cursor_str": "2222",
				"previous_cursor_str": "-1111"
			}),
		),
	);
	let session = twitter_session(&server);
	let first = session
		.get_followers(&Query::none().with_username("jane"))
		.await
		.unwrap();

	// Act
	session.get_followers(&first.cursor.prev).await.unwrap();
	session.get_followers(&first.cursor.next).await.unwrap();

	// Assert
	let requests = server.requests_to("/1.1/followers/list.json");
	assert_eq!(requests.len(), 3);
	assert_eq!(requests[0].param("cursor"), None);
	assert_eq!(requests[1].param("cursor").as_deref(), Some("-1111"));
	assert_eq!(requests[2].param("cursor").as_deref(), Some("2222"));
}

#[rstest]
#[tokio::test]
async fn test_filtered_out_batch_still_pages_on() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/statuses/home_timeline.json",
		MockResponse::json(200, json!([tweet_json("300", "lunch"), tweet_json("200", "coffee")])),
	);
	let session = twitter_session(&server);

	// Act
	let page = session
		.get_feed(&Query::from_query_str("filter=rust"))
		.await
		.unwrap();

	// Assert
	assert!(page.is_empty());
	assert!(page.cursor.has_next());
	assert_eq!(page.cursor.next.until_id, "200");
	assert_eq!(page.cursor.prev.since_id, "300");
}

#[rstest]
#[tokio::test]
async fn test_friends_require_user() {
	// Arrange
	let server = MockProviderServer::new().await;
	let session = twitter_session(&server);

	// Act
	let err = session.get_friends(&Query::none()).await.unwrap_err();

	// Assert
	assert_eq!(err.kind(), ErrorKind::InvalidQuery);
}

#[rstest]
#[case::rate_limited(429, json!({"errors": [{"code": 88, "message": "Rate limit exceeded"}]}), ErrorKind::RateLimited)]
#[case::suspended(403, json!({"errors": [{"code": 64, "message": "Your account is suspended"}]}), ErrorKind::DisabledAccount)]
#[case::over_capacity(503, json!({"errors": [{"code": 130, "message": "Over capacity"}]}), ErrorKind::ProviderDown)]
#[case::unauthorized_without_code(401, json!({"error": "Not authorized."}), ErrorKind::UnauthorizedQuery)]
#[case::unknown_code(400, json!({"errors": [{"code": 999, "message": "?"}]}), ErrorKind::Unknown)]
#[tokio::test]
async fn test_native_errors_are_classified(
	#[case] status: u16,
	#[case] body: serde_json::Value,
	#[case] expected: ErrorKind,
) {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::GET,
		"/1.1/statuses/home_timeline.json",
		MockResponse::json(status, body),
	);
	let session = twitter_session(&server);

	// Act
	let err = session.get_feed(&Query::none()).await.unwrap_err();

	// Assert
	assert_eq!(err.kind(), expected);
	if expected == ErrorKind::Unknown {
		assert!(err.cause().is_some());
	}
}
