//! Facebook OAuth 2.0 authorize / callback round trips

use hyper::Method;
use rstest::*;
use serde_json::json;
use socialite::{AuthorizeOptions, CallbackParams, ErrorKind, Permission};
use socialite_integration_tests::{
	FACEBOOK_CALLBACK, MockProviderServer, MockResponse, mock_protocol, query_value,
};

const TOKEN_PATH: &str = "/v2.11/oauth/access_token";
const ACCOUNTS_PATH: &str = "/v2.11/me/accounts";
const ME_PATH: &str = "/v2.11/me";

#[fixture]
async fn server() -> MockProviderServer {
	let server = MockProviderServer::new().await;
	server.respond(
		Method::POST,
		TOKEN_PATH,
		MockResponse::json(
			200,
			json!({"access_token": "user-token", "token_type": "bearer", "expires_in": 5183999}),
		),
	);
	server.respond(
		Method::GET,
		ACCOUNTS_PATH,
		MockResponse::json(
			200,
			json!({"data": [
				{"id": "page-1", "name": "Rustaceans", "access_token": "page-token", "category": "Community"},
				{"id": "page-2", "name": "Read only"}
			]}),
		),
	);
	server.respond(
		Method::GET,
		ME_PATH,
		MockResponse::json(
			200,
			json!({
				"id": "10153",
				"name": "Jane Doe",
				"email": "jane@example.com",
				"picture": {"data": {"url": "https://graph.facebook.com/10153/picture"}},
				"friends": {"summary": {"total_count": 321}}
			}),
		),
	);
	server
}

async fn state_token(protocol: &socialite::OAuthProtocol, perm: &str) -> String {
	protocol
		.authorize("facebook", perm, AuthorizeOptions::default())
		.await
		.unwrap()
		.state_token
}

#[rstest]
#[tokio::test]
async fn test_authorize_builds_dialog_url(#[future] server: MockProviderServer) {
	// Arrange
	let server = server.await;
	let protocol = mock_protocol(&server);

	// Act
	let pending = protocol
		.authorize("facebook", "rw", AuthorizeOptions { force_login: true })
		.await
		.unwrap();

	// Assert
	assert!(pending.url.starts_with(&format!("{}/v2.11/dialog/oauth?", server.base_url())));
	assert_eq!(query_value(&pending.url, "response_type").as_deref(), Some("code"));
	assert_eq!(query_value(&pending.url, "client_id").as_deref(), Some("fb-app"));
	assert_eq!(query_value(&pending.url, "redirect_uri").as_deref(), Some(FACEBOOK_CALLBACK));
	assert_eq!(query_value(&pending.url, "state"), Some(pending.state_token.clone()));
	assert_eq!(query_value(&pending.url, "auth_type").as_deref(), Some("reauthenticate"));
	let scope = query_value(&pending.url, "scope").unwrap();
	assert!(scope.contains("user_posts"));
	assert!(scope.contains("publish_pages"));

	// The dialog URL is built locally
	assert!(server.requests().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_callback_returns_user_and_page_credentials(#[future] server: MockProviderServer) {
	// Arrange
	let server = server.await;
	let protocol = mock_protocol(&server);
	let state = state_token(&protocol, "rw").await;
	let params: CallbackParams = [("state", state.as_str()), ("code", "the-code")]
		.into_iter()
		.collect();

	// Act
	let outcome = protocol.callback("facebook", &params).await;

	// Assert
	assert!(outcome.is_success(), "callback failed: {:?}", outcome.error);
	let authenticated = outcome.into_result().unwrap();
	assert_eq!(authenticated.credentials.len(), 2);

	let user_creds = &authenticated.credentials[0];
	assert!(user_creds.is_oauth2());
	assert_eq!(user_creds.access_token(), "user-token");
	assert!(user_creds.expires_at().is_some());
	assert_eq!(user_creds.permission(), Permission::ReadWrite);

	let page_creds = &authenticated.credentials[1];
	assert_eq!(page_creds.access_token(), "page-token");
	assert_eq!(page_creds.provider_user_id(), "page-1");
	assert_eq!(page_creds.expires_at(), user_creds.expires_at());
	assert_eq!(page_creds.permission(), Permission::ReadWrite);

	assert_eq!(authenticated.user.provider, "facebook");
	assert_eq!(authenticated.user.id, "10153");
	assert_eq!(authenticated.user.num_followers, 321);

	let token = server.requests_to(TOKEN_PATH);
	assert_eq!(token.len(), 1);
	assert_eq!(token[0].param("code").as_deref(), Some("the-code"));
	assert_eq!(token[0].param("client_secret").as_deref(), Some("fb-secret"));
	assert_eq!(token[0].param("redirect_uri").as_deref(), Some(FACEBOOK_CALLBACK));

	let me = server.requests_to(ME_PATH);
	assert_eq!(me.len(), 1);
	assert_eq!(me[0].param("access_token").as_deref(), Some("user-token"));
}

#[rstest]
#[tokio::test]
async fn test_page_listing_failure_is_ignored() {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::POST,
		TOKEN_PATH,
		MockResponse::json(200, json!({"access_token": "user-token"})),
	);
	server.respond(Method::GET, ME_PATH, MockResponse::json(200, json!({"id": "10153", "name": "Jane"})));
	let protocol = mock_protocol(&server);
	let state = state_token(&protocol, "r").await;
	let params: CallbackParams = [("state", state.as_str()), ("code", "the-code")]
		.into_iter()
		.collect();

	// Act
	let outcome = protocol.callback("facebook", &params).await;

	// Assert
	let authenticated = outcome.into_result().unwrap();
	assert_eq!(authenticated.credentials.len(), 1);
	assert_eq!(authenticated.credentials[0].expires_at(), None);
	assert_eq!(server.requests_to(ACCOUNTS_PATH).len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_error_params_skip_exchange(#[future] server: MockProviderServer) {
	// Arrange
	let server = server.await;
	let protocol = mock_protocol(&server);
	let state = state_token(&protocol, "r").await;
	let params: CallbackParams = [
		("state", state.as_str()),
		("error", "access_denied"),
		("error_reason", "user_denied"),
		("error_description", "Permissions error"),
	]
	.into_iter()
	.collect();

	// Act
	let outcome = protocol.callback("facebook", &params).await;

	// Assert
	let err = outcome.into_result().unwrap_err();
	assert_eq!(err.kind(), ErrorKind::AuthorizationFailed);
	assert!(err.to_string().contains("user_denied"));
	assert!(server.requests_to(TOKEN_PATH).is_empty());
}

#[rstest]
#[tokio::test]
async fn test_empty_code(#[future] server: MockProviderServer) {
	// Arrange
	let server = server.await;
	let protocol = mock_protocol(&server);
	let state = state_token(&protocol, "r").await;
	let params: CallbackParams = [("state", state.as_str())].into_iter().collect();

	// Act
	let outcome = protocol.callback("facebook", &params).await;

	// Assert
	assert_eq!(outcome.error.unwrap().kind(), ErrorKind::EmptyAuthorizationCode);
	assert!(server.requests_to(TOKEN_PATH).is_empty());
}

#[rstest]
#[case::unauthorized(401, ErrorKind::AuthorizationFailed)]
#[case::server_error(500, ErrorKind::Unknown)]
#[tokio::test]
async fn test_token_endpoint_failure(#[case] status: u16, #[case] expected: ErrorKind) {
	// Arrange
	let server = MockProviderServer::new().await;
	server.respond(
		Method::POST,
		TOKEN_PATH,
		MockResponse::json(status, json!({"error": {"message": "nope", "type": "OAuthException", "code": 1}})),
	);
	let protocol = mock_protocol(&server);
	let state = state_token(&protocol, "r").await;
	let params: CallbackParams = [("state", state.as_str()), ("code", "the-code")]
		.into_iter()
		.collect();

	// Act
	let outcome = protocol.callback("facebook", &params).await;

	// Assert
	assert!(outcome.credentials.is_empty());
	assert_eq!(outcome.error.unwrap().kind(), expected);
}

#[rstest]
#[tokio::test]
async fn test_invalid_token_on_user_fetch(#[future] server: MockProviderServer) {
	// Arrange
	let server = server.await;
	server.respond(
		Method::GET,
		ME_PATH,
		MockResponse::json(
			400,
			json!({"error": {"message": "Error validating access token", "type": "OAuthException", "code": 190, "error_subcode": 463}}),
		),
	);
	let protocol = mock_protocol(&server);
	let state = state_token(&protocol, "r").await;
	let params: CallbackParams = [("state", state.as_str()), ("code", "the-code")]
		.into_iter()
		.collect();

	// Act
	let outcome = protocol.callback("facebook", &params).await;

	// Assert
	assert_eq!(outcome.credentials.len(), 2);
	assert!(outcome.user.is_none());
	assert_eq!(outcome.error.unwrap().kind(), ErrorKind::ExpiredToken);
}
