//! Mock social provider for integration tests
//!
//! Serves canned responses per `(method, path)` and records every request
//! so tests can assert on what the provider received.

use bytes::Bytes;
use http_body_util::{BodyExt, Full};
use hyper::{Method, Request, Response, StatusCode, body::Incoming};
use hyper_util::rt::TokioIo;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Canned response for one route
#[derive(Clone, Debug)]
pub struct MockResponse {
	pub status: StatusCode,
	pub content_type: &'static str,
	pub body: String,
}

impl MockResponse {
	pub fn json(status: u16, body: serde_json::Value) -> Self {
		Self {
			status: StatusCode::from_u16(status).unwrap(),
			content_type: "application/json",
			body: body.to_string(),
		}
	}

	/// `application/x-www-form-urlencoded` body, as OAuth1 token endpoints reply
	pub fn form(status: u16, body: &str) -> Self {
		Self {
			status: StatusCode::from_u16(status).unwrap(),
			content_type: "application/x-www-form-urlencoded",
			body: body.to_string(),
		}
	}

	pub fn text(status: u16, body: &str) -> Self {
		Self {
			status: StatusCode::from_u16(status).unwrap(),
			content_type: "text/plain",
			body: body.to_string(),
		}
	}
}

/// A request as the mock received it
#[derive(Clone, Debug)]
pub struct RecordedRequest {
	pub method: Method,
	pub path: String,
	pub query: String,
	pub authorization: Option<String>,
	pub body: String,
}

impl RecordedRequest {
	/// Value of `key` in the query string, or in the form body.
	pub fn param(&self, key: &str) -> Option<String> {
		url::form_urlencoded::parse(self.query.as_bytes())
			.chain(url::form_urlencoded::parse(self.body.as_bytes()))
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.into_owned())
	}
}

#[derive(Default)]
struct MockServerState {
	routes: HashMap<(Method, String), MockResponse>,
	requests: Vec<RecordedRequest>,
}

/// Mock provider HTTP server
pub struct MockProviderServer {
	state: Arc<Mutex<MockServerState>>,
	local_addr: SocketAddr,
}

impl MockProviderServer {
	/// Create a new mock server
	pub async fn new() -> Self {
		let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
		let local_addr = listener.local_addr().unwrap();
		let state = Arc::new(Mutex::new(MockServerState::default()));

		let state_clone = state.clone();
		tokio::spawn(async move {
			let state = state_clone;
			loop {
				if let Ok((stream, _)) = listener.accept().await {
					let io = TokioIo::new(stream);
					let state = state.clone();

					tokio::spawn(async move {
						let service = hyper::service::service_fn(move |req: Request<Incoming>| {
							let state = state.clone();
							async move { handle_request(req, state).await }
						});

						let _ = hyper::server::conn::http1::Builder::new()
							.serve_connection(io, service)
							.await;
					});
				}
			}
		});

		// Wait for server to start
		tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

		Self { state, local_addr }
	}

	/// Serve `response` for `method` requests to `path`
	pub fn respond(&self, method: Method, path: &str, response: MockResponse) {
		let mut state = self.state.lock().unwrap();
		state.routes.insert((method, path.to_string()), response);
	}

	/// Every request received so far, oldest first
	pub fn requests(&self) -> Vec<RecordedRequest> {
		self.state.lock().unwrap().requests.clone()
	}

	/// Requests received for `path`
	pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
		self.requests()
			.into_iter()
			.filter(|request| request.path == path)
			.collect()
	}

	/// Get the base URL for this server
	pub fn base_url(&self) -> String {
		format!("http://{}", self.local_addr)
	}
}

/// Handle incoming requests
async fn handle_request(
	req: Request<Incoming>,
	state: Arc<Mutex<MockServerState>>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
	let (parts, body) = req.into_parts();
	let body = body.collect().await?.to_bytes();

	let recorded = RecordedRequest {
		method: parts.method.clone(),
		path: parts.uri.path().to_string(),
		query: parts.uri.query().unwrap_or_default().to_string(),
		authorization: parts
			.headers
			.get(hyper::header::AUTHORIZATION)
			.and_then(|value| value.to_str().ok())
			.map(str::to_string),
		body: String::from_utf8_lossy(&body).into_owned(),
	};

	let mut state = state.lock().unwrap();
	let route = state
		.routes
		.get(&(recorded.method.clone(), recorded.path.clone()))
		.cloned();
	state.requests.push(recorded);

	let response = route.unwrap_or_else(|| {
		MockResponse::json(404, serde_json::json!({"error": "no route configured"}))
	});

	Ok(Response::builder()
		.status(response.status)
		.header("Content-Type", response.content_type)
		.body(Full::from(Bytes::from(response.body)))
		.unwrap())
}
