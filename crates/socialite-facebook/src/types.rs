//! Graph API payloads

use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct UserProfile {
	pub id: String,
	pub name: String,
	pub first_name: String,
	pub last_name: String,
	pub email: String,
	pub locale: String,
	pub link: String,
	pub picture: Picture,
	pub location: Location,
	pub timezone: Option<f32>,
	pub friends: Friends,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Picture {
	pub data: PictureData,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PictureData {
	pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Location {
	pub id: String,
	pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Friends {
	pub summary: FriendsSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FriendsSummary {
	pub total_count: i64,
}

/// `/me/accounts` response: the pages the user manages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AccountsResponse {
	pub data: Vec<Account>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Account {
	pub id: String,
	pub name: String,
	pub access_token: String,
	pub category: String,
	pub perms: Vec<String>,
}

/// Error body: `{"error": {...}}`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ErrorEnvelope {
	pub error: Option<GraphError>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GraphError {
	pub message: String,
	#[serde(rename = "type")]
	pub error_type: String,
	pub code: i64,
	pub error_subcode: i64,
	pub fbtrace_id: String,
}
