//! Provider-agnostic request parameters
//!
//! A [`Query`] is built from the request's query string (`q`, `filter`,
//! `username`, `userid`, `limit`, `sort`, `since_id`, `until_id`, `perm`).
//! Construction never fails: out-of-range values collapse to defaults.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::permission::Permission;

/// Number of results when `limit` is absent or out of range.
pub const DEFAULT_NUM_RESULTS: u32 = 20;
/// Largest accepted `limit`.
pub const MAX_NUM_RESULTS: u32 = 50;

/// Raw query-string parameters.
pub type QueryParams = BTreeMap<String, String>;

/// Result ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sort {
	#[default]
	Recent,
	Popular,
}

impl Sort {
	/// Parses a sort value; anything but `"popular"` is [`Sort::Recent`].
	pub fn parse(text: &str) -> Self {
		if text == "popular" {
			Sort::Popular
		} else {
			Sort::Recent
		}
	}

	pub const fn as_str(self) -> &'static str {
		match self {
			Sort::Recent => "recent",
			Sort::Popular => "popular",
		}
	}
}

impl fmt::Display for Sort {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Search text split by leading sigil.
///
/// `@name` tokens become usernames, `#tag` tokens become tags and everything
/// else is a free-text word.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParts {
	pub usernames: Vec<String>,
	pub tags: Vec<String>,
	pub words: Vec<String>,
}

impl SearchParts {
	pub fn parse(text: &str) -> Self {
		let mut parts = SearchParts::default();
		for token in text.split_whitespace() {
			if let Some(username) = token.strip_prefix('@') {
				parts.usernames.push(username.to_string());
			} else if let Some(tag) = token.strip_prefix('#') {
				parts.tags.push(tag.to_string());
			} else {
				parts.words.push(token.to_string());
			}
		}
		parts
	}

	/// First username of the search, or `""`.
	pub fn username(&self) -> &str {
		self.usernames.first().map(String::as_str).unwrap_or("")
	}

	/// Tags and words only. Tags keep their `#` when `with_prefix` is set.
	pub fn keywords(&self, with_prefix: bool) -> String {
		let tag_prefix = if with_prefix { "#" } else { "" };
		join_parts(&[(&self.tags, tag_prefix), (&self.words, "")])
	}

	pub fn is_empty(&self) -> bool {
		self.usernames.is_empty() && self.tags.is_empty() && self.words.is_empty()
	}
}

impl fmt::Display for SearchParts {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&join_parts(&[
			(&self.usernames, "@"),
			(&self.tags, "#"),
			(&self.words, ""),
		]))
	}
}

fn join_parts(groups: &[(&Vec<String>, &str)]) -> String {
	groups
		.iter()
		.flat_map(|(items, prefix)| items.iter().map(move |item| format!("{}{}", prefix, item)))
		.collect::<Vec<_>>()
		.join(" ")
}

/// Normalized request parameters, passed by value between pagination steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
	pub search: SearchParts,
	/// Second-pass keyword filter
	pub filter: String,
	pub username: String,
	pub user_id: String,
	pub limit: u32,
	pub sort: Sort,
	pub since_id: String,
	pub until_id: String,
	pub perm: Permission,
	/// Original parameters, kept for provider-specific extensions
	pub params: QueryParams,
}

impl Default for Query {
	fn default() -> Self {
		Self {
			search: SearchParts::default(),
			filter: String::new(),
			username: String::new(),
			user_id: String::new(),
			limit: DEFAULT_NUM_RESULTS,
			sort: Sort::Recent,
			since_id: String::new(),
			until_id: String::new(),
			perm: Permission::None,
			params: QueryParams::new(),
		}
	}
}

impl Query {
	/// The empty query: no filters, default limit and sort.
	pub fn none() -> Self {
		Self::default()
	}

	/// Builds a query from raw parameters, applying defaults and clamps.
	pub fn from_params(params: &QueryParams) -> Self {
		let get = |key: &str| params.get(key).map(String::as_str).unwrap_or("");

		let mut search = SearchParts::parse(get("q"));
		let mut username = get("username").trim().to_string();
		if username.is_empty() {
			username = search.username().to_string();
		} else if !search.usernames.contains(&username) {
			search.usernames.push(username.clone());
		}

		let limit = get("limit")
			.trim()
			.parse::<u32>()
			.ok()
			.filter(|limit| (1..=MAX_NUM_RESULTS).contains(limit))
			.unwrap_or(DEFAULT_NUM_RESULTS);

		let perm = match get("perm") {
			"" => Permission::None,
			text => Permission::decode(text),
		};

		Self {
			search,
			filter: get("filter").to_string(),
			username,
			user_id: get("userid").to_string(),
			limit,
			sort: Sort::parse(get("sort")),
			since_id: get("since_id").to_string(),
			until_id: get("until_id").to_string(),
			perm,
			params: params.clone(),
		}
	}

	/// Parses a raw `a=b&c=d` query string. Malformed input yields the
	/// empty query.
	pub fn from_query_str(query: &str) -> Self {
		let params: QueryParams = serde_urlencoded::from_str(query).unwrap_or_default();
		Self::from_params(&params)
	}

	/// Renders the query back into parameters, on top of the original ones.
	pub fn to_params(&self) -> QueryParams {
		let mut params = self.params.clone();
		let mut set = |key: &str, value: String| {
			if !value.is_empty() {
				params.insert(key.to_string(), value);
			}
		};

		set("q", self.search.to_string());
		set("filter", self.filter.clone());
		set("username", self.username.clone());
		set("userid", self.user_id.clone());
		set("limit", self.limit.to_string());
		if self.sort != Sort::Recent {
			set("sort", self.sort.to_string());
		}
		set("since_id", self.since_id.clone());
		set("until_id", self.until_id.clone());
		set("perm", self.perm.to_string());

		params
	}

	/// Encodes [`Query::to_params`] as a query string.
	pub fn to_query_string(&self) -> String {
		serde_urlencoded::to_string(self.to_params()).unwrap_or_default()
	}

	pub fn with_username(mut self, username: impl Into<String>) -> Self {
		self.username = username.into();
		self
	}

	pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
		self.user_id = user_id.into();
		self
	}

	pub fn with_limit(mut self, limit: u32) -> Self {
		self.limit = if (1..=MAX_NUM_RESULTS).contains(&limit) {
			limit
		} else {
			DEFAULT_NUM_RESULTS
		};
		self
	}
}
