//! Provider identifiers

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Case-normalized provider identifier (e.g. `"twitter"`).
///
/// Surrounding whitespace is trimmed and the value is lowercased, so
/// `"Twitter"` and `" twitter "` name the same provider.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ProviderId(String);

impl ProviderId {
	pub fn new(id: impl AsRef<str>) -> Self {
		Self(id.as_ref().trim().to_lowercase())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for ProviderId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<String> for ProviderId {
	fn from(id: String) -> Self {
		ProviderId::new(id)
	}
}

impl From<&str> for ProviderId {
	fn from(id: &str) -> Self {
		ProviderId::new(id)
	}
}

impl From<ProviderId> for String {
	fn from(id: ProviderId) -> Self {
		id.0
	}
}

impl AsRef<str> for ProviderId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for ProviderId {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl PartialEq<str> for ProviderId {
	fn eq(&self, other: &str) -> bool {
		self.0 == other
	}
}

impl PartialEq<&str> for ProviderId {
	fn eq(&self, other: &&str) -> bool {
		self.0 == *other
	}
}
