//! Access level requested from a provider

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered access level: none < read < write < read-write.
///
/// Encodes to `""`, `"r"`, `"w"` and `"rw"`. Decoding is permissive: any
/// text that is not `"r"`, `"w"` or `"rw"` (the empty string included)
/// decodes to [`Permission::Read`]. Consequently `None` encodes to `""` but
/// `""` decodes to `Read`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Permission {
	#[default]
	None,
	Read,
	Write,
	ReadWrite,
}

impl Permission {
	/// Canonical text encoding.
	pub const fn as_str(self) -> &'static str {
		match self {
			Permission::None => "",
			Permission::Read => "r",
			Permission::Write => "w",
			Permission::ReadWrite => "rw",
		}
	}

	/// Decodes `text`, falling back to [`Permission::Read`].
	pub fn decode(text: &str) -> Self {
		match text {
			"r" => Permission::Read,
			"w" => Permission::Write,
			"rw" => Permission::ReadWrite,
			_ => Permission::Read,
		}
	}

	pub const fn can_read(self) -> bool {
		matches!(self, Permission::Read | Permission::ReadWrite)
	}

	pub const fn can_write(self) -> bool {
		matches!(self, Permission::Write | Permission::ReadWrite)
	}
}

impl fmt::Display for Permission {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for Permission {
	fn from(text: &str) -> Self {
		Permission::decode(text)
	}
}

impl Serialize for Permission {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Permission {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let text = String::deserialize(deserializer)?;
		Ok(Permission::decode(&text))
	}
}
