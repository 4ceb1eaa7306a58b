//! Provider-independent error taxonomy
//!
//! Every provider translates its native errors into a [`ProviderError`] at
//! the provider boundary, so callers only ever match on the closed set of
//! [`ErrorKind`]s below. Codes are stable and grouped by band:
//!
//! | Band | Meaning |
//! |------|---------|
//! | `1..999` | registry |
//! | `1000..1999` | authorization |
//! | `2000..2999` | query / content |
//! | `5000..5999` | infrastructure / unclassified |

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

/// Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Boxed underlying cause kept for diagnostics.
pub type ErrorCause = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of provider-independent error kinds.
///
/// The `Display` output of each kind is its canonical, user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[non_exhaustive]
pub enum ErrorKind {
	// Registry
	#[error("unknown provider id")]
	UnknownProvider,
	#[error("provider has not been configured")]
	ProviderNotConfigured,

	// Authorization
	#[error("missing provider credentials, please connect your social account first")]
	NoCredentials,
	#[error("provider authorization failed, please re-connect your social account")]
	AuthorizationFailed,
	#[error("invalid provider token, please re-connect your social account")]
	InvalidToken,
	#[error("expired provider token, please re-connect your social account")]
	ExpiredToken,
	#[error("hit token rate limit")]
	RateLimited,
	#[error("disabled account")]
	DisabledAccount,
	#[error("authentication error, please re-connect your social account")]
	MustReauthorize,
	#[error("unable to fetch user profile")]
	UserFetchFailed,
	#[error("empty code in callback")]
	EmptyAuthorizationCode,

	// Queries and content
	#[error("invalid request query")]
	InvalidQuery,
	#[error("provider does not have access for this query")]
	NoQueryAccess,
	#[error("invalid asset")]
	InvalidAsset,
	#[error("unable to post asset")]
	PostFailed,
	#[error("duplicate post")]
	DuplicatePost,
	#[error("provider doesn't allow @username searches, @page (brand) searches work")]
	UsernameSearchUnsupported,
	#[error("user unauthorized to make this query")]
	UnauthorizedQuery,

	// Everything else
	#[error("unknown provider error")]
	Unknown,
	#[error("provider is down")]
	ProviderDown,
	#[error("unsupported operation")]
	Unsupported,
	#[error("not implemented")]
	NotImplemented,
	#[error("empty title and url provided")]
	InvalidContent,
}

impl ErrorKind {
	/// Every kind, in code order.
	pub const ALL: [ErrorKind; 23] = [
		ErrorKind::UnknownProvider,
		ErrorKind::ProviderNotConfigured,
		ErrorKind::NoCredentials,
		ErrorKind::AuthorizationFailed,
		ErrorKind::InvalidToken,
		ErrorKind::ExpiredToken,
		ErrorKind::RateLimited,
		ErrorKind::DisabledAccount,
		ErrorKind::MustReauthorize,
		ErrorKind::UserFetchFailed,
		ErrorKind::EmptyAuthorizationCode,
		ErrorKind::InvalidQuery,
		ErrorKind::NoQueryAccess,
		ErrorKind::InvalidAsset,
		ErrorKind::PostFailed,
		ErrorKind::DuplicatePost,
		ErrorKind::UsernameSearchUnsupported,
		ErrorKind::UnauthorizedQuery,
		ErrorKind::Unknown,
		ErrorKind::ProviderDown,
		ErrorKind::Unsupported,
		ErrorKind::NotImplemented,
		ErrorKind::InvalidContent,
	];

	/// Stable numeric code of this kind.
	pub const fn code(self) -> u16 {
		match self {
			ErrorKind::UnknownProvider => 1,
			ErrorKind::ProviderNotConfigured => 2,
			ErrorKind::NoCredentials => 1000,
			ErrorKind::AuthorizationFailed => 1001,
			ErrorKind::InvalidToken => 1002,
			ErrorKind::ExpiredToken => 1003,
			ErrorKind::RateLimited => 1004,
			ErrorKind::DisabledAccount => 1005,
			ErrorKind::MustReauthorize => 1006,
			ErrorKind::UserFetchFailed => 1007,
			ErrorKind::EmptyAuthorizationCode => 1008,
			ErrorKind::InvalidQuery => 2000,
			ErrorKind::NoQueryAccess => 2001,
			ErrorKind::InvalidAsset => 2002,
			ErrorKind::PostFailed => 2003,
			ErrorKind::DuplicatePost => 2004,
			ErrorKind::UsernameSearchUnsupported => 2005,
			ErrorKind::UnauthorizedQuery => 2006,
			ErrorKind::Unknown => 5000,
			ErrorKind::ProviderDown => 5001,
			ErrorKind::Unsupported => 5002,
			ErrorKind::NotImplemented => 5003,
			ErrorKind::InvalidContent => 5004,
		}
	}

	/// Looks a kind up by its numeric code.
	pub fn from_code(code: u16) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.code() == code)
	}

	/// Whether a calling layer may reasonably retry later.
	///
	/// Nothing in this crate retries; the classification only informs the
	/// caller's own backoff policy.
	pub const fn is_transient(self) -> bool {
		matches!(self, ErrorKind::RateLimited | ErrorKind::ProviderDown)
	}

	/// Whether the user has to go through the OAuth flow again.
	pub const fn requires_reauthorization(self) -> bool {
		matches!(
			self,
			ErrorKind::NoCredentials
				| ErrorKind::AuthorizationFailed
				| ErrorKind::InvalidToken
				| ErrorKind::ExpiredToken
				| ErrorKind::MustReauthorize
		)
	}
}

/// Error reported by any provider operation.
#[derive(Debug, Clone)]
pub struct ProviderError {
	kind: ErrorKind,
	message: String,
	cause: Option<ErrorCause>,
}

impl ProviderError {
	/// Creates an error carrying the canonical message of `kind`.
	pub fn new(kind: ErrorKind) -> Self {
		Self {
			kind,
			message: kind.to_string(),
			cause: None,
		}
	}

	/// Creates an error with a custom message.
	pub fn with_message(kind: ErrorKind, message: impl Into<String>) -> Self {
		Self {
			kind,
			message: message.into(),
			cause: None,
		}
	}

	/// Attaches the original error.
	pub fn caused_by<E>(mut self, cause: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		self.cause = Some(Arc::new(cause));
		self
	}

	/// Attaches a plain-text cause.
	pub fn caused_by_msg(self, cause: impl Into<String>) -> Self {
		self.caused_by(MessageCause(cause.into()))
	}

	/// Wraps an unclassified native error under [`ErrorKind::Unknown`].
	pub fn unknown<E>(cause: E) -> Self
	where
		E: std::error::Error + Send + Sync + 'static,
	{
		Self::new(ErrorKind::Unknown).caused_by(cause)
	}

	pub fn kind(&self) -> ErrorKind {
		self.kind
	}

	pub fn code(&self) -> u16 {
		self.kind.code()
	}

	pub fn message(&self) -> &str {
		&self.message
	}

	/// The wrapped native error, if any.
	pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
		self.cause.as_deref()
	}

	pub fn is(&self, kind: ErrorKind) -> bool {
		self.kind == kind
	}
}

impl From<ErrorKind> for ProviderError {
	fn from(kind: ErrorKind) -> Self {
		ProviderError::new(kind)
	}
}

impl PartialEq for ProviderError {
	fn eq(&self, other: &Self) -> bool {
		self.kind == other.kind && self.message == other.message
	}
}

impl fmt::Display for ProviderError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} - {}", self.kind.code(), self.message)?;
		if let Some(cause) = &self.cause {
			write!(f, ": {}", cause)?;
		}
		Ok(())
	}
}

impl std::error::Error for ProviderError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		self.cause
			.as_deref()
			.map(|cause| cause as &(dyn std::error::Error + 'static))
	}
}

/// Text-only cause for errors that do not originate from a Rust error value.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
struct MessageCause(String);
