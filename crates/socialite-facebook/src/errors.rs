//! Facebook error translation
//!
//! Error codes: https://developers.facebook.com/docs/graph-api/using-graph-api/error-handling

use socialite_core::{ErrorKind, ProviderError};
use thiserror::Error;

use crate::types::GraphError;

/// Native errors of the Graph client. Never leaves this crate
/// untranslated.
#[derive(Debug, Error)]
pub enum FacebookError {
	#[error("graph api error (#{}) {}", .error.code, .error.message)]
	Graph { status: u16, error: GraphError },
	#[error("graph request failed with status {status}: {body}")]
	Http { status: u16, body: String },
	#[error("graph request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("unexpected graph payload: {0}")]
	Decode(#[from] serde_json::Error),
}

impl FacebookError {
	/// Transport-level rejection of the access token.
	fn is_unauthorized(&self) -> bool {
		match self {
			FacebookError::Http { status, .. } => *status == 401,
			FacebookError::Transport(err) => {
				err.status().is_some_and(|status| status == reqwest::StatusCode::UNAUTHORIZED)
			}
			_ => false,
		}
	}
}

/// Result of looking a native error up in the code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
	Kind(ErrorKind),
	/// A field was requested that Page nodes do not have; retry with the
	/// basic field set.
	NodeTypePage,
	Unknown,
}

pub fn classify(err: &FacebookError) -> Classification {
	if err.is_unauthorized() {
		return Classification::Kind(ErrorKind::AuthorizationFailed);
	}
	let FacebookError::Graph { error, .. } = err else {
		return Classification::Unknown;
	};

	let kind = match error.code {
		1 | 2 => ErrorKind::ProviderDown,
		4 | 17 | 341 => ErrorKind::RateLimited,
		10 => ErrorKind::MustReauthorize,
		// "(#100) Tried accessing nonexisting field (email) on node type (Page)"
		100 if error.message.contains("Page") => return Classification::NodeTypePage,
		102 | 190 => match error.error_subcode {
			458 | 459 | 460 => ErrorKind::MustReauthorize,
			463 => ErrorKind::ExpiredToken,
			464 => ErrorKind::DisabledAccount,
			_ => ErrorKind::InvalidToken,
		},
		506 => ErrorKind::DuplicatePost,
		803 => ErrorKind::UsernameSearchUnsupported,
		_ => return Classification::Unknown,
	};
	Classification::Kind(kind)
}

pub fn is_node_type_page(err: &FacebookError) -> bool {
	classify(err) == Classification::NodeTypePage
}

/// Translates a native error into the shared taxonomy. The Page-node signal
/// is internal; if it escapes a retry it surfaces as unknown.
pub fn provider_error(err: FacebookError) -> ProviderError {
	match classify(&err) {
		Classification::Kind(kind) => {
			tracing::warn!(provider = "facebook", kind = ?kind, error = %err, "Facebook request failed");
			ProviderError::new(kind)
		}
		Classification::NodeTypePage | Classification::Unknown => {
			tracing::warn!(provider = "facebook", error = %err, "Unclassified facebook error");
			ProviderError::unknown(err)
		}
	}
}

impl From<FacebookError> for ProviderError {
	fn from(err: FacebookError) -> Self {
		provider_error(err)
	}
}
