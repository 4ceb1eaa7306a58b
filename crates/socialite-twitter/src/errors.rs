//! Twitter error translation
//!
//! Error codes: https://developer.twitter.com/en/docs/basics/response-codes

use socialite_core::{ErrorKind, ProviderError};
use thiserror::Error;

use crate::types::ApiErrorItem;

pub const ERROR_COULD_NOT_AUTHENTICATE: i64 = 32;
pub const ERROR_DOES_NOT_EXIST: i64 = 34;
pub const ERROR_ACCOUNT_SUSPENDED: i64 = 64;
pub const ERROR_RATE_LIMIT_EXCEEDED: i64 = 88;
pub const ERROR_INVALID_TOKEN: i64 = 89;
pub const ERROR_OVER_CAPACITY: i64 = 130;
pub const ERROR_INTERNAL_ERROR: i64 = 131;
pub const ERROR_COULD_NOT_AUTHENTICATE_YOU: i64 = 135;
pub const ERROR_STATUS_IS_A_DUPLICATE: i64 = 187;
pub const ERROR_BAD_AUTHENTICATION_DATA: i64 = 215;
pub const ERROR_USER_MUST_VERIFY_LOGIN: i64 = 231;

/// Native errors of the Twitter client. Never leaves this crate
/// untranslated.
#[derive(Debug, Error)]
pub enum TwitterError {
	#[error("twitter api error (status {status}): {}", format_errors(.errors))]
	Api { status: u16, errors: Vec<ApiErrorItem> },
	#[error("twitter request failed: {0}")]
	Transport(#[from] reqwest::Error),
	#[error("unexpected twitter payload: {0}")]
	Decode(#[from] serde_json::Error),
	#[error("failed to sign twitter request: {0}")]
	Signing(String),
}

fn format_errors(errors: &[ApiErrorItem]) -> String {
	errors
		.iter()
		.map(|item| format!("[{}] {}", item.code, item.message))
		.collect::<Vec<_>>()
		.join("; ")
}

/// Kind for a Twitter error code, if the code is known.
pub fn kind_for_code(code: i64) -> Option<ErrorKind> {
	let kind = match code {
		ERROR_COULD_NOT_AUTHENTICATE | ERROR_COULD_NOT_AUTHENTICATE_YOU | ERROR_BAD_AUTHENTICATION_DATA => {
			ErrorKind::AuthorizationFailed
		}
		ERROR_DOES_NOT_EXIST => ErrorKind::InvalidQuery,
		ERROR_ACCOUNT_SUSPENDED => ErrorKind::DisabledAccount,
		ERROR_RATE_LIMIT_EXCEEDED => ErrorKind::RateLimited,
		ERROR_INVALID_TOKEN => ErrorKind::InvalidToken,
		ERROR_OVER_CAPACITY | ERROR_INTERNAL_ERROR => ErrorKind::ProviderDown,
		ERROR_STATUS_IS_A_DUPLICATE => ErrorKind::PostFailed,
		ERROR_USER_MUST_VERIFY_LOGIN => ErrorKind::MustReauthorize,
		_ => return None,
	};
	Some(kind)
}

/// Translates a native error into the shared taxonomy.
///
/// Only the first reported error code counts. A 401 without codes is an
/// unauthorized query; everything else is unknown with the native error
/// attached.
pub fn provider_error(err: TwitterError) -> ProviderError {
	let kind = match &err {
		TwitterError::Api { errors, .. } if !errors.is_empty() => kind_for_code(errors[0].code),
		TwitterError::Api { status: 401, .. } => Some(ErrorKind::UnauthorizedQuery),
		_ => None,
	};

	match kind {
		Some(kind) => {
			tracing::warn!(provider = "twitter", kind = ?kind, error = %err, "Twitter request failed");
			ProviderError::new(kind)
		}
		None => {
			tracing::warn!(provider = "twitter", error = %err, "Unclassified twitter error");
			ProviderError::unknown(err)
		}
	}
}

impl From<TwitterError> for ProviderError {
	fn from(err: TwitterError) -> Self {
		provider_error(err)
	}
}
