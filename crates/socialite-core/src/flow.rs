//! Reusable OAuth dialects

pub mod oauth1;
pub mod oauth2;

pub use oauth1::{AccessToken, OAuth1Client, OAuth1Endpoints, OAuth1Signer, OAuth1Token, RequestToken};
pub use oauth2::{OAuth2Config, OAuth2Flow, TokenResponse};
