//! # Socialite Core
//!
//! Provider abstraction and OAuth continuation layer for socialite.
//!
//! ## Architecture
//!
//! Key modules in this crate:
//!
//! - [`registry`]: Provider plugin contract and the id-keyed registry
//! - [`protocol`]: Stateless authorize / callback protocol
//! - [`state`]: Signed state token carried across the provider redirect
//! - [`credentials`]: OAuth1 / OAuth2 credentials as one sum type
//! - [`query`] and [`cursor`]: Request parameters and pagination
//! - [`session`]: Capability set every provider session exposes
//! - [`error`]: Cross-provider error taxonomy with stable codes
//! - [`flow`]: OAuth 1.0a signing and OAuth 2.0 code-flow helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use socialite_core::{Permission, Query};
//!
//! let query = Query::from_query_str("q=%40alice+%23rust&limit=999");
//! assert_eq!(query.username, "alice");
//! assert_eq!(query.limit, 20);
//! assert_eq!(Permission::decode(""), Permission::Read);
//! ```

pub mod config;
pub mod credentials;
pub mod cursor;
pub mod entity;
pub mod error;
pub mod flow;
pub mod oauth;
pub mod permission;
pub mod protocol;
pub mod provider_id;
pub mod query;
pub mod registry;
pub mod session;
pub mod state;
pub mod utils;

pub use config::{AppConfig, ConfigError, ProviderConfigs, SocialConfig};
pub use credentials::{Credentials, OAuth1Credentials, OAuth2Credentials};
pub use cursor::{Cursor, Identified, Page};
pub use entity::{Post, User};
pub use error::{ErrorKind, ProviderError, ProviderResult};
pub use oauth::{CallbackParams, OAuthFlow};
pub use permission::Permission;
pub use protocol::{
	Authenticated, AuthorizeOptions, CallbackOutcome, OAuthProtocol, PendingAuthorization,
};
pub use provider_id::ProviderId;
pub use query::{Query, QueryParams, SearchParts, Sort};
pub use registry::{ProviderDescriptor, ProviderRegistry, RegistryError};
pub use session::ProviderSession;
pub use state::{StateClaims, StateTokenAuth, StateTokenError};

// Provider crates implement their traits with these.
pub use async_trait::async_trait;
