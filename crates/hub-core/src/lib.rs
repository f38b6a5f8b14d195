//! hub-core - Core types and session primitives for the Projects Hub client.

pub mod api_url;
pub mod claims;
pub mod error;
pub mod session;
pub mod store;
pub mod tokens;

pub use api_url::ApiUrl;
pub use claims::{Claims, User};
pub use error::{ApiError, Error, TransportError};
pub use session::Session;
pub use store::{MemoryStore, SessionStore};
pub use tokens::{AccessToken, RefreshToken};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
