//! Error types for the Projects Hub client.
//!
//! This module provides a unified error type with explicit variants for
//! transport failures, API-level failures, and input validation, so callers
//! can react to specific cases.
//!
//! Every type here is `Clone`: the outcome of a coalesced token refresh is
//! handed to each waiting caller, so errors must be duplicable.

use std::fmt;
use thiserror::Error;

/// The unified error type for client operations.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// API-level errors: non-2xx responses and failed auth preconditions.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    InvalidUrl { value: String, reason: String },
}

impl Error {
    /// True when this failure means the presented access token was rejected.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Error::Api(api) if api.is_auth_error())
    }
}

/// Transport-level errors.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Any other HTTP transport failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// An error reported by the Projects Hub API, or synthesized for a failed
/// auth precondition.
///
/// Carries the HTTP status plus the application error code from the response
/// body when the server provided one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// Human-readable description.
    pub message: String,
    /// HTTP status code of the failed request.
    pub status: u16,
    /// Application error code (e.g. `TOKEN_EXPIRED`).
    pub code: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(message: impl Into<String>, status: u16, code: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status,
            code: code.into(),
        }
    }

    /// Fallback for a non-2xx response without a usable JSON error body.
    pub fn http_status(status: u16) -> Self {
        Self::new(
            format!("Request failed with status {status}"),
            status,
            "HTTP_ERROR",
        )
    }

    /// Raised when a protected call is attempted with no access token.
    pub fn unauthorized() -> Self {
        Self::new("You are not logged in.", 401, "UNAUTHORIZED")
    }

    /// Raised when a refresh is attempted with no refresh token on hand.
    pub fn no_refresh_token() -> Self {
        Self::new("No refresh token available.", 401, "NO_REFRESH_TOKEN")
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
