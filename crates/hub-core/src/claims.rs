//! Unverified access-token claims.
//!
//! The decoder splits a JWT into its three segments, base64-decodes the
//! payload segment and parses it as JSON. No signature verification happens
//! here: the result feeds the on-screen user view, never a trust decision.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::session::Session;

/// Claim set embedded in an access token.
///
/// Every field is optional; unknown claims are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    /// Role claim as emitted by older identity stacks.
    #[serde(rename = "http://schemas.microsoft.com/ws/2008/06/identity/claims/role")]
    pub schema_role: Option<String>,
}

impl Claims {
    /// The effective role, preferring the short claim over the legacy one.
    pub fn effective_role(&self) -> Option<&str> {
        self.role.as_deref().or(self.schema_role.as_deref())
    }
}

/// Decode the claims segment of `token` without verifying its signature.
///
/// Returns `None` unless the token has exactly three dot-separated segments
/// and the middle segment is valid URL-safe base64 wrapping valid JSON.
pub fn decode(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    // Tokens arrive unpadded, but tolerate padded input.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Read-only user view derived from the current session.
///
/// Recomputed from the access token whenever the session changes; it has no
/// lifecycle of its own.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub role: Option<String>,
    pub access_token_expires_at: Option<DateTime<Utc>>,
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
}

impl User {
    /// Derive the user view for a session.
    ///
    /// The session email wins over the token claim; an undecodable token
    /// degrades to a view with only the session-held fields.
    pub fn from_session(session: &Session) -> Self {
        let claims = decode(session.access_token.as_str()).unwrap_or_default();
        let role = claims.effective_role().map(str::to_owned);

        let name_parts: Vec<&str> = [claims.first_name.as_deref(), claims.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.is_empty())
            .collect();
        let full_name = (!name_parts.is_empty()).then(|| name_parts.join(" "));

        Self {
            user_id: claims.sub,
            email: session.email.clone().or(claims.email),
            first_name: claims.first_name,
            last_name: claims.last_name,
            full_name,
            role,
            access_token_expires_at: session.access_token_expires_at,
            refresh_token_expires_at: session.refresh_token_expires_at,
        }
    }
}
