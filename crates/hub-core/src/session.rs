//! The authenticated session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tokens::{AccessToken, RefreshToken};

/// The one current session: the token pair, their expiries, and the email
/// the user logged in with.
///
/// A session is replaced wholesale on every change (login, refresh) and
/// never mutated in place. The persisted copy held by a
/// [`crate::store::SessionStore`] is a mirror of the in-memory value, not
/// the source of truth while the process is alive.
///
/// Invariant: a present session carries a non-empty access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Credential attached to protected calls.
    pub access_token: AccessToken,
    /// Credential for the refresh exchange; absent sessions cannot renew.
    pub refresh_token: Option<RefreshToken>,
    /// When the access token lapses.
    pub access_token_expires_at: Option<DateTime<Utc>>,
    /// When the refresh token lapses.
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    /// Email supplied at login time; the token grant does not echo it.
    pub email: Option<String>,
}

impl Session {
    /// True when this session can be renewed without re-authentication.
    pub fn can_refresh(&self) -> bool {
        self.refresh_token.is_some()
    }
}
