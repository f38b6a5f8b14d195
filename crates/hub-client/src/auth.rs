//! Session ownership and the token-refresh coordinator.
//!
//! [`AuthClient`] owns the one current [`Session`]. Every state change
//! replaces the session wholesale; reads take snapshots. The only
//! coordination requirement is that concurrent refresh calls coalesce onto
//! a single network exchange.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

use hub_core::{
    AccessToken, ApiError, Error, RefreshToken, Result, Session, SessionStore, TransportError,
    User,
};

use crate::client::ApiClient;
use crate::endpoints;

/// Seconds before access-token expiry at which proactive renewal fires.
const RENEWAL_LEAD_SECS: i64 = 30;

/// Signup request body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

// Intentionally hide password in Debug output
impl fmt::Debug for SignupRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignupRequest")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Signup response; the API confirms with an optional message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: Option<String>,
}

/// Login request body.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Intentionally hide password in Debug output
impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Token grant returned by login and refresh.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenGrant {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    access_token_expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    refresh_token_expires_at: Option<DateTime<Utc>>,
}

/// Request body for the refresh exchange.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

/// Build a session from a token grant and the email known at login time.
/// The grant does not echo the email back.
fn session_from_grant(grant: TokenGrant, email: Option<String>) -> Session {
    Session {
        access_token: AccessToken::new(grant.access_token),
        refresh_token: grant.refresh_token.map(RefreshToken::new),
        access_token_expires_at: grant.access_token_expires_at,
        refresh_token_expires_at: grant.refresh_token_expires_at,
        email,
    }
}

/// Outcome shared by every caller coalesced onto one refresh exchange.
type SharedRefresh = Shared<BoxFuture<'static, Result<Session>>>;

/// Session coordinator for the Projects Hub API.
///
/// Owns signup/login/logout, the single-flight refresh exchange, the
/// one-401-retry policy for authorized calls, and the proactive renewal
/// timer. Cheap to clone; clones share the same session state.
///
/// Construction and use require a running Tokio runtime.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<Inner>,
}

struct Inner {
    api: ApiClient,
    store: Box<dyn SessionStore>,
    session: RwLock<Option<Session>>,
    /// In-flight refresh exchange; present only while one is running.
    refresh_in_flight: Mutex<Option<SharedRefresh>>,
    refreshing: AtomicBool,
    /// Pending proactive-renewal timer, at most one per session.
    renewal: Mutex<Option<JoinHandle<()>>>,
}

impl AuthClient {
    /// Create a coordinator, adopting any session the store already holds
    /// and scheduling its renewal.
    pub fn new(api: ApiClient, store: impl SessionStore + 'static) -> Self {
        let restored = store.load();
        if restored.is_some() {
            debug!("restored persisted session");
        }

        let client = Self {
            inner: Arc::new(Inner {
                api,
                store: Box::new(store),
                session: RwLock::new(restored),
                refresh_in_flight: Mutex::new(None),
                refreshing: AtomicBool::new(false),
                renewal: Mutex::new(None),
            }),
        };
        client.inner.schedule_renewal();
        client
    }

    /// Returns the API client this coordinator wraps.
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// A snapshot of the current session.
    pub fn session(&self) -> Option<Session> {
        self.inner.session.read().unwrap().clone()
    }

    /// True when a session with an access token is present.
    pub fn is_authenticated(&self) -> bool {
        self.inner
            .session
            .read()
            .unwrap()
            .as_ref()
            .is_some_and(|s| !s.access_token.is_empty())
    }

    /// True while a refresh exchange is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.inner.refreshing.load(Ordering::SeqCst)
    }

    /// The user view derived from the current access token. Recomputed on
    /// every call; `None` when anonymous.
    pub fn current_user(&self) -> Option<User> {
        self.session().as_ref().map(User::from_session)
    }

    /// Create an account. Does not touch the session; failures surface
    /// verbatim.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn signup(&self, request: &SignupRequest) -> Result<SignupResponse> {
        self.inner.api.post_json(endpoints::SIGNUP, request).await
    }

    /// Exchange credentials for a session and adopt it.
    ///
    /// The session keeps the email from the request. A failed login leaves
    /// any prior session untouched.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<Session> {
        let grant: TokenGrant = self.inner.api.post_json(endpoints::LOGIN, request).await?;
        let session = session_from_grant(grant, Some(request.email.clone()));

        info!("logged in");
        self.inner.adopt(Some(session.clone()));
        Ok(session)
    }

    /// Drop the current session and its persisted mirror. Idempotent; no
    /// network call.
    pub fn logout(&self) {
        debug!("logging out");
        self.inner.adopt(None);
    }

    /// Exchange the refresh token for a new session.
    ///
    /// Concurrent callers coalesce onto the single in-flight exchange and
    /// observe its outcome. On failure the session is cleared entirely and
    /// the caller must log in again.
    #[instrument(skip(self))]
    pub async fn refresh_tokens(&self) -> Result<Session> {
        // Precondition first: a missing refresh token fails fast even while
        // an exchange from a previous session settles.
        let refresh_token = {
            let session = self.inner.session.read().unwrap();
            session.as_ref().and_then(|s| s.refresh_token.clone())
        };
        let Some(refresh_token) = refresh_token else {
            return Err(ApiError::no_refresh_token().into());
        };

        let shared = {
            let mut in_flight = self.inner.refresh_in_flight.lock().unwrap();
            if let Some(shared) = in_flight.as_ref() {
                debug!("joining in-flight refresh");
                shared.clone()
            } else {
                info!("refreshing session");
                self.inner.refreshing.store(true, Ordering::SeqCst);

                // The exchange runs as its own task so it settles (and the
                // session updates) even if every caller is dropped mid-await.
                let inner = Arc::clone(&self.inner);
                let task = tokio::spawn(async move { inner.run_refresh(refresh_token).await });
                let shared = task
                    .map(|joined| match joined {
                        Ok(outcome) => outcome,
                        Err(err) => Err(Error::Transport(TransportError::Http {
                            message: format!("refresh task failed: {err}"),
                        })),
                    })
                    .boxed()
                    .shared();
                *in_flight = Some(shared.clone());
                shared
            }
        };

        shared.await
    }

    /// Authorized GET with a transparent one-shot token refresh.
    ///
    /// A 401 triggers exactly one refresh and one retry with the new access
    /// token when a refresh token is on hand; any other failure, or a
    /// failure of the retried call, surfaces unchanged.
    #[instrument(skip(self))]
    pub async fn get_authorized<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let (token, can_refresh) = {
            let session = self.inner.session.read().unwrap();
            match session.as_ref() {
                Some(s) if !s.access_token.is_empty() => {
                    (s.access_token.clone(), s.can_refresh())
                }
                _ => return Err(ApiError::unauthorized().into()),
            }
        };

        match self.inner.api.get_json_authed(path, token.as_str()).await {
            Ok(value) => Ok(value),
            Err(err) if err.is_auth_error() && can_refresh => {
                debug!(path, "access token rejected, refreshing once");
                let refreshed = self.refresh_tokens().await?;
                self.inner
                    .api
                    .get_json_authed(path, refreshed.access_token.as_str())
                    .await
            }
            Err(err) => Err(err),
        }
    }
}

impl Inner {
    /// The single in-flight refresh exchange.
    async fn run_refresh(self: Arc<Self>, refresh_token: RefreshToken) -> Result<Session> {
        let request = RefreshRequest {
            refresh_token: refresh_token.as_str(),
        };

        let outcome = self
            .api
            .post_json::<_, TokenGrant>(endpoints::REFRESH, &request)
            .await
            .map(|grant| {
                let email = {
                    let session = self.session.read().unwrap();
                    session.as_ref().and_then(|s| s.email.clone())
                };
                session_from_grant(grant, email)
            });

        match &outcome {
            Ok(session) => {
                debug!("session refreshed");
                self.adopt(Some(session.clone()));
            }
            Err(err) => {
                warn!(error = %err, "refresh failed, clearing session");
                self.adopt(None);
            }
        }

        // Settle: allow a subsequent call to start a new exchange.
        self.refreshing.store(false, Ordering::SeqCst);
        *self.refresh_in_flight.lock().unwrap() = None;

        outcome
    }

    /// Replace the current session, mirror it to the store, and reset the
    /// renewal timer.
    fn adopt(self: &Arc<Self>, next: Option<Session>) {
        *self.session.write().unwrap() = next.clone();
        match &next {
            Some(session) => self.store.save(session),
            None => self.store.clear(),
        }
        self.schedule_renewal();
    }

    /// Cancel any pending renewal timer and schedule one for the current
    /// session: a one-shot task firing 30 seconds before access-token
    /// expiry (immediately when already due) that refreshes, clearing the
    /// session if the refresh fails. No timer runs without both an expiry
    /// and a refresh token.
    fn schedule_renewal(self: &Arc<Self>) {
        let mut renewal = self.renewal.lock().unwrap();
        if let Some(task) = renewal.take() {
            task.abort();
        }

        let deadline = {
            let session = self.session.read().unwrap();
            match session.as_ref() {
                Some(s) if s.can_refresh() => s.access_token_expires_at,
                _ => None,
            }
        };
        let Some(expires_at) = deadline else {
            return;
        };

        let delay = (expires_at - Utc::now() - TimeDelta::seconds(RENEWAL_LEAD_SECS))
            .to_std()
            .unwrap_or(Duration::ZERO);
        debug!(delay_secs = delay.as_secs(), "scheduling token renewal");

        let weak = Arc::downgrade(self);
        *renewal = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let Some(inner) = weak.upgrade() else {
                return;
            };

            let client = AuthClient { inner };
            if let Err(err) = client.refresh_tokens().await {
                warn!(error = %err, "scheduled renewal failed, clearing session");
                client.inner.adopt(None);
            }
        }));
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(task) = self.renewal.lock().unwrap().take() {
            task.abort();
        }
    }
}

impl fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("api", &self.inner.api)
            .field("authenticated", &self.is_authenticated())
            .field("refreshing", &self.is_refreshing())
            .finish()
    }
}
