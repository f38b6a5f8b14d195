//! Command implementations.

pub mod invitation;
pub mod login;
pub mod logout;
pub mod org;
pub mod refresh;
pub mod signup;
pub mod whoami;

use anyhow::{Context as _, Result};

use hub_client::{ApiClient, AuthClient};
use hub_core::{ApiUrl, User};

use crate::store::FileStore;

/// Shared per-invocation state: the API client and the session coordinator
/// backed by the on-disk store.
pub struct Context {
    pub api: ApiClient,
    pub auth: AuthClient,
}

impl Context {
    pub fn new(api_url: &str) -> Result<Self> {
        let base = ApiUrl::new(api_url).context("Invalid API URL")?;
        let api = ApiClient::new(base);
        let store = FileStore::new().context("Failed to set up session storage")?;
        let auth = AuthClient::new(api.clone(), store);

        Ok(Self { api, auth })
    }

    /// The logged-in user, or a login hint as the error.
    pub fn require_user(&self) -> Result<User> {
        self.auth
            .current_user()
            .context("No active session. Run 'hubctl login' first.")
    }

    /// The logged-in user's id, needed by the organization endpoints.
    pub fn require_user_id(&self) -> Result<String> {
        self.require_user()?
            .user_id
            .context("Missing logged in user id.")
    }
}
