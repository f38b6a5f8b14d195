//! On-disk session persistence.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::warn;

use hub_core::{Session, SessionStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// File-backed session store at the platform data directory.
///
/// The store contract is infallible: IO problems are logged and degrade to
/// "no session", and a file that no longer parses is removed on load.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store rooted at the hubctl data directory.
    pub fn new() -> Result<Self> {
        let dirs =
            ProjectDirs::from("", "", "hubctl").context("Could not determine data directory")?;

        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir).context("Failed to create data directory")?;

        Ok(Self {
            path: data_dir.join("session.json"),
        })
    }

    /// Store at an explicit path.
    #[cfg(test)]
    fn at(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SessionStore for FileStore {
    fn load(&self) -> Option<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return None,
        };

        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(err) => {
                warn!(error = %err, "discarding unreadable session file");
                self.clear();
                None
            }
        }
    }

    fn save(&self, session: &Session) {
        let json = match serde_json::to_string_pretty(session) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize session");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, &json) {
            warn!(error = %err, "failed to write session file");
            return;
        }

        // Set restrictive permissions (Unix only)
        #[cfg(unix)]
        if let Ok(metadata) = fs::metadata(&self.path) {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            let _ = fs::set_permissions(&self.path, perms);
        }
    }

    fn clear(&self) {
        if self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                warn!(error = %err, "failed to remove session file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::AccessToken;

    fn session() -> Session {
        Session {
            access_token: AccessToken::new("t1"),
            refresh_token: None,
            access_token_expires_at: None,
            refresh_token_expires_at: None,
            email: Some("a@b.com".to_string()),
        }
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at(dir.path().join("session.json"));

        store.save(&session());
        let loaded = store.load().unwrap();
        assert_eq!(loaded.access_token.as_str(), "t1");
        assert_eq!(loaded.email.as_deref(), Some("a@b.com"));
    }

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at(dir.path().join("session.json"));
        assert!(store.load().is_none());
    }

    #[test]
    fn corrupt_file_is_removed_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileStore::at(path.clone());
        assert!(store.load().is_none());
        assert!(!path.exists());
    }

    #[test]
    fn clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::at(dir.path().join("session.json"));

        store.save(&session());
        store.clear();
        store.clear();
        assert!(store.load().is_none());
    }

    #[cfg(unix)]
    #[test]
    fn session_file_is_private() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileStore::at(path.clone());

        store.save(&session());
        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
