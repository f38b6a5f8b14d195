//! Session persistence seam.

use std::sync::{Arc, RwLock};

use crate::session::Session;

/// Persistence for the one session record.
///
/// Implementations never fail: a record that cannot be read or parsed
/// degrades to "no session", and `load` removes the corrupt record as a
/// side effect. The store is a mirror of the coordinator's in-memory
/// session, always reflecting the last `save` or `clear`.
pub trait SessionStore: Send + Sync {
    /// Read the persisted session, if a well-formed one exists.
    fn load(&self) -> Option<Session>;

    /// Persist `session`, overwriting any prior value.
    fn save(&self, session: &Session);

    /// Remove the persisted session unconditionally.
    fn clear(&self);
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn load(&self) -> Option<Session> {
        (**self).load()
    }

    fn save(&self, session: &Session) {
        (**self).save(session)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory store for library embedders and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    session: RwLock<Option<Session>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Option<Session> {
        self.session.read().unwrap().clone()
    }

    fn save(&self, session: &Session) {
        *self.session.write().unwrap() = Some(session.clone());
    }

    fn clear(&self) {
        *self.session.write().unwrap() = None;
    }
}
