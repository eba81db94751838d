//! The per-request session handle and the store behind it.
//!
//! The session id is read from a configured cookie at dispatch start. The
//! handle loads its data once when opened and tracks writes; the pipeline
//! persists a written session when the request completes, regardless of
//! which phase terminated it.

use std::collections::HashMap;

/// Backing storage for session data.
///
/// Implementations serialize their own interior access; the dispatch path
/// only ever calls through a shared reference.
pub trait SessionStore: Send + Sync {
    /// Mint a fresh session id.
    fn create(&self) -> String;

    /// Load the data for `id`, or `None` for an unknown or expired id.
    fn load(&self, id: &str) -> Option<HashMap<String, String>>;

    /// Persist the data for `id`.
    fn save(&self, id: &str, data: &HashMap<String, String>);
}

/// The session handle owned by a single request.
#[derive(Debug)]
pub struct Session {
    id: Option<String>,
    data: HashMap<String, String>,
    dirty: bool,
}

impl Session {
    /// Open a session from an optional cookie-provided id, loading any
    /// stored data. An id the store does not recognize opens empty.
    pub fn open(store: &dyn SessionStore, id: Option<String>) -> Self {
        let data = id
            .as_deref()
            .and_then(|id| store.load(id))
            .unwrap_or_default();
        Self {
            id,
            data,
            dirty: false,
        }
    }

    /// The session id, if the request carried one or a write minted one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Read a session value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(String::as_str)
    }

    /// Write a session value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.dirty = true;
        self.data.insert(key.into(), value.into());
    }

    /// Remove a session value.
    pub fn remove(&mut self, key: &str) {
        if self.data.remove(key).is_some() {
            self.dirty = true;
        }
    }

    /// Whether the session has been written to since it was opened.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Persist a written session, minting an id if the request carried none.
    ///
    /// Returns the id the data was saved under, or `None` when there was
    /// nothing to persist.
    pub fn persist(&mut self, store: &dyn SessionStore) -> Option<&str> {
        if !self.dirty {
            return None;
        }
        let id = self.id.get_or_insert_with(|| store.create());
        store.save(id, &self.data);
        self.dirty = false;
        Some(id)
    }
}
