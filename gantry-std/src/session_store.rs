//! In-memory session storage.

use gantry_core::SessionStore;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// A process-local [`SessionStore`] keeping every session in a map.
///
/// Good for development and tests; sessions vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    sessions: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    pub fn len(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    /// Whether the store holds no sessions.
    pub fn is_empty(&self) -> bool {
        self.sessions.lock().unwrap().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn create(&self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        self.sessions
            .lock()
            .unwrap()
            .insert(id.clone(), HashMap::new());
        id
    }

    fn load(&self, id: &str) -> Option<HashMap<String, String>> {
        self.sessions.lock().unwrap().get(id).cloned()
    }

    fn save(&self, id: &str, data: &HashMap<String, String>) {
        self.sessions
            .lock()
            .unwrap()
            .insert(id.to_string(), data.clone());
    }
}
