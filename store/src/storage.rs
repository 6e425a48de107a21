use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Durable key/value storage for small client-side state.
///
/// The browser backend is `localStorage`, which is synchronous, so the trait
/// is synchronous too. Implementations must degrade gracefully: a read from a
/// broken backend returns `None`, writes are best-effort.
pub trait KeyValueStorage: Clone {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory storage for testing and native fallback.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert!(storage.get("token").is_none());

        storage.set("token", "t1");
        assert_eq!(storage.get("token").as_deref(), Some("t1"));

        storage.set("token", "t2");
        assert_eq!(storage.get("token").as_deref(), Some("t2"));

        storage.remove("token");
        assert!(storage.get("token").is_none());
    }

    #[test]
    fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let other = storage.clone();

        storage.set("user", "{}");
        assert_eq!(other.get("user").as_deref(), Some("{}"));
    }
}
