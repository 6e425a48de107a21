//! Browser-side persistence via `window.localStorage`.
//!
//! [`LocalStorage`] is the [`KeyValueStorage`] implementation used on the
//! **web platform**. The session only needs three small string keys, so
//! `localStorage` is the right store here.
//!
//! All methods silently swallow errors (returning `None` for reads, doing
//! nothing for writes). A blocked or unavailable `localStorage` degrades to
//! "no persisted session" rather than crashing the app.

use crate::storage::KeyValueStorage;

/// `localStorage`-backed storage for the web platform.
#[derive(Clone, Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }

    fn backend() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }
}

impl KeyValueStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        Self::backend()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(backend) = Self::backend() {
            let _ = backend.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(backend) = Self::backend() {
            let _ = backend.remove_item(key);
        }
    }
}
