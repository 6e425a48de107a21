//! # Session state with write-through persistence
//!
//! [`Session`] holds the authenticated user and the access/refresh token
//! pair, and mirrors every change into a [`KeyValueStorage`] backend under
//! three well-known keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `"token"` | access token |
//! | `"refreshToken"` | refresh token |
//! | `"user"` | JSON-serialized user |
//!
//! The session is created empty at app start, populated on login or restored
//! from storage, and cleared on logout or irrecoverable refresh failure.
//! `clear` never fails. The session performs no HTTP itself; callers mutate
//! it only after the corresponding backend call has succeeded, so storage is
//! never ahead of the server.

use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::KeyValueStorage;

pub const TOKEN_KEY: &str = "token";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
pub const USER_KEY: &str = "user";

#[derive(Debug, Default)]
struct SessionData<U> {
    user: Option<U>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// Shared session state, generic over the user type and the storage backend.
///
/// Cheap to clone; clones share the same in-memory state.
#[derive(Debug)]
pub struct Session<U, S> {
    data: Arc<Mutex<SessionData<U>>>,
    storage: S,
}

impl<U, S: Clone> Clone for Session<U, S> {
    fn clone(&self) -> Self {
        Self {
            data: Arc::clone(&self.data),
            storage: self.storage.clone(),
        }
    }
}

impl<U, S> Session<U, S>
where
    U: Clone + Serialize + DeserializeOwned,
    S: KeyValueStorage,
{
    /// Create an empty session on top of a storage backend.
    pub fn new(storage: S) -> Self {
        Self {
            data: Arc::new(Mutex::new(SessionData {
                user: None,
                access_token: None,
                refresh_token: None,
            })),
            storage,
        }
    }

    /// Restore a persisted session from storage.
    ///
    /// Returns `true` when an access token was found. A cached user that
    /// fails to parse clears the whole session (fail-closed), matching the
    /// startup contract: no partially-restored sessions.
    pub fn restore(&self) -> bool {
        let Some(token) = self.storage.get(TOKEN_KEY) else {
            self.clear();
            return false;
        };

        let cached_user = match self.storage.get(USER_KEY) {
            Some(raw) => match serde_json::from_str::<U>(&raw) {
                Ok(user) => Some(user),
                Err(_) => {
                    self.clear();
                    return false;
                }
            },
            None => None,
        };

        let mut data = self.data.lock().unwrap();
        data.access_token = Some(token);
        data.refresh_token = self.storage.get(REFRESH_TOKEN_KEY);
        data.user = cached_user;
        true
    }

    /// Store a full credential set after a successful login.
    pub fn set_authenticated(&self, user: U, access_token: &str, refresh_token: &str) {
        self.storage.set(TOKEN_KEY, access_token);
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token);
        if let Ok(raw) = serde_json::to_string(&user) {
            self.storage.set(USER_KEY, &raw);
        }

        let mut data = self.data.lock().unwrap();
        data.user = Some(user);
        data.access_token = Some(access_token.to_string());
        data.refresh_token = Some(refresh_token.to_string());
    }

    /// Rotate the access token after a successful refresh.
    pub fn set_access_token(&self, access_token: &str) {
        self.storage.set(TOKEN_KEY, access_token);
        self.data.lock().unwrap().access_token = Some(access_token.to_string());
    }

    /// Replace the user wholesale (profile load/update).
    pub fn set_user(&self, user: U) {
        if let Ok(raw) = serde_json::to_string(&user) {
            self.storage.set(USER_KEY, &raw);
        }
        self.data.lock().unwrap().user = Some(user);
    }

    /// Drop all session state, in memory and in storage. Never fails.
    pub fn clear(&self) {
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(REFRESH_TOKEN_KEY);
        self.storage.remove(USER_KEY);

        let mut data = self.data.lock().unwrap();
        data.user = None;
        data.access_token = None;
        data.refresh_token = None;
    }

    pub fn access_token(&self) -> Option<String> {
        self.data.lock().unwrap().access_token.clone()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.data.lock().unwrap().refresh_token.clone()
    }

    pub fn user(&self) -> Option<U> {
        self.data.lock().unwrap().user.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.data.lock().unwrap().access_token.is_some()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use serde::Deserialize;

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct TestUser {
        id: u64,
        username: String,
    }

    fn test_user() -> TestUser {
        TestUser {
            id: 1,
            username: "testuser".to_string(),
        }
    }

    #[test]
    fn test_empty_session() {
        let session: Session<TestUser, _> = Session::new(MemoryStorage::new());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(session.access_token().is_none());
    }

    #[test]
    fn test_set_authenticated_writes_through() {
        let storage = MemoryStorage::new();
        let session = Session::new(storage.clone());

        session.set_authenticated(test_user(), "t1", "r1");

        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("t1"));
        assert_eq!(session.refresh_token().as_deref(), Some("r1"));
        assert_eq!(session.user().map(|u| u.id), Some(1));

        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));
        let cached: TestUser =
            serde_json::from_str(&storage.get(USER_KEY).unwrap()).unwrap();
        assert_eq!(cached, test_user());
    }

    #[test]
    fn test_clear_removes_everything() {
        let storage = MemoryStorage::new();
        let session = Session::new(storage.clone());

        session.set_authenticated(test_user(), "t1", "r1");
        session.clear();

        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[test]
    fn test_restore_roundtrip() {
        let storage = MemoryStorage::new();
        {
            let session = Session::new(storage.clone());
            session.set_authenticated(test_user(), "t1", "r1");
        }

        let restored: Session<TestUser, _> = Session::new(storage);
        assert!(restored.restore());
        assert_eq!(restored.access_token().as_deref(), Some("t1"));
        assert_eq!(restored.refresh_token().as_deref(), Some("r1"));
        assert_eq!(restored.user().map(|u| u.username), Some("testuser".into()));
    }

    #[test]
    fn test_restore_empty_storage() {
        let session: Session<TestUser, _> = Session::new(MemoryStorage::new());
        assert!(!session.restore());
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_restore_corrupt_user_fails_closed() {
        let storage = MemoryStorage::new();
        storage.set(TOKEN_KEY, "t1");
        storage.set(USER_KEY, "not json");

        let session: Session<TestUser, _> = Session::new(storage.clone());
        assert!(!session.restore());
        assert!(!session.is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn test_access_token_rotation_persists() {
        let storage = MemoryStorage::new();
        let session = Session::new(storage.clone());
        session.set_authenticated(test_user(), "t1", "r1");

        session.set_access_token("t2");

        assert_eq!(session.access_token().as_deref(), Some("t2"));
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t2"));
        // refresh token untouched
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));
    }
}
