//! Authentication contract types and session lifecycle operations.
//!
//! Endpoints: `POST /users/login/`, `POST /users/register/`,
//! `POST /users/token/refresh/` (used by the client's 401 interceptor),
//! `POST /users/logout/`, `GET|PATCH /users/me/`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use store::KeyValueStorage;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::{HttpRequest, HttpTransport};

/// The account identity kept in the session. Replaced wholesale on login and
/// profile load, never partially mutated.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Full profile as served by `GET /users/me/`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub blood_type: Option<String>,
    #[serde(default)]
    pub hobbies: Option<String>,
    #[serde(default)]
    pub emergency_contact: Option<String>,
}

impl UserProfile {
    /// The session-level identity carried inside a profile.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub password: String,
    pub password_confirm: String,
}

/// Fields PATCHable on `/users/me/`. `None` fields are left untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hobbies: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
struct AuthResponse {
    access: String,
    refresh: String,
    user: User,
}

/// Registration returns the created user, either bare or wrapped in a
/// `{"user": ...}` envelope depending on the backend version.
#[derive(Deserialize)]
#[serde(untagged)]
enum RegisterReply {
    Wrapped { user: User },
    Bare(User),
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    /// Authenticate and populate the session.
    ///
    /// On success the token pair and user land in memory and durable
    /// storage. On failure the session stays empty and the error is
    /// propagated so the caller can surface it.
    pub async fn login(&self, credentials: &Credentials) -> Result<User, ApiError> {
        let request =
            HttpRequest::post(self.config().url("/users/login/")).json(credentials)?;
        let outcome = async {
            let response = Self::checked(self.send_public(request).await?)?;
            let auth: AuthResponse = response.json()?;
            Ok::<AuthResponse, ApiError>(auth)
        }
        .await;

        match outcome {
            Ok(auth) => {
                self.session()
                    .set_authenticated(auth.user.clone(), &auth.access, &auth.refresh);
                tracing::info!(user = %auth.user.username, "logged in");
                Ok(auth.user)
            }
            Err(err) => {
                // no partially-populated sessions
                self.session().clear();
                tracing::warn!(%err, "login failed");
                Err(err)
            }
        }
    }

    /// Create an account. Does not authenticate; the caller sends the user
    /// to the login page afterwards.
    pub async fn register(&self, data: &Registration) -> Result<User, ApiError> {
        let request =
            HttpRequest::post(self.config().url("/users/register/")).json(data)?;
        let response = Self::checked(self.send_public(request).await?)?;
        let reply: RegisterReply = response.json()?;
        Ok(match reply {
            RegisterReply::Wrapped { user } => user,
            RegisterReply::Bare(user) => user,
        })
    }

    /// Restore the persisted session at startup.
    ///
    /// Adopts the stored token pair, then verifies it by loading the
    /// profile. Any failure clears the session entirely (fail-closed), so
    /// this never errors: the result is simply an unauthenticated app.
    pub async fn initialize(&self) -> Option<User> {
        if !self.session().restore() {
            return None;
        }
        match self.load_profile().await {
            Ok(profile) => {
                let user = profile.to_user();
                self.session().set_user(user.clone());
                Some(user)
            }
            Err(err) => {
                tracing::warn!(%err, "stored session is not usable, clearing");
                self.session().clear();
                None
            }
        }
    }

    /// Clear the session unconditionally. Never fails.
    ///
    /// Server-side invalidation is best-effort: the local session is gone
    /// before the request is even sent.
    pub async fn logout(&self) {
        let bearer = self.session().access_token();
        self.session().clear();

        let request =
            HttpRequest::post(self.config().url("/users/logout/")).with_bearer(bearer);
        if let Err(err) = self.send_public(request).await {
            tracing::debug!(%err, "logout request failed, session already cleared");
        }
    }

    pub async fn load_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_json("/users/me/").await
    }

    pub async fn update_profile(&self, changes: &ProfileUpdate) -> Result<UserProfile, ApiError> {
        let profile: UserProfile = self.patch_json("/users/me/", changes).await?;
        self.session().set_user(profile.to_user());
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, response};
    use serde_json::json;
    use store::{TOKEN_KEY, USER_KEY};

    fn profile_json() -> serde_json::Value {
        json!({
            "id": 1,
            "username": "testuser",
            "email": "t@example.com",
            "phone": "123",
            "birth_date": "1990-05-01",
            "blood_type": "O"
        })
    }

    #[tokio::test]
    async fn test_initialize_with_empty_storage_stays_logged_out() {
        let (client, transport, _storage) =
            client_with(|_req| Ok(response(200, json!({}))));

        let user = client.initialize().await;

        assert!(user.is_none());
        assert!(!client.session().is_authenticated());
        // nothing to verify, so nothing was sent
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_initialize_restores_and_verifies() {
        let (client, transport, storage) =
            client_with(|_req| Ok(response(200, profile_json())));
        storage.set(TOKEN_KEY, "t1");
        storage.set(USER_KEY, r#"{"id":1,"username":"testuser","email":"t@example.com"}"#);

        let user = client.initialize().await.unwrap();

        assert_eq!(user.id, 1);
        assert!(client.session().is_authenticated());
        assert_eq!(transport.count_url("/users/me/"), 1);
        assert_eq!(transport.sent()[0].bearer.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_initialize_fails_closed_on_profile_error() {
        let (client, _transport, storage) =
            client_with(|_req| Ok(response(500, json!({ "detail": "boom" }))));
        storage.set(TOKEN_KEY, "t1");

        let user = client.initialize().await;

        assert!(user.is_none());
        assert!(!client.session().is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_register_does_not_authenticate() {
        let (client, _transport, storage) = client_with(|req| {
            assert!(req.url.ends_with("/users/register/"));
            Ok(response(201, json!({ "user": { "id": 5, "username": "new", "email": "n@example.com" } })))
        });

        let user = client
            .register(&Registration {
                username: "new".to_string(),
                email: "n@example.com".to_string(),
                phone: None,
                password: "password123".to_string(),
                password_confirm: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 5);
        assert!(!client.session().is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_then_notifies_backend() {
        let (client, transport, storage) =
            client_with(|_req| Err(ApiError::Network("offline".into())));
        client.session().set_authenticated(User::default(), "t1", "r1");

        // never fails, even with the backend unreachable
        client.logout().await;

        assert!(!client.session().is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert_eq!(transport.count_url("/users/logout/"), 1);
    }

    #[tokio::test]
    async fn test_logout_then_initialize_yields_logged_out() {
        let (client, _transport, _storage) =
            client_with(|_req| Ok(response(200, json!({}))));
        client.session().set_authenticated(User::default(), "t1", "r1");

        client.logout().await;
        let user = client.initialize().await;

        assert!(user.is_none());
        assert!(client.session().user().is_none());
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_update_profile_replaces_session_user() {
        let (client, _transport, _storage) = client_with(|req| {
            assert_eq!(req.method, crate::transport::Method::Patch);
            Ok(response(200, profile_json()))
        });
        client.session().set_access_token("t1");

        let profile = client
            .update_profile(&ProfileUpdate {
                blood_type: Some("O".to_string()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        assert_eq!(profile.blood_type.as_deref(), Some("O"));
        assert_eq!(client.session().user().map(|u| u.username), Some("testuser".to_string()));
    }
}
