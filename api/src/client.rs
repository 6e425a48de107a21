//! # The shared request pipeline
//!
//! [`ApiClient`] is the single way the app talks to the backend. Two
//! interceptors wrap every authorized request:
//!
//! - **Outgoing**: the bearer token is computed from the current session
//!   state per request. There is no shared mutable default header to go
//!   stale.
//! - **Incoming**: a 401 triggers exactly one silent token refresh and one
//!   replay of the original request. The replay is built from the original
//!   request and never re-enters the retry path, so a second 401 surfaces as
//!   [`ApiError::Unauthorized`] instead of looping.
//!
//! Refresh attempts are serialized behind a single-flight lock: when several
//! in-flight requests hit 401 at once, one performs the refresh and the
//! rest reuse the rotated token. A failed refresh clears the session and
//! yields [`ApiError::SessionExpired`], which the UI treats as a forced
//! logout.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use store::KeyValueStorage;

use crate::auth::User;
use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::transport::{FormField, HttpRequest, HttpResponse, HttpTransport};

/// The session type used throughout the app: user plus token pair on top of
/// a storage backend.
pub type Session<S> = store::Session<User, S>;

#[derive(Clone)]
pub struct ApiClient<T: HttpTransport, S: KeyValueStorage> {
    config: ApiConfig,
    transport: T,
    session: Session<S>,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    pub fn new(config: ApiConfig, transport: T, storage: S) -> Self {
        Self {
            config,
            transport,
            session: Session::new(storage),
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Send a request outside the auth pipeline: no bearer attached beyond
    /// what the request already carries, no refresh on 401.
    pub(crate) async fn send_public(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        self.transport.send(request).await
    }

    /// Send a request with the bearer interceptor and the
    /// one-refresh-one-replay policy applied.
    pub(crate) async fn send_authorized(
        &self,
        request: HttpRequest,
    ) -> Result<HttpResponse, ApiError> {
        let first = request
            .clone()
            .with_bearer(self.session.access_token());
        let response = self.transport.send(first).await?;
        if response.status != 401 {
            return Ok(response);
        }

        tracing::debug!(url = %request.url, "got 401, refreshing access token");
        let stale = self.session.access_token();
        let fresh = self.refresh_access_token(stale).await?;

        // Replay the original request once with the rotated token. Whatever
        // comes back is final.
        let replay = request.with_bearer(Some(fresh));
        self.transport.send(replay).await
    }

    /// Exchange the refresh token for a new access token.
    ///
    /// `stale` is the access token the caller saw when it got the 401. If
    /// another request already rotated the token while we waited for the
    /// lock, that token is reused instead of refreshing again.
    async fn refresh_access_token(&self, stale: Option<String>) -> Result<String, ApiError> {
        let _guard = self.refresh_gate.lock().await;

        if let Some(current) = self.session.access_token() {
            if stale.as_deref() != Some(current.as_str()) {
                return Ok(current);
            }
        }

        let Some(refresh) = self.session.refresh_token() else {
            self.session.clear();
            return Err(ApiError::SessionExpired);
        };

        #[derive(Serialize)]
        struct RefreshPayload {
            refresh: String,
        }
        #[derive(Deserialize)]
        struct Refreshed {
            access: String,
        }

        let request = HttpRequest::post(self.config.url("/users/token/refresh/"))
            .json(&RefreshPayload { refresh })?;
        match self.transport.send(request).await {
            Ok(response) if response.is_success() => {
                let Ok(Refreshed { access }) = response.json::<Refreshed>() else {
                    self.session.clear();
                    return Err(ApiError::SessionExpired);
                };
                self.session.set_access_token(&access);
                tracing::debug!("access token refreshed");
                Ok(access)
            }
            outcome => {
                if let Err(err) = outcome {
                    tracing::warn!(%err, "token refresh failed, clearing session");
                } else {
                    tracing::warn!("token refresh rejected, clearing session");
                }
                self.session.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }

    /// Map a non-2xx response into the error taxonomy.
    pub(crate) fn checked(response: HttpResponse) -> Result<HttpResponse, ApiError> {
        if response.is_success() {
            return Ok(response);
        }
        if response.status == 401 {
            return Err(ApiError::Unauthorized);
        }
        let detail = response.detail().unwrap_or_default();
        Err(ApiError::Api {
            status: response.status,
            detail,
        })
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(&self, path: &str) -> Result<R, ApiError> {
        let request = HttpRequest::get(self.config.url(path));
        Self::checked(self.send_authorized(request).await?)?.json()
    }

    pub(crate) async fn post_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = HttpRequest::post(self.config.url(path)).json(body)?;
        Self::checked(self.send_authorized(request).await?)?.json()
    }

    pub(crate) async fn put_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = HttpRequest::put(self.config.url(path)).json(body)?;
        Self::checked(self.send_authorized(request).await?)?.json()
    }

    pub(crate) async fn patch_json<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, ApiError> {
        let request = HttpRequest::patch(self.config.url(path)).json(body)?;
        Self::checked(self.send_authorized(request).await?)?.json()
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = HttpRequest::delete(self.config.url(path));
        Self::checked(self.send_authorized(request).await?)?;
        Ok(())
    }

    pub(crate) async fn post_multipart<R: DeserializeOwned>(
        &self,
        path: &str,
        fields: Vec<FormField>,
    ) -> Result<R, ApiError> {
        let request = HttpRequest::post(self.config.url(path)).multipart(fields);
        Self::checked(self.send_authorized(request).await?)?.json()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::auth::Credentials;
    use serde_json::json;
    use std::sync::Mutex;
    use store::{MemoryStorage, REFRESH_TOKEN_KEY, TOKEN_KEY, USER_KEY};

    type Handler =
        dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static;

    /// Scripted transport: a closure decides every response, and each
    /// request is logged for assertions.
    #[derive(Clone)]
    pub(crate) struct MockTransport {
        handler: Arc<Handler>,
        pub(crate) requests: Arc<Mutex<Vec<HttpRequest>>>,
    }

    impl MockTransport {
        pub(crate) fn new(
            handler: impl Fn(&HttpRequest) -> Result<HttpResponse, ApiError>
                + Send
                + Sync
                + 'static,
        ) -> Self {
            Self {
                handler: Arc::new(handler),
                requests: Arc::new(Mutex::new(Vec::new())),
            }
        }

        pub(crate) fn sent(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn count_url(&self, fragment: &str) -> usize {
            self.sent()
                .iter()
                .filter(|r| r.url.contains(fragment))
                .count()
        }
    }

    impl HttpTransport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            (self.handler)(&request)
        }
    }

    pub(crate) fn response(status: u16, body: serde_json::Value) -> HttpResponse {
        HttpResponse {
            status,
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    pub(crate) fn client_with(
        handler: impl Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    ) -> (ApiClient<MockTransport, MemoryStorage>, MockTransport, MemoryStorage) {
        let transport = MockTransport::new(handler);
        let storage = MemoryStorage::new();
        let client = ApiClient::new(
            ApiConfig::new("http://backend/api"),
            transport.clone(),
            storage.clone(),
        );
        (client, transport, storage)
    }

    fn user_json() -> serde_json::Value {
        json!({ "id": 1, "username": "testuser", "email": "t@example.com", "phone": "123" })
    }

    #[tokio::test]
    async fn test_bearer_attached_from_session() {
        let (client, transport, _storage) =
            client_with(|_req| Ok(response(200, json!({"ok": true}))));
        client
            .session()
            .set_authenticated(crate::auth::User::default(), "t1", "r1");

        let _: serde_json::Value = client.get_json("/records/medical/").await.unwrap();

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].bearer.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn test_login_persists_tokens_and_user() {
        let (client, transport, storage) = client_with(|req| {
            assert!(req.url.ends_with("/users/login/"));
            Ok(response(
                200,
                json!({ "access": "t1", "refresh": "r1", "user": user_json() }),
            ))
        });

        let user = client
            .login(&Credentials {
                username: "testuser".to_string(),
                password: "password123".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(client.session().access_token().as_deref(), Some("t1"));
        assert_eq!(client.session().refresh_token().as_deref(), Some("r1"));
        assert!(client.session().is_authenticated());
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(storage.get(REFRESH_TOKEN_KEY).as_deref(), Some("r1"));
        assert!(storage.get(USER_KEY).unwrap().contains("testuser"));
        // login itself must not carry a bearer token
        assert!(transport.sent()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_failed_login_sets_detail_and_clears_session() {
        let (client, _transport, storage) = client_with(|_req| {
            Ok(response(400, json!({ "detail": "Incorrect username or password" })))
        });

        let err = client
            .login(&Credentials {
                username: "testuser".to_string(),
                password: "nope".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message("Login failed"),
            "Incorrect username or password"
        );
        assert!(!client.session().is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
    }

    #[tokio::test]
    async fn test_single_401_refreshes_and_replays_once() {
        let (client, transport, _storage) = client_with(|req| {
            if req.url.contains("/users/token/refresh/") {
                return Ok(response(200, json!({ "access": "t2" })));
            }
            match req.bearer.as_deref() {
                Some("t2") => Ok(response(200, json!([]))),
                _ => Ok(response(401, json!({ "detail": "token expired" }))),
            }
        });
        client
            .session()
            .set_authenticated(crate::auth::User::default(), "t1", "r1");

        let result: Vec<serde_json::Value> =
            client.get_json("/records/medical/").await.unwrap();

        assert!(result.is_empty());
        assert_eq!(transport.count_url("/users/token/refresh/"), 1);
        assert_eq!(transport.count_url("/records/medical/"), 2);
        assert_eq!(client.session().access_token().as_deref(), Some("t2"));
    }

    #[tokio::test]
    async fn test_second_401_does_not_loop() {
        let (client, transport, _storage) = client_with(|req| {
            if req.url.contains("/users/token/refresh/") {
                return Ok(response(200, json!({ "access": "t2" })));
            }
            // the backend keeps rejecting even the replayed request
            Ok(response(401, json!({ "detail": "nope" })))
        });
        client
            .session()
            .set_authenticated(crate::auth::User::default(), "t1", "r1");

        let err = client
            .get_json::<serde_json::Value>("/records/medical/")
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::Unauthorized);
        assert_eq!(transport.count_url("/users/token/refresh/"), 1);
        assert_eq!(transport.count_url("/records/medical/"), 2);
    }

    #[tokio::test]
    async fn test_refresh_failure_is_fatal_to_the_session() {
        let (client, _transport, storage) = client_with(|req| {
            if req.url.contains("/users/token/refresh/") {
                return Ok(response(401, json!({ "detail": "refresh expired" })));
            }
            Ok(response(401, json!({})))
        });
        client
            .session()
            .set_authenticated(crate::auth::User::default(), "t1", "r1");

        let err = client
            .get_json::<serde_json::Value>("/records/medical/")
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::SessionExpired);
        assert!(!client.session().is_authenticated());
        assert!(storage.get(TOKEN_KEY).is_none());
        assert!(storage.get(REFRESH_TOKEN_KEY).is_none());
        assert!(storage.get(USER_KEY).is_none());
    }

    #[tokio::test]
    async fn test_401_without_refresh_token_expires_session() {
        let (client, transport, _storage) =
            client_with(|_req| Ok(response(401, json!({}))));
        client.session().set_access_token("t1");

        let err = client
            .get_json::<serde_json::Value>("/records/medical/")
            .await
            .unwrap_err();

        assert_eq!(err, ApiError::SessionExpired);
        assert_eq!(transport.count_url("/users/token/refresh/"), 0);
    }

    #[tokio::test]
    async fn test_concurrent_401s_share_one_refresh() {
        let (client, transport, _storage) = client_with(|req| {
            if req.url.contains("/users/token/refresh/") {
                return Ok(response(200, json!({ "access": "t2" })));
            }
            match req.bearer.as_deref() {
                Some("t2") => Ok(response(200, json!([]))),
                _ => Ok(response(401, json!({}))),
            }
        });
        client
            .session()
            .set_authenticated(crate::auth::User::default(), "t1", "r1");

        let (a, b) = tokio::join!(
            client.get_json::<Vec<serde_json::Value>>("/records/medical/"),
            client.get_json::<Vec<serde_json::Value>>("/records/medication/"),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(transport.count_url("/users/token/refresh/"), 1);
    }

    #[tokio::test]
    async fn test_backend_error_carries_detail() {
        let (client, _transport, _storage) = client_with(|_req| {
            Ok(response(400, json!({ "detail": "visit_date is required" })))
        });
        client.session().set_access_token("t1");

        let err = client
            .get_json::<serde_json::Value>("/records/medical/")
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Api {
                status: 400,
                detail: "visit_date is required".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_network_errors_pass_through() {
        let (client, _transport, _storage) =
            client_with(|_req| Err(ApiError::Network("connection refused".into())));
        client.session().set_access_token("t1");

        let err = client
            .get_json::<serde_json::Value>("/records/medical/")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Network(_)));
    }
}
