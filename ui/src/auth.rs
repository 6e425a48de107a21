//! Authentication context and hooks for the UI.

use api::{ApiError, Credentials, Registration, User};
use dioxus::prelude::*;

use crate::client::{make_api, Api};

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    /// True until the persisted session has been restored (or ruled out).
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            loading: true,
            error: None,
        }
    }
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that owns the API client and the auth state.
/// Wrap the app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let api = use_context_provider(make_api);
    let mut auth_state = use_signal(AuthState::default);
    use_context_provider(|| auth_state);

    // Restore the persisted session on mount; fail-closed on any error.
    let _ = use_resource(move || {
        let api = api.clone();
        async move {
            let user = api.initialize().await;
            auth_state.set(AuthState {
                user,
                loading: false,
                error: None,
            });
        }
    });

    rsx! {
        {children}
    }
}

/// Log in and update the auth state.
///
/// On failure the state carries the backend's detail message (or a generic
/// fallback) and the error is propagated so the caller can react.
pub async fn sign_in(
    api: &Api,
    mut auth: Signal<AuthState>,
    credentials: Credentials,
) -> Result<User, ApiError> {
    auth.write().error = None;
    match api.login(&credentials).await {
        Ok(user) => {
            auth.set(AuthState {
                user: Some(user.clone()),
                loading: false,
                error: None,
            });
            Ok(user)
        }
        Err(err) => {
            let message = err.user_message("Login failed, check your username and password");
            auth.set(AuthState {
                user: None,
                loading: false,
                error: Some(message),
            });
            Err(err)
        }
    }
}

/// Create an account. Does not authenticate (the caller routes to login).
pub async fn sign_up(
    api: &Api,
    mut auth: Signal<AuthState>,
    data: Registration,
) -> Result<User, ApiError> {
    auth.write().error = None;
    match api.register(&data).await {
        Ok(user) => Ok(user),
        Err(err) => {
            let message = err.user_message("Registration failed, please check your input");
            auth.write().error = Some(message);
            Err(err)
        }
    }
}

/// Log out unconditionally. Never fails.
pub async fn sign_out(api: &Api, mut auth: Signal<AuthState>) {
    api.logout().await;
    auth.set(AuthState {
        user: None,
        loading: false,
        error: None,
    });
}

/// Drop into the logged-out state after the client reports an expired
/// session. The tokens are already gone; this flips the auth state so the
/// route guard sends the user back to login.
pub fn session_expired(mut auth: Signal<AuthState>) {
    auth.set(AuthState {
        user: None,
        loading: false,
        error: Some("Your session has expired, please sign in again".to_string()),
    });
}

/// Convenience check for call sites that talk to the API directly.
pub fn note_session_expiry(auth: Signal<AuthState>, err: &ApiError) {
    if *err == ApiError::SessionExpired {
        session_expired(auth);
    }
}
