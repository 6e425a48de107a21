//! Shared API client constructor for all platforms.
//!
//! Returns an [`api::ApiClient`] backed by the appropriate storage:
//! - **Web** (WASM + `web` feature): `localStorage` via [`store::LocalStorage`]
//! - **Native** (tests, tooling): in-memory via [`store::MemoryStorage`]

use dioxus::prelude::*;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStorage = store::LocalStorage;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStorage = store::MemoryStorage;

/// The concrete client type the components work with.
pub type Api = api::ApiClient<api::ReqwestTransport, PlatformStorage>;

/// Create a platform-appropriate API client.
pub fn make_api() -> Api {
    let config = api::ApiConfig::default();
    let transport = api::ReqwestTransport::new(config.timeout);
    api::ApiClient::new(config, transport, PlatformStorage::new())
}

/// Get the app-wide API client provided by [`crate::AuthProvider`].
pub fn use_api() -> Api {
    use_context::<Api>()
}
