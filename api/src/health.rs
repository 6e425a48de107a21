//! Backend reachability check for the public status page.

use serde::Deserialize;
use store::KeyValueStorage;

use crate::client::ApiClient;
use crate::transport::{HttpRequest, HttpTransport};

/// The outcome of a health probe. Infallible by design: an unreachable
/// backend is a result, not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct HealthStatus {
    pub backend_reachable: bool,
    pub message: String,
}

#[derive(Deserialize)]
struct HealthReply {
    #[serde(default)]
    message: Option<String>,
}

impl<T: HttpTransport, S: KeyValueStorage> ApiClient<T, S> {
    /// Probe `GET /health/`. Public: no auth, no refresh-retry.
    pub async fn health_check(&self) -> HealthStatus {
        let request = HttpRequest::get(self.config().url("/health/"));
        match self.send_public(request).await {
            Ok(response) if response.is_success() => {
                let message = response
                    .json::<HealthReply>()
                    .ok()
                    .and_then(|r| r.message)
                    .unwrap_or_else(|| "ok".to_string());
                HealthStatus {
                    backend_reachable: true,
                    message,
                }
            }
            Ok(response) => HealthStatus {
                backend_reachable: false,
                message: format!("Backend responded with status {}", response.status),
            },
            Err(err) => {
                tracing::warn!(%err, "health check failed");
                HealthStatus {
                    backend_reachable: false,
                    message: "Backend service is unreachable".to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client_with, response};
    use crate::error::ApiError;
    use serde_json::json;

    #[tokio::test]
    async fn test_healthy_backend() {
        let (client, transport, _storage) =
            client_with(|_req| Ok(response(200, json!({ "message": "all good" }))));

        let status = client.health_check().await;

        assert!(status.backend_reachable);
        assert_eq!(status.message, "all good");
        // public endpoint: no bearer attached
        assert!(transport.sent()[0].bearer.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        let (client, _transport, _storage) =
            client_with(|_req| Err(ApiError::Network("refused".into())));

        let status = client.health_check().await;

        assert!(!status.backend_reachable);
        assert_eq!(status.message, "Backend service is unreachable");
    }
}
