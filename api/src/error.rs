use thiserror::Error;

/// Everything that can go wrong between the client and the REST backend.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ApiError {
    /// Connection-level failure: DNS, refused, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the request even after the one allowed
    /// refresh-and-replay cycle.
    #[error("unauthorized")]
    Unauthorized,

    /// Token refresh failed; the session has been cleared and the caller
    /// must send the user back to the login page.
    #[error("session expired")]
    SessionExpired,

    /// Any other non-2xx response, with the backend's detail message when
    /// it provided one.
    #[error("request failed with status {status}: {detail}")]
    Api { status: u16, detail: String },

    /// The response body did not match the documented contract.
    #[error("malformed response: {0}")]
    Decode(String),
}

impl ApiError {
    /// The message shown to the user: the backend's detail when present,
    /// otherwise the operation-specific fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Api { detail, .. } if !detail.is_empty() => detail.clone(),
            ApiError::SessionExpired => "Your session has expired, please sign in again".to_string(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_detail() {
        let err = ApiError::Api {
            status: 400,
            detail: "Incorrect username or password".to_string(),
        };
        assert_eq!(err.user_message("Login failed"), "Incorrect username or password");
    }

    #[test]
    fn test_user_message_falls_back_on_network_errors() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }
}
