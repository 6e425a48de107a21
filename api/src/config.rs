use std::time::Duration;

/// Where the REST backend lives and how long a request may take.
///
/// The base URL can be baked in at build time via the `HEALTH_API_BASE_URL`
/// env var; the default points at a local development backend.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: option_env!("HEALTH_API_BASE_URL")
                .unwrap_or("http://localhost:8000/api")
                .to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Join an absolute API path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let config = ApiConfig::new("http://localhost:8000/api/");
        assert_eq!(
            config.url("/users/login/"),
            "http://localhost:8000/api/users/login/"
        );
    }
}
