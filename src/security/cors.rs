//! Cross-origin policy.
//!
//! The allow-list for the active deployment mode, turned into a tower-http
//! `CorsLayer` that is mounted on the API router only. Preflights are answered
//! by the layer itself with 200 and an empty body; an unlisted or absent
//! origin gets no `Access-Control-Allow-Origin`.

use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::{CorsConfig, DeploymentMode};

pub const ALLOWED_METHODS: [Method; 5] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
];

pub const MAX_AGE_SECS: u64 = 86_400;

pub fn allowed_headers() -> [HeaderName; 3] {
    [
        header::CONTENT_TYPE,
        header::AUTHORIZATION,
        HeaderName::from_static("x-api-key"),
    ]
}

/// Immutable allow-list for the active deployment mode.
#[derive(Debug, Clone)]
pub struct CorsPolicy {
    allowed_origins: Vec<HeaderValue>,
}

impl CorsPolicy {
    pub fn new(origins: &[String]) -> Self {
        Self {
            allowed_origins: origins
                .iter()
                .filter_map(|o| HeaderValue::from_str(o).ok())
                .collect(),
        }
    }

    pub fn from_config(config: &CorsConfig, mode: DeploymentMode) -> Self {
        Self::new(&config.allowed_origins(mode))
    }

    /// Exact, case-sensitive match of the request `Origin` against the allow-list.
    pub fn is_allowed(&self, headers: &HeaderMap) -> bool {
        headers
            .get(header::ORIGIN)
            .is_some_and(|origin| self.allowed_origins.iter().any(|allowed| allowed == origin))
    }

    pub fn layer(&self) -> CorsLayer {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(self.allowed_origins.clone()))
            .allow_methods(ALLOWED_METHODS)
            .allow_headers(allowed_headers())
            .allow_credentials(true)
            .max_age(Duration::from_secs(MAX_AGE_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_development_allows_localhost() {
        let policy = CorsPolicy::from_config(&CorsConfig::default(), DeploymentMode::Development);
        assert!(policy.is_allowed(&origin("http://localhost:3000")));
        assert!(policy.is_allowed(&origin("http://127.0.0.1:3000")));
        assert!(!policy.is_allowed(&origin("https://evil.example")));
        assert!(!policy.is_allowed(&HeaderMap::new()));
    }

    #[test]
    fn test_production_allows_only_frontend() {
        let mut config = CorsConfig::default();
        config.frontend_url = "https://grading.example.com".into();
        let policy = CorsPolicy::from_config(&config, DeploymentMode::Production);

        assert!(policy.is_allowed(&origin("https://grading.example.com")));
        assert!(!policy.is_allowed(&origin("http://localhost:3000")));
    }

    #[test]
    fn test_origin_match_is_exact() {
        let policy = CorsPolicy::new(&["http://localhost:3000".to_string()]);
        assert!(!policy.is_allowed(&origin("http://localhost:3000/")));
        assert!(!policy.is_allowed(&origin("HTTP://LOCALHOST:3000")));
    }
}
