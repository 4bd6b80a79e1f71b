//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the API.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Production frontend origin used when `FRONTEND_URL` is not set.
pub const DEFAULT_FRONTEND_URL: &str = "https://app.cardgrading.io";

/// Root configuration for the grading API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ApiConfig {
    /// Deployment mode (drives CORS allow-list and error detail exposure).
    pub environment: DeploymentMode,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// API-key authentication.
    pub auth: AuthConfig,

    /// Cross-origin policy.
    pub cors: CorsConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Request limits.
    pub security: SecurityConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Deployment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentMode {
    #[default]
    Development,
    Production,
}

impl DeploymentMode {
    pub fn is_production(self) -> bool {
        matches!(self, DeploymentMode::Production)
    }

    /// Whether internal error details may be returned to clients.
    pub fn exposes_error_details(self) -> bool {
        !self.is_production()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeploymentMode::Development => "development",
            DeploymentMode::Production => "production",
        }
    }
}

impl std::str::FromStr for DeploymentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(DeploymentMode::Development),
            "production" | "prod" => Ok(DeploymentMode::Production),
            other => Err(format!("unknown deployment mode '{}'", other)),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// API-key configuration.
///
/// Custom `Debug` redacts the key so configs can be logged safely.
#[derive(Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AuthConfig {
    /// Shared secret expected in `x-api-key`. `None` rejects every protected request.
    pub api_key: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Cross-origin configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Path prefix the CORS layer applies to.
    pub api_prefix: String,

    /// Origins allowed in development mode.
    pub development_origins: Vec<String>,

    /// The single origin allowed in production mode.
    pub frontend_url: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
            development_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
                "http://localhost:3001".to_string(),
            ],
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
        }
    }
}

impl CorsConfig {
    /// Origins allowed for the given deployment mode.
    pub fn allowed_origins(&self, mode: DeploymentMode) -> Vec<String> {
        match mode {
            DeploymentMode::Development => self.development_origins.clone(),
            DeploymentMode::Production => vec![self.frontend_url.clone()],
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Request limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format. Production always logs JSON.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_by_mode() {
        let cors = CorsConfig::default();
        let dev = cors.allowed_origins(DeploymentMode::Development);
        assert!(dev.contains(&"http://localhost:3000".to_string()));

        let prod = cors.allowed_origins(DeploymentMode::Production);
        assert_eq!(prod, vec![DEFAULT_FRONTEND_URL.to_string()]);
    }

    #[test]
    fn test_auth_debug_redacts_key() {
        let auth = AuthConfig {
            api_key: Some("super-secret".into()),
        };
        let printed = format!("{:?}", auth);
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("REDACTED"));
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("production".parse::<DeploymentMode>(), Ok(DeploymentMode::Production));
        assert_eq!("DEV".parse::<DeploymentMode>(), Ok(DeploymentMode::Development));
        assert!("staging".parse::<DeploymentMode>().is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ApiConfig = toml::from_str(
            r#"
            environment = "production"

            [cors]
            frontend_url = "https://shop.example.com"
            "#,
        )
        .unwrap();

        assert_eq!(config.environment, DeploymentMode::Production);
        assert_eq!(config.cors.api_prefix, "/api");
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert!(config.auth.api_key.is_none());
    }
}
