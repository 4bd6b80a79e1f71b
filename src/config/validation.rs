//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, origins and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use url::Url;

use crate::config::schema::ApiConfig;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let prefix = &config.cors.api_prefix;
    if prefix.len() < 2 || !prefix.starts_with('/') || prefix.ends_with('/') {
        errors.push(ValidationError::new(
            "cors.api_prefix",
            "must be a non-root path starting with '/' and not ending with '/'",
        ));
    }

    for (i, origin) in config.cors.development_origins.iter().enumerate() {
        if let Err(message) = check_origin(origin) {
            errors.push(ValidationError::new(
                format!("cors.development_origins[{}]", i),
                message,
            ));
        }
    }

    if let Err(message) = check_origin(&config.cors.frontend_url) {
        errors.push(ValidationError::new("cors.frontend_url", message));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::new(
            "observability.log_level",
            format!("must be one of {}", LOG_LEVELS.join(", ")),
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// An origin is scheme + host (+ port), nothing else.
fn check_origin(origin: &str) -> Result<(), String> {
    let url = Url::parse(origin).map_err(|e| format!("'{}' is not a valid URL: {}", origin, e))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(format!("'{}' must use http or https", origin));
    }
    if url.host_str().is_none() {
        return Err(format!("'{}' has no host", origin));
    }
    if url.path() != "/" || origin.ends_with('/') || url.query().is_some() {
        return Err(format!("'{}' must not contain a path, query or trailing slash", origin));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ApiConfig::default()).is_ok());
    }

    #[test]
    fn test_root_prefix_rejected() {
        let mut config = ApiConfig::default();
        config.cors.api_prefix = "/".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "cors.api_prefix");
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = ApiConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.cors.api_prefix = "api/".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "cors.api_prefix",
                "timeouts.request_secs",
                "observability.log_level",
            ]
        );
    }

    #[test]
    fn test_origin_rules() {
        assert!(check_origin("http://localhost:3000").is_ok());
        assert!(check_origin("https://app.example.com").is_ok());
        assert!(check_origin("https://app.example.com/").is_err());
        assert!(check_origin("https://app.example.com/dashboard").is_err());
        assert!(check_origin("ftp://files.example.com").is_err());
        assert!(check_origin("localhost:3000").is_err());
    }

    #[test]
    fn test_bad_frontend_url_rejected() {
        let mut config = ApiConfig::default();
        config.cors.frontend_url = "grading.example.com".into();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "cors.frontend_url");
    }
}
