//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::ApiConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Deployment mode (`development` | `production`).
pub const ENV_APP_ENV: &str = "APP_ENV";
/// Production allow-origin.
pub const ENV_FRONTEND_URL: &str = "FRONTEND_URL";
/// Shared API secret.
pub const ENV_API_SECRET_KEY: &str = "API_SECRET_KEY";
/// Listener bind address.
pub const ENV_BIND_ADDRESS: &str = "BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {message}")]
    Env { name: &'static str, message: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the optional TOML file, then the
/// process environment, then validation.
pub fn load_config(path: Option<&Path>) -> Result<ApiConfig, ConfigError> {
    load_with_env(path, |name| std::env::var(name).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_with_env<F>(path: Option<&Path>, env: F) -> Result<ApiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let config = match path {
        Some(path) => parse_file(path)?,
        None => ApiConfig::default(),
    };

    let config = apply_env_overrides(config, env)?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Parse a TOML file without validating it.
pub fn parse_file(path: &Path) -> Result<ApiConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Overlay recognized environment variables onto a configuration.
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(mut config: ApiConfig, env: F) -> Result<ApiConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(mode) = lookup(ENV_APP_ENV) {
        config.environment = mode.parse().map_err(|message| ConfigError::Env {
            name: ENV_APP_ENV,
            message,
        })?;
    }

    if let Some(url) = lookup(ENV_FRONTEND_URL) {
        config.cors.frontend_url = url.trim().to_string();
    }

    if let Some(key) = lookup(ENV_API_SECRET_KEY) {
        config.auth.api_key = Some(key);
    }

    if let Some(addr) = lookup(ENV_BIND_ADDRESS) {
        config.listener.bind_address = addr.trim().to_string();
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{DeploymentMode, DEFAULT_FRONTEND_URL};
    use std::collections::HashMap;
    use std::io::Write;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = load_with_env(None, env_from(&[])).unwrap();
        assert_eq!(config.environment, DeploymentMode::Development);
        assert_eq!(config.cors.frontend_url, DEFAULT_FRONTEND_URL);
        assert!(config.auth.api_key.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = load_with_env(
            None,
            env_from(&[
                (ENV_APP_ENV, "production"),
                (ENV_FRONTEND_URL, "https://grading.example.com"),
                (ENV_API_SECRET_KEY, "s3cret"),
                (ENV_BIND_ADDRESS, "127.0.0.1:9000"),
            ]),
        )
        .unwrap();

        assert_eq!(config.environment, DeploymentMode::Production);
        assert_eq!(config.cors.frontend_url, "https://grading.example.com");
        assert_eq!(config.auth.api_key.as_deref(), Some("s3cret"));
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_empty_frontend_url_falls_back_to_default() {
        let config = load_with_env(None, env_from(&[(ENV_FRONTEND_URL, "  ")])).unwrap();
        assert_eq!(config.cors.frontend_url, DEFAULT_FRONTEND_URL);
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = load_with_env(None, env_from(&[(ENV_APP_ENV, "staging")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { name: ENV_APP_ENV, .. }));
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let err = load_with_env(None, env_from(&[(ENV_FRONTEND_URL, "not a url")])).unwrap_err();
        match err {
            ConfigError::Validation(errors) => assert_eq!(errors[0].field, "cors.frontend_url"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_file_then_env() {
        let path = std::env::temp_dir().join(format!("grading-api-{}.toml", uuid::Uuid::new_v4()));
        let mut file = fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
            environment = "production"

            [auth]
            api_key = "from-file"

            [listener]
            bind_address = "127.0.0.1:7000"
            "#
        )
        .unwrap();

        let config = load_with_env(Some(&path), env_from(&[(ENV_API_SECRET_KEY, "from-env")])).unwrap();
        assert_eq!(config.environment, DeploymentMode::Production);
        assert_eq!(config.listener.bind_address, "127.0.0.1:7000");
        assert_eq!(config.auth.api_key.as_deref(), Some("from-env"));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_with_env(Some(Path::new("/definitely/not/here.toml")), env_from(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
