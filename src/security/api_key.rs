//! API-key authentication.
//!
//! The credential is read from the `x-api-key` header, falling back to the
//! `apiKey` query parameter, and compared in constant time against the single
//! configured secret.

use axum::http::HeaderMap;
use subtle::ConstantTimeEq;
use thiserror::Error;

/// Header carrying the credential.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Query parameter accepted when the header is absent.
pub const API_KEY_QUERY_PARAM: &str = "apiKey";

/// Why a request was rejected. Never shown to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("no API key configured")]
    NotConfigured,
    #[error("credential missing")]
    Missing,
    #[error("credential mismatch")]
    Mismatch,
}

impl AuthError {
    pub fn reason(self) -> &'static str {
        match self {
            AuthError::NotConfigured => "not_configured",
            AuthError::Missing => "missing",
            AuthError::Mismatch => "mismatch",
        }
    }
}

/// Compares presented credentials with the process-wide secret.
#[derive(Clone)]
pub struct ApiKeyAuthenticator {
    secret: Option<String>,
}

impl std::fmt::Debug for ApiKeyAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyAuthenticator")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl ApiKeyAuthenticator {
    /// Empty secrets count as unconfigured.
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Check the credential carried by a request.
    pub fn authenticate(&self, headers: &HeaderMap, query: Option<&str>) -> Result<(), AuthError> {
        let secret = self.secret.as_deref().ok_or(AuthError::NotConfigured)?;
        let provided = extract_credential(headers, query).ok_or(AuthError::Missing)?;

        if constant_time_eq(&provided, secret) {
            Ok(())
        } else {
            Err(AuthError::Mismatch)
        }
    }
}

/// Header first, then query string. Empty values count as absent.
///
/// A header that is present decides on its own: if it is empty or not valid
/// UTF-8 the request has no credential and the query is not consulted.
pub fn extract_credential(headers: &HeaderMap, query: Option<&str>) -> Option<String> {
    let credential = match headers.get(API_KEY_HEADER) {
        Some(value) => value.to_str().ok().map(str::to_string),
        None => query.and_then(query_credential),
    };
    credential.filter(|v| !v.is_empty())
}

fn query_credential(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == API_KEY_QUERY_PARAM)
        .map(|(_, v)| v.into_owned())
}

/// Constant-time comparison of equal-length inputs.
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();
    if provided.len() != expected.len() {
        return false;
    }
    provided.ct_eq(expected).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_key(key: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_str(key).unwrap());
        headers
    }

    #[test]
    fn test_header_key_accepted() {
        let auth = ApiKeyAuthenticator::new(Some("secret".into()));
        assert_eq!(auth.authenticate(&headers_with_key("secret"), None), Ok(()));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let auth = ApiKeyAuthenticator::new(Some("secret".into()));
        assert_eq!(
            auth.authenticate(&headers_with_key("WRONG"), None),
            Err(AuthError::Mismatch)
        );
        assert_eq!(
            auth.authenticate(&headers_with_key("secret-but-longer"), None),
            Err(AuthError::Mismatch)
        );
    }

    #[test]
    fn test_missing_key_rejected() {
        let auth = ApiKeyAuthenticator::new(Some("secret".into()));
        assert_eq!(auth.authenticate(&HeaderMap::new(), None), Err(AuthError::Missing));
        assert_eq!(
            auth.authenticate(&headers_with_key(""), None),
            Err(AuthError::Missing)
        );
    }

    #[test]
    fn test_unconfigured_secret_rejects_everything() {
        let auth = ApiKeyAuthenticator::new(None);
        assert!(!auth.is_configured());
        assert_eq!(
            auth.authenticate(&headers_with_key("anything"), None),
            Err(AuthError::NotConfigured)
        );

        let empty = ApiKeyAuthenticator::new(Some(String::new()));
        assert_eq!(
            empty.authenticate(&headers_with_key(""), None),
            Err(AuthError::NotConfigured)
        );
    }

    #[test]
    fn test_query_fallback() {
        let auth = ApiKeyAuthenticator::new(Some("s3cr3t".into()));
        assert_eq!(
            auth.authenticate(&HeaderMap::new(), Some("period=week&apiKey=s3cr3t")),
            Ok(())
        );
        assert_eq!(
            auth.authenticate(&HeaderMap::new(), Some("period=week")),
            Err(AuthError::Missing)
        );
    }

    #[test]
    fn test_header_wins_over_query() {
        let auth = ApiKeyAuthenticator::new(Some("s3cr3t".into()));
        assert_eq!(
            auth.authenticate(&headers_with_key("WRONG"), Some("apiKey=s3cr3t")),
            Err(AuthError::Mismatch)
        );
    }

    #[test]
    fn test_non_utf8_header_is_missing_not_query() {
        let auth = ApiKeyAuthenticator::new(Some("s3cr3t".into()));
        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, HeaderValue::from_bytes(&[0xFF, 0xFE]).unwrap());

        assert_eq!(extract_credential(&headers, Some("apiKey=s3cr3t")), None);
        assert_eq!(
            auth.authenticate(&headers, Some("apiKey=s3cr3t")),
            Err(AuthError::Missing)
        );
    }

    #[test]
    fn test_empty_header_does_not_fall_back_to_query() {
        let auth = ApiKeyAuthenticator::new(Some("s3cr3t".into()));
        assert_eq!(
            auth.authenticate(&headers_with_key(""), Some("apiKey=s3cr3t")),
            Err(AuthError::Missing)
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = ApiKeyAuthenticator::new(Some("hunter2".into()));
        assert!(!format!("{:?}", auth).contains("hunter2"));
    }
}
