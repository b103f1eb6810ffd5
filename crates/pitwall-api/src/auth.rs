//! Bearer-token authentication for trigger endpoints.
//!
//! Triggers authenticate with static secrets: the scheduler presents
//! `CRON_SECRET`, on-demand publishes present `API_KEY`. A missing or
//! malformed header is 401; a well-formed header with the wrong secret
//! is 403.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use crate::error::ApiError;

/// Require a `Bearer` token equal to `expected`.
pub fn require_bearer(headers: &HeaderMap, expected: &str) -> Result<(), ApiError> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| {
            ApiError::unauthorized("Missing or invalid Authorization header")
        })?;

    if token != expected {
        return Err(ApiError::forbidden("Invalid bearer token"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: Option<&str>) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Some(v) = value {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(v).unwrap());
        }
        headers
    }

    #[test]
    fn test_valid_token() {
        assert!(require_bearer(&headers(Some("Bearer s3cret")), "s3cret").is_ok());
    }

    #[test]
    fn test_missing_header_is_unauthorized() {
        let err = require_bearer(&headers(None), "s3cret").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_non_bearer_scheme_is_unauthorized() {
        let err = require_bearer(&headers(Some("Basic abc")), "s3cret").unwrap_err();
        assert!(matches!(err, ApiError::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_token_is_forbidden() {
        let err = require_bearer(&headers(Some("Bearer nope")), "s3cret").unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }

    #[test]
    fn test_error_does_not_echo_the_token() {
        let err = require_bearer(&headers(Some("Bearer nope")), "s3cret").unwrap_err();
        let msg = err.to_string();
        assert!(!msg.contains("nope"));
        assert!(!msg.contains("s3cret"));
    }
}
