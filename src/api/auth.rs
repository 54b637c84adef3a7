use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::sync::Arc;

use super::error::ErrorBody;
use super::{ApiError, AppState};

/// Basic-auth middleware for the mutating route. Credentials ride on every
/// request; no session is created on success.
pub async fn basic_auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some((username, password)) = parse_basic_credentials(&headers) else {
        return Ok(challenge());
    };

    let is_valid = state
        .credentials()
        .verify(&username, &password)
        .await
        .map_err(|e| ApiError::internal(format!("Authentication error: {e}")))?;

    if !is_valid {
        tracing::warn!(username = %username, "Unauthorized access attempt");
        return Ok(challenge());
    }

    Ok(next.run(request).await)
}

/// Extract the username/password pair from an `Authorization: Basic` header.
/// Passwords may contain colons; only the first one splits.
fn parse_basic_credentials(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;

    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

fn challenge() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, "Basic realm=\"filmdex\"")],
        Json(ErrorBody {
            message: "Unauthorized".to_string(),
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_authorization(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_parse_basic_credentials() {
        // "dan:hunter2"
        let headers = headers_with_authorization("Basic ZGFuOmh1bnRlcjI=");
        let (username, password) = parse_basic_credentials(&headers).unwrap();
        assert_eq!(username, "dan");
        assert_eq!(password, "hunter2");
    }

    #[test]
    fn test_parse_password_with_colon() {
        // "dan:pa:ss"
        let headers = headers_with_authorization("Basic ZGFuOnBhOnNz");
        let (username, password) = parse_basic_credentials(&headers).unwrap();
        assert_eq!(username, "dan");
        assert_eq!(password, "pa:ss");
    }

    #[test]
    fn test_parse_rejects_missing_or_malformed_header() {
        assert!(parse_basic_credentials(&HeaderMap::new()).is_none());

        let headers = headers_with_authorization("Bearer some-token");
        assert!(parse_basic_credentials(&headers).is_none());

        let headers = headers_with_authorization("Basic not-base64!!");
        assert!(parse_basic_credentials(&headers).is_none());

        // "nocolon"
        let headers = headers_with_authorization("Basic bm9jb2xvbg==");
        assert!(parse_basic_credentials(&headers).is_none());
    }
}
