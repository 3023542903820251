//! Admin authentication and CORS.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::state::AppState;

/// Browser origins allowed to call the API (the site itself and local dev).
const ALLOWED_ORIGINS: &[&str] = &[
    "http://localhost:8046",
    "http://127.0.0.1:8046",
    "http://localhost:5173",
    "https://bchcurator.com",
];

fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

fn presented_key(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer ").or(Some(s)))
        .or_else(|| request.headers().get("x-api-key").and_then(|h| h.to_str().ok()))
}

/// Require the admin key on every request except CORS preflight.
/// With no key configured the admin API is closed.
pub async fn admin_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    if request.method() == Method::OPTIONS {
        return Ok(next.run(request).await);
    }

    let Some(expected) = state.admin_key() else {
        tracing::error!(
            "[Auth] Admin request to {} but CURATOR_ADMIN_KEY is not set",
            request.uri().path()
        );
        return Err(StatusCode::UNAUTHORIZED);
    };

    if presented_key(&request).is_some_and(|k| constant_time_compare(k, expected)) {
        Ok(next.run(request).await)
    } else {
        tracing::warn!(
            "[Auth] Rejected admin request: {} {}",
            request.method(),
            request.uri().path()
        );
        Err(StatusCode::UNAUTHORIZED)
    }
}

pub fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS.iter().filter_map(|o| o.parse().ok()).collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false)
        .max_age(std::time::Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc", "abc"));
        assert!(!constant_time_compare("abc", "abd"));
        assert!(!constant_time_compare("ab", "abc"));
    }
}
