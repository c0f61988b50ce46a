//! Identity resolution at the request boundary.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// The identity resolved for an authenticated request, inserted into
/// request extensions for downstream handlers.
#[derive(Clone, Debug)]
pub struct Identity {
    pub user_id: String,
}

/// Axum middleware gating every `/api` route:
/// - extract the bearer token from the Authorization header
/// - verify it against the server's signing secret and expiry
/// - bind the resolved subject to the request context
///
/// This is a pure gate: it never touches the store and never mutates
/// persisted state. Missing credentials map to 401; any verification
/// failure maps to 400 (the verification reason is only logged).
pub async fn require_identity(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers()).ok_or(ApiError::MissingCredential)?;

    let user_id = state.codec().verify(&token).map_err(|err| {
        tracing::debug!(reason = %err, "rejected bearer credential");
        ApiError::RejectedCredential
    })?;

    req.extensions_mut().insert(Identity { user_id });
    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;

    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::AUTHORIZATION;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_missing_header_yields_none() {
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn test_non_bearer_scheme_yields_none() {
        let headers = headers_with("Basic dXNlcjpwYXNz");
        assert!(bearer_token(&headers).is_none());
    }

    #[test]
    fn test_empty_bearer_yields_none() {
        let headers = headers_with("Bearer   ");
        assert!(bearer_token(&headers).is_none());
    }
}
