//! The sign-in handshake routes.
//!
//! `/auth/google` opens the provider consent flow, `/auth/google/callback`
//! turns a provider success into a Docvault user record plus an issued
//! bearer credential, `/auth/logout` drops the transient handshake state.
//! Logging out does not revoke already-issued credentials; they stay valid
//! for their TTL.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    Router,
    extract::{Query, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;

/// Cookie tying a callback to the handshake that started it.
const STATE_COOKIE_NAME: &str = "docvault_oauth_state";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/google", get(begin))
        .route("/auth/google/callback", get(callback))
        .route("/auth/logout", get(logout))
}

/// Handler for `GET /auth/google`: stash a state nonce in a short-lived
/// cookie and hand the browser to the provider.
async fn begin(State(state): State<AppState>) -> Response {
    let nonce: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();

    let url = state.provider().authorize_url(&nonce);
    let cookie = format!(
        "{STATE_COOKIE_NAME}={nonce}; Path=/; HttpOnly; SameSite=Lax; Max-Age=600"
    );

    ([(header::SET_COOKIE, cookie)], Redirect::to(&url)).into_response()
}

/// Query parameters Google sends to the callback.
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

/// Handler for `GET /auth/google/callback`.
///
/// Provider-side failures (denied consent, bad code, state mismatch) send
/// the browser to the failure destination with no token. Once the provider
/// has vouched for an identity, local failures are server errors.
async fn callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<CallbackQuery>,
) -> Result<Response, ApiError> {
    let failure_url = state.config().login_failure_url.clone();

    if let Some(reason) = &query.error {
        tracing::warn!(reason, "provider reported handshake failure");
        return Ok(Redirect::to(&failure_url).into_response());
    }

    let (Some(code), Some(callback_state)) = (&query.code, &query.state) else {
        tracing::warn!("callback missing code or state");
        return Ok(Redirect::to(&failure_url).into_response());
    };

    if state_cookie(&headers).as_deref() != Some(callback_state.as_str()) {
        tracing::warn!("handshake state mismatch");
        return Ok(Redirect::to(&failure_url).into_response());
    }

    let identity = match state.provider().exchange_code(code).await {
        Ok(identity) => identity,
        Err(err) => {
            tracing::warn!(error = %err, "code exchange failed");
            return Ok(Redirect::to(&failure_url).into_response());
        }
    };

    let user = state
        .store()
        .find_or_create_user(&identity.subject, &identity.display_name)
        .await?;

    let token = state
        .codec()
        .issue(&user.id)
        .map_err(|e| ApiError::Internal(e.into()))?;

    tracing::info!(user_id = %user.id, "handshake complete, credential issued");

    let destination = format!(
        "{}?token={}",
        state.config().login_success_url,
        urlencoding::encode(&token)
    );

    Ok((
        [(header::SET_COOKIE, clear_state_cookie())],
        Redirect::to(&destination),
    )
        .into_response())
}

/// Handler for `GET /auth/logout`: clear the handshake cookie and redirect.
async fn logout() -> Response {
    ([(header::SET_COOKIE, clear_state_cookie())], Redirect::to("/")).into_response()
}

fn clear_state_cookie() -> String {
    format!("{STATE_COOKIE_NAME}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

fn state_cookie(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    for cookie in cookies.split(';') {
        let cookie = cookie.trim();
        if let Some(value) = cookie.strip_prefix(&format!("{STATE_COOKIE_NAME}=")) {
            return Some(value.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_cookie_extracted_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; docvault_oauth_state=abc123; lang=en".parse().unwrap(),
        );
        assert_eq!(state_cookie(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_state_cookie_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "theme=dark".parse().unwrap());
        assert!(state_cookie(&headers).is_none());
        assert!(state_cookie(&HeaderMap::new()).is_none());
    }
}
