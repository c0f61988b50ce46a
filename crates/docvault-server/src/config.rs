use anyhow::Context;
use std::{env, time::Duration};

/// Environment-supplied server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address, e.g. "0.0.0.0:8080".
    pub bind: String,

    /// Path to the local SQLite file backing the document store.
    pub sqlite_path: String,

    /// Secret used to sign and verify bearer credentials.
    pub signing_secret: String,

    /// Credential lifetime; issued tokens expire this long after issuance.
    pub token_ttl: Duration,

    /// Google OAuth client settings.
    pub google: GoogleConfig,

    /// Where the callback sends the browser on success (token attached).
    pub login_success_url: String,

    /// Where the callback sends the browser when the handshake fails.
    pub login_failure_url: String,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,

    /// The callback URL registered with Google, e.g.
    /// "http://localhost:8080/auth/google/callback".
    pub redirect_url: String,
}

pub fn load_config() -> anyhow::Result<AppConfig> {
    let bind = env_or("DOCVAULT_BIND", "0.0.0.0:8080");

    let token_ttl = humantime::parse_duration(&env_or("DOCVAULT_TOKEN_TTL", "1h"))
        .context("DOCVAULT_TOKEN_TTL must be a duration like '1h' or '30m'")?;

    Ok(AppConfig {
        sqlite_path: env_or("DOCVAULT_SQLITE_PATH", "data/docvault.sqlite"),
        signing_secret: required("DOCVAULT_SIGNING_SECRET")?,
        token_ttl,
        google: GoogleConfig {
            client_id: required("GOOGLE_CLIENT_ID")?,
            client_secret: required("GOOGLE_CLIENT_SECRET")?,
            redirect_url: env_or(
                "DOCVAULT_OAUTH_REDIRECT_URL",
                &format!("http://{}/auth/google/callback", bind),
            ),
        },
        login_success_url: env_or("DOCVAULT_LOGIN_SUCCESS_URL", "/"),
        login_failure_url: env_or("DOCVAULT_LOGIN_FAILURE_URL", "/"),
        bind,
    })
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn required(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{name} must be set"))
}
