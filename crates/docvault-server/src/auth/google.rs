//! Google OAuth 2.0 as the external identity provider.

use crate::auth::provider::{IdentityProvider, ProviderIdentity};
use crate::config::GoogleConfig;
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

const AUTH_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://openidconnect.googleapis.com/v1/userinfo";

/// Authorization-code client for Google's OAuth endpoints.
pub struct GoogleProvider {
    http: reqwest::Client,
    config: GoogleConfig,
}

impl GoogleProvider {
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl IdentityProvider for GoogleProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!(
            "{AUTH_ENDPOINT}?response_type=code&client_id={}&redirect_uri={}&scope={}&state={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_url),
            urlencoding::encode("openid profile"),
            urlencoding::encode(state),
        )
    }

    async fn exchange_code(&self, code: &str) -> anyhow::Result<ProviderIdentity> {
        let token: TokenResponse = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("redirect_uri", self.config.redirect_url.as_str()),
            ])
            .send()
            .await
            .context("token endpoint unreachable")?
            .error_for_status()
            .context("token exchange rejected")?
            .json()
            .await
            .context("malformed token response")?;

        let info: UserInfo = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await
            .context("userinfo endpoint unreachable")?
            .error_for_status()
            .context("userinfo request rejected")?
            .json()
            .await
            .context("malformed userinfo response")?;

        Ok(ProviderIdentity {
            display_name: info.name.unwrap_or_else(|| info.sub.clone()),
            subject: info.sub,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    sub: String,
    name: Option<String>,
}
