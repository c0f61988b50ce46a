//! The external identity provider, seen as an opaque collaborator.

use async_trait::async_trait;

/// A verified identity returned by the external provider.
#[derive(Debug, Clone)]
pub struct ProviderIdentity {
    /// The provider's stable subject reference for this user.
    pub subject: String,
    /// Human-readable display name.
    pub display_name: String,
}

/// The interactive login/consent flow lives entirely on the provider's
/// side; this trait is the whole surface Docvault sees of it.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Consent-screen URL to send the browser to, carrying the CSRF state
    /// nonce so the callback can be tied back to this handshake.
    fn authorize_url(&self, state: &str) -> String;

    /// Exchange a callback authorization code for the verified identity.
    async fn exchange_code(&self, code: &str) -> anyhow::Result<ProviderIdentity>;
}
