//! Shared application state.

use crate::auth::provider::IdentityProvider;
use crate::config::AppConfig;
use docvault_store::DocumentStore;
use docvault_token::CredentialCodec;
use std::sync::Arc;

/// Shared state handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    codec: CredentialCodec,
    store: Arc<dyn DocumentStore>,
    provider: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Arc<dyn DocumentStore>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let ttl = chrono::Duration::from_std(config.token_ttl)
            .unwrap_or(chrono::Duration::MAX);
        let codec = CredentialCodec::new(&config.signing_secret, ttl);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                codec,
                store,
                provider,
            }),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn codec(&self) -> &CredentialCodec {
        &self.inner.codec
    }

    pub fn store(&self) -> &dyn DocumentStore {
        self.inner.store.as_ref()
    }

    pub fn provider(&self) -> &dyn IdentityProvider {
        self.inner.provider.as_ref()
    }
}
