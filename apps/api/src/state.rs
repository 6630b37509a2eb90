use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use crate::accounts::AccountStore;
use crate::catalog::CatalogStore;
use crate::config::Config;
use crate::llm_client::{GeminiClient, TextGenerator};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<CatalogStore>,
    pub accounts: Arc<AccountStore>,
    /// Pluggable generator. Default: `GeminiClient`.
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(
        catalog: CatalogStore,
        accounts: AccountStore,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            catalog: Arc::new(catalog),
            accounts: Arc::new(accounts),
            generator,
        }
    }

    /// Loads the catalog and wires the Gemini client from configuration.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let catalog = CatalogStore::load(
            &config.companies_file,
            &config.skills_file,
            &config.top_paying_roles_file,
        )
        .await;

        let accounts = AccountStore::new(config.users_file.clone());
        info!("Account store at {}", accounts.path().display());

        let generator = GeminiClient::new(
            config.google_api_key.clone(),
            config.generator_url.clone(),
            config.generator_timeout,
            config.generator_max_attempts,
        )
        .context("Failed to build generator HTTP client")?;
        info!(
            "Generator client initialized (url: {}, timeout: {}s, attempts: {})",
            config.generator_url,
            config.generator_timeout.as_secs(),
            config.generator_max_attempts
        );

        Ok(Self::new(catalog, accounts, Arc::new(generator)))
    }
}
