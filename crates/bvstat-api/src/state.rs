//! Application state.

use std::sync::Arc;

use bvstat_cloud::{CloudConfig, WordCloudRenderer};
use bvstat_scraper::BiliClient;

use crate::config::ApiConfig;
use crate::security::AllowedHosts;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub allowed_hosts: Arc<AllowedHosts>,
    pub client: Arc<BiliClient>,
    pub renderer: Arc<WordCloudRenderer>,
}

impl AppState {
    /// Create application state from environment variables.
    ///
    /// Loads the word cloud font and stop words, so a missing font fails
    /// start-up rather than the first render.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let client = BiliClient::from_env()?;
        let renderer = WordCloudRenderer::from_config(CloudConfig::from_env())?;
        Ok(Self::from_parts(config, client, renderer))
    }

    /// Assemble state from already built components.
    pub fn from_parts(config: ApiConfig, client: BiliClient, renderer: WordCloudRenderer) -> Self {
        let allowed_hosts = AllowedHosts::from_list(&config.allowed_hosts);
        Self {
            config,
            allowed_hosts: Arc::new(allowed_hosts),
            client: Arc::new(client),
            renderer: Arc::new(renderer),
        }
    }
}
