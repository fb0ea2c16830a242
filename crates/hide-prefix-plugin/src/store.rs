//! Persistence strategies for [`Settings`].
//!
//! Stores never fail towards the caller: a broken or unreachable store is
//! logged and treated as holding the defaults.

use std::sync::Arc;

use async_trait::async_trait;
use hide_prefix_core::{from_fenced_json, to_fenced_json, Settings};
use log::{error, info, warn};

use crate::config::ConfigBackend;
use crate::error::StoreError;
use crate::host::Host;

#[async_trait]
pub trait ConfigStore: Send + Sync {
    fn backend(&self) -> ConfigBackend;

    /// Current stored settings, defaults on any failure
    async fn load(&self) -> Settings;

    async fn save(&self, settings: &Settings);
}

/// Build the store selected by `backend`.
pub fn build<H: Host>(backend: ConfigBackend, host: Arc<H>, page: &str) -> Box<dyn ConfigStore> {
    match backend {
        ConfigBackend::HostSettings => Box::new(HostSettingsStore::new(host)),
        ConfigBackend::GraphPage => Box::new(GraphConfigStore::new(host, page)),
    }
}

/// Settings kept by the host's own plugin settings facility
pub struct HostSettingsStore<H> {
    host: Arc<H>,
}

impl<H: Host> HostSettingsStore<H> {
    pub fn new(host: Arc<H>) -> Self {
        Self { host }
    }
}

#[async_trait]
impl<H: Host> ConfigStore for HostSettingsStore<H> {
    fn backend(&self) -> ConfigBackend {
        ConfigBackend::HostSettings
    }

    async fn load(&self) -> Settings {
        match self.host.settings().await {
            Ok(value) => {
                let settings = Settings::from_host_value(&value);
                info!("settings updated {:?}", settings);
                settings
            }
            Err(e) => {
                warn!("failed to read host settings, using defaults: {}", e);
                Settings::default()
            }
        }
    }

    async fn save(&self, settings: &Settings) {
        if let Err(e) = self.host.update_settings(settings.to_value()).await {
            error!("failed to update host settings: {}", e);
        }
    }
}

/// Settings stored as a fenced JSON block on a reserved graph page
pub struct GraphConfigStore<H> {
    host: Arc<H>,
    page: String,
}

impl<H: Host> GraphConfigStore<H> {
    pub fn new(host: Arc<H>, page: &str) -> Self {
        Self {
            host,
            page: page.to_string(),
        }
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    /// `Ok(None)` when the page is missing or empty
    async fn read(&self) -> Result<Option<Settings>, StoreError> {
        let blocks = self.host.page_blocks(&self.page).await?;
        match blocks.first() {
            Some(block) => Ok(Some(from_fenced_json(&block.content)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, settings: &Settings) -> Result<(), StoreError> {
        let content = to_fenced_json(settings)?;
        let blocks = self.host.page_blocks(&self.page).await?;
        match blocks.first() {
            Some(block) => self.host.update_block(block.uuid, &content).await?,
            None => {
                let page = self.host.create_page(&self.page).await?;
                self.host.append_block_in_page(page.uuid, &content).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<H: Host> ConfigStore for GraphConfigStore<H> {
    fn backend(&self) -> ConfigBackend {
        ConfigBackend::GraphPage
    }

    async fn load(&self) -> Settings {
        let settings = match self.read().await {
            Ok(Some(settings)) => settings,
            Ok(None) => {
                info!("config page {:?} not found, creating it", self.page);
                let defaults = Settings::default();
                self.save(&defaults).await;
                defaults
            }
            Err(e) => {
                error!("error reading config from graph: {}", e);
                Settings::default()
            }
        };

        match self.host.update_settings(settings.to_value()).await {
            Ok(()) => info!("settings synced to UI {:?}", settings),
            Err(e) => error!("failed to sync settings to UI: {}", e),
        }
        settings
    }

    async fn save(&self, settings: &Settings) {
        match self.write(settings).await {
            Ok(()) => info!("config written to graph {:?}", settings),
            Err(e) => error!("error writing config to graph: {}", e),
        }
    }
}
