use std::sync::Arc;

use hide_prefix_core::{settings_schema, ScanReport, Settings};
use log::{info, warn};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::config::{ConfigBackend, PluginOptions};
use crate::driver::ScanDriver;
use crate::host::{CommandDescriptor, Host, HostEvent};
use crate::state::SharedState;
use crate::store::{self, ConfigStore};
use crate::watcher::{Watcher, WatcherHandle};

/// Command that re-reads the stored settings after manual page edits
pub const RELOAD_COMMAND: &str = "customizer-reload-config";
const RELOAD_COMMAND_LABEL: &str = "Reload customizer config from graph";

/// Plugin controller.
///
/// Owns the settings, the selected config store and the watcher, and
/// dispatches host events to them.
pub struct Plugin<H: Host> {
    host: Arc<H>,
    options: PluginOptions,
    state: SharedState,
    store: Box<dyn ConfigStore>,
    driver: ScanDriver<H>,
    watcher: WatcherHandle,
}

impl<H: Host> Plugin<H> {
    /// Register with the host, load settings and start watching.
    ///
    /// Must be called inside a tokio runtime; the watcher is spawned as a
    /// task that lives until the plugin is dropped.
    pub async fn start(host: Arc<H>, options: PluginOptions) -> Self {
        info!("plugin loaded ({:?} config)", options.config_backend);

        if let Err(e) = host.use_settings_schema(settings_schema()).await {
            warn!("failed to register settings schema: {}", e);
        }

        let store = store::build(options.config_backend, host.clone(), &options.config_page);
        let state = SharedState::new(store.load().await);

        let driver = ScanDriver::new(host.clone(), state.clone());
        let (watcher, handle) = Watcher::new(
            driver.clone(),
            options.debounce(),
            options.page_loaded_schedule.clone(),
        );
        tokio::spawn(watcher.start());
        handle.schedule(options.startup_schedule.clone());

        if options.config_backend == ConfigBackend::GraphPage {
            let command = CommandDescriptor {
                key: RELOAD_COMMAND.to_string(),
                label: RELOAD_COMMAND_LABEL.to_string(),
            };
            if let Err(e) = host.register_command(command).await {
                warn!("failed to register {}: {}", RELOAD_COMMAND, e);
            }
        }

        Self {
            host,
            options,
            state,
            store,
            driver,
            watcher: handle,
        }
    }

    pub fn host(&self) -> &Arc<H> {
        &self.host
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    pub fn watcher(&self) -> &WatcherHandle {
        &self.watcher
    }

    pub async fn settings(&self) -> Settings {
        self.state.settings().await
    }

    /// One full scan with the current settings
    pub async fn scan(&self) -> ScanReport {
        self.driver.run().await
    }

    /// Re-read the stored settings and rescan immediately.
    pub async fn reload_config(&self) -> ScanReport {
        let settings = self.store.load().await;
        self.state.set_settings(settings).await;
        let report = self.scan().await;
        info!("config reloaded");
        report
    }

    /// Adopt settings edited in the host UI, persist them and rescan.
    pub async fn apply_settings(&self, value: &serde_json::Value) -> ScanReport {
        let settings = Settings::from_host_value(value);
        info!("settings changed via UI {:?}", settings);
        self.state.set_settings(settings).await;

        // The host already holds UI edits; only the graph copy needs writing.
        if self.store.backend() == ConfigBackend::GraphPage {
            self.store.save(&settings).await;
        }
        self.scan().await
    }

    pub async fn handle_event(&self, event: HostEvent) {
        match event {
            HostEvent::DomMutated => self.watcher.mutations(),
            HostEvent::PageLoaded => self.watcher.page_loaded(),
            HostEvent::SettingsChanged(value) => {
                self.apply_settings(&value).await;
            }
            HostEvent::GraphChanged => {
                info!("graph changed, reloading config");
                self.reload_config().await;
            }
            HostEvent::Command(key) if key == RELOAD_COMMAND => {
                self.reload_config().await;
            }
            HostEvent::Command(key) => warn!("unknown command {:?}", key),
        }
    }

    /// Handle host events until the host closes the channel.
    pub async fn serve(self, mut events: UnboundedReceiver<HostEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        info!("host event channel closed");
    }
}
