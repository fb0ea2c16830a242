use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use hide_prefix_core::Settings;
use tokio::sync::RwLock;

/// State shared between the plugin controller and the watcher task
#[derive(Clone, Default)]
pub struct SharedState {
    /// Settings read by every scan; written only by the controller
    pub settings: Arc<RwLock<Settings>>,
    scans: Arc<AtomicUsize>,
}

impl SharedState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: Arc::new(RwLock::new(settings)),
            scans: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn settings(&self) -> Settings {
        *self.settings.read().await
    }

    pub async fn set_settings(&self, settings: Settings) {
        *self.settings.write().await = settings;
    }

    /// Count a completed scan and return its sequence number
    pub(crate) fn record_scan(&self) -> usize {
        self.scans.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Number of scans completed so far
    pub fn scan_count(&self) -> usize {
        self.scans.load(Ordering::Relaxed)
    }
}
