use std::sync::Arc;

use hide_prefix_core::{scan_inline, scan_title, ScanReport, Settings};
use log::{debug, warn};

use crate::host::HostApp;
use crate::state::SharedState;

/// Runs the scan passes against the host's live document.
pub struct ScanDriver<H> {
    host: Arc<H>,
    state: SharedState,
}

impl<H> Clone for ScanDriver<H> {
    fn clone(&self) -> Self {
        Self {
            host: self.host.clone(),
            state: self.state.clone(),
        }
    }
}

impl<H: HostApp> ScanDriver<H> {
    pub fn new(host: Arc<H>, state: SharedState) -> Self {
        Self { host, state }
    }

    /// Inline and sidebar passes, then the page title pass.
    pub async fn run(&self) -> ScanReport {
        let settings = self.state.settings().await;

        let mut report = self.run_inline(&settings).await;
        report += self.run_title(&settings).await;

        let seq = self.state.record_scan();
        if report.rewritten > 0 {
            debug!("scan #{}: {:?}", seq, report);
        }
        report
    }

    async fn run_inline(&self, settings: &Settings) -> ScanReport {
        let document = self.host.document();
        let mut doc = document.lock().await;
        scan_inline(&mut *doc, settings)
    }

    async fn run_title(&self, settings: &Settings) -> ScanReport {
        if !settings.page_title {
            return ScanReport::default();
        }

        // Looked up before locking the document; the lookup may suspend.
        let page = match self.host.current_page().await {
            Ok(Some(page)) => page,
            Ok(None) => return ScanReport::default(),
            Err(e) => {
                warn!("current page lookup failed: {}", e);
                return ScanReport::default();
            }
        };

        let document = self.host.document();
        let mut doc = document.lock().await;
        scan_title(&mut *doc, settings, Some(page.full_name()))
    }
}
