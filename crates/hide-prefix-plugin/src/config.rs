use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::schedule::ScanSchedule;

/// Where the four surface toggles are persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfigBackend {
    /// Only the host's plugin settings facility
    HostSettings,
    /// A JSON block on a reserved page of the graph, mirrored into the host
    /// settings UI
    GraphPage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Quiet period after the last DOM mutation before a scan runs
    pub debounce_ms: u64,

    /// Scans queued when the plugin starts
    pub startup_schedule: ScanSchedule,

    /// Scans queued on every page navigation
    pub page_loaded_schedule: ScanSchedule,

    pub config_backend: ConfigBackend,

    /// Page holding the stored settings for [`ConfigBackend::GraphPage`]
    pub config_page: String,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            debounce_ms: 50,
            startup_schedule: ScanSchedule::startup(),
            page_loaded_schedule: ScanSchedule::page_loaded(),
            config_backend: ConfigBackend::GraphPage,
            config_page: "logseq-customizer".to_string(),
        }
    }
}

impl PluginOptions {
    /// Options from a host-provided JSON object; missing fields keep defaults
    pub fn from_json(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_partial_options() {
        let options = PluginOptions::from_json(json!({
            "debounceMs": 10,
            "configBackend": "hostSettings",
        }))
        .unwrap();
        assert_eq!(options.debounce(), Duration::from_millis(10));
        assert_eq!(options.config_backend, ConfigBackend::HostSettings);
        assert_eq!(options.config_page, "logseq-customizer");
        assert_eq!(options.startup_schedule, ScanSchedule::startup());
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        assert!(PluginOptions::from_json(json!({ "configBackend": "cloud" })).is_err());
    }
}
