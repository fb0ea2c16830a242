use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

/// Fixed list of delays after which a scan runs.
///
/// Serialized as a plain array of milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanSchedule {
    offsets_ms: Vec<u64>,
}

impl ScanSchedule {
    pub fn from_millis(offsets_ms: impl IntoIterator<Item = u64>) -> Self {
        let mut offsets_ms: Vec<u64> = offsets_ms.into_iter().collect();
        offsets_ms.sort_unstable();
        Self { offsets_ms }
    }

    /// Scans after plugin start: 300 ms, then every 700 ms up to 4.9 s.
    ///
    /// Catches host renders that finish without observable mutations.
    pub fn startup() -> Self {
        Self::from_millis(std::iter::once(300).chain((1..=7).map(|i| i * 700)))
    }

    /// Scans after a page navigation: 200 ms and 600 ms.
    pub fn page_loaded() -> Self {
        Self::from_millis([200, 600])
    }

    pub fn offsets(&self) -> impl Iterator<Item = Duration> + '_ {
        self.offsets_ms.iter().map(|ms| Duration::from_millis(*ms))
    }

    pub fn deadlines(&self, from: Instant) -> impl Iterator<Item = Instant> + '_ {
        self.offsets().map(move |offset| from + offset)
    }

    pub fn is_empty(&self) -> bool {
        self.offsets_ms.is_empty()
    }

    pub fn len(&self) -> usize {
        self.offsets_ms.len()
    }
}
