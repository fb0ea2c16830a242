use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use log::debug;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio::time::{sleep_until, Instant};

use crate::driver::ScanDriver;
use crate::host::HostApp;
use crate::schedule::ScanSchedule;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchSignal {
    /// The document changed; restarts the quiet timer
    Mutations,
    /// A page was opened; queues the page-loaded schedule
    PageLoaded,
    /// Queue an arbitrary schedule
    Schedule(ScanSchedule),
}

/// Sending side of the watcher. Dropping every handle stops the watcher.
#[derive(Debug, Clone)]
pub struct WatcherHandle {
    sender: UnboundedSender<WatchSignal>,
}

impl WatcherHandle {
    fn send(&self, signal: WatchSignal) {
        if self.sender.send(signal).is_err() {
            debug!("watcher stopped, signal dropped");
        }
    }

    pub fn mutations(&self) {
        self.send(WatchSignal::Mutations);
    }

    pub fn page_loaded(&self) {
        self.send(WatchSignal::PageLoaded);
    }

    pub fn schedule(&self, schedule: ScanSchedule) {
        if !schedule.is_empty() {
            self.send(WatchSignal::Schedule(schedule));
        }
    }
}

/// Turns document mutations and timed schedules into scans.
///
/// Mutation signals are debounced: each one pushes the deadline out by the
/// quiet period, so a burst of rendering yields a single scan. Scheduled
/// scans are never cancelled. Deadlines that come due together share one
/// scan.
pub struct Watcher<H> {
    driver: ScanDriver<H>,
    receiver: UnboundedReceiver<WatchSignal>,
    debounce: Duration,
    page_loaded: ScanSchedule,
}

impl<H: HostApp> Watcher<H> {
    pub fn new(
        driver: ScanDriver<H>,
        debounce: Duration,
        page_loaded: ScanSchedule,
    ) -> (Self, WatcherHandle) {
        let (sender, receiver) = unbounded_channel();
        let watcher = Self {
            driver,
            receiver,
            debounce,
            page_loaded,
        };
        (watcher, WatcherHandle { sender })
    }

    pub async fn start(mut self) {
        debug!("watcher started");

        let mut quiet_until: Option<Instant> = None;
        let mut scheduled: BinaryHeap<Reverse<Instant>> = BinaryHeap::new();

        loop {
            let next = match (quiet_until, scheduled.peek()) {
                (Some(a), Some(Reverse(b))) => Some(a.min(*b)),
                (a, b) => a.or(b.map(|r| r.0)),
            };

            tokio::select! {
                signal = self.receiver.recv() => {
                    let now = Instant::now();
                    match signal {
                        Some(WatchSignal::Mutations) => quiet_until = Some(now + self.debounce),
                        Some(WatchSignal::PageLoaded) => {
                            scheduled.extend(self.page_loaded.deadlines(now).map(Reverse));
                        }
                        Some(WatchSignal::Schedule(schedule)) => {
                            scheduled.extend(schedule.deadlines(now).map(Reverse));
                        }
                        None => break,
                    }
                }
                _ = sleep_until(next.unwrap_or_else(Instant::now)), if next.is_some() => {
                    let now = Instant::now();
                    if quiet_until.map_or(false, |t| t <= now) {
                        quiet_until = None;
                    }
                    while scheduled.peek().map_or(false, |r| r.0 <= now) {
                        scheduled.pop();
                    }
                    self.driver.run().await;
                }
            }
        }

        debug!("watcher stopped");
    }
}
