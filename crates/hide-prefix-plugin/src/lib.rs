//! Hide Prefix Plugin Library
//!
//! Host adapter: wires the core scan passes to the host application's
//! document, settings, graph and lifecycle events.

pub mod config;
pub mod driver;
pub mod error;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod schedule;
pub mod state;
pub mod store;
pub mod watcher;


pub use config::{ConfigBackend, PluginOptions};
pub use host::{GraphApi, Host, HostApp, HostEvent, MemoryHost};
pub use plugin::{Plugin, RELOAD_COMMAND};
pub use schedule::ScanSchedule;
pub use store::ConfigStore;
