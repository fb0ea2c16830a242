//! Hide Prefix Core Library
//!
//! Shortens hierarchical page names (`Category/Sub/Page` -> `Page`) in a
//! rendered document. No IO dependencies, pure logic only.
//!

pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod name;
pub mod scan;
pub mod settings;
pub mod stripper;

#[cfg(test)]
mod tests;

pub use config::{from_fenced_json, to_fenced_json};
pub use dom::{Document, MemoryDocument, NodeId, Selector};
pub use error::ConfigError;
pub use model::{ScanReport, StripOutcome};
pub use name::{shorten_label, PrefixedName};
pub use scan::{scan_inline, scan_sidebar, scan_title};
pub use settings::{settings_schema, SettingDescriptor, Settings, Surface};
pub use stripper::hide_prefix;
