//! Boundary to the host note-taking application.
//!
//! Everything the plugin needs from the host goes through [`HostApp`] and
//! [`GraphApi`]. The host owns the rendered document and the graph; the
//! plugin only reads and writes through these calls.

use std::sync::Arc;

use async_trait::async_trait;
use hide_prefix_core::{Document, SettingDescriptor};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

pub mod memory;

pub use memory::MemoryHost;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("query failed: {0}")]
    Query(String),

    #[error("write failed: {0}")]
    Write(String),

    #[error("{0} not found")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, HostError>;

/// Page as reported by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntity {
    pub uuid: Uuid,
    /// Normalized (lower-cased) name
    pub name: String,
    /// Name as typed by the user, keeps the original hierarchy and casing
    #[serde(rename = "original-name", default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
}

impl PageEntity {
    pub fn full_name(&self) -> &str {
        self.original_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockEntity {
    pub uuid: Uuid,
    pub content: String,
}

/// A user-invokable action registered in the host's command palette
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandDescriptor {
    pub key: String,
    pub label: String,
}

/// Notifications delivered by the host
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// Child-list changes somewhere in the document
    DomMutated,
    /// The user navigated to a page
    PageLoaded,
    /// The user edited the plugin settings; carries the new settings object
    SettingsChanged(serde_json::Value),
    /// Another graph was opened
    GraphChanged,
    /// A registered command was invoked
    Command(String),
}

/// Application-level host services
#[async_trait]
pub trait HostApp: Send + Sync + 'static {
    type Doc: Document + Send + 'static;

    /// The live rendered document
    fn document(&self) -> Arc<Mutex<Self::Doc>>;

    async fn current_page(&self) -> Result<Option<PageEntity>>;

    async fn use_settings_schema(&self, schema: Vec<SettingDescriptor>) -> Result<()>;

    /// Current plugin settings object as stored by the host
    async fn settings(&self) -> Result<serde_json::Value>;

    /// Push a settings object into the host's settings UI
    async fn update_settings(&self, value: serde_json::Value) -> Result<()>;

    async fn register_command(&self, command: CommandDescriptor) -> Result<()>;
}

/// Structured access to pages and blocks of the current graph
#[async_trait]
pub trait GraphApi: Send + Sync {
    /// Blocks of the page named `page` in page order; empty when the page
    /// does not exist
    async fn page_blocks(&self, page: &str) -> Result<Vec<BlockEntity>>;

    async fn update_block(&self, block: Uuid, content: &str) -> Result<()>;

    /// Create the page, or return it if it already exists
    async fn create_page(&self, name: &str) -> Result<PageEntity>;

    async fn append_block_in_page(&self, page: Uuid, content: &str) -> Result<BlockEntity>;
}

/// Full host surface the plugin runs against
pub trait Host: HostApp + GraphApi {}

impl<T: HostApp + GraphApi> Host for T {}
