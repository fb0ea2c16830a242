use std::collections::HashMap;
use std::sync::{Arc, MutexGuard, PoisonError};

use async_trait::async_trait;
use hide_prefix_core::{MemoryDocument, SettingDescriptor};
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{BlockEntity, CommandDescriptor, GraphApi, HostApp, HostError, PageEntity, Result};

#[derive(Debug, Clone)]
struct MemoryPage {
    entity: PageEntity,
    blocks: Vec<BlockEntity>,
}

#[derive(Debug, Default)]
struct Inner {
    current_page: Option<String>,
    pages: HashMap<String, MemoryPage>,
    settings: serde_json::Value,
    settings_updates: usize,
    schema: Vec<SettingDescriptor>,
    commands: Vec<CommandDescriptor>,
    fail_queries: bool,
    fail_writes: bool,
}

/// In-process host backed by a [`MemoryDocument`] and a page map.
///
/// Page names are matched case-insensitively, like the host's normalized
/// page names. Query and write failures can be switched on to exercise
/// error paths.
#[derive(Debug, Default)]
pub struct MemoryHost {
    document: Arc<Mutex<MemoryDocument>>,
    inner: std::sync::Mutex<Inner>,
}

fn normalize(name: &str) -> String {
    name.to_lowercase()
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: MemoryDocument) -> Self {
        Self {
            document: Arc::new(Mutex::new(document)),
            inner: Default::default(),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn ensure_page(inner: &mut Inner, name: &str) -> PageEntity {
        inner
            .pages
            .entry(normalize(name))
            .or_insert_with(|| MemoryPage {
                entity: PageEntity {
                    uuid: Uuid::new_v4(),
                    name: normalize(name),
                    original_name: Some(name.to_string()),
                },
                blocks: Vec::new(),
            })
            .entity
            .clone()
    }

    /// Create (if needed) and navigate to the page named `name`.
    pub fn navigate(&self, name: &str) -> PageEntity {
        let mut inner = self.inner();
        let page = Self::ensure_page(&mut inner, name);
        inner.current_page = Some(page.name.clone());
        page
    }

    /// Create a page holding the given blocks, replacing any existing blocks.
    pub fn insert_page(&self, name: &str, blocks: &[&str]) -> PageEntity {
        let mut inner = self.inner();
        let page = Self::ensure_page(&mut inner, name);
        if let Some(stored) = inner.pages.get_mut(&page.name) {
            stored.blocks = blocks
                .iter()
                .map(|content| BlockEntity {
                    uuid: Uuid::new_v4(),
                    content: content.to_string(),
                })
                .collect();
        }
        page
    }

    /// Contents of the page's blocks, `None` when the page does not exist
    pub fn page_contents(&self, name: &str) -> Option<Vec<String>> {
        self.inner()
            .pages
            .get(&normalize(name))
            .map(|p| p.blocks.iter().map(|b| b.content.clone()).collect())
    }

    pub fn set_settings(&self, value: serde_json::Value) {
        self.inner().settings = value;
    }

    pub fn settings_value(&self) -> serde_json::Value {
        self.inner().settings.clone()
    }

    /// How many times the plugin pushed settings into the host UI
    pub fn settings_updates(&self) -> usize {
        self.inner().settings_updates
    }

    pub fn schema(&self) -> Vec<SettingDescriptor> {
        self.inner().schema.clone()
    }

    pub fn commands(&self) -> Vec<CommandDescriptor> {
        self.inner().commands.clone()
    }

    pub fn fail_queries(&self, fail: bool) {
        self.inner().fail_queries = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.inner().fail_writes = fail;
    }

    fn check_query(inner: &Inner) -> Result<()> {
        if inner.fail_queries {
            return Err(HostError::Query("query rejected by host".to_string()));
        }
        Ok(())
    }

    fn check_write(inner: &Inner) -> Result<()> {
        if inner.fail_writes {
            return Err(HostError::Write("write rejected by host".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl HostApp for MemoryHost {
    type Doc = MemoryDocument;

    fn document(&self) -> Arc<Mutex<MemoryDocument>> {
        self.document.clone()
    }

    async fn current_page(&self) -> Result<Option<PageEntity>> {
        let inner = self.inner();
        Self::check_query(&inner)?;
        Ok(inner
            .current_page
            .as_ref()
            .and_then(|name| inner.pages.get(name))
            .map(|p| p.entity.clone()))
    }

    async fn use_settings_schema(&self, schema: Vec<SettingDescriptor>) -> Result<()> {
        self.inner().schema = schema;
        Ok(())
    }

    async fn settings(&self) -> Result<serde_json::Value> {
        let inner = self.inner();
        Self::check_query(&inner)?;
        Ok(inner.settings.clone())
    }

    async fn update_settings(&self, value: serde_json::Value) -> Result<()> {
        let mut inner = self.inner();
        Self::check_write(&inner)?;
        match (&mut inner.settings, value) {
            (serde_json::Value::Object(current), serde_json::Value::Object(update)) => {
                current.extend(update);
            }
            (slot, value) => *slot = value,
        }
        inner.settings_updates += 1;
        Ok(())
    }

    async fn register_command(&self, command: CommandDescriptor) -> Result<()> {
        let mut inner = self.inner();
        inner.commands.retain(|c| c.key != command.key);
        inner.commands.push(command);
        Ok(())
    }
}

#[async_trait]
impl GraphApi for MemoryHost {
    async fn page_blocks(&self, page: &str) -> Result<Vec<BlockEntity>> {
        let inner = self.inner();
        Self::check_query(&inner)?;
        Ok(inner
            .pages
            .get(&normalize(page))
            .map(|p| p.blocks.clone())
            .unwrap_or_default())
    }

    async fn update_block(&self, block: Uuid, content: &str) -> Result<()> {
        let mut inner = self.inner();
        Self::check_write(&inner)?;
        let target = inner
            .pages
            .values_mut()
            .flat_map(|p| p.blocks.iter_mut())
            .find(|b| b.uuid == block)
            .ok_or_else(|| HostError::NotFound(format!("block {}", block)))?;
        target.content = content.to_string();
        Ok(())
    }

    async fn create_page(&self, name: &str) -> Result<PageEntity> {
        let mut inner = self.inner();
        Self::check_write(&inner)?;
        Ok(Self::ensure_page(&mut inner, name))
    }

    async fn append_block_in_page(&self, page: Uuid, content: &str) -> Result<BlockEntity> {
        let mut inner = self.inner();
        Self::check_write(&inner)?;
        let stored = inner
            .pages
            .values_mut()
            .find(|p| p.entity.uuid == page)
            .ok_or_else(|| HostError::NotFound(format!("page {}", page)))?;
        let block = BlockEntity {
            uuid: Uuid::new_v4(),
            content: content.to_string(),
        };
        stored.blocks.push(block.clone());
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pages_are_case_insensitive() {
        let host = MemoryHost::new();
        let page = host.insert_page("Logseq-Customizer", &["first"]);
        assert_eq!(page.name, "logseq-customizer");

        let blocks = host.page_blocks("logseq-customizer").await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(host.create_page("LOGSEQ-customizer").await.unwrap().uuid, page.uuid);
    }

    #[tokio::test]
    async fn test_missing_page_has_no_blocks() {
        let host = MemoryHost::new();
        assert!(host.page_blocks("nowhere").await.unwrap().is_empty());
        assert!(host.page_contents("nowhere").is_none());
    }

    #[tokio::test]
    async fn test_failures_can_be_injected() {
        let host = MemoryHost::new();
        host.fail_queries(true);
        assert!(matches!(host.page_blocks("x").await, Err(HostError::Query(_))));

        host.fail_writes(true);
        assert!(matches!(host.create_page("x").await, Err(HostError::Write(_))));
        assert!(matches!(
            host.update_settings(serde_json::json!({})).await,
            Err(HostError::Write(_))
        ));
    }

    #[tokio::test]
    async fn test_current_page_follows_navigation() {
        let host = MemoryHost::new();
        assert!(host.current_page().await.unwrap().is_none());

        host.navigate("Projects/Rust");
        let page = host.current_page().await.unwrap().unwrap();
        assert_eq!(page.full_name(), "Projects/Rust");
        assert_eq!(page.name, "projects/rust");
    }
}
