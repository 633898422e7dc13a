use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::StoreError;

/// Default grocery list document name
pub const DEFAULT_DOCUMENT: &str = "Available Grocery Items";

/// One entry of the grocery list document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroceryItem {
    pub item_name: String,
    pub quantity: f64,
    pub expiry_date: DateTime<Utc>,
}

/// A named grocery list document
///
/// A missing document or a missing `items` field both read as an empty list.
/// Appends never deduplicate.
#[async_trait::async_trait]
pub trait GroceryStore: Send + Sync {
    async fn fetch_items(&self) -> Result<Vec<GroceryItem>, StoreError>;

    async fn append_item(&self, item: GroceryItem) -> Result<(), StoreError>;
}

/// In-process grocery list
#[derive(Debug, Default)]
pub struct MemoryGroceryStore {
    items: Mutex<Vec<GroceryItem>>,
}

impl MemoryGroceryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<GroceryItem>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

#[async_trait::async_trait]
impl GroceryStore for MemoryGroceryStore {
    async fn fetch_items(&self) -> Result<Vec<GroceryItem>, StoreError> {
        Ok(self.items.lock().await.clone())
    }

    async fn append_item(&self, item: GroceryItem) -> Result<(), StoreError> {
        self.items.lock().await.push(item);
        Ok(())
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct GroceryDocument {
    #[serde(default)]
    items: Option<Vec<GroceryItem>>,
}

/// Grocery list persisted as one JSON document on disk
///
/// Stored at `<dir>/<document>.json` as `{"items": [...]}`.
#[derive(Debug)]
pub struct FileGroceryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileGroceryStore {
    pub fn new(dir: impl AsRef<Path>, document: &str) -> Self {
        let path = dir.as_ref().join(format!("{}.json", document));
        info!("Grocery list document: {}", path.display());

        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_document(&self) -> Result<GroceryDocument, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Ok(GroceryDocument::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No grocery document at {}", self.path.display());
                Ok(GroceryDocument::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_document(&self, document: &GroceryDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let bytes = serde_json::to_vec_pretty(document)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl GroceryStore for FileGroceryStore {
    async fn fetch_items(&self) -> Result<Vec<GroceryItem>, StoreError> {
        Ok(self.read_document().await?.items.unwrap_or_default())
    }

    async fn append_item(&self, item: GroceryItem) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut document = self.read_document().await?;
        document.items.get_or_insert_with(Vec::new).push(item);
        self.write_document(&document).await
    }
}
