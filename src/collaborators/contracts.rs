use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::grocery::GroceryStore;
use crate::error::CollaboratorError;

/// Item and quantity pulled out of an utterance
///
/// Either field may be missing; that is an incomplete extraction, not a
/// transport failure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedItem {
    pub item_name: Option<String>,
    pub quantity: Option<f64>,
}

impl ExtractedItem {
    pub fn new(item_name: impl Into<String>, quantity: f64) -> Self {
        Self {
            item_name: Some(item_name.into()),
            quantity: Some(quantity),
        }
    }

    /// Name and quantity when both are usable (non-empty name, positive quantity)
    pub fn complete(&self) -> Option<(String, f64)> {
        let name = self.item_name.as_deref().map(str::trim).filter(|n| !n.is_empty())?;
        let quantity = self.quantity.filter(|q| q.is_finite() && *q > 0.0)?;
        Some((name.to_string(), quantity))
    }
}

/// Where to ask for the weather
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// General-conversation language model
#[async_trait::async_trait]
pub trait ConversationClient: Send + Sync {
    async fn converse(&self, command: &str) -> Result<String, CollaboratorError>;
}

/// Resolves an add command to item name and quantity
#[async_trait::async_trait]
pub trait ItemExtractor: Send + Sync {
    async fn extract(&self, prompt: &str) -> Result<ExtractedItem, CollaboratorError>;
}

/// Suggests a recipe from comma-joined item names
#[async_trait::async_trait]
pub trait RecipeClient: Send + Sync {
    async fn suggest(&self, available_items: &str) -> Result<String, CollaboratorError>;
}

/// Describes the current weather at a position
#[async_trait::async_trait]
pub trait WeatherClient: Send + Sync {
    async fn current(&self, latitude: f64, longitude: f64) -> Result<String, CollaboratorError>;
}

/// Every external collaborator the dispatcher talks to
#[derive(Clone)]
pub struct Collaborators {
    pub conversation: Arc<dyn ConversationClient>,
    pub extractor: Arc<dyn ItemExtractor>,
    pub recipes: Arc<dyn RecipeClient>,
    pub weather: Arc<dyn WeatherClient>,
    pub grocery: Arc<dyn GroceryStore>,
    pub location: Location,
}
