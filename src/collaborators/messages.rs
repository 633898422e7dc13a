use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::contracts::ExtractedItem;

/// Request to the general-conversation endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationRequest {
    pub command: String,
}

/// Reply from the general-conversation endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ConversationResponse {
    pub response: String,
}

/// Request to the item-extraction endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractionRequest {
    pub prompt: String,
}

/// Reply from the item-extraction endpoint
///
/// Both fields may be absent or null; the model is also known to send the
/// quantity as a string.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub quantity: Option<Value>,
}

impl From<ExtractionResponse> for ExtractedItem {
    fn from(response: ExtractionResponse) -> Self {
        let quantity = match response.quantity {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        ExtractedItem {
            item_name: response.item_name,
            quantity,
        }
    }
}

/// Request to the recipe endpoint
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRequest {
    /// Comma-joined item names
    pub available_items: String,
}

/// Reply from the recipe endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeResponse {
    pub recipe: String,
}

/// Reply from the weather endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub weather: String,
}
