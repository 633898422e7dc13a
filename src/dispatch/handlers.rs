// One handler per intent. Every handler resolves to exactly one
// user-facing response; collaborator failures become fixed apologies here.

use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, warn};

use crate::collaborators::{Collaborators, GroceryItem};
use crate::error::CollaboratorError;

/// Fixed responses
pub mod responses {
    pub const CLOSING: &str = "Thank you! If you need anything else, just ask. Have a great day!";
    pub const ADD_ITEMS_PROMPT: &str = "Sure, start telling me the items you'd like to add.";
    pub const EXTRACTION_INCOMPLETE: &str =
        "Sorry, I couldn't understand the item and quantity. Please try again.";
    pub const EXTRACTION_FAILED: &str = "Sorry, there was an error processing your request.";
    pub const ADD_FAILED: &str = "Sorry, I couldn't add the item to the list.";
    pub const WEATHER_FAILED: &str = "Sorry, I couldn't get the weather information.";
    pub const LIST_EMPTY: &str = "Your grocery list is currently empty.";
    pub const LIST_FAILED: &str = "Sorry, I couldn't fetch the items in your grocery list.";
    pub const RECIPE_NO_ITEMS: &str = "Sorry, I couldn't find any available items to suggest a recipe.";
    pub const RECIPE_NOT_FOUND: &str = "Sorry, I couldn't find a recipe.";
    pub const RECIPE_FAILED: &str = "Sorry, there was an error suggesting a recipe.";
    pub const GENERAL_FAILED: &str = "Sorry, I couldn't process your request.";
}

/// How long a newly added item keeps
pub const SHELF_LIFE_DAYS: i64 = 7;

/// Expiry date for an item added at `now`
pub fn expiry_for(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(SHELF_LIFE_DAYS)
}

/// Result of an add-item command
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    /// The item was appended to the store
    Added(GroceryItem),
    /// Extraction answered without a usable item name or quantity
    Incomplete,
    /// The extraction collaborator failed
    ExtractionFailed,
    /// The store rejected the append
    StoreFailed,
}

impl AddOutcome {
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added(_))
    }

    pub fn response(&self) -> String {
        match self {
            AddOutcome::Added(item) => format!(
                "Grocery list updated. You now have: {} ({}). Expiry date: {}. \
                 Would you like to add anything else to the list?",
                item.item_name,
                item.quantity,
                item.expiry_date.format("%-m/%-d/%Y")
            ),
            AddOutcome::Incomplete => responses::EXTRACTION_INCOMPLETE.to_string(),
            AddOutcome::ExtractionFailed => responses::EXTRACTION_FAILED.to_string(),
            AddOutcome::StoreFailed => responses::ADD_FAILED.to_string(),
        }
    }
}

pub async fn add_item(collaborators: &Collaborators, text: &str, now: DateTime<Utc>) -> AddOutcome {
    let extracted = match collaborators.extractor.extract(text).await {
        Ok(extracted) => extracted,
        Err(e) => {
            error!("Item extraction failed: {}", e);
            return AddOutcome::ExtractionFailed;
        }
    };

    let Some((item_name, quantity)) = extracted.complete() else {
        warn!("Incomplete extraction for '{}': {:?}", text, extracted);
        return AddOutcome::Incomplete;
    };

    let item = GroceryItem {
        item_name,
        quantity,
        expiry_date: expiry_for(now),
    };

    match collaborators.grocery.append_item(item.clone()).await {
        Ok(()) => {
            info!("Added {} ({}) to the grocery list", item.item_name, item.quantity);
            AddOutcome::Added(item)
        }
        Err(e) => {
            error!("Failed to update grocery list: {}", e);
            AddOutcome::StoreFailed
        }
    }
}

pub async fn list_items(collaborators: &Collaborators) -> String {
    let items = match collaborators.grocery.fetch_items().await {
        Ok(items) => items,
        Err(e) => {
            error!("Failed to fetch grocery list: {}", e);
            return responses::LIST_FAILED.to_string();
        }
    };

    if items.is_empty() {
        return responses::LIST_EMPTY.to_string();
    }

    let listing = items
        .iter()
        .map(|item| format!("{} {}", item.quantity, item.item_name))
        .collect::<Vec<_>>()
        .join(", ");

    format!("You have the following items in your pantry: {}.", listing)
}

pub async fn suggest_recipe(collaborators: &Collaborators) -> String {
    let items = match collaborators.grocery.fetch_items().await {
        Ok(items) => items,
        Err(e) => {
            error!("Failed to read grocery list for recipe: {}", e);
            return responses::RECIPE_FAILED.to_string();
        }
    };

    let available = items
        .iter()
        .map(|item| item.item_name.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    if available.is_empty() {
        warn!("No available items to suggest a recipe from");
        return responses::RECIPE_NO_ITEMS.to_string();
    }

    match collaborators.recipes.suggest(&available).await {
        Ok(recipe) => recipe,
        Err(CollaboratorError::Rejected { status }) => {
            error!("Recipe request rejected with status {}", status);
            responses::RECIPE_NOT_FOUND.to_string()
        }
        Err(e) => {
            error!("Recipe request failed: {}", e);
            responses::RECIPE_FAILED.to_string()
        }
    }
}

pub async fn check_weather(collaborators: &Collaborators) -> String {
    let location = collaborators.location;

    match collaborators
        .weather
        .current(location.latitude, location.longitude)
        .await
    {
        Ok(weather) => format!("The current weather is: {}.", weather),
        Err(e) => {
            error!("Weather request failed: {}", e);
            responses::WEATHER_FAILED.to_string()
        }
    }
}

pub fn play_song(song: &str) -> String {
    format!("Playing {}.", song)
}

pub async fn converse(collaborators: &Collaborators, text: &str) -> String {
    match collaborators.conversation.converse(text).await {
        Ok(reply) => reply,
        Err(e) => {
            error!("Conversation request failed: {}", e);
            responses::GENERAL_FAILED.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiry_rolls_over_year() {
        let now = Utc.with_ymd_and_hms(2024, 12, 28, 22, 15, 0).unwrap();
        let expiry = expiry_for(now);
        assert_eq!(expiry, Utc.with_ymd_and_hms(2025, 1, 4, 22, 15, 0).unwrap());
    }

    #[test]
    fn test_expiry_rolls_over_leap_february() {
        let now = Utc.with_ymd_and_hms(2024, 2, 26, 8, 0, 0).unwrap();
        assert_eq!(
            expiry_for(now),
            Utc.with_ymd_and_hms(2024, 3, 4, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_added_response_formats_quantity_and_date() {
        let item = GroceryItem {
            item_name: "apples".to_string(),
            quantity: 3.0,
            expiry_date: Utc.with_ymd_and_hms(2025, 1, 4, 0, 0, 0).unwrap(),
        };
        assert_eq!(
            AddOutcome::Added(item).response(),
            "Grocery list updated. You now have: apples (3). Expiry date: 1/4/2025. \
             Would you like to add anything else to the list?"
        );
    }

    #[test]
    fn test_fractional_quantity_kept() {
        let item = GroceryItem {
            item_name: "flour".to_string(),
            quantity: 1.5,
            expiry_date: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        };
        assert!(AddOutcome::Added(item).response().contains("flour (1.5)"));
    }
}
