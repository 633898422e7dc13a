//! External collaborators
//!
//! The dispatcher only sees the traits in `contracts`; the HTTP client and
//! the grocery stores are the production implementations.

pub mod client;
pub mod contracts;
pub mod grocery;
pub mod messages;

pub use client::HttpCollaborators;
pub use contracts::{
    Collaborators, ConversationClient, ExtractedItem, ItemExtractor, Location, RecipeClient, WeatherClient,
};
pub use grocery::{FileGroceryStore, GroceryItem, GroceryStore, MemoryGroceryStore, DEFAULT_DOCUMENT};
