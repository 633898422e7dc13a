use serde::{Deserialize, Serialize};

/// Category of an utterance, without payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentLabel {
    Closing,
    SuggestRecipe,
    AddItemsPrompt,
    AddItem,
    CheckWeather,
    PlaySong,
    ListItems,
    General,
}

/// A classified utterance plus whatever its handler needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// The user is ending the conversation
    Closing,
    /// Suggest a recipe from the stored grocery items
    SuggestRecipe,
    /// The user announced they want to add items but has not named one yet
    AddItemsPrompt,
    /// Add one item; the text is resolved to item/quantity by extraction
    AddItem { text: String },
    /// Report the current weather
    CheckWeather,
    /// Play a song; `song` is the utterance minus the trigger phrase
    PlaySong { song: String },
    /// Read back the stored grocery items
    ListItems,
    /// Anything else, forwarded to the conversation model
    General { text: String },
}

impl Intent {
    pub fn label(&self) -> IntentLabel {
        match self {
            Intent::Closing => IntentLabel::Closing,
            Intent::SuggestRecipe => IntentLabel::SuggestRecipe,
            Intent::AddItemsPrompt => IntentLabel::AddItemsPrompt,
            Intent::AddItem { .. } => IntentLabel::AddItem,
            Intent::CheckWeather => IntentLabel::CheckWeather,
            Intent::PlaySong { .. } => IntentLabel::PlaySong,
            Intent::ListItems => IntentLabel::ListItems,
            Intent::General { .. } => IntentLabel::General,
        }
    }
}
