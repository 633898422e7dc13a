use std::sync::OnceLock;

use super::types::{Intent, IntentLabel};

/// Phrases that end the conversation
pub const CLOSING_PHRASES: &[&str] = &[
    "no thank you",
    "thank you",
    "that's all",
    "goodbye",
    "i'm done",
    "nothing else",
    "stop",
    "cancel",
];

/// Whole utterances that never count as an add command
const BARE_CANCEL_WORDS: &[&str] = &["no", "cancel", "stop"];

const RECIPE_TRIGGER: &str = "suggest a recipe";
const PLAY_SONG_TRIGGER: &str = "play a song";

/// Predicate over lowercased utterance text
pub type Predicate = fn(&str) -> bool;

/// One classification rule: if `matches` holds, the utterance is `label`
#[derive(Clone, Copy)]
pub struct Rule {
    pub label: IntentLabel,
    pub matches: Predicate,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("label", &self.label).finish()
    }
}

/// Ordered keyword classifier
///
/// Rules are evaluated top-down and the first match wins; categories
/// overlap, so the order is the precedence. Text that matches no rule is
/// [`IntentLabel::General`]. Matching is plain substring search over text
/// the caller has already lowercased.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<Rule>,
}

impl Classifier {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Labels in evaluation order
    pub fn order(&self) -> Vec<IntentLabel> {
        self.rules.iter().map(|rule| rule.label).collect()
    }

    /// First matching label for already lowercased text
    pub fn label_of(&self, text: &str) -> IntentLabel {
        self.rules
            .iter()
            .find(|rule| (rule.matches)(text))
            .map(|rule| rule.label)
            .unwrap_or(IntentLabel::General)
    }

    /// Classify already lowercased text; payloads carry that same text
    pub fn classify(&self, text: &str) -> Intent {
        intent_for(self.label_of(text), text, text)
    }

    /// Classify an utterance as spoken
    ///
    /// Rules match the lowercased text, while the `AddItem` and `General`
    /// payloads keep the utterance's own casing.
    pub fn classify_utterance(&self, raw: &str) -> Intent {
        let raw = raw.trim();
        let lowered = raw.to_lowercase();
        intent_for(self.label_of(&lowered), &lowered, raw)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(vec![
            Rule {
                label: IntentLabel::Closing,
                matches: is_closing,
            },
            Rule {
                label: IntentLabel::SuggestRecipe,
                matches: |t| t.contains(RECIPE_TRIGGER),
            },
            Rule {
                label: IntentLabel::AddItemsPrompt,
                matches: |t| {
                    t.contains("add")
                        && (t.contains("pantry") || t.contains("grocery list") || t.contains("items"))
                },
            },
            Rule {
                label: IntentLabel::AddItem,
                matches: |t| t.contains("add") && !is_bare_cancel(t),
            },
            Rule {
                label: IntentLabel::CheckWeather,
                matches: |t| t.contains("weather"),
            },
            Rule {
                label: IntentLabel::PlaySong,
                matches: |t| t.contains(PLAY_SONG_TRIGGER),
            },
            Rule {
                label: IntentLabel::ListItems,
                matches: |t| {
                    t.contains("available")
                        && (t.contains("pantry") || t.contains("grocery") || t.contains("list"))
                },
            },
        ])
    }
}

/// Classify lowercased text with the default rule set
pub fn classify(text: &str) -> Intent {
    static DEFAULT: OnceLock<Classifier> = OnceLock::new();
    DEFAULT.get_or_init(Classifier::default).classify(text)
}

fn is_bare_cancel(text: &str) -> bool {
    let text = text.trim();
    BARE_CANCEL_WORDS.iter().any(|word| *word == text)
}

pub fn is_closing(text: &str) -> bool {
    CLOSING_PHRASES.iter().any(|phrase| text.contains(phrase))
}

/// Build the intent for `label`, attaching the payload its handler needs
///
/// `lowered` is the text the rules matched; `raw` is forwarded to
/// collaborators verbatim.
pub fn intent_for(label: IntentLabel, lowered: &str, raw: &str) -> Intent {
    match label {
        IntentLabel::Closing => Intent::Closing,
        IntentLabel::SuggestRecipe => Intent::SuggestRecipe,
        IntentLabel::AddItemsPrompt => Intent::AddItemsPrompt,
        IntentLabel::AddItem => Intent::AddItem {
            text: raw.to_string(),
        },
        IntentLabel::CheckWeather => Intent::CheckWeather,
        IntentLabel::PlaySong => Intent::PlaySong {
            song: lowered.replacen(PLAY_SONG_TRIGGER, "", 1).trim().to_string(),
        },
        IntentLabel::ListItems => Intent::ListItems,
        IntentLabel::General => Intent::General {
            text: raw.to_string(),
        },
    }
}
