//! Intent classification
//!
//! A fixed, ordered set of keyword rules; see [`Classifier`].

mod classifier;
mod types;

pub use classifier::{classify, intent_for, is_closing, Classifier, Predicate, Rule, CLOSING_PHRASES};
pub use types::{Intent, IntentLabel};
