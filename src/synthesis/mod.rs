//! Speech output
//!
//! [`SpeechOutput`] owns the synthesis state; backends implement
//! [`SpeechSynthesizer`].

mod command;
mod console;
mod output;

pub use command::CommandSynthesizer;
pub use console::{ConsoleSynthesizer, SilentSynthesizer};
pub use output::{SpeechOutput, SpeechRequest, SpeechSynthesizer, Voice};
