//! Command dispatch
//!
//! Classification, handler invocation and response emission for each
//! utterance, plus the one piece of conversational state.

mod clock;
mod dispatcher;
pub mod handlers;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dispatcher::{ConversationState, Dispatcher, Exchange};
pub use handlers::{expiry_for, AddOutcome};
