//! # form-forge-ai
//!
//! Conversational assistants that answer questions about a converted form.
//!
//! The [`Assistant`] trait is the seam: the CLI injects a
//! [`ChatCompletionsAssistant`] when an API key is configured, the
//! rule-based [`OfflineAssistant`] otherwise, and tests use
//! [`CannedAssistant`]. Every provider call is bounded by a timeout and
//! failures are turned into a message by [`answer_or_message`].

pub mod assistant;
pub mod error;
pub mod offline;
pub mod openai;
pub mod prompt;

pub use assistant::{answer_or_message, Assistant, CannedAssistant};
pub use error::AssistError;
pub use offline::OfflineAssistant;
pub use openai::{ChatCompletionsAssistant, ChatSettings};
