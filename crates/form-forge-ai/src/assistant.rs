use std::sync::Mutex;

use async_trait::async_trait;
use form_forge_core::types::FormDocument;

use crate::error::AssistError;

/// A conversational collaborator that answers free-text questions about
/// a converted form.
///
/// Implementations are injected by the caller; the conversion pipeline
/// never depends on one.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Short provider name for logs.
    fn name(&self) -> &str;

    /// Answers `question`, optionally grounded in the current document.
    async fn answer(
        &self,
        question: &str,
        context: Option<&FormDocument>,
    ) -> Result<String, AssistError>;
}

/// Asks `assistant` and degrades any failure into a visible message.
pub async fn answer_or_message(
    assistant: &dyn Assistant,
    question: &str,
    context: Option<&FormDocument>,
) -> String {
    match assistant.answer(question, context).await {
        Ok(answer) => answer,
        Err(err) => {
            tracing::warn!(assistant = assistant.name(), error = %err, "assistant call failed");
            err.user_message()
        }
    }
}

/// An assistant with a fixed reply that records every question it gets.
#[derive(Debug)]
pub struct CannedAssistant {
    reply: Result<String, AssistError>,
    questions: Mutex<Vec<String>>,
}

impl CannedAssistant {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            reply: Ok(reply.into()),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: AssistError) -> Self {
        Self {
            reply: Err(err),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Questions received so far, in order.
    pub fn questions(&self) -> Vec<String> {
        self.questions
            .lock()
            .map(|q| q.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Assistant for CannedAssistant {
    fn name(&self) -> &str {
        "canned"
    }

    async fn answer(
        &self,
        question: &str,
        _context: Option<&FormDocument>,
    ) -> Result<String, AssistError> {
        if let Ok(mut questions) = self.questions.lock() {
            questions.push(question.to_string());
        }
        self.reply.clone()
    }
}
