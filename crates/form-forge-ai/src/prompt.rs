use form_forge_core::types::FormDocument;

/// System prompt sent ahead of every question.
pub const SYSTEM_PROMPT: &str = "You are an assistant specialized in legacy form \
definition analysis and form generation. You help users convert legacy desktop \
forms into modern JSON form configurations: explain the generated fields, their \
canonical types, lookups and validation rules, and suggest fixes when the \
conversion dropped something.";

/// Cuts `text` to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate_context(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// Builds the system message, embedding a truncated JSON rendering of the
/// current document when one is available.
pub fn system_message(context: Option<&FormDocument>, context_chars: usize) -> String {
    let Some(document) = context else {
        return SYSTEM_PROMPT.to_string();
    };
    match serde_json::to_string_pretty(document) {
        Ok(json) => format!(
            "{SYSTEM_PROMPT}\n\nCurrent generated JSON context: {}",
            truncate_context(&json, context_chars)
        ),
        Err(err) => {
            tracing::debug!(error = %err, "could not render assistant context");
            SYSTEM_PROMPT.to_string()
        }
    }
}
