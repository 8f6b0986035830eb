use async_trait::async_trait;

use form_forge_core::types::FormDocument;

use crate::assistant::Assistant;
use crate::error::AssistError;

/// A rule-based assistant that answers from the current document alone.
///
/// Used when no provider is configured. It recognizes questions about
/// fields, validations and generation by keyword.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAssistant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Topic {
    Fields,
    Validations,
    Generate,
    Other,
}

fn topic(question: &str) -> Topic {
    let q = question.to_lowercase();
    let mentions = |words: &[&str]| words.iter().any(|w| q.contains(w));
    if mentions(&["field", "champ", "component", "lookup"]) {
        Topic::Fields
    } else if mentions(&["validation", "rule", "required"]) {
        Topic::Validations
    } else if mentions(&["generat", "génér", "convert", "crée", "create"]) {
        Topic::Generate
    } else {
        Topic::Other
    }
}

fn describe_fields(doc: &FormDocument) -> String {
    if doc.fields.is_empty() {
        return format!("Form {} has no fields.", doc.id);
    }
    let listed: Vec<String> = doc
        .fields
        .iter()
        .map(|f| match &f.entity {
            Some(entity) => format!("{} ({}, entity {entity})", f.id, f.field_type),
            None => format!("{} ({})", f.id, f.field_type),
        })
        .collect();
    let required = doc.fields.iter().filter(|f| f.required).count();
    format!(
        "Form {} has {} field(s), {required} required: {}.",
        doc.id,
        doc.fields.len(),
        listed.join(", ")
    )
}

fn describe_validations(doc: &FormDocument) -> String {
    if doc.validations.is_empty() {
        return format!("Form {} has no validation rules.", doc.id);
    }
    let listed: Vec<String> = doc
        .validations
        .iter()
        .map(|v| format!("#{} [{}] {}", v.id, v.severity, v.message))
        .collect();
    format!(
        "Form {} defines {} validation rule(s): {}.",
        doc.id,
        doc.validations.len(),
        listed.join("; ")
    )
}

#[async_trait]
impl Assistant for OfflineAssistant {
    fn name(&self) -> &str {
        "offline"
    }

    async fn answer(
        &self,
        question: &str,
        context: Option<&FormDocument>,
    ) -> Result<String, AssistError> {
        let Some(doc) = context else {
            return Ok("Convert a definition file and its metadata first, then ask \
                       about the generated form."
                .to_string());
        };

        let answer = match topic(question) {
            Topic::Fields => describe_fields(doc),
            Topic::Validations => describe_validations(doc),
            Topic::Generate => format!(
                "Form {} is already converted: {} field(s), {} validation rule(s), \
                 action {}. Use `form-forge convert` with --output to write it to a file.",
                doc.id,
                doc.fields.len(),
                doc.validations.len(),
                doc.actions
                    .first()
                    .map(|a| a.method_to_invoke.as_str())
                    .unwrap_or("none")
            ),
            Topic::Other => format!(
                "I can describe the fields or the validation rules of form {}, \
                 or explain how it was generated. What would you like to know?",
                doc.id
            ),
        };
        Ok(answer)
    }
}
