use form_forge_core::types::{
    FormAction, FormDocument, FormProperties, GeneratedField, GeneratedValidation,
    DEFAULT_FORM_WIDTH, FORM_LAYOUT,
};

/// Form id used when neither the definition nor the caller names one.
pub const FALLBACK_FORM_ID: &str = "UNKNOWN_FORM";

/// Resolves the document id: the parsed form name, else the caller's id,
/// upper-cased.
pub fn resolve_form_id(form: &FormProperties, form_id: &str) -> String {
    let id = form
        .name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| form_id.trim());
    if id.is_empty() {
        FALLBACK_FORM_ID.to_string()
    } else {
        id.to_uppercase()
    }
}

/// Wraps generated fields and validations in a form document.
pub fn assemble(
    form: &FormProperties,
    form_id: &str,
    fields: Vec<GeneratedField>,
    validations: Vec<GeneratedValidation>,
) -> FormDocument {
    let id = resolve_form_id(form, form_id);
    let label = form
        .caption()
        .map(str::to_uppercase)
        .unwrap_or_else(|| id.clone());
    let form_width = form
        .width()
        .filter(|width| *width > 0)
        .map(|width| format!("{width}px"))
        .unwrap_or_else(|| DEFAULT_FORM_WIDTH.to_string());

    FormDocument {
        actions: vec![FormAction::process(&id)],
        id,
        label,
        form_width,
        layout: FORM_LAYOUT.to_string(),
        fields,
        validations,
    }
}
