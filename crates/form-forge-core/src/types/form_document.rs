use serde::{Deserialize, Serialize};

use super::generated_field::GeneratedField;
use super::generated_validation::GeneratedValidation;

/// Layout constant for converted forms.
pub const FORM_LAYOUT: &str = "PROCESS";
/// Width used when the form header declares none.
pub const DEFAULT_FORM_WIDTH: &str = "700px";

const PROCESS_ACTION_ID: &str = "PROCESS";

/// An action button rendered under the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormAction {
    pub id: String,
    pub label: String,
    pub method_to_invoke: String,
}

impl FormAction {
    /// The single process action for a form: invokes `Execute<FORMID>`.
    pub fn process(form_id: &str) -> Self {
        Self {
            id: PROCESS_ACTION_ID.to_string(),
            label: PROCESS_ACTION_ID.to_string(),
            method_to_invoke: format!("Execute{form_id}"),
        }
    }
}

/// The canonical JSON form document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    pub id: String,
    pub label: String,
    pub form_width: String,
    pub layout: String,
    pub fields: Vec<GeneratedField>,
    pub actions: Vec<FormAction>,
    pub validations: Vec<GeneratedValidation>,
}

impl FormDocument {
    pub fn field(&self, id: &str) -> Option<&GeneratedField> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
