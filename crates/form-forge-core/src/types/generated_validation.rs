use serde::{Deserialize, Serialize};

use super::condition::{Condition, ConditionExpression};

/// Severity used when a validation record does not declare one.
pub const DEFAULT_SEVERITY: &str = "ERROR";

/// One form-level validation rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedValidation {
    /// Position in the document's validation sequence, starting at `"1"`.
    pub id: String,
    pub severity: String,
    pub message: String,
    pub cond_expression: ConditionExpression,
}

impl GeneratedValidation {
    pub fn new(
        id: usize,
        severity: impl Into<String>,
        message: impl Into<String>,
        condition: Condition,
    ) -> Self {
        Self {
            id: id.to_string(),
            severity: severity.into(),
            message: message.into(),
            cond_expression: ConditionExpression::single(condition),
        }
    }

    /// The rule's condition. Generated validations carry exactly one.
    pub fn condition(&self) -> Option<&Condition> {
        self.cond_expression.conditions.first()
    }
}
