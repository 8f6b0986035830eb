use serde::{Deserialize, Serialize};

use super::value_kind::ValueKind;

/// Field name used by conditions that never hold.
pub(crate) const ALWAYS_FALSE_FIELD: &str = "AlwaysFalse";
/// "is true" operator code, applied to `AlwaysFalse`.
pub(crate) const IS_TRUE_OPERATOR: &str = "IST";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogicalOperator {
    #[default]
    And,
    Or,
}

/// One predicate: `field <operator> value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub field: String,
    pub operator: String,
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_kind: Option<ValueKind>,
}

impl Condition {
    /// `field IS NULL`.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: "ISN".to_string(),
            value: None,
            value_kind: None,
        }
    }

    /// A condition that never holds.
    pub fn always_false() -> Self {
        Self {
            field: ALWAYS_FALSE_FIELD.to_string(),
            operator: IS_TRUE_OPERATOR.to_string(),
            value: None,
            value_kind: None,
        }
    }
}

/// A list of conditions joined by one logical operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionExpression {
    pub logical_operator: LogicalOperator,
    pub conditions: Vec<Condition>,
}

impl ConditionExpression {
    pub fn single(condition: Condition) -> Self {
        Self {
            logical_operator: LogicalOperator::And,
            conditions: vec![condition],
        }
    }

    /// The gate used for components declared `Enabled = False` or
    /// `Visible = False`.
    pub fn always_false() -> Self {
        Self::single(Condition::always_false())
    }
}
