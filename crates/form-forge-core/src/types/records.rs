use serde::{Deserialize, Serialize};

/// A `[fields]` row: `name|type|required|entity|description`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldInfoRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A `[validations]` row: `field|operator|value|message|severity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationInfoRecord {
    pub field: String,
    pub operator: String,
    pub value: String,
    pub message: String,
    pub severity: String,
}

/// An `[entities]` row: `name|keyField|endpoint|col1,col2,...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityInfoRecord {
    pub name: String,
    pub key_field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub columns: Vec<String>,
}

/// An operator declared in a declaration-block metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorRecord {
    /// Wire code, e.g. `EQUAL`.
    pub code: String,
    /// Symbolic name, e.g. `EQ`.
    pub display_name: String,
}
