use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::canonical_type::CanonicalType;
use super::condition::ConditionExpression;
use super::value_kind::ValueKind;

/// One column of a lookup grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub data_field: String,
    pub caption: String,
    pub data_type: ValueKind,
}

impl ColumnDefinition {
    /// Builds a `STRING` column whose caption is derived from the column
    /// name: underscores become spaces and each word is title-cased.
    pub fn from_column(name: &str) -> Self {
        let name = name.trim();
        Self {
            data_field: name.to_string(),
            caption: title_case(&name.replace('_', " ")),
            data_type: ValueKind::String,
        }
    }
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = !c.is_alphanumeric();
        }
    }
    out
}

/// A form field produced from one component.
///
/// Extension attributes are present only for the canonical types that use
/// them and are omitted from the JSON otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedField {
    /// Equals the source component name.
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: CanonicalType,
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_key_field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub column_definitions: Vec<ColumnDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_alias_box: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<IndexMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<ValueKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit_mask: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checkbox_value: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled_when: Option<ConditionExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<ConditionExpression>,
}

impl GeneratedField {
    /// A field with only the base attributes set.
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: CanonicalType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            required: false,
            entity_key_field: None,
            entity: None,
            endpoint: None,
            column_definitions: Vec::new(),
            key_column: None,
            show_alias_box: None,
            options: None,
            data_type: None,
            format: None,
            edit_mask: None,
            checkbox_value: None,
            enabled_when: None,
            visible_when: None,
        }
    }

    /// Whether entity enrichment was attached.
    pub fn has_entity(&self) -> bool {
        self.entity.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_caption_title_cased() {
        assert_eq!(ColumnDefinition::from_column("acnam1").caption, "Acnam1");
        assert_eq!(ColumnDefinition::from_column("tkr_DESC").caption, "Tkr Desc");
        assert_eq!(ColumnDefinition::from_column(" fund ").data_field, "fund");
    }

    #[test]
    fn column_defaults_to_string_type() {
        assert_eq!(ColumnDefinition::from_column("x").data_type, ValueKind::String);
    }

    #[test]
    fn base_field_serializes_only_base_attributes() {
        let field = GeneratedField::new("Qty", "QUANTITY", CanonicalType::Text);
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "Qty", "label": "QUANTITY", "type": "TEXT", "required": false })
        );
    }

    #[test]
    fn options_keep_insertion_order() {
        let mut field = GeneratedField::new("Side", "SIDE", CanonicalType::Select);
        let mut options = IndexMap::new();
        options.insert("Sell".to_string(), "Sell".to_string());
        options.insert("Buy".to_string(), "Buy".to_string());
        field.options = Some(options);
        let json = serde_json::to_string(&field).unwrap();
        let sell = json.find("\"Sell\"").unwrap();
        let buy = json.find("\"Buy\"").unwrap();
        assert!(sell < buy);
    }
}
