use serde::{Deserialize, Serialize};

use super::property_value::PropertyBag;

/// One component declaration span from a definition file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentNode {
    /// Component name, unique within one parse.
    pub name: String,
    /// Widget class name as declared, e.g. `TSSICheckBox`.
    pub declared_type: String,
    pub properties: PropertyBag,
}

impl ComponentNode {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            properties: PropertyBag::new(),
        }
    }
}

/// Top-level attributes of the form header declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormProperties {
    pub name: Option<String>,
    pub declared_type: Option<String>,
    pub properties: PropertyBag,
}

impl FormProperties {
    /// The form caption, if the header declares a non-empty one.
    pub fn caption(&self) -> Option<&str> {
        self.properties.first_text(&["Caption"])
    }

    /// The declared form width, preferring `Width` over `ClientWidth`.
    pub fn width(&self) -> Option<i64> {
        self.properties
            .int("Width")
            .or_else(|| self.properties.int("ClientWidth"))
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PropertyValue;

    #[test]
    fn width_prefers_width_over_client_width() {
        let mut form = FormProperties::default();
        form.properties.insert("ClientWidth", PropertyValue::Int(594));
        assert_eq!(form.width(), Some(594));
        form.properties.insert("Width", PropertyValue::Int(610));
        assert_eq!(form.width(), Some(610));
    }

    #[test]
    fn caption_ignores_blank() {
        let mut form = FormProperties::default();
        assert_eq!(form.caption(), None);
        form.properties.insert("Caption", PropertyValue::Text(String::new()));
        assert_eq!(form.caption(), None);
        form.properties.insert("Caption", PropertyValue::Text("Buy Type".into()));
        assert_eq!(form.caption(), Some("Buy Type"));
    }

    #[test]
    fn default_form_is_empty() {
        assert!(FormProperties::default().is_empty());
    }
}
