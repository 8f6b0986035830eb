use indexmap::IndexMap;

use form_forge_core::map_widget_class;
use form_forge_core::types::{
    CanonicalType, ColumnDefinition, ComponentNode, ConditionExpression, GeneratedField,
    ValueKind,
};
use form_forge_dsl::{string_list_items, RecordSet};

/// Display format applied to every date picker.
pub const DATE_FORMAT: &str = "DD/MM/YYYY";

const LABEL_PROPERTIES: [&str; 3] = ["Caption", "LabelCaption", "Text"];

/// The display label of a component: its first non-empty caption-like
/// property, falling back to the component name, upper-cased.
pub fn component_label(component: &ComponentNode) -> String {
    component
        .properties
        .first_text(&LABEL_PROPERTIES)
        .unwrap_or(component.name.as_str())
        .to_uppercase()
}

/// Builds the generated field for one component.
///
/// Returns `None` for layout containers, static labels and buttons.
pub fn generate_field(component: &ComponentNode, records: &RecordSet) -> Option<GeneratedField> {
    let field_type = map_widget_class(&component.declared_type);
    if !field_type.produces_field() {
        return None;
    }

    let props = &component.properties;
    let mut field = GeneratedField::new(
        component.name.clone(),
        component_label(component),
        field_type,
    );
    field.required = props.bool_or("Required", false);

    match field_type {
        CanonicalType::Lstlkp | CanonicalType::Gridlkp => {
            attach_entity(&mut field, &component.name, records);
            field.key_column = props.text("DisplayPanelField").map(String::from);
            field.show_alias_box = props.get("ShowButton").and_then(|v| v.as_bool());
        }
        CanonicalType::Select | CanonicalType::Radio => {
            field.options = props.text("Items.Strings").and_then(parse_options);
        }
        CanonicalType::Numeric => {
            field.data_type = Some(ValueKind::Numeric);
        }
        CanonicalType::Datepicker => {
            field.data_type = Some(ValueKind::Date);
            field.format = Some(DATE_FORMAT.to_string());
            field.edit_mask = props.text("EditMask").map(String::from);
        }
        CanonicalType::Checkbox => {
            field.checkbox_value = Some(props.bool_or("Checked", false));
        }
        _ => {}
    }

    if props.is_explicitly_false("Enabled") {
        field.enabled_when = Some(ConditionExpression::always_false());
    }
    if props.is_explicitly_false("Visible") {
        field.visible_when = Some(ConditionExpression::always_false());
    }

    Some(field)
}

/// Generates fields for every component, preserving source order.
pub fn generate_fields(components: &[ComponentNode], records: &RecordSet) -> Vec<GeneratedField> {
    components
        .iter()
        .filter_map(|component| generate_field(component, records))
        .collect()
}

/// Joins a lookup field to its entity through the metadata field record.
fn attach_entity(field: &mut GeneratedField, name: &str, records: &RecordSet) {
    match records.entity_for_field(name) {
        Some(entity) => {
            field.entity_key_field = Some(entity.key_field.clone());
            field.entity = Some(entity.name.clone());
            field.endpoint = entity.endpoint.clone();
            field.column_definitions = entity
                .columns
                .iter()
                .map(|column| ColumnDefinition::from_column(column))
                .collect();
        }
        None => {
            tracing::debug!(field = name, "lookup has no matching entity record");
        }
    }
}

fn parse_options(raw: &str) -> Option<IndexMap<String, String>> {
    let options: IndexMap<String, String> = string_list_items(raw)
        .into_iter()
        .map(|item| (item.clone(), item))
        .collect();
    (!options.is_empty()).then_some(options)
}
