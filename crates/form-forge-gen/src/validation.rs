use form_forge_core::resolve_operator;
use form_forge_core::types::{
    ComponentNode, Condition, GeneratedValidation, ValidationInfoRecord, ValueKind,
    DEFAULT_SEVERITY,
};

use crate::field::component_label;

/// Literal marking an explicit rule that compares against null.
const NULL_LITERAL: &str = "NULL";

/// Builds the ordered validation list.
///
/// Required-field rules come first in component order, then metadata
/// rules in record order. Ids count up from `"1"` across both groups.
pub fn generate_validations(
    components: &[ComponentNode],
    records: &[ValidationInfoRecord],
) -> Vec<GeneratedValidation> {
    let mut validations: Vec<GeneratedValidation> = Vec::new();

    for component in components {
        if !component.properties.bool_or("Required", false) {
            continue;
        }
        validations.push(GeneratedValidation::new(
            validations.len() + 1,
            DEFAULT_SEVERITY,
            format!("{} is required", component_label(component)),
            Condition::is_null(component.name.clone()),
        ));
    }

    for record in records {
        validations.push(GeneratedValidation::new(
            validations.len() + 1,
            severity(record),
            record.message.clone(),
            explicit_condition(record),
        ));
    }

    validations
}

fn severity(record: &ValidationInfoRecord) -> String {
    let severity = record.severity.trim();
    if severity.is_empty() {
        DEFAULT_SEVERITY.to_string()
    } else {
        severity.to_ascii_uppercase()
    }
}

fn explicit_condition(record: &ValidationInfoRecord) -> Condition {
    let literal = record.value.trim();
    Condition {
        field: record.field.clone(),
        operator: resolve_operator(&record.operator),
        value: (literal != NULL_LITERAL).then(|| literal.to_string()),
        value_kind: Some(ValueKind::classify(literal)),
    }
}
