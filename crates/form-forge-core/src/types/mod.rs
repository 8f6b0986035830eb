mod canonical_type;
mod component;
mod condition;
mod form_document;
mod generated_field;
mod generated_validation;
mod property_value;
mod records;
mod value_kind;

pub use canonical_type::CanonicalType;
pub use component::{ComponentNode, FormProperties};
pub use condition::{Condition, ConditionExpression, LogicalOperator};
pub use form_document::{FormAction, FormDocument, DEFAULT_FORM_WIDTH, FORM_LAYOUT};
pub use generated_field::{ColumnDefinition, GeneratedField};
pub use generated_validation::{GeneratedValidation, DEFAULT_SEVERITY};
pub use property_value::{PropertyBag, PropertyValue};
pub use records::{EntityInfoRecord, FieldInfoRecord, OperatorRecord, ValidationInfoRecord};
pub use value_kind::ValueKind;
