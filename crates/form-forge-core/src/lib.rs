//! # form-forge-core
//!
//! Shared data model for converting legacy form definitions into canonical
//! JSON form documents.
//!
//! This crate provides:
//! - The parsed model (`ComponentNode`, `FormProperties`, metadata records)
//! - The generated model (`GeneratedField`, `GeneratedValidation`, `FormDocument`)
//! - The widget class → canonical type table (`map_widget_class`)
//! - The value-kind classifier (`ValueKind::classify`)
//! - The validation operator table (`resolve_operator`)

pub mod error;
pub mod operators;
pub mod type_map;
pub mod types;

pub use error::{ConvertError, InputKind};
pub use operators::resolve_operator;
pub use type_map::{is_known_widget_class, map_widget_class};
