//! # form-forge-dsl
//!
//! Line-oriented parsers for legacy form definition files and their
//! companion metadata files.
//!
//! This crate provides:
//! - A logos lexer that tokenizes one source line at a time
//! - A definition parser that flattens nested component spans into an
//!   ordered component list plus form header properties
//! - A metadata parser that sniffs which of two record shapes a file uses
//!
//! Neither parser fails. Anything they cannot read is skipped and reported
//! as a [`Recovery`].
//!
//! # Example
//!
//! ```
//! use form_forge_dsl::{parse_definition, parse_metadata};
//!
//! let definition = r#"
//! inherited frmBUYTYP: TfrmBUYTYP
//!   Caption = 'Buy Type'
//!   object edtQty: TEdit
//!     Required = True
//!   end
//! end
//! "#;
//!
//! let parsed = parse_definition(definition);
//! assert_eq!(parsed.form.caption(), Some("Buy Type"));
//! assert_eq!(parsed.components.len(), 1);
//!
//! let metadata = parse_metadata("[validations]\nQty|greater_than|0|Quantity must be positive\n");
//! assert_eq!(metadata.validations().len(), 1);
//! ```

pub mod definition;
pub mod error;
pub mod lexer;
pub mod metadata;
pub mod token;

pub use definition::{parse_definition, ParsedDefinition};
pub use error::{Recovery, RecoveryKind, Span};
pub use lexer::string_list_items;
pub use metadata::{detect_shape, parse_metadata, MetadataShape, ParsedMetadata, RecordSet};
