//! # form-forge-gen
//!
//! Joins a parsed definition file with its metadata and produces the
//! canonical [`FormDocument`].
//!
//! # Example
//!
//! ```
//! let definition = "\
//! object FundID: TMFWFndAliasLookup
//!   Required = True
//!   Caption = 'Fund'
//! end
//! ";
//! let metadata = "\
//! [fields]
//! FundID|lookup|true|Fndmas|Fund lookup
//! [entities]
//! Fndmas|fund|/api/fndmas|fund,acnam1
//! ";
//!
//! let conversion = form_forge_gen::convert(definition, metadata, "BUYTYP");
//! let field = conversion.document.field("FundID").unwrap();
//! assert_eq!(field.entity.as_deref(), Some("Fndmas"));
//! assert_eq!(conversion.document.validations.len(), 1);
//! ```

pub mod assembler;
pub mod field;
pub mod validation;

use serde::Serialize;

use form_forge_core::types::FormDocument;
use form_forge_core::{ConvertError, InputKind};
use form_forge_dsl::{parse_definition, parse_metadata, MetadataShape, Recovery};

pub use assembler::{assemble, resolve_form_id};
pub use field::{component_label, generate_field, generate_fields};
pub use validation::generate_validations;

/// Counts describing one conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    pub components_found: usize,
    pub fields_generated: usize,
    /// Layout, label and button components that produce no field.
    pub components_skipped: usize,
    pub implicit_validations: usize,
    pub explicit_validations: usize,
    /// Lookup fields with no matching entity record.
    pub unresolved_lookups: usize,
    pub metadata_shape: String,
    pub definition_recoveries: usize,
    pub metadata_recoveries: usize,
}

/// A converted document with what the parsers recovered from.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: FormDocument,
    pub report: ConversionReport,
    pub definition_recoveries: Vec<Recovery>,
    pub metadata_recoveries: Vec<Recovery>,
    pub metadata_shape: MetadataShape,
}

/// Converts definition and metadata text into a form document.
///
/// `form_id` names the form when the definition has no header. This
/// never fails; malformed input yields a smaller document and recoveries.
pub fn convert(definition: &str, metadata: &str, form_id: &str) -> Conversion {
    let parsed = parse_definition(strip_bom(definition));
    let meta = parse_metadata(strip_bom(metadata));

    let fields = generate_fields(&parsed.components, &meta.records);
    let validations = generate_validations(&parsed.components, meta.validations());

    let implicit_validations = parsed
        .components
        .iter()
        .filter(|c| c.properties.bool_or("Required", false))
        .count();

    let report = ConversionReport {
        components_found: parsed.components.len(),
        fields_generated: fields.len(),
        components_skipped: parsed.components.len() - fields.len(),
        implicit_validations,
        explicit_validations: validations.len() - implicit_validations,
        unresolved_lookups: fields
            .iter()
            .filter(|f| f.field_type.is_lookup() && !f.has_entity())
            .count(),
        metadata_shape: meta.shape.to_string(),
        definition_recoveries: parsed.recoveries.len(),
        metadata_recoveries: meta.recoveries.len(),
    };

    let document = assemble(&parsed.form, form_id, fields, validations);

    tracing::info!(
        form = %document.id,
        components = report.components_found,
        fields = report.fields_generated,
        validations = document.validations.len(),
        unresolved_lookups = report.unresolved_lookups,
        recoveries = report.definition_recoveries + report.metadata_recoveries,
        "converted form"
    );

    Conversion {
        document,
        report,
        definition_recoveries: parsed.recoveries,
        metadata_recoveries: meta.recoveries,
        metadata_shape: meta.shape,
    }
}

/// Converts raw file bytes, rejecting input that is not UTF-8.
///
/// # Errors
///
/// Returns [`ConvertError::InvalidEncoding`] naming the offending input.
pub fn convert_bytes(
    definition: &[u8],
    metadata: &[u8],
    form_id: &str,
) -> Result<Conversion, ConvertError> {
    let definition = std::str::from_utf8(definition)
        .map_err(|e| ConvertError::invalid_encoding(InputKind::Definition, &e))?;
    let metadata = std::str::from_utf8(metadata)
        .map_err(|e| ConvertError::invalid_encoding(InputKind::Metadata, &e))?;
    Ok(convert(definition, metadata, form_id))
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
