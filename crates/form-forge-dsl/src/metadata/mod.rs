//! Metadata file parsing.
//!
//! Two unrelated historical formats are accepted. [`detect_shape`] sniffs
//! the text for section markers and hands it to the matching parser; text
//! matching neither yields empty output and a single recovery.

mod declarations;
mod sectioned;

use form_forge_core::types::{
    EntityInfoRecord, FieldInfoRecord, OperatorRecord, ValidationInfoRecord,
};

use crate::error::{Recovery, RecoveryKind, Span};

pub use declarations::{parse_declarations, OperatorCatalog};
pub use sectioned::{parse_sectioned, RecordSet};

/// Which metadata format a file was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataShape {
    /// `[fields]` / `[validations]` / `[entities]` sections of pipe rows.
    Sectioned,
    /// `LogicalOperator` / `Operators` / `Types` declaration blocks.
    Declarations,
    #[default]
    Unrecognized,
}

impl MetadataShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sectioned => "sectioned",
            Self::Declarations => "declarations",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl std::fmt::Display for MetadataShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The result of parsing a metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMetadata {
    pub shape: MetadataShape,
    /// Populated for the sectioned shape.
    pub records: RecordSet,
    /// Populated for the declaration-block shape.
    pub catalog: OperatorCatalog,
    pub recoveries: Vec<Recovery>,
}

impl ParsedMetadata {
    pub fn fields(&self) -> &[FieldInfoRecord] {
        &self.records.fields
    }

    pub fn validations(&self) -> &[ValidationInfoRecord] {
        &self.records.validations
    }

    pub fn entities(&self) -> &[EntityInfoRecord] {
        &self.records.entities
    }

    pub fn operators(&self) -> &[OperatorRecord] {
        &self.catalog.operators
    }
}

const SECTION_HEADERS: [&str; 3] = ["[fields]", "[validations]", "[entities]"];

/// Determines which shape `source` is written in.
///
/// Sectioned markers win over declaration keywords when both appear.
pub fn detect_shape(source: &str) -> MetadataShape {
    let lines = || source.lines().map(str::trim);

    if lines().any(|line| {
        SECTION_HEADERS
            .iter()
            .any(|header| line.eq_ignore_ascii_case(header))
    }) {
        return MetadataShape::Sectioned;
    }
    if lines().any(|line| declarations::section_keyword(line).is_some()) {
        return MetadataShape::Declarations;
    }
    MetadataShape::Unrecognized
}

/// Parses metadata text of either shape.
pub fn parse_metadata(source: &str) -> ParsedMetadata {
    let shape = detect_shape(source);
    let mut parsed = ParsedMetadata {
        shape,
        ..ParsedMetadata::default()
    };

    match shape {
        MetadataShape::Sectioned => {
            let (records, recoveries) = parse_sectioned(source);
            parsed.records = records;
            parsed.recoveries = recoveries;
        }
        MetadataShape::Declarations => {
            let (catalog, recoveries) = parse_declarations(source);
            parsed.catalog = catalog;
            parsed.recoveries = recoveries;
        }
        MetadataShape::Unrecognized => {
            if !source.trim().is_empty() {
                tracing::debug!("metadata matches no known shape");
                parsed.recoveries.push(Recovery::new(
                    RecoveryKind::UnrecognizedShape,
                    1,
                    Span::new(0, source.len()),
                ));
            }
        }
    }

    tracing::debug!(
        shape = %parsed.shape,
        fields = parsed.records.fields.len(),
        validations = parsed.records.validations.len(),
        entities = parsed.records.entities.len(),
        operators = parsed.catalog.operators.len(),
        "parsed metadata"
    );
    parsed
}

/// Iterates lines with their 1-based number and source span.
pub(crate) fn numbered_lines(source: &str) -> impl Iterator<Item = (usize, Span, &str)> {
    let mut offset = 0;
    source.split('\n').enumerate().map(move |(index, raw)| {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let span = Span::new(offset, offset + line.len());
        offset += raw.len() + 1;
        (index + 1, span, line)
    })
}
