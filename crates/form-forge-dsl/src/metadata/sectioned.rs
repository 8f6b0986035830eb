use form_forge_core::types::{
    EntityInfoRecord, FieldInfoRecord, ValidationInfoRecord, DEFAULT_SEVERITY,
};

use super::numbered_lines;
use crate::error::{Recovery, RecoveryKind, Span};

/// Records read from a sectioned metadata file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    pub fields: Vec<FieldInfoRecord>,
    pub validations: Vec<ValidationInfoRecord>,
    pub entities: Vec<EntityInfoRecord>,
}

impl RecordSet {
    /// Looks up a field record by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&FieldInfoRecord> {
        self.fields
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }

    /// Looks up an entity record by name, ignoring case.
    pub fn entity(&self, name: &str) -> Option<&EntityInfoRecord> {
        self.entities
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(name))
    }

    /// Resolves the entity a field's lookup points at.
    ///
    /// Every field row with a matching name is tried in order; rows without
    /// an entity, or naming an entity that is not declared, are skipped.
    pub fn entity_for_field(&self, name: &str) -> Option<&EntityInfoRecord> {
        self.fields
            .iter()
            .filter(|f| f.name.eq_ignore_ascii_case(name))
            .filter_map(|f| f.entity.as_deref())
            .find_map(|entity| self.entity(entity))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.validations.is_empty() && self.entities.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Fields,
    Validations,
    Entities,
    Unknown,
}

impl Section {
    fn from_header(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "fields" => Self::Fields,
            "validations" => Self::Validations,
            "entities" => Self::Entities,
            _ => Self::Unknown,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Validations => "validations",
            Self::Entities => "entities",
            Self::Unknown => "unknown",
        }
    }

    fn min_columns(&self) -> usize {
        match self {
            Self::Fields => 3,
            Self::Validations => 4,
            Self::Entities => 2,
            Self::Unknown => 0,
        }
    }
}

/// Parses the `[section]` / pipe-row shape.
pub fn parse_sectioned(source: &str) -> (RecordSet, Vec<Recovery>) {
    let mut records = RecordSet::default();
    let mut recoveries = Vec::new();
    let mut section: Option<Section> = None;

    for (line_no, span, line) in numbered_lines(source) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
            continue;
        }

        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            let next = Section::from_header(header);
            if next == Section::Unknown {
                recoveries.push(Recovery::new(
                    RecoveryKind::UnknownSection {
                        name: header.trim().to_string(),
                    },
                    line_no,
                    span,
                ));
            }
            section = Some(next);
            continue;
        }

        let Some(current) = section else {
            recoveries.push(Recovery::new(RecoveryKind::RowOutsideSection, line_no, span));
            continue;
        };
        if current == Section::Unknown {
            continue;
        }

        let columns: Vec<&str> = line.split('|').map(str::trim).collect();
        if columns.len() < current.min_columns() {
            recoveries.push(Recovery::new(
                RecoveryKind::ShortRow {
                    section: current.name().to_string(),
                    columns: columns.len(),
                    minimum: current.min_columns(),
                },
                line_no,
                span,
            ));
            continue;
        }

        match current {
            Section::Fields => records.fields.push(field_row(&columns)),
            Section::Validations => records.validations.push(validation_row(&columns)),
            Section::Entities => records.entities.push(entity_row(&columns)),
            Section::Unknown => {}
        }
    }

    for recovery in &recoveries {
        tracing::debug!(line = recovery.line, "metadata recovery: {}", recovery.kind);
    }
    (records, recoveries)
}

fn optional(columns: &[&str], index: usize) -> Option<String> {
    columns
        .get(index)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
}

fn field_row(columns: &[&str]) -> FieldInfoRecord {
    FieldInfoRecord {
        name: columns[0].to_string(),
        field_type: columns[1].to_string(),
        required: columns[2].eq_ignore_ascii_case("true"),
        entity: optional(columns, 3),
        description: optional(columns, 4),
    }
}

fn validation_row(columns: &[&str]) -> ValidationInfoRecord {
    ValidationInfoRecord {
        field: columns[0].to_string(),
        operator: columns[1].to_string(),
        value: columns[2].to_string(),
        message: columns[3].to_string(),
        severity: optional(columns, 4)
            .map(|s| s.to_ascii_uppercase())
            .unwrap_or_else(|| DEFAULT_SEVERITY.to_string()),
    }
}

fn entity_row(columns: &[&str]) -> EntityInfoRecord {
    EntityInfoRecord {
        name: columns[0].to_string(),
        key_field: columns[1].to_string(),
        endpoint: optional(columns, 2),
        columns: columns
            .get(3)
            .map(|list| {
                list.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    }
}
