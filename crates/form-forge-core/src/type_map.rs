use crate::types::CanonicalType;

/// Widget class names and the canonical type each one renders as.
///
/// Matching is exact and case-sensitive; there is no prefix matching.
const WIDGET_CLASSES: &[(&str, CanonicalType)] = &[
    // Text entry
    ("TEdit", CanonicalType::Text),
    ("TDBEdit", CanonicalType::Text),
    ("TMaskEdit", CanonicalType::Text),
    ("TMemo", CanonicalType::Textarea),
    ("TDBMemo", CanonicalType::Textarea),
    ("TRichEdit", CanonicalType::Textarea),
    // Numbers and dates
    ("TSpinEdit", CanonicalType::Numeric),
    ("TDBSpinEdit", CanonicalType::Numeric),
    ("TDateTimePicker", CanonicalType::Datepicker),
    ("TDBDateTimePicker", CanonicalType::Datepicker),
    ("TGisDateEdit", CanonicalType::Datepicker),
    ("TgisAsOfFileDateEdit", CanonicalType::Datepicker),
    // Choices
    ("TCheckBox", CanonicalType::Checkbox),
    ("TDBCheckBox", CanonicalType::Checkbox),
    ("TSSICheckBox", CanonicalType::Checkbox),
    ("TRadioGroup", CanonicalType::Radio),
    ("TDBRadioGroup", CanonicalType::Radio),
    ("TSsiRadioGroup", CanonicalType::Radio),
    ("TComboBox", CanonicalType::Select),
    ("TDBComboBox", CanonicalType::Select),
    ("TSSIComboBox", CanonicalType::Select),
    ("TListBox", CanonicalType::Select),
    // Lookups
    ("TDBLookupComboBox", CanonicalType::Lstlkp),
    ("TMFWTkrLookup", CanonicalType::Lstlkp),
    ("TMFWSccLookup", CanonicalType::Lstlkp),
    ("TMFWScgLookup", CanonicalType::Lstlkp),
    ("TDBGrid", CanonicalType::Gridlkp),
    ("TMFWFndAliasLookup", CanonicalType::Gridlkp),
    // Layout and static content
    ("TPanel", CanonicalType::Group),
    ("TGroupBox", CanonicalType::Group),
    ("TBevel", CanonicalType::Group),
    ("TButton", CanonicalType::Button),
    ("TBitBtn", CanonicalType::Button),
    ("TSpeedButton", CanonicalType::Button),
    ("TLabel", CanonicalType::Label),
    ("TStaticText", CanonicalType::Label),
];

/// Maps a widget class name onto its canonical field type.
///
/// Total: unknown class names map to `TEXT`.
pub fn map_widget_class(class_name: &str) -> CanonicalType {
    match WIDGET_CLASSES.iter().find(|(name, _)| *name == class_name) {
        Some((_, canonical)) => *canonical,
        None => {
            tracing::debug!(class = class_name, "unknown widget class, mapping to TEXT");
            CanonicalType::Text
        }
    }
}

/// Whether `class_name` has an explicit entry in the table.
pub fn is_known_widget_class(class_name: &str) -> bool {
    WIDGET_CLASSES.iter().any(|(name, _)| *name == class_name)
}
