use serde::{Deserialize, Serialize};

/// The closed set of field kinds understood by the form renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CanonicalType {
    Text,
    Textarea,
    Numeric,
    Checkbox,
    Radio,
    Select,
    Datepicker,
    Lstlkp,
    Gridlkp,
    Group,
    Button,
    Label,
}

impl CanonicalType {
    pub const ALL: [CanonicalType; 12] = [
        Self::Text,
        Self::Textarea,
        Self::Numeric,
        Self::Checkbox,
        Self::Radio,
        Self::Select,
        Self::Datepicker,
        Self::Lstlkp,
        Self::Gridlkp,
        Self::Group,
        Self::Button,
        Self::Label,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "TEXT",
            Self::Textarea => "TEXTAREA",
            Self::Numeric => "NUMERIC",
            Self::Checkbox => "CHECKBOX",
            Self::Radio => "RADIO",
            Self::Select => "SELECT",
            Self::Datepicker => "DATEPICKER",
            Self::Lstlkp => "LSTLKP",
            Self::Gridlkp => "GRIDLKP",
            Self::Group => "GROUP",
            Self::Button => "BUTTON",
            Self::Label => "LABEL",
        }
    }

    /// Whether components of this type become form fields.
    ///
    /// Layout containers, static labels and buttons do not.
    pub fn produces_field(&self) -> bool {
        !matches!(self, Self::Group | Self::Button | Self::Label)
    }

    /// Single-row and grid-backed lookups.
    pub fn is_lookup(&self) -> bool {
        matches!(self, Self::Lstlkp | Self::Gridlkp)
    }

    pub fn is_selection(&self) -> bool {
        matches!(self, Self::Select | Self::Radio)
    }
}

impl std::fmt::Display for CanonicalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
