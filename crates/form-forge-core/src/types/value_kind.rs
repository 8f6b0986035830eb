use serde::{Deserialize, Serialize};

/// Symbolic tokens that stand for "the current date" in metadata values.
const DATE_SENTINELS: [&str; 4] = ["SYSDATE", "NOW()", "TODAY", "CURRENT_DATE"];

/// The value kind tag attached to conditions and typed fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValueKind {
    Bool,
    Numeric,
    Date,
    String,
}

impl ValueKind {
    /// Classifies a literal token. Total and pure.
    ///
    /// - `BOOL` for `true`/`false` in any case
    /// - `NUMERIC` when every character is a digit, `.` or `-` and at least
    ///   one digit is present
    /// - `DATE` for the date sentinels (`SYSDATE`, `NOW()`, `TODAY`,
    ///   `CURRENT_DATE`, any case)
    /// - `STRING` otherwise
    pub fn classify(token: &str) -> Self {
        if token.eq_ignore_ascii_case("true") || token.eq_ignore_ascii_case("false") {
            return Self::Bool;
        }
        let numeric_chars = token
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == '-');
        if numeric_chars && token.chars().any(|c| c.is_ascii_digit()) {
            return Self::Numeric;
        }
        if DATE_SENTINELS.iter().any(|s| token.eq_ignore_ascii_case(s)) {
            return Self::Date;
        }
        Self::String
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "BOOL",
            Self::Numeric => "NUMERIC",
            Self::Date => "DATE",
            Self::String => "STRING",
        }
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_documented_examples() {
        assert_eq!(ValueKind::classify("true"), ValueKind::Bool);
        assert_eq!(ValueKind::classify("123.5"), ValueKind::Numeric);
        assert_eq!(ValueKind::classify("SYSDATE"), ValueKind::Date);
        assert_eq!(ValueKind::classify("abc"), ValueKind::String);
    }

    #[test]
    fn classify_bool_any_case() {
        assert_eq!(ValueKind::classify("FALSE"), ValueKind::Bool);
        assert_eq!(ValueKind::classify("True"), ValueKind::Bool);
    }

    #[test]
    fn classify_numeric_edges() {
        assert_eq!(ValueKind::classify("0"), ValueKind::Numeric);
        assert_eq!(ValueKind::classify("-10"), ValueKind::Numeric);
        assert_eq!(ValueKind::classify("1-2.3"), ValueKind::Numeric);
        assert_eq!(ValueKind::classify("-"), ValueKind::String);
        assert_eq!(ValueKind::classify("."), ValueKind::String);
        assert_eq!(ValueKind::classify("1e5"), ValueKind::String);
    }

    #[test]
    fn classify_date_sentinels() {
        assert_eq!(ValueKind::classify("now()"), ValueKind::Date);
        assert_eq!(ValueKind::classify("Today"), ValueKind::Date);
        assert_eq!(ValueKind::classify("CURRENT_DATE"), ValueKind::Date);
        assert_eq!(ValueKind::classify("2024-01-01"), ValueKind::Numeric);
    }

    #[test]
    fn classify_empty_and_null_tokens() {
        assert_eq!(ValueKind::classify(""), ValueKind::String);
        assert_eq!(ValueKind::classify("NULL"), ValueKind::String);
    }
}
