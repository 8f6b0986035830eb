/// Metadata operator names and the wire codes the renderer expects.
const OPERATOR_CODES: &[(&str, &str)] = &[
    ("required", "ISNN"),
    ("not_null", "ISNN"),
    ("is_null", "ISN"),
    ("equal", "EQ"),
    ("not_equal", "NE"),
    ("greater_than", "GT"),
    ("less_than", "LT"),
    ("greater_equal", "GE"),
    ("less_equal", "LE"),
    ("contains", "CT"),
];

/// Resolves a metadata operator name to its wire code.
///
/// Names match case-insensitively. Unmapped names (including names that
/// already are wire codes, e.g. `GT`) pass through unchanged.
pub fn resolve_operator(name: &str) -> String {
    let trimmed = name.trim();
    OPERATOR_CODES
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(trimmed))
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| trimmed.to_string())
}
