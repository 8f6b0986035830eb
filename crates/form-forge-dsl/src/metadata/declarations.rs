use form_forge_core::types::OperatorRecord;

use super::numbered_lines;
use crate::error::{Recovery, RecoveryKind};
use crate::lexer::{decode_double_quoted, tokenize_line};
use crate::token::Token;

/// Operator and type names read from declaration blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperatorCatalog {
    pub logical_operators: Vec<String>,
    pub operators: Vec<OperatorRecord>,
    pub types: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Block {
    LogicalOperator,
    Operators,
    Types,
}

/// Recognizes a line that opens a declaration block.
///
/// The keyword may be surrounded by modifiers and braces, e.g.
/// `public enum Operators {`.
pub(super) fn section_keyword(line: &str) -> Option<Block> {
    let lexed = tokenize_line(line, 0);
    if lexed.tokens.first().map(|t| t.token) == Some(Token::LBracket) {
        return None;
    }

    let mut block = None;
    for token in &lexed.tokens {
        match (token.token, token.text.as_str()) {
            (Token::Ident, "LogicalOperator") => block = Some(Block::LogicalOperator),
            (Token::Ident, "Operators") => block = Some(Block::Operators),
            (Token::Ident, "Types") => block = Some(Block::Types),
            (Token::Ident, "public" | "internal" | "enum") => {}
            (Token::LBrace | Token::RBrace, _) => {}
            _ => return None,
        }
    }
    block
}

/// Parses the `LogicalOperator` / `Operators` / `Types` block shape.
pub fn parse_declarations(source: &str) -> (OperatorCatalog, Vec<Recovery>) {
    let mut catalog = OperatorCatalog::default();
    let mut recoveries = Vec::new();
    let mut block: Option<Block> = None;

    for (line_no, span, line) in numbered_lines(source) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(next) = section_keyword(trimmed) {
            block = Some(next);
            continue;
        }
        if trimmed.starts_with('{') || trimmed.starts_with('}') {
            continue;
        }

        let item = strip_item(trimmed);
        if item.is_empty() {
            continue;
        }
        let Some(current) = block else {
            recoveries.push(Recovery::new(RecoveryKind::RowOutsideSection, line_no, span));
            continue;
        };

        match current {
            Block::Operators => match annotated_operator(item) {
                Some(record) => catalog.operators.push(record),
                None if !item.starts_with('[') => catalog.operators.push(OperatorRecord {
                    code: item.to_string(),
                    display_name: item.to_string(),
                }),
                None => recoveries.push(Recovery::new(RecoveryKind::MalformedLine, line_no, span)),
            },
            Block::LogicalOperator | Block::Types if item.starts_with('[') => {}
            Block::LogicalOperator => catalog.logical_operators.push(item.to_string()),
            Block::Types => catalog.types.push(item.to_string()),
        }
    }

    for recovery in &recoveries {
        tracing::debug!(line = recovery.line, "metadata recovery: {}", recovery.kind);
    }
    (catalog, recoveries)
}

/// Drops a trailing `//` comment and list comma.
fn strip_item(line: &str) -> &str {
    let without_comment = match line.find("//") {
        Some(index) => &line[..index],
        None => line,
    };
    without_comment.trim().trim_end_matches(',').trim_end()
}

/// Extracts `[EnumMember(Value = "CODE")] NAME` into a code/name pair.
fn annotated_operator(item: &str) -> Option<OperatorRecord> {
    let lexed = tokenize_line(item, 0);
    let tokens = &lexed.tokens;
    if tokens.first()?.token != Token::LBracket {
        return None;
    }

    let close = tokens.iter().position(|t| t.token == Token::RBracket)?;
    let code = tokens[..close].windows(3).find_map(|w| {
        let is_value = w[0].token == Token::Ident
            && w[0].text == "Value"
            && w[1].token == Token::Equals
            && w[2].token == Token::DoubleQuotedString;
        is_value.then(|| decode_double_quoted(&w[2].text))
    })?;
    let name = tokens[close + 1..]
        .iter()
        .find(|t| t.token == Token::Ident)?;

    Some(OperatorRecord {
        code,
        display_name: name.text.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
public enum LogicalOperator
{
    AND,
    OR, // either side
}

public enum Operators
{
    [EnumMember(Value = "EQUAL")] EQ,     //EQUAL
    [EnumMember(Value = "GT")]
    GreaterThan,
    ISN,
}

public enum Types
{
    NUMERIC,
    DATE,
    [Obsolete]
    STRING
}
"#;

    #[test]
    fn parses_logical_operators() {
        let (catalog, _) = parse_declarations(SAMPLE);
        assert_eq!(catalog.logical_operators, vec!["AND", "OR"]);
    }

    #[test]
    fn annotated_operator_extracts_code_and_name() {
        let (catalog, _) = parse_declarations(SAMPLE);
        assert_eq!(
            catalog.operators[0],
            OperatorRecord {
                code: "EQUAL".into(),
                display_name: "EQ".into(),
            }
        );
    }

    #[test]
    fn annotation_on_its_own_line_is_reported() {
        let (catalog, recoveries) = parse_declarations(SAMPLE);
        // `[EnumMember(Value = "GT")]` alone has no name after it.
        assert_eq!(catalog.operators[1].code, "GreaterThan");
        assert_eq!(recoveries.len(), 1);
        assert_eq!(recoveries[0].kind, RecoveryKind::MalformedLine);
    }

    #[test]
    fn plain_operator_uses_line_for_both() {
        let (catalog, _) = parse_declarations(SAMPLE);
        let isn = &catalog.operators[2];
        assert_eq!(isn.code, "ISN");
        assert_eq!(isn.display_name, "ISN");
    }

    #[test]
    fn types_skip_attributes() {
        let (catalog, _) = parse_declarations(SAMPLE);
        assert_eq!(catalog.types, vec!["NUMERIC", "DATE", "STRING"]);
    }

    #[test]
    fn section_keyword_variants() {
        assert_eq!(section_keyword("Operators"), Some(Block::Operators));
        assert_eq!(
            section_keyword("internal enum Types {"),
            Some(Block::Types)
        );
        assert_eq!(section_keyword("EQ,"), None);
        assert_eq!(section_keyword("[Operators]"), None);
        assert_eq!(section_keyword("public enum Colors"), None);
    }

    #[test]
    fn strip_item_removes_comment_and_comma() {
        assert_eq!(strip_item("EQ,     //EQUAL"), "EQ");
        assert_eq!(strip_item("// only a comment"), "");
        assert_eq!(strip_item("NE"), "NE");
    }
}
