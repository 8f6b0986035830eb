use logos::Logos;

/// Tokens produced by the line lexer.
///
/// The lexer runs on one line at a time; horizontal whitespace and `//`
/// comments are skipped automatically by logos.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"//[^\n]*")]
pub enum Token {
    // -- Keywords (case-insensitive) --
    #[token("object", ignore(ascii_case))]
    Object,

    #[token("inherited", ignore(ascii_case))]
    Inherited,

    #[token("inline", ignore(ascii_case))]
    Inline,

    #[token("end", ignore(ascii_case))]
    End,

    #[token("item", ignore(ascii_case))]
    Item,

    // -- Punctuation --
    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token("<")]
    LAngle,

    #[token(">")]
    RAngle,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token(":")]
    Colon,

    #[token("=")]
    Equals,

    #[token(",")]
    Comma,

    #[token("+")]
    Plus,

    // -- Literals --
    /// A single-quoted string with `''` as the escaped quote, e.g. `'It''s'`.
    #[regex(r"'([^'\n]|'')*'")]
    QuotedString,

    /// A double-quoted string, e.g. `"EQUAL"`.
    #[regex(r#""([^"\\\n]|\\.)*""#)]
    DoubleQuotedString,

    /// A character code, e.g. `#39`.
    #[regex(r"#[0-9]+")]
    CharCode,

    /// A hexadecimal literal, e.g. `$00C0C0C0`.
    #[regex(r"\$[0-9A-Fa-f]+")]
    HexLiteral,

    /// An unsigned run of digits, e.g. `958`.
    #[regex(r"[0-9]+")]
    Digits,

    /// A signed or fractional number, e.g. `-8` or `1.5`.
    #[regex(r"-?[0-9]+\.[0-9]+|-[0-9]+")]
    Number,

    // -- Identifiers --
    /// A possibly dotted identifier, e.g. `Caption` or `Items.Strings`.
    /// Component names may use any Unicode letters.
    #[regex(r"[\p{XID_Start}_]\p{XID_Continue}*(\.[\p{XID_Start}_]\p{XID_Continue}*)*")]
    Ident,
}

impl Token {
    /// Returns a human-readable description of this token kind.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Object => "'object'",
            Self::Inherited => "'inherited'",
            Self::Inline => "'inline'",
            Self::End => "'end'",
            Self::Item => "'item'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LAngle => "'<'",
            Self::RAngle => "'>'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::Colon => "':'",
            Self::Equals => "'='",
            Self::Comma => "','",
            Self::Plus => "'+'",
            Self::QuotedString => "quoted string",
            Self::DoubleQuotedString => "double-quoted string",
            Self::CharCode => "character code",
            Self::HexLiteral => "hex literal",
            Self::Digits => "integer literal",
            Self::Number => "number literal",
            Self::Ident => "identifier",
        }
    }

    /// Starts a component declaration.
    pub fn is_declaration_keyword(&self) -> bool {
        matches!(self, Self::Object | Self::Inherited | Self::Inline)
    }

    /// Opens a bracketed value that may span several lines.
    pub fn opens_block(&self) -> bool {
        matches!(self, Self::LParen | Self::LAngle | Self::LBrace)
    }

    pub fn closes_block(&self) -> bool {
        matches!(self, Self::RParen | Self::RAngle | Self::RBrace)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Token::lexer(input).map(|r| r.expect("lex error")).collect()
    }

    #[test]
    fn keywords() {
        let tokens = lex("object inherited inline end item");
        assert_eq!(
            tokens,
            vec![
                Token::Object,
                Token::Inherited,
                Token::Inline,
                Token::End,
                Token::Item,
            ]
        );
    }

    #[test]
    fn keyword_prefixes_are_identifiers() {
        let tokens = lex("objectName endDate items");
        assert_eq!(tokens, vec![Token::Ident, Token::Ident, Token::Ident]);
    }

    #[test]
    fn keywords_ignore_case() {
        let tokens = lex("OBJECT Inherited INLINE End ITEM");
        assert_eq!(
            tokens,
            vec![
                Token::Object,
                Token::Inherited,
                Token::Inline,
                Token::End,
                Token::Item,
            ]
        );
        assert_eq!(lex("Objects ENDING"), vec![Token::Ident, Token::Ident]);
    }

    #[test]
    fn unicode_identifiers() {
        let tokens = lex("object edtÉchéance: TEdit");
        assert_eq!(
            tokens,
            vec![Token::Object, Token::Ident, Token::Colon, Token::Ident]
        );
        let mut lexer = Token::lexer("Größe_1.Wert");
        assert_eq!(lexer.next(), Some(Ok(Token::Ident)));
        assert_eq!(lexer.slice(), "Größe_1.Wert");
    }

    #[test]
    fn punctuation() {
        let tokens = lex("( ) < > { } [ ] : = , +");
        assert_eq!(
            tokens,
            vec![
                Token::LParen,
                Token::RParen,
                Token::LAngle,
                Token::RAngle,
                Token::LBrace,
                Token::RBrace,
                Token::LBracket,
                Token::RBracket,
                Token::Colon,
                Token::Equals,
                Token::Comma,
                Token::Plus,
            ]
        );
    }

    #[test]
    fn declaration_line() {
        let tokens = lex("object fndlkup1: TMFWFndAliasLookup");
        assert_eq!(
            tokens,
            vec![Token::Object, Token::Ident, Token::Colon, Token::Ident]
        );
    }

    #[test]
    fn dotted_identifier_is_one_token() {
        let tokens = lex("Items.Strings = (");
        assert_eq!(tokens, vec![Token::Ident, Token::Equals, Token::LParen]);
    }

    #[test]
    fn quoted_string_with_escaped_quote() {
        let tokens = lex("'It''s here'");
        assert_eq!(tokens, vec![Token::QuotedString]);
    }

    #[test]
    fn numbers() {
        let tokens = lex("958 -8 1.5 $00C0C0C0 #39");
        assert_eq!(
            tokens,
            vec![
                Token::Digits,
                Token::Number,
                Token::Number,
                Token::HexLiteral,
                Token::CharCode,
            ]
        );
    }

    #[test]
    fn line_comments_skipped() {
        let tokens = lex("EQ, // EQUAL");
        assert_eq!(tokens, vec![Token::Ident, Token::Comma]);
    }

    #[test]
    fn annotated_operator() {
        let tokens = lex(r#"[EnumMember(Value = "EQUAL")] EQ,"#);
        assert_eq!(
            tokens,
            vec![
                Token::LBracket,
                Token::Ident,
                Token::LParen,
                Token::Ident,
                Token::Equals,
                Token::DoubleQuotedString,
                Token::RParen,
                Token::RBracket,
                Token::Ident,
                Token::Comma,
            ]
        );
    }

    #[test]
    fn block_classification() {
        assert!(Token::LAngle.opens_block());
        assert!(Token::RBrace.closes_block());
        assert!(!Token::LBracket.opens_block());
        assert!(Token::Inline.is_declaration_keyword());
        assert!(!Token::End.is_declaration_keyword());
    }

    #[test]
    fn description_is_human_readable() {
        assert_eq!(Token::Object.description(), "'object'");
        assert_eq!(Token::Ident.description(), "identifier");
        assert_eq!(Token::QuotedString.description(), "quoted string");
    }
}
