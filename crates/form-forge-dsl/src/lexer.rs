use logos::Logos;

use crate::error::Span;
use crate::token::Token;

/// A token paired with its source span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
    pub text: String,
}

/// The tokens of a single source line.
///
/// Bytes that match no token rule are collected in `invalid` instead of
/// failing the line, so callers can decide how much of it to trust.
#[derive(Debug, Clone, Default)]
pub struct LexedLine {
    pub tokens: Vec<SpannedToken>,
    pub invalid: Vec<Span>,
}

impl LexedLine {
    /// The kind of the `index`-th valid token, if present.
    pub fn kind(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).map(|t| t.token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty() && self.invalid.is_empty()
    }

    /// True when no invalid bytes appear before byte offset `end`.
    pub fn clean_until(&self, end: usize) -> bool {
        self.invalid.iter().all(|span| span.start >= end)
    }
}

/// Tokenizes one line of text.
///
/// `offset` is the byte position of the line within the whole source;
/// all spans are reported relative to the whole source.
pub fn tokenize_line(line: &str, offset: usize) -> LexedLine {
    let mut lexed = LexedLine::default();

    for (result, range) in Token::lexer(line).spanned() {
        let span = Span::new(offset + range.start, offset + range.end);
        match result {
            Ok(token) => lexed.tokens.push(SpannedToken {
                token,
                span,
                text: line[range].to_string(),
            }),
            Err(()) => lexed.invalid.push(span),
        }
    }

    lexed
}

/// Decodes a single-quoted string literal, collapsing `''` into `'`.
pub fn decode_quoted(text: &str) -> String {
    let inner = text
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .unwrap_or(text);
    inner.replace("''", "'")
}

/// Decodes a `#NN` character code. Out-of-range codes decode to nothing.
pub fn decode_char_code(text: &str) -> Option<char> {
    text.strip_prefix('#')
        .and_then(|digits| digits.parse::<u32>().ok())
        .and_then(char::from_u32)
}

/// Strips the quotes from a double-quoted string literal.
pub fn decode_double_quoted(text: &str) -> String {
    text.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(text)
        .replace("\\\"", "\"")
}

/// Extracts the items of a parenthesised string list such as
/// `('Buy' 'Sell')`, decoding each quoted item in order.
///
/// Adjacent literals (`'It'#39's'`) and literals joined with `+` form a
/// single item. Text that is not a parenthesised list yields no items.
pub fn string_list_items(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('(') {
        return Vec::new();
    }

    let mut items = Vec::new();
    let mut current: Option<String> = None;
    let mut joining = false;
    let mut last_end = usize::MAX;
    let mut offset = 0;

    for line in trimmed.split('\n') {
        for token in tokenize_line(line, offset).tokens {
            let piece = match token.token {
                Token::QuotedString => Some(decode_quoted(&token.text)),
                Token::CharCode => Some(
                    decode_char_code(&token.text)
                        .map(String::from)
                        .unwrap_or_default(),
                ),
                Token::Plus => {
                    joining = current.is_some();
                    continue;
                }
                _ => None,
            };

            let contiguous = joining || token.span.start == last_end;
            match piece {
                Some(piece) => match current.take() {
                    Some(mut item) if contiguous => {
                        item.push_str(&piece);
                        current = Some(item);
                    }
                    previous => {
                        items.extend(previous);
                        current = Some(piece);
                    }
                },
                None => {
                    if let Some(item) = current.take() {
                        items.push(item);
                    }
                }
            }
            joining = false;
            last_end = token.span.end;
        }
        offset += line.len() + 1;
    }
    if let Some(item) = current.take() {
        items.push(item);
    }
    items
}
