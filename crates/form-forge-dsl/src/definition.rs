use std::collections::HashSet;

use form_forge_core::is_known_widget_class;
use form_forge_core::types::{ComponentNode, FormProperties, PropertyBag, PropertyValue};

use crate::error::{Recovery, RecoveryKind, Span};
use crate::lexer::{decode_char_code, decode_quoted, tokenize_line, LexedLine, SpannedToken};
use crate::token::Token;

/// The result of parsing a definition file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDefinition {
    /// Attributes of the form header, empty when no header was found.
    pub form: FormProperties,
    /// Every non-header component, in declaration order.
    pub components: Vec<ComponentNode>,
    /// Lines and spans that were skipped or repaired.
    pub recoveries: Vec<Recovery>,
}

/// Parses definition text into form properties and a flat component list.
///
/// Parsing never fails. Nesting is flattened, the form header is pulled
/// out of the component list, and anything unparsable is reported in
/// [`ParsedDefinition::recoveries`].
pub fn parse_definition(source: &str) -> ParsedDefinition {
    let mut parser = DefinitionParser::default();
    let mut offset = 0;

    for (index, raw) in source.split('\n').enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        parser.feed(line, index + 1, offset);
        offset += raw.len() + 1;
    }

    parser.finish(source.len())
}

/// Where the parser is relative to component spans.
#[derive(Debug, Default)]
enum State {
    #[default]
    OutsideComponent,
    InsideComponent,
    InsideMultilineProperty(PendingProperty),
}

/// How a declaration span will be recorded once it closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    /// An `inherited` declaration at the top level.
    Header,
    /// A top-level `object` of a form class; becomes the header if it
    /// encloses others.
    Candidate,
    Component,
    /// Malformed or duplicate; its properties are dropped.
    Discarded,
}

#[derive(Debug)]
struct OpenSpan {
    name: String,
    declared_type: String,
    role: Role,
    slot: Option<usize>,
    has_children: bool,
    properties: PropertyBag,
    line: usize,
    span: Span,
}

#[derive(Debug)]
struct PendingProperty {
    key: String,
    raw: Vec<String>,
    pieces: Vec<(Token, String)>,
    openers: Vec<Token>,
    continued: bool,
    clean: bool,
    line: usize,
    span: Span,
}

impl PendingProperty {
    fn new(key: &str, raw: &str, line: usize, span: Span) -> Self {
        Self {
            key: key.to_string(),
            raw: vec![raw.trim().to_string()],
            pieces: Vec::new(),
            openers: Vec::new(),
            continued: false,
            clean: true,
            line,
            span,
        }
    }

    fn absorb(&mut self, tokens: &[SpannedToken]) {
        for token in tokens {
            if token.token.opens_block() {
                self.openers.push(token.token);
            } else if token.token.closes_block() {
                self.openers.pop();
            }
            self.pieces.push((token.token, token.text.clone()));
        }
        if let Some(last) = tokens.last() {
            self.continued = last.token == Token::Plus;
        }
    }

    fn extend(&mut self, line: &str, lexed: &LexedLine) {
        self.raw.push(line.trim().to_string());
        self.clean &= lexed.invalid.is_empty();
        self.absorb(&lexed.tokens);
        if let Some(last) = lexed.tokens.last() {
            self.span = self.span.join(last.span);
        }
    }

    fn is_complete(&self) -> bool {
        self.openers.is_empty() && !self.continued
    }

    /// A structural line arriving before the value closed.
    ///
    /// Item collections legitimately contain `item`/`end` lines, so only
    /// values outside a collection can be interrupted.
    fn interrupted_by(&self, lexed: &LexedLine) -> bool {
        if self.openers.contains(&Token::LAngle) {
            return false;
        }
        match lexed.kind(0) {
            Some(token) if token.is_declaration_keyword() || token == Token::End => true,
            Some(Token::Ident) => {
                self.openers.is_empty() && lexed.kind(1) == Some(Token::Equals)
            }
            _ => false,
        }
    }

    fn value(&self) -> PropertyValue {
        let raw = self.raw.join("\n");
        if !self.clean {
            return PropertyValue::coerce(raw.trim());
        }

        match self.pieces.as_slice() {
            [] => PropertyValue::Text(String::new()),
            [(Token::QuotedString, text)] => PropertyValue::Text(decode_quoted(text)),
            [(_, text)] => PropertyValue::coerce(text),
            pieces if is_string_expression(pieces) => {
                let mut joined = String::new();
                for (token, text) in pieces {
                    match token {
                        Token::QuotedString => joined.push_str(&decode_quoted(text)),
                        Token::CharCode => joined.extend(decode_char_code(text)),
                        _ => {}
                    }
                }
                PropertyValue::Text(joined)
            }
            _ => PropertyValue::Text(raw.trim().to_string()),
        }
    }
}

fn is_string_expression(pieces: &[(Token, String)]) -> bool {
    pieces
        .iter()
        .all(|(t, _)| matches!(t, Token::QuotedString | Token::CharCode | Token::Plus))
}

#[derive(Debug, Default)]
struct DefinitionParser {
    state: State,
    stack: Vec<OpenSpan>,
    slots: Vec<Option<ComponentNode>>,
    names: HashSet<String>,
    form: Option<FormProperties>,
    recoveries: Vec<Recovery>,
}

impl DefinitionParser {
    fn feed(&mut self, line: &str, line_no: usize, offset: usize) {
        let lexed = tokenize_line(line, offset);
        let line_span = Span::new(offset, offset + line.len());

        match std::mem::take(&mut self.state) {
            State::InsideMultilineProperty(pending) if pending.interrupted_by(&lexed) => {
                self.recover(
                    RecoveryKind::UnterminatedProperty {
                        key: pending.key.clone(),
                    },
                    pending.line,
                    pending.span,
                );
                self.store_property(pending);
                self.state = self.resting_state();
                self.dispatch(line, &lexed, line_no, line_span);
            }
            State::InsideMultilineProperty(mut pending) => {
                pending.extend(line, &lexed);
                if pending.is_complete() {
                    self.store_property(pending);
                    self.state = self.resting_state();
                } else {
                    self.state = State::InsideMultilineProperty(pending);
                }
            }
            State::OutsideComponent | State::InsideComponent => {
                self.state = self.resting_state();
                self.dispatch(line, &lexed, line_no, line_span);
            }
        }
    }

    fn dispatch(&mut self, line: &str, lexed: &LexedLine, line_no: usize, line_span: Span) {
        if lexed.is_empty() {
            return;
        }
        let Some(first) = lexed.tokens.first() else {
            self.recover(RecoveryKind::MalformedLine, line_no, line_span);
            return;
        };
        if !lexed.clean_until(first.span.end) {
            self.recover(RecoveryKind::MalformedLine, line_no, line_span);
            return;
        }

        match first.token {
            token if token.is_declaration_keyword() => {
                self.open_span(lexed, line_no, line_span);
            }
            Token::End => self.close_span(line_no, line_span),
            Token::Ident if lexed.kind(1) == Some(Token::Equals) => {
                self.start_property(line, lexed, line_no, line_span);
            }
            _ => self.recover(RecoveryKind::MalformedLine, line_no, line_span),
        }
    }

    fn open_span(&mut self, lexed: &LexedLine, line_no: usize, line_span: Span) {
        let depth = self.stack.len();
        if let Some(parent) = self.stack.last_mut() {
            parent.has_children = true;
        }

        let Some((keyword, name, declared_type)) = declaration(lexed) else {
            self.recover(RecoveryKind::MalformedLine, line_no, line_span);
            self.push_span(String::new(), String::new(), Role::Discarded, line_no, line_span);
            return;
        };

        let mut role = match keyword {
            Token::Inherited if depth == 0 && self.form.is_none() => Role::Header,
            _ if depth == 0 && self.form.is_none() && !is_known_widget_class(&declared_type) => {
                Role::Candidate
            }
            _ => Role::Component,
        };

        if role != Role::Header && !self.names.insert(name.to_ascii_lowercase()) {
            self.recover(
                RecoveryKind::DuplicateComponent { name: name.clone() },
                line_no,
                line_span,
            );
            role = Role::Discarded;
        }

        self.push_span(name, declared_type, role, line_no, line_span);
    }

    fn push_span(
        &mut self,
        name: String,
        declared_type: String,
        role: Role,
        line: usize,
        span: Span,
    ) {
        let slot = match role {
            Role::Candidate | Role::Component => {
                self.slots.push(None);
                Some(self.slots.len() - 1)
            }
            Role::Header | Role::Discarded => None,
        };
        self.stack.push(OpenSpan {
            name,
            declared_type,
            role,
            slot,
            has_children: false,
            properties: PropertyBag::new(),
            line,
            span,
        });
        self.state = State::InsideComponent;
    }

    fn close_span(&mut self, line_no: usize, line_span: Span) {
        match self.stack.pop() {
            Some(open) => self.record_span(open),
            None => self.recover(RecoveryKind::UnmatchedEnd, line_no, line_span),
        }
        self.state = self.resting_state();
    }

    fn record_span(&mut self, open: OpenSpan) {
        let promote = match open.role {
            Role::Header => true,
            Role::Candidate => open.has_children && self.form.is_none(),
            Role::Component | Role::Discarded => false,
        };

        if promote {
            self.names.remove(&open.name.to_ascii_lowercase());
            self.form = Some(FormProperties {
                name: Some(open.name),
                declared_type: Some(open.declared_type),
                properties: open.properties,
            });
            return;
        }

        if let Some(slot) = open.slot.and_then(|i| self.slots.get_mut(i)) {
            *slot = Some(ComponentNode {
                name: open.name,
                declared_type: open.declared_type,
                properties: open.properties,
            });
        }
    }

    fn start_property(&mut self, line: &str, lexed: &LexedLine, line_no: usize, line_span: Span) {
        let key = &lexed.tokens[0];
        let equals = &lexed.tokens[1];

        if self.stack.is_empty() {
            self.recover(RecoveryKind::MalformedLine, line_no, line_span);
        }

        let value_start = (equals.span.end - line_span.start).min(line.len());
        let mut pending = PendingProperty::new(
            &key.text,
            line.get(value_start..).unwrap_or_default(),
            line_no,
            key.span.join(equals.span),
        );
        let value_tokens = &lexed.tokens[2..];
        pending.clean = lexed.invalid.is_empty();
        pending.absorb(value_tokens);
        if value_tokens.is_empty() {
            // The value starts on the next line.
            pending.continued = true;
        }
        if let Some(last) = value_tokens.last() {
            pending.span = pending.span.join(last.span);
        }

        if pending.is_complete() {
            self.store_property(pending);
        } else {
            self.state = State::InsideMultilineProperty(pending);
        }
    }

    fn store_property(&mut self, pending: PendingProperty) {
        let value = pending.value();
        if let Some(open) = self.stack.last_mut() {
            open.properties.insert(pending.key, value);
        }
    }

    fn resting_state(&self) -> State {
        if self.stack.is_empty() {
            State::OutsideComponent
        } else {
            State::InsideComponent
        }
    }

    fn recover(&mut self, kind: RecoveryKind, line: usize, span: Span) {
        tracing::debug!(line, %span, "definition recovery: {kind}");
        self.recoveries.push(Recovery::new(kind, line, span));
    }

    fn finish(mut self, end: usize) -> ParsedDefinition {
        if let State::InsideMultilineProperty(pending) = std::mem::take(&mut self.state) {
            self.recover(
                RecoveryKind::UnterminatedProperty {
                    key: pending.key.clone(),
                },
                pending.line,
                pending.span,
            );
            self.store_property(pending);
        }

        while let Some(open) = self.stack.pop() {
            if open.role != Role::Discarded {
                self.recover(
                    RecoveryKind::UnterminatedSpan {
                        name: open.name.clone(),
                    },
                    open.line,
                    Span::new(open.span.start, end),
                );
            }
            self.record_span(open);
        }

        let components: Vec<ComponentNode> = self.slots.into_iter().flatten().collect();
        tracing::debug!(
            components = components.len(),
            recoveries = self.recoveries.len(),
            "parsed definition"
        );

        ParsedDefinition {
            form: self.form.unwrap_or_default(),
            components,
            recoveries: self.recoveries,
        }
    }
}

/// Splits `object Name: Type` (optionally followed by `[n]`) into its parts.
fn declaration(lexed: &LexedLine) -> Option<(Token, String, String)> {
    if !lexed.invalid.is_empty() {
        return None;
    }
    let kinds: Vec<Token> = lexed.tokens.iter().map(|t| t.token).collect();
    let well_formed = match kinds.as_slice() {
        [_, Token::Ident, Token::Colon, Token::Ident] => true,
        [_, Token::Ident, Token::Colon, Token::Ident, Token::LBracket, Token::Digits, Token::RBracket] => {
            true
        }
        _ => false,
    };
    well_formed.then(|| {
        (
            kinds[0],
            lexed.tokens[1].text.clone(),
            lexed.tokens[3].text.clone(),
        )
    })
}
