//! Recursive descent style-sheet parser.
//!
//! Parses sheet text into a [`StyleSheet`] (a vector of [`RuleSet`]s). Uses the
//! logos-based tokenizer from [`crate::style::tokenizer`].
//!
//! The grammar is a lenient subset of CSS: `/* */` comments are stripped,
//! at-rules are skipped wholesale, and declaration values may hold any token
//! sequence so that properties this crate does not know about still parse.

use logos::Logos;

use crate::style::model::*;
use crate::style::tokenizer::Token;

/// Errors from style-sheet parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("unexpected token at position {position}: {message}")]
    UnexpectedToken { position: usize, message: String },
    #[error("unexpected end of input: {0}")]
    UnexpectedEof(String),
}

/// A positioned token with byte-level span information for adjacency detection.
#[derive(Debug, Clone)]
struct PToken {
    token: Token,
    text: String,
    /// Index in the token stream (for error reporting).
    pos: usize,
    byte_start: usize,
    byte_end: usize,
}

/// Strip block comments (`/* ... */`) from the input, replacing each comment
/// with a single space. An unterminated comment swallows the rest of the input.
fn strip_comments(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("/*") {
        result.push_str(&rest[..start]);
        result.push(' ');
        match rest[start + 2..].find("*/") {
            Some(end) => rest = &rest[start + 2 + end + 2..],
            None => return result,
        }
    }

    result.push_str(rest);
    result
}

/// Tokenize input using logos with span information preserved.
fn tokenize_with_spans(input: &str) -> Vec<PToken> {
    let lexer = Token::lexer(input);
    let mut tokens = Vec::new();
    let mut idx = 0;

    for (result, span) in lexer.spanned() {
        match result {
            Ok(token) => {
                tokens.push(PToken {
                    text: input[span.clone()].to_string(),
                    token,
                    pos: idx,
                    byte_start: span.start,
                    byte_end: span.end,
                });
                idx += 1;
            }
            Err(()) => {
                tracing::trace!(
                    text = &input[span.clone()],
                    offset = span.start,
                    "skipping unlexable input"
                );
            }
        }
    }

    tokens
}

/// Parse a style-sheet string into a [`StyleSheet`].
pub fn parse_sheet(input: &str) -> Result<StyleSheet, ParseError> {
    let cleaned = strip_comments(input);
    let tokens = tokenize_with_spans(&cleaned);

    let mut parser = Parser { tokens, cursor: 0 };

    let mut rules = Vec::new();
    while !parser.is_eof() {
        if parser.peek().is_some_and(|t| t.token == Token::AtKeyword) {
            parser.skip_at_rule()?;
            continue;
        }
        rules.push(parser.parse_rule()?);
    }

    Ok(StyleSheet { rules })
}

/// Recursive descent parser state.
struct Parser {
    tokens: Vec<PToken>,
    cursor: usize,
}

impl Parser {
    fn is_eof(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    fn peek(&self) -> Option<&PToken> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&PToken> {
        if self.cursor < self.tokens.len() {
            let tok = &self.tokens[self.cursor];
            self.cursor += 1;
            Some(tok)
        } else {
            None
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<PToken, ParseError> {
        match self.advance() {
            Some(tok) if &tok.token == expected => Ok(tok.clone()),
            Some(tok) => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!(
                    "expected {:?}, got {:?} '{}'",
                    expected, tok.token, tok.text
                ),
            }),
            None => Err(ParseError::UnexpectedEof(format!("expected {:?}", expected))),
        }
    }

    fn current_pos(&self) -> usize {
        self.peek().map(|t| t.pos).unwrap_or(self.tokens.len())
    }

    /// Returns `true` if the current token is immediately adjacent (no whitespace)
    /// to the previous token.
    fn is_adjacent(&self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let prev = &self.tokens[self.cursor - 1];
        match self.peek() {
            Some(curr) => curr.byte_start == prev.byte_end,
            None => false,
        }
    }

    /// Skip an at-rule: everything up to a terminating `;` or through a
    /// balanced `{ ... }` block.
    fn skip_at_rule(&mut self) -> Result<(), ParseError> {
        let keyword = self.expect(&Token::AtKeyword)?;
        tracing::trace!(at_rule = %keyword.text, "skipping at-rule");

        let mut depth = 0usize;
        loop {
            let tok = self.advance().ok_or_else(|| {
                ParseError::UnexpectedEof(format!("unterminated at-rule {}", keyword.text))
            })?;
            match tok.token {
                Token::Semicolon if depth == 0 => return Ok(()),
                Token::BraceOpen => depth += 1,
                Token::BraceClose => {
                    if depth == 0 {
                        return Err(ParseError::UnexpectedToken {
                            position: tok.pos,
                            message: format!("unbalanced '}}' in at-rule {}", keyword.text),
                        });
                    }
                    depth -= 1;
                    if depth == 0 {
                        return Ok(());
                    }
                }
                _ => {}
            }
        }
    }

    /// Parse a single rule: selector(s) `{` declarations `}`.
    fn parse_rule(&mut self) -> Result<RuleSet, ParseError> {
        let selectors = self.parse_selector_list()?;
        self.expect(&Token::BraceOpen)?;
        let declarations = self.parse_declarations()?;
        self.expect(&Token::BraceClose)?;

        Ok(RuleSet {
            selectors,
            declarations,
        })
    }

    /// Parse a comma-separated list of selectors (before `{`).
    fn parse_selector_list(&mut self) -> Result<Vec<Selector>, ParseError> {
        let mut selectors = vec![self.parse_selector()?];

        while self.peek().is_some_and(|t| t.token == Token::Comma) {
            self.advance();
            selectors.push(self.parse_selector()?);
        }

        Ok(selectors)
    }

    /// Parse a single selector up to the next `,` or `{`.
    ///
    /// Adjacent tokens are concatenated, so `check-box:hover` stays one unit;
    /// a whitespace gap becomes a single space (`window label`).
    fn parse_selector(&mut self) -> Result<Selector, ParseError> {
        let mut text = String::new();

        loop {
            let adjacent = self.is_adjacent();
            match self.peek() {
                None => {
                    return Err(ParseError::UnexpectedEof("expected '{' after selector".into()));
                }
                Some(t) if matches!(t.token, Token::Comma | Token::BraceOpen) => break,
                Some(t) if matches!(t.token, Token::BraceClose | Token::Semicolon) => {
                    return Err(ParseError::UnexpectedToken {
                        position: t.pos,
                        message: format!("unexpected '{}' in selector", t.text),
                    });
                }
                Some(t) => {
                    if !text.is_empty() && !adjacent {
                        text.push(' ');
                    }
                    text.push_str(&t.text);
                    self.advance();
                }
            }
        }

        if text.is_empty() {
            return Err(ParseError::UnexpectedToken {
                position: self.current_pos(),
                message: "expected selector".into(),
            });
        }

        Ok(Selector::new(text))
    }

    /// Parse declarations between `{` and `}`.
    fn parse_declarations(&mut self) -> Result<Vec<Declaration>, ParseError> {
        let mut declarations = Vec::new();

        loop {
            match self.peek() {
                None => break,
                Some(t) if t.token == Token::BraceClose => break,
                // Stray semicolons (`;;`) are harmless.
                Some(t) if t.token == Token::Semicolon => {
                    self.advance();
                }
                Some(_) => declarations.push(self.parse_declaration()?),
            }
        }

        Ok(declarations)
    }

    /// Parse a single declaration: `property: value1 value2 [!important];`
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let prop_tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected property name".into()))?;
        if prop_tok.token != Token::Ident {
            return Err(ParseError::UnexpectedToken {
                position: prop_tok.pos,
                message: format!(
                    "expected property name, got {:?} '{}'",
                    prop_tok.token, prop_tok.text
                ),
            });
        }
        let property = prop_tok.text.clone();

        self.expect(&Token::Colon)?;

        let mut values = Vec::new();
        let mut important = false;

        loop {
            match self.peek() {
                None => break,
                Some(t) if matches!(t.token, Token::Semicolon | Token::BraceClose) => break,
                Some(t) if t.token == Token::Important => {
                    self.advance();
                    important = true;
                    break;
                }
                Some(_) => values.push(self.parse_declaration_value()?),
            }
        }

        if self.peek().is_some_and(|t| t.token == Token::Semicolon) {
            self.advance();
        }

        Ok(Declaration {
            property,
            values,
            important,
        })
    }

    /// Parse a single value into a [`DeclarationValue`], recursing into function
    /// arguments.
    fn parse_declaration_value(&mut self) -> Result<DeclarationValue, ParseError> {
        let tok = self
            .advance()
            .ok_or_else(|| ParseError::UnexpectedEof("expected declaration value".into()))?
            .clone();

        match &tok.token {
            Token::Integer => {
                let n: i64 = tok.text.parse().map_err(|_| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("invalid integer: {}", tok.text),
                })?;
                Ok(DeclarationValue::Integer(n))
            }
            Token::Number => {
                let n: f64 = tok.text.parse().map_err(|_| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("invalid number: {}", tok.text),
                })?;
                Ok(DeclarationValue::Number(n))
            }
            Token::Dimension => {
                let (num_str, unit_str) =
                    split_dimension(&tok.text).ok_or_else(|| ParseError::UnexpectedToken {
                        position: tok.pos,
                        message: format!("invalid dimension: {}", tok.text),
                    })?;
                let n: f64 = num_str.parse().map_err(|_| ParseError::UnexpectedToken {
                    position: tok.pos,
                    message: format!("invalid number in dimension: {num_str}"),
                })?;
                Ok(DeclarationValue::Dimension(n, unit_str.to_string()))
            }
            Token::Ident => {
                if self.is_adjacent() && self.peek().is_some_and(|t| t.token == Token::ParenOpen) {
                    self.advance();
                    let args = self.parse_function_args()?;
                    return Ok(DeclarationValue::Function {
                        name: tok.text,
                        args,
                    });
                }
                Ok(DeclarationValue::Ident(tok.text))
            }
            Token::ParenOpen => {
                let args = self.parse_function_args()?;
                Ok(DeclarationValue::Function {
                    name: String::new(),
                    args,
                })
            }
            Token::HexColor => {
                let hex = tok.text.strip_prefix('#').unwrap_or(&tok.text);
                Ok(DeclarationValue::Color(hex.to_string()))
            }
            Token::StringLiteral | Token::StringLiteralSingle => {
                let inner = &tok.text[1..tok.text.len() - 1];
                Ok(DeclarationValue::String(inner.to_string()))
            }
            Token::Comma
            | Token::Dot
            | Token::Hash
            | Token::Star
            | Token::GreaterThan
            | Token::Plus
            | Token::Slash
            | Token::Colon => {
                let c = tok.text.chars().next().unwrap_or(' ');
                Ok(DeclarationValue::Delim(c))
            }
            other => Err(ParseError::UnexpectedToken {
                position: tok.pos,
                message: format!(
                    "unexpected token in declaration value: {:?} '{}'",
                    other, tok.text
                ),
            }),
        }
    }

    /// Parse function arguments after the opening `(` through the closing `)`.
    fn parse_function_args(&mut self) -> Result<Vec<Vec<DeclarationValue>>, ParseError> {
        let mut args: Vec<Vec<DeclarationValue>> = Vec::new();
        let mut current = Vec::new();

        loop {
            match self.peek() {
                None => {
                    return Err(ParseError::UnexpectedEof("expected ')' to close function".into()));
                }
                Some(t) if t.token == Token::ParenClose => {
                    self.advance();
                    break;
                }
                Some(t) if t.token == Token::Comma => {
                    self.advance();
                    args.push(std::mem::take(&mut current));
                }
                Some(t) if closes_block(&t.token) => {
                    return Err(ParseError::UnexpectedToken {
                        position: t.pos,
                        message: format!("unexpected '{}' inside function arguments", t.text),
                    });
                }
                Some(_) => current.push(self.parse_declaration_value()?),
            }
        }

        if !current.is_empty() || !args.is_empty() {
            args.push(current);
        }

        Ok(args)
    }
}

/// Whether `token` opens or ends a block or declaration.
fn closes_block(token: &Token) -> bool {
    matches!(
        token,
        Token::Semicolon | Token::BraceOpen | Token::BraceClose
    )
}

/// Split a dimension string like "0.325em" or "50%" into (number_part, unit_part).
fn split_dimension(s: &str) -> Option<(&str, &str)> {
    let unit_start = s
        .char_indices()
        .find(|(i, c)| !c.is_ascii_digit() && *c != '.' && !(*c == '-' && *i == 0))
        .map(|(i, _)| i)?;

    if unit_start == 0 || unit_start >= s.len() {
        return None;
    }

    Some((&s[..unit_start], &s[unit_start..]))
}
