//! Style-sheet lexer.
//!
//! logos picks the longest match, so `#ff00aa` is one [`Token::HexColor`] and
//! `0.325em` one [`Token::Dimension`]. Fractional literals are
//! [`Token::Number`]; whole ones are [`Token::Integer`], which the value
//! grammar needs to tell channels from alpha.
//!
//! Pseudo-classes are not a token of their own: `button:hover` lexes as
//! `Ident Colon Ident` and the parser glues adjacent tokens back together.

use logos::Logos;

/// Style-sheet token produced by the lexer.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r\f]+")]
pub enum Token {
    /// `!important` flag.
    #[token("!important")]
    Important,

    /// At-keyword: `@media`, `@font-face`, etc.
    #[regex(r"@[a-zA-Z][a-zA-Z0-9_-]*")]
    AtKeyword,

    /// Hex color: `#fff`, `#ff00aa`, `#ff00aa80` (3-8 hex digits).
    #[regex(r"#[0-9a-fA-F]{3,8}")]
    HexColor,

    /// Dimension: number with unit suffix like `0.325em`, `10px`, `50%`.
    #[regex(r"-?([0-9]+|[0-9]*\.[0-9]+)([a-zA-Z]+|%)")]
    Dimension,

    /// Double-quoted string literal.
    #[regex(r#""[^"]*""#)]
    StringLiteral,

    /// Single-quoted string literal.
    #[regex(r"'[^']*'")]
    StringLiteralSingle,

    /// Number with a fractional part: `0.5`, `.125`, `-1.0`.
    #[regex(r"-?[0-9]*\.[0-9]+")]
    Number,

    /// Whole number: `0`, `255`, `-3`.
    #[regex(r"-?[0-9]+")]
    Integer,

    /// Identifier: property names, selector names, function names.
    #[regex(r"-?[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    // ── Punctuation ──────────────────────────────────────────────────
    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token(":")]
    Colon,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(".")]
    Dot,

    #[token("#")]
    Hash,

    #[token("*")]
    Star,

    #[token(">")]
    GreaterThan,

    #[token("+")]
    Plus,

    #[token("/")]
    Slash,
}

/// Tokenize a style-sheet string into a vector of `(Token, String)` pairs.
///
/// Characters that fail to lex are skipped.
pub fn tokenize(input: &str) -> Vec<(Token, String)> {
    let lexer = Token::lexer(input);
    lexer
        .spanned()
        .filter_map(|(result, span)| result.ok().map(|token| (token, input[span].to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).into_iter().map(|(t, _)| t).collect()
    }

    // ── Punctuation ──────────────────────────────────────────────────

    #[test]
    fn test_punctuation() {
        assert_eq!(
            tokens("{ } ( ) : ; , . # * > + /"),
            vec![
                Token::BraceOpen,
                Token::BraceClose,
                Token::ParenOpen,
                Token::ParenClose,
                Token::Colon,
                Token::Semicolon,
                Token::Comma,
                Token::Dot,
                Token::Hash,
                Token::Star,
                Token::GreaterThan,
                Token::Plus,
                Token::Slash,
            ]
        );
    }

    // ── Identifiers ──────────────────────────────────────────────────

    #[test]
    fn test_hyphenated_idents() {
        let result = tokenize("check-box background-color -webkit-thing");
        assert_eq!(result[0], (Token::Ident, "check-box".into()));
        assert_eq!(result[1], (Token::Ident, "background-color".into()));
        assert_eq!(result[2], (Token::Ident, "-webkit-thing".into()));
    }

    #[test]
    fn test_selector_with_state() {
        let result = tokenize("sprite-button:hover");
        assert_eq!(
            result,
            vec![
                (Token::Ident, "sprite-button".into()),
                (Token::Colon, ":".into()),
                (Token::Ident, "hover".into()),
            ]
        );
    }

    // ── Numbers ──────────────────────────────────────────────────────

    #[test]
    fn test_integers_and_numbers() {
        let result = tokenize("255 -3 0.5 .125 1.0");
        assert_eq!(result[0], (Token::Integer, "255".into()));
        assert_eq!(result[1], (Token::Integer, "-3".into()));
        assert_eq!(result[2], (Token::Number, "0.5".into()));
        assert_eq!(result[3], (Token::Number, ".125".into()));
        assert_eq!(result[4], (Token::Number, "1.0".into()));
    }

    #[test]
    fn test_dimensions() {
        let result = tokenize("0.325em 10px 50% .5em");
        assert_eq!(result[0], (Token::Dimension, "0.325em".into()));
        assert_eq!(result[1], (Token::Dimension, "10px".into()));
        assert_eq!(result[2], (Token::Dimension, "50%".into()));
        assert_eq!(result[3], (Token::Dimension, ".5em".into()));
    }

    // ── Hex colors ───────────────────────────────────────────────────

    #[test]
    fn test_hex_color_priority_over_hash() {
        assert_eq!(tokens("#112233"), vec![Token::HexColor]);
        assert_eq!(tokens("#main"), vec![Token::Hash, Token::Ident]);
    }

    // ── Functions and strings ────────────────────────────────────────

    #[test]
    fn test_rgba_function() {
        assert_eq!(
            tokens("rgba(22, 25, 35, 1.0)"),
            vec![
                Token::Ident,
                Token::ParenOpen,
                Token::Integer,
                Token::Comma,
                Token::Integer,
                Token::Comma,
                Token::Integer,
                Token::Comma,
                Token::Number,
                Token::ParenClose,
            ]
        );
    }

    #[test]
    fn test_url_function_with_quoted_args() {
        let result = tokenize(r#"url('commonmenu', "gradient_bgd")"#);
        assert_eq!(result[0], (Token::Ident, "url".into()));
        assert_eq!(
            result[2],
            (Token::StringLiteralSingle, "'commonmenu'".into())
        );
        assert_eq!(result[4], (Token::StringLiteral, "\"gradient_bgd\"".into()));
    }

    // ── Misc ─────────────────────────────────────────────────────────

    #[test]
    fn test_important_and_at_keyword() {
        assert_eq!(
            tokens("@media color: red !important;"),
            vec![
                Token::AtKeyword,
                Token::Ident,
                Token::Colon,
                Token::Ident,
                Token::Important,
                Token::Semicolon,
            ]
        );
    }

    #[test]
    fn test_unlexable_characters_are_skipped() {
        assert_eq!(tokens("color ~ ^ red"), vec![Token::Ident, Token::Ident]);
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokens("  \t\n ").is_empty());
    }
}
