//! Style-sheet AST: StyleSheet, RuleSet, Selector, Declaration.

use std::fmt;

/// A selector as written in the sheet, normalized to single spaces between
/// non-adjacent tokens.
///
/// Widget selectors are simple (`button`, `button:hover`), so the text itself
/// is the lookup key; anything more complex simply never matches a known name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Selector {
    text: String,
}

impl Selector {
    /// Create a selector from its normalized text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The selector text, e.g. `"check-box:hover"`.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A value token within a declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationValue {
    /// An identifier like `red`, `auto`.
    Ident(String),
    /// A whole number like `0`, `255`.
    Integer(i64),
    /// A number with a fractional part like `0.5`.
    Number(f64),
    /// A number with a unit suffix like `0.325em`, `50%`.
    Dimension(f64, String),
    /// A hex color string (without the `#` prefix), e.g. `"ff00aa"`.
    Color(String),
    /// A quoted string value, quotes removed.
    String(String),
    /// A function call like `rgba(1, 2, 3, 0.5)`; arguments are split on commas.
    Function {
        name: String,
        args: Vec<Vec<DeclarationValue>>,
    },
    /// Any other punctuation appearing in a value, e.g. `,` or `/`.
    Delim(char),
}

impl fmt::Display for DeclarationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationValue::Ident(name) => f.write_str(name),
            DeclarationValue::Integer(n) => write!(f, "{n}"),
            DeclarationValue::Number(n) => write!(f, "{n}"),
            DeclarationValue::Dimension(n, unit) => write!(f, "{n}{unit}"),
            DeclarationValue::Color(hex) => write!(f, "#{hex}"),
            DeclarationValue::String(s) => write!(f, "'{s}'"),
            DeclarationValue::Function { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write_values(f, arg)?;
                }
                f.write_str(")")
            }
            DeclarationValue::Delim(c) => write!(f, "{c}"),
        }
    }
}

/// Write space-separated values, as they would appear in a declaration.
pub(crate) fn write_values(f: &mut fmt::Formatter<'_>, values: &[DeclarationValue]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

/// A single property declaration, e.g. `color: #112233`.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// The property name, e.g. `"color"`, `"font-size"`.
    pub property: String,
    /// The declaration values.
    pub values: Vec<DeclarationValue>,
    /// Whether `!important` was specified. Accepted but has no effect on resolution.
    pub important: bool,
}

impl Declaration {
    /// Create a new declaration.
    pub fn new(property: String, values: Vec<DeclarationValue>, important: bool) -> Self {
        Self {
            property,
            values,
            important,
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.property)?;
        write_values(f, &self.values)?;
        if self.important {
            f.write_str(" !important")?;
        }
        Ok(())
    }
}

/// A rule: one or more selectors paired with declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    /// The selectors for this rule (comma-separated in the sheet).
    pub selectors: Vec<Selector>,
    /// The property declarations inside the `{ ... }` block.
    pub declarations: Vec<Declaration>,
}

/// A parsed style sheet: a list of rule sets in source order.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    pub rules: Vec<RuleSet>,
}

impl StyleSheet {
    /// Create an empty style sheet.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_display_matches_text() {
        let sel = Selector::new("button:hover");
        assert_eq!(sel.as_str(), "button:hover");
        assert_eq!(sel.to_string(), "button:hover");
    }

    #[test]
    fn declaration_display() {
        let decl = Declaration::new(
            "background-color".into(),
            vec![DeclarationValue::Function {
                name: "rgba".into(),
                args: vec![
                    vec![DeclarationValue::Integer(22)],
                    vec![DeclarationValue::Integer(25)],
                    vec![DeclarationValue::Integer(35)],
                    vec![DeclarationValue::Number(0.5)],
                ],
            }],
            false,
        );
        assert_eq!(decl.to_string(), "background-color: rgba(22, 25, 35, 0.5)");
    }

    #[test]
    fn declaration_display_important() {
        let decl = Declaration::new(
            "color".into(),
            vec![DeclarationValue::Color("112233".into())],
            true,
        );
        assert_eq!(decl.to_string(), "color: #112233 !important");
    }

    #[test]
    fn dimension_and_string_display() {
        assert_eq!(
            DeclarationValue::Dimension(0.325, "em".into()).to_string(),
            "0.325em"
        );
        assert_eq!(
            DeclarationValue::String("commonmenu".into()).to_string(),
            "'commonmenu'"
        );
    }

    #[test]
    fn stylesheet_default_is_empty() {
        assert!(StyleSheet::default().rules.is_empty());
        assert!(StyleSheet::new().rules.is_empty());
    }
}
