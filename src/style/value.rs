//! Property value parsing: declaration tokens → typed style values.
//!
//! Each registered property expects exactly one [`ValueKind`]. The grammars:
//!
//! | Kind | Accepted forms |
//! |---|---|
//! | [`ValueKind::Color`] | `#rrggbb` (alpha 255), `rgba(r, g, b, a)` (alpha in `0.0..=1.0`) |
//! | [`ValueKind::Image`] | `url('dictionary', 'name')` |
//! | [`ValueKind::FontSize`] | `<number>em`, stored as the bare number |
//! | [`ValueKind::Integer`] | a non-negative decimal integer |

use std::fmt;

use crate::style::model::DeclarationValue;

/// The unit every font size is written in.
pub const FONT_SIZE_UNIT: &str = "em";

/// Errors from value parsing.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueError {
    #[error("invalid {kind} value for {property}: {message}")]
    Invalid {
        property: String,
        kind: ValueKind,
        message: String,
    },
}

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Create a color from all four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// The channels as an `(r, g, b, a)` tuple.
    pub const fn to_tuple(self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

impl From<(u8, u8, u8, u8)> for Color {
    fn from((r, g, b, a): (u8, u8, u8, u8)) -> Self {
        Self { r, g, b, a }
    }
}

/// A sprite reference: texture dictionary plus texture name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageRef {
    pub dictionary: String,
    pub name: String,
}

impl ImageRef {
    /// Create a new image reference.
    pub fn new(dictionary: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            dictionary: dictionary.into(),
            name: name.into(),
        }
    }
}

/// The kind of value a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Color,
    Image,
    FontSize,
    Integer,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueKind::Color => "color",
            ValueKind::Image => "image",
            ValueKind::FontSize => "font-size",
            ValueKind::Integer => "integer",
        })
    }
}

/// A resolved, immutable paint attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    Color(Color),
    Image(ImageRef),
    /// Relative font size, in `em`.
    Size(f32),
    Integer(u32),
}

impl StyleValue {
    /// The kind this value belongs to.
    pub fn kind(&self) -> ValueKind {
        match self {
            StyleValue::Color(_) => ValueKind::Color,
            StyleValue::Image(_) => ValueKind::Image,
            StyleValue::Size(_) => ValueKind::FontSize,
            StyleValue::Integer(_) => ValueKind::Integer,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            StyleValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageRef> {
        match self {
            StyleValue::Image(image) => Some(image),
            _ => None,
        }
    }

    pub fn as_size(&self) -> Option<f32> {
        match self {
            StyleValue::Size(size) => Some(*size),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            StyleValue::Integer(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<Color> for StyleValue {
    fn from(color: Color) -> Self {
        StyleValue::Color(color)
    }
}

impl From<ImageRef> for StyleValue {
    fn from(image: ImageRef) -> Self {
        StyleValue::Image(image)
    }
}

/// Parse a declaration's values as the given kind.
///
/// `property` is only used for error messages.
pub fn parse_value(
    property: &str,
    kind: ValueKind,
    values: &[DeclarationValue],
) -> Result<StyleValue, ValueError> {
    let invalid = |message: String| ValueError::Invalid {
        property: property.to_owned(),
        kind,
        message,
    };

    let value = match values {
        [single] => single,
        _ => return Err(invalid(format!("expected 1 value, got {}", values.len()))),
    };

    let parsed = match kind {
        ValueKind::Color => parse_color(value).map(StyleValue::Color),
        ValueKind::Image => parse_image(value).map(StyleValue::Image),
        ValueKind::FontSize => parse_font_size(value).map(StyleValue::Size),
        ValueKind::Integer => parse_integer(value).map(StyleValue::Integer),
    };
    parsed.map_err(invalid)
}

/// Parse `#rrggbb` or `rgba(r, g, b, a)`.
fn parse_color(value: &DeclarationValue) -> Result<Color, String> {
    match value {
        DeclarationValue::Color(hex) => parse_hex(hex),
        DeclarationValue::Function { name, args } if name.eq_ignore_ascii_case("rgba") => {
            let [r, g, b, a] = args.as_slice() else {
                return Err(format!("rgba() takes 4 arguments, got {}", args.len()));
            };
            Ok(Color::rgba(channel(r)?, channel(g)?, channel(b)?, alpha(a)?))
        }
        other => Err(format!("expected #rrggbb or rgba(), got: {other}")),
    }
}

fn parse_hex(hex: &str) -> Result<Color, String> {
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("expected 6 hex digits, got #{hex}"));
    }
    let byte = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| format!("invalid hex color #{hex}"))
    };
    Ok(Color::rgb(byte(0)?, byte(2)?, byte(4)?))
}

fn channel(arg: &[DeclarationValue]) -> Result<u8, String> {
    match arg {
        [DeclarationValue::Integer(n)] => {
            u8::try_from(*n).map_err(|_| format!("color channel {n} out of range 0-255"))
        }
        _ => Err(format!("expected an integer color channel, got {}", join(arg))),
    }
}

fn alpha(arg: &[DeclarationValue]) -> Result<u8, String> {
    let a = match arg {
        [DeclarationValue::Number(n)] => *n,
        [DeclarationValue::Integer(n)] => *n as f64,
        _ => return Err(format!("expected a numeric alpha, got {}", join(arg))),
    };
    if !(0.0..=1.0).contains(&a) {
        return Err(format!("alpha {a} out of range 0.0-1.0"));
    }
    Ok((a * 255.0).round() as u8)
}

/// Parse `url('dictionary', 'name')`.
fn parse_image(value: &DeclarationValue) -> Result<ImageRef, String> {
    match value {
        DeclarationValue::Function { name, args } if name.eq_ignore_ascii_case("url") => {
            match args.as_slice() {
                [dictionary, texture] => Ok(ImageRef::new(quoted(dictionary)?, quoted(texture)?)),
                _ => Err(format!("url() takes 2 arguments, got {}", args.len())),
            }
        }
        other => Err(format!("expected url('dictionary', 'name'), got: {other}")),
    }
}

fn quoted(arg: &[DeclarationValue]) -> Result<&str, String> {
    match arg {
        [DeclarationValue::String(s)] if !s.is_empty() && !s.contains(char::is_whitespace) => {
            Ok(s.as_str())
        }
        _ => Err(format!("expected a quoted identifier, got {}", join(arg))),
    }
}

/// Parse `<number>em`.
fn parse_font_size(value: &DeclarationValue) -> Result<f32, String> {
    match value {
        DeclarationValue::Dimension(n, unit) if unit == FONT_SIZE_UNIT && *n >= 0.0 => {
            Ok(*n as f32)
        }
        other => Err(format!("expected a non-negative size in {FONT_SIZE_UNIT}, got: {other}")),
    }
}

fn parse_integer(value: &DeclarationValue) -> Result<u32, String> {
    match value {
        DeclarationValue::Integer(n) => {
            u32::try_from(*n).map_err(|_| format!("integer {n} out of range"))
        }
        other => Err(format!("expected an integer, got: {other}")),
    }
}

fn join(values: &[DeclarationValue]) -> String {
    let parts: Vec<String> = values.iter().map(ToString::to_string).collect();
    parts.join(" ")
}
