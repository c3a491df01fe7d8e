//! The fixed whitelists of selectors and properties a sheet may style.
//!
//! Anything outside these lists is dropped while building tables, so user
//! sheets can carry rules meant for other tools without failing.

use crate::style::value::ValueKind;

/// Every widget selector a sheet may target, in registry order.
pub const KNOWN_SELECTORS: &[&str] = &[
    "button",
    "button:hover",
    "check-box",
    "check-box:hover",
    "heading",
    "label",
    "progress-bar",
    "separator",
    "slider",
    "slider:hover",
    "sprite-button",
    "sprite-button:hover",
    "text-area",
    "text-edit",
    "text-edit:hover",
    "window",
];

/// Every property a sheet may set, with the kind of value it holds.
pub const KNOWN_PROPERTIES: &[(&str, ValueKind)] = &[
    ("background-color", ValueKind::Color),
    ("background-image", ValueKind::Image),
    ("border-color", ValueKind::Color),
    ("color", ValueKind::Color),
    ("font-family", ValueKind::Integer),
    ("font-size", ValueKind::FontSize),
];

/// Whether `selector` is a registered widget selector.
pub fn is_known_selector(selector: &str) -> bool {
    KNOWN_SELECTORS.contains(&selector)
}

/// The value kind of a registered property, or `None` for unknown names.
pub fn property_kind(property: &str) -> Option<ValueKind> {
    KNOWN_PROPERTIES
        .iter()
        .find(|(name, _)| *name == property)
        .map(|(_, kind)| *kind)
}
