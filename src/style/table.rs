//! Property tables: per-selector property maps with a fallback chain.
//!
//! A [`StyleTables`] set is built from one parsed sheet. When built against a
//! default set, every table points at the default table for its selector, so
//! lookups of properties the override does not set fall through to the defaults.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::style::model::StyleSheet;
use crate::style::parser::{parse_sheet, ParseError};
use crate::style::registry::{is_known_selector, property_kind};
use crate::style::value::{parse_value, Color, ImageRef, StyleValue, ValueError, ValueKind};

/// Property name → value.
pub type PropertyMap = HashMap<String, StyleValue>;

/// Errors from building tables and resolving properties.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StyleError {
    #[error("failed to parse style sheet: {0}")]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error("no style table for selector: {0}")]
    UnknownSelector(String),
    #[error("style property {property} is not set for selector {selector}")]
    MissingProperty { selector: String, property: String },
    #[error("style property {property} of {selector} is a {found}, not a {expected}")]
    TypeMismatch {
        selector: String,
        property: String,
        expected: ValueKind,
        found: ValueKind,
    },
    #[error("no default style table for selector: {0}")]
    MissingDefault(String),
}

// ---------------------------------------------------------------------------
// PropertyTable
// ---------------------------------------------------------------------------

/// Resolved properties for one selector.
///
/// Lookups try the local map first, then the fallback table. The fallback is
/// shared and never written to; [`PropertyTable::set`] only touches the local map.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyTable {
    selector: String,
    properties: PropertyMap,
    fallback: Option<Arc<PropertyTable>>,
}

impl PropertyTable {
    /// Create a table with no fallback.
    pub fn new(selector: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            selector: selector.into(),
            properties,
            fallback: None,
        }
    }

    /// Create a table that defers to `fallback` for properties it lacks.
    pub fn with_fallback(
        selector: impl Into<String>,
        properties: PropertyMap,
        fallback: Arc<PropertyTable>,
    ) -> Self {
        Self {
            selector: selector.into(),
            properties,
            fallback: Some(fallback),
        }
    }

    /// The selector this table belongs to.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// The locally set properties (fallback excluded).
    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn fallback(&self) -> Option<&PropertyTable> {
        self.fallback.as_deref()
    }

    /// Look up a property, falling back when it is not set locally.
    pub fn try_get(&self, property: &str) -> Option<&StyleValue> {
        self.properties
            .get(property)
            .or_else(|| self.fallback.as_ref().and_then(|f| f.try_get(property)))
    }

    /// Like [`try_get`](Self::try_get), but a miss is an error.
    pub fn get(&self, property: &str) -> Result<&StyleValue, StyleError> {
        self.try_get(property)
            .ok_or_else(|| StyleError::MissingProperty {
                selector: self.selector.clone(),
                property: property.to_owned(),
            })
    }

    /// Write a property into the local map.
    pub fn set(&mut self, property: impl Into<String>, value: StyleValue) {
        self.properties.insert(property.into(), value);
    }

    pub fn color(&self, property: &str) -> Result<Color, StyleError> {
        self.typed(property, ValueKind::Color, StyleValue::as_color)
    }

    pub fn image(&self, property: &str) -> Result<&ImageRef, StyleError> {
        self.typed(property, ValueKind::Image, StyleValue::as_image)
    }

    /// Relative font size, in `em`.
    pub fn size(&self, property: &str) -> Result<f32, StyleError> {
        self.typed(property, ValueKind::FontSize, StyleValue::as_size)
    }

    pub fn integer(&self, property: &str) -> Result<u32, StyleError> {
        self.typed(property, ValueKind::Integer, StyleValue::as_integer)
    }

    fn typed<'a, T>(
        &'a self,
        property: &str,
        expected: ValueKind,
        extract: impl FnOnce(&'a StyleValue) -> Option<T>,
    ) -> Result<T, StyleError> {
        let value = self.get(property)?;
        let found = value.kind();
        extract(value).ok_or_else(|| StyleError::TypeMismatch {
            selector: self.selector.clone(),
            property: property.to_owned(),
            expected,
            found,
        })
    }
}

// ---------------------------------------------------------------------------
// StyleTables
// ---------------------------------------------------------------------------

/// Selector → property table, as built from one sheet.
#[derive(Debug, Clone, Default)]
pub struct StyleTables {
    tables: HashMap<String, Arc<PropertyTable>>,
}

impl StyleTables {
    /// Parse a sheet into a standalone (default) table set.
    pub fn parse(text: &str) -> Result<Self, StyleError> {
        Self::from_sheet(&parse_sheet(text)?, None)
    }

    /// Parse a sheet into an override set whose tables fall back to `defaults`.
    pub fn parse_with_defaults(text: &str, defaults: &StyleTables) -> Result<Self, StyleError> {
        Self::from_sheet(&parse_sheet(text)?, Some(defaults))
    }

    /// Build tables from a parsed sheet.
    ///
    /// Unknown selectors and properties are dropped, and rules left with no
    /// recognized property contribute nothing. A selector that appears in
    /// several rules is merged per property, later rules winning. Any value
    /// that fails its property's grammar fails the whole build.
    pub fn from_sheet(
        sheet: &StyleSheet,
        defaults: Option<&StyleTables>,
    ) -> Result<Self, StyleError> {
        let mut tables: HashMap<String, PropertyTable> = HashMap::new();

        for rule in &sheet.rules {
            let mut properties = PropertyMap::new();
            for decl in &rule.declarations {
                let Some(kind) = property_kind(&decl.property) else {
                    tracing::trace!(property = %decl.property, "ignoring unknown style property");
                    continue;
                };
                let value = parse_value(&decl.property, kind, &decl.values)?;
                properties.insert(decl.property.clone(), value);
            }

            if properties.is_empty() {
                continue;
            }

            for selector in &rule.selectors {
                let name = selector.as_str();
                if !is_known_selector(name) {
                    tracing::trace!(selector = name, "ignoring unknown style selector");
                    continue;
                }

                match tables.entry(name.to_owned()) {
                    Entry::Vacant(slot) => {
                        let table = match defaults {
                            Some(defaults) => {
                                let fallback = defaults
                                    .tables
                                    .get(name)
                                    .cloned()
                                    .ok_or_else(|| StyleError::MissingDefault(name.to_owned()))?;
                                PropertyTable::with_fallback(name, properties.clone(), fallback)
                            }
                            None => PropertyTable::new(name, properties.clone()),
                        };
                        slot.insert(table);
                    }
                    Entry::Occupied(mut slot) => {
                        let table = slot.get_mut();
                        for (property, value) in &properties {
                            table.set(property.clone(), value.clone());
                        }
                    }
                }
            }
        }

        Ok(Self {
            tables: tables.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
        })
    }

    /// The table for `selector`, if this set has one.
    pub fn get(&self, selector: &str) -> Option<&PropertyTable> {
        self.tables.get(selector).map(Arc::as_ref)
    }

    pub fn contains(&self, selector: &str) -> bool {
        self.tables.contains_key(selector)
    }

    /// The selectors that have a table, in no particular order.
    pub fn selectors(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn defaults() -> StyleTables {
        StyleTables::parse(
            "button, label { color: #ffffff; font-family: 0; }
             button { background-color: #000000; }",
        )
        .unwrap()
    }

    // ── PropertyTable ────────────────────────────────────────────────

    #[test]
    fn lookup_falls_back() {
        let mut base = PropertyMap::new();
        base.insert("color".into(), Color::rgb(1, 2, 3).into());
        base.insert("font-family".into(), StyleValue::Integer(2));
        let base = Arc::new(PropertyTable::new("button", base));

        let mut local = PropertyMap::new();
        local.insert("color".into(), Color::rgb(9, 9, 9).into());
        let table = PropertyTable::with_fallback("button", local, base);

        assert_eq!(table.color("color").unwrap(), Color::rgb(9, 9, 9));
        assert_eq!(table.integer("font-family").unwrap(), 2);
        assert!(table.try_get("border-color").is_none());
    }

    #[test]
    fn set_never_touches_fallback() {
        let mut base = PropertyMap::new();
        base.insert("color".into(), Color::rgb(1, 2, 3).into());
        let base = Arc::new(PropertyTable::new("label", base));

        let mut table =
            PropertyTable::with_fallback("label", PropertyMap::new(), Arc::clone(&base));
        table.set("color", Color::rgb(4, 5, 6).into());

        assert_eq!(table.color("color").unwrap(), Color::rgb(4, 5, 6));
        assert_eq!(base.color("color").unwrap(), Color::rgb(1, 2, 3));
        assert!(table.fallback().unwrap().properties().contains_key("color"));
    }

    #[test]
    fn missing_property_is_an_error() {
        let table = PropertyTable::new("window", PropertyMap::new());
        assert_eq!(
            table.get("color").unwrap_err(),
            StyleError::MissingProperty {
                selector: "window".into(),
                property: "color".into(),
            }
        );
    }

    #[test]
    fn wrong_kind_is_distinguished_from_missing() {
        let mut props = PropertyMap::new();
        props.insert("font-family".into(), StyleValue::Integer(4));
        let table = PropertyTable::new("heading", props);

        assert_eq!(
            table.color("font-family").unwrap_err(),
            StyleError::TypeMismatch {
                selector: "heading".into(),
                property: "font-family".into(),
                expected: ValueKind::Color,
                found: ValueKind::Integer,
            }
        );
        assert!(matches!(
            table.size("font-size"),
            Err(StyleError::MissingProperty { .. })
        ));
    }

    // ── Building ─────────────────────────────────────────────────────

    #[test]
    fn group_rule_applies_to_each_selector() {
        let tables = defaults();
        assert_eq!(tables.len(), 2);
        let label = tables.get("label").unwrap();
        let button = tables.get("button").unwrap();
        assert_eq!(label.color("color").unwrap(), Color::WHITE);
        assert_eq!(button.integer("font-family").unwrap(), 0);
    }

    #[test]
    fn later_rule_merges_per_property() {
        let tables = StyleTables::parse(
            "button { color: #010101; font-family: 1; }
             button { color: #020202; }",
        )
        .unwrap();
        let button = tables.get("button").unwrap();
        assert_eq!(button.color("color").unwrap(), Color::rgb(2, 2, 2));
        assert_eq!(button.integer("font-family").unwrap(), 1);
    }

    #[test]
    fn merge_does_not_leak_into_group_siblings() {
        let tables = defaults();
        // The second rule only targeted button.
        let label = tables.get("label").unwrap();
        let button = tables.get("button").unwrap();
        assert!(label.try_get("background-color").is_none());
        assert_eq!(button.color("background-color").unwrap(), Color::BLACK);
    }

    #[test]
    fn unknown_selectors_and_properties_are_dropped() {
        let tables = StyleTables::parse(
            "button, .fancy, Window { color: #000000; margin: 10px; }
             label { padding: 1px; }",
        )
        .unwrap();
        let selectors: Vec<_> = tables.selectors().collect();
        assert_eq!(selectors, vec!["button"]);
        assert_eq!(tables.get("button").unwrap().properties().len(), 1);
        assert!(!tables.contains("label"));
    }

    #[test]
    fn unknown_property_with_bad_value_is_not_an_error() {
        let tables = StyleTables::parse("button { color: #000000; width: rgba(1); }").unwrap();
        assert!(tables.contains("button"));
    }

    #[test]
    fn bad_value_fails_the_whole_build() {
        let result = StyleTables::parse("label { color: #000000; } button { color: banana; }");
        assert!(matches!(result, Err(StyleError::Value(_))));
    }

    #[test]
    fn bad_value_in_unknown_selector_still_fails() {
        let result = StyleTables::parse("nothing { color: banana; }");
        assert!(matches!(result, Err(StyleError::Value(_))));
    }

    #[test]
    fn syntax_error_is_reported() {
        assert!(matches!(
            StyleTables::parse("button { color"),
            Err(StyleError::Parse(_))
        ));
    }

    #[test]
    fn overrides_fall_back_to_defaults() {
        let defaults = defaults();
        let overrides =
            StyleTables::parse_with_defaults("button { color: #112233; }", &defaults).unwrap();
        let button = overrides.get("button").unwrap();

        assert_eq!(button.color("color").unwrap(), Color::rgb(17, 34, 51));
        assert_eq!(button.color("background-color").unwrap(), Color::BLACK);
        assert_eq!(button.fallback().unwrap().selector(), "button");
        assert!(!overrides.contains("label"));
    }

    #[test]
    fn override_without_default_table_fails() {
        let result = StyleTables::parse_with_defaults("window { color: #112233; }", &defaults());
        assert_eq!(
            result.unwrap_err(),
            StyleError::MissingDefault("window".into())
        );
    }

    #[test]
    fn empty_sheet_builds_empty_set() {
        assert!(StyleTables::parse("").unwrap().is_empty());
        let tables = StyleTables::parse("button { margin: 0; }").unwrap();
        assert!(tables.is_empty());
    }
}
