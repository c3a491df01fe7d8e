//! Style resolver: shared defaults plus an optional per-instance override.
//!
//! The default table set is built once per process from [`DEFAULT_SHEET`] and
//! shared read-only by every [`Style`]. Each `Style` may install its own
//! override set with [`Style::set`]; lookups try the override table for the
//! selector first, then the default table.

use std::sync::{Arc, OnceLock};

use crate::style::table::{PropertyTable, StyleError, StyleTables};
use crate::style::value::{Color, ImageRef, StyleValue};

/// The built-in sheet. Covers every registered selector.
pub const DEFAULT_SHEET: &str = r#"button, check-box, label, sprite-button, text-area, text-edit {
	font-family: 0;
	font-size: 0.325em;
}

button, check-box, sprite-button, text-edit {
	background-color: rgba(22, 25, 35, 1.0);
	color: rgba(255, 255, 240, 1.0);
}

check-box:hover {
	background-color: rgba(34, 37, 45, 1.0);
	color: rgba(244, 5, 82, 1.0);
}

button:hover, sprite-button:hover {
	background-color: rgba(244, 5, 82, 1.0);
	color: rgba(255, 255, 240, 1.0);
}

heading {
	color: rgba(255, 255, 240, 1.0);
	font-family: 4;
	font-size: 0.725em;
}

label, text-area {
	color: rgba(181, 181, 173, 1.0);
}

progress-bar {
	background-color: rgba(22, 25, 35, 1.0);
	color: rgba(0, 155, 103, 1.0);
}

separator {
	color: rgba(22, 25, 35, 1.0);
}

slider {
	background-color: rgba(22, 25, 35, 1.0);
	color: rgba(181, 181, 173, 1.0);
}

slider:hover, text-edit:hover {
	background-color: rgba(22, 25, 35, 1.0);
	color: rgba(244, 5, 82, 1.0);
}

window {
	background-color: rgba(34, 37, 45, 1.0);
	border-color: rgba(22, 25, 35, 1.0);
	color: rgba(105, 255, 89, 0.125);
}
"#;

static DEFAULT_TABLES: OnceLock<Arc<StyleTables>> = OnceLock::new();

/// The process-wide default tables, built from [`DEFAULT_SHEET`] on first use.
///
/// The built-in sheet is covered by tests; should it ever fail to build, the
/// error is logged and an empty set is used, so every lookup reports
/// [`StyleError::UnknownSelector`] instead of the process aborting.
pub fn default_tables() -> Arc<StyleTables> {
    Arc::clone(DEFAULT_TABLES.get_or_init(|| {
        let tables = StyleTables::parse(DEFAULT_SHEET).unwrap_or_else(|e| {
            tracing::error!(error = %e, "built-in style sheet failed to build");
            StyleTables::default()
        });
        tracing::debug!(selectors = tables.len(), "built default style tables");
        Arc::new(tables)
    }))
}

// ---------------------------------------------------------------------------
// StyleMetrics
// ---------------------------------------------------------------------------

/// Fixed layout constants, in normalized screen units. These are not
/// sheet-configurable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleMetrics {
    pub widget: WidgetMetrics,
    pub button: ButtonMetrics,
    pub checkbox: CheckboxMetrics,
    pub heading: HeadingMetrics,
    pub label: LabelMetrics,
    pub progress_bar: ProgressBarMetrics,
    pub separator: SeparatorMetrics,
    pub slider: SliderMetrics,
    pub sprite_button: SpriteButtonMetrics,
    pub text_edit: TextEditMetrics,
    pub window: WindowMetrics,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WidgetMetrics {
    pub height: f32,
    pub text_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ButtonMetrics {
    pub spacing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CheckboxMetrics {
    pub height: f32,
    pub spacing: f32,
    pub inline_height: f32,
    pub outline_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingMetrics {
    pub height: f32,
    pub line_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelMetrics {
    pub text_offset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressBarMetrics {
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeparatorMetrics {
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderMetrics {
    pub height: f32,
    pub tick_mark_width: f32,
    pub tick_mark_height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteButtonMetrics {
    pub sprite_width: f32,
    pub spacing: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextEditMetrics {
    pub line_height: f32,
    pub symbol_width: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMetrics {
    pub outline_width: f32,
    pub margin_h: f32,
    pub margin_v: f32,
    pub spacing_h: f32,
    pub spacing_v: f32,
}

impl Default for StyleMetrics {
    fn default() -> Self {
        Self {
            widget: WidgetMetrics {
                height: 0.035,
                text_offset: -0.0035,
            },
            button: ButtonMetrics { spacing: 0.005 },
            checkbox: CheckboxMetrics {
                height: 0.02,
                spacing: 0.0025,
                inline_height: 0.002,
                outline_height: 0.002,
            },
            heading: HeadingMetrics {
                height: 0.045,
                line_height: 0.001,
            },
            label: LabelMetrics {
                text_offset: -0.005,
            },
            progress_bar: ProgressBarMetrics { height: 0.004 },
            separator: SeparatorMetrics { height: 0.001 },
            slider: SliderMetrics {
                height: 0.004,
                tick_mark_width: 0.012,
                tick_mark_height: 0.007,
            },
            sprite_button: SpriteButtonMetrics {
                sprite_width: 0.016,
                spacing: 0.001,
            },
            text_edit: TextEditMetrics {
                line_height: 0.002,
                symbol_width: 0.01,
            },
            window: WindowMetrics {
                outline_width: 0.0005,
                margin_h: 0.01,
                margin_v: 0.018,
                spacing_h: 0.005,
                spacing_v: 0.01,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Style
// ---------------------------------------------------------------------------

/// Resolves `(selector, property)` lookups against an optional override set
/// and the shared defaults.
#[derive(Debug, Clone)]
pub struct Style {
    defaults: Arc<StyleTables>,
    overrides: Option<StyleTables>,
    pub metrics: StyleMetrics,
}

impl Default for Style {
    fn default() -> Self {
        Self::new()
    }
}

impl Style {
    /// Tint applied to sprites so they render with their own colors.
    pub const SPRITE_COLOR: Color = Color::rgba(254, 254, 254, 255);

    /// Create a style backed by the process-wide defaults.
    pub fn new() -> Self {
        Self::with_defaults(default_tables())
    }

    /// Create a style backed by an explicit default set.
    pub fn with_defaults(defaults: Arc<StyleTables>) -> Self {
        Self {
            defaults,
            overrides: None,
            metrics: StyleMetrics::default(),
        }
    }

    pub fn defaults(&self) -> &StyleTables {
        &self.defaults
    }

    /// Whether an override set is installed.
    pub fn has_overrides(&self) -> bool {
        self.overrides.is_some()
    }

    /// The table for `selector`: the override table if one exists, else the default.
    pub fn properties(&self, selector: &str) -> Result<&PropertyTable, StyleError> {
        self.overrides
            .as_ref()
            .and_then(|o| o.get(selector))
            .or_else(|| self.defaults.get(selector))
            .ok_or_else(|| StyleError::UnknownSelector(selector.to_owned()))
    }

    pub fn get(&self, selector: &str, property: &str) -> Result<&StyleValue, StyleError> {
        self.properties(selector)?.get(property)
    }

    /// Like [`get`](Self::get), but a missing selector or property is `None`.
    pub fn try_get(&self, selector: &str, property: &str) -> Option<&StyleValue> {
        self.properties(selector).ok()?.try_get(property)
    }

    pub fn color(&self, selector: &str, property: &str) -> Result<Color, StyleError> {
        self.properties(selector)?.color(property)
    }

    pub fn image(&self, selector: &str, property: &str) -> Result<&ImageRef, StyleError> {
        self.properties(selector)?.image(property)
    }

    pub fn size(&self, selector: &str, property: &str) -> Result<f32, StyleError> {
        self.properties(selector)?.size(property)
    }

    pub fn integer(&self, selector: &str, property: &str) -> Result<u32, StyleError> {
        self.properties(selector)?.integer(property)
    }

    /// Install `sheet` as this style's override set.
    ///
    /// On failure nothing is installed: the error is logged, returned, and the
    /// previously installed override (if any) stays in effect.
    pub fn set(&mut self, sheet: &str) -> Result<(), StyleError> {
        match StyleTables::parse_with_defaults(sheet, &self.defaults) {
            Ok(tables) => {
                tracing::debug!(selectors = tables.len(), "installed style override");
                self.overrides = Some(tables);
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to set style sheet; keeping previous style");
                Err(e)
            }
        }
    }

    /// Drop the override set, reverting every lookup to the defaults.
    pub fn reset(&mut self) {
        if self.overrides.take().is_some() {
            tracing::debug!("reset style override");
        }
    }
}
