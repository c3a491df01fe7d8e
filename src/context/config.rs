//! Context configuration.

use crate::geometry::Position;

/// Configuration for a [`Context`](crate::context::Context).
#[derive(Debug, Clone, PartialEq)]
pub struct ContextConfig {
    /// Anchor used for `begin_window` coordinates the caller leaves out.
    pub default_anchor: Position,
    /// Number of windows whose drawing is skipped after creation.
    pub initial_skip_drawing: u32,
    /// Initial value of the debug flag.
    pub debug: bool,
    /// Optional style sheet installed over the defaults at construction.
    pub style_sheet: Option<String>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            default_anchor: Position::CENTER,
            initial_skip_drawing: 1,
            debug: false,
            style_sheet: None,
        }
    }
}

impl ContextConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default window anchor (builder).
    pub fn with_default_anchor(mut self, x: f32, y: f32) -> Self {
        self.default_anchor = Position::new(x, y);
        self
    }

    /// Set the initial skip-drawing count (builder).
    pub fn with_initial_skip_drawing(mut self, count: u32) -> Self {
        self.initial_skip_drawing = count;
        self
    }

    /// Set the debug flag (builder).
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the style sheet (builder).
    pub fn with_style_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.style_sheet = Some(sheet.into());
        self
    }
}
