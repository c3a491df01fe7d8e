//! The immediate-mode context: window and draw scopes plus layered overrides.
//!
//! A [`Context`] is driven once per frame by widget code. It owns no pixels
//! and reads no devices. It sequences calls to the host's [`Painter`] and
//! [`Input`] and keeps the small amount of state that has to survive between
//! widget calls inside one window.
//!
//! ```
//! use stackui::context::Context;
//! use stackui::testing::{RecordingPainter, ScriptedInput};
//!
//! let mut ctx = Context::new(ScriptedInput::default(), RecordingPainter::default());
//! ctx.begin_window(None, None)?;
//! ctx.set_next_text_entry("HELLO");
//! ctx.begin_draw(0.25, 0.125)?;
//! assert_eq!(ctx.text_entry(), Some("HELLO"));
//! ctx.end_draw()?;
//! assert_eq!(ctx.text_entry(), None);
//! ctx.end_window()?;
//! # Ok::<(), stackui::context::ContextError>(())
//! ```

pub mod backend;
pub mod config;
pub mod state;

use std::fmt;

use thiserror::Error;

use crate::geometry::Position;
use crate::style::Style;

pub use backend::{Input, Painter, TextOptions};
pub use config::ContextConfig;
pub use state::{DrawState, ScopedOverride, TextComponent, TextEntry, WindowFlags, WindowState};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// The two kinds of begin/end scope a context tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Window,
    Draw,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Window => f.write_str("window"),
            Scope::Draw => f.write_str("draw"),
        }
    }
}

/// A call made out of order. The rejected call has no effect.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContextError {
    #[error("end_{0} called without a matching begin_{0}")]
    EndWithoutBegin(Scope),

    #[error("begin_{0} called while a {0} scope is already open")]
    AlreadyOpen(Scope),

    #[error("no widget has been drawn; hover state is unavailable")]
    NoWidget,
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Immediate-mode UI state machine over an [`Input`] and a [`Painter`].
pub struct Context<I: Input, P: Painter> {
    input: I,
    painter: P,
    config: ContextConfig,
    debug: bool,
    window: WindowState,
    next: DrawState,
    window_open: bool,
    draw_open: bool,
    /// Whether a widget has been drawn in the current window.
    widget_drawn: bool,
}

impl<I: Input, P: Painter> Context<I, P> {
    /// Create a context with the default configuration.
    pub fn new(input: I, painter: P) -> Self {
        Self::with_config(input, painter, ContextConfig::default())
    }

    /// Create a context with an explicit configuration.
    ///
    /// A configured style sheet is installed on the painter's [`Style`]. If it
    /// fails to build, the failure is logged and the defaults stay in effect.
    pub fn with_config(input: I, mut painter: P, config: ContextConfig) -> Self {
        if let Some(sheet) = config.style_sheet.as_deref() {
            if let Err(e) = painter.style_mut().set(sheet) {
                tracing::debug!(error = %e, "configured style sheet not installed");
            }
        }
        Self {
            input,
            painter,
            debug: config.debug,
            window: WindowState::new(config.initial_skip_drawing),
            next: DrawState::default(),
            window_open: false,
            draw_open: false,
            widget_drawn: false,
            config,
        }
    }

    pub fn config(&self) -> &ContextConfig {
        &self.config
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn painter(&self) -> &P {
        &self.painter
    }

    pub fn painter_mut(&mut self) -> &mut P {
        &mut self.painter
    }

    /// The painter's style.
    pub fn style(&self) -> &Style {
        self.painter.style()
    }

    pub fn is_window_open(&self) -> bool {
        self.window_open
    }

    pub fn is_draw_open(&self) -> bool {
        self.draw_open
    }

    pub fn set_debug_enabled(&mut self, enabled: bool) {
        self.debug = enabled;
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.debug
    }

    // -- window flags and window-scoped values ------------------------------

    pub fn set_next_window_no_drag(&mut self, value: bool) {
        self.window.flags.set(WindowFlags::NO_DRAG, value);
    }

    pub fn set_next_window_no_background(&mut self, value: bool) {
        self.window.flags.set(WindowFlags::NO_BACKGROUND, value);
    }

    pub fn is_window_no_drag(&self) -> bool {
        self.window.flags.contains(WindowFlags::NO_DRAG)
    }

    pub fn is_window_no_background(&self) -> bool {
        self.window.flags.contains(WindowFlags::NO_BACKGROUND)
    }

    pub fn window_flags(&self) -> WindowFlags {
        self.window.flags()
    }

    pub fn set_next_window_id(&mut self, id: impl Into<String>) {
        self.window.id.set(id.into());
    }

    pub fn window_id(&self) -> Option<&str> {
        self.window.id.get().map(String::as_str)
    }

    pub fn set_next_window_spacing(&mut self, x: f32, y: f32) {
        self.window.spacing.set(Position::new(x, y));
    }

    pub fn window_spacing(&self) -> Option<Position> {
        self.window.spacing.get().copied()
    }

    // -- window scope -------------------------------------------------------

    /// Open a window anchored at `(x, y)`. A coordinate left out takes the
    /// configured default anchor's value.
    pub fn begin_window(&mut self, x: Option<f32>, y: Option<f32>) -> Result<(), ContextError> {
        if self.window_open {
            return Err(self.reject(ContextError::AlreadyOpen(Scope::Window)));
        }
        let default = self.config.default_anchor;
        let anchor = Position::new(x.unwrap_or(default.x), y.unwrap_or(default.y));
        tracing::trace!(x = anchor.x, y = anchor.y, flags = ?self.window.flags, "begin window");

        self.window_open = true;
        self.widget_drawn = false;
        self.input.begin_window();
        self.painter.begin_window(anchor);
        Ok(())
    }

    /// Close the window and return its final position.
    ///
    /// Everything the window scope owns is cleared and the skip-drawing
    /// counter counts down by one while positive.
    pub fn end_window(&mut self) -> Result<Position, ContextError> {
        if !self.window_open {
            return Err(self.reject(ContextError::EndWithoutBegin(Scope::Window)));
        }
        let position = self.painter.end_window();
        self.input.end_window();
        self.window.end_window();
        self.window_open = false;
        self.widget_drawn = false;
        tracing::trace!(
            x = position.x,
            y = position.y,
            skip_drawing = self.window.skip_drawing(),
            "end window"
        );
        Ok(position)
    }

    /// Whether the hosting renderer should skip drawing the next window.
    pub fn is_window_skip_next_drawing(&self) -> bool {
        self.window.skip_drawing() > 0
    }

    /// Ask for the current (or next) window's drawing to be skipped.
    pub fn set_window_skip_next_drawing(&mut self) {
        self.window.request_skip_drawing();
    }

    // -- hit-testing --------------------------------------------------------

    /// Whether the pointer lies within the rectangle of the last drawn widget.
    ///
    /// Fails with [`ContextError::NoWidget`] until a widget has been drawn in
    /// the current window, and again once that window ends.
    pub fn is_widget_hovered(&self) -> Result<bool, ContextError> {
        if !self.widget_drawn {
            return Err(ContextError::NoWidget);
        }
        let rect = self.painter.widget_rect().ok_or(ContextError::NoWidget)?;
        Ok(self.input.is_rect_hovered(rect))
    }

    /// Whether the last drawn widget is hovered and the primary button was
    /// pressed this frame.
    pub fn is_widget_clicked(&self) -> Result<bool, ContextError> {
        Ok(self.is_widget_hovered()? && self.input.is_primary_pressed())
    }

    // -- draw scope ---------------------------------------------------------

    pub fn begin_draw(&mut self, width: f32, height: f32) -> Result<(), ContextError> {
        if self.draw_open {
            return Err(self.reject(ContextError::AlreadyOpen(Scope::Draw)));
        }
        tracing::trace!(width, height, "begin draw");
        self.draw_open = true;
        self.widget_drawn = true;
        self.painter.begin_draw(width, height);
        Ok(())
    }

    /// Finish the widget and drop every "next" override.
    pub fn end_draw(&mut self) -> Result<(), ContextError> {
        if !self.draw_open {
            return Err(self.reject(ContextError::EndWithoutBegin(Scope::Draw)));
        }
        self.painter.end_draw();
        self.next.end_draw();
        self.draw_open = false;
        tracing::trace!("end draw");
        Ok(())
    }

    pub fn begin_row(&mut self) {
        self.painter.begin_row();
    }

    pub fn end_row(&mut self) {
        self.painter.end_row();
    }

    // -- text entry ---------------------------------------------------------

    /// Override the text entry for the next widget only.
    pub fn set_next_text_entry(&mut self, entry: impl Into<TextEntry>) {
        self.next.text.set(entry.into());
    }

    /// Override the text entry until [`pop_text_entry`](Self::pop_text_entry)
    /// or the end of the window.
    pub fn push_text_entry(&mut self, entry: impl Into<TextEntry>) {
        self.window.text.set(entry.into());
    }

    pub fn pop_text_entry(&mut self) {
        self.window.text.clear();
    }

    fn resolved_text(&self) -> Option<&TextEntry> {
        self.next.text.or(&self.window.text)
    }

    /// The effective text entry id. "Next" wins over "pushed".
    pub fn text_entry(&self) -> Option<&str> {
        self.resolved_text().map(|t| t.entry.as_str())
    }

    /// The components of the effective text entry.
    pub fn text_components(&self) -> Option<&[TextComponent]> {
        self.resolved_text().map(|t| t.components.as_slice())
    }

    /// The effective text entry with its components.
    pub fn text(&self) -> Option<&TextEntry> {
        self.resolved_text()
    }

    // -- widget width -------------------------------------------------------

    pub fn set_next_widget_width(&mut self, width: f32) {
        self.next.widget_width.set(width);
    }

    pub fn push_widget_width(&mut self, width: f32) {
        self.window.widget_width.set(width);
    }

    pub fn pop_widget_width(&mut self) {
        self.window.widget_width.clear();
    }

    pub fn widget_width(&self) -> Option<f32> {
        self.next
            .widget_width
            .or(&self.window.widget_width)
            .copied()
    }

    // -- widget id ----------------------------------------------------------

    /// Style the next widget with `id` in place of its own selector.
    pub fn set_next_widget_id(&mut self, id: impl Into<String>) {
        self.next.widget_id.set(id.into());
    }

    pub fn push_widget_id(&mut self, id: impl Into<String>) {
        self.window.widget_id.set(id.into());
    }

    pub fn pop_widget_id(&mut self) {
        self.window.widget_id.clear();
    }

    pub fn widget_id(&self) -> Option<&str> {
        self.next
            .widget_id
            .or(&self.window.widget_id)
            .map(String::as_str)
    }

    fn reject(&self, err: ContextError) -> ContextError {
        tracing::debug!(error = %err, "rejected context call");
        err
    }
}

impl<I: Input + fmt::Debug, P: Painter + fmt::Debug> fmt::Debug for Context<I, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("input", &self.input)
            .field("painter", &self.painter)
            .field("debug", &self.debug)
            .field("window", &self.window)
            .field("next", &self.next)
            .field("window_open", &self.window_open)
            .field("draw_open", &self.draw_open)
            .field("widget_drawn", &self.widget_drawn)
            .finish()
    }
}
