//! Collaborator traits: the drawing backend and the input layer.
//!
//! [`Context`](crate::context::Context) never rasterizes or reads devices
//! itself. It drives a [`Painter`] and an [`Input`] supplied by the host.

use crate::context::state::TextEntry;
use crate::geometry::{Position, Rect};
use crate::style::{Color, ImageRef, Style};

/// Font parameters applied to the pending text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextOptions {
    /// Host font index (the `font-family` property).
    pub font: u32,
    /// Relative size in `em` (the `font-size` property).
    pub scale: f32,
}

/// Drawing backend.
///
/// The painter owns the pen position and the rectangle of the widget being
/// drawn. It also owns the [`Style`] instance widgets resolve properties from.
pub trait Painter {
    /// Start a window anchored at `anchor`.
    fn begin_window(&mut self, anchor: Position);

    /// Finish the current window and return its final position.
    fn end_window(&mut self) -> Position;

    /// Start a widget of the given size at the pen position; this becomes the
    /// rectangle reported by [`widget_rect`](Self::widget_rect).
    fn begin_draw(&mut self, width: f32, height: f32);

    /// Finish the current widget, advance the layout, and clear pending text.
    fn end_draw(&mut self);

    fn begin_row(&mut self);

    fn end_row(&mut self);

    /// The rectangle of the most recently started widget, if any.
    fn widget_rect(&self) -> Option<Rect>;

    fn set_color(&mut self, color: Color);

    /// Set or clear the pending literal text.
    fn set_text(&mut self, text: Option<&str>);

    /// Set or clear the pending host text entry.
    fn set_text_entry(&mut self, entry: Option<&TextEntry>);

    fn set_text_options(&mut self, options: TextOptions);

    /// Width of the pending text with the current options.
    fn text_width(&self) -> f32;

    /// Move the pen relative to its current position.
    fn move_by(&mut self, dx: f32, dy: f32);

    fn draw_rect(&mut self, width: f32, height: f32);

    fn draw_sprite(&mut self, image: &ImageRef, width: f32, height: f32);

    /// Draw the pending text at the pen position.
    fn draw_text(&mut self);

    /// Screen width over height.
    fn aspect_ratio(&self) -> f32;

    fn style(&self) -> &Style;

    fn style_mut(&mut self) -> &mut Style;
}

/// Pointer and window input.
pub trait Input {
    fn begin_window(&mut self);

    fn end_window(&mut self);

    /// Whether the pointer lies within `rect`.
    fn is_rect_hovered(&self, rect: Rect) -> bool;

    /// Whether the primary pointer button was pressed this frame.
    fn is_primary_pressed(&self) -> bool;
}
