//! Headless collaborators: a painter that records commands and a scripted input.
//!
//! The [`RecordingPainter`] lays widgets out top to bottom (left to right
//! inside a row) from the window anchor, so widget rectangles are predictable
//! and hover tests can be scripted by moving the [`ScriptedInput`] pointer.

use std::fmt;

use crate::context::backend::{Input, Painter, TextOptions};
use crate::context::state::TextEntry;
use crate::geometry::{Position, Rect};
use crate::style::{Color, ImageRef, Style};

// ---------------------------------------------------------------------------
// PaintCommand
// ---------------------------------------------------------------------------

/// One call made on a [`RecordingPainter`].
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCommand {
    BeginWindow(Position),
    EndWindow,
    BeginDraw { width: f32, height: f32 },
    EndDraw,
    BeginRow,
    EndRow,
    SetColor(Color),
    SetText(Option<String>),
    SetTextEntry(Option<String>),
    SetTextOptions(TextOptions),
    Move { dx: f32, dy: f32 },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Sprite {
        image: ImageRef,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Text { x: f32, y: f32, text: String },
}

impl fmt::Display for PaintCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintCommand::BeginWindow(p) => write!(f, "begin_window {} {}", p.x, p.y),
            PaintCommand::EndWindow => f.write_str("end_window"),
            PaintCommand::BeginDraw { width, height } => write!(f, "begin_draw {width} {height}"),
            PaintCommand::EndDraw => f.write_str("end_draw"),
            PaintCommand::BeginRow => f.write_str("begin_row"),
            PaintCommand::EndRow => f.write_str("end_row"),
            PaintCommand::SetColor(c) => write!(f, "color {} {} {} {}", c.r, c.g, c.b, c.a),
            PaintCommand::SetText(Some(t)) => write!(f, "text {t:?}"),
            PaintCommand::SetText(None) => f.write_str("text none"),
            PaintCommand::SetTextEntry(Some(e)) => write!(f, "text_entry {e}"),
            PaintCommand::SetTextEntry(None) => f.write_str("text_entry none"),
            PaintCommand::SetTextOptions(o) => write!(f, "font {} {}", o.font, o.scale),
            PaintCommand::Move { dx, dy } => write!(f, "move {dx} {dy}"),
            PaintCommand::Rect {
                x,
                y,
                width,
                height,
            } => write!(f, "rect {x} {y} {width} {height}"),
            PaintCommand::Sprite {
                image,
                x,
                y,
                width,
                height,
            } => {
                let ImageRef { dictionary, name } = image;
                write!(f, "sprite {dictionary}/{name} {x} {y} {width} {height}")
            }
            PaintCommand::Text { x, y, text } => write!(f, "draw_text {x} {y} {text:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// RecordingPainter
// ---------------------------------------------------------------------------

/// A [`Painter`] that records every call and does simple flow layout.
#[derive(Debug, Clone)]
pub struct RecordingPainter {
    style: Style,
    commands: Vec<PaintCommand>,
    /// Width of one character of pending text, for `text_width`.
    pub char_width: f32,
    pub aspect_ratio: f32,
    window_origin: Position,
    /// Where the next widget starts.
    cursor: Position,
    /// Current pen position inside the widget being drawn.
    pen: Position,
    in_row: bool,
    row_height: f32,
    widget: Option<Rect>,
    text: Option<String>,
    entry: Option<String>,
}

impl Default for RecordingPainter {
    fn default() -> Self {
        Self::new(Style::new())
    }
}

impl RecordingPainter {
    pub fn new(style: Style) -> Self {
        Self {
            style,
            commands: Vec::new(),
            char_width: 0.0625,
            aspect_ratio: 1.0,
            window_origin: Position::default(),
            cursor: Position::default(),
            pen: Position::default(),
            in_row: false,
            row_height: 0.0,
            widget: None,
            text: None,
            entry: None,
        }
    }

    /// All commands recorded so far.
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Take the recorded commands, leaving the log empty.
    pub fn take_commands(&mut self) -> Vec<PaintCommand> {
        std::mem::take(&mut self.commands)
    }

    fn record(&mut self, command: PaintCommand) {
        self.commands.push(command);
    }

    fn pending_text(&self) -> Option<&str> {
        self.text.as_deref().or(self.entry.as_deref())
    }
}

impl Painter for RecordingPainter {
    fn begin_window(&mut self, anchor: Position) {
        self.window_origin = anchor;
        self.cursor = anchor;
        self.widget = None;
        self.record(PaintCommand::BeginWindow(anchor));
    }

    fn end_window(&mut self) -> Position {
        self.record(PaintCommand::EndWindow);
        self.window_origin
    }

    fn begin_draw(&mut self, width: f32, height: f32) {
        self.widget = Some(Rect::new(self.cursor.x, self.cursor.y, width, height));
        self.pen = self.cursor;
        self.record(PaintCommand::BeginDraw { width, height });
    }

    fn end_draw(&mut self) {
        if let Some(rect) = self.widget {
            if self.in_row {
                self.cursor.x += rect.width;
                self.row_height = self.row_height.max(rect.height);
            } else {
                self.cursor.y += rect.height;
            }
        }
        self.text = None;
        self.entry = None;
        self.record(PaintCommand::EndDraw);
    }

    fn begin_row(&mut self) {
        self.in_row = true;
        self.row_height = 0.0;
        self.record(PaintCommand::BeginRow);
    }

    fn end_row(&mut self) {
        self.in_row = false;
        self.cursor = Position::new(self.window_origin.x, self.cursor.y + self.row_height);
        self.record(PaintCommand::EndRow);
    }

    fn widget_rect(&self) -> Option<Rect> {
        self.widget
    }

    fn set_color(&mut self, color: Color) {
        self.record(PaintCommand::SetColor(color));
    }

    fn set_text(&mut self, text: Option<&str>) {
        self.text = text.map(str::to_owned);
        self.record(PaintCommand::SetText(self.text.clone()));
    }

    fn set_text_entry(&mut self, entry: Option<&TextEntry>) {
        self.entry = entry.map(|e| e.entry.clone());
        self.record(PaintCommand::SetTextEntry(self.entry.clone()));
    }

    fn set_text_options(&mut self, options: TextOptions) {
        self.record(PaintCommand::SetTextOptions(options));
    }

    fn text_width(&self) -> f32 {
        self.pending_text()
            .map_or(0.0, |t| t.chars().count() as f32 * self.char_width)
    }

    fn move_by(&mut self, dx: f32, dy: f32) {
        self.pen = self.pen + Position::new(dx, dy);
        self.record(PaintCommand::Move { dx, dy });
    }

    fn draw_rect(&mut self, width: f32, height: f32) {
        self.record(PaintCommand::Rect {
            x: self.pen.x,
            y: self.pen.y,
            width,
            height,
        });
    }

    fn draw_sprite(&mut self, image: &ImageRef, width: f32, height: f32) {
        self.record(PaintCommand::Sprite {
            image: image.clone(),
            x: self.pen.x,
            y: self.pen.y,
            width,
            height,
        });
    }

    fn draw_text(&mut self) {
        let text = self.pending_text().unwrap_or_default().to_owned();
        self.record(PaintCommand::Text {
            x: self.pen.x,
            y: self.pen.y,
            text,
        });
    }

    fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    fn style(&self) -> &Style {
        &self.style
    }

    fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }
}

// ---------------------------------------------------------------------------
// ScriptedInput
// ---------------------------------------------------------------------------

/// An [`Input`] whose pointer position and button state are set by the test.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    pub pointer: Position,
    pub primary_pressed: bool,
    windows_begun: usize,
    windows_ended: usize,
}

impl ScriptedInput {
    /// Place the pointer (builder).
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.pointer = Position::new(x, y);
        self
    }

    /// Hold the primary button down (builder).
    pub fn pressed(mut self) -> Self {
        self.primary_pressed = true;
        self
    }

    pub fn windows_begun(&self) -> usize {
        self.windows_begun
    }

    pub fn windows_ended(&self) -> usize {
        self.windows_ended
    }
}

impl Input for ScriptedInput {
    fn begin_window(&mut self) {
        self.windows_begun += 1;
    }

    fn end_window(&mut self) {
        self.windows_ended += 1;
    }

    fn is_rect_hovered(&self, rect: Rect) -> bool {
        rect.contains(self.pointer)
    }

    fn is_primary_pressed(&self) -> bool {
        self.primary_pressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_flows_down_then_across_rows() {
        let mut painter = RecordingPainter::default();
        painter.begin_window(Position::new(0.25, 0.25));

        painter.begin_draw(0.125, 0.125);
        assert_eq!(
            painter.widget_rect(),
            Some(Rect::new(0.25, 0.25, 0.125, 0.125))
        );
        painter.end_draw();

        painter.begin_row();
        painter.begin_draw(0.25, 0.0625);
        painter.end_draw();
        painter.begin_draw(0.25, 0.125);
        assert_eq!(
            painter.widget_rect(),
            Some(Rect::new(0.5, 0.375, 0.25, 0.125))
        );
        painter.end_draw();
        painter.end_row();

        painter.begin_draw(0.125, 0.125);
        assert_eq!(
            painter.widget_rect(),
            Some(Rect::new(0.25, 0.5, 0.125, 0.125))
        );
        painter.end_draw();

        assert_eq!(painter.end_window(), Position::new(0.25, 0.25));
    }

    #[test]
    fn text_width_counts_pending_text() {
        let mut painter = RecordingPainter::default();
        assert_eq!(painter.text_width(), 0.0);
        painter.set_text(Some("abcd"));
        assert_eq!(painter.text_width(), 0.25);
        painter.end_draw();
        assert_eq!(painter.text_width(), 0.0);
    }

    #[test]
    fn scripted_input_hit_test() {
        let input = ScriptedInput::default().at(0.5, 0.5).pressed();
        assert!(input.is_rect_hovered(Rect::new(0.25, 0.25, 0.5, 0.5)));
        assert!(!input.is_rect_hovered(Rect::new(0.0, 0.0, 0.25, 0.25)));
        assert!(input.is_primary_pressed());
    }

    #[test]
    fn command_display() {
        assert_eq!(
            PaintCommand::SetColor(Color::rgb(1, 2, 3)).to_string(),
            "color 1 2 3 255"
        );
        assert_eq!(
            PaintCommand::SetText(Some("Hi".into())).to_string(),
            "text \"Hi\""
        );
        assert_eq!(
            PaintCommand::Move { dx: 0.5, dy: -0.25 }.to_string(),
            "move 0.5 -0.25"
        );
    }
}
