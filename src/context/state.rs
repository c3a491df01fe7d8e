//! Transient state containers: window-scoped and draw-scoped overrides.
//!
//! Overrides come in two layers. The "next" layer lives in [`DrawState`] and is
//! cleared at every `end_draw`; the "pushed" layer lives in [`WindowState`] and
//! is cleared at `end_window` (or by an explicit pop). Reads prefer "next".

use std::fmt;

use bitflags::bitflags;

use crate::geometry::Position;

// ---------------------------------------------------------------------------
// ScopedOverride
// ---------------------------------------------------------------------------

/// An optional value owned by a scope and cleared when that scope ends.
#[derive(Debug, Clone, PartialEq)]
pub struct ScopedOverride<T> {
    value: Option<T>,
}

impl<T> Default for ScopedOverride<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> ScopedOverride<T> {
    /// An unset override.
    pub const fn empty() -> Self {
        Self { value: None }
    }

    /// Set the value, replacing any previous one.
    pub fn set(&mut self, value: T) {
        self.value = Some(value);
    }

    /// Clear the value, returning what was set.
    pub fn clear(&mut self) -> Option<T> {
        self.value.take()
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_set(&self) -> bool {
        self.value.is_some()
    }

    /// Resolve two layers: `self` (the inner one-shot layer) wins over `outer`.
    pub fn or<'a>(&'a self, outer: &'a ScopedOverride<T>) -> Option<&'a T> {
        self.get().or_else(|| outer.get())
    }
}

// ---------------------------------------------------------------------------
// Text entries
// ---------------------------------------------------------------------------

/// One substitution argument for a text entry.
#[derive(Debug, Clone, PartialEq)]
pub enum TextComponent {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for TextComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextComponent::Str(s) => f.write_str(s),
            TextComponent::Int(n) => write!(f, "{n}"),
            TextComponent::Float(n) => write!(f, "{n}"),
            TextComponent::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for TextComponent {
    fn from(s: &str) -> Self {
        TextComponent::Str(s.to_owned())
    }
}

impl From<String> for TextComponent {
    fn from(s: String) -> Self {
        TextComponent::Str(s)
    }
}

impl From<i32> for TextComponent {
    fn from(n: i32) -> Self {
        TextComponent::Int(n.into())
    }
}

impl From<i64> for TextComponent {
    fn from(n: i64) -> Self {
        TextComponent::Int(n)
    }
}

impl From<f32> for TextComponent {
    fn from(n: f32) -> Self {
        TextComponent::Float(n.into())
    }
}

impl From<f64> for TextComponent {
    fn from(n: f64) -> Self {
        TextComponent::Float(n)
    }
}

impl From<bool> for TextComponent {
    fn from(b: bool) -> Self {
        TextComponent::Bool(b)
    }
}

/// A host text-entry id plus the components substituted into it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub entry: String,
    pub components: Vec<TextComponent>,
}

impl TextEntry {
    /// Create an entry with no components.
    pub fn new(entry: impl Into<String>) -> Self {
        Self {
            entry: entry.into(),
            components: Vec::new(),
        }
    }

    /// Append a component (builder).
    pub fn with(mut self, component: impl Into<TextComponent>) -> Self {
        self.components.push(component.into());
        self
    }
}

impl From<&str> for TextEntry {
    fn from(entry: &str) -> Self {
        TextEntry::new(entry)
    }
}

impl From<String> for TextEntry {
    fn from(entry: String) -> Self {
        TextEntry::new(entry)
    }
}

// ---------------------------------------------------------------------------
// WindowFlags
// ---------------------------------------------------------------------------

bitflags! {
    /// Per-window behavior toggles, set before `begin_window` and cleared at `end_window`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u8 {
        const NO_DRAG = 1 << 1;
        const NO_BACKGROUND = 1 << 2;
    }
}

impl Default for WindowFlags {
    fn default() -> Self {
        WindowFlags::empty()
    }
}

// ---------------------------------------------------------------------------
// WindowState / DrawState
// ---------------------------------------------------------------------------

/// State owned by the current window scope.
///
/// There is one of these per context, reset rather than recreated at every
/// `end_window`.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowState {
    pub(crate) text: ScopedOverride<TextEntry>,
    pub(crate) widget_width: ScopedOverride<f32>,
    pub(crate) widget_id: ScopedOverride<String>,
    pub(crate) id: ScopedOverride<String>,
    pub(crate) spacing: ScopedOverride<Position>,
    pub(crate) flags: WindowFlags,
    skip_drawing: u32,
}

impl WindowState {
    /// Create window state that skips drawing for the first `skip_drawing` windows.
    pub fn new(skip_drawing: u32) -> Self {
        Self {
            text: ScopedOverride::empty(),
            widget_width: ScopedOverride::empty(),
            widget_id: ScopedOverride::empty(),
            id: ScopedOverride::empty(),
            spacing: ScopedOverride::empty(),
            flags: WindowFlags::empty(),
            skip_drawing,
        }
    }

    pub fn flags(&self) -> WindowFlags {
        self.flags
    }

    /// Remaining windows whose drawing is skipped.
    pub fn skip_drawing(&self) -> u32 {
        self.skip_drawing
    }

    /// Raise the skip counter so at least the current window is skipped.
    pub(crate) fn request_skip_drawing(&mut self) {
        self.skip_drawing = self.skip_drawing.max(1);
    }

    /// Clear everything the window scope owns and count down the skip counter.
    pub fn end_window(&mut self) {
        self.text.clear();
        self.widget_width.clear();
        self.widget_id.clear();
        self.id.clear();
        self.spacing.clear();
        self.flags = WindowFlags::empty();
        self.skip_drawing = self.skip_drawing.saturating_sub(1);
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self::new(1)
    }
}

/// One-shot "next" overrides, consumed at the end of the draw scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawState {
    pub(crate) text: ScopedOverride<TextEntry>,
    pub(crate) widget_width: ScopedOverride<f32>,
    pub(crate) widget_id: ScopedOverride<String>,
}

impl DrawState {
    pub fn end_draw(&mut self) {
        self.text.clear();
        self.widget_width.clear();
        self.widget_id.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoped_override_set_and_clear() {
        let mut slot = ScopedOverride::empty();
        assert!(!slot.is_set());
        slot.set(3);
        slot.set(4);
        assert_eq!(slot.get(), Some(&4));
        assert_eq!(slot.clear(), Some(4));
        assert_eq!(slot.get(), None);
    }

    #[test]
    fn inner_layer_wins() {
        let mut next = ScopedOverride::empty();
        let mut pushed = ScopedOverride::empty();
        assert_eq!(next.or(&pushed), None);
        pushed.set("b");
        assert_eq!(next.or(&pushed), Some(&"b"));
        next.set("a");
        assert_eq!(next.or(&pushed), Some(&"a"));
    }

    #[test]
    fn text_entry_builder() {
        let entry = TextEntry::new("MONEY_FMT")
            .with("$")
            .with(42)
            .with(0.5f64)
            .with(true);
        assert_eq!(entry.entry, "MONEY_FMT");
        assert_eq!(
            entry.components,
            vec![
                TextComponent::Str("$".into()),
                TextComponent::Int(42),
                TextComponent::Float(0.5),
                TextComponent::Bool(true),
            ]
        );
        let rendered: Vec<String> = entry.components.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["$", "42", "0.5", "true"]);
    }

    #[test]
    fn window_flags_only_use_defined_bits() {
        let flags = WindowFlags::NO_DRAG | WindowFlags::NO_BACKGROUND;
        assert_eq!(flags.bits() & !WindowFlags::all().bits(), 0);
        assert_eq!(WindowFlags::from_bits(1), None);
        assert_eq!(WindowFlags::default(), WindowFlags::empty());
    }

    #[test]
    fn end_window_resets_everything() {
        let mut state = WindowState::new(2);
        state.text.set("a".into());
        state.widget_width.set(0.25);
        state.widget_id.set("button".into());
        state.id.set("main".into());
        state.spacing.set(Position::new(0.5, 0.5));
        state.flags = WindowFlags::NO_DRAG;

        state.end_window();

        assert_eq!(state, WindowState::new(1));
    }

    #[test]
    fn skip_counter_saturates_at_zero() {
        let mut state = WindowState::default();
        assert_eq!(state.skip_drawing(), 1);
        state.end_window();
        assert_eq!(state.skip_drawing(), 0);
        state.end_window();
        state.end_window();
        assert_eq!(state.skip_drawing(), 0);
    }

    #[test]
    fn request_skip_raises_to_one() {
        let mut state = WindowState::new(0);
        state.request_skip_drawing();
        assert_eq!(state.skip_drawing(), 1);

        let mut state = WindowState::new(3);
        state.request_skip_drawing();
        assert_eq!(state.skip_drawing(), 3);
    }

    #[test]
    fn end_draw_clears_next_layer() {
        let mut draw = DrawState::default();
        draw.text.set("a".into());
        draw.widget_width.set(0.5);
        draw.widget_id.set("label".into());
        draw.end_draw();
        assert_eq!(draw, DrawState::default());
    }
}
