//! Core geometry types: Position, Rect.
//!
//! Coordinates are in normalized screen units (`0.0..=1.0` spans the screen),
//! the space every window anchor and widget rectangle is expressed in.

use std::ops::{Add, Sub};

// ---------------------------------------------------------------------------
// Position
// ---------------------------------------------------------------------------

/// A 2D point or displacement in normalized screen units.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The screen center, the default window anchor.
    pub const CENTER: Position = Position { x: 0.5, y: 0.5 };

    /// Create a new position.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Position {
    type Output = Position;
    #[inline]
    fn add(self, rhs: Position) -> Position {
        Position {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for Position {
    type Output = Position;
    #[inline]
    fn sub(self, rhs: Position) -> Position {
        Position {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle defined by its top-left corner and size.
///
/// This is what the painter reports for the widget it is currently drawing
/// and what the input layer hit-tests against.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(self) -> f32 {
        self.y + self.height
    }

    /// Whether the point lies inside the rectangle.
    ///
    /// The top and left edges are inclusive, the bottom and right edges exclusive,
    /// so two rectangles sharing an edge never both contain a point on it.
    #[inline]
    pub fn contains(self, point: Position) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Return this rectangle moved by `offset`.
    #[inline]
    pub fn translate(self, offset: Position) -> Rect {
        Rect {
            x: self.x + offset.x,
            y: self.y + offset.y,
            ..self
        }
    }
}
