//! Geometry primitives in the view coordinate space.
//!
//! All coordinates here are logical points as reported by the view
//! hierarchy, not device pixels. Pixel-space screen dimensions are
//! converted through [`crate::screen::ScreenMetrics`].

use serde::{Deserialize, Serialize};

// =============================================================================
// POINT
// =============================================================================

/// A point in the view coordinate space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate in points
    pub x: f64,
    /// Y coordinate in points
    pub y: f64,
}

impl Point {
    /// Create a new point
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// =============================================================================
// RECT
// =============================================================================

/// A rectangle in the view coordinate space
///
/// `x`/`y` are the top-left corner; the y axis grows downward, so the
/// bottom edge is `y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge in points
    pub x: f64,
    /// Top edge in points
    pub y: f64,
    /// Width in points
    pub width: f64,
    /// Height in points
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bottom edge (`y + height`)
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Right edge (`x + width`)
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Center point
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether `point` lies inside the rectangle (edges included)
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.right()
            && point.y >= self.y
            && point.y <= self.bottom()
    }
}

// =============================================================================
// TESTS
// =============================================================================
