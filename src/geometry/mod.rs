//! Geometric primitives for layout analysis.
//!
//! Rectangles are stored edge-based (`x0`, `top`, `x1`, `bottom`) because
//! every consumer of this crate reasons about column boundaries and crop
//! regions in terms of edges, not width/height.

use serde::{Deserialize, Serialize};

/// A rectangle in page space, y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub top: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub bottom: f32,
}

impl Rect {
    /// Create a rectangle from its four edges.
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_oxide::geometry::Rect;
    ///
    /// let r = Rect::new(70.0, 110.0, 220.0, 120.0);
    /// assert_eq!(r.width(), 150.0);
    /// assert_eq!(r.height(), 10.0);
    /// ```
    pub fn new(x0: f32, top: f32, x1: f32, bottom: f32) -> Self {
        Self {
            x0,
            top,
            x1,
            bottom,
        }
    }

    /// Width of the rectangle.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Check whether an x position lies within the horizontal span (inclusive).
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_oxide::geometry::Rect;
    ///
    /// let r = Rect::new(20.0, 0.0, 30.0, 100.0);
    /// assert!(r.contains_x(25.0));
    /// assert!(r.contains_x(20.0));
    /// assert!(!r.contains_x(31.0));
    /// ```
    pub fn contains_x(&self, x: f32) -> bool {
        self.x0 <= x && x <= self.x1
    }

    /// Check whether a point lies within the rectangle (inclusive edges).
    ///
    /// # Examples
    ///
    /// ```
    /// use ledger_oxide::geometry::Rect;
    ///
    /// let r = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert!(r.contains(50.0, 25.0));
    /// assert!(!r.contains(50.0, 60.0));
    /// ```
    pub fn contains(&self, x: f32, y: f32) -> bool {
        self.contains_x(x) && self.top <= y && y <= self.bottom
    }
}
