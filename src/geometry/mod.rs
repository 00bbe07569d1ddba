//! Geometric primitives for layout analysis.
//!
//! Page coordinates are in points with y increasing downward, the way the
//! PDF engine reports span boxes.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle given by its corners.
///
/// A `Rect` can only be built through [`Rect::new`], which rejects boxes with
/// `x1 < x0` or `y1 < y0`, so `width()` and `height()` are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f32; 4]", into = "[f32; 4]")]
pub struct Rect {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl Rect {
    /// Create a rectangle from its top-left and bottom-right corners.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_retext::geometry::Rect;
    ///
    /// let rect = Rect::new(10.0, 20.0, 110.0, 70.0).unwrap();
    /// assert_eq!(rect.width(), 100.0);
    /// assert_eq!(rect.height(), 50.0);
    ///
    /// assert!(Rect::new(10.0, 20.0, 5.0, 70.0).is_err());
    /// ```
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Result<Self> {
        // NaN fails both comparisons, so it is rejected too
        if !(x1 >= x0 && y1 >= y0) {
            return Err(Error::MalformedGeometry { x0, y0, x1, y1 });
        }
        Ok(Self { x0, y0, x1, y1 })
    }

    /// Left edge.
    pub fn x0(&self) -> f32 {
        self.x0
    }

    /// Top edge.
    pub fn y0(&self) -> f32 {
        self.y0
    }

    /// Right edge.
    pub fn x1(&self) -> f32 {
        self.x1
    }

    /// Bottom edge.
    pub fn y1(&self) -> f32 {
        self.y1
    }

    /// Width (never negative).
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    /// Height (never negative).
    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Center point.
    pub fn center(&self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Check if the rectangle contains a point (edges inclusive).
    pub fn contains_point(&self, p: &Point) -> bool {
        p.x >= self.x0 && p.x <= self.x1 && p.y >= self.y0 && p.y <= self.y1
    }

    /// Check if `other` lies entirely inside this rectangle, allowing `slack`
    /// points of overhang on every side.
    pub fn contains_rect(&self, other: &Rect, slack: f32) -> bool {
        other.x0 >= self.x0 - slack
            && other.y0 >= self.y0 - slack
            && other.x1 <= self.x1 + slack
            && other.y1 <= self.y1 + slack
    }

    /// Corners as `[x0, y0, x1, y1]`.
    pub fn to_array(&self) -> [f32; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

impl TryFrom<[f32; 4]> for Rect {
    type Error = Error;

    fn try_from(value: [f32; 4]) -> Result<Self> {
        Rect::new(value[0], value[1], value[2], value[3])
    }
}

impl From<Rect> for [f32; 4] {
    fn from(rect: Rect) -> Self {
        rect.to_array()
    }
}
