/// A point in PDF user space (bottom-left origin, page units).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Visible page extent taken from the MediaBox.
///
/// Only the extents matter for placement; the box's lower-left corner is
/// treated as the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Build a page size from a `[x0, y0, x1, y1]` box, tolerating inverted corners.
    pub fn from_box(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self {
            width: (x1 - x0).abs(),
            height: (y1 - y0).abs(),
        }
    }
}
