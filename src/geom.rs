#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::Serialize;

/// A position in container space. Origin is the container's top-left corner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair in logical units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Bottom edge of a box of this size placed at `origin`.
    #[must_use]
    pub fn bottom_at(&self, origin: Point) -> f64 {
        origin.y + self.height
    }
}
