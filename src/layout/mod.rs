//! Masonry layout: flows heterogeneous panels into uniform-width columns.
//!
//! DESIGN
//! ======
//! Items are dealt to columns round-robin by arrival index, not into the
//! shortest column. Each column keeps a running "next free top"; an item is
//! placed there and the top advances by its height plus padding. The tallest
//! column bottom becomes the content height reported by [`Masonry::min_size`]
//! so a surrounding scroll region can size its extent.
//!
//! Width is always fixed before height. Images and swatches derive height
//! from width directly; wrapped text is provisionally resized to the column
//! width and then asked for its natural height, because wrapping depends on
//! width.
//!
//! A pass is a pure function of the items and container width. Nothing from
//! a previous pass survives except the reported column count and height,
//! both of which are overwritten.

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

use serde::Serialize;

use crate::consts::{DEFAULT_PADDING, MIN_COLUMN_WIDTH, PROVISIONAL_TEXT_HEIGHT, SWATCH_RATIO};
use crate::geom::{Point, Size};

// =============================================================================
// ITEM CONTRACT
// =============================================================================

/// How an item's height follows from the column width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sizing {
    /// Intrinsic width / height of an image.
    Aspect(f64),
    /// Fixed 4:1 color swatch.
    Swatch,
    /// Word-wrapped text; height is measured after width is applied.
    Wrapped,
}

/// An item the masonry layout can position and size.
pub trait Flowable {
    fn sizing(&self) -> Sizing;

    /// Apply a size. Called once with a provisional size for wrapped items
    /// and once with the final size for every item.
    fn resize(&mut self, size: Size);

    /// Natural height at the most recently applied width.
    fn min_height(&self) -> f64;

    fn move_to(&mut self, position: Point);
}

/// Where one item landed in a layout pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    /// Index of the item in the input sequence.
    pub index: usize,
    pub column: usize,
    pub position: Point,
    pub size: Size,
}

// =============================================================================
// COLUMN MATH
// =============================================================================

/// Number of columns that fit `container_width` without any column falling
/// below `min_column_width`. Never less than 1.
#[must_use]
pub fn column_count(container_width: f64, padding: f64, min_column_width: f64) -> usize {
    let fit = ((container_width + padding) / (min_column_width + padding)).floor();
    if !fit.is_finite() || fit < 1.0 {
        return 1;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let cols = fit as usize;
    cols
}

/// Uniform column width for `cols` columns separated by `padding`.
#[must_use]
pub fn column_width(container_width: f64, padding: f64, cols: usize) -> f64 {
    let cols = cols.max(1);
    #[allow(clippy::cast_precision_loss)]
    let width = (container_width - padding * (cols - 1) as f64) / cols as f64;
    width
}

/// Height of an item of the given sizing at `width`, for the kinds whose
/// height does not need measuring. Returns `None` for wrapped text.
#[must_use]
pub fn derived_height(sizing: Sizing, width: f64) -> Option<f64> {
    match sizing {
        Sizing::Aspect(ratio) => Some(width / effective_aspect(ratio)),
        Sizing::Swatch => Some(width * SWATCH_RATIO),
        Sizing::Wrapped => None,
    }
}

/// Aspect ratio actually used for layout. Degenerate ratios (zero, negative,
/// NaN, infinite) lay out as square.
#[must_use]
pub fn effective_aspect(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 { ratio } else { 1.0 }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Round-robin masonry layout. Holds the design constants and the results
/// of the most recent pass.
#[derive(Debug, Clone)]
pub struct Masonry {
    padding: f64,
    min_column_width: f64,
    cols: usize,
    max_height: f64,
}

impl Default for Masonry {
    fn default() -> Self {
        Self::new(DEFAULT_PADDING)
    }
}

impl Masonry {
    #[must_use]
    pub fn new(padding: f64) -> Self {
        Self { padding, min_column_width: MIN_COLUMN_WIDTH, cols: 1, max_height: 0.0 }
    }

    #[must_use]
    pub fn with_min_column_width(mut self, min_column_width: f64) -> Self {
        self.min_column_width = min_column_width;
        self
    }

    /// Column count from the last pass.
    #[must_use]
    pub fn columns(&self) -> usize {
        self.cols
    }

    /// Content height from the last pass.
    #[must_use]
    pub fn content_height(&self) -> f64 {
        self.max_height
    }

    /// Minimum size of the laid-out content. Width is pinned to a single
    /// column; the scroll container's width comes from its parent.
    #[must_use]
    pub fn min_size(&self) -> Size {
        Size::new(self.min_column_width, self.max_height)
    }

    /// Position and size every item for `container_width`.
    pub fn layout<T: Flowable>(&mut self, items: &mut [T], container_width: f64) -> Vec<Placement> {
        self.cols = column_count(container_width, self.padding, self.min_column_width);
        let width = column_width(container_width, self.padding, self.cols);
        self.max_height = 0.0;

        // Only columns that receive an item need a running top.
        let mut tops = vec![0.0_f64; self.cols.min(items.len())];
        let mut placements = Vec::with_capacity(items.len());

        for (index, item) in items.iter_mut().enumerate() {
            let column = index % self.cols;
            let top = tops[column];

            let height = match derived_height(item.sizing(), width) {
                Some(height) => height,
                None => {
                    item.resize(Size::new(width, PROVISIONAL_TEXT_HEIGHT));
                    item.min_height()
                }
            };

            #[allow(clippy::cast_precision_loss)]
            let x = column as f64 * width + column as f64 * self.padding;
            let position = Point::new(x, top);
            let size = Size::new(width, height);
            item.move_to(position);
            item.resize(size);

            tops[column] = top + height + self.padding;
            self.max_height = self.max_height.max(size.bottom_at(position));
            placements.push(Placement { index, column, position, size });
        }

        placements
    }
}
