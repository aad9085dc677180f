//! Glue between the board model and the layout engine.
//!
//! The layout engine knows nothing about panels and the board model knows
//! nothing about layout. The host wraps each panel in a [`PanelView`] (the
//! panel's on-screen widget stand-in) and hands the views to
//! [`Masonry::layout`].

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;

use serde::Serialize;

use crate::geom::{Point, Size};
use crate::layout::{Flowable, Masonry, Sizing, derived_height};
use crate::panel::{Panel, PanelKind};
use crate::text::{self, TextStyle};

/// A panel as placed on screen.
#[derive(Debug, Clone)]
pub struct PanelView<'a> {
    panel: &'a Panel,
    position: Point,
    size: Size,
}

impl<'a> PanelView<'a> {
    #[must_use]
    pub fn new(panel: &'a Panel) -> Self {
        Self { panel, position: Point::default(), size: Size::default() }
    }

    #[must_use]
    pub fn panel(&self) -> &'a Panel {
        self.panel
    }

    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }
}

impl Flowable for PanelView<'_> {
    fn sizing(&self) -> Sizing {
        match self.panel {
            Panel::Image(img) => Sizing::Aspect(img.aspect()),
            Panel::Color(_) => Sizing::Swatch,
            Panel::Text { .. } | Panel::RawString(_) => Sizing::Wrapped,
        }
    }

    fn resize(&mut self, size: Size) {
        self.size = size;
    }

    fn min_height(&self) -> f64 {
        let width = self.size.width;
        match self.panel {
            Panel::Text { markdown } => text::plain_height(markdown, width, TextStyle::body()),
            Panel::RawString(raw) => text::markdown_height(&text::heading_markdown(raw), width),
            Panel::Image(_) | Panel::Color(_) => derived_height(self.sizing(), width).unwrap_or_default(),
        }
    }

    fn move_to(&mut self, position: Point) {
        self.position = position;
    }
}

/// One panel's resolved geometry, ready for a host to draw.
#[derive(Debug, Clone, Serialize)]
pub struct PanelFrame {
    pub index: usize,
    pub kind: PanelKind,
    pub summary: String,
    pub column: usize,
    pub position: Point,
    pub size: Size,
}

/// Result of laying out a whole board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardLayout {
    pub columns: usize,
    pub min_size: Size,
    pub frames: Vec<PanelFrame>,
}

/// Lay out `panels` at `container_width` with `masonry`.
pub fn layout_panels(masonry: &mut Masonry, panels: &[Panel], container_width: f64) -> BoardLayout {
    let mut views: Vec<PanelView<'_>> = panels.iter().map(PanelView::new).collect();
    let placements = masonry.layout(&mut views, container_width);

    let frames = placements
        .into_iter()
        .map(|p| {
            let panel = views[p.index].panel();
            PanelFrame {
                index: p.index,
                kind: panel.kind(),
                summary: panel.summary(),
                column: p.column,
                position: p.position,
                size: p.size,
            }
        })
        .collect();

    BoardLayout { columns: masonry.columns(), min_size: masonry.min_size(), frames }
}
