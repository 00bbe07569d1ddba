//! Spatial clusters of text blocks.

use crate::geometry::{Point, Rect};
use crate::layout::text_block::TextBlock;
use serde::Serialize;

/// A geometry-based cluster of blocks on one page.
///
/// The bounding box is taken from the first member and never grows as more
/// blocks are absorbed, so it only approximates the area the members cover.
/// Members are kept in discovery order, which is not necessarily reading
/// order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRegion {
    bbox: Rect,
    page: usize,
    blocks: Vec<TextBlock>,
}

impl LayoutRegion {
    /// Start a region seeded by `block`.
    pub fn from_block(block: TextBlock) -> Self {
        Self {
            bbox: block.bbox,
            page: block.page,
            blocks: vec![block],
        }
    }

    /// Add a member. The region box stays as it is.
    pub(crate) fn push(&mut self, block: TextBlock) {
        self.blocks.push(block);
    }

    /// Region bounding box (the seed block's box).
    pub fn bbox(&self) -> &Rect {
        &self.bbox
    }

    /// Page index.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Member blocks in discovery order.
    pub fn blocks(&self) -> &[TextBlock] {
        &self.blocks
    }

    /// Left edge.
    pub fn x0(&self) -> f32 {
        self.bbox.x0()
    }

    /// Top edge.
    pub fn y0(&self) -> f32 {
        self.bbox.y0()
    }

    /// Right edge.
    pub fn x1(&self) -> f32 {
        self.bbox.x1()
    }

    /// Bottom edge.
    pub fn y1(&self) -> f32 {
        self.bbox.y1()
    }

    /// Region width.
    pub fn width(&self) -> f32 {
        self.bbox.width()
    }

    /// Region height.
    pub fn height(&self) -> f32 {
        self.bbox.height()
    }

    /// Region center.
    pub fn center(&self) -> Point {
        self.bbox.center()
    }

    /// Member texts joined with single spaces.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
