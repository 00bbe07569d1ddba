//! Region, alignment and column reconstruction from block geometry.
//!
//! Regions are built greedily: each block joins the first region on its page
//! whose box matches within the configured tolerance, otherwise it seeds a
//! new region. The result depends on block order, which is why the mapper
//! keeps regions in creation order and never re-sorts them.

use crate::config::LayoutConfig;
use crate::layout::region::LayoutRegion;
use crate::layout::text_block::TextBlock;
use crate::utils::safe_float_cmp;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Horizontal alignment of a group of blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Flush left
    Left,
    /// Centered on the page
    Center,
    /// Flush right
    Right,
    /// Spanning most of the page width
    Justified,
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justified => "justified",
        };
        f.write_str(name)
    }
}

/// Maps blocks into per-page regions and answers spatial queries.
///
/// One mapper is built per loaded document version; regions accumulate
/// across [`add_text_blocks`](Self::add_text_blocks) calls.
#[derive(Debug, Clone, Default)]
pub struct LayoutMapper {
    config: LayoutConfig,
    regions: IndexMap<usize, Vec<LayoutRegion>>,
}

impl LayoutMapper {
    /// Create an empty mapper with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapper with custom thresholds.
    pub fn with_config(config: LayoutConfig) -> Self {
        Self {
            config,
            regions: IndexMap::new(),
        }
    }

    /// Thresholds in use.
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Add blocks to the layout map.
    pub fn add_text_blocks<I>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = TextBlock>,
    {
        let tolerance = self.config.region_tolerance;
        for block in blocks {
            let regions = self.regions.entry(block.page).or_default();
            match regions
                .iter_mut()
                .find(|region| block_fits_region(&block, region, tolerance))
            {
                Some(region) => region.push(block),
                None => {
                    log::debug!(
                        "New region on page {} at ({:.1}, {:.1})",
                        block.page,
                        block.x0(),
                        block.y0()
                    );
                    regions.push(LayoutRegion::from_block(block));
                },
            }
        }
    }

    /// Regions on a page, in creation order. Empty for unknown pages.
    pub fn get_regions_on_page(&self, page: usize) -> &[LayoutRegion] {
        self.regions.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Pages that have at least one region, in the order they were first seen.
    pub fn pages(&self) -> impl Iterator<Item = usize> + '_ {
        self.regions.keys().copied()
    }

    /// Total number of regions across all pages.
    pub fn region_count(&self) -> usize {
        self.regions.values().map(Vec::len).sum()
    }

    /// Detect the alignment of a group of blocks on a page `page_width` wide.
    ///
    /// The checks run in a fixed order (center, right, justified, left) and
    /// the first that matches wins.
    pub fn detect_alignment(&self, blocks: &[TextBlock], page_width: f32) -> Alignment {
        if blocks.is_empty() {
            return Alignment::Left;
        }

        let n = blocks.len() as f32;
        let avg_x0 = blocks.iter().map(|b| b.x0()).sum::<f32>() / n;
        let avg_x1 = blocks.iter().map(|b| b.x1()).sum::<f32>() / n;

        let midpoint = (avg_x0 + avg_x1) / 2.0;
        if (midpoint - page_width / 2.0).abs() < self.config.center_tolerance {
            return Alignment::Center;
        }
        if avg_x1 > page_width * self.config.right_edge_ratio {
            return Alignment::Right;
        }
        if avg_x1 - avg_x0 > page_width * self.config.justified_span_ratio {
            return Alignment::Justified;
        }
        Alignment::Left
    }

    /// Mean positive gap between vertically consecutive blocks.
    ///
    /// Returns 0.0 for fewer than two blocks or when no gap is positive.
    pub fn calculate_line_spacing(&self, blocks: &[TextBlock]) -> f32 {
        if blocks.len() < 2 {
            return 0.0;
        }

        let mut sorted: Vec<&TextBlock> = blocks.iter().collect();
        sorted.sort_by(|a, b| safe_float_cmp(a.y0(), b.y0()));

        let gaps: Vec<f32> = sorted
            .windows(2)
            .map(|pair| pair[1].y0() - pair[0].y1())
            .filter(|gap| *gap > 0.0)
            .collect();

        if gaps.is_empty() {
            0.0
        } else {
            gaps.iter().sum::<f32>() / gaps.len() as f32
        }
    }

    /// First block whose box, grown by the configured tolerance, contains
    /// the point.
    pub fn get_text_at_position(&self, page: usize, x: f32, y: f32) -> Option<&TextBlock> {
        self.get_text_at_position_with_tolerance(page, x, y, self.config.position_tolerance)
    }

    /// Like [`get_text_at_position`](Self::get_text_at_position) with an
    /// explicit tolerance.
    pub fn get_text_at_position_with_tolerance(
        &self,
        page: usize,
        x: f32,
        y: f32,
        tolerance: f32,
    ) -> Option<&TextBlock> {
        self.get_regions_on_page(page)
            .iter()
            .flat_map(|region| region.blocks())
            .find(|block| {
                x >= block.x0() - tolerance
                    && x <= block.x1() + tolerance
                    && y >= block.y0() - tolerance
                    && y <= block.y1() + tolerance
            })
    }

    /// Blocks whose text contains `query`, ignoring case.
    ///
    /// With `page == None` every page is scanned in the order pages were first
    /// seen; within a page results follow region then member order.
    pub fn find_blocks_by_text(&self, query: &str, page: Option<usize>) -> Vec<&TextBlock> {
        let needle = query.to_lowercase();
        let pages: Vec<usize> = match page {
            Some(p) => vec![p],
            None => self.pages().collect(),
        };

        pages
            .into_iter()
            .flat_map(|p| self.get_regions_on_page(p))
            .flat_map(|region| region.blocks())
            .filter(|block| block.text.to_lowercase().contains(&needle))
            .collect()
    }

    /// Group the page's regions into columns using the configured gap.
    pub fn get_column_structure(&self, page: usize) -> Vec<Vec<&LayoutRegion>> {
        self.get_column_structure_with_gap(page, self.config.column_gap)
    }

    /// Group the page's regions into columns, left to right.
    ///
    /// Regions are sorted by left edge; a new column starts whenever a
    /// region's left edge is more than `gap` points right of the previous
    /// region's right edge.
    pub fn get_column_structure_with_gap(&self, page: usize, gap: f32) -> Vec<Vec<&LayoutRegion>> {
        let mut sorted: Vec<&LayoutRegion> = self.get_regions_on_page(page).iter().collect();
        if sorted.is_empty() {
            return Vec::new();
        }
        sorted.sort_by(|a, b| safe_float_cmp(a.x0(), b.x0()));

        let mut columns = Vec::new();
        let mut current = vec![sorted[0]];
        for pair in sorted.windows(2) {
            let (prev, region) = (pair[0], pair[1]);
            if region.x0() - prev.x1() > gap {
                columns.push(std::mem::take(&mut current));
            }
            current.push(region);
        }
        columns.push(current);
        columns
    }
}

fn block_fits_region(block: &TextBlock, region: &LayoutRegion, tolerance: f32) -> bool {
    (block.x0() - region.x0()).abs() < tolerance
        && (block.x1() - region.x1()).abs() < tolerance
        && block.y0() >= region.y0() - tolerance
        && block.y1() <= region.y1() + tolerance
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn block(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> TextBlock {
        TextBlock::new(text, Rect::new(x0, y0, x1, y1).unwrap())
    }

    #[test]
    fn test_nearby_blocks_share_region() {
        let mut mapper = LayoutMapper::new();
        mapper.add_text_blocks(vec![
            block("a", 72.0, 100.0, 300.0, 112.0),
            block("b", 74.0, 103.0, 303.0, 115.0),
        ]);
        assert_eq!(mapper.region_count(), 1);
        assert_eq!(mapper.get_regions_on_page(0)[0].blocks().len(), 2);
    }

    #[test]
    fn test_region_box_does_not_grow() {
        let mut mapper = LayoutMapper::new();
        // The second block fits the seed box; the third would only fit a grown box.
        mapper.add_text_blocks(vec![
            block("a", 72.0, 100.0, 300.0, 112.0),
            block("b", 72.0, 104.0, 300.0, 116.0),
            block("c", 72.0, 108.0, 300.0, 120.0),
        ]);
        let regions = mapper.get_regions_on_page(0);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].bbox().to_array(), [72.0, 100.0, 300.0, 112.0]);
        assert_eq!(regions[1].blocks()[0].text, "c");
    }

    #[test]
    fn test_tolerance_is_strict_on_x() {
        let mut mapper = LayoutMapper::new();
        mapper.add_text_blocks(vec![
            block("a", 100.0, 100.0, 200.0, 112.0),
            block("b", 105.0, 100.0, 200.0, 112.0),
        ]);
        assert_eq!(mapper.region_count(), 2);
    }

    #[test]
    fn test_first_match_wins() {
        let mut mapper = LayoutMapper::new();
        mapper.add_text_blocks(vec![
            block("wide", 100.0, 100.0, 200.0, 140.0),
            block("narrow", 100.0, 130.0, 200.0, 150.0),
            // Fits both regions; the older one takes it.
            block("both", 101.0, 132.0, 201.0, 142.0),
        ]);
        let regions = mapper.get_regions_on_page(0);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].blocks().len(), 2);
        assert_eq!(regions[0].blocks()[1].text, "both");
    }

    #[test]
    fn test_regions_are_per_page() {
        let mut mapper = LayoutMapper::new();
        mapper.add_text_blocks(vec![
            block("p0", 72.0, 100.0, 300.0, 112.0),
            block("p1", 72.0, 100.0, 300.0, 112.0).at(1, 0, 0),
        ]);
        assert_eq!(mapper.get_regions_on_page(0).len(), 1);
        assert_eq!(mapper.get_regions_on_page(1).len(), 1);
        assert!(mapper.get_regions_on_page(5).is_empty());
        assert_eq!(mapper.pages().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_alignment_thresholds() {
        let mapper = LayoutMapper::new();
        let centered = vec![block("c", 256.0, 0.0, 356.0, 10.0)];
        let right = vec![block("r", 400.0, 0.0, 540.0, 10.0)];
        let left = vec![block("l", 72.0, 0.0, 150.0, 10.0)];
        let justified = vec![block("j", 20.0, 0.0, 480.0, 10.0)];

        assert_eq!(mapper.detect_alignment(&centered, 612.0), Alignment::Center);
        assert_eq!(mapper.detect_alignment(&right, 612.0), Alignment::Right);
        assert_eq!(mapper.detect_alignment(&left, 612.0), Alignment::Left);
        assert_eq!(mapper.detect_alignment(&justified, 612.0), Alignment::Justified);
        assert_eq!(mapper.detect_alignment(&[], 612.0), Alignment::Left);
    }

    #[test]
    fn test_center_checked_before_justified() {
        // Spans most of the page and is also centered: center wins.
        let mapper = LayoutMapper::new();
        let wide = vec![block("w", 50.0, 0.0, 562.0, 10.0)];
        assert_eq!(mapper.detect_alignment(&wide, 612.0), Alignment::Center);
    }

    #[test]
    fn test_line_spacing() {
        let mapper = LayoutMapper::new();
        let blocks = vec![block("b", 72.0, 120.0, 200.0, 135.0), block("a", 72.0, 100.0, 200.0, 115.0)];
        assert_eq!(mapper.calculate_line_spacing(&blocks), 5.0);
    }

    #[test]
    fn test_line_spacing_ignores_overlaps() {
        let mapper = LayoutMapper::new();
        let overlapping = vec![block("a", 0.0, 100.0, 10.0, 115.0), block("b", 0.0, 110.0, 10.0, 125.0)];
        assert_eq!(mapper.calculate_line_spacing(&overlapping), 0.0);
        assert_eq!(mapper.calculate_line_spacing(&overlapping[..1]), 0.0);

        let mixed = vec![
            block("a", 0.0, 100.0, 10.0, 110.0),
            block("b", 0.0, 105.0, 10.0, 115.0),
            block("c", 0.0, 125.0, 10.0, 135.0),
        ];
        assert_eq!(mapper.calculate_line_spacing(&mixed), 10.0);
    }

    #[test]
    fn test_text_at_position() {
        let mut mapper = LayoutMapper::new();
        mapper.add_text_blocks(vec![block("Hello", 100.0, 100.0, 150.0, 112.0)]);

        assert_eq!(mapper.get_text_at_position(0, 120.0, 105.0).unwrap().text, "Hello");
        assert!(mapper.get_text_at_position(0, 153.0, 105.0).is_some());
        assert!(mapper.get_text_at_position(0, 156.0, 105.0).is_none());
        assert!(mapper.get_text_at_position_with_tolerance(0, 153.0, 105.0, 0.0).is_none());
        assert!(mapper.get_text_at_position(1, 120.0, 105.0).is_none());
    }

    #[test]
    fn test_find_blocks_case_insensitive() {
        let mut mapper = LayoutMapper::new();
        mapper.add_text_blocks(vec![
            block("Hello World", 72.0, 100.0, 200.0, 112.0),
            block("goodbye", 72.0, 300.0, 200.0, 312.0),
            block("WORLD peace", 72.0, 100.0, 200.0, 112.0).at(1, 0, 0),
        ]);

        let all = mapper.find_blocks_by_text("world", None);
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].text, "Hello World");
        assert_eq!(all[1].text, "WORLD peace");

        let page1 = mapper.find_blocks_by_text("world", Some(1));
        assert_eq!(page1.len(), 1);
        assert!(mapper.find_blocks_by_text("absent", None).is_empty());
    }

    #[test]
    fn test_column_structure() {
        let mut mapper = LayoutMapper::new();
        mapper.add_text_blocks(vec![
            block("right", 320.0, 100.0, 540.0, 112.0),
            block("left", 72.0, 100.0, 290.0, 112.0),
            block("left2", 72.0, 200.0, 290.0, 212.0),
        ]);
        let columns = mapper.get_column_structure(0);
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].len(), 2);
        assert_eq!(columns[1][0].blocks()[0].text, "right");

        // A wider gap threshold merges them.
        assert_eq!(mapper.get_column_structure_with_gap(0, 50.0).len(), 1);
        assert!(mapper.get_column_structure(3).is_empty());
    }
}
