//! Integration tests for layout reconstruction.
//!
//! Blocks are built by hand to simulate typical page structures: a centered
//! title, flush-right dates, two-column bodies.

use pdf_retext::config::LayoutConfig;
use pdf_retext::geometry::Rect;
use pdf_retext::layout::{Alignment, LayoutMapper, TextBlock};

// ============================================================================
// Helper Functions
// ============================================================================

fn block(text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> TextBlock {
    TextBlock::new(text, Rect::new(x0, y0, x1, y1).unwrap())
}

fn block_on(page: usize, text: &str, x0: f32, y0: f32, x1: f32, y1: f32) -> TextBlock {
    block(text, x0, y0, x1, y1).at(page, 0, 0)
}

/// Two columns of three lines each, 72pt margins on a Letter page.
fn two_column_page() -> Vec<TextBlock> {
    let mut blocks = Vec::new();
    for i in 0..3 {
        let y = 100.0 + i as f32 * 14.0;
        blocks.push(block(&format!("left {}", i), 72.0, y, 290.0, y + 12.0));
    }
    for i in 0..3 {
        let y = 100.0 + i as f32 * 14.0;
        blocks.push(block(&format!("right {}", i), 322.0, y, 540.0, y + 12.0));
    }
    blocks
}

// ============================================================================
// Alignment
// ============================================================================

#[test]
fn test_alignment_thresholds_on_letter() {
    let mapper = LayoutMapper::new();
    let width = 612.0;

    let centered = vec![block("Title", 256.0, 50.0, 356.0, 70.0)];
    assert_eq!(mapper.detect_alignment(&centered, width), Alignment::Center);

    let right = vec![block("June 2024", 460.0, 80.0, 540.0, 92.0)];
    assert_eq!(mapper.detect_alignment(&right, width), Alignment::Right);

    let left = vec![block("Dear Sir", 72.0, 120.0, 150.0, 132.0)];
    assert_eq!(mapper.detect_alignment(&left, width), Alignment::Left);
}

#[test]
fn test_center_checked_before_justified() {
    let mapper = LayoutMapper::new();
    // spans 468pt (> 0.7 * 612) but its midpoint is the page center
    let full = vec![block("full width", 72.0, 100.0, 540.0, 112.0)];
    assert_eq!(mapper.detect_alignment(&full, 612.0), Alignment::Center);

    // wide but off-center and short of the right threshold
    let wide = vec![block("wide", 20.0, 100.0, 470.0, 112.0)];
    assert_eq!(mapper.detect_alignment(&wide, 612.0), Alignment::Justified);
}

#[test]
fn test_alignment_uses_custom_thresholds() {
    let mapper = LayoutMapper::with_config(LayoutConfig::new().with_center_tolerance(1.0));
    let nearly_centered = vec![block("x", 260.0, 0.0, 360.0, 10.0)];
    // midpoint 310 is 4pt off center
    assert_eq!(mapper.detect_alignment(&nearly_centered, 612.0), Alignment::Left);
    assert_eq!(
        LayoutMapper::new().detect_alignment(&nearly_centered, 612.0),
        Alignment::Center
    );
}

// ============================================================================
// Line spacing
// ============================================================================

#[test]
fn test_line_spacing_exact_gap() {
    let mapper = LayoutMapper::new();
    let blocks = vec![
        block("second", 72.0, 120.0, 200.0, 135.0),
        block("first", 72.0, 100.0, 200.0, 115.0),
    ];
    assert_eq!(mapper.calculate_line_spacing(&blocks), 5.0);
}

#[test]
fn test_line_spacing_ignores_overlaps() {
    let mapper = LayoutMapper::new();
    let blocks = vec![
        block("a", 72.0, 100.0, 200.0, 115.0),
        block("b", 72.0, 110.0, 200.0, 125.0),
        block("c", 72.0, 135.0, 200.0, 150.0),
    ];
    // only the 125 -> 135 gap is positive
    assert_eq!(mapper.calculate_line_spacing(&blocks), 10.0);
    assert_eq!(mapper.calculate_line_spacing(&blocks[..1]), 0.0);
}

// ============================================================================
// Regions and columns
// ============================================================================

#[test]
fn test_region_box_is_fixed_by_first_member() {
    let mut mapper = LayoutMapper::new();
    mapper.add_text_blocks(vec![
        block("first", 72.0, 100.0, 300.0, 112.0),
        block("second", 74.0, 104.0, 302.0, 116.0),
    ]);
    let regions = mapper.get_regions_on_page(0);
    assert_eq!(regions.len(), 1);
    assert_eq!(regions[0].blocks().len(), 2);
    assert_eq!(regions[0].y1(), 112.0);
    assert_eq!(regions[0].text(), "first second");
}

#[test]
fn test_separated_lines_form_separate_regions() {
    let mut mapper = LayoutMapper::new();
    // the second line starts below region.y1 + tolerance
    mapper.add_text_blocks(vec![
        block("line 1", 72.0, 100.0, 300.0, 112.0),
        block("line 2", 72.0, 114.0, 300.0, 126.0),
    ]);
    assert_eq!(mapper.region_count(), 2);
}

#[test]
fn test_feeding_once_vs_twice() {
    let blocks = two_column_page();

    let mut once = LayoutMapper::new();
    once.add_text_blocks(blocks.clone());

    let mut twice = LayoutMapper::new();
    twice.add_text_blocks(blocks.clone());
    twice.add_text_blocks(blocks);

    assert_eq!(once.region_count(), twice.region_count());
    assert_eq!(
        twice.get_regions_on_page(0)[0].blocks().len(),
        2 * once.get_regions_on_page(0)[0].blocks().len()
    );
}

#[test]
fn test_two_column_structure() {
    let mut mapper = LayoutMapper::new();
    mapper.add_text_blocks(two_column_page());

    let columns = mapper.get_column_structure(0);
    assert_eq!(columns.len(), 2);
    assert!(columns[0].iter().all(|r| r.x0() == 72.0));
    assert!(columns[1].iter().all(|r| r.x0() == 322.0));

    // a 40pt gap threshold merges the 32pt gutter
    assert_eq!(mapper.get_column_structure_with_gap(0, 40.0).len(), 1);
    assert!(mapper.get_column_structure(3).is_empty());
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_position_lookup_with_tolerance() {
    let mut mapper = LayoutMapper::new();
    mapper.add_text_blocks(two_column_page());

    let hit = mapper.get_text_at_position(0, 294.0, 105.0).unwrap();
    assert_eq!(hit.text, "left 0");
    assert_eq!(mapper.get_text_at_position(0, 322.0, 135.0).unwrap().text, "right 2");
    assert!(mapper.get_text_at_position(0, 306.0, 105.0).is_none());
    assert!(mapper
        .get_text_at_position_with_tolerance(0, 306.0, 105.0, 20.0)
        .is_some());
    assert!(mapper.get_text_at_position(1, 100.0, 105.0).is_none());
}

#[test]
fn test_find_blocks_across_pages() {
    let mut mapper = LayoutMapper::new();
    mapper.add_text_blocks(vec![
        block_on(0, "Hello World", 72.0, 100.0, 200.0, 112.0),
        block_on(1, "hello again", 72.0, 100.0, 200.0, 112.0),
        block_on(1, "goodbye", 72.0, 300.0, 200.0, 312.0),
    ]);

    assert_eq!(mapper.find_blocks_by_text("HELLO", None).len(), 2);
    let on_second = mapper.find_blocks_by_text("hello", Some(1));
    assert_eq!(on_second.len(), 1);
    assert_eq!(on_second[0].text, "hello again");
    assert!(mapper.find_blocks_by_text("missing", None).is_empty());
    assert_eq!(mapper.pages().collect::<Vec<_>>(), vec![0, 1]);
}
