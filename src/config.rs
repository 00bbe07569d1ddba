//! Configuration for layout reconstruction and editing.

use crate::error::{Error, Result};
use serde::Deserialize;

/// Thresholds used by [`LayoutMapper`](crate::layout::LayoutMapper).
///
/// All distances are in page points.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Edge tolerance when deciding whether a block joins an existing region.
    pub region_tolerance: f32,

    /// Slack around a block's box for point lookups.
    pub position_tolerance: f32,

    /// Horizontal gap that starts a new column.
    pub column_gap: f32,

    /// Maximum distance between the text midpoint and page center for CENTER.
    pub center_tolerance: f32,

    /// Fraction of page width the mean right edge must exceed for RIGHT.
    pub right_edge_ratio: f32,

    /// Fraction of page width the mean span must exceed for JUSTIFIED.
    pub justified_span_ratio: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            region_tolerance: 5.0,
            position_tolerance: 5.0,
            column_gap: 20.0,
            center_tolerance: 20.0,
            right_edge_ratio: 0.8,
            justified_span_ratio: 0.7,
        }
    }

    /// Set the region clustering tolerance.
    pub fn with_region_tolerance(mut self, tolerance: f32) -> Self {
        self.region_tolerance = tolerance;
        self
    }

    /// Set the point lookup tolerance.
    pub fn with_position_tolerance(mut self, tolerance: f32) -> Self {
        self.position_tolerance = tolerance;
        self
    }

    /// Set the column gap.
    pub fn with_column_gap(mut self, gap: f32) -> Self {
        self.column_gap = gap;
        self
    }

    /// Set the center alignment tolerance.
    pub fn with_center_tolerance(mut self, tolerance: f32) -> Self {
        self.center_tolerance = tolerance;
        self
    }

    /// Reject negative distances and ratios outside `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("region_tolerance", self.region_tolerance),
            ("position_tolerance", self.position_tolerance),
            ("column_gap", self.column_gap),
            ("center_tolerance", self.center_tolerance),
        ];
        for (name, value) in distances {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!("{} must be >= 0, got {}", name, value)));
            }
        }
        for (name, value) in [
            ("right_edge_ratio", self.right_edge_ratio),
            ("justified_span_ratio", self.justified_span_ratio),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Editor-wide configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Layout reconstruction thresholds.
    pub layout: LayoutConfig,

    /// Font size used when a page has no text to borrow a style from.
    pub default_font_size: f32,

    /// Ask the backend to garbage-collect and deflate on save.
    pub compact_on_save: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorConfig {
    /// Create new configuration with defaults.
    pub fn new() -> Self {
        Self {
            layout: LayoutConfig::default(),
            default_font_size: 12.0,
            compact_on_save: true,
        }
    }

    /// Parse a JSON configuration; missing keys keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the layout thresholds.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the fallback font size.
    pub fn with_default_font_size(mut self, size: f32) -> Self {
        self.default_font_size = size;
        self
    }

    /// Enable or disable compaction on save.
    pub fn with_compact_on_save(mut self, enable: bool) -> Self {
        self.compact_on_save = enable;
        self
    }

    /// Validate all values.
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        if !(self.default_font_size > 0.0 && self.default_font_size.is_finite()) {
            return Err(Error::InvalidConfig(format!(
                "default_font_size must be > 0, got {}",
                self.default_font_size
            )));
        }
        Ok(())
    }
}
