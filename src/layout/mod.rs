//! Layout reconstruction from positioned text.
//!
//! - [`TextBlock`]: one extracted run with its geometry and style
//! - [`LayoutRegion`]: a cluster of blocks sharing left and right edges
//! - [`LayoutMapper`]: region clustering, alignment, line spacing, columns
//!   and position/content lookup

pub mod mapper;
pub mod region;
pub mod text_block;

pub use mapper::{Alignment, LayoutMapper};
pub use region::LayoutRegion;
pub use text_block::{Color, TextBlock};
