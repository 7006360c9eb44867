//! Layout engine for partitioning a chart viewport
//!
//! This module splits a fixed pixel viewport among the title, legend, comment
//! panel and axis margins, producing a `LayoutResult` the renderers draw into.
//! Small-multiples views get a reduced viewport, a uniform grid and per-cell
//! margins. Everything here is pure: the same inputs always give the same
//! geometry.

pub mod config;
pub mod constants;
pub mod engine;
pub mod position;
pub mod small_multiples;
pub mod types;

pub use config::{
    Breakpoint, CategoryAxisConfig, LayoutConfig, LegendPosition, SmallMultiplesConfig,
};
pub use engine::{axis_margins, carve_peripherals, compute_layout};
pub use position::{comment_box_position, legend_item_offset, legend_position};
pub use small_multiples::{
    compute_cell_layout, compute_grid, small_multiples_viewport, SmallMultiplesCellLayout,
    SmallMultiplesGrid,
};
pub use types::*;
