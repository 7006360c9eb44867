//! Small-multiples layout
//!
//! Laying out a grid of charts happens in two stages. Peripherals (title,
//! legend, comment box) are drawn once for the whole view, so their strips are
//! carved from the outer viewport first. The grid then divides the reduced
//! viewport into equal cells without knowing anything about peripherals, and
//! each cell gets its own axis margins.

use super::config::{LayoutConfig, SmallMultiplesConfig};
use super::constants::cell;
use super::engine::carve_peripherals;
use super::types::{Margins, Rect};

/// Uniform grid with one cell per group value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallMultiplesGrid {
    pub cols: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_height: f64,
}

/// Placement and internal margins of one grid cell
///
/// `x`/`y` are relative to the grid viewport's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallMultiplesCellLayout {
    pub x: f64,
    pub y: f64,
    pub margin: Margins,
    pub header_height: f64,
    pub chart_width: f64,
    pub chart_height: f64,
}

impl SmallMultiplesCellLayout {
    /// Whether the cell has any room to draw its chart in
    pub fn is_drawable(&self) -> bool {
        Rect::new(0.0, 0.0, self.chart_width, self.chart_height).has_area()
    }
}

/// The viewport left for the grid once peripherals took their strips
///
/// Same carving as the single-chart layout, without the axis margin step.
pub fn small_multiples_viewport(width: f64, height: f64, config: &LayoutConfig) -> Rect {
    carve_peripherals(width, height, config).chart_area
}

/// Divide a viewport into a grid of equal cells, one per group
///
/// A group count of zero is laid out as a single cell.
pub fn compute_grid(
    width: f64,
    height: f64,
    group_count: usize,
    config: &SmallMultiplesConfig,
) -> SmallMultiplesGrid {
    let groups = group_count.max(1);
    let cols = if config.columns == 0 {
        let fit = (width / cell::TARGET_WIDTH).floor().max(1.0) as usize;
        groups.min(fit)
    } else {
        config.columns.min(groups)
    };
    let rows = groups.div_ceil(cols);

    let spacing = config.spacing;
    let cell_width =
        ((width - cell::WIDTH_SAFETY - spacing * (cols as f64 + 1.0)) / cols as f64).floor();
    let cell_height = ((height - spacing * (rows as f64 + 1.0)) / rows as f64).floor();

    tracing::debug!(
        group_count,
        cols,
        rows,
        cell_width,
        cell_height,
        "computed small-multiples grid"
    );

    SmallMultiplesGrid {
        cols,
        rows,
        cell_width,
        cell_height,
    }
}

/// Position and inner margins of the cell at `cell_index` (row-major)
pub fn compute_cell_layout(
    grid: &SmallMultiplesGrid,
    cell_index: usize,
    config: &SmallMultiplesConfig,
) -> SmallMultiplesCellLayout {
    let col = cell_index % grid.cols;
    let row = cell_index / grid.cols;
    let spacing = config.spacing;

    let x = spacing + col as f64 * (grid.cell_width + spacing);
    let y = spacing + row as f64 * (grid.cell_height + spacing);

    let header_height = if config.show_headers {
        cell::HEADER_HEIGHT
    } else {
        0.0
    };
    let available_height = grid.cell_height - header_height;

    let category = &config.category_axis;
    let label_space = if category.is_rotated() {
        cell::ROTATED_BASE
            + category.max_width.min(cell::ROTATED_LABEL_CAP) * category.rotation_drop()
    } else {
        cell::BOTTOM_BASE + category.font_size
    };
    // Keep at least 60% of the cell for the chart itself
    let bottom = label_space.min((cell::MAX_BOTTOM_SHARE * available_height).floor());

    let side = cell::SIDE_MAX.min((grid.cell_width * cell::SIDE_SHARE).floor());
    let margin = Margins::new(cell::TOP, side, bottom, side);

    SmallMultiplesCellLayout {
        x,
        y,
        margin,
        header_height,
        chart_width: grid.cell_width - margin.horizontal(),
        chart_height: available_height - margin.vertical(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::config::LegendPosition;

    #[test]
    fn test_viewport_carves_peripherals() {
        let config = LayoutConfig::new()
            .with_title(true)
            .with_legend(LegendPosition::Bottom)
            .with_comment_box(true, true);
        let viewport = small_multiples_viewport(1000.0, 600.0, &config);
        assert_eq!(viewport, Rect::new(0.0, 30.0, 780.0, 540.0));
    }

    #[test]
    fn test_auto_columns_target_cell_width() {
        let config = SmallMultiplesConfig::default();
        let grid = compute_grid(1000.0, 600.0, 6, &config);
        assert_eq!(grid.cols, 4);
        assert_eq!(grid.rows, 2);
        // (1000 - 10 - 50) / 4
        assert_eq!(grid.cell_width, 235.0);
        // (600 - 30) / 2
        assert_eq!(grid.cell_height, 285.0);
    }

    #[test]
    fn test_auto_columns_capped_by_groups() {
        let grid = compute_grid(2000.0, 400.0, 3, &SmallMultiplesConfig::default());
        assert_eq!(grid.cols, 3);
        assert_eq!(grid.rows, 1);
    }

    #[test]
    fn test_fixed_columns() {
        let config = SmallMultiplesConfig::new().with_columns(2);
        let grid = compute_grid(800.0, 600.0, 5, &config);
        assert_eq!(grid.cols, 2);
        assert_eq!(grid.rows, 3);
    }

    #[test]
    fn test_narrow_viewport_uses_one_column() {
        let grid = compute_grid(120.0, 600.0, 4, &SmallMultiplesConfig::default());
        assert_eq!(grid.cols, 1);
        assert_eq!(grid.rows, 4);
    }

    #[test]
    fn test_zero_groups_is_one_cell() {
        let grid = compute_grid(800.0, 600.0, 0, &SmallMultiplesConfig::default());
        assert_eq!((grid.cols, grid.rows), (1, 1));
    }

    #[test]
    fn test_cell_positions_row_major() {
        let config = SmallMultiplesConfig::default();
        let grid = compute_grid(1000.0, 600.0, 6, &config);
        let cell = compute_cell_layout(&grid, 5, &config);
        // col 1, row 1
        assert_eq!(cell.x, 10.0 + 245.0);
        assert_eq!(cell.y, 10.0 + 295.0);
    }

    #[test]
    fn test_cell_margins_unrotated() {
        let config = SmallMultiplesConfig::default();
        let grid = compute_grid(1000.0, 600.0, 6, &config);
        let cell = compute_cell_layout(&grid, 0, &config);
        assert_eq!(cell.header_height, 20.0);
        // min(45, floor(235 * 0.15))
        assert_eq!(cell.margin.left, 35.0);
        assert_eq!(cell.margin.right, 35.0);
        assert_eq!(cell.margin.top, 10.0);
        assert_eq!(cell.margin.bottom, 31.0);
        assert_eq!(cell.chart_width, 165.0);
        assert_eq!(cell.chart_height, 285.0 - 20.0 - 10.0 - 31.0);
    }

    #[test]
    fn test_rotated_labels_capped_at_forty_percent() {
        let config = SmallMultiplesConfig::new().with_rotation(-90.0);
        let grid = SmallMultiplesGrid {
            cols: 1,
            rows: 1,
            cell_width: 300.0,
            cell_height: 120.0,
        };
        let cell = compute_cell_layout(&grid, 0, &config);
        // 15 + 100 would be 115; cap is floor(0.4 * 100)
        assert_eq!(cell.margin.bottom, 40.0);
        assert_eq!(cell.chart_height, 120.0 - 20.0 - 10.0 - 40.0);
    }
}
