//! Grid coverage and cell geometry for small multiples

use ibcs_charts::layout::{
    compute_cell_layout, compute_grid, small_multiples_viewport, LayoutConfig, LegendPosition,
    Rect, SmallMultiplesConfig,
};
use pretty_assertions::assert_eq;

const VIEWPORTS: [(f64, f64); 5] = [
    (960.0, 640.0),
    (400.0, 300.0),
    (120.0, 80.0),
    (50.0, 40.0),
    (0.0, 0.0),
];

#[test]
fn test_grid_covers_every_group() {
    for (w, h) in VIEWPORTS {
        for columns in [0, 1, 2, 3, 5] {
            let config = SmallMultiplesConfig::new().with_columns(columns);
            for groups in 1..=20 {
                let grid = compute_grid(w, h, groups, &config);
                let case = format!("{w}x{h}, {groups} groups, {columns} columns");
                assert!(grid.cols >= 1 && grid.rows >= 1, "{case}");
                assert!(grid.cols * grid.rows >= groups, "{case}");
                assert!((grid.rows - 1) * grid.cols < groups, "{case}");
            }
        }
    }
}

#[test]
fn test_auto_columns_fit_target_width() {
    let grid = compute_grid(800.0, 600.0, 5, &SmallMultiplesConfig::default());
    assert_eq!((grid.cols, grid.rows), (3, 2));

    let narrow = compute_grid(200.0, 600.0, 5, &SmallMultiplesConfig::default());
    assert_eq!((narrow.cols, narrow.rows), (1, 5));
}

#[test]
fn test_fixed_columns_capped_by_group_count() {
    let config = SmallMultiplesConfig::new().with_columns(4);
    let grid = compute_grid(800.0, 600.0, 2, &config);
    assert_eq!((grid.cols, grid.rows), (2, 1));
}

#[test]
fn test_zero_groups_is_one_cell() {
    let grid = compute_grid(800.0, 600.0, 0, &SmallMultiplesConfig::default());
    assert_eq!((grid.cols, grid.rows), (1, 1));
}

#[test]
fn test_cell_margins_sum_to_cell_size() {
    let configs = [
        SmallMultiplesConfig::default(),
        SmallMultiplesConfig::new().with_headers(false),
        SmallMultiplesConfig::new().with_rotation(-45.0),
        SmallMultiplesConfig::new().with_rotation(-90.0).with_spacing(20.0),
    ];
    for config in configs {
        let grid = compute_grid(1000.0, 700.0, 7, &config);
        for index in 0..7 {
            let cell = compute_cell_layout(&grid, index, &config);
            let width_sum = cell.chart_width + cell.margin.horizontal();
            let height_sum = cell.chart_height + cell.margin.vertical() + cell.header_height;
            assert!((width_sum - grid.cell_width).abs() < 1e-9);
            assert!((height_sum - grid.cell_height).abs() < 1e-9);
            let available = grid.cell_height - cell.header_height;
            assert!(cell.margin.bottom <= 0.4 * available);
        }
    }
}

#[test]
fn test_cells_stay_inside_viewport() {
    let config = SmallMultiplesConfig::new().with_spacing(12.0);
    for (w, h) in VIEWPORTS {
        let viewport = Rect::viewport(w, h);
        for groups in 1..=12 {
            let grid = compute_grid(w, h, groups, &config);
            // degenerate viewports leave no room for any cell
            if grid.cell_width <= 0.0 || grid.cell_height <= 0.0 {
                continue;
            }
            let cells: Vec<Rect> = (0..groups)
                .map(|i| {
                    let cell = compute_cell_layout(&grid, i, &config);
                    Rect::new(cell.x, cell.y, grid.cell_width, grid.cell_height)
                })
                .collect();

            for (i, a) in cells.iter().enumerate() {
                assert!(a.x >= 0.0 && a.y >= 0.0, "{w}x{h}, {groups} groups");
                assert!(a.right() <= viewport.right(), "{w}x{h}, {groups} groups");
                assert!(a.bottom() <= viewport.bottom(), "{w}x{h}, {groups} groups");
                for b in &cells[i + 1..] {
                    assert!(!a.intersects(b), "cells overlap: {a:?} {b:?}");
                }
            }
        }
    }
}

#[test]
fn test_small_viewports_still_fit_some_cells() {
    let config = SmallMultiplesConfig::new().with_spacing(12.0);
    let grid = compute_grid(120.0, 80.0, 2, &config);
    assert_eq!((grid.cols, grid.rows), (1, 2));
    assert_eq!((grid.cell_width, grid.cell_height), (86.0, 22.0));
}

#[test]
fn test_cells_are_row_major() {
    let config = SmallMultiplesConfig::new().with_columns(3).with_spacing(10.0);
    let grid = compute_grid(800.0, 600.0, 6, &config);
    let second = compute_cell_layout(&grid, 1, &config);
    let fourth = compute_cell_layout(&grid, 3, &config);
    assert_eq!(second.x, 10.0 + grid.cell_width + 10.0);
    assert_eq!(second.y, 10.0);
    assert_eq!(fourth.x, 10.0);
    assert_eq!(fourth.y, 10.0 + grid.cell_height + 10.0);
}

#[test]
fn test_viewport_shrinks_by_peripherals() {
    let config = LayoutConfig::new()
        .with_title(true)
        .with_legend(LegendPosition::Bottom)
        .with_comment_box(true, true);
    let viewport = small_multiples_viewport(1000.0, 600.0, &config);
    assert_eq!(viewport, Rect::new(0.0, 30.0, 780.0, 540.0));
}
