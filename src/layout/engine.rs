//! Single-chart layout computation
//!
//! The engine partitions a viewport in a fixed order of precedence:
//!
//! 1. **Title**: a strip across the top
//! 2. **Legend**: a strip along the configured edge
//! 3. **Comment box**: a strip along the right edge, only when the data has comments
//! 4. **Axes**: margins inside what is left, sized for the category labels
//!
//! Each peripheral shrinks the `available` rect; whatever remains becomes the
//! chart area. The final margins are the distance `available` moved from each
//! viewport edge plus the axis margins, clamped so the chart keeps a minimum
//! drawable size.
//!
//! ## Key Functions
//!
//! - [`compute_layout`]: Main entry point; margins plus named regions
//! - [`carve_peripherals`]: Peripheral strips only, shared with small multiples
//! - [`axis_margins`]: Axis margins for a config, before peripheral offsets

use super::config::{Breakpoint, LayoutConfig, LegendPosition};
use super::constants::{self, axis, compact};
use super::types::*;

/// Carve title, legend and comment box strips out of a viewport
///
/// The returned layout's `chart_area` is what remains after every enabled
/// peripheral took its fixed-size strip.
pub fn carve_peripherals(width: f64, height: f64, config: &LayoutConfig) -> ChartLayout {
    let mut layout = ChartLayout::default();
    let mut available = Rect::viewport(width, height);

    if config.show_title {
        let (title, rest) = available.split_top(constants::TITLE_HEIGHT);
        layout.title_area = Some(title);
        available = rest;
    }

    if config.show_legend {
        let (legend, rest) = match config.legend_position {
            LegendPosition::Top => available.split_top(constants::LEGEND_HORIZONTAL_SIZE),
            LegendPosition::Bottom => available.split_bottom(constants::LEGEND_HORIZONTAL_SIZE),
            LegendPosition::Left => available.split_left(constants::LEGEND_VERTICAL_SIZE),
            LegendPosition::Right => available.split_right(constants::LEGEND_VERTICAL_SIZE),
        };
        layout.legend_area = Some(legend);
        available = rest;
    }

    // Right edge regardless of where the legend went
    if config.comment_box_active() {
        let (comment_box, rest) = available.split_right(constants::COMMENT_BOX_WIDTH);
        layout.comment_box_area = Some(comment_box);
        available = rest;
    }

    layout.chart_area = available;
    layout
}

/// Axis margins for a config, independent of peripherals
pub fn axis_margins(config: &LayoutConfig) -> Margins {
    let category = &config.category_axis;
    let adjustment = config.chart_type.axis_adjustment();

    let mut bottom = if category.is_rotated() {
        axis::BOTTOM_BASE
            + category.max_width.min(axis::ROTATED_LABEL_CAP) * category.rotation_drop()
            + axis::ROTATED_LABEL_PAD
    } else {
        axis::BOTTOM_BASE + category.font_size * 2.0
    };
    bottom += adjustment.extra_bottom;

    let mut margin = Margins::new(axis::TOP, axis::RIGHT, bottom, axis::LEFT);

    if config.breakpoint == Breakpoint::Medium {
        margin.top = axis::MEDIUM_TOP;
        margin.bottom = margin.bottom.min(axis::MEDIUM_BOTTOM_MAX);
        margin.left = axis::MEDIUM_LEFT;
    }

    if let Some(left) = adjustment.left_override {
        margin.left = left;
    }

    margin
}

/// Compute margins and named regions for one chart inside a viewport
///
/// Total over its inputs: degenerate viewports still produce a layout, though
/// the resulting chart extents may be zero or negative. The clamp guarantees
/// `left + right <= width - 50` and `top + bottom <= height - 30` whenever the
/// unclamped margins exceeded those caps, nothing stronger.
pub fn compute_layout(width: f64, height: f64, config: &LayoutConfig) -> LayoutResult {
    if config.breakpoint == Breakpoint::Small {
        let margin = Margins::new(compact::TOP, compact::RIGHT, compact::BOTTOM, compact::LEFT);
        return LayoutResult {
            width: width - margin.horizontal(),
            height: height - margin.vertical(),
            margin,
            layout: ChartLayout {
                chart_area: Rect::viewport(width, height),
                ..ChartLayout::default()
            },
        };
    }

    let layout = carve_peripherals(width, height, config);
    let available = layout.chart_area;
    let axes = axis_margins(config);

    let margin = Margins {
        top: available.y + axes.top,
        left: available.x + axes.left,
        right: (width - available.right()) + axes.right,
        bottom: (height - available.bottom()) + axes.bottom,
    };
    let margin = clamp_margins(margin, width, height);

    let result = LayoutResult {
        width: width - margin.horizontal(),
        height: height - margin.vertical(),
        margin,
        layout,
    };
    tracing::debug!(
        viewport_width = width,
        viewport_height = height,
        chart_type = %config.chart_type,
        breakpoint = %config.breakpoint,
        margin = %result.margin,
        chart_width = result.width,
        chart_height = result.height,
        "computed chart layout"
    );
    result
}

/// Scale opposing margins down so the chart keeps its minimum extent
fn clamp_margins(mut margin: Margins, width: f64, height: f64) -> Margins {
    let max_horizontal = width - constants::MIN_CHART_WIDTH;
    if margin.horizontal() > max_horizontal && margin.horizontal() > 0.0 {
        let scale = max_horizontal / margin.horizontal();
        tracing::debug!(width, scale, "clamping horizontal margins");
        margin.left = (margin.left * scale).floor();
        margin.right = (margin.right * scale).floor();
    }

    let max_vertical = height - constants::MIN_CHART_HEIGHT;
    if margin.vertical() > max_vertical && margin.vertical() > 0.0 {
        let scale = max_vertical / margin.vertical();
        tracing::debug!(height, scale, "clamping vertical margins");
        margin.top = (margin.top * scale).floor();
        margin.bottom = (margin.bottom * scale).floor();
    }

    margin
}
