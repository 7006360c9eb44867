//! Chart-relative placement of the comment panel and legend
//!
//! Coordinates returned here are relative to the chart origin, i.e. the
//! viewport point `(margin.left, margin.top)` the renderer translates to.

use super::config::LegendPosition;
use super::constants;
use super::types::{CommentBoxPosition, LayoutResult, Point};

/// Where the comment panel is drawn, if the layout reserved one
pub fn comment_box_position(result: &LayoutResult) -> Option<CommentBoxPosition> {
    let area = result.layout.comment_box_area?;
    Some(CommentBoxPosition {
        x: result.width + constants::PANEL_GAP,
        y: 0.0,
        box_width: constants::COMMENT_BOX_MIN_WIDTH
            .max(area.width - constants::COMMENT_BOX_PADDING),
        box_height: result.height,
    })
}

/// Origin of the legend's first item
///
/// Horizontal legends are centred over `item_count` fixed-width items; a right
/// legend steps past the comment panel when one sits beside the chart.
pub fn legend_position(
    result: &LayoutResult,
    position: LegendPosition,
    comment_box_on_right: bool,
    item_count: usize,
) -> Point {
    let centred_x =
        result.width / 2.0 - item_count as f64 * constants::LEGEND_ITEM_WIDTH / 2.0;
    match position {
        LegendPosition::Top => Point::new(centred_x, constants::LEGEND_TOP_OFFSET),
        LegendPosition::Bottom => {
            Point::new(centred_x, result.height + constants::LEGEND_BOTTOM_OFFSET)
        }
        LegendPosition::Left => Point::new(-result.margin.left + constants::LEGEND_LEFT_INSET, 0.0),
        LegendPosition::Right => {
            let comment_offset = if comment_box_on_right {
                constants::COMMENT_BOX_WIDTH
            } else {
                0.0
            };
            Point::new(result.width + comment_offset + constants::PANEL_GAP, 0.0)
        }
    }
}

/// Chart-relative origin of legend item `index`, starting from `origin`
pub fn legend_item_offset(origin: Point, position: LegendPosition, index: usize) -> Point {
    if position.is_horizontal() {
        Point::new(origin.x + index as f64 * constants::LEGEND_ITEM_WIDTH, origin.y)
    } else {
        Point::new(origin.x, origin.y + index as f64 * constants::LEGEND_ROW_HEIGHT)
    }
}
