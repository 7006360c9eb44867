//! Fixed pixel sizes shared by the layout engine and the renderers
//!
//! Peripheral regions claim fixed-size strips; the legend renderer draws its
//! items on the same grid the position helpers assume. Change a value here and
//! both sides move together.

/// Height of the title strip
pub const TITLE_HEIGHT: f64 = 30.0;

/// Legend strip height when placed above or below the chart
pub const LEGEND_HORIZONTAL_SIZE: f64 = 30.0;

/// Legend strip width when placed left or right of the chart
pub const LEGEND_VERTICAL_SIZE: f64 = 80.0;

/// Width of the comment panel, always carved from the right edge
pub const COMMENT_BOX_WIDTH: f64 = 220.0;

/// Width of one legend item in a horizontal (top/bottom) legend
pub const LEGEND_ITEM_WIDTH: f64 = 70.0;

/// Height of one legend row in a vertical (left/right) legend
pub const LEGEND_ROW_HEIGHT: f64 = 20.0;

/// Gap between the chart area and the comment panel / right legend
pub const PANEL_GAP: f64 = 10.0;

/// Horizontal padding the comment panel keeps inside its carved strip
pub const COMMENT_BOX_PADDING: f64 = 30.0;

/// Narrowest comment panel drawn, even when its strip is narrower
pub const COMMENT_BOX_MIN_WIDTH: f64 = 80.0;

/// Vertical offset of a top legend above the chart origin
pub const LEGEND_TOP_OFFSET: f64 = -25.0;

/// Vertical gap between the chart bottom and a bottom legend
pub const LEGEND_BOTTOM_OFFSET: f64 = 30.0;

/// Inset of a left legend from the viewport's left edge
pub const LEGEND_LEFT_INSET: f64 = 5.0;

/// Narrowest chart width the margin clamp leaves
pub const MIN_CHART_WIDTH: f64 = 50.0;

/// Shortest chart height the margin clamp leaves
pub const MIN_CHART_HEIGHT: f64 = 30.0;

/// Axis margins for a single chart
pub mod axis {
    pub const TOP: f64 = 30.0;
    pub const RIGHT: f64 = 30.0;
    pub const LEFT: f64 = 60.0;
    /// Base space under the category axis
    pub const BOTTOM_BASE: f64 = 30.0;
    /// Longest rotated label length considered
    pub const ROTATED_LABEL_CAP: f64 = 150.0;
    /// Extra clearance below rotated labels
    pub const ROTATED_LABEL_PAD: f64 = 10.0;

    pub const MEDIUM_TOP: f64 = 20.0;
    pub const MEDIUM_LEFT: f64 = 50.0;
    pub const MEDIUM_BOTTOM_MAX: f64 = 60.0;
}

/// Fixed margins used at the small breakpoint
pub mod compact {
    pub const TOP: f64 = 5.0;
    pub const RIGHT: f64 = 15.0;
    pub const BOTTOM: f64 = 25.0;
    pub const LEFT: f64 = 35.0;
}

/// Small-multiples grid and cell sizing
pub mod cell {
    /// Target minimum cell width in auto column mode
    pub const TARGET_WIDTH: f64 = 250.0;
    /// Absorbs rounding so the last column never spills over
    pub const WIDTH_SAFETY: f64 = 10.0;
    pub const HEADER_HEIGHT: f64 = 20.0;
    pub const TOP: f64 = 10.0;
    pub const BOTTOM_BASE: f64 = 20.0;
    pub const ROTATED_BASE: f64 = 15.0;
    pub const ROTATED_LABEL_CAP: f64 = 100.0;
    /// Share of the cell height the bottom margin may take at most
    pub const MAX_BOTTOM_SHARE: f64 = 0.4;
    pub const SIDE_MAX: f64 = 45.0;
    pub const SIDE_SHARE: f64 = 0.15;
}
