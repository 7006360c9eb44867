//! Core types for the layout engine

use std::fmt;

/// A 2D point in the coordinate system
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned region in viewport pixels
///
/// Extents are not clamped: degenerate viewports can produce negative widths or
/// heights, and it is up to the consumer to skip drawing those.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The full viewport, anchored at the origin
    pub fn viewport(width: f64, height: f64) -> Self {
        Self::new(0.0, 0.0, width, height)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the rect
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this rect overlaps another (touching edges do not count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Whether both extents are strictly positive
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Split off a strip of `size` from the top; returns (strip, remainder)
    pub fn split_top(&self, size: f64) -> (Rect, Rect) {
        (
            Rect::new(self.x, self.y, self.width, size),
            Rect::new(self.x, self.y + size, self.width, self.height - size),
        )
    }

    /// Split off a strip of `size` from the bottom; returns (strip, remainder)
    pub fn split_bottom(&self, size: f64) -> (Rect, Rect) {
        (
            Rect::new(self.x, self.bottom() - size, self.width, size),
            Rect::new(self.x, self.y, self.width, self.height - size),
        )
    }

    /// Split off a strip of `size` from the left; returns (strip, remainder)
    pub fn split_left(&self, size: f64) -> (Rect, Rect) {
        (
            Rect::new(self.x, self.y, size, self.height),
            Rect::new(self.x + size, self.y, self.width - size, self.height),
        )
    }

    /// Split off a strip of `size` from the right; returns (strip, remainder)
    pub fn split_right(&self, size: f64) -> (Rect, Rect) {
        (
            Rect::new(self.right() - size, self.y, size, self.height),
            Rect::new(self.x, self.y, self.width - size, self.height),
        )
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }
}

/// Pixel insets from the four viewport edges
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// left + right
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// top + bottom
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

impl fmt::Display for Margins {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "top={} right={} bottom={} left={}",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Named regions of a single chart viewport
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ChartLayout {
    pub title_area: Option<Rect>,
    pub legend_area: Option<Rect>,
    pub comment_box_area: Option<Rect>,
    /// What remains after every peripheral took its strip
    pub chart_area: Rect,
}

/// Result of a single-chart layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutResult {
    /// Drawable chart width: viewport width minus left and right margins
    pub width: f64,
    /// Drawable chart height: viewport height minus top and bottom margins
    pub height: f64,
    pub margin: Margins,
    pub layout: ChartLayout,
}

impl LayoutResult {
    /// The drawable chart rect in viewport coordinates
    pub fn drawable_rect(&self) -> Rect {
        Rect::new(self.margin.left, self.margin.top, self.width, self.height)
    }

    /// Whether the chart has any room to draw in
    pub fn is_drawable(&self) -> bool {
        self.drawable_rect().has_area()
    }
}

/// Chart-relative placement of the comment panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommentBoxPosition {
    pub x: f64,
    pub y: f64,
    pub box_width: f64,
    pub box_height: f64,
}
