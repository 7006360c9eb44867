//! Configuration for the layout engine

use std::fmt;
use std::str::FromStr;

use crate::chart_type::ChartType;

/// Coarse viewport-size tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Breakpoint {
    Small,
    Medium,
    #[default]
    Large,
}

impl Breakpoint {
    /// Classify a viewport: small below 300x200, medium below 600x400
    pub fn from_viewport(width: f64, height: f64) -> Self {
        if width < 300.0 || height < 200.0 {
            Breakpoint::Small
        } else if width < 600.0 || height < 400.0 {
            Breakpoint::Medium
        } else {
            Breakpoint::Large
        }
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Breakpoint::Small => "small",
            Breakpoint::Medium => "medium",
            Breakpoint::Large => "large",
        })
    }
}

impl FromStr for Breakpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "small" => Ok(Breakpoint::Small),
            "medium" => Ok(Breakpoint::Medium),
            "large" => Ok(Breakpoint::Large),
            _ => Err(format!("unknown breakpoint '{s}'")),
        }
    }
}

/// Edge of the viewport the legend strip is carved from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendPosition {
    Top,
    Bottom,
    Left,
    #[default]
    Right,
}

impl LegendPosition {
    /// Whether legend items flow left-to-right
    pub fn is_horizontal(&self) -> bool {
        matches!(self, LegendPosition::Top | LegendPosition::Bottom)
    }
}

impl fmt::Display for LegendPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LegendPosition::Top => "top",
            LegendPosition::Bottom => "bottom",
            LegendPosition::Left => "left",
            LegendPosition::Right => "right",
        })
    }
}

impl FromStr for LegendPosition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "top" => Ok(LegendPosition::Top),
            "bottom" => Ok(LegendPosition::Bottom),
            "left" => Ok(LegendPosition::Left),
            "right" => Ok(LegendPosition::Right),
            _ => Err(format!("unknown legend position '{s}'")),
        }
    }
}

/// Category axis label settings that drive the bottom margin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryAxisConfig {
    /// Whether tick labels are drawn
    pub show: bool,
    /// Label rotation in degrees (0 = horizontal)
    pub rotation: f64,
    /// Longest label extent in pixels
    pub max_width: f64,
    pub font_size: f64,
}

impl CategoryAxisConfig {
    /// |sin(rotation)|, the share of a rotated label that hangs downwards
    pub fn rotation_drop(&self) -> f64 {
        self.rotation.abs().to_radians().sin()
    }

    pub fn is_rotated(&self) -> bool {
        self.rotation != 0.0
    }
}

impl Default for CategoryAxisConfig {
    fn default() -> Self {
        Self {
            show: true,
            rotation: 0.0,
            max_width: 100.0,
            font_size: 11.0,
        }
    }
}

/// Configuration options for single-chart layout computation
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutConfig {
    pub show_title: bool,
    pub show_legend: bool,
    pub legend_position: LegendPosition,
    /// The comment panel also needs `has_comments` to claim space
    pub show_comment_box: bool,
    /// Whether any data row carries a non-empty comment
    pub has_comments: bool,
    pub category_axis: CategoryAxisConfig,
    pub chart_type: ChartType,
    pub breakpoint: Breakpoint,
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Show or hide the title strip
    pub fn with_title(mut self, show: bool) -> Self {
        self.show_title = show;
        self
    }

    /// Show the legend at the given edge
    pub fn with_legend(mut self, position: LegendPosition) -> Self {
        self.show_legend = true;
        self.legend_position = position;
        self
    }

    /// Hide the legend
    pub fn without_legend(mut self) -> Self {
        self.show_legend = false;
        self
    }

    /// Show or hide the comment panel, and record whether the data has comments
    pub fn with_comment_box(mut self, show: bool, has_comments: bool) -> Self {
        self.show_comment_box = show;
        self.has_comments = has_comments;
        self
    }

    /// Set the category axis label settings
    pub fn with_category_axis(mut self, axis: CategoryAxisConfig) -> Self {
        self.category_axis = axis;
        self
    }

    /// Set the category label rotation in degrees
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.category_axis.rotation = degrees;
        self
    }

    /// Set the chart type
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// Set the breakpoint tier
    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoint = breakpoint;
        self
    }

    /// Whether the comment panel will claim space
    pub fn comment_box_active(&self) -> bool {
        self.show_comment_box && self.has_comments
    }
}

/// Configuration for the small-multiples grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmallMultiplesConfig {
    /// Fixed column count; 0 picks columns from the viewport width
    pub columns: usize,
    /// Gap between cells and around the grid
    pub spacing: f64,
    /// Whether each cell gets a group-name header
    pub show_headers: bool,
    pub category_axis: CategoryAxisConfig,
    /// Whether all cells share one value scale
    pub shared_scale: bool,
}

impl Default for SmallMultiplesConfig {
    fn default() -> Self {
        Self {
            columns: 0,
            spacing: 10.0,
            show_headers: true,
            category_axis: CategoryAxisConfig::default(),
            shared_scale: true,
        }
    }
}

impl SmallMultiplesConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a fixed column count (0 for auto)
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns;
        self
    }

    /// Set the cell spacing
    pub fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Show or hide cell headers
    pub fn with_headers(mut self, show: bool) -> Self {
        self.show_headers = show;
        self
    }

    /// Set the category label rotation in degrees
    pub fn with_rotation(mut self, degrees: f64) -> Self {
        self.category_axis.rotation = degrees;
        self
    }

    /// Share or split the value scale across cells
    pub fn with_shared_scale(mut self, shared: bool) -> Self {
        self.shared_scale = shared;
        self
    }
}
