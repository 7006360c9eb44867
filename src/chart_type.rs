//! Chart type enumeration and per-type layout adjustments

use std::fmt;
use std::str::FromStr;

/// The chart variants the renderer can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChartType {
    /// Actual columns in front of outlined comparison columns, with variance markers
    #[default]
    Variance,
    /// Vertical actual columns
    Column,
    /// Horizontal actual bars
    Bar,
    /// Comparison total, one floating bar per category variance, actual total
    Waterfall,
    /// Horizontal pins of relative variance
    Lollipop,
    /// Actual and comparison dots joined by a variance-colored connector
    Dot,
    /// Actual line over a dashed comparison line
    Line,
    /// Filled actual area over a dashed comparison line
    Area,
    /// Outlined comparison columns with an actual line overlay
    Combo,
}

/// Axis margin adjustments a chart type applies on top of the defaults
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisAdjustment {
    /// Extra space added below the category axis
    pub extra_bottom: f64,
    /// Fixed left margin replacing the computed one
    pub left_override: Option<f64>,
}

const NO_ADJUSTMENT: AxisAdjustment = AxisAdjustment {
    extra_bottom: 0.0,
    left_override: None,
};

impl ChartType {
    /// Every chart type, in declaration order
    pub const ALL: [ChartType; 9] = [
        ChartType::Variance,
        ChartType::Column,
        ChartType::Bar,
        ChartType::Waterfall,
        ChartType::Lollipop,
        ChartType::Dot,
        ChartType::Line,
        ChartType::Area,
        ChartType::Combo,
    ];

    /// Axis margin adjustments for this type
    pub fn axis_adjustment(&self) -> AxisAdjustment {
        match self {
            // Room for the total labels under the start/end bars
            ChartType::Waterfall => AxisAdjustment {
                extra_bottom: 20.0,
                left_override: None,
            },
            // Category labels sit left of the horizontal pins
            ChartType::Lollipop => AxisAdjustment {
                extra_bottom: 0.0,
                left_override: Some(100.0),
            },
            _ => NO_ADJUSTMENT,
        }
    }

    /// Whether categories run down the vertical axis
    pub fn is_horizontal(&self) -> bool {
        matches!(self, ChartType::Bar | ChartType::Lollipop)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::Variance => "variance",
            ChartType::Column => "column",
            ChartType::Bar => "bar",
            ChartType::Waterfall => "waterfall",
            ChartType::Lollipop => "lollipop",
            ChartType::Dot => "dot",
            ChartType::Line => "line",
            ChartType::Area => "area",
            ChartType::Combo => "combo",
        }
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        ChartType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| format!("unknown chart type '{s}'"))
    }
}
