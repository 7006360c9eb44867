//! Chart settings loaded from TOML
//!
//! Every key is optional. A settings file looks like:
//!
//! ```toml
//! [chart]
//! type = "waterfall"
//! comparison = "previous-year"
//! invert_variance = false
//! top_n = 8
//!
//! [title]
//! text = "Revenue by region"
//!
//! [legend]
//! position = "top"
//!
//! [category_axis]
//! rotation = -45
//!
//! [small_multiples]
//! enabled = true
//! columns = 3
//! ```
//!
//! A `columns` value of zero or less lets the grid pick its column count from
//! the viewport width.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::chart_type::ChartType;
use crate::data::{FieldRoles, TopNOrder};
use crate::format::{DisplayScale, NegativeFormat, NumberFormat};
use crate::layout::{
    Breakpoint, CategoryAxisConfig, LayoutConfig, LegendPosition, SmallMultiplesConfig,
};
use crate::variance::Comparison;

/// Errors that can occur when loading settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: &'static str, message: String },
}

/// Resolved chart settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub chart_type: ChartType,
    pub comparison: Comparison,
    /// Negate variances on read (cost metrics)
    pub invert_variance: bool,
    /// Keep this many rows and fold the rest into "Others"; 0 disables
    pub top_n: usize,
    pub top_n_order: TopNOrder,
    /// Pinned breakpoint; derived from the viewport when unset
    pub breakpoint: Option<Breakpoint>,
    pub show_title: bool,
    pub title: Option<String>,
    pub show_legend: bool,
    pub legend_position: LegendPosition,
    pub show_comment_box: bool,
    pub category_axis: CategoryAxisConfig,
    /// Grid settings when small multiples are enabled
    pub small_multiples: Option<SmallMultiplesConfig>,
    pub number_format: NumberFormat,
    pub fields: FieldRoles,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chart_type: ChartType::default(),
            comparison: Comparison::default(),
            invert_variance: false,
            top_n: 0,
            top_n_order: TopNOrder::default(),
            breakpoint: None,
            show_title: false,
            title: None,
            show_legend: true,
            legend_position: LegendPosition::Right,
            show_comment_box: true,
            category_axis: CategoryAxisConfig::default(),
            small_multiples: None,
            number_format: NumberFormat::default(),
            fields: FieldRoles::default(),
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlSettings {
    chart: TomlChart,
    title: TomlTitle,
    legend: TomlLegend,
    comment_box: TomlToggle,
    category_axis: TomlCategoryAxis,
    small_multiples: TomlSmallMultiples,
    number_format: TomlNumberFormat,
    fields: Option<FieldRoles>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlChart {
    #[serde(rename = "type")]
    chart_type: Option<String>,
    comparison: Option<String>,
    invert_variance: Option<bool>,
    top_n: Option<usize>,
    top_n_order: Option<String>,
    breakpoint: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlTitle {
    show: Option<bool>,
    text: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlLegend {
    show: Option<bool>,
    position: Option<String>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlToggle {
    show: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlCategoryAxis {
    show: Option<bool>,
    rotation: Option<f64>,
    max_width: Option<f64>,
    font_size: Option<f64>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlSmallMultiples {
    enabled: Option<bool>,
    columns: Option<i64>,
    spacing: Option<f64>,
    show_headers: Option<bool>,
    shared_scale: Option<bool>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct TomlNumberFormat {
    scale: Option<String>,
    decimals: Option<usize>,
    negative_format: Option<String>,
    show_sign: Option<bool>,
}

/// Parse an optional enum string, keeping `default` when absent
fn parse_or<T>(value: Option<&str>, key: &'static str, default: T) -> Result<T, SettingsError>
where
    T: FromStr<Err = String>,
{
    match value {
        Some(raw) => raw
            .parse()
            .map_err(|message| SettingsError::InvalidValue { key, message }),
        None => Ok(default),
    }
}

impl Settings {
    /// Load settings from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load settings from a TOML string
    pub fn from_str(content: &str) -> Result<Self, SettingsError> {
        let parsed: TomlSettings = toml::from_str(content)?;
        let defaults = Settings::default();

        let chart = &parsed.chart;
        let category_defaults = defaults.category_axis;
        let category_axis = CategoryAxisConfig {
            show: parsed.category_axis.show.unwrap_or(category_defaults.show),
            rotation: parsed.category_axis.rotation.unwrap_or(category_defaults.rotation),
            max_width: parsed.category_axis.max_width.unwrap_or(category_defaults.max_width),
            font_size: parsed.category_axis.font_size.unwrap_or(category_defaults.font_size),
        };

        let sm = &parsed.small_multiples;
        let small_multiples = if sm.enabled.unwrap_or(false) {
            let grid_defaults = SmallMultiplesConfig::default();
            Some(SmallMultiplesConfig {
                columns: sm
                    .columns
                    .map_or(grid_defaults.columns, |c| usize::try_from(c).unwrap_or(0)),
                spacing: sm.spacing.unwrap_or(grid_defaults.spacing),
                show_headers: sm.show_headers.unwrap_or(grid_defaults.show_headers),
                category_axis,
                shared_scale: sm.shared_scale.unwrap_or(grid_defaults.shared_scale),
            })
        } else {
            None
        };

        let nf = &parsed.number_format;
        let number_format = NumberFormat {
            scale: parse_or(nf.scale.as_deref(), "number_format.scale", DisplayScale::Auto)?,
            decimals: nf.decimals.unwrap_or(defaults.number_format.decimals),
            negative_format: parse_or(
                nf.negative_format.as_deref(),
                "number_format.negative_format",
                NegativeFormat::Minus,
            )?,
            show_sign: nf.show_sign.unwrap_or(false),
        };

        let breakpoint = match chart.breakpoint.as_deref() {
            Some(raw) => Some(parse_or(Some(raw), "chart.breakpoint", Breakpoint::Large)?),
            None => None,
        };

        Ok(Settings {
            chart_type: parse_or(chart.chart_type.as_deref(), "chart.type", defaults.chart_type)?,
            comparison: parse_or(
                chart.comparison.as_deref(),
                "chart.comparison",
                defaults.comparison,
            )?,
            invert_variance: chart.invert_variance.unwrap_or(false),
            top_n: chart.top_n.unwrap_or(0),
            top_n_order: parse_or(
                chart.top_n_order.as_deref(),
                "chart.top_n_order",
                defaults.top_n_order,
            )?,
            breakpoint,
            // A title text implies showing it unless switched off explicitly
            show_title: parsed.title.show.unwrap_or(parsed.title.text.is_some()),
            title: parsed.title.text,
            show_legend: parsed.legend.show.unwrap_or(defaults.show_legend),
            legend_position: parse_or(
                parsed.legend.position.as_deref(),
                "legend.position",
                defaults.legend_position,
            )?,
            show_comment_box: parsed.comment_box.show.unwrap_or(defaults.show_comment_box),
            category_axis,
            small_multiples,
            number_format,
            fields: parsed.fields.unwrap_or_default(),
        })
    }

    /// Set the chart type
    pub fn with_chart_type(mut self, chart_type: ChartType) -> Self {
        self.chart_type = chart_type;
        self
    }

    /// The breakpoint for a viewport: the pinned one, or derived from its size
    pub fn breakpoint_for(&self, width: f64, height: f64) -> Breakpoint {
        self.breakpoint
            .unwrap_or_else(|| Breakpoint::from_viewport(width, height))
    }

    /// Layout configuration for a viewport and dataset
    ///
    /// At the small breakpoint every peripheral is dropped so nothing is drawn
    /// where the compact layout reserved no room.
    pub fn layout_config(&self, width: f64, height: f64, has_comments: bool) -> LayoutConfig {
        let breakpoint = self.breakpoint_for(width, height);
        let compact = breakpoint == Breakpoint::Small;
        LayoutConfig {
            show_title: self.show_title && !compact,
            show_legend: self.show_legend && !compact,
            legend_position: self.legend_position,
            show_comment_box: self.show_comment_box && !compact,
            has_comments,
            category_axis: CategoryAxisConfig {
                show: self.category_axis.show && !compact,
                ..self.category_axis
            },
            chart_type: self.chart_type,
            breakpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_settings_are_defaults() {
        let settings = Settings::from_str("").expect("should parse");
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_full_settings() {
        let toml_str = r#"
[chart]
type = "waterfall"
comparison = "py"
invert_variance = true
top_n = 5
top_n_order = "smallest"
breakpoint = "medium"

[title]
text = "Costs"

[legend]
position = "bottom"

[comment_box]
show = false

[category_axis]
rotation = -45
max_width = 120

[small_multiples]
enabled = true
columns = 3
shared_scale = false

[number_format]
scale = "thousands"
decimals = 0
negative_format = "parentheses"

[fields]
category = "account"
actual = "ytd"
"#;
        let settings = Settings::from_str(toml_str).expect("should parse");
        assert_eq!(settings.chart_type, ChartType::Waterfall);
        assert_eq!(settings.comparison, Comparison::PreviousYear);
        assert!(settings.invert_variance);
        assert_eq!(settings.top_n, 5);
        assert_eq!(settings.top_n_order, TopNOrder::Smallest);
        assert_eq!(settings.breakpoint, Some(Breakpoint::Medium));
        assert!(settings.show_title);
        assert_eq!(settings.title.as_deref(), Some("Costs"));
        assert_eq!(settings.legend_position, LegendPosition::Bottom);
        assert!(!settings.show_comment_box);
        assert_eq!(settings.category_axis.rotation, -45.0);
        assert_eq!(settings.category_axis.max_width, 120.0);

        let grid = settings.small_multiples.expect("small multiples enabled");
        assert_eq!(grid.columns, 3);
        assert!(!grid.shared_scale);
        assert_eq!(grid.category_axis.rotation, -45.0);

        assert_eq!(settings.number_format.scale, DisplayScale::Thousands);
        assert_eq!(settings.number_format.decimals, 0);
        assert_eq!(
            settings.number_format.negative_format,
            NegativeFormat::Parentheses
        );
        assert_eq!(settings.fields.category, "account");
        assert_eq!(settings.fields.actual, "ytd");
        assert_eq!(settings.fields.budget, "budget");
    }

    #[test]
    fn test_invalid_chart_type() {
        let err = Settings::from_str("[chart]\ntype = \"pie\"\n").unwrap_err();
        match err {
            SettingsError::InvalidValue { key, message } => {
                assert_eq!(key, "chart.type");
                assert!(message.contains("pie"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::from_str("[chart"),
            Err(SettingsError::ParseError(_))
        ));
    }

    #[test]
    fn test_layout_config_drops_peripherals_when_small() {
        let settings = Settings {
            show_title: true,
            ..Settings::default()
        };
        let config = settings.layout_config(250.0, 150.0, true);
        assert_eq!(config.breakpoint, Breakpoint::Small);
        assert!(!config.show_title);
        assert!(!config.show_legend);
        assert!(!config.comment_box_active());

        let config = settings.layout_config(800.0, 400.0, true);
        assert_eq!(config.breakpoint, Breakpoint::Large);
        assert!(config.show_title);
        assert!(config.comment_box_active());
    }

    #[test]
    fn test_pinned_breakpoint_wins() {
        let settings = Settings {
            breakpoint: Some(Breakpoint::Medium),
            ..Settings::default()
        };
        assert_eq!(settings.breakpoint_for(1600.0, 900.0), Breakpoint::Medium);
    }

    #[test]
    fn test_non_positive_columns_mean_auto() {
        for value in ["0", "-1"] {
            let toml_str = format!("[small_multiples]\nenabled = true\ncolumns = {value}\n");
            let settings = Settings::from_str(&toml_str).expect("should parse");
            let grid = settings.small_multiples.expect("small multiples enabled");
            assert_eq!(grid.columns, 0, "columns = {value}");
        }
    }
}
