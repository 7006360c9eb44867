//! IBCS Charts - variance charts with a responsive layout engine
//!
//! This library reads actual/comparison data from CSV, derives variances and
//! renders IBCS-style charts to SVG. The layout engine partitions the viewport
//! among title, legend, comment panel and axis margins.
//!
//! # Example
//!
//! ```rust
//! use ibcs_charts::render;
//!
//! let svg = render("category,actual,budget\nNorth,120,100\nSouth,90,100\n").unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod chart_type;
pub mod data;
pub mod error;
pub mod format;
pub mod layout;
pub mod renderer;
pub mod settings;
pub mod stylesheet;
pub mod variance;

pub use chart_type::ChartType;
pub use data::{read_csv, read_csv_str, DataPoint, FieldRoles};
pub use error::DataError;
pub use layout::{compute_layout, LayoutConfig, LayoutResult};
pub use renderer::{render_svg, RenderContext, SvgConfig};
pub use settings::{Settings, SettingsError};
pub use variance::{Comparison, Variance};

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::Stylesheet;

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error while reading or binding the input data
    #[error("data error: {0}")]
    Data(#[from] DataError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Viewport width in pixels
    pub width: f64,
    /// Viewport height in pixels
    pub height: f64,
    /// Chart settings
    pub settings: Settings,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for color resolution
    pub stylesheet: Stylesheet,
    /// Debug mode: outline every layout region
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 400.0,
            settings: Settings::default(),
            svg: SvgConfig::default(),
            stylesheet: Stylesheet::default(),
            debug: false,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the viewport size
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the chart settings
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for color resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render CSV data to SVG with default configuration
///
/// This is the main entry point for the library. It binds the CSV columns,
/// derives variances, computes the layout and generates SVG output.
///
/// # Example
///
/// ```rust
/// use ibcs_charts::render;
///
/// let svg = render("category,actual,budget\nNorth,120,100\n").unwrap();
///
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("North"));
/// ```
pub fn render(csv: &str) -> Result<String, RenderError> {
    render_with_config(csv, RenderConfig::default())
}

/// Render CSV data to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use ibcs_charts::{render_with_config, ChartType, RenderConfig, Settings, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_size(600.0, 300.0)
///     .with_settings(Settings::default().with_chart_type(ChartType::Waterfall))
///     .with_svg(SvgConfig::default().with_pretty_print(false));
///
/// let svg = render_with_config("category,actual,budget\nA,10,8\n", config).unwrap();
/// assert!(svg.contains(r#"viewBox="0 0 600 300""#));
/// ```
pub fn render_with_config(csv: &str, config: RenderConfig) -> Result<String, RenderError> {
    let settings = &config.settings;

    let points = read_csv_str(csv, &settings.fields)?;
    let points = apply_top_n(points, settings);
    tracing::info!(
        rows = points.len(),
        chart_type = %settings.chart_type,
        width = config.width,
        height = config.height,
        "rendering chart"
    );

    let ctx = RenderContext {
        settings,
        svg: &config.svg,
        stylesheet: &config.stylesheet,
        debug: config.debug,
    };
    Ok(render_svg(&points, config.width, config.height, &ctx))
}

/// Fold rows beyond Top N into "Others", per group for small multiples
fn apply_top_n(points: Vec<DataPoint>, settings: &Settings) -> Vec<DataPoint> {
    if settings.top_n == 0 {
        return points;
    }
    if settings.small_multiples.is_none() {
        return data::top_n_with_others(&points, settings.top_n, settings.top_n_order);
    }
    data::group_rows(&points)
        .iter()
        .flat_map(|group| {
            let rows = group.points(&points);
            data::top_n_with_others(&rows, settings.top_n, settings.top_n_order)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::SmallMultiplesConfig;

    const SALES: &str = "\
category,actual,budget,comment
North,120,100,
South,90,100,Lost key account
East,60,50,
West,40,45,
";

    #[test]
    fn test_render_simple_chart() {
        let svg = render(SALES).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains("North"));
        assert!(svg.contains("ibcs-variance"));
    }

    #[test]
    fn test_render_translates_plot_by_margins() {
        let svg = render("category,actual,budget\nA,10,8\n").unwrap();
        // default 800x400 with a right legend and no comments
        assert!(svg.contains(r#"<g class="ibcs-plot" transform="translate(60,30)">"#));
    }

    #[test]
    fn test_render_comment_box_only_with_comments() {
        let with = render(SALES).unwrap();
        assert!(with.contains("ibcs-comment-box"));
        assert!(with.contains("Lost key account"));

        let without = render("category,actual,budget\nA,10,8\n").unwrap();
        assert!(!without.contains("ibcs-comment-box"));
    }

    #[test]
    fn test_render_missing_column_error() {
        let result = render("name,value\nA,1\n");
        assert!(matches!(
            result,
            Err(RenderError::Data(DataError::MissingColumn { .. }))
        ));
    }

    #[test]
    fn test_render_invalid_number_error() {
        let err = render("category,actual\nA,lots\n").unwrap_err();
        assert!(err.to_string().contains("lots"));
    }

    #[test]
    fn test_apply_top_n_whole_dataset() {
        let points = read_csv_str(SALES, &FieldRoles::default()).unwrap();
        let settings = Settings {
            top_n: 2,
            ..Settings::default()
        };
        let folded = apply_top_n(points, &settings);
        let names: Vec<_> = folded.iter().map(|p| p.category.as_str()).collect();
        assert_eq!(names, vec!["North", "South", "Others"]);
        assert_eq!(folded[2].actual, 100.0);
        assert_eq!(folded[2].budget, Some(95.0));
    }

    #[test]
    fn test_apply_top_n_per_group_for_small_multiples() {
        let csv = "\
category,group,actual
A,EU,5
B,EU,4
C,EU,3
D,US,9
E,US,8
F,US,7
";
        let points = read_csv_str(csv, &FieldRoles::default()).unwrap();
        let settings = Settings {
            top_n: 1,
            small_multiples: Some(SmallMultiplesConfig::default()),
            ..Settings::default()
        };
        let folded = apply_top_n(points, &settings);
        let rows: Vec<_> = folded
            .iter()
            .map(|p| (p.group.as_deref().unwrap_or(""), p.category.as_str(), p.actual))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("EU", "A", 5.0),
                ("EU", "Others", 7.0),
                ("US", "D", 9.0),
                ("US", "Others", 15.0),
            ]
        );
    }

    #[test]
    fn test_apply_top_n_keeps_ungrouped_rows_for_small_multiples() {
        let csv = "\
category,group,actual
A,EU,5
B,EU,4
D,,100
";
        let points = read_csv_str(csv, &FieldRoles::default()).unwrap();
        let settings = Settings {
            top_n: 1,
            small_multiples: Some(SmallMultiplesConfig::default()),
            ..Settings::default()
        };
        let folded = apply_top_n(points, &settings);
        let rows: Vec<_> = folded
            .iter()
            .map(|p| (p.group.as_deref(), p.category.as_str(), p.actual))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Some("EU"), "A", 5.0),
                (Some("EU"), "Others", 4.0),
                (None, "D", 100.0),
            ]
        );
    }
}
