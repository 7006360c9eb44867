//! CSV to SVG through the whole pipeline

use ibcs_charts::layout::LegendPosition;
use ibcs_charts::{
    render, render_with_config, ChartType, DataError, RenderConfig, RenderError, Settings,
    Stylesheet,
};

const SALES: &str = "\
category,actual,budget,previous_year,comment
North,120,100,110,
South,90,100,95,Lost key account
East,60,50,40,
West,40,45,50,New competitor
";

const REGIONS: &str = "\
category,group,actual,budget
Q1,Europe,30,25
Q2,Europe,35,30
Q1,Americas,50,55
Q2,Americas,52,50
Q1,Asia,20,18
Q2,Asia,24,22
";

fn render_type(chart_type: ChartType) -> String {
    let config = RenderConfig::new()
        .with_settings(Settings::default().with_chart_type(chart_type));
    render_with_config(SALES, config).unwrap()
}

#[test]
fn test_every_chart_type_renders() {
    for chart_type in ChartType::ALL {
        let svg = render_type(chart_type);
        assert!(svg.starts_with("<?xml"), "{chart_type}");
        assert!(svg.contains(r#"viewBox="0 0 800 400""#), "{chart_type}");
        assert!(svg.trim_end().ends_with("</svg>"), "{chart_type}");
        assert!(
            svg.contains(&format!(r#"<g class="ibcs-{}">"#, chart_type.as_str())),
            "{chart_type}"
        );
        assert_eq!(svg.matches("<g ").count(), svg.matches("</g>").count(), "{chart_type}");
    }
}

#[test]
fn test_plot_group_translated_by_margins() {
    // right legend plus comment box; lollipop overrides the left margin
    let svg = render_type(ChartType::Lollipop);
    assert!(svg.contains(r#"<g class="ibcs-plot" transform="translate(100,30)">"#));

    let svg = render_type(ChartType::Column);
    assert!(svg.contains(r#"<g class="ibcs-plot" transform="translate(60,30)">"#));
}

#[test]
fn test_comments_get_numbered_markers() {
    let svg = render(SALES).unwrap();
    assert!(svg.contains("ibcs-comment-box"));
    assert!(svg.contains("South: Lost key account"));
    assert!(svg.contains("West: New competitor"));
    // two markers in the chart and two in the panel
    assert_eq!(svg.matches(r#"class="ibcs-comment-marker""#).count(), 4);
}

#[test]
fn test_no_comment_box_without_comments() {
    let svg = render("category,actual,budget\nA,10,8\nB,5,6\n").unwrap();
    assert!(!svg.contains("ibcs-comment"));
}

#[test]
fn test_legend_toggle_and_position() {
    let hidden = Settings {
        show_legend: false,
        ..Settings::default()
    };
    let svg = render_with_config(SALES, RenderConfig::new().with_settings(hidden)).unwrap();
    assert!(!svg.contains("ibcs-legend"));

    let bottom = Settings {
        legend_position: LegendPosition::Bottom,
        ..Settings::default()
    };
    let svg = render_with_config(SALES, RenderConfig::new().with_settings(bottom)).unwrap();
    assert!(svg.contains("ibcs-legend-swatch"));
    assert!(svg.contains(">ΔBU+</text>"));
}

#[test]
fn test_small_viewport_drops_peripherals() {
    let settings = Settings {
        show_title: true,
        title: Some("Sales".to_string()),
        ..Settings::default()
    };
    let config = RenderConfig::new()
        .with_size(250.0, 150.0)
        .with_settings(settings);
    let svg = render_with_config(SALES, config).unwrap();
    assert!(svg.contains(r#"<g class="ibcs-plot" transform="translate(35,5)">"#));
    assert!(!svg.contains("ibcs-title"));
    assert!(!svg.contains("ibcs-legend"));
    assert!(!svg.contains("ibcs-comment-box"));
    assert!(!svg.contains("ibcs-category-label"));
}

#[test]
fn test_title_from_settings_toml() {
    let settings = Settings::from_str(
        r#"
[chart]
type = "bar"
comparison = "py"

[title]
text = "Revenue & margin"
"#,
    )
    .unwrap();
    let svg = render_with_config(SALES, RenderConfig::new().with_settings(settings)).unwrap();
    assert!(svg.contains("Revenue &amp; margin"));
    assert!(svg.contains(r#"<g class="ibcs-bar">"#));
    assert!(svg.contains(">PY</text>"));
}

#[test]
fn test_small_multiples_one_cell_per_group() {
    let settings = Settings::from_str("[small_multiples]\nenabled = true\n").unwrap();
    let config = RenderConfig::new()
        .with_size(900.0, 500.0)
        .with_settings(settings);
    let svg = render_with_config(REGIONS, config).unwrap();
    assert_eq!(svg.matches(r#"class="ibcs-cell""#).count(), 3);
    for group in ["Europe", "Americas", "Asia"] {
        assert!(svg.contains(&format!(">{group}</text>")), "missing header {group}");
    }
}

#[test]
fn test_small_multiples_without_headers() {
    let settings =
        Settings::from_str("[small_multiples]\nenabled = true\nshow_headers = false\n").unwrap();
    let svg = render_with_config(REGIONS, RenderConfig::new().with_settings(settings)).unwrap();
    assert!(!svg.contains("ibcs-cell-header"));
}

#[test]
fn test_debug_outlines_regions() {
    let svg = render_with_config(SALES, RenderConfig::new().with_debug(true)).unwrap();
    assert!(svg.contains("ibcs-debug-legend"));
    assert!(svg.contains("ibcs-debug-comments"));
    assert!(svg.contains("ibcs-debug-drawable"));
    assert!(!svg.contains("ibcs-debug-title"));

    let plain = render(SALES).unwrap();
    assert!(!plain.contains("ibcs-debug"));
}

#[test]
fn test_stylesheet_overrides_variance_color() {
    let stylesheet = Stylesheet::from_str("[colors]\npositive = \"#0077cc\"\n").unwrap();
    let svg = render_with_config(SALES, RenderConfig::new().with_stylesheet(stylesheet)).unwrap();
    assert!(svg.contains("#0077cc"));
    assert!(!svg.contains("#8cb400"));
}

#[test]
fn test_invert_swaps_variance_colors() {
    let csv = "category,actual,budget\nRent,120,100\n";
    let plain = render(csv).unwrap();
    let inverted = Settings {
        invert_variance: true,
        ..Settings::default()
    };
    let inverted = render_with_config(csv, RenderConfig::new().with_settings(inverted)).unwrap();

    let variance_rect = |svg: &str| {
        svg.lines()
            .find(|l| l.contains(r#"class="ibcs-variance" x="#))
            .map(str::to_string)
            .unwrap()
    };
    assert!(variance_rect(&plain).contains("#8cb400"));
    assert!(variance_rect(&inverted).contains("#ff0000"));
}

#[test]
fn test_top_n_folds_into_others() {
    let settings = Settings::from_str("[chart]\ntop_n = 2\n").unwrap();
    let svg = render_with_config(SALES, RenderConfig::new().with_settings(settings)).unwrap();
    assert!(svg.contains(">Others</text>"));
    assert!(!svg.contains(">West</text>"));
}

#[test]
fn test_data_errors() {
    assert!(matches!(
        render("category,actual\n"),
        Err(RenderError::Data(DataError::Empty))
    ));
    assert!(matches!(
        render("category,budget\nA,1\n"),
        Err(RenderError::Data(DataError::MissingColumn { .. }))
    ));
    let err = render("category,actual\nA,1\nB,n/a\n").unwrap_err();
    assert!(err.to_string().contains("row 2"));
}

#[test]
fn test_small_multiples_keep_ungrouped_rows() {
    let csv = "\
category,group,actual,budget,comment
A,EU,10,8,
B,,20,18,Ungrouped note
C,US,30,25,
";
    let settings = Settings::from_str("[small_multiples]\nenabled = true\n").unwrap();
    let svg = render_with_config(csv, RenderConfig::new().with_settings(settings)).unwrap();
    assert_eq!(svg.matches(r#"class="ibcs-cell""#).count(), 3);
    assert!(svg.contains(">B</text>"));
    // the header row only names real groups
    assert_eq!(svg.matches("ibcs-cell-header").count(), 2);
    // one marker in the chart, one in the panel
    assert_eq!(svg.matches(r#"class="ibcs-comment-marker""#).count(), 2);
}

fn marker_labels(svg: &str, number: usize) -> usize {
    svg.lines()
        .filter(|l| l.contains(r#"class="ibcs-comment-marker-label""#))
        .filter(|l| l.ends_with(&format!(">{number}</text>")))
        .count()
}

#[test]
fn test_repeated_category_comments_numbered_per_row() {
    let svg = render("category,actual,budget,comment\nA,10,8,first\nA,12,8,second\n").unwrap();
    // chart marker plus panel entry for each comment
    assert_eq!(marker_labels(&svg, 1), 2);
    assert_eq!(marker_labels(&svg, 2), 2);
}

fn actual_bar_heights(svg: &str) -> Vec<f64> {
    svg.lines()
        .filter(|l| l.contains(r#"class="ibcs-actual""#))
        .filter_map(|l| l.split(r#"height=""#).nth(1))
        .filter_map(|rest| rest.split('"').next())
        .filter_map(|h| h.parse().ok())
        .collect()
}

#[test]
fn test_shared_scale_spans_every_cell() {
    let csv = "\
category,group,actual
Q1,Big,1000
Q2,Big,800
Q1,Small,10
Q2,Small,8
";
    let render_scaled = |shared: bool| {
        let toml = format!(
            "[chart]\ntype = \"column\"\n\n\
             [small_multiples]\nenabled = true\nshared_scale = {shared}\n"
        );
        let settings = Settings::from_str(&toml).unwrap();
        let config = RenderConfig::new()
            .with_size(900.0, 500.0)
            .with_settings(settings);
        actual_bar_heights(&render_with_config(csv, config).unwrap())
    };

    let shared = render_scaled(true);
    let independent = render_scaled(false);
    assert_eq!(shared.len(), 4);
    assert_eq!(independent.len(), 4);

    // the large group sets the shared domain, so its bars do not move
    assert_eq!(shared[..2], independent[..2]);
    // the small group shrinks to the large group's scale
    assert!(shared[2] * 10.0 < independent[2]);
    assert!(shared[3] * 10.0 < independent[3]);
}
