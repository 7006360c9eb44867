//! Title, legend, comment panel and debug outlines

use crate::data::DataPoint;
use crate::layout::{
    constants, legend_item_offset, ChartLayout, CommentBoxPosition, LegendPosition, Point, Rect,
};
use crate::settings::Settings;
use crate::stylesheet::Stylesheet;

use super::charts::{comparison_paint, fit_label};
use super::svg::{Paint, RenderContext, SvgBuilder, TextAnchor};

const TITLE_FONT_SIZE: f64 = 14.0;
const COMMENT_LINE_HEIGHT: f64 = 16.0;
const SWATCH_SIZE: f64 = 10.0;

/// A numbered comment shown in the comment panel
#[derive(Debug, Clone, PartialEq)]
pub struct CommentEntry {
    pub number: usize,
    /// Index of the commented row in the full row set
    pub row: usize,
    pub category: String,
    pub group: Option<String>,
    pub text: String,
}

/// Number every commented row in data order, starting at 1
pub fn numbered_comments(points: &[DataPoint]) -> Vec<CommentEntry> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.has_comment())
        .enumerate()
        .map(|(i, (row, p))| CommentEntry {
            number: i + 1,
            row,
            category: p.category.clone(),
            group: p.group.clone(),
            text: p.comment.clone().unwrap_or_default().trim().to_string(),
        })
        .collect()
}

/// Comment number for each of `rows`, given as indices into the full row set
pub fn marker_numbers(
    rows: impl IntoIterator<Item = usize>,
    comments: &[CommentEntry],
) -> Vec<Option<usize>> {
    rows.into_iter()
        .map(|row| comments.iter().find(|c| c.row == row).map(|c| c.number))
        .collect()
}

/// A legend swatch and its label
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub paint: Paint,
}

/// Legend entries: actual, the comparison scenario and both variance colors
pub fn legend_items(
    b: &mut SvgBuilder,
    settings: &Settings,
    stylesheet: &Stylesheet,
) -> Vec<LegendItem> {
    let comparison = settings.comparison;
    vec![
        LegendItem {
            label: "AC".to_string(),
            paint: Paint::solid(stylesheet.resolve_or_default("actual")),
        },
        LegendItem {
            label: comparison.label().to_string(),
            paint: comparison_paint(b, comparison, stylesheet),
        },
        LegendItem {
            label: format!("Δ{}+", comparison.label()),
            paint: Paint::solid(stylesheet.variance_color(true)),
        },
        LegendItem {
            label: format!("Δ{}-", comparison.label()),
            paint: Paint::solid(stylesheet.variance_color(false)),
        },
    ]
}

/// Origin of the first legend item inside a carved legend strip
pub fn legend_origin_in_area(area: Rect, position: LegendPosition, item_count: usize) -> Point {
    if position.is_horizontal() {
        let items_width = item_count as f64 * constants::LEGEND_ITEM_WIDTH;
        Point::new(
            area.x + (area.width - items_width) / 2.0,
            area.y + area.height / 2.0,
        )
    } else {
        Point::new(area.x + constants::LEGEND_LEFT_INSET, area.y + constants::LEGEND_ROW_HEIGHT)
    }
}

pub fn draw_legend(
    b: &mut SvgBuilder,
    origin: Point,
    position: LegendPosition,
    items: &[LegendItem],
    ctx: &RenderContext,
) {
    let font_size = ctx.svg.label_font_size;
    let text = ctx.stylesheet.resolve_or_default("text");
    b.start_group("legend", None);
    for (i, item) in items.iter().enumerate() {
        let at = legend_item_offset(origin, position, i);
        let swatch_y = at.y - SWATCH_SIZE + 1.0;
        b.add_rect("legend-swatch", at.x, swatch_y, SWATCH_SIZE, SWATCH_SIZE, &item.paint);
        b.add_text(
            "legend-label",
            &item.label,
            Point::new(at.x + SWATCH_SIZE + 4.0, at.y),
            TextAnchor::Start,
            font_size,
            &text,
        );
    }
    b.end_group();
}

/// Chart title centred in its strip
pub fn draw_title(b: &mut SvgBuilder, area: Rect, text: &str, stylesheet: &Stylesheet) {
    let at = Point::new(area.center().x, area.y + area.height * 0.65);
    let fill = stylesheet.resolve_or_default("text");
    b.add_text("title", text, at, TextAnchor::Middle, TITLE_FONT_SIZE, &fill);
}

/// Group name above a small-multiples cell
pub fn draw_cell_header(b: &mut SvgBuilder, name: &str, cell_width: f64, stylesheet: &Stylesheet) {
    let at = Point::new(cell_width / 2.0, constants::cell::HEADER_HEIGHT - 6.0);
    b.add_text(
        "cell-header",
        &fit_label(name, cell_width, 11.0),
        at,
        TextAnchor::Middle,
        11.0,
        &stylesheet.resolve_or_default("text"),
    );
}

/// Numbered comment list; lines that do not fit the box height are dropped
pub fn draw_comment_box(
    b: &mut SvgBuilder,
    position: CommentBoxPosition,
    comments: &[CommentEntry],
    ctx: &RenderContext,
) {
    let font_size = ctx.svg.label_font_size;
    let stylesheet = ctx.stylesheet;
    let text_color = stylesheet.resolve_or_default("text");
    let marker = Paint::solid(stylesheet.resolve_or_default("comment-marker"));

    b.start_group("comments", Some(Point::new(position.x, position.y)));
    b.add_rect(
        "comment-box",
        0.0,
        0.0,
        position.box_width,
        position.box_height,
        &Paint::solid(stylesheet.resolve_or_default("comment")),
    );

    let mut shown = 0;
    for (i, entry) in comments.iter().enumerate() {
        let y = COMMENT_LINE_HEIGHT + i as f64 * COMMENT_LINE_HEIGHT;
        if y > position.box_height - 4.0 {
            break;
        }
        b.add_circle("comment-marker", 12.0, y - 4.0, 6.0, &marker);
        b.add_text(
            "comment-marker-label",
            &entry.number.to_string(),
            Point::new(12.0, y - 1.0),
            TextAnchor::Middle,
            8.0,
            &stylesheet.resolve_or_default("background"),
        );
        let line = format!("{}: {}", entry.category, entry.text);
        b.add_text(
            "comment",
            &fit_label(&line, position.box_width - 28.0, font_size),
            Point::new(22.0, y),
            TextAnchor::Start,
            font_size,
            &text_color,
        );
        shown += 1;
    }
    if shown < comments.len() {
        tracing::warn!(shown, total = comments.len(), "comment panel too short for every comment");
    }
    b.end_group();
}

/// Dashed outline around every carved region
pub fn draw_debug_regions(
    b: &mut SvgBuilder,
    layout: &ChartLayout,
    drawable: Option<Rect>,
    stylesheet: &Stylesheet,
) {
    let paint = Paint::stroke(stylesheet.resolve_or_default("debug"), 1.0).dashed("4,2");
    let regions = [
        ("debug-title", layout.title_area),
        ("debug-legend", layout.legend_area),
        ("debug-comments", layout.comment_box_area),
        ("debug-chart-area", Some(layout.chart_area)),
        ("debug-drawable", drawable),
    ];
    b.start_group("debug", None);
    for (class, region) in regions {
        if let Some(rect) = region {
            b.add_rect(class, rect.x, rect.y, rect.width, rect.height, &paint);
        }
    }
    b.end_group();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::SvgConfig;
    use pretty_assertions::assert_eq;

    fn commented() -> Vec<DataPoint> {
        vec![
            DataPoint::new("North", 120.0).with_comment("New store"),
            DataPoint::new("South", 80.0),
            DataPoint::new("West", 50.0).with_comment("  Strike  "),
            DataPoint::new("North", 10.0).with_group("EU").with_comment("Other group"),
        ]
    }

    #[test]
    fn test_numbered_comments() {
        let comments = numbered_comments(&commented());
        let numbers: Vec<_> = comments.iter().map(|c| (c.number, c.text.as_str())).collect();
        assert_eq!(numbers, vec![(1, "New store"), (2, "Strike"), (3, "Other group")]);
    }

    #[test]
    fn test_marker_numbers_follow_rows() {
        let points = commented();
        let comments = numbered_comments(&points);
        assert_eq!(
            marker_numbers(0..points.len(), &comments),
            vec![Some(1), None, Some(2), Some(3)]
        );
        assert_eq!(marker_numbers([3, 1], &comments), vec![Some(3), None]);
    }

    #[test]
    fn test_duplicate_categories_get_distinct_numbers() {
        let points = vec![
            DataPoint::new("A", 10.0).with_comment("first"),
            DataPoint::new("A", 12.0).with_comment("second"),
        ];
        let comments = numbered_comments(&points);
        assert_eq!(
            marker_numbers(0..points.len(), &comments),
            vec![Some(1), Some(2)]
        );
    }

    #[test]
    fn test_legend_labels_follow_comparison() {
        let mut b = SvgBuilder::new(SvgConfig::default());
        let mut settings = Settings::default();
        settings.comparison = crate::variance::Comparison::PreviousYear;
        let labels: Vec<_> = legend_items(&mut b, &settings, &Stylesheet::default())
            .into_iter()
            .map(|i| i.label)
            .collect();
        assert_eq!(labels, vec!["AC", "PY", "ΔPY+", "ΔPY-"]);
    }

    #[test]
    fn test_legend_origin_in_area() {
        let area = Rect::new(0.0, 370.0, 800.0, 30.0);
        assert_eq!(
            legend_origin_in_area(area, LegendPosition::Bottom, 4),
            Point::new(260.0, 385.0)
        );
        let area = Rect::new(720.0, 0.0, 80.0, 400.0);
        assert_eq!(
            legend_origin_in_area(area, LegendPosition::Right, 4),
            Point::new(725.0, 20.0)
        );
    }

    #[test]
    fn test_comment_box_drops_overflowing_lines() {
        let settings = Settings::default();
        let svg = SvgConfig::default();
        let stylesheet = Stylesheet::default();
        let ctx = RenderContext {
            settings: &settings,
            svg: &svg,
            stylesheet: &stylesheet,
            debug: false,
        };
        let comments = numbered_comments(&commented());
        let mut b = SvgBuilder::new(svg.clone());
        let position = CommentBoxPosition {
            x: 0.0,
            y: 0.0,
            box_width: 200.0,
            box_height: 40.0,
        };
        draw_comment_box(&mut b, position, &comments, &ctx);
        let out = b.build(200.0, 40.0);
        // lines at y=16 and y=32 fit, y=48 does not
        assert_eq!(out.matches(r#"class="ibcs-comment""#).count(), 2);
    }
}
