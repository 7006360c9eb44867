//! Drawing routines, one per chart type
//!
//! Every routine draws into chart-relative coordinates: `(0, 0)` is the top
//! left of the drawable area and `(width, height)` its bottom right. Axis
//! labels spill into the margins the layout reserved for them.

use crate::chart_type::ChartType;
use crate::data::DataPoint;
use crate::format::{format_number, format_percent, NumberFormat};
use crate::layout::{CategoryAxisConfig, LayoutConfig, Point};
use crate::stylesheet::Stylesheet;
use crate::variance::Comparison;

use super::scale::{value_domain, BandScale, LinearScale};
use super::svg::{Paint, RenderContext, SvgBuilder, TextAnchor};

/// Share of each category step left empty between bars
const BAND_PADDING: f64 = 0.3;
/// Share of a variance-chart band taken by each of the two offset columns
const OFFSET_COLUMN_SHARE: f64 = 0.7;
const MARKER_RADIUS: f64 = 7.0;
const DOT_RADIUS: f64 = 4.0;
const LABEL_GAP: f64 = 4.0;

/// Data and styling for one chart drawn into a `width` x `height` area
#[derive(Debug, Clone)]
pub struct ChartFrame<'a> {
    pub points: &'a [DataPoint],
    pub width: f64,
    pub height: f64,
    pub chart_type: ChartType,
    pub comparison: Comparison,
    pub invert: bool,
    pub category_axis: CategoryAxisConfig,
    pub number_format: NumberFormat,
    pub label_font_size: f64,
    pub stylesheet: &'a Stylesheet,
    /// Overrides the per-chart value domain (shared small-multiples scale)
    pub value_domain: Option<(f64, f64)>,
    /// Comment number per point, aligned with `points`
    pub comment_markers: Vec<Option<usize>>,
}

impl<'a> ChartFrame<'a> {
    pub fn new(
        points: &'a [DataPoint],
        width: f64,
        height: f64,
        config: &LayoutConfig,
        ctx: &RenderContext<'a>,
    ) -> Self {
        Self {
            points,
            width,
            height,
            chart_type: config.chart_type,
            comparison: ctx.settings.comparison,
            invert: ctx.settings.invert_variance,
            category_axis: config.category_axis,
            number_format: ctx.settings.number_format,
            label_font_size: ctx.svg.label_font_size,
            stylesheet: ctx.stylesheet,
            value_domain: None,
            comment_markers: vec![],
        }
    }

    pub fn with_value_domain(mut self, domain: (f64, f64)) -> Self {
        self.value_domain = Some(domain);
        self
    }

    pub fn with_comment_markers(mut self, markers: Vec<Option<usize>>) -> Self {
        self.comment_markers = markers;
        self
    }

    fn domain(&self) -> (f64, f64) {
        self.value_domain.unwrap_or_else(|| {
            chart_domain(self.chart_type, self.points, self.comparison, self.invert)
        })
    }

    fn marker(&self, index: usize) -> Option<usize> {
        self.comment_markers.get(index).copied().flatten()
    }

    fn color(&self, token: &str) -> String {
        self.stylesheet.resolve_or_default(token)
    }

    /// Category band and value scale for `count` bands
    ///
    /// Horizontal types run categories down the y axis with values along x;
    /// every other type puts categories along x and values up the y axis.
    fn scales(&self, count: usize) -> (BandScale, LinearScale) {
        if self.chart_type.is_horizontal() {
            (
                BandScale::new(count, (0.0, self.height), BAND_PADDING),
                LinearScale::new(self.domain(), (0.0, self.width)),
            )
        } else {
            (
                BandScale::new(count, (0.0, self.width), BAND_PADDING),
                LinearScale::new(self.domain(), (self.height, 0.0)),
            )
        }
    }
}

/// Value range a chart type plots for `points`
///
/// Waterfalls span their running totals and lollipops their variance
/// percentages; every other type spans actual and comparison values.
pub fn chart_domain(
    chart_type: ChartType,
    points: &[DataPoint],
    comparison: Comparison,
    invert: bool,
) -> (f64, f64) {
    match chart_type {
        ChartType::Lollipop => value_domain(
            points
                .iter()
                .filter_map(|p| p.variance(comparison, invert))
                .map(|v| v.percent),
        ),
        ChartType::Waterfall => {
            let steps = waterfall_steps(points, comparison);
            let start = steps.first().map(|s| s.0).unwrap_or(0.0);
            value_domain(std::iter::once(start).chain(steps.iter().map(|s| s.1)))
        }
        _ => value_domain(points.iter().flat_map(|p| {
            std::iter::once(p.actual).chain(p.comparison_value(comparison))
        })),
    }
}

/// `(from, to)` running totals of each waterfall step, starting at the
/// comparison total; rows without a comparison value step by their actual
fn waterfall_steps(points: &[DataPoint], comparison: Comparison) -> Vec<(f64, f64)> {
    let mut running: f64 = points
        .iter()
        .filter_map(|p| p.comparison_value(comparison))
        .sum();
    points
        .iter()
        .map(|p| {
            let from = running;
            running += p.actual - p.comparison_value(comparison).unwrap_or(0.0);
            (from, running)
        })
        .collect()
}

/// Draw the chart type selected in `frame`
pub fn draw_chart(b: &mut SvgBuilder, frame: &ChartFrame) {
    tracing::debug!(
        chart_type = %frame.chart_type,
        points = frame.points.len(),
        width = frame.width,
        height = frame.height,
        "drawing chart"
    );
    b.start_group(frame.chart_type.as_str(), None);
    match frame.chart_type {
        ChartType::Variance => draw_variance(b, frame),
        ChartType::Column => draw_column(b, frame),
        ChartType::Bar => draw_bar(b, frame),
        ChartType::Waterfall => draw_waterfall(b, frame),
        ChartType::Lollipop => draw_lollipop(b, frame),
        ChartType::Dot => draw_dot(b, frame),
        ChartType::Line => draw_line(b, frame),
        ChartType::Area => draw_area(b, frame),
        ChartType::Combo => draw_combo(b, frame),
    }
    b.end_group();
}

/// Fill for the comparison series: outlined plan, grey previous year,
/// hatched forecast
pub(crate) fn comparison_paint(
    b: &mut SvgBuilder,
    comparison: Comparison,
    stylesheet: &Stylesheet,
) -> Paint {
    let color = stylesheet.resolve_or_default(comparison.color_token());
    match comparison {
        Comparison::Budget => {
            Paint::outlined(stylesheet.resolve_or_default("background"), color, 1.5)
        }
        Comparison::PreviousYear => Paint::solid(color),
        Comparison::Forecast => {
            let hatch = b.add_hatch_pattern(&color);
            Paint::outlined(hatch, color, 1.0)
        }
    }
}

fn draw_variance(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, y) = frame.scales(frame.points.len());
    let zero = y.map(0.0);
    let column = band.bandwidth() * OFFSET_COLUMN_SHARE;
    let offset = band.bandwidth() - column;
    let actual = Paint::solid(frame.color("actual"));
    let comparison = comparison_paint(b, frame.comparison, frame.stylesheet);
    let signed = frame.number_format.signed();

    for (i, p) in frame.points.iter().enumerate() {
        let x = band.position(i);
        let actual_top = y.map(p.actual);
        let mut top = actual_top.min(zero);
        let mut bottom = actual_top.max(zero);

        if let Some(value) = p.comparison_value(frame.comparison) {
            let comparison_top = y.map(value);
            b.add_rect(
                "comparison",
                x + offset,
                comparison_top,
                column,
                zero - comparison_top,
                &comparison,
            );
            top = top.min(comparison_top);
            bottom = bottom.max(comparison_top);
        }
        b.add_rect("actual", x, actual_top, column, zero - actual_top, &actual);

        if let (Some(value), Some(v)) = (
            p.comparison_value(frame.comparison),
            p.variance(frame.comparison, frame.invert),
        ) {
            let color = frame.stylesheet.variance_color(v.is_favorable());
            let comparison_top = y.map(value);
            b.add_rect(
                "variance",
                x + column - 2.0,
                comparison_top,
                4.0,
                actual_top - comparison_top,
                &Paint::solid(color),
            );
            let label = format_number(v.absolute, &signed);
            value_label(b, frame, &label, band.center(i), (top, bottom), p.actual >= 0.0);
        }
        let marker_y = top - 2.0 * MARKER_RADIUS - LABEL_GAP - frame.label_font_size;
        draw_comment_marker(b, frame, i, Point::new(band.center(i), marker_y));
    }

    draw_baseline(b, frame, zero);
    draw_category_labels_below(b, frame, &band, &categories(frame.points));
}

fn draw_column(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, y) = frame.scales(frame.points.len());
    let zero = y.map(0.0);
    let width = band.bandwidth();
    let actual = Paint::solid(frame.color("actual"));
    let tick = Paint::stroke(frame.color(frame.comparison.color_token()), 2.0);

    for (i, p) in frame.points.iter().enumerate() {
        let x = band.position(i);
        let top = y.map(p.actual);
        b.add_rect("actual", x, top, width, zero - top, &actual);
        if let Some(value) = p.comparison_value(frame.comparison) {
            let at = y.map(value);
            let (from, to) = (Point::new(x - 2.0, at), Point::new(x + width + 2.0, at));
            b.add_line("comparison", from, to, &tick);
        }
        let label = format_number(p.actual, &frame.number_format);
        let extent = (top.min(zero), top.max(zero));
        value_label(b, frame, &label, band.center(i), extent, p.actual >= 0.0);
        let marker_y = extent.0 - 2.0 * MARKER_RADIUS - frame.label_font_size;
        draw_comment_marker(b, frame, i, Point::new(band.center(i), marker_y));
    }

    draw_baseline(b, frame, zero);
    draw_category_labels_below(b, frame, &band, &categories(frame.points));
}

fn draw_bar(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, x) = frame.scales(frame.points.len());
    let zero = x.map(0.0);
    let thickness = band.bandwidth();
    let actual = Paint::solid(frame.color("actual"));
    let tick = Paint::stroke(frame.color(frame.comparison.color_token()), 2.0);
    let muted = frame.color("text-muted");

    for (i, p) in frame.points.iter().enumerate() {
        let top = band.position(i);
        let end = x.map(p.actual);
        b.add_rect("actual", zero, top, end - zero, thickness, &actual);
        if let Some(value) = p.comparison_value(frame.comparison) {
            let at = x.map(value);
            let (from, to) = (Point::new(at, top - 2.0), Point::new(at, top + thickness + 2.0));
            b.add_line("comparison", from, to, &tick);
        }
        let (label_x, anchor) = if p.actual >= 0.0 {
            (end + LABEL_GAP, TextAnchor::Start)
        } else {
            (end - LABEL_GAP, TextAnchor::End)
        };
        let baseline = band.center(i) + frame.label_font_size / 3.0;
        let label = format_number(p.actual, &frame.number_format);
        b.add_text(
            "value-label",
            &label,
            Point::new(label_x, baseline),
            anchor,
            frame.label_font_size,
            &muted,
        );
        draw_comment_marker(b, frame, i, Point::new(end.max(zero) + 40.0, band.center(i)));
    }

    draw_axis_line(b, frame, zero);
    draw_category_labels_left(b, frame, &band, &categories(frame.points));
}

fn draw_waterfall(b: &mut SvgBuilder, frame: &ChartFrame) {
    let steps = waterfall_steps(frame.points, frame.comparison);
    let start = steps.first().map(|s| s.0).unwrap_or(0.0);
    let end = steps.last().map(|s| s.1).unwrap_or(start);

    let count = frame.points.len() + 2;
    let (band, y) = frame.scales(count);
    let zero = y.map(0.0);
    let width = band.bandwidth();
    let connector = Paint::stroke(frame.color("axis"), 0.5);
    let signed = frame.number_format.signed();

    let comparison = comparison_paint(b, frame.comparison, frame.stylesheet);
    let start_top = y.map(start);
    b.add_rect("comparison", band.position(0), start_top, width, zero - start_top, &comparison);
    let label = format_number(start, &frame.number_format);
    let extent = (start_top.min(zero), start_top.max(zero));
    value_label(b, frame, &label, band.center(0), extent, start >= 0.0);

    for (i, (from, to)) in steps.iter().enumerate() {
        let slot = i + 1;
        let x = band.position(slot);
        let delta = to - from;
        let favorable = if frame.invert { delta <= 0.0 } else { delta >= 0.0 };
        let color = frame.stylesheet.variance_color(favorable);
        b.add_line(
            "connector",
            Point::new(band.position(slot - 1) + width, y.map(*from)),
            Point::new(x, y.map(*from)),
            &connector,
        );
        let (from_y, to_y) = (y.map(*from), y.map(*to));
        b.add_rect("variance", x, from_y, width, to_y - from_y, &Paint::solid(color));

        let oriented = if frame.invert { -delta } else { delta };
        let extent = (from_y.min(to_y), from_y.max(to_y));
        let label = format_number(oriented, &signed);
        value_label(b, frame, &label, band.center(slot), extent, delta >= 0.0);
        let marker_y = extent.0 - 2.0 * MARKER_RADIUS - frame.label_font_size;
        draw_comment_marker(b, frame, i, Point::new(band.center(slot), marker_y));
    }

    let last = count - 1;
    b.add_line(
        "connector",
        Point::new(band.position(last - 1) + width, y.map(end)),
        Point::new(band.position(last), y.map(end)),
        &connector,
    );
    let actual = Paint::solid(frame.color("actual"));
    let end_top = y.map(end);
    b.add_rect("actual", band.position(last), end_top, width, zero - end_top, &actual);
    let label = format_number(end, &frame.number_format);
    let extent = (end_top.min(zero), end_top.max(zero));
    value_label(b, frame, &label, band.center(last), extent, end >= 0.0);

    draw_baseline(b, frame, zero);
    let mut labels = vec![frame.comparison.label().to_string()];
    labels.extend(categories(frame.points));
    labels.push("AC".to_string());
    draw_category_labels_below(b, frame, &band, &labels);
}

fn draw_lollipop(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, x) = frame.scales(frame.points.len());
    let zero = x.map(0.0);
    let muted = frame.color("text-muted");
    let signed = frame.number_format.signed();

    for (i, p) in frame.points.iter().enumerate() {
        let Some(v) = p.variance(frame.comparison, frame.invert) else {
            continue;
        };
        let cy = band.center(i);
        let end = x.map(v.percent);
        let color = frame.stylesheet.variance_color(v.is_favorable());
        let stem = Paint::stroke(color.clone(), 2.0);
        b.add_line("stem", Point::new(zero, cy), Point::new(end, cy), &stem);
        b.add_circle("pin", end, cy, DOT_RADIUS, &Paint::solid(color));

        let (label_x, anchor) = if v.percent >= 0.0 {
            (end + DOT_RADIUS + LABEL_GAP, TextAnchor::Start)
        } else {
            (end - DOT_RADIUS - LABEL_GAP, TextAnchor::End)
        };
        let label = format_percent(v.percent, &signed);
        b.add_text(
            "value-label",
            &label,
            Point::new(label_x, cy + frame.label_font_size / 3.0),
            anchor,
            frame.label_font_size,
            &muted,
        );
        draw_comment_marker(b, frame, i, Point::new(end.max(zero) + 45.0, cy));
    }

    draw_axis_line(b, frame, zero);
    draw_category_labels_left(b, frame, &band, &categories(frame.points));
}

fn draw_dot(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, y) = frame.scales(frame.points.len());
    let actual = Paint::solid(frame.color("actual"));
    let comparison = Paint::outlined(
        frame.color("background"),
        frame.color(frame.comparison.color_token()),
        1.5,
    );

    for (i, p) in frame.points.iter().enumerate() {
        let cx = band.center(i);
        let actual_y = y.map(p.actual);
        let mut top = actual_y;
        if let (Some(value), Some(v)) = (
            p.comparison_value(frame.comparison),
            p.variance(frame.comparison, frame.invert),
        ) {
            let comparison_y = y.map(value);
            let color = frame.stylesheet.variance_color(v.is_favorable());
            let connector = Paint::stroke(color, 2.0);
            let (from, to) = (Point::new(cx, comparison_y), Point::new(cx, actual_y));
            b.add_line("variance", from, to, &connector);
            b.add_circle("comparison", cx, comparison_y, DOT_RADIUS, &comparison);
            top = top.min(comparison_y);
        }
        b.add_circle("actual", cx, actual_y, DOT_RADIUS, &actual);
        let marker_y = top - DOT_RADIUS - MARKER_RADIUS - LABEL_GAP;
        draw_comment_marker(b, frame, i, Point::new(cx, marker_y));
    }

    draw_baseline(b, frame, y.map(0.0));
    draw_category_labels_below(b, frame, &band, &categories(frame.points));
}

fn draw_line(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, y) = frame.scales(frame.points.len());
    draw_series_lines(b, frame, &band, &y);
    draw_baseline(b, frame, y.map(0.0));
    draw_category_labels_below(b, frame, &band, &categories(frame.points));
}

fn draw_area(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, y) = frame.scales(frame.points.len());
    let zero = y.map(0.0);
    if !frame.points.is_empty() {
        let mut outline = vec![Point::new(band.center(0), zero)];
        outline.extend(
            frame
                .points
                .iter()
                .enumerate()
                .map(|(i, p)| Point::new(band.center(i), y.map(p.actual))),
        );
        outline.push(Point::new(band.center(frame.points.len() - 1), zero));
        let fill = Paint::solid(frame.color("actual")).with_opacity(0.25);
        b.add_polygon("area", &outline, &fill);
    }
    draw_series_lines(b, frame, &band, &y);
    draw_baseline(b, frame, zero);
    draw_category_labels_below(b, frame, &band, &categories(frame.points));
}

fn draw_combo(b: &mut SvgBuilder, frame: &ChartFrame) {
    let (band, y) = frame.scales(frame.points.len());
    let zero = y.map(0.0);
    let comparison = comparison_paint(b, frame.comparison, frame.stylesheet);
    let actual_color = frame.color("actual");
    let signed = frame.number_format.signed();

    for (i, p) in frame.points.iter().enumerate() {
        if let Some(value) = p.comparison_value(frame.comparison) {
            let top = y.map(value);
            let x = band.position(i);
            b.add_rect("comparison", x, top, band.bandwidth(), zero - top, &comparison);
        }
    }

    let line: Vec<Point> = frame
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Point::new(band.center(i), y.map(p.actual)))
        .collect();
    b.add_path("actual-line", &line, &Paint::stroke(actual_color.clone(), 2.0));

    for (i, (p, at)) in frame.points.iter().zip(&line).enumerate() {
        b.add_circle("actual", at.x, at.y, DOT_RADIUS, &Paint::solid(actual_color.clone()));
        let mut top = at.y;
        if let (Some(value), Some(v)) = (
            p.comparison_value(frame.comparison),
            p.variance(frame.comparison, frame.invert),
        ) {
            top = top.min(y.map(value));
            let label = format_number(v.absolute, &signed);
            let color = frame.stylesheet.variance_color(v.is_favorable());
            b.add_text(
                "variance-label",
                &label,
                Point::new(at.x, top - DOT_RADIUS - LABEL_GAP),
                TextAnchor::Middle,
                frame.label_font_size,
                &color,
            );
        }
        let marker_y = top - DOT_RADIUS - LABEL_GAP - frame.label_font_size - MARKER_RADIUS;
        draw_comment_marker(b, frame, i, Point::new(at.x, marker_y));
    }

    draw_baseline(b, frame, zero);
    draw_category_labels_below(b, frame, &band, &categories(frame.points));
}

/// Solid actual line with point markers and a dashed comparison line
fn draw_series_lines(b: &mut SvgBuilder, frame: &ChartFrame, band: &BandScale, y: &LinearScale) {
    let comparison_line: Vec<Point> = frame
        .points
        .iter()
        .enumerate()
        .filter_map(|(i, p)| {
            p.comparison_value(frame.comparison)
                .map(|value| Point::new(band.center(i), y.map(value)))
        })
        .collect();
    let comparison = Paint::stroke(frame.color(frame.comparison.color_token()), 1.5).dashed("4,3");
    b.add_path("comparison-line", &comparison_line, &comparison);

    let actual_color = frame.color("actual");
    let actual_line: Vec<Point> = frame
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| Point::new(band.center(i), y.map(p.actual)))
        .collect();
    b.add_path("actual-line", &actual_line, &Paint::stroke(actual_color.clone(), 2.0));

    let muted = frame.color("text-muted");
    for (i, (p, at)) in frame.points.iter().zip(&actual_line).enumerate() {
        b.add_circle("actual", at.x, at.y, 3.0, &Paint::solid(actual_color.clone()));
        let label = format_number(p.actual, &frame.number_format);
        let label_y = at.y - LABEL_GAP - 3.0;
        b.add_text(
            "value-label",
            &label,
            Point::new(at.x, label_y),
            TextAnchor::Middle,
            frame.label_font_size,
            &muted,
        );
        let marker_y = label_y - frame.label_font_size - MARKER_RADIUS;
        draw_comment_marker(b, frame, i, Point::new(at.x, marker_y));
    }
}

/// Label above a mark for positive values, below it for negative ones
fn value_label(
    b: &mut SvgBuilder,
    frame: &ChartFrame,
    text: &str,
    x: f64,
    (top, bottom): (f64, f64),
    above: bool,
) {
    let y = if above {
        top - LABEL_GAP
    } else {
        bottom + LABEL_GAP + frame.label_font_size
    };
    b.add_text(
        "value-label",
        text,
        Point::new(x, y),
        TextAnchor::Middle,
        frame.label_font_size,
        &frame.color("text-muted"),
    );
}

/// Numbered circle tying a data point to its comment panel entry
fn draw_comment_marker(b: &mut SvgBuilder, frame: &ChartFrame, index: usize, at: Point) {
    let Some(number) = frame.marker(index) else {
        return;
    };
    let fill = frame.color("comment-marker");
    let text = frame.color("background");
    b.add_circle("comment-marker", at.x, at.y, MARKER_RADIUS, &Paint::solid(fill));
    b.add_text(
        "comment-marker-label",
        &number.to_string(),
        Point::new(at.x, at.y + 3.0),
        TextAnchor::Middle,
        9.0,
        &text,
    );
}

/// Horizontal zero line across the chart
fn draw_baseline(b: &mut SvgBuilder, frame: &ChartFrame, y: f64) {
    let paint = Paint::stroke(frame.color("axis"), 1.0);
    b.add_line("baseline", Point::new(0.0, y), Point::new(frame.width, y), &paint);
}

/// Vertical zero line down the chart (horizontal chart types)
fn draw_axis_line(b: &mut SvgBuilder, frame: &ChartFrame, x: f64) {
    let paint = Paint::stroke(frame.color("axis"), 1.0);
    b.add_line("baseline", Point::new(x, 0.0), Point::new(x, frame.height), &paint);
}

fn categories(points: &[DataPoint]) -> Vec<String> {
    points.iter().map(|p| p.category.clone()).collect()
}

fn draw_category_labels_below(
    b: &mut SvgBuilder,
    frame: &ChartFrame,
    band: &BandScale,
    labels: &[String],
) {
    let axis = &frame.category_axis;
    if !axis.show {
        return;
    }
    let fill = frame.color("text");
    for (i, label) in labels.iter().enumerate() {
        let text = fit_label(label, axis.max_width, axis.font_size);
        if axis.is_rotated() {
            let at = Point::new(band.center(i), frame.height + LABEL_GAP + axis.font_size / 2.0);
            let anchor = if axis.rotation < 0.0 {
                TextAnchor::End
            } else {
                TextAnchor::Start
            };
            b.add_rotated_text(
                "category-label",
                &text,
                at,
                anchor,
                axis.font_size,
                &fill,
                axis.rotation,
            );
        } else {
            let at = Point::new(band.center(i), frame.height + LABEL_GAP + axis.font_size);
            b.add_text("category-label", &text, at, TextAnchor::Middle, axis.font_size, &fill);
        }
    }
}

fn draw_category_labels_left(
    b: &mut SvgBuilder,
    frame: &ChartFrame,
    band: &BandScale,
    labels: &[String],
) {
    let axis = &frame.category_axis;
    if !axis.show {
        return;
    }
    let fill = frame.color("text");
    for (i, label) in labels.iter().enumerate() {
        let text = fit_label(label, axis.max_width, axis.font_size);
        let at = Point::new(-LABEL_GAP - 2.0, band.center(i) + axis.font_size / 3.0);
        b.add_text("category-label", &text, at, TextAnchor::End, axis.font_size, &fill);
    }
}

/// Truncate a label to roughly `max_width` pixels, ending it with an ellipsis
pub(crate) fn fit_label(label: &str, max_width: f64, font_size: f64) -> String {
    let max_chars = ((max_width / (font_size * 0.6)).floor() as usize).max(1);
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut fitted: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    fitted.push('…');
    fitted
}
