//! SVG generation for variance charts

use crate::data::{self, DataPoint, RowGroup};
use crate::layout::{
    carve_peripherals, comment_box_position, compute_cell_layout, compute_grid, compute_layout,
    constants, legend_position, CategoryAxisConfig, CommentBoxPosition, LayoutConfig, Point,
};
use crate::settings::Settings;
use crate::stylesheet::Stylesheet;

use super::charts::{self, ChartFrame};
use super::peripherals::{self, CommentEntry};
use super::scale::merge_domains;
use super::SvgConfig;

/// Horizontal alignment of a text element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Fill and stroke attributes of a shape
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paint {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
    pub stroke_dasharray: Option<String>,
    pub opacity: Option<f64>,
}

impl Paint {
    /// Solid fill, no stroke
    pub fn solid(color: impl Into<String>) -> Self {
        Self {
            fill: Some(color.into()),
            ..Self::default()
        }
    }

    /// Stroke only
    pub fn stroke(color: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some("none".to_string()),
            stroke: Some(color.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    /// Filled shape with an outline
    pub fn outlined(fill: impl Into<String>, stroke: impl Into<String>, width: f64) -> Self {
        Self {
            fill: Some(fill.into()),
            stroke: Some(stroke.into()),
            stroke_width: Some(width),
            ..Self::default()
        }
    }

    pub fn dashed(mut self, pattern: impl Into<String>) -> Self {
        self.stroke_dasharray = Some(pattern.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    defs: Vec<String>,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            defs: vec![],
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add the text font rule for labels
    pub fn add_font_style(&mut self) {
        let prefix = self.prefix();
        self.styles.push(format!(
            ".{prefix}chart text {{ font-family: {}; }}",
            self.config.font_family
        ));
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add the diagonal hatch used for forecast fills; returns a `url(#..)` fill
    pub fn add_hatch_pattern(&mut self, color: &str) -> String {
        let id = self.class("hatch");
        if !self.defs.iter().any(|d| d.contains(&format!(r#"id="{id}""#))) {
            self.defs.push(format!(
                r#"<pattern id="{id}" patternUnits="userSpaceOnUse" width="4" height="4" patternTransform="rotate(45)">
      <rect width="4" height="4" fill="white"/>
      <line x1="0" y1="0" x2="0" y2="4" stroke="{color}" stroke-width="2"/>
    </pattern>"#
            ));
        }
        format!("url(#{id})")
    }

    /// Add a rectangle; negative extents are flipped so the rect stays valid
    pub fn add_rect(&mut self, class: &str, x: f64, y: f64, w: f64, h: f64, paint: &Paint) {
        let (x, w) = if w < 0.0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0.0 { (y + h, -h) } else { (y, h) };
        self.elements.push(format!(
            r#"{}<rect class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            self.class(class),
            num(x),
            num(y),
            num(w),
            num(h),
            format_paint(paint)
        ));
    }

    /// Add a circle element
    pub fn add_circle(&mut self, class: &str, cx: f64, cy: f64, r: f64, paint: &Paint) {
        self.elements.push(format!(
            r#"{}<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            self.class(class),
            num(cx),
            num(cy),
            num(r),
            format_paint(paint)
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, class: &str, from: Point, to: Point, paint: &Paint) {
        self.elements.push(format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            self.class(class),
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            format_paint(paint)
        ));
    }

    /// Add an open path through `points`
    pub fn add_path(&mut self, class: &str, points: &[Point], paint: &Paint) {
        if points.is_empty() {
            return;
        }
        self.elements.push(format!(
            r#"{}<path class="{}" d="{}"{}/>"#,
            self.indent_str(),
            self.class(class),
            path_to_d(points),
            format_paint(paint)
        ));
    }

    /// Add a closed polygon
    pub fn add_polygon(&mut self, class: &str, points: &[Point], paint: &Paint) {
        let points_str: String = points
            .iter()
            .map(|p| format!("{},{}", num(p.x), num(p.y)))
            .collect::<Vec<_>>()
            .join(" ");
        self.elements.push(format!(
            r#"{}<polygon class="{}" points="{}"{}/>"#,
            self.indent_str(),
            self.class(class),
            points_str,
            format_paint(paint)
        ));
    }

    /// Add a text element
    pub fn add_text(
        &mut self,
        class: &str,
        text: &str,
        at: Point,
        anchor: TextAnchor,
        font_size: f64,
        fill: &str,
    ) {
        self.push_text(class, text, at, anchor, font_size, fill, "");
    }

    /// Add a text element rotated by `degrees` around its anchor point
    #[allow(clippy::too_many_arguments)]
    pub fn add_rotated_text(
        &mut self,
        class: &str,
        text: &str,
        at: Point,
        anchor: TextAnchor,
        font_size: f64,
        fill: &str,
        degrees: f64,
    ) {
        let transform = format!(
            r#" transform="rotate({} {} {})""#,
            num(degrees),
            num(at.x),
            num(at.y)
        );
        self.push_text(class, text, at, anchor, font_size, fill, &transform);
    }

    #[allow(clippy::too_many_arguments)]
    fn push_text(
        &mut self,
        class: &str,
        text: &str,
        at: Point,
        anchor: TextAnchor,
        font_size: f64,
        fill: &str,
        extra: &str,
    ) {
        self.elements.push(format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}" font-size="{}" fill="{}"{}>{}</text>"#,
            self.indent_str(),
            self.class(class),
            num(at.x),
            num(at.y),
            anchor.as_str(),
            num(font_size),
            fill,
            extra,
            escape_xml(text)
        ));
    }

    /// Open a group, optionally translated to `origin`
    pub fn start_group(&mut self, class: &str, origin: Option<Point>) {
        let transform = origin
            .map(|p| format!(r#" transform="translate({},{})""#, num(p.x), num(p.y)))
            .unwrap_or_default();
        self.elements.push(format!(
            r#"{}<g class="{}"{}>"#,
            self.indent_str(),
            self.class(class),
            transform
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a `width` x `height` viewport
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();
        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" class="{}">"#,
            self.class("chart"),
            w = num(width),
            h = num(height),
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        if !self.defs.is_empty() {
            svg.push_str("  <defs>");
            svg.push_str(nl);
            for def in &self.defs {
                svg.push_str("    ");
                svg.push_str(def);
                svg.push_str(nl);
            }
            svg.push_str("  </defs>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Everything the renderer needs besides the data and viewport
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub settings: &'a Settings,
    pub svg: &'a SvgConfig,
    pub stylesheet: &'a Stylesheet,
    /// Outline every layout region
    pub debug: bool,
}

/// Render data points into a `width` x `height` SVG document
///
/// Draws a single chart, or one chart per group when small multiples are
/// enabled. Every call starts from an empty document.
pub fn render_svg(points: &[DataPoint], width: f64, height: f64, ctx: &RenderContext) -> String {
    let mut builder = SvgBuilder::new(ctx.svg.clone());
    builder.add_font_style();
    builder.add_rect(
        "background",
        0.0,
        0.0,
        width.max(0.0),
        height.max(0.0),
        &Paint::solid(ctx.stylesheet.resolve_or_default("background")),
    );

    let config = ctx
        .settings
        .layout_config(width, height, data::has_comments(points));
    let comments = peripherals::numbered_comments(points);

    match ctx.settings.small_multiples {
        Some(_) => {
            render_small_multiples(&mut builder, points, width, height, &config, &comments, ctx)
        }
        None => render_single(&mut builder, points, width, height, &config, &comments, ctx),
    }

    builder.build(width, height)
}

fn render_single(
    builder: &mut SvgBuilder,
    points: &[DataPoint],
    width: f64,
    height: f64,
    config: &LayoutConfig,
    comments: &[CommentEntry],
    ctx: &RenderContext,
) {
    let result = compute_layout(width, height, config);
    let settings = ctx.settings;

    if let (Some(area), Some(text)) = (result.layout.title_area, settings.title.as_deref()) {
        peripherals::draw_title(builder, area, text, ctx.stylesheet);
    }

    builder.start_group("plot", Some(Point::new(result.margin.left, result.margin.top)));
    if result.is_drawable() {
        let frame = ChartFrame::new(points, result.width, result.height, config, ctx)
            .with_comment_markers(peripherals::marker_numbers(0..points.len(), comments));
        charts::draw_chart(builder, &frame);
    } else {
        tracing::warn!(
            width = result.width,
            height = result.height,
            "chart area too small, skipping chart"
        );
    }

    if result.layout.legend_area.is_some() {
        let items = peripherals::legend_items(builder, settings, ctx.stylesheet);
        let origin = legend_position(
            &result,
            config.legend_position,
            result.layout.comment_box_area.is_some(),
            items.len(),
        );
        peripherals::draw_legend(builder, origin, config.legend_position, &items, ctx);
    }

    if let Some(position) = comment_box_position(&result) {
        peripherals::draw_comment_box(builder, position, comments, ctx);
    }
    builder.end_group();

    if ctx.debug {
        let drawable = Some(result.drawable_rect());
        peripherals::draw_debug_regions(builder, &result.layout, drawable, ctx.stylesheet);
    }
}

fn render_small_multiples(
    builder: &mut SvgBuilder,
    points: &[DataPoint],
    width: f64,
    height: f64,
    config: &LayoutConfig,
    comments: &[CommentEntry],
    ctx: &RenderContext,
) {
    let settings = ctx.settings;
    let grid_config = settings.small_multiples.unwrap_or_default();

    // Rows without a group value share one unnamed cell
    let groups: Vec<(RowGroup, Vec<DataPoint>)> = data::group_rows(points)
        .into_iter()
        .map(|group| {
            let rows = group.points(points);
            (group, rows)
        })
        .collect();

    let layout = carve_peripherals(width, height, config);
    let viewport = layout.chart_area;
    let grid = compute_grid(viewport.width, viewport.height, groups.len(), &grid_config);
    tracing::info!(
        groups = groups.len(),
        cols = grid.cols,
        rows = grid.rows,
        "rendering small multiples"
    );

    if let (Some(area), Some(text)) = (layout.title_area, settings.title.as_deref()) {
        peripherals::draw_title(builder, area, text, ctx.stylesheet);
    }

    let shared_domain = if grid_config.shared_scale {
        groups
            .iter()
            .map(|(_, rows)| {
                charts::chart_domain(
                    settings.chart_type,
                    rows,
                    settings.comparison,
                    settings.invert_variance,
                )
            })
            .reduce(merge_domains)
    } else {
        None
    };

    // Cells keep their own label settings but still hide them when the
    // viewport hid them
    let cell_config = LayoutConfig {
        category_axis: CategoryAxisConfig {
            show: grid_config.category_axis.show && config.category_axis.show,
            ..grid_config.category_axis
        },
        ..*config
    };

    for (index, (group, rows)) in groups.iter().enumerate() {
        let cell = compute_cell_layout(&grid, index, &grid_config);
        builder.start_group(
            "cell",
            Some(Point::new(viewport.x + cell.x, viewport.y + cell.y)),
        );
        if grid_config.show_headers {
            if let Some(name) = group.name.as_deref() {
                peripherals::draw_cell_header(builder, name, grid.cell_width, ctx.stylesheet);
            }
        }
        builder.start_group(
            "plot",
            Some(Point::new(cell.margin.left, cell.header_height + cell.margin.top)),
        );
        if cell.is_drawable() {
            let markers = peripherals::marker_numbers(group.rows.iter().copied(), comments);
            let mut frame =
                ChartFrame::new(rows, cell.chart_width, cell.chart_height, &cell_config, ctx)
                    .with_comment_markers(markers);
            if let Some(domain) = shared_domain {
                frame = frame.with_value_domain(domain);
            }
            charts::draw_chart(builder, &frame);
        } else {
            tracing::warn!(group = ?group.name, "cell too small, skipping chart");
        }
        builder.end_group();
        builder.end_group();
    }

    if let Some(area) = layout.legend_area {
        let items = peripherals::legend_items(builder, settings, ctx.stylesheet);
        let origin = peripherals::legend_origin_in_area(area, config.legend_position, items.len());
        peripherals::draw_legend(builder, origin, config.legend_position, &items, ctx);
    }

    if let Some(area) = layout.comment_box_area {
        let position = CommentBoxPosition {
            x: area.x + constants::PANEL_GAP,
            y: area.y,
            box_width: constants::COMMENT_BOX_MIN_WIDTH
                .max(area.width - constants::COMMENT_BOX_PADDING),
            box_height: area.height,
        };
        peripherals::draw_comment_box(builder, position, comments, ctx);
    }

    if ctx.debug {
        peripherals::draw_debug_regions(builder, &layout, None, ctx.stylesheet);
    }
}

/// Format a coordinate with at most two decimals
pub(crate) fn num(value: f64) -> String {
    let s = format!("{:.2}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Format Paint as SVG attribute string
fn format_paint(paint: &Paint) -> String {
    let mut parts = vec![];
    if let Some(fill) = &paint.fill {
        parts.push(format!(r#" fill="{}""#, fill));
    }
    if let Some(stroke) = &paint.stroke {
        parts.push(format!(r#" stroke="{}""#, stroke));
    }
    if let Some(sw) = paint.stroke_width {
        parts.push(format!(r#" stroke-width="{}""#, num(sw)));
    }
    if let Some(dash) = &paint.stroke_dasharray {
        parts.push(format!(r#" stroke-dasharray="{}""#, dash));
    }
    if let Some(op) = paint.opacity {
        if op < 1.0 {
            parts.push(format!(r#" opacity="{}""#, num(op)));
        }
    }
    parts.join("")
}

/// Convert a path of points to an SVG path d attribute
fn path_to_d(path: &[Point]) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut d = format!("M{} {}", num(path[0].x), num(path[0].y));
    for point in &path[1..] {
        d.push_str(&format!(" L{} {}", num(point.x), num(point.y)));
    }
    d
}

/// Escape special XML characters
pub(crate) fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
