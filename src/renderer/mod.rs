//! SVG renderer for variance charts
//!
//! Takes data points, settings and a viewport and produces an SVG string whose
//! regions come from the layout engine. Element classes carry a configurable
//! prefix so charts can be styled from outside.

pub mod charts;
pub mod config;
pub mod peripherals;
pub mod scale;
pub mod svg;

pub use charts::{chart_domain, draw_chart, ChartFrame};
pub use config::SvgConfig;
pub use svg::{render_svg, Paint, RenderContext, SvgBuilder, TextAnchor};
