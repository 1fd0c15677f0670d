//! Gantt charts with dependency connectors that route around the bars in
//! between, rendered to SVG.
//!
//! ```
//! let svg = ganttline::gantt(
//!     "task A from 2024-11-01 to 2024-11-05\n\
//!      task B from 2024-11-08 to 2024-11-12\n\
//!      A -> B\n",
//! )
//! .unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

pub mod ast;
pub mod chart;
pub mod errors;
pub mod log;
pub mod parse;
pub mod render;
pub mod route;
pub mod types;

use pest_derive::Parser;

pub use chart::{Chart, Task};
pub use errors::{BuildError, ChartError, ConfigError, ParseError, SourceContext};
pub use render::{Canvas, RenderOptions, SvgCanvas, render_svg};
pub use route::{Arrowhead, Bar, Path, Route, RouteConfig, route};

#[derive(Parser)]
#[grammar = "gantt.pest"]
pub struct GanttParser;

/// Render chart source to SVG.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn gantt(source: &str) -> Result<String, miette::Report> {
    gantt_named("<input>", source)
}

/// Like [`gantt`], naming the source in diagnostics.
pub fn gantt_named(name: &str, source: &str) -> Result<String, miette::Report> {
    gantt_with_options(name, source, &RenderOptions::default())
}

/// Render chart source with explicit SVG options.
pub fn gantt_with_options(
    name: &str,
    source: &str,
    options: &RenderOptions,
) -> Result<String, miette::Report> {
    let program = parse::parse_named(name, source)?;
    let ctx = SourceContext::new(name, source);
    let chart = Chart::from_program(&program, &ctx)?;
    render_svg(&chart, options)
}
