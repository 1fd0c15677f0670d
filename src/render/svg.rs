//! SVG generation

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Path as SvgPath, PathData, Style as CssStyle, Svg, SvgNode, SvgStyle, facet_xml};
use glam::{DVec2, dvec2};

use super::defaults;
use super::{Canvas, RenderOptions, Style};
use crate::route::{Arrowhead, Path, PathOp};
use crate::types::{BBox, Scaler};

/// Light and dark variants of every colour the chart uses.
const PALETTE: [(&str, &str, &str); 8] = [
    ("skyblue", "rgb(135,206,235)", "rgb(70,130,180)"),
    ("lightgreen", "rgb(144,238,144)", "rgb(60,140,60)"),
    ("yellow", "rgb(255,255,0)", "rgb(200,200,60)"),
    ("red", "rgb(255,0,0)", "rgb(255,100,100)"),
    ("orange", "rgb(255,165,0)", "rgb(255,200,100)"),
    ("darkblue", "rgb(0,0,139)", "rgb(140,160,255)"),
    ("black", "rgb(0,0,0)", "rgb(255,255,255)"),
    ("gray", "rgb(128,128,128)", "rgb(160,160,160)"),
];

/// Convert a color to either CSS variable reference or its name
pub fn color_to_string(color: &str, use_css_vars: bool) -> String {
    if use_css_vars && PALETTE.iter().any(|(name, _, _)| *name == color) {
        format!("var(--gantt-{})", color)
    } else {
        color.to_string()
    }
}

/// Generate CSS color definitions for light-dark mode
fn generate_color_css() -> CssStyle {
    let mut css = String::from(":root {\n");
    for (name, light, dark) in &PALETTE {
        css.push_str(&format!(
            "  --gantt-{}: light-dark({}, {});\n",
            name, light, dark
        ));
    }
    css.push_str("}\n");

    CssStyle {
        type_: Some("text/css".to_string()),
        content: css,
    }
}

/// Rounded box between two pixel corners, `top_left` having the smaller y.
///
/// Radii are per axis since days and rows scale differently.
pub fn rounded_box_data(top_left: DVec2, bottom_right: DVec2, rx: f64, ry: f64) -> PathData {
    let (x1, y1, x2, y2) = (top_left.x, top_left.y, bottom_right.x, bottom_right.y);
    if rx <= 0.0 || ry <= 0.0 {
        return PathData::new()
            .m(x1, y1)
            .l(x2, y1)
            .l(x2, y2)
            .l(x1, y2)
            .z();
    }
    PathData::new()
        .m(x1 + rx, y2)
        .l(x2 - rx, y2)
        .a(rx, ry, 0.0, false, false, x2, y2 - ry)
        .l(x2, y1 + ry)
        .a(rx, ry, 0.0, false, false, x2 - rx, y1)
        .l(x1 + rx, y1)
        .a(rx, ry, 0.0, false, false, x1, y1 + ry)
        .l(x1, y2 - ry)
        .a(rx, ry, 0.0, false, false, x1 + rx, y2)
        .z()
}

/// A [`Canvas`] that collects SVG nodes for one view.
pub struct SvgCanvas {
    view: BBox,
    scaler: Scaler,
    margin: f64,
    css_variables: bool,
    children: Vec<SvgNode>,
}

impl SvgCanvas {
    /// Start a document showing `view` (chart units).
    pub fn new(view: BBox, options: &RenderOptions) -> Self {
        crate::log::debug!(
            min_x = view.min.x,
            min_y = view.min.y,
            max_x = view.max.x,
            max_y = view.max.y,
            "svg view"
        );
        Self {
            view,
            scaler: options.scaler,
            margin: options.margin,
            css_variables: options.css_variables,
            children: Vec::new(),
        }
    }

    /// The area of the chart this canvas shows.
    pub fn view(&self) -> BBox {
        self.view
    }

    pub fn element_count(&self) -> usize {
        self.children.len()
    }

    /// Chart point to pixel position, y flipped.
    pub fn to_px(&self, p: DVec2) -> DVec2 {
        self.scaler.to_svg(p, &self.view) + DVec2::splat(self.margin)
    }

    fn svg_style(&self, style: &Style) -> SvgStyle {
        let fill = style
            .fill
            .map_or_else(|| "none".to_string(), |c| color_to_string(c, self.css_variables));
        let mut svg_style = SvgStyle::new().add("fill", &fill);
        if let Some(stroke) = style.stroke {
            svg_style = svg_style
                .add("stroke", &color_to_string(stroke, self.css_variables))
                .add("stroke-width", &fmt_num(style.stroke_width));
        }
        if style.opacity != 1.0 {
            svg_style = svg_style.add("opacity", &fmt_num(style.opacity));
        }
        svg_style
    }

    fn push_path(&mut self, d: PathData, style: SvgStyle) {
        self.children.push(SvgNode::Path(SvgPath {
            d: Some(d),
            fill: None,
            stroke: None,
            stroke_width: None,
            stroke_dasharray: None,
            style,
        }));
    }

    /// Tail, tip and the two barb ends of an arrowhead, in pixels.
    pub fn arrowhead_points(&self, head: &Arrowhead) -> [DVec2; 4] {
        let tip = self.to_px(head.tip);
        let tail = self.to_px(head.tail);
        let dir = dvec2(
            head.direction.x * self.scaler.px_per_day,
            -head.direction.y * self.scaler.px_per_row,
        )
        .try_normalize()
        .unwrap_or(dvec2(1.0, 0.0));
        let perp = dvec2(-dir.y, dir.x);
        let base = tip - dir * head.scale * defaults::HEAD_LENGTH;
        let half = head.scale * defaults::HEAD_HALF_WIDTH;
        [tail, tip, base + perp * half, base - perp * half]
    }

    /// Assemble the document and serialize it.
    pub fn finish(self) -> Result<String, miette::Report> {
        let width = self.scaler.dx(self.view.width()) + 2.0 * self.margin;
        let height = self.scaler.dy(self.view.height()) + 2.0 * self.margin;

        let mut children = Vec::with_capacity(self.children.len() + 1);
        if self.css_variables {
            children.push(SvgNode::Style(generate_color_css()));
        }
        children.extend(self.children);

        let svg = Svg {
            width: Some(fmt_num(width)),
            height: Some(fmt_num(height)),
            view_box: Some(format!("0 0 {} {}", fmt_num(width), fmt_num(height))),
            children,
        };

        fn format_float(value: f64, writer: &mut dyn std::io::Write) -> Result<(), std::io::Error> {
            write!(writer, "{}", fmt_num(value))
        }

        let options = SerializeOptions {
            float_formatter: Some(format_float),
            ..Default::default()
        };
        facet_xml::to_string_with_options(&svg, &options)
            .map_err(|e| miette::miette!("XML serialization error: {}", e))
    }
}

impl Canvas for SvgCanvas {
    fn rounded_rect(&mut self, min: DVec2, size: DVec2, radius: f64, style: &Style) {
        // SVG's origin is the top-left corner.
        let top_left = self.to_px(dvec2(min.x, min.y + size.y));
        let bottom_right = self.to_px(dvec2(min.x + size.x, min.y));
        let d = rounded_box_data(
            top_left,
            bottom_right,
            self.scaler.dx(radius),
            self.scaler.dy(radius),
        );
        let style = self.svg_style(style);
        self.push_path(d, style);
    }

    fn path(&mut self, path: &Path, style: &Style) {
        let d = self.path_data(path);
        let style = self.svg_style(style);
        self.push_path(d, style);
    }

    fn arrowhead(&mut self, head: &Arrowhead, style: &Style) {
        let [tail, tip, a, b] = self.arrowhead_points(head);
        let d = PathData::new()
            .m(tail.x, tail.y)
            .l(tip.x, tip.y)
            .m(a.x, a.y)
            .l(tip.x, tip.y)
            .l(b.x, b.y);
        let style = self.svg_style(&Style { fill: None, ..*style });
        self.push_path(d, style);
    }
}

impl SvgCanvas {
    /// SVG path data for a chart path, in pixels.
    pub fn path_data(&self, path: &Path) -> PathData {
        path.ops().iter().fold(PathData::new(), |d, op| match *op {
            PathOp::MoveTo(p) => {
                let p = self.to_px(p);
                d.m(p.x, p.y)
            }
            PathOp::LineTo(p) => {
                let p = self.to_px(p);
                d.l(p.x, p.y)
            }
            PathOp::CubicTo { ctrl1, ctrl2, to } => {
                let (c1, c2, to) = (self.to_px(ctrl1), self.to_px(ctrl2), self.to_px(to));
                d.c(c1.x, c1.y, c2.x, c2.y, to.x, to.y)
            }
        })
    }
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Round to specified significant figures
    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    // Format with enough decimal places, then trim
    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    if !s.contains('.') {
        return s;
    }
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}
