//! SVG backend: serializes a [`Scene`] into a standalone document.

use std::fmt::Write as _;
use std::io;

use plotline_core::{
    BoxStyle, Color, CornerRadius, DrawCommand, LineCap, LineJoin, Point, Rect, Scene, Size,
    StrokeStyle, TextAnchor, TextStyle,
};

use crate::responsive::{FitMode, ResponsiveContainer};

/// Writes scenes as SVG.
///
/// The `viewBox` is always the scene's logical viewport; `width`/`height`
/// are the display size, so the browser does the scaling.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgWriter {
    size: Option<Size>,
    fit: FitMode,
    title: Option<String>,
}

impl SvgWriter {
    /// Writer that displays the scene at its logical size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer sized by a container resolved inside `parent`.
    #[must_use]
    pub fn for_container(container: &ResponsiveContainer, parent: Size) -> Self {
        Self {
            size: Some(container.resolve(parent)),
            fit: container.fit,
            title: None,
        }
    }

    /// Set the display size.
    #[must_use]
    pub const fn size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the fit mode.
    #[must_use]
    pub const fn fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    /// Set an accessible title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Serialize a scene.
    #[must_use]
    pub fn write(&self, scene: &Scene) -> String {
        let viewport = scene.viewport();
        let display = self.size.unwrap_or(viewport);
        let preserve = self.fit.preserve_aspect_ratio();

        let mut out = String::new();
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}" preserveAspectRatio="{preserve}" role="img">"#,
            num(display.width),
            num(display.height),
            num(viewport.width),
            num(viewport.height),
        );
        if let Some(title) = &self.title {
            let _ = writeln!(out, "  <title>{}</title>", escape(title));
        }
        if !scene.series_names().is_empty() {
            let _ = writeln!(out, "  <desc>{}</desc>", escape(&scene.series_names().join(", ")));
        }

        for command in scene.commands() {
            out.push_str("  ");
            write_command(&mut out, command);
            out.push('\n');
        }

        out.push_str("</svg>\n");
        out
    }

    /// Serialize a scene into a writer.
    pub fn write_to<W: io::Write>(&self, scene: &Scene, writer: &mut W) -> io::Result<()> {
        writer.write_all(self.write(scene).as_bytes())
    }
}

fn write_command(out: &mut String, command: &DrawCommand) {
    match command {
        DrawCommand::Path { points, style } => {
            let _ = write!(out, r#"<polyline points="{}" fill="none""#, points_attr(points));
            stroke_attrs(out, style);
            out.push_str("/>");
        }
        DrawCommand::Polygon { points, fill } => {
            let _ = write!(out, r#"<polygon points="{}""#, points_attr(points));
            paint_attr(out, "fill", *fill);
            out.push_str("/>");
        }
        DrawCommand::Rect {
            bounds,
            radius,
            style,
        } => write_rect(out, *bounds, *radius, style),
        DrawCommand::Circle {
            center,
            radius,
            style,
        } => {
            let _ = write!(
                out,
                r#"<circle cx="{}" cy="{}" r="{}""#,
                num(center.x),
                num(center.y),
                num(*radius)
            );
            box_attrs(out, style);
            out.push_str("/>");
        }
        DrawCommand::Text {
            content,
            position,
            style,
        } => write_text(out, content, *position, style),
    }
}

fn write_rect(out: &mut String, bounds: Rect, radius: CornerRadius, style: &BoxStyle) {
    if radius.is_zero() || radius.is_uniform() {
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            num(bounds.x),
            num(bounds.y),
            num(bounds.width),
            num(bounds.height)
        );
        if !radius.is_zero() {
            let _ = write!(out, r#" rx="{}""#, num(radius.top_left));
        }
    } else {
        let _ = write!(out, r#"<path d="{}""#, rounded_rect_path(bounds, radius));
    }
    box_attrs(out, style);
    out.push_str("/>");
}

/// Outline of a rectangle with independent corner radii.
fn rounded_rect_path(b: Rect, r: CornerRadius) -> String {
    let (x, y, right, bottom) = (b.x, b.y, b.right(), b.bottom());
    let mut d = String::new();
    let _ = write!(d, "M{},{} H{}", num(x + r.top_left), num(y), num(right - r.top_right));
    arc(&mut d, r.top_right, right, y + r.top_right);
    let _ = write!(d, " V{}", num(bottom - r.bottom_right));
    arc(&mut d, r.bottom_right, right - r.bottom_right, bottom);
    let _ = write!(d, " H{}", num(x + r.bottom_left));
    arc(&mut d, r.bottom_left, x, bottom - r.bottom_left);
    let _ = write!(d, " V{}", num(y + r.top_left));
    arc(&mut d, r.top_left, x + r.top_left, y);
    d.push_str(" Z");
    d
}

fn arc(d: &mut String, radius: f32, x: f32, y: f32) {
    if radius > 0.0 {
        let r = num(radius);
        let _ = write!(d, " A{r},{r} 0 0 1 {},{}", num(x), num(y));
    }
}

fn write_text(out: &mut String, content: &str, position: Point, style: &TextStyle) {
    let anchor = match style.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
        TextAnchor::End => "end",
    };
    let _ = write!(
        out,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{anchor}""#,
        num(position.x),
        num(position.y),
        num(style.size)
    );
    paint_attr(out, "fill", style.color);
    let _ = write!(out, ">{}</text>", escape(content));
}

fn box_attrs(out: &mut String, style: &BoxStyle) {
    match style.fill {
        Some(fill) => paint_attr(out, "fill", fill),
        None => out.push_str(r#" fill="none""#),
    }
}

fn stroke_attrs(out: &mut String, style: &StrokeStyle) {
    paint_attr(out, "stroke", style.color);
    let _ = write!(out, r#" stroke-width="{}""#, num(style.width));
    match style.cap {
        LineCap::Butt => {}
        LineCap::Round => out.push_str(r#" stroke-linecap="round""#),
    }
    match style.join {
        LineJoin::Miter => {}
        LineJoin::Round => out.push_str(r#" stroke-linejoin="round""#),
    }
    if style.is_dashed() {
        let dash: Vec<String> = style.dash.iter().map(|d| num(*d)).collect();
        let _ = write!(out, r#" stroke-dasharray="{}""#, dash.join(" "));
    }
}

/// `fill`/`stroke` colour plus its opacity when not opaque.
fn paint_attr(out: &mut String, attr: &str, color: Color) {
    let _ = write!(out, r#" {attr}="{}""#, color.to_hex());
    if color.a < 1.0 {
        let _ = write!(out, r#" {attr}-opacity="{}""#, num(color.a));
    }
}

fn points_attr(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", num(p.x), num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// At most two decimals, trailing zeros trimmed.
fn num(value: f32) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let text = format!("{value:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    match text {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::responsive::Dimension;
    use plotline_core::Canvas;

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(Size::new(960.0, 320.0));
        scene.draw_line(
            Point::new(56.0, 268.0),
            Point::new(940.0, 268.0),
            StrokeStyle::solid(Color::BLACK, 1.0).dashed(&[4.0, 4.0]),
        );
        scene.fill_rect(
            Rect::new(100.0, 200.0, 20.0, 68.0),
            CornerRadius::top(4.0),
            Color::WHITE,
        );
        scene.fill_polygon(&[Point::ORIGIN, Point::new(1.0, 1.0)], Color::BLACK.with_alpha(0.2));
        scene.draw_text("<a & b>", Point::new(10.0, 20.0), &TextStyle::default());
        scene
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(56.0), "56");
        assert_eq!(num(33.333_33), "33.33");
        assert_eq!(num(0.5), "0.5");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(f32::NAN), "0");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
    }

    #[test]
    fn test_svg_header_uses_viewport() {
        let svg = SvgWriter::new().write(&sample_scene());
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"viewBox="0 0 960 320""#));
        assert!(svg.contains(r#"width="960" height="320""#));
        assert!(svg.contains(r#"preserveAspectRatio="none""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_container_sizing() {
        let container = ResponsiveContainer::new(Dimension::Percent(50.0), Dimension::Pixels(200.0))
            .fit(FitMode::Contain);
        let svg = SvgWriter::for_container(&container, Size::new(1000.0, 800.0))
            .write(&sample_scene());
        assert!(svg.contains(r#"width="500" height="200""#));
        assert!(svg.contains(r#"viewBox="0 0 960 320""#));
        assert!(svg.contains(r#"preserveAspectRatio="xMidYMid meet""#));
    }

    #[test]
    fn test_svg_elements() {
        let svg = SvgWriter::new().title("Requests").write(&sample_scene());
        assert!(svg.contains("<title>Requests</title>"));
        assert!(svg.contains(r##"<polyline points="56,268 940,268" fill="none" stroke="#000000""##));
        assert!(svg.contains(r#"stroke-dasharray="4 4""#));
        assert!(svg.contains(r#"<path d="M104,200 H116 A4,4 0 0 1 120,204 V268 H100 V204 A4,4 0 0 1 104,200 Z""#));
        assert!(svg.contains(r##"fill="#000000" fill-opacity="0.2""##));
        assert!(svg.contains(">&lt;a &amp; b&gt;</text>"));
    }

    #[test]
    fn test_svg_uniform_radius_uses_rx() {
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        scene.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), CornerRadius::uniform(1.0), Color::BLACK);
        scene.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), CornerRadius::ZERO, Color::BLACK);
        let svg = SvgWriter::new().write(&scene);
        assert!(svg.contains(r##"<rect x="0" y="0" width="4" height="4" rx="1" fill="#000000"/>"##));
        assert!(svg.contains(r##"<rect x="0" y="0" width="4" height="4" fill="#000000"/>"##));
    }

    #[test]
    fn test_svg_describes_series() {
        let mut scene = sample_scene();
        assert!(!SvgWriter::new().write(&scene).contains("<desc>"));
        scene.set_series_names(["Prompt", "Completion & cache"]);
        let svg = SvgWriter::new().title("Tokens").write(&scene);
        assert!(svg.contains("<title>Tokens</title>\n  <desc>Prompt, Completion &amp; cache</desc>"));
    }

    #[test]
    fn test_write_to_matches_write() {
        let scene = sample_scene();
        let writer = SvgWriter::new();
        let mut buf = Vec::new();
        writer.write_to(&scene, &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), writer.write(&scene));
    }
}
