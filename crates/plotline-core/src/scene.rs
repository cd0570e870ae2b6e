//! The `Canvas` painting trait and the `Scene` that records into it.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle, TextStyle};
use crate::{Color, CornerRadius, Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Painting surface used by chart renderers.
///
/// Renderers only ever talk to this trait, so the same chart can be recorded
/// into a [`Scene`] or streamed straight into another backend.
pub trait Canvas {
    /// Draw a filled rectangle with per-corner radii.
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, style: StrokeStyle);

    /// Draw an open polyline.
    fn draw_path(&mut self, points: &[Point], style: StrokeStyle);

    /// Fill a polygon.
    fn fill_polygon(&mut self, points: &[Point], color: Color);

    /// Draw a filled circle.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Color);

    /// Draw text.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);
}

/// Ordered draw commands in a fixed logical viewport.
///
/// A `Scene` is what every chart renderer produces. It is plain data: two
/// renders of the same inputs compare equal and serialize identically.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    viewport: Size,
    commands: Vec<DrawCommand>,
    /// Display names of the drawn series, in drawing order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    series_names: Vec<String>,
}

impl Scene {
    /// Create an empty scene for a logical viewport.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            commands: Vec::new(),
            series_names: Vec::new(),
        }
    }

    /// Logical size the commands are expressed in.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Get the recorded draw commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Get the number of recorded commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of commands of one kind (see [`DrawCommand::kind`]).
    #[must_use]
    pub fn count_of(&self, kind: &str) -> usize {
        self.commands.iter().filter(|c| c.kind() == kind).count()
    }

    /// Text content of every text command, in drawing order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Names of the series the commands draw.
    #[must_use]
    pub fn series_names(&self) -> &[String] {
        &self.series_names
    }

    /// Record the names of the drawn series.
    pub fn set_series_names(&mut self, names: impl IntoIterator<Item = impl Into<String>>) {
        self.series_names = names.into_iter().map(Into::into).collect();
    }

    /// Add a raw draw command.
    pub fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl Canvas for Scene {
    fn fill_rect(&mut self, rect: Rect, radius: CornerRadius, color: Color) {
        self.commands.push(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: BoxStyle::fill(color),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, style: StrokeStyle) {
        self.commands.push(DrawCommand::line(from, to, style));
    }

    fn draw_path(&mut self, points: &[Point], style: StrokeStyle) {
        self.commands.push(DrawCommand::Path {
            points: points.to_vec(),
            style,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            fill: color,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, color: Color) {
        self.commands
            .push(DrawCommand::filled_circle(center, radius, color));
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_new_is_empty() {
        let scene = Scene::new(Size::new(960.0, 320.0));
        assert!(scene.is_empty());
        assert_eq!(scene.viewport(), Size::new(960.0, 320.0));
    }

    #[test]
    fn test_scene_records_in_order() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.draw_line(Point::ORIGIN, Point::new(10.0, 0.0), StrokeStyle::default());
        scene.fill_circle(Point::new(5.0, 5.0), 3.0, Color::BLACK);
        scene.draw_text("Mon", Point::new(0.0, 90.0), &TextStyle::default());

        let kinds: Vec<_> = scene.commands().iter().map(DrawCommand::kind).collect();
        assert_eq!(kinds, vec!["path", "circle", "text"]);
        assert_eq!(scene.texts(), vec!["Mon"]);
    }

    #[test]
    fn test_scene_count_of() {
        let mut scene = Scene::new(Size::new(100.0, 100.0));
        scene.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), CornerRadius::ZERO, Color::BLACK);
        scene.fill_rect(Rect::new(2.0, 0.0, 1.0, 1.0), CornerRadius::top(1.0), Color::BLACK);
        scene.fill_polygon(&[Point::ORIGIN], Color::BLACK);
        assert_eq!(scene.count_of("rect"), 2);
        assert_eq!(scene.count_of("polygon"), 1);
        assert_eq!(scene.count_of("circle"), 0);
    }

    #[test]
    fn test_scene_draw_path() {
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        scene.draw_path(&[Point::ORIGIN, Point::new(1.0, 1.0)], StrokeStyle::default());
        match &scene.commands()[0] {
            DrawCommand::Path { points, .. } => assert_eq!(points.len(), 2),
            other => panic!("Expected Path command, got {other:?}"),
        }
    }

    #[test]
    fn test_scene_series_names() {
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        assert!(scene.series_names().is_empty());
        scene.set_series_names(["Requests", "Failed"]);
        assert_eq!(scene.series_names(), ["Requests", "Failed"]);
    }

    #[test]
    fn test_scene_push() {
        let mut scene = Scene::new(Size::new(10.0, 10.0));
        scene.push(DrawCommand::filled_circle(Point::ORIGIN, 1.0, Color::WHITE));
        assert_eq!(scene.command_count(), 1);
    }
}
