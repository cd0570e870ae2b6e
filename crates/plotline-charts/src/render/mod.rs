//! The [`Chart`] builder and the frame every renderer shares.

mod area;
mod bar;
mod line;

pub use bar::bar_width;

use plotline_core::{Canvas, Color, Point, Scene};
use serde::{Deserialize, Serialize};

use crate::axis;
use crate::config::ChartConfig;
use crate::data::{field_number, Dataset};
use crate::scale::{compute_domain, CoordinateMapper};
use crate::series::{extract_series, SeriesDecl, SeriesDescriptor, SeriesKind};

/// A line, area or bar chart over bucketed rows.
///
/// ```
/// use plotline_charts::{Chart, Dataset, SeriesDecl};
///
/// let data = Dataset::from_json(r#"[{"label": "Mon", "v": 10}, {"label": "Tue", "v": 20}]"#).unwrap();
/// let scene = Chart::line().series(SeriesDecl::line("v")).render(&data);
///
/// assert_eq!(scene.count_of("circle"), 2);
/// assert!(scene.texts().contains(&"Tue"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chart {
    kind: SeriesKind,
    #[serde(default)]
    config: ChartConfig,
    #[serde(default)]
    series: Vec<SeriesDecl>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
}

impl Default for Chart {
    fn default() -> Self {
        Self::new(SeriesKind::Line)
    }
}

impl Chart {
    /// Create a chart for one renderer.
    #[must_use]
    pub fn new(kind: SeriesKind) -> Self {
        Self {
            kind,
            config: ChartConfig::default(),
            series: Vec::new(),
            title: None,
        }
    }

    /// Create a line chart.
    #[must_use]
    pub fn line() -> Self {
        Self::new(SeriesKind::Line)
    }

    /// Create an area chart.
    #[must_use]
    pub fn area() -> Self {
        Self::new(SeriesKind::Area)
    }

    /// Create a bar chart.
    #[must_use]
    pub fn bar() -> Self {
        Self::new(SeriesKind::Bar)
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: ChartConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a series.
    #[must_use]
    pub fn series(mut self, series: SeriesDecl) -> Self {
        self.series.push(series);
        self
    }

    /// Declare several series.
    #[must_use]
    pub fn add_series(mut self, series: impl IntoIterator<Item = SeriesDecl>) -> Self {
        self.series.extend(series);
        self
    }

    /// Set a title. It is metadata for callers and is not drawn.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Renderer this chart uses.
    #[must_use]
    pub const fn kind(&self) -> SeriesKind {
        self.kind
    }

    /// Get the configuration.
    #[must_use]
    pub const fn get_config(&self) -> &ChartConfig {
        &self.config
    }

    /// Get every declared series, including those for other renderers.
    #[must_use]
    pub fn get_series(&self) -> &[SeriesDecl] {
        &self.series
    }

    /// Get the title.
    #[must_use]
    pub fn get_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Series this chart will draw for `dataset`.
    #[must_use]
    pub fn resolved_series(&self, dataset: &Dataset) -> Vec<SeriesDescriptor> {
        extract_series(self.kind, &self.series, dataset)
    }

    /// Render into a new scene in the logical viewport.
    ///
    /// The scene also records the display name of every drawn series.
    #[must_use]
    pub fn render(&self, dataset: &Dataset) -> Scene {
        let mut scene = Scene::new(self.config.viewport());
        let frame = self.frame(dataset);
        self.paint_frame(&frame, &mut scene);
        scene.set_series_names(frame.series.iter().map(SeriesDescriptor::label));
        scene
    }

    /// Paint onto any canvas.
    pub fn paint(&self, dataset: &Dataset, canvas: &mut dyn Canvas) {
        self.paint_frame(&self.frame(dataset), canvas);
    }

    fn frame<'a>(&'a self, dataset: &'a Dataset) -> Frame<'a> {
        Frame::new(self.kind, &self.config, dataset, self.resolved_series(dataset))
    }

    fn paint_frame(&self, frame: &Frame<'_>, canvas: &mut dyn Canvas) {
        if !frame.dataset.is_empty() {
            axis::paint_value_grid(canvas, frame.config, &frame.mapper, frame.domain);
        }
        axis::paint_axes(canvas, frame.config, &frame.mapper);

        match self.kind {
            SeriesKind::Line => line::paint(frame, canvas),
            SeriesKind::Area => area::paint(frame, canvas),
            SeriesKind::Bar => bar::paint(frame, canvas),
        }
    }
}

/// Everything computed once per render and shared by the renderers.
pub(crate) struct Frame<'a> {
    pub(crate) config: &'a ChartConfig,
    pub(crate) dataset: &'a Dataset,
    pub(crate) series: Vec<SeriesDescriptor>,
    pub(crate) domain: f64,
    pub(crate) mapper: CoordinateMapper,
}

impl<'a> Frame<'a> {
    pub(crate) fn new(
        kind: SeriesKind,
        config: &'a ChartConfig,
        dataset: &'a Dataset,
        series: Vec<SeriesDescriptor>,
    ) -> Self {
        let domain = compute_domain(dataset, &series);
        tracing::debug!(
            %kind,
            rows = dataset.len(),
            series = series.len(),
            domain,
            "rendering chart"
        );
        Self {
            config,
            dataset,
            series,
            domain,
            mapper: CoordinateMapper::new(config),
        }
    }

    pub(crate) fn total(&self) -> usize {
        self.dataset.len()
    }

    /// Coerced values of one series, one per row.
    pub(crate) fn values(&self, series: &SeriesDescriptor) -> Vec<f64> {
        self.dataset
            .iter()
            .map(|row| field_number(row, &series.data_key))
            .collect()
    }

    /// Mapped points of one series.
    pub(crate) fn points(&self, series: &SeriesDescriptor) -> Vec<Point> {
        let total = self.total();
        self.values(series)
            .into_iter()
            .enumerate()
            .map(|(i, v)| self.mapper.point(i, total, v, self.domain))
            .collect()
    }

    /// Stroke colour of the series at `index`, from its declaration or the
    /// palette.
    pub(crate) fn stroke_color(&self, index: usize, series: &SeriesDescriptor) -> Color {
        resolve_color(series.stroke_color.as_deref())
            .unwrap_or_else(|| self.config.series_color(index))
    }

    /// Translucent fill of an area series.
    pub(crate) fn fill_color(&self, index: usize, series: &SeriesDescriptor) -> Color {
        let base = resolve_color(series.fill_color.as_deref())
            .unwrap_or_else(|| self.stroke_color(index, series));
        let opacity = series.fill_opacity.unwrap_or(self.config.fill_opacity);
        base.with_alpha(base.a * opacity)
    }
}

fn resolve_color(raw: Option<&str>) -> Option<Color> {
    let raw = raw?;
    match raw.parse::<Color>() {
        Ok(color) => Some(color),
        Err(err) => {
            tracing::debug!(color = raw, %err, "ignoring unparseable series colour");
            None
        }
    }
}
