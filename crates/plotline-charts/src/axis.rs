//! Axis ticks: which values and rows get a gridline or label, and what the
//! labels say.

use plotline_core::{Canvas, Point, StrokeStyle, TextAnchor, TextStyle};
use serde_json::Value;

use crate::config::ChartConfig;
use crate::data::{Datum, Dataset};
use crate::scale::CoordinateMapper;

/// Preferred label field of a row.
pub const LABEL_FIELD: &str = "label";

/// Label field used when a row has no `label`.
pub const BUCKET_START_FIELD: &str = "bucket_start";

const ELLIPSIS: char = '…';
const GRID_DASH: [f32; 2] = [4.0, 4.0];
const TICK_LENGTH: f32 = 4.0;
const VALUE_LABEL_GAP: f32 = 8.0;
const INDEX_LABEL_OFFSET: f32 = 18.0;

/// A value axis gridline.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTick {
    /// Data value of the gridline
    pub value: f64,
    /// Rounded label
    pub label: String,
}

/// Evenly spaced gridline values from `0` to `domain` inclusive.
///
/// Always `intervals + 1` ticks; zero intervals is treated as one.
#[must_use]
pub fn value_ticks(domain: f64, intervals: usize) -> Vec<ValueTick> {
    let intervals = intervals.max(1);
    (0..=intervals)
        .map(|i| {
            let value = domain * i as f64 / intervals as f64;
            ValueTick {
                value,
                label: format_value(value),
            }
        })
        .collect()
}

/// Row indices that get an index axis label.
///
/// Every row when `total <= limit`. Otherwise every `ceil(total / limit)`-th
/// row plus the last one, so never more than `limit + 1` ticks.
///
/// ```
/// use plotline_charts::index_ticks;
///
/// assert_eq!(index_ticks(20, 6), vec![0, 4, 8, 12, 16, 19]);
/// assert_eq!(index_ticks(3, 6), vec![0, 1, 2]);
/// ```
#[must_use]
pub fn index_ticks(total: usize, limit: usize) -> Vec<usize> {
    let limit = limit.max(1);
    if total <= limit {
        return (0..total).collect();
    }

    let stride = total.div_ceil(limit);
    let mut ticks: Vec<usize> = (0..total).step_by(stride).collect();
    let last = total - 1;
    if ticks.last() != Some(&last) {
        ticks.push(last);
    }
    ticks
}

/// Label for the row at `index`: its `label`, else its `bucket_start`, else
/// the 1-based position. Truncated to `max_chars`.
#[must_use]
pub fn tick_label(datum: Option<&Datum>, index: usize, max_chars: usize) -> String {
    let raw = datum
        .and_then(|row| {
            label_text(row.get(LABEL_FIELD)).or_else(|| label_text(row.get(BUCKET_START_FIELD)))
        })
        .unwrap_or_else(|| (index + 1).to_string());
    truncate_label(&raw, max_chars)
}

fn label_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Keep the first `max_chars` characters and append `…` when longer.
///
/// ```
/// use plotline_charts::truncate_label;
///
/// assert_eq!(truncate_label("2024-05-01T00:00:00Z", 10), "2024-05-01…");
/// assert_eq!(truncate_label("Mon", 10), "Mon");
/// ```
#[must_use]
pub fn truncate_label(label: &str, max_chars: usize) -> String {
    match label.char_indices().nth(max_chars) {
        Some((cut, _)) => {
            let mut out = String::with_capacity(cut + ELLIPSIS.len_utf8());
            out.push_str(&label[..cut]);
            out.push(ELLIPSIS);
            out
        }
        None => label.to_string(),
    }
}

/// Round half up to an integer label. Non-finite values print as `0`.
#[must_use]
pub fn format_value(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let rounded = (value + 0.5).floor();
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{rounded:.0}")
}

fn label_style(config: &ChartConfig, anchor: TextAnchor) -> TextStyle {
    TextStyle {
        size: config.font_size,
        color: config.label_color(),
        anchor,
    }
}

/// Dashed value gridlines with their labels left of the plot.
pub(crate) fn paint_value_grid(
    canvas: &mut dyn Canvas,
    config: &ChartConfig,
    mapper: &CoordinateMapper,
    domain: f64,
) {
    let plot = mapper.plot_area();
    let grid = StrokeStyle::solid(config.grid_color(), 1.0).dashed(&GRID_DASH);
    let style = label_style(config, TextAnchor::End);

    for tick in value_ticks(domain, config.y_tick_intervals) {
        let y = mapper.chart_y(tick.value, domain);
        canvas.draw_line(
            Point::new(plot.x, y),
            Point::new(plot.right(), y),
            grid.clone(),
        );
        canvas.draw_text(
            &tick.label,
            Point::new(plot.x - VALUE_LABEL_GAP, y + config.font_size / 3.0),
            &style,
        );
    }
}

/// Baseline and left axis lines.
pub(crate) fn paint_axes(canvas: &mut dyn Canvas, config: &ChartConfig, mapper: &CoordinateMapper) {
    let plot = mapper.plot_area();
    let axis = StrokeStyle::solid(config.axis_color(), 1.0);
    let baseline = mapper.baseline();

    canvas.draw_line(
        Point::new(plot.x, baseline),
        Point::new(plot.right(), baseline),
        axis.clone(),
    );
    canvas.draw_line(Point::new(plot.x, plot.y), Point::new(plot.x, baseline), axis);
}

/// Tick marks and labels under the baseline for the sampled rows.
///
/// `x_of` places row `i`; bars put it at the group centre, lines at the
/// mapped point.
pub(crate) fn paint_index_ticks(
    canvas: &mut dyn Canvas,
    config: &ChartConfig,
    mapper: &CoordinateMapper,
    dataset: &Dataset,
    x_of: impl Fn(usize) -> f32,
) {
    let baseline = mapper.baseline();
    let tick = StrokeStyle::solid(config.axis_color(), 1.0);
    let style = label_style(config, TextAnchor::Middle);

    for index in index_ticks(dataset.len(), config.x_tick_limit) {
        let x = x_of(index);
        canvas.draw_line(
            Point::new(x, baseline),
            Point::new(x, baseline + TICK_LENGTH),
            tick.clone(),
        );
        let label = tick_label(dataset.get(index), index, config.label_max_chars);
        canvas.draw_text(&label, Point::new(x, baseline + INDEX_LABEL_OFFSET), &style);
    }
}
