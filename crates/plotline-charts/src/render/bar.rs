//! Bar renderer: one group per row, one bar per series inside each group.

use plotline_core::{Canvas, CornerRadius, Point, Rect, TextAnchor, TextStyle};

use super::Frame;
use crate::axis::{self, format_value};

const VALUE_LABEL_OFFSET: f32 = 6.0;

/// Width of each bar in a group of `series_count` bars.
///
/// A group reserves one extra bar's worth of room for spacing; the result
/// never drops below `min_width`.
///
/// ```
/// use plotline_charts::bar_width;
///
/// assert!((bar_width(100.0, 2, 8.0) - 33.33).abs() < 0.01);
/// assert_eq!(bar_width(20.0, 4, 8.0), 8.0);
/// ```
#[must_use]
pub fn bar_width(group_width: f32, series_count: usize, min_width: f32) -> f32 {
    (group_width / (series_count + 1) as f32).max(min_width)
}

pub(crate) fn paint(frame: &Frame<'_>, canvas: &mut dyn Canvas) {
    let total = frame.total();
    if total == 0 {
        return;
    }

    let config = frame.config;
    let plot = frame.mapper.plot_area();
    let baseline = frame.mapper.baseline();
    let group_width = plot.width / total as f32;
    let group_left = |i: usize| (i as f32).mul_add(group_width, plot.x);

    axis::paint_index_ticks(canvas, config, &frame.mapper, frame.dataset, |i| {
        group_width.mul_add(0.5, group_left(i))
    });

    let count = frame.series.len();
    if count == 0 {
        return;
    }

    let width = bar_width(group_width, count, config.min_bar_width);
    let cluster = (count as f32).mul_add(width, (count - 1) as f32 * config.bar_gap);
    let offset = (group_width - cluster) / 2.0;
    let label_style = TextStyle {
        size: config.font_size,
        color: config.label_color(),
        anchor: TextAnchor::Middle,
    };

    let columns: Vec<Vec<f64>> = frame.series.iter().map(|s| frame.values(s)).collect();
    let colors: Vec<_> = frame
        .series
        .iter()
        .enumerate()
        .map(|(i, s)| frame.stroke_color(i, s))
        .collect();

    for row in 0..total {
        let start = group_left(row) + offset;
        for (si, column) in columns.iter().enumerate() {
            let value = column[row];
            let x = (si as f32).mul_add(width + config.bar_gap, start);
            let top = frame.mapper.chart_y(value.max(0.0), frame.domain);
            let height = baseline - top;
            let radius = config.bar_radius.min(height / 2.0).min(width / 2.0).max(0.0);

            canvas.fill_rect(
                Rect::new(x, top, width, height),
                CornerRadius::top(radius),
                colors[si],
            );

            let label = format_value(value);
            if label != "0" {
                canvas.draw_text(
                    &label,
                    Point::new(width.mul_add(0.5, x), top - VALUE_LABEL_OFFSET),
                    &label_style,
                );
            }
        }
    }
}
