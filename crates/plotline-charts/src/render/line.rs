//! Line renderer: one polyline per series with a marker on every point.

use plotline_core::{Canvas, StrokeStyle};

use super::Frame;
use crate::axis;

pub(crate) fn paint(frame: &Frame<'_>, canvas: &mut dyn Canvas) {
    if frame.dataset.is_empty() {
        return;
    }

    let total = frame.total();
    axis::paint_index_ticks(canvas, frame.config, &frame.mapper, frame.dataset, |i| {
        frame.mapper.chart_x(i, total)
    });

    for (index, series) in frame.series.iter().enumerate() {
        let color = frame.stroke_color(index, series);
        let points = frame.points(series);

        if points.len() >= 2 {
            canvas.draw_path(
                &points,
                StrokeStyle::solid(color, frame.config.stroke_width).rounded(),
            );
        }
        for point in &points {
            canvas.fill_circle(*point, frame.config.marker_radius, color);
        }
    }
}
