//! Area renderer: the line closed against the baseline and filled, with
//! the line stroked on top.

use plotline_core::{Canvas, Point, StrokeStyle};

use super::Frame;
use crate::axis;

pub(crate) fn paint(frame: &Frame<'_>, canvas: &mut dyn Canvas) {
    if frame.dataset.is_empty() {
        return;
    }

    let total = frame.total();
    let baseline = frame.mapper.baseline();
    axis::paint_index_ticks(canvas, frame.config, &frame.mapper, frame.dataset, |i| {
        frame.mapper.chart_x(i, total)
    });

    for (index, series) in frame.series.iter().enumerate() {
        let points = frame.points(series);
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            continue;
        };

        let mut region = Vec::with_capacity(points.len() + 2);
        region.push(Point::new(first.x, baseline));
        region.extend_from_slice(&points);
        region.push(Point::new(last.x, baseline));
        canvas.fill_polygon(&region, frame.fill_color(index, series));

        if points.len() >= 2 {
            let stroke = frame.stroke_color(index, series);
            canvas.draw_path(
                &points,
                StrokeStyle::solid(stroke, frame.config.stroke_width).rounded(),
            );
        }
    }
}
