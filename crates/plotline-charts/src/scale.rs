//! Value domain and the mapping from data space into the logical canvas.

use plotline_core::{Point, Rect};

use crate::config::ChartConfig;
use crate::data::{field_number, Dataset};
use crate::series::SeriesDescriptor;

/// Largest value across every row of every series, never below `1`.
#[must_use]
pub fn compute_domain(dataset: &Dataset, series: &[SeriesDescriptor]) -> f64 {
    dataset
        .iter()
        .flat_map(|row| series.iter().map(move |s| field_number(row, &s.data_key)))
        .fold(1.0, f64::max)
}

/// Maps row indices and values to positions inside the plot area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    plot: Rect,
}

impl CoordinateMapper {
    /// Mapper for the plot area of `config`.
    #[must_use]
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            plot: config.plot_area(),
        }
    }

    /// Usable plotting rectangle.
    #[must_use]
    pub const fn plot_area(&self) -> Rect {
        self.plot
    }

    /// Y of the value zero.
    #[must_use]
    pub fn baseline(&self) -> f32 {
        self.plot.bottom()
    }

    /// X of the last row.
    #[must_use]
    pub fn right_edge(&self) -> f32 {
        self.plot.right()
    }

    /// Horizontal position of row `index` out of `total`.
    ///
    /// A single row sits at the left edge.
    #[must_use]
    pub fn chart_x(&self, index: usize, total: usize) -> f32 {
        if total <= 1 {
            return self.plot.x;
        }
        let t = index as f32 / (total - 1) as f32;
        t.mul_add(self.plot.width, self.plot.x)
    }

    /// Vertical position of `value` on a scale topping out at `domain`.
    #[must_use]
    pub fn chart_y(&self, value: f64, domain: f64) -> f32 {
        if domain <= 0.0 {
            return self.baseline();
        }
        let ratio = (value / domain) as f32;
        (-ratio).mul_add(self.plot.height, self.baseline())
    }

    /// Both coordinates at once.
    #[must_use]
    pub fn point(&self, index: usize, total: usize, value: f64, domain: f64) -> Point {
        Point::new(self.chart_x(index, total), self.chart_y(value, domain))
    }
}
