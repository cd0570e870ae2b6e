//! Chart geometry and theme configuration.

use plotline_core::{Color, Insets, Rect, Size};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ConfigError;

/// Default series colours, used in declaration order when a series has no
/// explicit stroke.
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#2563eb", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4",
];

const DEFAULT_PADDING: Insets = Insets::new(20.0, 20.0, 52.0, 56.0);

const FALLBACK_SERIES_COLOR: Color = Color {
    r: 0.145,
    g: 0.388,
    b: 0.922,
    a: 1.0,
};

/// Immutable geometry and styling shared by every function of one render.
///
/// All lengths are logical units; the scene is scaled to the display by the
/// [`crate::ResponsiveContainer`], never by changing these values.
///
/// Every field has a default, so partial overrides deserialize cleanly:
///
/// ```
/// use plotline_charts::ChartConfig;
///
/// let config: ChartConfig = serde_json::from_str(r#"{ "x_tick_limit": 12 }"#).unwrap();
/// assert_eq!(config.x_tick_limit, 12);
/// assert_eq!(config.width, 960.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Logical canvas width
    pub width: f32,
    /// Logical canvas height
    pub height: f32,
    /// Padding box around the plot area; omitted sides keep their defaults
    #[serde(deserialize_with = "deserialize_padding")]
    pub padding: Insets,
    /// Most index labels drawn before sampling kicks in
    pub x_tick_limit: usize,
    /// Intervals on the value axis (gridlines = intervals + 1)
    pub y_tick_intervals: usize,
    /// Longest index label before truncation
    pub label_max_chars: usize,
    /// Floor for bar widths
    pub min_bar_width: f32,
    /// Gap between bars of one group
    pub bar_gap: f32,
    /// Radius of the rounded bar tops
    pub bar_radius: f32,
    /// Radius of line chart point markers
    pub marker_radius: f32,
    /// Width of series strokes
    pub stroke_width: f32,
    /// Area fill opacity when a series declares none
    pub fill_opacity: f32,
    /// Axis and tick label font size
    pub font_size: f32,
    /// Series colours by position
    pub palette: Vec<String>,
    /// Axis line colour
    pub axis_color: String,
    /// Dashed gridline colour
    pub grid_color: String,
    /// Tick label colour
    pub label_color: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 320.0,
            padding: DEFAULT_PADDING,
            x_tick_limit: 6,
            y_tick_intervals: 4,
            label_max_chars: 10,
            min_bar_width: 8.0,
            bar_gap: 4.0,
            bar_radius: 4.0,
            marker_radius: 3.0,
            stroke_width: 2.0,
            fill_opacity: 0.2,
            font_size: 11.0,
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            axis_color: "#94a3b8".to_string(),
            grid_color: "#e2e8f0".to_string(),
            label_color: "#64748b".to_string(),
        }
    }
}

#[derive(Deserialize)]
struct PaddingOverride {
    top: Option<f32>,
    right: Option<f32>,
    bottom: Option<f32>,
    left: Option<f32>,
}

fn deserialize_padding<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Insets, D::Error> {
    let o = PaddingOverride::deserialize(deserializer)?;
    Ok(Insets::new(
        o.top.unwrap_or(DEFAULT_PADDING.top),
        o.right.unwrap_or(DEFAULT_PADDING.right),
        o.bottom.unwrap_or(DEFAULT_PADDING.bottom),
        o.left.unwrap_or(DEFAULT_PADDING.left),
    ))
}

impl ChartConfig {
    /// Create the default 960x320 configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the logical canvas size.
    #[must_use]
    pub fn size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the padding box.
    #[must_use]
    pub const fn padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    /// Set the index label limit.
    #[must_use]
    pub const fn x_tick_limit(mut self, limit: usize) -> Self {
        self.x_tick_limit = limit;
        self
    }

    /// Set the number of value axis intervals.
    #[must_use]
    pub const fn y_tick_intervals(mut self, intervals: usize) -> Self {
        self.y_tick_intervals = intervals;
        self
    }

    /// Set the label truncation length.
    #[must_use]
    pub const fn label_max_chars(mut self, chars: usize) -> Self {
        self.label_max_chars = chars;
        self
    }

    /// Set the minimum bar width.
    #[must_use]
    pub fn min_bar_width(mut self, width: f32) -> Self {
        self.min_bar_width = width.max(0.0);
        self
    }

    /// Set the gap between bars of one group.
    #[must_use]
    pub fn bar_gap(mut self, gap: f32) -> Self {
        self.bar_gap = gap.max(0.0);
        self
    }

    /// Set the default area fill opacity.
    #[must_use]
    pub fn fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Replace the series palette.
    #[must_use]
    pub fn palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Logical viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Usable plotting rectangle inside the padding box.
    #[must_use]
    pub fn plot_area(&self) -> Rect {
        Rect::from_size(self.viewport()).inset_by(self.padding)
    }

    /// Palette colour for the series at `index`, cycling.
    #[must_use]
    pub fn series_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return FALLBACK_SERIES_COLOR;
        }
        let raw = &self.palette[index % self.palette.len()];
        raw.parse().unwrap_or(FALLBACK_SERIES_COLOR)
    }

    /// Axis line colour.
    #[must_use]
    pub fn axis_color(&self) -> Color {
        self.axis_color.parse().unwrap_or(Color::BLACK)
    }

    /// Gridline colour.
    #[must_use]
    pub fn grid_color(&self) -> Color {
        self.grid_color.parse().unwrap_or(Color::BLACK)
    }

    /// Tick label colour.
    #[must_use]
    pub fn label_color(&self) -> Color {
        self.label_color.parse().unwrap_or(Color::BLACK)
    }

    /// Check that the configuration describes a drawable chart.
    ///
    /// Rendering never requires this: out-of-range values still render,
    /// just not usefully. Call it where configuration enters the program.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let lengths = [
            ("width", self.width),
            ("height", self.height),
            ("padding.top", self.padding.top),
            ("padding.right", self.padding.right),
            ("padding.bottom", self.padding.bottom),
            ("padding.left", self.padding.left),
            ("min_bar_width", self.min_bar_width),
            ("bar_gap", self.bar_gap),
            ("bar_radius", self.bar_radius),
            ("marker_radius", self.marker_radius),
            ("stroke_width", self.stroke_width),
            ("font_size", self.font_size),
        ];
        for (field, value) in lengths {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field });
            }
        }

        let plot_width = self.width - self.padding.horizontal();
        let plot_height = self.height - self.padding.vertical();
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(ConfigError::EmptyPlotArea {
                width: plot_width.max(0.0),
                height: plot_height.max(0.0),
            });
        }

        if self.x_tick_limit == 0 {
            return Err(ConfigError::TooSmall {
                field: "x_tick_limit",
                min: 1,
            });
        }
        if self.y_tick_intervals == 0 {
            return Err(ConfigError::TooSmall {
                field: "y_tick_intervals",
                min: 1,
            });
        }
        if !(0.0..=1.0).contains(&self.fill_opacity) {
            return Err(ConfigError::FillOpacity(self.fill_opacity));
        }

        let colors = self
            .palette
            .iter()
            .chain([&self.axis_color, &self.grid_color, &self.label_color]);
        for value in colors {
            if let Err(source) = value.parse::<Color>() {
                return Err(ConfigError::Color {
                    value: value.clone(),
                    source,
                });
            }
        }

        Ok(())
    }
}
