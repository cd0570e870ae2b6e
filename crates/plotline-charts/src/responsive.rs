//! Display sizing. The scene stays in its logical viewport; the container
//! only decides how large it is shown and how it is fitted.

use std::fmt;
use std::str::FromStr;

use plotline_core::{Size, Transform2D};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DimensionError;

/// A requested display length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Share of the parent length, `100.0` being all of it
    Percent(f32),
    /// Absolute length
    Pixels(f32),
}

impl Dimension {
    /// Length against a parent length.
    #[must_use]
    pub fn resolve(self, parent: f32) -> f32 {
        match self {
            Self::Percent(p) => parent * p / 100.0,
            Self::Pixels(px) => px,
        }
    }
}

impl FromStr for Dimension {
    type Err = DimensionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DimensionError::Empty);
        }

        let (number, make): (&str, fn(f32) -> Self) = if let Some(n) = s.strip_suffix('%') {
            (n, Self::Percent)
        } else if let Some(n) = s.strip_suffix("px") {
            (n, Self::Pixels)
        } else {
            (s, Self::Pixels)
        };

        let value: f32 = number
            .trim()
            .parse()
            .map_err(|_| DimensionError::Invalid(s.to_string()))?;
        if !value.is_finite() || value < 0.0 {
            return Err(DimensionError::OutOfRange(s.to_string()));
        }
        Ok(make(value))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent(p) => write!(f, "{p}%"),
            Self::Pixels(px) => write!(f, "{px}px"),
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(px) if px.is_finite() && px >= 0.0 => Ok(Self::Pixels(px)),
            Raw::Number(px) => Err(serde::de::Error::custom(DimensionError::OutOfRange(
                px.to_string(),
            ))),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}

/// How the logical viewport fills the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitMode {
    /// Scale each axis independently to fill the container
    #[default]
    Stretch,
    /// Scale uniformly and centre, keeping the aspect ratio
    Contain,
}

impl FitMode {
    /// SVG `preserveAspectRatio` value.
    #[must_use]
    pub const fn preserve_aspect_ratio(self) -> &'static str {
        match self {
            Self::Stretch => "none",
            Self::Contain => "xMidYMid meet",
        }
    }
}

/// The requested display box of a chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveContainer {
    /// Requested width
    pub width: Dimension,
    /// Requested height
    pub height: Dimension,
    /// Fitting of the viewport into the container
    pub fit: FitMode,
}

impl Default for ResponsiveContainer {
    fn default() -> Self {
        Self {
            width: Dimension::Percent(100.0),
            height: Dimension::Pixels(320.0),
            fit: FitMode::Stretch,
        }
    }
}

impl ResponsiveContainer {
    /// Container of the given dimensions, stretched.
    #[must_use]
    pub const fn new(width: Dimension, height: Dimension) -> Self {
        Self {
            width,
            height,
            fit: FitMode::Stretch,
        }
    }

    /// Set the fit mode.
    #[must_use]
    pub const fn fit(mut self, fit: FitMode) -> Self {
        self.fit = fit;
        self
    }

    /// Concrete display size inside `parent`.
    #[must_use]
    pub fn resolve(&self, parent: Size) -> Size {
        Size::new(
            self.width.resolve(parent.width).max(0.0),
            self.height.resolve(parent.height).max(0.0),
        )
    }

    /// Transform from the logical `viewport` onto the container resolved in
    /// `parent`.
    ///
    /// ```
    /// use plotline_charts::{Dimension, ResponsiveContainer};
    /// use plotline_core::{Point, Size};
    ///
    /// let container = ResponsiveContainer::new(Dimension::Percent(50.0), Dimension::Pixels(160.0));
    /// let t = container.transform(Size::new(960.0, 320.0), Size::new(960.0, 600.0));
    /// assert_eq!(t.apply(Point::new(960.0, 320.0)), Point::new(480.0, 160.0));
    /// ```
    #[must_use]
    pub fn transform(&self, viewport: Size, parent: Size) -> Transform2D {
        let target = self.resolve(parent);
        if viewport.is_empty() {
            return Transform2D::identity();
        }

        let sx = target.width / viewport.width;
        let sy = target.height / viewport.height;
        match self.fit {
            FitMode::Stretch => Transform2D::scale(sx, sy),
            FitMode::Contain => {
                let s = sx.min(sy);
                let dx = viewport.width.mul_add(-s, target.width) / 2.0;
                let dy = viewport.height.mul_add(-s, target.height) / 2.0;
                Transform2D::scale(s, s).then(&Transform2D::translate(dx, dy))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_core::Point;

    // =========================================================================
    // Dimension Tests
    // =========================================================================

    #[test]
    fn test_dimension_parse() {
        assert_eq!("100%".parse::<Dimension>(), Ok(Dimension::Percent(100.0)));
        assert_eq!("320".parse::<Dimension>(), Ok(Dimension::Pixels(320.0)));
        assert_eq!(" 320px ".parse::<Dimension>(), Ok(Dimension::Pixels(320.0)));
        assert_eq!("12.5 %".parse::<Dimension>(), Ok(Dimension::Percent(12.5)));
    }

    #[test]
    fn test_dimension_parse_errors() {
        assert_eq!("".parse::<Dimension>(), Err(DimensionError::Empty));
        assert_eq!(
            "wide".parse::<Dimension>(),
            Err(DimensionError::Invalid("wide".to_string()))
        );
        assert_eq!(
            "-4px".parse::<Dimension>(),
            Err(DimensionError::OutOfRange("-4px".to_string()))
        );
        assert!("inf".parse::<Dimension>().is_err());
    }

    #[test]
    fn test_dimension_display() {
        assert_eq!(Dimension::Percent(100.0).to_string(), "100%");
        assert_eq!(Dimension::Pixels(320.0).to_string(), "320px");
    }

    #[test]
    fn test_dimension_serde() {
        let dims: Vec<Dimension> = serde_json::from_str(r#"["50%", 200, "12px"]"#).unwrap();
        assert_eq!(
            dims,
            vec![
                Dimension::Percent(50.0),
                Dimension::Pixels(200.0),
                Dimension::Pixels(12.0)
            ]
        );
        assert_eq!(
            serde_json::to_string(&Dimension::Percent(50.0)).unwrap(),
            r#""50%""#
        );
        assert!(serde_json::from_str::<Dimension>("-1").is_err());
    }

    // =========================================================================
    // Container Tests
    // =========================================================================

    #[test]
    fn test_container_default_resolve() {
        let container = ResponsiveContainer::default();
        assert_eq!(
            container.resolve(Size::new(1200.0, 900.0)),
            Size::new(1200.0, 320.0)
        );
        assert_eq!(container.fit.preserve_aspect_ratio(), "none");
    }

    #[test]
    fn test_container_stretch_transform() {
        let container = ResponsiveContainer::default();
        let t = container.transform(Size::new(960.0, 320.0), Size::new(480.0, 900.0));
        assert_eq!(t.apply(Point::new(960.0, 320.0)), Point::new(480.0, 320.0));
    }

    #[test]
    fn test_container_contain_transform_centres() {
        let container = ResponsiveContainer::new(Dimension::Pixels(960.0), Dimension::Pixels(640.0))
            .fit(FitMode::Contain);
        let t = container.transform(Size::new(960.0, 320.0), Size::new(2000.0, 2000.0));
        assert_eq!(t.apply(Point::ORIGIN), Point::new(0.0, 160.0));
        assert_eq!(t.apply(Point::new(960.0, 320.0)), Point::new(960.0, 480.0));
        assert_eq!(container.fit.preserve_aspect_ratio(), "xMidYMid meet");
    }

    #[test]
    fn test_container_empty_viewport_is_identity() {
        let t = ResponsiveContainer::default().transform(Size::ZERO, Size::new(100.0, 100.0));
        assert_eq!(t, Transform2D::identity());
    }

    #[test]
    fn test_container_partial_deserialize() {
        let container: ResponsiveContainer =
            serde_json::from_str(r#"{"height": "240px", "fit": "contain"}"#).unwrap();
        assert_eq!(container.width, Dimension::Percent(100.0));
        assert_eq!(container.height, Dimension::Pixels(240.0));
        assert_eq!(container.fit, FitMode::Contain);
    }
}
