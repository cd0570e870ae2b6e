//! Error types for the edges of the chart engine.
//!
//! Rendering itself never fails. These errors only come from loading data,
//! validating a configuration, or parsing display sizes.

use plotline_core::ColorParseError;
use thiserror::Error;

/// A [`crate::ChartConfig`] that cannot produce a usable plot.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Padding leaves no room to plot.
    #[error("plot area is empty: {width}x{height} after padding")]
    EmptyPlotArea {
        /// Usable width
        width: f32,
        /// Usable height
        height: f32,
    },

    /// A geometry constant is NaN or infinite.
    #[error("{field} must be finite")]
    NonFinite {
        /// Config field name
        field: &'static str,
    },

    /// A count is below its minimum.
    #[error("{field} must be at least {min}")]
    TooSmall {
        /// Config field name
        field: &'static str,
        /// Smallest accepted value
        min: usize,
    },

    /// Default fill opacity outside [0, 1].
    #[error("fill opacity {0} is outside [0, 1]")]
    FillOpacity(f32),

    /// A theme or palette entry is not a colour.
    #[error("invalid colour '{value}': {source}")]
    Color {
        /// Offending value
        value: String,
        /// Parse failure
        source: ColorParseError,
    },
}

/// Input data that is not a dataset at all.
#[derive(Debug, Error)]
pub enum DataError {
    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON with the wrong top-level shape.
    #[error("expected an array of rows or an object with a 'buckets' array, found {0}")]
    UnexpectedShape(&'static str),
}

/// A display size string that cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DimensionError {
    /// Blank input.
    #[error("empty dimension")]
    Empty,

    /// Neither a percentage nor a pixel length.
    #[error("invalid dimension '{0}'")]
    Invalid(String),

    /// Negative or non-finite length.
    #[error("dimension '{0}' must be a non-negative finite number")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::EmptyPlotArea {
            width: 0.0,
            height: 12.0,
        };
        assert_eq!(err.to_string(), "plot area is empty: 0x12 after padding");

        let err = ConfigError::TooSmall {
            field: "x_tick_limit",
            min: 1,
        };
        assert_eq!(err.to_string(), "x_tick_limit must be at least 1");
    }

    #[test]
    fn test_config_error_color_display() {
        let err = ConfigError::Color {
            value: "#zz".to_string(),
            source: ColorParseError::InvalidLength,
        };
        assert!(err.to_string().starts_with("invalid colour '#zz'"));
    }

    #[test]
    fn test_data_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: DataError = json_err.into();
        assert!(matches!(err, DataError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }

    #[test]
    fn test_dimension_error_display() {
        assert_eq!(DimensionError::Empty.to_string(), "empty dimension");
        assert_eq!(
            DimensionError::Invalid("wide".to_string()).to_string(),
            "invalid dimension 'wide'"
        );
    }
}
