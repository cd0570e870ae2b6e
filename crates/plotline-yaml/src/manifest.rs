//! Chart manifest types.

use plotline_charts::{Chart, ChartConfig, ResponsiveContainer, SeriesDecl, SeriesKind};
use plotline_core::Color;
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// A chart described in YAML.
///
/// ```yaml
/// kind: bar
/// title: Requests
/// config:
///   x_tick_limit: 8
/// container:
///   height: 240px
/// series:
///   - data_key: requests
///     stroke: "#2563eb"
///     name: Requests
///   - data_key: failed_requests
///     stroke: "#ef4444"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartManifest {
    /// Renderer
    pub kind: SeriesKind,
    /// Optional heading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Geometry and theme overrides
    #[serde(default)]
    pub config: ChartConfig,
    /// Display sizing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<ResponsiveContainer>,
    /// Declared series
    #[serde(default)]
    pub series: Vec<SeriesEntry>,
}

/// One series entry. `kind` defaults to the manifest kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesEntry {
    /// Renderer this series targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<SeriesKind>,
    /// Field read from every row
    #[serde(default, alias = "dataKey")]
    pub data_key: String,
    /// Stroke or bar colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Area fill colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Area fill opacity
    #[serde(default, alias = "fillOpacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f32>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SeriesEntry {
    /// Declaration for a chart of `default_kind`.
    #[must_use]
    pub fn to_decl(&self, default_kind: SeriesKind) -> SeriesDecl {
        SeriesDecl {
            kind: self.kind.unwrap_or(default_kind),
            data_key: self.data_key.clone(),
            stroke: self.stroke.clone(),
            fill: self.fill.clone(),
            fill_opacity: self.fill_opacity,
            name: self.name.clone(),
        }
    }
}

impl ChartManifest {
    /// Parse a manifest from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or has the wrong shape.
    pub fn from_yaml(yaml: &str) -> Result<Self, ParseError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Parse and validate in one step.
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation failure.
    pub fn load(yaml: &str) -> Result<Self, ParseError> {
        let manifest = Self::from_yaml(yaml)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Serialize manifest to YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ParseError> {
        Ok(serde_yaml_ng::to_string(self)?)
    }

    /// Check the manifest describes a drawable chart.
    ///
    /// Rendering would tolerate every problem reported here by drawing zeros
    /// or skipping series; a manifest is authored by hand, so it is held to
    /// a stricter standard.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ParseError> {
        self.config.validate()?;

        if self.series.is_empty() {
            return Err(ParseError::MissingField("series".to_string()));
        }

        for (i, entry) in self.series.iter().enumerate() {
            if entry.data_key.trim().is_empty() {
                return Err(ParseError::MissingField(format!("series[{i}].data_key")));
            }
            if let Some(opacity) = entry.fill_opacity {
                if !(0.0..=1.0).contains(&opacity) {
                    return Err(ParseError::InvalidValue {
                        field: format!("series[{i}].fill_opacity"),
                        message: format!("{opacity} is outside [0, 1]"),
                    });
                }
            }
            for (attr, value) in [("stroke", &entry.stroke), ("fill", &entry.fill)] {
                if let Some(value) = value {
                    if let Err(e) = value.parse::<Color>() {
                        return Err(ParseError::InvalidValue {
                            field: format!("series[{i}].{attr}"),
                            message: format!("'{value}': {e}"),
                        });
                    }
                }
            }
        }

        if !self
            .series
            .iter()
            .any(|s| s.kind.unwrap_or(self.kind) == self.kind)
        {
            return Err(ParseError::Validation(format!(
                "no series for a {} chart",
                self.kind
            )));
        }

        Ok(())
    }

    /// Series declarations with defaulted kinds.
    #[must_use]
    pub fn series_decls(&self) -> Vec<SeriesDecl> {
        self.series.iter().map(|s| s.to_decl(self.kind)).collect()
    }

    /// Display container, defaulting to full width by 320px.
    #[must_use]
    pub fn container(&self) -> ResponsiveContainer {
        self.container.unwrap_or_default()
    }

    /// Build the chart.
    #[must_use]
    pub fn to_chart(&self) -> Chart {
        let chart = Chart::new(self.kind)
            .config(self.config.clone())
            .add_series(self.series_decls());
        match &self.title {
            Some(title) => chart.title(title.clone()),
            None => chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotline_charts::{Dimension, FitMode};
    use proptest::prelude::*;

    const BAR_YAML: &str = r##"
kind: bar
title: Requests
config:
  x_tick_limit: 8
  min_bar_width: 10
container:
  width: 50%
  height: 240px
  fit: contain
series:
  - data_key: requests
    stroke: "#2563eb"
    name: Requests
  - dataKey: failed_requests
    stroke: "#ef4444"
  - kind: line
    data_key: success_rate
"##;

    // =========================================================================
    // Parsing Tests
    // =========================================================================

    #[test]
    fn test_parse_bar_manifest() {
        let manifest = ChartManifest::from_yaml(BAR_YAML).unwrap();
        assert_eq!(manifest.kind, SeriesKind::Bar);
        assert_eq!(manifest.title.as_deref(), Some("Requests"));
        assert_eq!(manifest.config.x_tick_limit, 8);
        assert_eq!(manifest.config.min_bar_width, 10.0);
        assert_eq!(manifest.config.width, 960.0);
        assert_eq!(manifest.series.len(), 3);
        assert_eq!(manifest.series[1].data_key, "failed_requests");

        let container = manifest.container();
        assert_eq!(container.width, Dimension::Percent(50.0));
        assert_eq!(container.height, Dimension::Pixels(240.0));
        assert_eq!(container.fit, FitMode::Contain);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_series_kind_defaults_to_manifest_kind() {
        let manifest = ChartManifest::from_yaml(BAR_YAML).unwrap();
        let decls = manifest.series_decls();
        assert_eq!(decls[0].kind, SeriesKind::Bar);
        assert_eq!(decls[1].kind, SeriesKind::Bar);
        assert_eq!(decls[2].kind, SeriesKind::Line);
    }

    #[test]
    fn test_to_chart_skips_foreign_series() {
        let manifest = ChartManifest::from_yaml(BAR_YAML).unwrap();
        let chart = manifest.to_chart();
        assert_eq!(chart.kind(), SeriesKind::Bar);
        assert_eq!(chart.get_title(), Some("Requests"));
        assert_eq!(chart.get_series().len(), 3);
        let data = plotline_charts::Dataset::from_json(r#"[{"requests": 1}]"#).unwrap();
        assert_eq!(chart.resolved_series(&data).len(), 2);
    }

    #[test]
    fn test_default_container() {
        let manifest = ChartManifest::from_yaml("kind: line\nseries:\n  - data_key: v\n").unwrap();
        assert_eq!(manifest.container(), ResponsiveContainer::default());
    }

    #[test]
    fn test_yaml_roundtrip() {
        let manifest = ChartManifest::from_yaml(BAR_YAML).unwrap();
        let yaml = manifest.to_yaml().unwrap();
        let back = ChartManifest::from_yaml(&yaml).unwrap();
        assert_eq!(back, manifest);
    }

    #[test]
    fn test_unknown_kind_is_yaml_error() {
        let err = ChartManifest::from_yaml("kind: pie\nseries: []\n").unwrap_err();
        assert!(matches!(err, ParseError::Yaml(_)));
    }

    // =========================================================================
    // Validation Tests
    // =========================================================================

    #[test]
    fn test_validate_requires_series() {
        let manifest = ChartManifest::from_yaml("kind: area\n").unwrap();
        assert!(matches!(
            manifest.validate(),
            Err(ParseError::MissingField(field)) if field == "series"
        ));
    }

    #[test]
    fn test_validate_blank_data_key() {
        let manifest = ChartManifest::from_yaml("kind: line\nseries:\n  - name: Oops\n").unwrap();
        assert!(matches!(
            manifest.validate(),
            Err(ParseError::MissingField(field)) if field == "series[0].data_key"
        ));
    }

    #[test]
    fn test_validate_opacity_range() {
        let yaml = "kind: area\nseries:\n  - data_key: v\n    fill_opacity: 1.5\n";
        let manifest = ChartManifest::from_yaml(yaml).unwrap();
        assert!(matches!(
            manifest.validate(),
            Err(ParseError::InvalidValue { field, .. }) if field == "series[0].fill_opacity"
        ));
    }

    #[test]
    fn test_validate_bad_colour() {
        let yaml = "kind: line\nseries:\n  - data_key: v\n    stroke: reddish\n";
        let manifest = ChartManifest::from_yaml(yaml).unwrap();
        assert!(matches!(
            manifest.validate(),
            Err(ParseError::InvalidValue { field, .. }) if field == "series[0].stroke"
        ));
    }

    #[test]
    fn test_validate_no_matching_series() {
        let yaml = "kind: bar\nseries:\n  - kind: line\n    data_key: v\n";
        let manifest = ChartManifest::from_yaml(yaml).unwrap();
        assert!(matches!(manifest.validate(), Err(ParseError::Validation(_))));
    }

    #[test]
    fn test_validate_config() {
        let yaml = "kind: bar\nconfig:\n  x_tick_limit: 0\nseries:\n  - data_key: v\n";
        let manifest = ChartManifest::from_yaml(yaml).unwrap();
        assert!(matches!(manifest.validate(), Err(ParseError::Config(_))));
        assert!(ChartManifest::load(yaml).is_err());
    }

    proptest! {
        #[test]
        fn prop_any_plain_key_validates(key in "[a-z][a-z0-9_]{0,20}", opacity in 0.0f32..=1.0) {
            let yaml = format!("kind: area\nseries:\n  - data_key: \"{key}\"\n    fill_opacity: {opacity}\n");
            let manifest = ChartManifest::load(&yaml).unwrap();
            prop_assert_eq!(&manifest.series_decls()[0].data_key, &key);
        }
    }
}
