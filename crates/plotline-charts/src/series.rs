//! Series declarations and their resolution against a dataset.

use serde::{Deserialize, Serialize};

use crate::data::Dataset;

/// Which renderer a series belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    /// Polyline with point markers
    #[default]
    Line,
    /// Filled region under a line
    Area,
    /// Grouped bars
    Bar,
}

impl SeriesKind {
    /// Lowercase name, as used in manifests.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Area => "area",
            Self::Bar => "bar",
        }
    }
}

impl std::fmt::Display for SeriesKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A series as the caller declares it, tagged with the renderer it targets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDecl {
    /// Renderer this declaration is meant for
    pub kind: SeriesKind,
    /// Field read from every row
    #[serde(alias = "dataKey")]
    pub data_key: String,
    /// Stroke or bar colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<String>,
    /// Area fill colour
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<String>,
    /// Area fill opacity in [0, 1]
    #[serde(default, alias = "fillOpacity", skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f32>,
    /// Human readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SeriesDecl {
    /// Declare a series of any kind.
    #[must_use]
    pub fn new(kind: SeriesKind, data_key: impl Into<String>) -> Self {
        Self {
            kind,
            data_key: data_key.into(),
            stroke: None,
            fill: None,
            fill_opacity: None,
            name: None,
        }
    }

    /// Declare a line series.
    #[must_use]
    pub fn line(data_key: impl Into<String>) -> Self {
        Self::new(SeriesKind::Line, data_key)
    }

    /// Declare an area series.
    #[must_use]
    pub fn area(data_key: impl Into<String>) -> Self {
        Self::new(SeriesKind::Area, data_key)
    }

    /// Declare a bar series.
    #[must_use]
    pub fn bar(data_key: impl Into<String>) -> Self {
        Self::new(SeriesKind::Bar, data_key)
    }

    /// Set the stroke colour.
    #[must_use]
    pub fn stroke(mut self, color: impl Into<String>) -> Self {
        self.stroke = Some(color.into());
        self
    }

    /// Set the fill colour.
    #[must_use]
    pub fn fill(mut self, color: impl Into<String>) -> Self {
        self.fill = Some(color.into());
        self
    }

    /// Set the fill opacity.
    #[must_use]
    pub const fn fill_opacity(mut self, opacity: f32) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    /// Set the display name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// A resolved series, ready for a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    /// Field read from every row
    pub data_key: String,
    /// Stroke or bar colour
    pub stroke_color: Option<String>,
    /// Area fill colour
    pub fill_color: Option<String>,
    /// Area fill opacity, already clamped to [0, 1]
    pub fill_opacity: Option<f32>,
    /// Human readable name
    pub display_name: Option<String>,
}

impl SeriesDescriptor {
    /// Unstyled descriptor for a field.
    #[must_use]
    pub fn new(data_key: impl Into<String>) -> Self {
        Self {
            data_key: data_key.into(),
            stroke_color: None,
            fill_color: None,
            fill_opacity: None,
            display_name: None,
        }
    }

    /// Display name, falling back to the data key.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.data_key)
    }
}

impl From<&SeriesDecl> for SeriesDescriptor {
    fn from(decl: &SeriesDecl) -> Self {
        Self {
            data_key: decl.data_key.trim().to_string(),
            stroke_color: decl.stroke.clone(),
            fill_color: decl.fill.clone(),
            fill_opacity: decl
                .fill_opacity
                .filter(|o| o.is_finite())
                .map(|o| o.clamp(0.0, 1.0)),
            display_name: decl.name.clone(),
        }
    }
}

/// Resolve the declarations meant for `kind`, in declaration order.
///
/// Declarations for other renderers and declarations with a blank data key
/// are skipped. The dataset is only consulted to note keys that no row
/// carries; those series are still returned and plot as zeros.
#[must_use]
pub fn extract_series(
    kind: SeriesKind,
    decls: &[SeriesDecl],
    dataset: &Dataset,
) -> Vec<SeriesDescriptor> {
    decls
        .iter()
        .filter(|decl| decl.kind == kind)
        .filter(|decl| {
            let keep = !decl.data_key.trim().is_empty();
            if !keep {
                tracing::debug!(%kind, "skipping series with a blank data key");
            }
            keep
        })
        .map(|decl| {
            let descriptor = SeriesDescriptor::from(decl);
            if !dataset.is_empty()
                && !dataset
                    .iter()
                    .any(|row| row.contains_key(&descriptor.data_key))
            {
                tracing::debug!(
                    data_key = %descriptor.data_key,
                    rows = dataset.len(),
                    "series key not present in any row, plotting zeros"
                );
            }
            descriptor
        })
        .collect()
}
