//! YAML chart manifests for plotline.
//!
//! A manifest names the renderer, optional configuration overrides, the
//! display container and the series to draw:
//!
//! ```
//! use plotline_yaml::ChartManifest;
//!
//! let manifest = ChartManifest::load(
//!     "kind: line\nseries:\n  - data_key: avg_latency_ms\n    name: Latency\n",
//! )
//! .unwrap();
//! assert_eq!(manifest.to_chart().get_series().len(), 1);
//! ```

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{ChartManifest, SeriesEntry};
