//! Line, area and bar charts for bucketed metrics.
//!
//! A chart turns an ordered [`Dataset`] and a list of [`SeriesDecl`]s into a
//! [`plotline_core::Scene`] in a fixed logical viewport. Rendering is pure:
//! nothing is cached, malformed values plot as zero, and the same inputs
//! always give the same scene.
//!
//! ```
//! use plotline_charts::{Chart, Dataset, SeriesDecl, SvgWriter};
//!
//! let data = Dataset::from_json(r#"[
//!     {"label": "Mon", "requests": 10, "failed_requests": 1},
//!     {"label": "Tue", "requests": 20, "failed_requests": "N/A"}
//! ]"#).unwrap();
//!
//! let scene = Chart::bar()
//!     .series(SeriesDecl::bar("requests"))
//!     .series(SeriesDecl::bar("failed_requests"))
//!     .render(&data);
//!
//! assert_eq!(scene.count_of("rect"), 4);
//! let svg = SvgWriter::new().write(&scene);
//! assert!(svg.contains("viewBox=\"0 0 960 320\""));
//! ```

mod axis;
mod config;
mod data;
mod error;
pub mod insights;
mod render;
mod responsive;
mod scale;
mod series;
mod svg;

pub use axis::{
    format_value, index_ticks, tick_label, truncate_label, value_ticks, ValueTick,
    BUCKET_START_FIELD, LABEL_FIELD,
};
pub use config::{ChartConfig, DEFAULT_PALETTE};
pub use data::{
    audit_series, coerce, field_number, to_number, Coercion, CoercionAudit, Dataset, Datum,
};
pub use error::{ConfigError, DataError, DimensionError};
pub use insights::{InsightsPreset, UnknownPreset};
pub use render::{bar_width, Chart};
pub use responsive::{Dimension, FitMode, ResponsiveContainer};
pub use scale::{compute_domain, CoordinateMapper};
pub use series::{extract_series, SeriesDecl, SeriesDescriptor, SeriesKind};
pub use svg::SvgWriter;
