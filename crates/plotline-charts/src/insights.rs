//! Ready-made charts for the usage insights timeseries.
//!
//! The insights service returns `{ "granularity": "hour" | "day", "buckets":
//! [...] }` where each bucket carries `bucket_start`, `requests`,
//! `failed_requests`, `success_rate` (percent), `prompt_tokens`,
//! `completion_tokens`, `total_tokens` and `avg_latency_ms`.
//! [`crate::Dataset::from_json`] accepts that envelope directly.

use std::fmt;
use std::str::FromStr;

use crate::render::Chart;
use crate::series::SeriesDecl;

/// One of the standard insights charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InsightsPreset {
    /// Requests and failures per bucket, as bars
    Requests,
    /// Prompt and completion tokens, as overlapping areas
    Tokens,
    /// Average latency, as a line
    Latency,
    /// Success rate in percent, as a line
    SuccessRate,
}

impl InsightsPreset {
    /// Every preset, in dashboard order.
    pub const ALL: [Self; 4] = [Self::Requests, Self::Tokens, Self::Latency, Self::SuccessRate];

    /// Name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Requests => "requests",
            Self::Tokens => "tokens",
            Self::Latency => "latency",
            Self::SuccessRate => "success-rate",
        }
    }

    /// Chart heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Requests => "Requests",
            Self::Tokens => "Token usage",
            Self::Latency => "Average latency (ms)",
            Self::SuccessRate => "Success rate (%)",
        }
    }

    /// Build the chart with default geometry.
    #[must_use]
    pub fn chart(self) -> Chart {
        let chart = match self {
            Self::Requests => Chart::bar().add_series([
                SeriesDecl::bar("requests").stroke("#2563eb").name("Requests"),
                SeriesDecl::bar("failed_requests").stroke("#ef4444").name("Failed"),
            ]),
            Self::Tokens => Chart::area().add_series([
                SeriesDecl::area("prompt_tokens")
                    .stroke("#8b5cf6")
                    .fill_opacity(0.25)
                    .name("Prompt"),
                SeriesDecl::area("completion_tokens")
                    .stroke("#10b981")
                    .fill_opacity(0.25)
                    .name("Completion"),
            ]),
            Self::Latency => Chart::line()
                .series(SeriesDecl::line("avg_latency_ms").stroke("#f59e0b").name("Avg latency")),
            Self::SuccessRate => Chart::line()
                .series(SeriesDecl::line("success_rate").stroke("#10b981").name("Success rate")),
        };
        chart.title(self.title())
    }
}

impl fmt::Display for InsightsPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown preset '{0}' (expected requests, tokens, latency or success-rate)")]
pub struct UnknownPreset(pub String);

impl FromStr for InsightsPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "requests" => Ok(Self::Requests),
            "tokens" => Ok(Self::Tokens),
            "latency" => Ok(Self::Latency),
            "success-rate" => Ok(Self::SuccessRate),
            _ => Err(UnknownPreset(s.to_string())),
        }
    }
}
