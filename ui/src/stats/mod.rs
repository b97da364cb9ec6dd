//! Statistics over analyzed videos: per-channel summaries and comparison helpers.

pub mod compare;
pub mod metrics;

pub use compare::{metric_series, recent, ChannelComparison, ChannelSide, MetricKind, PerfumeTally};
pub use metrics::{summarize, ChannelStats, EngagementSummary, MetricSummary, RatioFallbacks};
