//! Backend contract for Channelscope: request/response records, the payload
//! normalizer and an async HTTP client for the analysis service.

pub mod client;
pub mod normalize;
pub mod types;

pub use client::{ApiError, BackendClient, ClientConfig, DEFAULT_BASE_URL};
pub use normalize::{
    normalize, normalize_body, AnalysisField, NormalizationError, NormalizationErrorKind,
    NormalizedAnalysisResponse, PerfumeMention, Rating,
};
pub use types::{ChannelAnalysis, VideoMetric, VideoRecord, WordCount};
