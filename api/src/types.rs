//! Request and response records for the analysis backend.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::normalize::PerfumeMention;

/// Numeric facts about one analyzed video. These are the only fields the
/// statistics helpers look at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoMetric {
    #[serde(default, deserialize_with = "count_or_zero")]
    pub views: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub likes: u64,
    #[serde(default, deserialize_with = "count_or_zero")]
    pub comments_count: u64,
    /// Mean sentiment rating in `[0, 5]`; absent when sentiment was not computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_stars: Option<f64>,
    /// RFC 3339 publication timestamp.
    #[serde(default, alias = "published_date")]
    pub published_at: String,
}

/// The backend sends `null` for counts YouTube hides.
fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or_default())
}

impl VideoMetric {
    pub fn new(views: u64, likes: u64, comments_count: u64) -> Self {
        Self {
            views,
            likes,
            comments_count,
            ..Self::default()
        }
    }

    pub fn with_stars(mut self, stars: f64) -> Self {
        self.average_stars = Some(stars);
        self
    }
}

impl AsRef<VideoMetric> for VideoMetric {
    fn as_ref(&self) -> &VideoMetric {
        self
    }
}

/// A video as returned by `/api/analyze`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct VideoRecord {
    #[serde(default, alias = "videoId")]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub metrics: VideoMetric,
    /// AI-written summary of the transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// `(word, count)` pairs for the most frequent terms in the transcript.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wordcount: Option<Vec<(String, u32)>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::normalize::deserialize_perfumes"
    )]
    pub perfume_analysis: Option<Vec<PerfumeMention>>,
}

impl VideoRecord {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }

    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.video_id)
    }
}

impl AsRef<VideoMetric> for VideoRecord {
    fn as_ref(&self) -> &VideoMetric {
        &self.metrics
    }
}

/// Channel overview returned by `/api/analyze`. Videos arrive newest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChannelAnalysis {
    #[serde(default)]
    pub channel_title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub videos: Vec<VideoRecord>,
}

impl ChannelAnalysis {
    pub fn latest_video(&self) -> Option<&VideoRecord> {
        self.videos.first()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCount {
    pub word: String,
    pub count: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PerfumeAnalysisRequest {
    pub video_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DefineRequest {
    pub term: String,
}

/// A term definition together with the prompts that produced it, so the
/// prompts can be echoed back with feedback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefineResponse {
    pub definition: String,
    #[serde(default)]
    pub prompt_system: Option<String>,
    #[serde(default)]
    pub prompt_user: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest {
    pub question: String,
}

/// Natural-language query results. The backend answers with free-form JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub results: Value,
}

impl QueryResponse {
    pub fn has_results(&self) -> bool {
        match &self.results {
            Value::Null => false,
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::String(text) => !text.trim().is_empty(),
            _ => true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionRequest {
    pub video_url: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    #[serde(default)]
    pub video_id: String,
    #[serde(default)]
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParametersRequest {
    pub video_url: String,
}

/// Per-perfume scores (1-10) extracted from a review transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PerfumeParameter {
    #[serde(default)]
    pub perfume_name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default, alias = "fragancia")]
    pub fragrance: Option<i64>,
    #[serde(default, alias = "duracion")]
    pub longevity: Option<i64>,
    #[serde(default, alias = "diseno")]
    pub design: Option<i64>,
    #[serde(default, alias = "calidad")]
    pub quality: Option<i64>,
    #[serde(default, alias = "precio")]
    pub price: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParametersResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub perfumes: Vec<PerfumeParameter>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Which surface a piece of feedback was left on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Summary,
    Query,
    Definition,
    Answer,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackData {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    /// Whether the user found the content useful.
    pub result: bool,
    /// The text being rated (summary, query results, definition).
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}
