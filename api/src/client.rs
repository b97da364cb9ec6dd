//! Async HTTP client for the analysis backend.

use std::time::Duration;

use reqwest::{Client as HttpClient, Response, Url};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::normalize::{normalize_body, NormalizationError, NormalizedAnalysisResponse};
use crate::types::*;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid backend URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the analysis backend, e.g. `http://127.0.0.1:8000`.
    pub base_url: String,
    /// Request timeout. Only honoured on native targets; browsers apply their own.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join `path` onto the base URL without doubling or dropping slashes.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    config: ClientConfig,
    http: HttpClient,
}

impl BackendClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = HttpClient::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let http = builder.build()?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// `POST /api/analyze`: channel metadata and its latest videos.
    pub async fn analyze_channel(&self, channel_url: &str) -> Result<ChannelAnalysis> {
        info!(channel_url, "analyzing channel");
        self.post_json(
            "/api/analyze",
            &AnalyzeRequest {
                url: channel_url.to_string(),
            },
        )
        .await
    }

    /// `POST /api/analyze-perfumes`. The body is normalized because the
    /// backend may double-encode it.
    pub async fn analyze_perfumes(&self, video: &VideoRecord) -> Result<NormalizedAnalysisResponse> {
        let request = PerfumeAnalysisRequest {
            video_url: video.watch_url(),
        };
        info!(video_url = %request.video_url, "requesting perfume analysis");
        let response = self.send_post("/api/analyze-perfumes", &request).await?;
        let body = response.text().await?;
        debug!(bytes = body.len(), "perfume analysis body received");
        Ok(normalize_body(&body)?)
    }

    /// `GET /api/historical-wordcount/{channel}`.
    pub async fn historical_wordcount(&self, channel_title: &str) -> Result<Vec<WordCount>> {
        let url = self.segment_url("/api/historical-wordcount", channel_title)?;
        let response = self.http.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    /// `POST /api/define`.
    pub async fn define_term(&self, term: &str) -> Result<DefineResponse> {
        self.post_json(
            "/api/define",
            &DefineRequest {
                term: term.to_string(),
            },
        )
        .await
    }

    /// `POST /api/query`: natural-language query over the analyzed corpus.
    pub async fn query(&self, question: &str) -> Result<QueryResponse> {
        self.post_json(
            "/api/query",
            &QueryRequest {
                question: question.to_string(),
            },
        )
        .await
    }

    /// `POST /api/ask_question`: Q&A over a single video's transcript.
    pub async fn ask_question(&self, video: &VideoRecord, question: &str) -> Result<AnswerResponse> {
        self.post_json(
            "/api/ask_question",
            &QuestionRequest {
                video_url: video.watch_url(),
                question: question.trim().to_string(),
            },
        )
        .await
    }

    /// `POST /api/parameters`: per-perfume scores for one video.
    pub async fn parameters(&self, video: &VideoRecord) -> Result<ParametersResponse> {
        self.post_json(
            "/api/parameters",
            &ParametersRequest {
                video_url: video.watch_url(),
            },
        )
        .await
    }

    /// `POST /api/feedback`.
    pub async fn send_feedback(&self, feedback: &FeedbackData) -> Result<()> {
        self.send_post("/api/feedback", feedback).await?;
        Ok(())
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send_post(path, body).await?;
        Ok(response.json::<T>().await?)
    }

    async fn send_post<B>(&self, path: &str, body: &B) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = self.config.endpoint(path);
        debug!(%url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        check_status(response).await
    }

    fn segment_url(&self, path: &str, segment: &str) -> Result<Url> {
        let raw = self.config.endpoint(path);
        let invalid = |reason: String| ApiError::InvalidUrl {
            url: raw.clone(),
            reason,
        };
        let mut url = Url::parse(&raw).map_err(|err| invalid(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| invalid("base URL cannot carry a path".into()))?
            .push(segment);
        Ok(url)
    }
}

/// Turn non-2xx responses into [`ApiError::Status`], surfacing FastAPI's
/// `detail` message when present.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        message: error_detail(&body),
    })
}

fn error_detail(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => match map.get("detail") {
            Some(Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => body.to_string(),
        },
        _ => body.to_string(),
    }
}
