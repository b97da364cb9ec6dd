mod stats;
pub use stats::StatsSection;

mod video;
pub use video::{ChannelInfo, LatestVideo, VideoColumn, VideoList, VideoSort};

mod perfumes;
pub use perfumes::{PerfumeAnalysisSection, PerfumeTable};

mod parameters;
pub use parameters::{ParameterColumn, ParameterSort, ParametersSection};

mod word_counts;
pub use word_counts::WordCountSection;

mod comparison;
pub use comparison::ComparisonPanel;

mod search;
pub use search::{SearchPanel, VideoQa};

mod channel_form;
pub use channel_form::ChannelForm;

mod utils;
pub(crate) use utils::*;

use api::{BackendClient, ChannelAnalysis, VideoRecord};
use dioxus::prelude::*;
use tracing::{error, info};

use crate::core::{brands::BrandCatalog, config::DashboardConfig};
use crate::stats::{recent, summarize, ChannelStats};

/// Shared services, provided once at the app root.
#[derive(Clone)]
pub struct AppServices {
    pub config: DashboardConfig,
    pub brands: BrandCatalog,
    client: Result<BackendClient, String>,
}

impl AppServices {
    pub fn from_config(config: DashboardConfig) -> Self {
        let client = BackendClient::new(config.client_config()).map_err(|err| {
            error!(%err, "backend client unavailable");
            format!("Couldn't set up the backend client: {err}")
        });
        Self {
            brands: config.brand_catalog(),
            config,
            client,
        }
    }

    pub fn client(&self) -> Result<BackendClient, String> {
        self.client.clone()
    }
}

/// The analyzed channel shown on the dashboard, or why it is missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelState {
    pub analysis: Option<ChannelAnalysis>,
    pub loading: bool,
    pub error: Option<String>,
}

impl ChannelState {
    pub fn loaded(analysis: ChannelAnalysis) -> Self {
        Self {
            analysis: Some(analysis),
            loading: false,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            analysis: None,
            loading: false,
            error: Some(message.into()),
        }
    }

    pub fn latest_video(&self) -> Option<&VideoRecord> {
        self.analysis.as_ref().and_then(ChannelAnalysis::latest_video)
    }

    /// The newest `limit` videos, in backend (newest-first) order.
    pub fn recent_videos(&self, limit: usize) -> &[VideoRecord] {
        match &self.analysis {
            Some(analysis) => recent(&analysis.videos, limit),
            None => &[],
        }
    }

    pub fn stats(&self, limit: usize) -> Option<ChannelStats> {
        summarize(self.recent_videos(limit))
    }
}

/// Install [`AppServices`] and the shared channel signal. Call once from the
/// platform's root component.
pub fn use_dashboard_provider(config: DashboardConfig) {
    use_context_provider(move || AppServices::from_config(config));
    use_context_provider(|| Signal::new(ChannelState::default()));
}

pub fn use_services() -> AppServices {
    use_context::<AppServices>()
}

pub fn use_channel() -> Signal<ChannelState> {
    use_context::<Signal<ChannelState>>()
}

/// Fetch `channel_url` into `target`. Ignored while a fetch is in flight.
pub fn analyze_channel(services: &AppServices, mut target: Signal<ChannelState>, channel_url: String) {
    if target.read().loading {
        return;
    }
    let url = channel_url.trim().to_string();
    if url.is_empty() {
        target.set(ChannelState::failed("Enter a channel URL first."));
        return;
    }
    let client = match services.client() {
        Ok(client) => client,
        Err(message) => {
            target.set(ChannelState::failed(message));
            return;
        }
    };

    target.write().loading = true;
    spawn(async move {
        match client.analyze_channel(&url).await {
            Ok(analysis) => {
                info!(
                    channel = %analysis.channel_title,
                    videos = analysis.videos.len(),
                    "channel analyzed"
                );
                target.set(ChannelState::loaded(analysis));
            }
            Err(err) => {
                error!(%err, "channel analysis failed");
                target.set(ChannelState::failed(format!("Couldn't analyze channel: {err}")));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::VideoMetric;

    fn channel(views: &[u64]) -> ChannelAnalysis {
        ChannelAnalysis {
            channel_title: "Perfumes Ana".into(),
            videos: views
                .iter()
                .map(|&v| VideoRecord {
                    metrics: VideoMetric::new(v, 0, 0),
                    ..VideoRecord::default()
                })
                .collect(),
            ..ChannelAnalysis::default()
        }
    }

    #[test]
    fn recent_videos_respects_limit() {
        let state = ChannelState::loaded(channel(&[5, 4, 3, 2, 1]));
        assert_eq!(state.recent_videos(3).len(), 3);
        assert_eq!(state.recent_videos(10).len(), 5);
        assert_eq!(state.stats(2).map(|s| s.views.mean), Some(4.5));
    }

    #[test]
    fn empty_state_has_no_stats() {
        let state = ChannelState::default();
        assert!(state.recent_videos(10).is_empty());
        assert!(state.stats(10).is_none());
        assert!(state.latest_video().is_none());
    }

    #[test]
    fn failure_clears_previous_channel() {
        let state = ChannelState::failed("boom");
        assert!(state.analysis.is_none());
        assert_eq!(state.error.as_deref(), Some("boom"));
        assert!(!state.loading);
    }
}
