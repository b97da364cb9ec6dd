use dioxus::prelude::*;

use crate::dashboard::{
    use_channel, use_services, ChannelForm, ChannelInfo, LatestVideo, ParametersSection,
    PerfumeAnalysisSection, SearchPanel, StatsSection, VideoList, VideoQa, WordCountSection,
};

#[component]
pub fn Dashboard() -> Element {
    let services = use_services();
    let channel = use_channel();

    let state = channel();
    let stats = state.stats(services.config.recent_video_limit);
    let latest = state.latest_video().cloned();
    let videos = state
        .analysis
        .as_ref()
        .map(|a| a.videos.clone())
        .unwrap_or_default();
    let channel_title = state
        .analysis
        .as_ref()
        .map(|a| a.channel_title.clone())
        .unwrap_or_default();

    rsx! {
        section { class: "page page-dashboard",
            ChannelForm {}

            if state.loading {
                p { class: "page-dashboard__loading", "Analyzing channel…" }
            }

            if let Some(analysis) = state.analysis.clone() {
                ChannelInfo { channel: analysis }
            }

            div { class: "dashboard-grid",
                LatestVideo { video: latest.clone() }
                StatsSection { stats }
            }

            VideoList { videos }

            div { class: "dashboard-grid",
                PerfumeAnalysisSection { video: latest.clone() }
                ParametersSection { video: latest.clone() }
            }

            WordCountSection { video: latest.clone(), channel_title }
            SearchPanel { video: latest.clone() }
            VideoQa { video: latest }
        }
    }
}
