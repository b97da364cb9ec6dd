use api::{PerfumeMention, VideoRecord};
use dioxus::prelude::*;
use tracing::{debug, error, info};

use crate::dashboard::{or_dash, rating_badge_class, rating_label, use_services};

#[component]
pub fn PerfumeTable(perfumes: Vec<PerfumeMention>) -> Element {
    if perfumes.is_empty() {
        return rsx! {
            p { class: "dashboard-card__placeholder", "No perfume data found in this video." }
        };
    }

    rsx! {
        div { class: "table-scroll",
            table { class: "perfume-table",
                thead {
                    tr {
                        th { "Brand" }
                        th { "Name" }
                        th { "Description" }
                        th { "Rating" }
                        th { "Why" }
                    }
                }
                tbody {
                    for perfume in perfumes.iter() {
                        tr {
                            td { "{or_dash(&perfume.brand)}" }
                            td { "{or_dash(&perfume.name)}" }
                            td { "{or_dash(&perfume.description)}" }
                            td {
                                span { class: rating_badge_class(perfume.rating), "{rating_label(perfume.rating)}" }
                            }
                            td { "{or_dash(&perfume.rating_reason)}" }
                        }
                    }
                }
            }
        }
    }
}

/// The video id to analyze automatically, unless it was already requested.
fn pending_analysis(video: Option<&VideoRecord>, requested: Option<&str>) -> Option<String> {
    let id = video.map(|v| v.video_id.as_str()).filter(|id| !id.is_empty())?;
    (requested != Some(id)).then(|| id.to_string())
}

/// Perfume mentions for one video. Shows what the channel analysis already
/// carried, requests a fresh extraction once per new video, and offers a
/// button to run it again.
#[component]
pub fn PerfumeAnalysisSection(#[props(!optional)] video: Option<VideoRecord>) -> Element {
    let services = use_services();
    let mut loading = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);
    // Fetched mentions, tagged with the video they belong to.
    let mut fetched = use_signal(|| None::<(String, Vec<PerfumeMention>)>);
    let mut requested = use_signal(|| None::<String>);

    let analyze = use_callback(move |video: VideoRecord| {
        if *loading.peek() {
            return;
        }
        let client = match services.client() {
            Ok(client) => client,
            Err(message) => {
                error_message.set(Some(message));
                return;
            }
        };
        loading.set(true);
        error_message.set(None);
        spawn(async move {
            match client.analyze_perfumes(&video).await {
                Ok(response) => {
                    let mentions = response.perfumes.unwrap_or_default();
                    info!(video_id = %video.video_id, perfumes = mentions.len(), "perfume analysis ready");
                    fetched.set(Some((video.video_id.clone(), mentions)));
                }
                Err(err) => {
                    error!(%err, "perfume analysis failed");
                    error_message.set(Some(format!("Couldn't analyze perfumes: {err}")));
                }
            }
            loading.set(false);
        });
    });

    use_effect(use_reactive((&video,), move |(video,)| {
        let Some(id) = pending_analysis(video.as_ref(), requested.peek().as_deref()) else {
            return;
        };
        if let Some(video) = video {
            debug!(video_id = %id, "requesting perfume analysis for new video");
            requested.set(Some(id));
            analyze.call(video);
        }
    }));

    let Some(video) = video else {
        return rsx! {
            section { class: "dashboard-card perfume-section",
                h2 { "Perfume analysis" }
                p { class: "dashboard-card__placeholder", "Analyze a channel to see its perfume mentions." }
            }
        };
    };

    let perfumes = match &*fetched.read() {
        Some((id, mentions)) if *id == video.video_id => mentions.clone(),
        _ => video.perfume_analysis.clone().unwrap_or_default(),
    };

    rsx! {
        section { class: "dashboard-card perfume-section",
            div { class: "dashboard-card__header",
                h2 { "Perfume analysis" }
                button {
                    class: "button button--secondary",
                    disabled: loading(),
                    onclick: move |_| analyze.call(video.clone()),
                    if loading() { "Analyzing…" } else { "Analyze perfumes" }
                }
            }

            if let Some(message) = error_message() {
                p { class: "dashboard-card__error", "{message}" }
            }

            if loading() {
                p { class: "dashboard-card__placeholder", "Analyzing perfumes..." }
            } else {
                PerfumeTable { perfumes }
            }
        }
    }
}
