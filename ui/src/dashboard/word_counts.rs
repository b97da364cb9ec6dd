use api::{VideoRecord, WordCount};
use dioxus::prelude::*;
use tracing::{error, info};

use crate::{core::format, dashboard::use_services};

/// Channel history tables show at most this many terms.
const HISTORY_ROWS: usize = 20;

/// Word counts for the latest video next to the channel's historical counts.
#[component]
pub fn WordCountSection(
    #[props(!optional)] video: Option<VideoRecord>,
    channel_title: String,
) -> Element {
    let services = use_services();
    let mut loading = use_signal(|| false);
    let mut error_message = use_signal(|| None::<String>);
    let mut history = use_signal(|| None::<(String, Vec<WordCount>)>);

    let video_counts = video.and_then(|v| v.wordcount).unwrap_or_default();
    let history_counts = match &*history.read() {
        Some((title, counts)) if *title == channel_title => Some(counts.clone()),
        _ => None,
    };

    let title = channel_title.clone();
    let on_load = move |_: MouseEvent| {
        if loading() || title.trim().is_empty() {
            return;
        }
        let client = match services.client() {
            Ok(client) => client,
            Err(message) => {
                error_message.set(Some(message));
                return;
            }
        };
        let title = title.clone();
        loading.set(true);
        error_message.set(None);
        spawn(async move {
            match client.historical_wordcount(&title).await {
                Ok(counts) => {
                    info!(channel = %title, terms = counts.len(), "historical word count loaded");
                    history.set(Some((title, counts)));
                }
                Err(err) => {
                    error!(%err, "historical word count failed");
                    error_message.set(Some(format!("Couldn't load the channel's word history: {err}")));
                }
            }
            loading.set(false);
        });
    };

    rsx! {
        div { class: "word-counts",
            section { class: "dashboard-card",
                h2 { "Video word count" }
                if video_counts.is_empty() {
                    p { class: "dashboard-card__placeholder", "No word counts available." }
                } else {
                    table { class: "word-table",
                        thead { tr { th { "Word" } th { "Count" } } }
                        tbody {
                            for (word, count) in video_counts.iter() {
                                tr {
                                    td { "{word}" }
                                    td { "{format::format_count(*count as f64)}" }
                                }
                            }
                        }
                    }
                }
            }

            section { class: "dashboard-card",
                div { class: "dashboard-card__header",
                    h2 { "Channel word history" }
                    button {
                        class: "button button--secondary",
                        disabled: loading() || channel_title.trim().is_empty(),
                        onclick: on_load,
                        if loading() { "Loading…" } else { "Load history" }
                    }
                }

                if let Some(message) = error_message() {
                    p { class: "dashboard-card__error", "{message}" }
                }

                match history_counts {
                    Some(counts) if !counts.is_empty() => rsx! {
                        table { class: "word-table",
                            thead { tr { th { "Word" } th { "Count" } } }
                            tbody {
                                for entry in counts.iter().take(HISTORY_ROWS) {
                                    tr {
                                        td { "{entry.word}" }
                                        td { "{format::format_count(entry.count as f64)}" }
                                    }
                                }
                            }
                        }
                        p { class: "word-counts__note",
                            "Showing the {counts.len().min(HISTORY_ROWS)} most frequent of {counts.len()} terms."
                        }
                    },
                    Some(_) => rsx! {
                        p { class: "dashboard-card__placeholder", "No historical data available." }
                    },
                    None => rsx! {
                        p { class: "dashboard-card__placeholder", "Load the history to compare against past videos." }
                    },
                }
            }
        }
    }
}
