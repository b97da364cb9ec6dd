use api::{ChannelAnalysis, VideoRecord};
use dioxus::prelude::*;
use tracing::{error, info};

use crate::{
    core::format,
    dashboard::{format_published, use_services, ChannelState},
    stats::{metric_series, recent, ChannelComparison, MetricKind, PerfumeTally},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ComparisonTab {
    Metric(MetricKind),
    Perfumes,
}

fn tab_class(active: bool) -> &'static str {
    if active {
        "tab tab--active"
    } else {
        "tab"
    }
}

fn format_metric(kind: MetricKind, value: f64) -> String {
    match kind {
        MetricKind::Rating => format::format_number(value, 2),
        _ => format::format_count(value),
    }
}

fn format_delta(kind: MetricKind, delta: Option<f64>) -> String {
    match delta {
        Some(delta) if delta > 0.0 => format!("+{}", format_metric(kind, delta)),
        Some(delta) => format_metric(kind, delta),
        None => "—".to_string(),
    }
}

/// Side-by-side comparison of the analyzed channel with a second one.
#[component]
pub fn ComparisonPanel(#[props(!optional)] current: Option<ChannelAnalysis>) -> Element {
    let services = use_services();
    let mut other_url = use_signal(String::new);
    let mut other = use_signal(ChannelState::default);
    let mut tab = use_signal(|| ComparisonTab::Metric(MetricKind::Views));
    let limit = services.config.recent_video_limit;

    let Some(current) = current else {
        return rsx! {
            section { class: "dashboard-card comparison",
                h2 { "Channel comparison" }
                p { class: "dashboard-card__placeholder", "Analyze a channel first, then compare it with another one." }
            }
        };
    };

    let on_compare = move |_: MouseEvent| {
        if other.read().loading {
            return;
        }
        let url = other_url().trim().to_string();
        if url.is_empty() {
            return;
        }
        let client = match services.client() {
            Ok(client) => client,
            Err(message) => {
                other.set(ChannelState::failed(message));
                return;
            }
        };
        other.write().loading = true;
        spawn(async move {
            match client.analyze_channel(&url).await {
                Ok(analysis) => {
                    info!(channel = %analysis.channel_title, "comparison channel analyzed");
                    other.set(ChannelState::loaded(analysis));
                }
                Err(err) => {
                    error!(%err, "comparison channel failed");
                    other.set(ChannelState::failed(format!("Couldn't load the comparison channel: {err}")));
                }
            }
        });
    };

    let state = other();
    let selected = tab();

    rsx! {
        section { class: "dashboard-card comparison",
            h2 { "Channel comparison" }

            div { class: "comparison__form",
                input {
                    r#type: "text",
                    value: "{other_url}",
                    placeholder: "URL of the channel to compare",
                    oninput: move |evt: FormEvent| other_url.set(evt.value()),
                }
                button {
                    class: "button",
                    disabled: state.loading || other_url().trim().is_empty(),
                    onclick: on_compare,
                    if state.loading { "Loading…" } else { "Compare" }
                }
            }

            if let Some(message) = state.error.as_ref() {
                p { class: "dashboard-card__error", "{message}" }
            }

            if let Some(other_channel) = state.analysis.as_ref() {
                div { class: "comparison__body",
                    nav { class: "comparison__tabs",
                        for kind in MetricKind::ALL {
                            button {
                                class: tab_class(selected == ComparisonTab::Metric(kind)),
                                onclick: move |_| tab.set(ComparisonTab::Metric(kind)),
                                "{kind.label()}"
                            }
                        }
                        button {
                            class: tab_class(selected == ComparisonTab::Perfumes),
                            onclick: move |_| tab.set(ComparisonTab::Perfumes),
                            "Perfumes"
                        }
                    }

                    {render_tab(selected, &current, other_channel, limit)}
                }
            }
        }
    }
}

fn render_tab(
    tab: ComparisonTab,
    current: &ChannelAnalysis,
    other: &ChannelAnalysis,
    limit: usize,
) -> Element {
    let comparison = ChannelComparison::new(current, other, limit);
    match tab {
        ComparisonTab::Metric(kind) => render_series(
            kind,
            recent(&current.videos, limit),
            recent(&other.videos, limit),
            &comparison,
        ),
        ComparisonTab::Perfumes => render_perfumes(&comparison),
    }
}

fn render_series(
    kind: MetricKind,
    current: &[VideoRecord],
    other: &[VideoRecord],
    comparison: &ChannelComparison,
) -> Element {
    let current_values = metric_series(current, kind);
    let other_values = metric_series(other, kind);
    let rows = current_values.len().max(other_values.len());
    let cell = |values: &[f64], idx: usize| {
        values
            .get(idx)
            .map_or_else(|| "—".to_string(), |v| format_metric(kind, *v))
    };
    let mean = |value: Option<f64>| value.map_or_else(|| "—".to_string(), |v| format_metric(kind, v));

    rsx! {
        div { class: "table-scroll",
            table { class: "comparison-table",
                thead {
                    tr {
                        th { "Published" }
                        th { "{comparison.current.title}" }
                        th { "{comparison.other.title}" }
                    }
                }
                tbody {
                    for idx in 0..rows {
                        tr {
                            td {
                                {current.get(idx).map_or_else(|| "—".to_string(), format_published)}
                            }
                            td { "{cell(&current_values, idx)}" }
                            td { "{cell(&other_values, idx)}" }
                        }
                    }
                }
                tfoot {
                    tr {
                        th { scope: "row", "Mean" }
                        td { "{mean(comparison.current.mean(kind))}" }
                        td { "{mean(comparison.other.mean(kind))}" }
                    }
                    tr {
                        th { scope: "row", "Difference" }
                        td { colspan: "2", "{format_delta(kind, comparison.mean_delta(kind))}" }
                    }
                }
            }
        }
    }
}

fn render_perfumes(comparison: &ChannelComparison) -> Element {
    let Some(rows) = comparison.perfume_rows() else {
        return rsx! {
            p { class: "dashboard-card__placeholder",
                "Both channels need a perfume analysis on their latest video to compare perfumes."
            }
        };
    };

    rsx! {
        table { class: "comparison-table",
            thead {
                tr {
                    th { "Channel" }
                    th { "Perfumes" }
                    th { "Positive" }
                    th { "Negative" }
                    th { "Neutral" }
                    th { "Positive share" }
                }
            }
            tbody {
                for (title, tally) in rows {
                    {tally_row(title, tally)}
                }
            }
        }
    }
}

fn tally_row(title: &str, tally: PerfumeTally) -> Element {
    rsx! {
        tr {
            td { "{title}" }
            td { "{tally.total}" }
            td { "{tally.positive}" }
            td { "{tally.negative}" }
            td { "{tally.neutral}" }
            td { "{format::format_percent(tally.positive_share_pct())}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_signed() {
        assert_eq!(format_delta(MetricKind::Views, Some(1500.0)), "+1,500");
        assert_eq!(format_delta(MetricKind::Views, Some(-20.0)), "-20");
        assert_eq!(format_delta(MetricKind::Rating, Some(0.5)), "+0.50");
        assert_eq!(format_delta(MetricKind::Likes, None), "—");
    }
}
