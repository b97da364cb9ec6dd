use dioxus::prelude::*;

use crate::{
    core::format,
    stats::{ChannelStats, MetricSummary},
};

/// Engagement ratios and descriptive statistics for the recent videos.
#[component]
pub fn StatsSection(#[props(!optional)] stats: Option<ChannelStats>) -> Element {
    rsx! {
        section { class: "dashboard-card stats-section",
            div { class: "dashboard-card__header",
                h2 { "Channel statistics" }
            }

            match stats {
                Some(stats) => render_stats(&stats),
                None => rsx! {
                    p { class: "dashboard-card__placeholder", "Analyze a channel to see statistics." }
                },
            }
        }
    }
}

fn render_stats(stats: &ChannelStats) -> Element {
    let engagement = stats.engagement;
    let fallbacks = engagement.fallbacks;

    rsx! {
        p { class: "stats-section__sample", "Based on the latest {stats.sample_size} videos." }

        table { class: "stats-table",
            thead {
                tr {
                    th { "Metric" }
                    th { "Value" }
                }
            }
            tbody {
                tr { td { "Engagement rate" } td { "{format::format_percent(engagement.engagement_rate)}" } }
                tr { td { "Views growth" } td { "{format::format_percent(engagement.views_growth_pct)}" } }
                tr { td { "Likes per view" } td { "{format::format_percent(engagement.likes_per_view_pct)}" } }
                tr { td { "Comments per view" } td { "{format::format_percent(engagement.comments_per_view_pct)}" } }
                tr {
                    td { "Average rating" }
                    td { "{format::format_stars(engagement.average_stars, engagement.has_ratings())}" }
                }
            }
        }

        if fallbacks.zero_mean_views {
            p { class: "stats-section__note", "These videos have no views yet, so per-view ratios show 0%." }
        }
        if fallbacks.growth_baseline_zero {
            p { class: "stats-section__note", "The oldest video has no views, so growth can't be measured." }
        }

        table { class: "stats-table stats-table--descriptive",
            thead {
                tr {
                    th { "" }
                    th { "Min" }
                    th { "Max" }
                    th { "Mean" }
                    th { "Median" }
                    th { "Std. dev." }
                }
            }
            tbody {
                {summary_row("Views", &stats.views)}
                {summary_row("Likes", &stats.likes)}
                {summary_row("Comments", &stats.comments)}
            }
        }
    }
}

fn summary_row(label: &str, summary: &MetricSummary) -> Element {
    rsx! {
        tr {
            th { scope: "row", "{label}" }
            td { "{format::format_count(summary.min)}" }
            td { "{format::format_count(summary.max)}" }
            td { "{format::format_number(summary.mean, 1)}" }
            td { "{format::format_number(summary.median, 1)}" }
            td { "{format::format_number(summary.std_dev, 1)}" }
        }
    }
}
