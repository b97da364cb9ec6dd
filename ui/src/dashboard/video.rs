use api::{ChannelAnalysis, VideoRecord};
use dioxus::prelude::*;

use crate::{
    core::{
        brands::{BrandCatalog, TitleSegment},
        format,
    },
    dashboard::{
        compare_missing_last, format_published, or_dash, parse_published, use_services, video_label,
    },
};

#[component]
pub fn ChannelInfo(channel: ChannelAnalysis) -> Element {
    let count = channel.videos.len();
    rsx! {
        section { class: "dashboard-card channel-info",
            h2 { "{or_dash(&channel.channel_title)}" }
            if !channel.description.trim().is_empty() {
                p { class: "channel-info__description", "{channel.description}" }
            }
            span { class: "channel-info__count", "{count} videos analyzed" }
        }
    }
}

/// Embedded player for the newest video, with catalog brands highlighted in
/// its title.
#[component]
pub fn LatestVideo(#[props(!optional)] video: Option<VideoRecord>) -> Element {
    let services = use_services();

    rsx! {
        section { class: "dashboard-card latest-video",
            div { class: "dashboard-card__header",
                h2 { "Latest video" }
            }

            match video {
                Some(video) => render_video(&video, &services.brands),
                None => rsx! {
                    p { class: "dashboard-card__placeholder", "No videos to show yet." }
                },
            }
        }
    }
}

fn render_video(video: &VideoRecord, brands: &BrandCatalog) -> Element {
    let segments = brands.highlight(&video_label(video));
    let embed = video.embed_url();
    let published = format_published(video);
    let metrics = &video.metrics;

    rsx! {
        div { class: "latest-video__player",
            iframe {
                src: "{embed}",
                title: "{video.title}",
                width: "100%",
                height: "315",
            }
        }
        h3 { class: "latest-video__title", {render_title(segments)} }
        ul { class: "latest-video__facts",
            li { "Published {published}" }
            li { "{format::format_count(metrics.views as f64)} views" }
            li { "{format::format_count(metrics.likes as f64)} likes" }
            li { "{format::format_count(metrics.comments_count as f64)} comments" }
            if let Some(stars) = metrics.average_stars {
                li { "Rating {format::format_stars(stars, true)}" }
            }
        }
        a {
            class: "latest-video__link",
            href: "{video.watch_url()}",
            target: "_blank",
            rel: "noopener",
            "Watch on YouTube"
        }
    }
}

fn render_title(segments: Vec<TitleSegment>) -> Element {
    rsx! {
        for segment in segments {
            match segment {
                TitleSegment::Plain(text) => rsx! { span { "{text}" } },
                TitleSegment::Brand { text, brand } => rsx! {
                    strong { class: "latest-video__brand", title: "{brand}", "{text}" }
                },
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoColumn {
    Title,
    Published,
    Views,
    Likes,
    Comments,
    Rating,
}

impl VideoColumn {
    pub const ALL: [VideoColumn; 6] = [
        Self::Title,
        Self::Published,
        Self::Views,
        Self::Likes,
        Self::Comments,
        Self::Rating,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Published => "Published",
            Self::Views => "Views",
            Self::Likes => "Likes",
            Self::Comments => "Comments",
            Self::Rating => "Average rating",
        }
    }

    fn count(&self, video: &VideoRecord) -> Option<u64> {
        let metrics = &video.metrics;
        match self {
            Self::Views => Some(metrics.views),
            Self::Likes => Some(metrics.likes),
            Self::Comments => Some(metrics.comments_count),
            _ => None,
        }
    }
}

fn rating(video: &VideoRecord) -> Option<f64> {
    video.metrics.average_stars.filter(|stars| stars.is_finite())
}

/// Same toggling as the parameters table: a new column sorts ascending, the
/// same column again flips direction. `None` keeps backend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct VideoSort {
    pub column: Option<VideoColumn>,
    pub descending: bool,
}

impl VideoSort {
    pub fn toggle(self, column: VideoColumn) -> Self {
        let descending = self.column == Some(column) && !self.descending;
        Self {
            column: Some(column),
            descending,
        }
    }

    /// Stable sort. Unrated videos and unparseable dates go last either way.
    pub fn apply(&self, videos: &mut [VideoRecord]) {
        let Some(column) = self.column else {
            return;
        };
        let descending = self.descending;
        videos.sort_by(|a, b| match column {
            VideoColumn::Title => compare_missing_last(
                Some(video_label(a).to_lowercase()),
                Some(video_label(b).to_lowercase()),
                descending,
                |x, y| x.cmp(&y),
            ),
            VideoColumn::Published => {
                compare_missing_last(parse_published(a), parse_published(b), descending, |x, y| {
                    x.cmp(&y)
                })
            }
            VideoColumn::Rating => {
                compare_missing_last(rating(a), rating(b), descending, |x, y| x.total_cmp(&y))
            }
            _ => compare_missing_last(column.count(a), column.count(b), descending, |x, y| {
                x.cmp(&y)
            }),
        });
    }

    fn indicator(&self, column: VideoColumn) -> &'static str {
        match (self.column == Some(column), self.descending) {
            (false, _) => "",
            (true, false) => " ▲",
            (true, true) => " ▼",
        }
    }
}

/// Every analyzed video in a table sortable by any column, brands in bold.
#[component]
pub fn VideoList(videos: Vec<VideoRecord>) -> Element {
    let services = use_services();
    let mut sort = use_signal(VideoSort::default);

    let current_sort = sort();
    let mut sorted = videos;
    current_sort.apply(&mut sorted);

    rsx! {
        section { class: "dashboard-card video-list",
            div { class: "dashboard-card__header",
                h2 { "Latest videos" }
            }

            if sorted.is_empty() {
                p { class: "dashboard-card__placeholder", "Analyze a channel to see its latest videos." }
            } else {
                div { class: "table-scroll",
                    table { class: "video-table",
                        thead {
                            tr {
                                for column in VideoColumn::ALL {
                                    th {
                                        class: "sortable",
                                        onclick: move |_| sort.set(current_sort.toggle(column)),
                                        "{column.label()}{current_sort.indicator(column)}"
                                    }
                                }
                            }
                        }
                        tbody {
                            for video in sorted.iter() {
                                {render_video_row(video, &services.brands)}
                            }
                        }
                    }
                }
                p { class: "dashboard-card__hint",
                    "Click a header to sort. Ratings come from a sentiment model run over each video's latest comments."
                }
            }
        }
    }
}

fn render_video_row(video: &VideoRecord, brands: &BrandCatalog) -> Element {
    let metrics = &video.metrics;
    let stars = rating(video).map_or_else(|| "—".to_string(), |s| format::format_number(s, 2));

    rsx! {
        tr {
            td {
                a {
                    class: "video-table__link",
                    href: "{video.watch_url()}",
                    target: "_blank",
                    rel: "noopener",
                    {render_title(brands.highlight(&video_label(video)))}
                }
            }
            td { "{format_published(video)}" }
            td { "{format::format_count(metrics.views as f64)}" }
            td { "{format::format_count(metrics.likes as f64)}" }
            td { "{format::format_count(metrics.comments_count as f64)}" }
            td { "{stars}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::VideoMetric;

    fn video(title: &str, published_at: &str, views: u64, stars: Option<f64>) -> VideoRecord {
        VideoRecord {
            video_id: title.to_lowercase(),
            title: title.into(),
            metrics: VideoMetric {
                views,
                average_stars: stars,
                published_at: published_at.into(),
                ..VideoMetric::default()
            },
            ..VideoRecord::default()
        }
    }

    fn titles(videos: &[VideoRecord]) -> Vec<&str> {
        videos.iter().map(|v| v.title.as_str()).collect()
    }

    fn sample() -> Vec<VideoRecord> {
        vec![
            video("sauvage review", "2024-03-05T18:30:00Z", 500, None),
            video("Aventus vs clones", "2024-01-10T09:00:00Z", 1500, Some(4.2)),
            video("Baccarat Rouge", "not a date", 900, Some(3.1)),
        ]
    }

    #[test]
    fn default_sort_keeps_backend_order() {
        let mut videos = sample();
        VideoSort::default().apply(&mut videos);
        assert_eq!(titles(&videos), vec!["sauvage review", "Aventus vs clones", "Baccarat Rouge"]);
    }

    #[test]
    fn toggle_flips_direction_on_same_column() {
        let sort = VideoSort::default().toggle(VideoColumn::Views);
        assert_eq!(sort.column, Some(VideoColumn::Views));
        assert!(!sort.descending);
        assert!(sort.toggle(VideoColumn::Views).descending);
        assert!(!sort.toggle(VideoColumn::Views).toggle(VideoColumn::Likes).descending);
    }

    #[test]
    fn views_sort_both_ways() {
        let mut videos = sample();
        let ascending = VideoSort::default().toggle(VideoColumn::Views);
        ascending.apply(&mut videos);
        assert_eq!(titles(&videos), vec!["sauvage review", "Baccarat Rouge", "Aventus vs clones"]);

        ascending.toggle(VideoColumn::Views).apply(&mut videos);
        assert_eq!(titles(&videos), vec!["Aventus vs clones", "Baccarat Rouge", "sauvage review"]);
    }

    #[test]
    fn unrated_videos_sort_last_both_ways() {
        let mut videos = sample();
        let ascending = VideoSort::default().toggle(VideoColumn::Rating);
        ascending.apply(&mut videos);
        assert_eq!(titles(&videos), vec!["Baccarat Rouge", "Aventus vs clones", "sauvage review"]);

        ascending.toggle(VideoColumn::Rating).apply(&mut videos);
        assert_eq!(titles(&videos), vec!["Aventus vs clones", "Baccarat Rouge", "sauvage review"]);
    }

    #[test]
    fn titles_ignore_case_and_bad_dates_sort_last() {
        let mut videos = sample();
        VideoSort::default().toggle(VideoColumn::Title).apply(&mut videos);
        assert_eq!(titles(&videos), vec!["Aventus vs clones", "Baccarat Rouge", "sauvage review"]);

        let newest_first = VideoSort::default()
            .toggle(VideoColumn::Published)
            .toggle(VideoColumn::Published);
        newest_first.apply(&mut videos);
        assert_eq!(titles(&videos), vec!["sauvage review", "Aventus vs clones", "Baccarat Rouge"]);
    }

    #[test]
    fn untitled_videos_sort_by_their_id() {
        let mut videos = vec![video("zeta", "", 0, None), video("", "", 0, None)];
        videos[1].video_id = "abc".into();
        VideoSort::default().toggle(VideoColumn::Title).apply(&mut videos);
        assert_eq!(videos[0].video_id, "abc");
    }
}
