use std::cmp::Ordering;

use api::{Rating, VideoRecord};
use time::{format_description::well_known::Rfc3339, macros::format_description, OffsetDateTime};

pub(crate) fn parse_published(video: &VideoRecord) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(video.metrics.published_at.as_str(), &Rfc3339).ok()
}

/// `2024-03-05T18:30:00Z` renders as `Mar 5, 2024`. Unparseable timestamps
/// fall back to their date part.
pub(crate) fn format_published(video: &VideoRecord) -> String {
    if let Some(date) = parse_published(video) {
        if let Ok(label) = date.format(&format_description!(
            "[month repr:short] [day padding:none], [year]"
        )) {
            return label;
        }
    }
    let raw = video.metrics.published_at.as_str();
    match raw.split_once('T') {
        Some((date, _)) => date.to_string(),
        None if raw.is_empty() => "—".to_string(),
        None => raw.to_string(),
    }
}

pub(crate) fn rating_badge_class(rating: Option<Rating>) -> &'static str {
    match rating {
        Some(Rating::Positive) => "badge badge--positive",
        Some(Rating::Negative) => "badge badge--negative",
        Some(Rating::Neutral) => "badge badge--neutral",
        None => "badge badge--muted",
    }
}

pub(crate) fn rating_label(rating: Option<Rating>) -> &'static str {
    rating.map_or("Unrated", |r| r.label())
}

/// Short label for a video in tables: the title, or its id when untitled.
pub(crate) fn video_label(video: &VideoRecord) -> String {
    let title = video.title.trim();
    if title.is_empty() {
        video.video_id.clone()
    } else {
        title.to_string()
    }
}

/// Orders by `cmp`, reversed when `descending`. Missing values go last in
/// either direction.
pub(crate) fn compare_missing_last<T>(
    a: Option<T>,
    b: Option<T>,
    descending: bool,
    cmp: impl Fn(T, T) -> Ordering,
) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = cmp(a, b);
            if descending {
                ordering.reverse()
            } else {
                ordering
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub(crate) fn or_dash(value: &str) -> &str {
    if value.trim().is_empty() {
        "—"
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::VideoMetric;

    fn published(at: &str) -> VideoRecord {
        VideoRecord {
            metrics: VideoMetric {
                published_at: at.into(),
                ..VideoMetric::default()
            },
            ..VideoRecord::default()
        }
    }

    #[test]
    fn published_dates_render_short() {
        assert_eq!(format_published(&published("2024-03-05T18:30:00Z")), "Mar 5, 2024");
        assert_eq!(format_published(&published("2024-03-05T18:30")), "2024-03-05");
        assert_eq!(format_published(&published("")), "—");
    }

    #[test]
    fn untitled_videos_use_their_id() {
        let video = VideoRecord {
            video_id: "abc".into(),
            title: "  ".into(),
            ..VideoRecord::default()
        };
        assert_eq!(video_label(&video), "abc");
        assert_eq!(rating_label(None), "Unrated");
        assert_eq!(rating_badge_class(Some(Rating::Negative)), "badge badge--negative");
    }
}
