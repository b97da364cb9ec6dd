//! Helpers for the two-channel comparison view.

use api::{ChannelAnalysis, PerfumeMention, Rating, VideoMetric};
use serde::{Deserialize, Serialize};

use super::metrics::{summarize, ChannelStats};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    Views,
    Likes,
    Comments,
    Rating,
}

impl MetricKind {
    pub const ALL: [MetricKind; 4] = [Self::Views, Self::Likes, Self::Comments, Self::Rating];

    /// Unrated videos count as `0` so series stay aligned with the video list.
    pub fn value(&self, video: &VideoMetric) -> f64 {
        match self {
            Self::Views => video.views as f64,
            Self::Likes => video.likes as f64,
            Self::Comments => video.comments_count as f64,
            Self::Rating => video
                .average_stars
                .filter(|stars| stars.is_finite())
                .unwrap_or(0.0),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Views => "Views",
            Self::Likes => "Likes",
            Self::Comments => "Comments",
            Self::Rating => "Average rating",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Self::Views => "views",
            Self::Likes => "likes",
            Self::Comments => "comments",
            Self::Rating => "rating",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.key() == key)
    }
}

/// The newest `limit` videos of a newest-first list. Dashboard statistics and
/// the comparison both read this window.
pub fn recent<V>(videos: &[V], limit: usize) -> &[V] {
    &videos[..videos.len().min(limit)]
}

pub fn metric_series<V: AsRef<VideoMetric>>(videos: &[V], kind: MetricKind) -> Vec<f64> {
    videos.iter().map(|v| kind.value(v.as_ref())).collect()
}

/// Counts of perfume mentions by rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PerfumeTally {
    pub total: usize,
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub unrated: usize,
}

impl PerfumeTally {
    pub fn from_mentions(mentions: &[PerfumeMention]) -> Self {
        let mut tally = Self {
            total: mentions.len(),
            ..Self::default()
        };
        for mention in mentions {
            match mention.rating {
                Some(Rating::Positive) => tally.positive += 1,
                Some(Rating::Negative) => tally.negative += 1,
                Some(Rating::Neutral) => tally.neutral += 1,
                None => tally.unrated += 1,
            }
        }
        tally
    }

    /// Share of rated mentions that are positive, in percent.
    pub fn positive_share_pct(&self) -> f64 {
        let rated = self.positive + self.negative + self.neutral;
        if rated == 0 {
            0.0
        } else {
            self.positive as f64 / rated as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSide {
    pub title: String,
    pub stats: Option<ChannelStats>,
    /// Tally over the latest video's perfume analysis; `None` when the
    /// backend did not provide one.
    pub perfumes: Option<PerfumeTally>,
}

impl ChannelSide {
    pub fn from_analysis(channel: &ChannelAnalysis, limit: usize) -> Self {
        Self {
            title: channel.channel_title.clone(),
            stats: summarize(recent(&channel.videos, limit)),
            perfumes: channel
                .latest_video()
                .and_then(|video| video.perfume_analysis.as_deref())
                .map(PerfumeTally::from_mentions),
        }
    }

    pub fn mean(&self, kind: MetricKind) -> Option<f64> {
        let stats = self.stats.as_ref()?;
        match kind {
            MetricKind::Views => Some(stats.views.mean),
            MetricKind::Likes => Some(stats.likes.mean),
            MetricKind::Comments => Some(stats.comments.mean),
            MetricKind::Rating => stats
                .engagement
                .has_ratings()
                .then_some(stats.engagement.average_stars),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelComparison {
    pub current: ChannelSide,
    pub other: ChannelSide,
}

impl ChannelComparison {
    /// Both sides are summarized over their newest `limit` videos.
    pub fn new(current: &ChannelAnalysis, other: &ChannelAnalysis, limit: usize) -> Self {
        Self {
            current: ChannelSide::from_analysis(current, limit),
            other: ChannelSide::from_analysis(other, limit),
        }
    }

    /// `current - other` on the metric's mean; `None` when either side has
    /// no data for it.
    pub fn mean_delta(&self, kind: MetricKind) -> Option<f64> {
        Some(self.current.mean(kind)? - self.other.mean(kind)?)
    }

    /// Both perfume tables are only shown when both channels have one.
    pub fn perfume_rows(&self) -> Option<[(&str, PerfumeTally); 2]> {
        Some([
            (self.current.title.as_str(), self.current.perfumes?),
            (self.other.title.as_str(), self.other.perfumes?),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::VideoRecord;

    fn record(views: u64, likes: u64, stars: Option<f64>) -> VideoRecord {
        let mut metrics = VideoMetric::new(views, likes, 0);
        metrics.average_stars = stars;
        VideoRecord {
            metrics,
            ..VideoRecord::default()
        }
    }

    fn mention(rating: Option<Rating>) -> PerfumeMention {
        PerfumeMention {
            rating,
            ..PerfumeMention::default()
        }
    }

    #[test]
    fn series_follow_video_order() {
        let videos = vec![record(30, 3, Some(4.0)), record(10, 1, None)];
        assert_eq!(metric_series(&videos, MetricKind::Views), vec![30.0, 10.0]);
        assert_eq!(metric_series(&videos, MetricKind::Rating), vec![4.0, 0.0]);
    }

    #[test]
    fn metric_keys_round_trip() {
        for kind in MetricKind::ALL {
            assert_eq!(MetricKind::from_key(kind.key()), Some(kind));
        }
        assert_eq!(MetricKind::from_key("perfumes"), None);
    }

    #[test]
    fn tally_counts_by_rating() {
        let tally = PerfumeTally::from_mentions(&[
            mention(Some(Rating::Positive)),
            mention(Some(Rating::Positive)),
            mention(Some(Rating::Negative)),
            mention(None),
        ]);
        assert_eq!(tally.total, 4);
        assert_eq!(tally.positive, 2);
        assert_eq!(tally.negative, 1);
        assert_eq!(tally.unrated, 1);
        assert!((tally.positive_share_pct() - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(PerfumeTally::default().positive_share_pct(), 0.0);
    }

    #[test]
    fn comparison_deltas_and_perfume_rows() {
        let mut current = ChannelAnalysis {
            channel_title: "Perfumes Ana".into(),
            videos: vec![record(200, 20, Some(4.0)), record(100, 10, None)],
            ..ChannelAnalysis::default()
        };
        current.videos[0].perfume_analysis = Some(vec![mention(Some(Rating::Positive))]);

        let other = ChannelAnalysis {
            channel_title: "Olfato".into(),
            videos: vec![record(50, 5, None)],
            ..ChannelAnalysis::default()
        };

        let comparison = ChannelComparison::new(&current, &other, 10);
        assert_eq!(comparison.mean_delta(MetricKind::Views), Some(100.0));
        assert_eq!(comparison.mean_delta(MetricKind::Rating), None);
        assert!(comparison.perfume_rows().is_none());
        assert_eq!(comparison.current.perfumes.map(|t| t.positive), Some(1));
    }

    #[test]
    fn comparison_means_use_the_recent_window() {
        let channel = ChannelAnalysis {
            channel_title: "Perfumes Ana".into(),
            videos: vec![record(300, 0, None), record(100, 0, None), record(5000, 0, None)],
            ..ChannelAnalysis::default()
        };

        let side = ChannelSide::from_analysis(&channel, 2);
        assert_eq!(side.mean(MetricKind::Views), Some(200.0));
        let stats = summarize(recent(&channel.videos, 2)).unwrap();
        assert_eq!(side.stats, Some(stats));

        assert_eq!(recent(&channel.videos, 10).len(), 3);
        assert!(recent(&channel.videos, 0).is_empty());
    }
}
