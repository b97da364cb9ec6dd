//! Descriptive statistics over a channel's recent videos.
//!
//! Standard deviation is the *population* deviation (divide by `N`): the
//! input is the complete set of recent videos, not a sample of a larger one.
//!
//! Ratios never produce NaN or infinity. When a denominator is zero the
//! ratio is `0.0` and the matching flag in [`RatioFallbacks`] is set so the
//! view can say so.

use api::VideoMetric;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct MetricSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
}

impl MetricSummary {
    /// `None` for an empty slice.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = mean(&sorted);
        Some(Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            median: median(&sorted),
            std_dev: population_std_dev(&sorted, mean),
        })
    }
}

/// Which ratios fell back to `0.0` because their denominator was zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RatioFallbacks {
    /// Mean views is zero: engagement and per-view ratios are `0.0`.
    pub zero_mean_views: bool,
    /// Oldest video has zero views: growth is `0.0`.
    pub growth_baseline_zero: bool,
}

impl RatioFallbacks {
    pub fn any(&self) -> bool {
        self.zero_mean_views || self.growth_baseline_zero
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct EngagementSummary {
    /// `(mean likes + mean comments) / mean views`, in percent.
    pub engagement_rate: f64,
    /// Newest vs oldest video views, in percent.
    pub views_growth_pct: f64,
    pub likes_per_view_pct: f64,
    pub comments_per_view_pct: f64,
    /// Mean over rated videos only; `0.0` when `rated_videos == 0`.
    pub average_stars: f64,
    pub rated_videos: usize,
    pub fallbacks: RatioFallbacks,
}

impl EngagementSummary {
    pub fn has_ratings(&self) -> bool {
        self.rated_videos > 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub sample_size: usize,
    pub views: MetricSummary,
    pub likes: MetricSummary,
    pub comments: MetricSummary,
    pub engagement: EngagementSummary,
}

/// Summarize a newest-first list of videos. `None` means there is nothing to
/// summarize yet (no channel analyzed, or a channel without videos).
pub fn summarize<V: AsRef<VideoMetric>>(videos: &[V]) -> Option<ChannelStats> {
    if videos.is_empty() {
        return None;
    }

    let views: Vec<f64> = videos.iter().map(|v| v.as_ref().views as f64).collect();
    let likes: Vec<f64> = videos.iter().map(|v| v.as_ref().likes as f64).collect();
    let comments: Vec<f64> = videos
        .iter()
        .map(|v| v.as_ref().comments_count as f64)
        .collect();
    let stars: Vec<f64> = videos
        .iter()
        .filter_map(|v| v.as_ref().average_stars)
        .filter(|s| s.is_finite())
        .collect();

    let views_summary = MetricSummary::from_values(&views)?;
    let likes_summary = MetricSummary::from_values(&likes)?;
    let comments_summary = MetricSummary::from_values(&comments)?;

    let mut fallbacks = RatioFallbacks::default();

    let mean_views = views_summary.mean;
    let (engagement_rate, likes_per_view_pct, comments_per_view_pct) = if mean_views > 0.0 {
        (
            (likes_summary.mean + comments_summary.mean) / mean_views * 100.0,
            likes_summary.mean / mean_views * 100.0,
            comments_summary.mean / mean_views * 100.0,
        )
    } else {
        fallbacks.zero_mean_views = true;
        (0.0, 0.0, 0.0)
    };

    let newest = views[0];
    let oldest = views[views.len() - 1];
    let views_growth_pct = if oldest > 0.0 {
        (newest - oldest) / oldest * 100.0
    } else {
        fallbacks.growth_baseline_zero = true;
        0.0
    };

    Some(ChannelStats {
        sample_size: videos.len(),
        views: views_summary,
        likes: likes_summary,
        comments: comments_summary,
        engagement: EngagementSummary {
            engagement_rate,
            views_growth_pct,
            likes_per_view_pct,
            comments_per_view_pct,
            average_stars: if stars.is_empty() { 0.0 } else { mean(&stars) },
            rated_videos: stars.len(),
            fallbacks,
        },
    })
}

fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        0.0
    } else {
        data.iter().sum::<f64>() / data.len() as f64
    }
}

/// Expects `sorted` in ascending order.
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let mid = n / 2;
    if n % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

fn population_std_dev(data: &[f64], mean: f64) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let variance = data
        .iter()
        .map(|value| {
            let diff = value - mean;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(views: u64, likes: u64, comments: u64) -> VideoMetric {
        VideoMetric::new(views, likes, comments)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_list_has_no_summary() {
        let videos: Vec<VideoMetric> = Vec::new();
        assert!(summarize(&videos).is_none());
    }

    #[test]
    fn two_video_views_summary() {
        let stats = summarize(&[video(10, 1, 0), video(20, 3, 1)]).unwrap();
        assert_eq!(stats.views.min, 10.0);
        assert_eq!(stats.views.max, 20.0);
        assert_eq!(stats.views.mean, 15.0);
        assert_eq!(stats.views.median, 15.0);
        assert_eq!(stats.views.std_dev, 5.0);
        assert_eq!(stats.sample_size, 2);
    }

    #[test]
    fn median_handles_odd_and_even_lengths() {
        assert_eq!(median(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median(&[1.0, 2.0, 3.0]), 2.0);

        let summary = MetricSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(summary.median, 2.5);
    }

    #[test]
    fn std_dev_is_population() {
        let summary =
            MetricSummary::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(summary.mean, 5.0);
        assert_eq!(summary.std_dev, 2.0);

        let single = MetricSummary::from_values(&[42.0]).unwrap();
        assert_eq!(single.std_dev, 0.0);
    }

    #[test]
    fn zero_views_fall_back_to_zero() {
        let stats = summarize(&[video(0, 0, 0)]).unwrap();
        let engagement = stats.engagement;
        assert_eq!(engagement.engagement_rate, 0.0);
        assert_eq!(engagement.likes_per_view_pct, 0.0);
        assert_eq!(engagement.comments_per_view_pct, 0.0);
        assert_eq!(engagement.views_growth_pct, 0.0);
        assert!(engagement.fallbacks.zero_mean_views);
        assert!(engagement.fallbacks.growth_baseline_zero);
    }

    #[test]
    fn growth_compares_newest_against_oldest() {
        // Newest first: 150 views now, 100 on the oldest video.
        let stats = summarize(&[video(150, 0, 0), video(120, 0, 0), video(100, 0, 0)]).unwrap();
        assert_eq!(stats.engagement.views_growth_pct, 50.0);
        assert!(!stats.engagement.fallbacks.any());
    }

    #[test]
    fn zero_view_oldest_video_flags_growth_only() {
        let stats = summarize(&[video(400, 40, 10), video(0, 0, 0)]).unwrap();
        assert_eq!(stats.engagement.views_growth_pct, 0.0);
        assert!(stats.engagement.fallbacks.growth_baseline_zero);
        assert!(!stats.engagement.fallbacks.zero_mean_views);
        assert!(approx(stats.engagement.engagement_rate, 12.5));
    }

    #[test]
    fn engagement_ratios_use_means() {
        let stats = summarize(&[video(1000, 50, 10), video(3000, 150, 30)]).unwrap();
        let engagement = stats.engagement;
        assert!(approx(engagement.engagement_rate, 6.0));
        assert!(approx(engagement.likes_per_view_pct, 5.0));
        assert!(approx(engagement.comments_per_view_pct, 1.0));
    }

    #[test]
    fn average_stars_ignores_unrated_videos() {
        let stats = summarize(&[
            video(10, 0, 0).with_stars(4.0),
            video(10, 0, 0),
            video(10, 0, 0).with_stars(3.0),
        ])
        .unwrap();
        assert_eq!(stats.engagement.average_stars, 3.5);
        assert_eq!(stats.engagement.rated_videos, 2);

        let unrated = summarize(&[video(10, 0, 0)]).unwrap();
        assert_eq!(unrated.engagement.average_stars, 0.0);
        assert!(!unrated.engagement.has_ratings());
    }

    #[test]
    fn input_order_does_not_change_descriptive_stats() {
        let a = summarize(&[video(5, 1, 1), video(50, 2, 2), video(20, 3, 3)]).unwrap();
        let b = summarize(&[video(20, 3, 3), video(5, 1, 1), video(50, 2, 2)]).unwrap();
        assert_eq!(a.views, b.views);
        assert_eq!(a.likes, b.likes);
    }
}
