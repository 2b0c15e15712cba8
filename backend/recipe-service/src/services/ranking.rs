//! Popularity-decay scoring for trending videos and featured blogs.
//!
//! score = likes * like_weight + views * view_weight + 1 / (1 + age_days)
//!
//! With the default weights (2.0, 1.0) a like counts double a view. The
//! recency term lies in (0, 1]: it never outweighs real engagement but
//! separates otherwise-equal items in favour of the newer one and keeps
//! brand-new items above zero.

use chrono::{DateTime, Utc};

use crate::config::FeedConfig;
use crate::models::RankedContent;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Read-only engagement view of one item, taken at scoring time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngagementSnapshot {
    pub like_count: u64,
    pub view_count: u64,
    /// Fractional days since creation, never negative
    pub age_days: f64,
}

impl EngagementSnapshot {
    /// Build a snapshot; negative or NaN ages (clock skew, future
    /// timestamps) are clamped to zero.
    pub fn new(like_count: u64, view_count: u64, age_days: f64) -> Self {
        Self {
            like_count,
            view_count,
            age_days: age_days.max(0.0),
        }
    }

    /// Snapshot `item` relative to `now`.
    pub fn capture<T: RankedContent>(item: &T, now: DateTime<Utc>) -> Self {
        let age_ms = (now - item.created_at()).num_milliseconds() as f64;
        Self::new(item.like_count(), item.view_count(), age_ms / MILLIS_PER_DAY)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankingScorer {
    like_weight: f64,
    view_weight: f64,
}

impl Default for RankingScorer {
    fn default() -> Self {
        Self {
            like_weight: 2.0,
            view_weight: 1.0,
        }
    }
}

impl RankingScorer {
    /// Weights must be finite and non-negative; anything else falls back
    /// to the default for that weight.
    pub fn new(like_weight: f64, view_weight: f64) -> Self {
        let defaults = Self::default();
        Self {
            like_weight: sanitize_weight(like_weight, defaults.like_weight),
            view_weight: sanitize_weight(view_weight, defaults.view_weight),
        }
    }

    pub fn score(&self, snapshot: &EngagementSnapshot) -> f64 {
        let engagement = snapshot.like_count as f64 * self.like_weight
            + snapshot.view_count as f64 * self.view_weight;
        engagement + Self::recency_bonus(snapshot.age_days)
    }

    /// Decaying bonus in (0, 1]; exactly 1 at age zero.
    pub fn recency_bonus(age_days: f64) -> f64 {
        1.0 / (1.0 + age_days.max(0.0))
    }
}

impl From<&FeedConfig> for RankingScorer {
    fn from(config: &FeedConfig) -> Self {
        RankingScorer::new(config.like_weight, config.view_weight)
    }
}

fn sanitize_weight(weight: f64, default: f64) -> f64 {
    if weight.is_finite() && weight >= 0.0 {
        weight
    } else {
        default
    }
}
