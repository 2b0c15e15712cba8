use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::FeedConfig;
use crate::db::ContentStore;
use crate::error::{AppError, Result};
use crate::metrics::feed::{
    FEED_CANDIDATE_COUNT, FEED_REQUEST_DURATION_SECONDS, FEED_REQUEST_TOTAL,
};
use crate::models::{ContentFilter, ContentPage, RankedContent};
use crate::services::ranking::{EngagementSnapshot, RankingScorer};

const MAX_CATEGORY_LEN: usize = 64;

/// An item paired with the score it was ranked by
#[derive(Debug, Clone)]
pub struct ScoredItem<T> {
    pub item: T,
    pub score: f64,
}

/// Builds both listing modes on top of any `ContentStore`.
///
/// Stateless between calls: every request fetches its own candidate set and
/// snapshots engagement at request time.
#[derive(Debug, Clone)]
pub struct FeedAssembler {
    scorer: RankingScorer,
    default_limit: u32,
    max_page_size: u32,
}

impl Default for FeedAssembler {
    fn default() -> Self {
        Self::new(&FeedConfig::default())
    }
}

impl FeedAssembler {
    pub fn new(config: &FeedConfig) -> Self {
        Self {
            scorer: RankingScorer::from(config),
            default_limit: config.default_limit.clamp(1, config.max_page_size.max(1)),
            max_page_size: config.max_page_size.max(1),
        }
    }

    pub fn scorer(&self) -> &RankingScorer {
        &self.scorer
    }

    /// Chronological page: newest first, `total_pages = ceil(total / page_size)`.
    ///
    /// `page_size` falls back to the configured default limit when absent.
    pub async fn list_page<T, S>(
        &self,
        store: &S,
        filter: &ContentFilter,
        page: u32,
        page_size: Option<u32>,
    ) -> Result<ContentPage<T>>
    where
        T: RankedContent + Send + 'static,
        S: ContentStore<T> + ?Sized,
    {
        let kind = store.kind().as_str();
        self.validate_filter(filter)?;
        if page == 0 {
            return Err(AppError::InvalidArgument("page must be at least 1".into()));
        }
        let page_size = page_size.unwrap_or(self.default_limit);
        self.validate_size("limit", page_size)?;

        let start = Instant::now();
        let offset = i64::from(page - 1) * i64::from(page_size);

        debug!(
            kind,
            category = ?filter.category,
            page,
            page_size,
            "Assembling chronological page"
        );

        let fetched = async {
            let total = store.count(filter).await?;
            let items = if offset < total {
                store.find_page(filter, i64::from(page_size), offset).await?
            } else {
                Vec::new()
            };
            Ok::<_, AppError>((total, items))
        }
        .await;

        let (total, items) = match fetched {
            Ok(result) => result,
            Err(e) => {
                warn!(kind, error = %e, "Chronological listing failed");
                FEED_REQUEST_TOTAL
                    .with_label_values(&[kind, "page", "error"])
                    .inc();
                return Err(e);
            }
        };

        FEED_REQUEST_DURATION_SECONDS
            .with_label_values(&[kind, "page"])
            .observe(start.elapsed().as_secs_f64());
        FEED_REQUEST_TOTAL
            .with_label_values(&[kind, "page", "ok"])
            .inc();

        Ok(ContentPage {
            items,
            total_pages: total_pages(total, page_size),
            current_page: page,
        })
    }

    /// Trending/featured listing: top `limit` candidates by score.
    /// `None` uses the configured default limit.
    pub async fn featured<T, S>(
        &self,
        store: &S,
        filter: &ContentFilter,
        limit: Option<u32>,
    ) -> Result<Vec<T>>
    where
        T: RankedContent + Send + 'static,
        S: ContentStore<T> + ?Sized,
    {
        let kind = store.kind().as_str();
        let limit = limit.unwrap_or(self.default_limit);
        self.validate_filter(filter)?;
        self.validate_size("limit", limit)?;

        let start = Instant::now();

        let candidates = match store.find_candidates(filter).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(kind, error = %e, "Candidate retrieval failed");
                FEED_REQUEST_TOTAL
                    .with_label_values(&[kind, "ranked", "error"])
                    .inc();
                return Err(e);
            }
        };

        let candidate_count = candidates.len();
        let ranked = self.rank(candidates, limit as usize, Utc::now());

        debug!(
            kind,
            category = ?filter.category,
            candidates = candidate_count,
            returned = ranked.len(),
            "Ranked listing assembled"
        );

        FEED_CANDIDATE_COUNT
            .with_label_values(&[kind])
            .observe(candidate_count as f64);
        FEED_REQUEST_DURATION_SECONDS
            .with_label_values(&[kind, "ranked"])
            .observe(start.elapsed().as_secs_f64());
        FEED_REQUEST_TOTAL
            .with_label_values(&[kind, "ranked", "ok"])
            .inc();

        Ok(ranked)
    }

    /// Score, sort and truncate an in-memory candidate set.
    pub fn rank<T: RankedContent>(
        &self,
        candidates: Vec<T>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<T> {
        self.rank_with_scores(candidates, limit, now)
            .into_iter()
            .map(|scored| scored.item)
            .collect()
    }

    /// Like [`rank`](Self::rank) but keeps the scores. Equal scores are
    /// ordered by ascending id so repeated requests return the same order.
    pub fn rank_with_scores<T: RankedContent>(
        &self,
        candidates: Vec<T>,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Vec<ScoredItem<T>> {
        let mut ranked = Vec::with_capacity(candidates.len());
        for item in candidates {
            let snapshot = EngagementSnapshot::capture(&item, now);
            let score = self.scorer.score(&snapshot);
            ranked.push(ScoredItem { item, score });
        }

        ranked.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.item.id().cmp(&b.item.id()))
        });
        ranked.truncate(limit);
        ranked
    }

    fn validate_size(&self, name: &str, value: u32) -> Result<()> {
        if value == 0 {
            return Err(AppError::InvalidArgument(format!(
                "{} must be at least 1",
                name
            )));
        }
        if value > self.max_page_size {
            return Err(AppError::InvalidArgument(format!(
                "{} must not exceed {}",
                name, self.max_page_size
            )));
        }
        Ok(())
    }

    fn validate_filter(&self, filter: &ContentFilter) -> Result<()> {
        if let Some(category) = &filter.category {
            if category.trim().is_empty() {
                return Err(AppError::InvalidArgument(
                    "category must not be blank".into(),
                ));
            }
            if category.chars().count() > MAX_CATEGORY_LEN {
                return Err(AppError::InvalidArgument(format!(
                    "category must be at most {} characters",
                    MAX_CATEGORY_LEN
                )));
            }
        }
        Ok(())
    }
}

fn total_pages(total: i64, page_size: u32) -> u64 {
    let total = u64::try_from(total).unwrap_or(0);
    let page_size = u64::from(page_size.max(1));
    total.div_ceil(page_size)
}

/// Ordering used by chronological listings: newest first, then ascending id.
pub fn chronological_order<T: RankedContent>(a: &T, b: &T) -> Ordering {
    b.created_at()
        .cmp(&a.created_at())
        .then_with(|| a.id().cmp(&b.id()))
}
