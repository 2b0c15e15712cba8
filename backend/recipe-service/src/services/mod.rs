/// Business logic layer for recipe-service
///
/// This module provides high-level operations:
/// - Ranking: popularity-decay scoring of one item
/// - Feed: chronological pages and trending/featured rankings
/// - Video service: upload registration, engagement, related videos
/// - Blog service: authoring, engagement, saved blogs
pub mod blogs;
pub mod feed;
pub mod ranking;
pub mod videos;

// Re-export commonly used services
pub use blogs::BlogService;
pub use feed::{FeedAssembler, ScoredItem};
pub use ranking::{EngagementSnapshot, RankingScorer};
pub use videos::VideoService;
