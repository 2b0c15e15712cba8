/// Data models for recipe-service
///
/// This module defines structures for:
/// - Video: Recipe videos (media lives in object storage, only URLs are kept)
/// - Blog: Recipe articles with ingredients, instructions and nutrition
/// - Listing filters and page responses shared by both kinds
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod blog;
mod video;

pub use blog::{Blog, BlogUpdate, NewBlog, Nutrition};
pub use video::{NewVideo, Video};

/// Which collection a content item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Video,
    Blog,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Video => "video",
            ContentKind::Blog => "blog",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read access to the engagement fields the ranking core needs.
///
/// Implemented by every content variant so the feed assembler can rank
/// videos and blogs with the same code.
pub trait RankedContent {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> DateTime<Utc>;
    fn like_count(&self) -> u64;
    fn view_count(&self) -> u64;
    fn category(&self) -> &str;
}

/// Candidate-set filter applied before pagination or ranking
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentFilter {
    pub category: Option<String>,
}

impl ContentFilter {
    pub fn category(category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
        }
    }
}

/// One page of the chronological listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPage<T> {
    pub items: Vec<T>,
    pub total_pages: u64,
    pub current_page: u32,
}

/// Ranked (trending/featured) listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedListing<T> {
    pub items: Vec<T>,
}

/// Result of toggling a saved blog
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SaveToggle {
    pub saved: bool,
}

pub(crate) fn count_to_u64(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}
