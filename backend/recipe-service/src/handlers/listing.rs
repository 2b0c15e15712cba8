/// Query parameters shared by the video and blog listing endpoints
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::ContentFilter;

/// `?category=&page=&limit=` for the chronological listing
#[derive(Debug, Deserialize, Validate)]
pub struct ListingQuery {
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    #[serde(default = "default_page")]
    #[validate(range(min = 1))]
    pub page: u32,
    /// Defaults to `FEED_DEFAULT_LIMIT` when omitted
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

impl ListingQuery {
    pub fn filter(&self) -> ContentFilter {
        to_filter(&self.category)
    }
}

/// `?category=&limit=` for trending/featured listings
#[derive(Debug, Deserialize, Validate)]
pub struct RankedQuery {
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    #[validate(range(min = 1))]
    pub limit: Option<u32>,
}

impl RankedQuery {
    pub fn filter(&self) -> ContentFilter {
        to_filter(&self.category)
    }
}

fn default_page() -> u32 {
    1
}

fn to_filter(category: &Option<String>) -> ContentFilter {
    ContentFilter {
        category: category.as_ref().map(|c| c.trim().to_string()),
    }
}

/// Rejects lists containing blank entries.
pub(crate) fn no_blank_entries(items: &Vec<String>) -> Result<(), ValidationError> {
    if items.iter().any(|item| item.trim().is_empty()) {
        return Err(ValidationError::new("blank_entry"));
    }
    Ok(())
}

pub(crate) fn trimmed(items: Vec<String>) -> Vec<String> {
    items.into_iter().map(|item| item.trim().to_string()).collect()
}
