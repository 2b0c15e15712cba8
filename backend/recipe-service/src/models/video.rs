use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{count_to_u64, RankedContent};

/// A recipe video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    /// Length in seconds, when known
    pub duration: Option<i32>,
    pub category: String,
    pub ingredients: Vec<String>,
    pub views: i64,
    pub likes: Vec<Uuid>,
    pub dislikes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when a video is registered after upload
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub author_id: Uuid,
    pub title: String,
    pub description: String,
    pub video_url: String,
    pub thumbnail_url: String,
    pub duration: Option<i32>,
    pub category: String,
    pub ingredients: Vec<String>,
}

impl RankedContent for Video {
    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn like_count(&self) -> u64 {
        self.likes.len() as u64
    }

    fn view_count(&self) -> u64 {
        count_to_u64(self.views)
    }

    fn category(&self) -> &str {
        &self.category
    }
}
