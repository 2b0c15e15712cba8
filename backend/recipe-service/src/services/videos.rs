/// Video service - listing, upload registration, engagement and removal
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db::VideoStore;
use crate::error::{AppError, Result};
use crate::metrics::feed::ENGAGEMENT_EVENTS_TOTAL;
use crate::models::{ContentFilter, ContentPage, NewVideo, Video};
use crate::services::feed::FeedAssembler;

/// Upper bound on related videos returned for one video
pub const RELATED_VIDEOS_LIMIT: i64 = 10;

pub struct VideoService {
    store: Arc<dyn VideoStore>,
    feed: Arc<FeedAssembler>,
}

impl VideoService {
    pub fn new(store: Arc<dyn VideoStore>, feed: Arc<FeedAssembler>) -> Self {
        Self { store, feed }
    }

    /// Chronological listing
    pub async fn list(
        &self,
        filter: &ContentFilter,
        page: u32,
        limit: Option<u32>,
    ) -> Result<ContentPage<Video>> {
        self.feed
            .list_page(self.store.as_ref(), filter, page, limit)
            .await
    }

    /// Trending listing ranked by engagement and recency
    pub async fn trending(&self, filter: &ContentFilter, limit: Option<u32>) -> Result<Vec<Video>> {
        self.feed.featured(self.store.as_ref(), filter, limit).await
    }

    pub async fn get(&self, video_id: Uuid) -> Result<Video> {
        self.store
            .find_by_id(video_id)
            .await?
            .ok_or_else(|| not_found(video_id))
    }

    pub async fn upload(&self, video: NewVideo) -> Result<Video> {
        let created = self.store.create(video).await?;
        info!(video_id = %created.id, author_id = %created.author_id, "Video registered");
        Ok(created)
    }

    /// Remove a video; only its author may do so.
    pub async fn delete(&self, video_id: Uuid, user_id: Uuid) -> Result<()> {
        let video = self.get(video_id).await?;
        if video.author_id != user_id {
            return Err(AppError::Forbidden(
                "Not authorized to delete this video".into(),
            ));
        }

        if !self.store.delete(video_id).await? {
            return Err(not_found(video_id));
        }

        info!(%video_id, %user_id, "Video deleted");
        Ok(())
    }

    pub async fn toggle_like(&self, video_id: Uuid, user_id: Uuid) -> Result<Video> {
        let video = self
            .store
            .toggle_like(video_id, user_id)
            .await?
            .ok_or_else(|| not_found(video_id))?;

        let event = if video.likes.contains(&user_id) {
            "like"
        } else {
            "unlike"
        };
        ENGAGEMENT_EVENTS_TOTAL
            .with_label_values(&["video", event])
            .inc();

        Ok(video)
    }

    pub async fn increment_views(&self, video_id: Uuid) -> Result<Video> {
        let video = self
            .store
            .increment_views(video_id)
            .await?
            .ok_or_else(|| not_found(video_id))?;

        ENGAGEMENT_EVENTS_TOTAL
            .with_label_values(&["video", "view"])
            .inc();

        Ok(video)
    }

    /// Videos sharing the category or an ingredient, newest first
    pub async fn related(&self, video_id: Uuid) -> Result<Vec<Video>> {
        let video = self.get(video_id).await?;
        self.store.find_related(&video, RELATED_VIDEOS_LIMIT).await
    }
}

fn not_found(video_id: Uuid) -> AppError {
    AppError::NotFound(format!("video {}", video_id))
}
