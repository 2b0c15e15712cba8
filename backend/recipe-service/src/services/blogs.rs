/// Blog service - recipe articles: listing, authoring, engagement, saves
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::db::BlogStore;
use crate::error::{AppError, Result};
use crate::metrics::feed::ENGAGEMENT_EVENTS_TOTAL;
use crate::models::{Blog, BlogUpdate, ContentFilter, ContentPage, NewBlog, SaveToggle};
use crate::services::feed::FeedAssembler;

pub struct BlogService {
    store: Arc<dyn BlogStore>,
    feed: Arc<FeedAssembler>,
}

impl BlogService {
    pub fn new(store: Arc<dyn BlogStore>, feed: Arc<FeedAssembler>) -> Self {
        Self { store, feed }
    }

    pub async fn list(
        &self,
        filter: &ContentFilter,
        page: u32,
        limit: Option<u32>,
    ) -> Result<ContentPage<Blog>> {
        self.feed
            .list_page(self.store.as_ref(), filter, page, limit)
            .await
    }

    /// Featured listing ranked by engagement and recency
    pub async fn featured(&self, filter: &ContentFilter, limit: Option<u32>) -> Result<Vec<Blog>> {
        self.feed.featured(self.store.as_ref(), filter, limit).await
    }

    pub async fn get(&self, blog_id: Uuid) -> Result<Blog> {
        self.store
            .find_by_id(blog_id)
            .await?
            .ok_or_else(|| not_found(blog_id))
    }

    pub async fn create(&self, blog: NewBlog) -> Result<Blog> {
        let created = self.store.create(blog).await?;
        info!(blog_id = %created.id, author_id = %created.author_id, "Blog created");
        Ok(created)
    }

    /// Partial update; only the author may edit.
    pub async fn update(&self, blog_id: Uuid, user_id: Uuid, update: BlogUpdate) -> Result<Blog> {
        self.ensure_author(blog_id, user_id, "update").await?;

        self.store
            .update(blog_id, &update)
            .await?
            .ok_or_else(|| not_found(blog_id))
    }

    pub async fn delete(&self, blog_id: Uuid, user_id: Uuid) -> Result<()> {
        self.ensure_author(blog_id, user_id, "delete").await?;

        if !self.store.delete(blog_id).await? {
            return Err(not_found(blog_id));
        }

        info!(%blog_id, %user_id, "Blog deleted");
        Ok(())
    }

    pub async fn toggle_like(&self, blog_id: Uuid, user_id: Uuid) -> Result<Blog> {
        let blog = self
            .store
            .toggle_like(blog_id, user_id)
            .await?
            .ok_or_else(|| not_found(blog_id))?;

        let event = if blog.likes.contains(&user_id) {
            "like"
        } else {
            "unlike"
        };
        ENGAGEMENT_EVENTS_TOTAL
            .with_label_values(&["blog", event])
            .inc();

        Ok(blog)
    }

    pub async fn increment_views(&self, blog_id: Uuid) -> Result<Blog> {
        let blog = self
            .store
            .increment_views(blog_id)
            .await?
            .ok_or_else(|| not_found(blog_id))?;

        ENGAGEMENT_EVENTS_TOTAL
            .with_label_values(&["blog", "view"])
            .inc();

        Ok(blog)
    }

    /// Flip whether `user_id` has saved the blog.
    pub async fn toggle_saved(&self, blog_id: Uuid, user_id: Uuid) -> Result<SaveToggle> {
        // Existence check so a missing blog reports 404 rather than a
        // foreign-key failure.
        self.get(blog_id).await?;

        let saved = self.store.toggle_saved(user_id, blog_id).await?;
        ENGAGEMENT_EVENTS_TOTAL
            .with_label_values(&["blog", if saved { "save" } else { "unsave" }])
            .inc();

        Ok(SaveToggle { saved })
    }

    async fn ensure_author(&self, blog_id: Uuid, user_id: Uuid, action: &str) -> Result<()> {
        let blog = self.get(blog_id).await?;
        if blog.author_id != user_id {
            return Err(AppError::Forbidden(format!(
                "Not authorized to {} this blog post",
                action
            )));
        }
        Ok(())
    }
}

fn not_found(blog_id: Uuid) -> AppError {
    AppError::NotFound(format!("blog {}", blog_id))
}
