/// Database access layer
///
/// Services talk to storage through the traits below; `PgVideoStore` and
/// `PgBlogStore` are the PostgreSQL implementations used in production.
/// Counter mutations (likes, views, saves) are single-statement updates so
/// concurrent requests never lose or double-apply a change.
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Blog, BlogUpdate, ContentFilter, ContentKind, NewBlog, NewVideo, Video};

pub mod blog_store;
pub mod video_store;

pub use blog_store::PgBlogStore;
pub use video_store::PgVideoStore;

/// Operations shared by every content collection
#[async_trait]
pub trait ContentStore<T: Send + 'static>: Send + Sync {
    fn kind(&self) -> ContentKind;

    /// Items matching `filter`, newest first (ties by ascending id)
    async fn find_page(&self, filter: &ContentFilter, limit: i64, offset: i64) -> Result<Vec<T>>;

    async fn count(&self, filter: &ContentFilter) -> Result<i64>;

    /// Every item matching `filter`, in no particular order
    async fn find_candidates(&self, filter: &ContentFilter) -> Result<Vec<T>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>>;

    /// Flip `user_id`'s membership in the like set. Adding a like also
    /// removes the user from the dislike set.
    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<T>>;

    async fn increment_views(&self, id: Uuid) -> Result<Option<T>>;

    async fn delete(&self, id: Uuid) -> Result<bool>;
}

#[async_trait]
pub trait VideoStore: ContentStore<Video> {
    async fn create(&self, video: NewVideo) -> Result<Video>;

    /// Other videos sharing the category or at least one ingredient
    async fn find_related(&self, video: &Video, limit: i64) -> Result<Vec<Video>>;
}

#[async_trait]
pub trait BlogStore: ContentStore<Blog> {
    async fn create(&self, blog: NewBlog) -> Result<Blog>;

    async fn update(&self, id: Uuid, update: &BlogUpdate) -> Result<Option<Blog>>;

    /// Flip the (user, blog) saved membership; returns the new state.
    async fn toggle_saved(&self, user_id: Uuid, blog_id: Uuid) -> Result<bool>;
}
