use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{ContentStore, VideoStore};
use crate::error::Result;
use crate::models::{ContentFilter, ContentKind, NewVideo, Video};

const VIDEO_COLUMNS: &str = "id, author_id, title, description, video_url, thumbnail_url, \
     duration, category, ingredients, views, likes, dislikes, created_at, updated_at";

#[derive(Clone)]
pub struct PgVideoStore {
    pool: PgPool,
}

impl PgVideoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore<Video> for PgVideoStore {
    fn kind(&self) -> ContentKind {
        ContentKind::Video
    }

    async fn find_page(
        &self,
        filter: &ContentFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Video>> {
        let sql = format!(
            r#"
            SELECT {VIDEO_COLUMNS}
            FROM videos
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY created_at DESC, id ASC
            LIMIT $2 OFFSET $3
            "#
        );

        let videos = sqlx::query_as::<_, Video>(&sql)
            .bind(filter.category.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn count(&self, filter: &ContentFilter) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM videos WHERE ($1::text IS NULL OR category = $1)",
        )
        .bind(filter.category.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_candidates(&self, filter: &ContentFilter) -> Result<Vec<Video>> {
        let sql = format!(
            "SELECT {VIDEO_COLUMNS} FROM videos WHERE ($1::text IS NULL OR category = $1)"
        );

        let videos = sqlx::query_as::<_, Video>(&sql)
            .bind(filter.category.as_deref())
            .fetch_all(&self.pool)
            .await?;

        Ok(videos)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        let sql = format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1");

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>> {
        // Every CASE reads the pre-update row, so membership is decided once
        // under the row lock.
        let sql = format!(
            r#"
            UPDATE videos
            SET likes = CASE WHEN $2 = ANY(likes)
                             THEN array_remove(likes, $2)
                             ELSE array_append(likes, $2) END,
                dislikes = CASE WHEN $2 = ANY(likes)
                                THEN dislikes
                                ELSE array_remove(dislikes, $2) END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Video>> {
        let sql = format!(
            "UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
        );

        let video = sqlx::query_as::<_, Video>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(video)
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl VideoStore for PgVideoStore {
    async fn create(&self, video: NewVideo) -> Result<Video> {
        let sql = format!(
            r#"
            INSERT INTO videos (author_id, title, description, video_url, thumbnail_url,
                                duration, category, ingredients)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {VIDEO_COLUMNS}
            "#
        );

        let created = sqlx::query_as::<_, Video>(&sql)
            .bind(video.author_id)
            .bind(&video.title)
            .bind(&video.description)
            .bind(&video.video_url)
            .bind(&video.thumbnail_url)
            .bind(video.duration)
            .bind(&video.category)
            .bind(&video.ingredients)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn find_related(&self, video: &Video, limit: i64) -> Result<Vec<Video>> {
        let sql = format!(
            r#"
            SELECT {VIDEO_COLUMNS}
            FROM videos
            WHERE id <> $1
              AND (category = $2 OR ingredients && $3::text[])
            ORDER BY created_at DESC, id ASC
            LIMIT $4
            "#
        );

        let related = sqlx::query_as::<_, Video>(&sql)
            .bind(video.id)
            .bind(&video.category)
            .bind(&video.ingredients)
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;

        Ok(related)
    }
}
