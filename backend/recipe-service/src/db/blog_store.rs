use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{BlogStore, ContentStore};
use crate::error::Result;
use crate::models::{Blog, BlogUpdate, ContentFilter, ContentKind, NewBlog, Nutrition};

const BLOG_COLUMNS: &str = "id, author_id, title, description, image, category, prep_time, \
     cooking_time, servings, ingredients, instructions, calories, protein, carbohydrates, \
     fats, views, likes, dislikes, created_at, updated_at";

/// Flat row shape; nutrition is stored as four nullable columns.
#[derive(sqlx::FromRow)]
struct BlogRow {
    id: Uuid,
    author_id: Uuid,
    title: String,
    description: String,
    image: String,
    category: String,
    prep_time: i32,
    cooking_time: i32,
    servings: Option<i32>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    calories: Option<f64>,
    protein: Option<f64>,
    carbohydrates: Option<f64>,
    fats: Option<f64>,
    views: i64,
    likes: Vec<Uuid>,
    dislikes: Vec<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BlogRow> for Blog {
    fn from(row: BlogRow) -> Self {
        let nutrition = Nutrition {
            calories: row.calories,
            protein: row.protein,
            carbohydrates: row.carbohydrates,
            fats: row.fats,
        };

        Blog {
            id: row.id,
            author_id: row.author_id,
            title: row.title,
            description: row.description,
            image: row.image,
            category: row.category,
            prep_time: row.prep_time,
            cooking_time: row.cooking_time,
            servings: row.servings,
            ingredients: row.ingredients,
            instructions: row.instructions,
            nutrition: (!nutrition.is_empty()).then_some(nutrition),
            views: row.views,
            likes: row.likes,
            dislikes: row.dislikes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Clone)]
pub struct PgBlogStore {
    pool: PgPool,
}

impl PgBlogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContentStore<Blog> for PgBlogStore {
    fn kind(&self) -> ContentKind {
        ContentKind::Blog
    }

    async fn find_page(&self, filter: &ContentFilter, limit: i64, offset: i64) -> Result<Vec<Blog>> {
        let sql = format!(
            r#"
            SELECT {BLOG_COLUMNS}
            FROM blogs
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY created_at DESC, id ASC
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(filter.category.as_deref())
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn count(&self, filter: &ContentFilter) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM blogs WHERE ($1::text IS NULL OR category = $1)",
        )
        .bind(filter.category.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn find_candidates(&self, filter: &ContentFilter) -> Result<Vec<Blog>> {
        let sql = format!(
            "SELECT {BLOG_COLUMNS} FROM blogs WHERE ($1::text IS NULL OR category = $1)"
        );

        let rows = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(filter.category.as_deref())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Blog::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>> {
        let sql = format!("SELECT {BLOG_COLUMNS} FROM blogs WHERE id = $1");

        let row = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Blog::from))
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Blog>> {
        let sql = format!(
            r#"
            UPDATE blogs
            SET likes = CASE WHEN $2 = ANY(likes)
                             THEN array_remove(likes, $2)
                             ELSE array_append(likes, $2) END,
                dislikes = CASE WHEN $2 = ANY(likes)
                                THEN dislikes
                                ELSE array_remove(dislikes, $2) END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Blog::from))
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Blog>> {
        let sql =
            format!("UPDATE blogs SET views = views + 1 WHERE id = $1 RETURNING {BLOG_COLUMNS}");

        let row = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Blog::from))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl BlogStore for PgBlogStore {
    async fn create(&self, blog: NewBlog) -> Result<Blog> {
        let nutrition = blog.nutrition.unwrap_or_default();
        let sql = format!(
            r#"
            INSERT INTO blogs (author_id, title, description, image, category, prep_time,
                               cooking_time, servings, ingredients, instructions,
                               calories, protein, carbohydrates, fats)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING {BLOG_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(blog.author_id)
            .bind(&blog.title)
            .bind(&blog.description)
            .bind(&blog.image)
            .bind(&blog.category)
            .bind(blog.prep_time)
            .bind(blog.cooking_time)
            .bind(blog.servings)
            .bind(&blog.ingredients)
            .bind(&blog.instructions)
            .bind(nutrition.calories)
            .bind(nutrition.protein)
            .bind(nutrition.carbohydrates)
            .bind(nutrition.fats)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn update(&self, id: Uuid, update: &BlogUpdate) -> Result<Option<Blog>> {
        // A supplied nutrition block replaces all four columns.
        let nutrition = update.nutrition.unwrap_or_default();
        let sql = format!(
            r#"
            UPDATE blogs
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                image = COALESCE($4, image),
                category = COALESCE($5, category),
                prep_time = COALESCE($6, prep_time),
                cooking_time = COALESCE($7, cooking_time),
                servings = COALESCE($8, servings),
                ingredients = COALESCE($9, ingredients),
                instructions = COALESCE($10, instructions),
                calories = CASE WHEN $11 THEN $12 ELSE calories END,
                protein = CASE WHEN $11 THEN $13 ELSE protein END,
                carbohydrates = CASE WHEN $11 THEN $14 ELSE carbohydrates END,
                fats = CASE WHEN $11 THEN $15 ELSE fats END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {BLOG_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(id)
            .bind(update.title.as_deref())
            .bind(update.description.as_deref())
            .bind(update.image.as_deref())
            .bind(update.category.as_deref())
            .bind(update.prep_time)
            .bind(update.cooking_time)
            .bind(update.servings)
            .bind(update.ingredients.as_ref())
            .bind(update.instructions.as_ref())
            .bind(update.nutrition.is_some())
            .bind(nutrition.calories)
            .bind(nutrition.protein)
            .bind(nutrition.carbohydrates)
            .bind(nutrition.fats)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Blog::from))
    }

    async fn toggle_saved(&self, user_id: Uuid, blog_id: Uuid) -> Result<bool> {
        let saved: bool = sqlx::query_scalar(
            r#"
            WITH removed AS (
                DELETE FROM saved_blogs
                WHERE user_id = $1 AND blog_id = $2
                RETURNING blog_id
            ),
            inserted AS (
                INSERT INTO saved_blogs (user_id, blog_id)
                SELECT $1, $2
                WHERE NOT EXISTS (SELECT 1 FROM removed)
                ON CONFLICT (user_id, blog_id) DO NOTHING
                RETURNING blog_id
            )
            SELECT EXISTS (SELECT 1 FROM inserted)
            "#,
        )
        .bind(user_id)
        .bind(blog_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
