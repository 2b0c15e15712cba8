//! Shared fixtures for recipe-service integration tests
//!
//! In-memory `VideoStore` / `BlogStore` implementations with the same
//! ordering and toggle semantics as the PostgreSQL stores, plus token and
//! fixture builders.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use recipe_service::db::{BlogStore, ContentStore, VideoStore};
use recipe_service::error::{AppError, Result};
use recipe_service::middleware::{Claims, TokenValidator};
use recipe_service::models::{
    Blog, BlogUpdate, ContentFilter, ContentKind, NewBlog, NewVideo, RankedContent, Video,
};
use recipe_service::services::feed::chronological_order;
use recipe_service::services::{BlogService, FeedAssembler, VideoService};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build the `/api/v1` app over a [`TestContext`].
macro_rules! test_app {
    ($ctx:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($ctx.video_service())
                .app_data($ctx.blog_service())
                .service(
                    actix_web::web::scope("/api/v1")
                        .wrap(recipe_service::middleware::JwtAuthMiddleware::new(
                            $ctx.validator(),
                        ))
                        .wrap(recipe_service::middleware::MetricsMiddleware)
                        .configure(recipe_service::handlers::configure),
                ),
        )
        .await
    };
}

pub struct TestContext {
    pub videos: Arc<MemoryVideoStore>,
    pub blogs: Arc<MemoryBlogStore>,
    pub feed: Arc<FeedAssembler>,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            videos: Arc::new(MemoryVideoStore::default()),
            blogs: Arc::new(MemoryBlogStore::default()),
            feed: Arc::new(FeedAssembler::default()),
        }
    }

    pub fn video_service(&self) -> actix_web::web::Data<VideoService> {
        actix_web::web::Data::new(VideoService::new(self.videos.clone(), self.feed.clone()))
    }

    pub fn blog_service(&self) -> actix_web::web::Data<BlogService> {
        actix_web::web::Data::new(BlogService::new(self.blogs.clone(), self.feed.clone()))
    }

    pub fn validator(&self) -> Arc<TokenValidator> {
        Arc::new(TokenValidator::new(TEST_SECRET))
    }
}

pub fn bearer(user_id: Uuid) -> (&'static str, String) {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + 3600,
        iat: Some(now),
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .expect("encode token");
    ("Authorization", format!("Bearer {}", token))
}

fn likes(count: usize) -> Vec<Uuid> {
    (0..count).map(|_| Uuid::new_v4()).collect()
}

pub fn video(category: &str, like_count: usize, views: i64, age: Duration) -> Video {
    let created_at = Utc::now() - age;
    Video {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        title: format!("{} video", category),
        description: "A recipe video".into(),
        video_url: "https://cdn.example.com/video.mp4".into(),
        thumbnail_url: "https://cdn.example.com/thumb.jpg".into(),
        duration: Some(300),
        category: category.to_string(),
        ingredients: vec!["salt".into()],
        views,
        likes: likes(like_count),
        dislikes: Vec::new(),
        created_at,
        updated_at: created_at,
    }
}

pub fn blog(category: &str, like_count: usize, views: i64, age: Duration) -> Blog {
    let created_at = Utc::now() - age;
    Blog {
        id: Uuid::new_v4(),
        author_id: Uuid::new_v4(),
        title: format!("{} blog", category),
        description: "A recipe write-up".into(),
        image: "https://cdn.example.com/blog.jpg".into(),
        category: category.to_string(),
        prep_time: 10,
        cooking_time: 20,
        servings: Some(2),
        ingredients: vec!["butter".into()],
        instructions: vec!["Cook".into()],
        nutrition: None,
        views,
        likes: likes(like_count),
        dislikes: Vec::new(),
        created_at,
        updated_at: created_at,
    }
}

/// Category predicate matching the `($1::text IS NULL OR category = $1)` clause.
fn matches<T: RankedContent>(filter: &ContentFilter, item: &T) -> bool {
    match &filter.category {
        Some(category) => item.category() == category,
        None => true,
    }
}

/// Field-wise `COALESCE` of the blog update statement.
fn apply_update(update: &BlogUpdate, blog: &mut Blog) {
    if let Some(title) = &update.title {
        blog.title = title.clone();
    }
    if let Some(description) = &update.description {
        blog.description = description.clone();
    }
    if let Some(image) = &update.image {
        blog.image = image.clone();
    }
    if let Some(category) = &update.category {
        blog.category = category.clone();
    }
    if let Some(prep_time) = update.prep_time {
        blog.prep_time = prep_time;
    }
    if let Some(cooking_time) = update.cooking_time {
        blog.cooking_time = cooking_time;
    }
    if let Some(servings) = update.servings {
        blog.servings = Some(servings);
    }
    if let Some(ingredients) = &update.ingredients {
        blog.ingredients = ingredients.clone();
    }
    if let Some(instructions) = &update.instructions {
        blog.instructions = instructions.clone();
    }
    if let Some(nutrition) = update.nutrition {
        blog.nutrition = Some(nutrition);
    }
}

/// Shared toggle semantics: like removes any dislike; a second like undoes.
fn apply_like(likes: &mut Vec<Uuid>, dislikes: &mut Vec<Uuid>, user_id: Uuid) {
    if let Some(pos) = likes.iter().position(|id| *id == user_id) {
        likes.remove(pos);
    } else {
        likes.push(user_id);
        dislikes.retain(|id| *id != user_id);
    }
}

fn page<T: Clone + RankedContent>(
    items: &HashMap<Uuid, T>,
    filter: &ContentFilter,
) -> Vec<T> {
    let mut matched: Vec<T> = items.values().filter(|i| matches(filter, *i)).cloned().collect();
    matched.sort_by(chronological_order);
    matched
}

fn storage_down() -> AppError {
    AppError::RetrievalFailure("storage unavailable".into())
}

#[derive(Default)]
pub struct MemoryVideoStore {
    items: Mutex<HashMap<Uuid, Video>>,
    failing: AtomicBool,
}

impl MemoryVideoStore {
    pub fn insert(&self, video: Video) -> Video {
        self.items.lock().unwrap().insert(video.id, video.clone());
        video
    }

    pub fn get(&self, id: Uuid) -> Option<Video> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    pub fn fail_reads(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(storage_down());
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore<Video> for MemoryVideoStore {
    fn kind(&self) -> ContentKind {
        ContentKind::Video
    }

    async fn find_page(&self, filter: &ContentFilter, limit: i64, offset: i64) -> Result<Vec<Video>> {
        self.check()?;
        let items = self.items.lock().unwrap();
        Ok(page(&items, filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ContentFilter) -> Result<i64> {
        self.check()?;
        let items = self.items.lock().unwrap();
        Ok(items.values().filter(|v| matches(filter, *v)).count() as i64)
    }

    async fn find_candidates(&self, filter: &ContentFilter) -> Result<Vec<Video>> {
        self.check()?;
        let items = self.items.lock().unwrap();
        Ok(items.values().filter(|v| matches(filter, *v)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Video>> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Video>> {
        let mut items = self.items.lock().unwrap();
        Ok(items.get_mut(&id).map(|video| {
            apply_like(&mut video.likes, &mut video.dislikes, user_id);
            video.clone()
        }))
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Video>> {
        let mut items = self.items.lock().unwrap();
        Ok(items.get_mut(&id).map(|video| {
            video.views += 1;
            video.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.items.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl VideoStore for MemoryVideoStore {
    async fn create(&self, video: NewVideo) -> Result<Video> {
        let now = Utc::now();
        Ok(self.insert(Video {
            id: Uuid::new_v4(),
            author_id: video.author_id,
            title: video.title,
            description: video.description,
            video_url: video.video_url,
            thumbnail_url: video.thumbnail_url,
            duration: video.duration,
            category: video.category,
            ingredients: video.ingredients,
            views: 0,
            likes: Vec::new(),
            dislikes: Vec::new(),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn find_related(&self, video: &Video, limit: i64) -> Result<Vec<Video>> {
        let items = self.items.lock().unwrap();
        let mut related: Vec<Video> = items
            .values()
            .filter(|other| other.id != video.id)
            .filter(|other| {
                other.category == video.category
                    || other.ingredients.iter().any(|i| video.ingredients.contains(i))
            })
            .cloned()
            .collect();
        related.sort_by(chronological_order);
        related.truncate(limit as usize);
        Ok(related)
    }
}

#[derive(Default)]
pub struct MemoryBlogStore {
    items: Mutex<HashMap<Uuid, Blog>>,
    saved: Mutex<HashSet<(Uuid, Uuid)>>,
    failing: AtomicBool,
}

impl MemoryBlogStore {
    pub fn insert(&self, blog: Blog) -> Blog {
        self.items.lock().unwrap().insert(blog.id, blog.clone());
        blog
    }

    pub fn get(&self, id: Uuid) -> Option<Blog> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    pub fn is_saved(&self, user_id: Uuid, blog_id: Uuid) -> bool {
        self.saved.lock().unwrap().contains(&(user_id, blog_id))
    }

    pub fn fail_reads(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(storage_down());
        }
        Ok(())
    }
}

#[async_trait]
impl ContentStore<Blog> for MemoryBlogStore {
    fn kind(&self) -> ContentKind {
        ContentKind::Blog
    }

    async fn find_page(&self, filter: &ContentFilter, limit: i64, offset: i64) -> Result<Vec<Blog>> {
        self.check()?;
        let items = self.items.lock().unwrap();
        Ok(page(&items, filter)
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &ContentFilter) -> Result<i64> {
        self.check()?;
        let items = self.items.lock().unwrap();
        Ok(items.values().filter(|b| matches(filter, *b)).count() as i64)
    }

    async fn find_candidates(&self, filter: &ContentFilter) -> Result<Vec<Blog>> {
        self.check()?;
        let items = self.items.lock().unwrap();
        Ok(items.values().filter(|b| matches(filter, *b)).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Blog>> {
        self.check()?;
        Ok(self.get(id))
    }

    async fn toggle_like(&self, id: Uuid, user_id: Uuid) -> Result<Option<Blog>> {
        let mut items = self.items.lock().unwrap();
        Ok(items.get_mut(&id).map(|blog| {
            apply_like(&mut blog.likes, &mut blog.dislikes, user_id);
            blog.clone()
        }))
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Blog>> {
        let mut items = self.items.lock().unwrap();
        Ok(items.get_mut(&id).map(|blog| {
            blog.views += 1;
            blog.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        self.saved.lock().unwrap().retain(|(_, blog_id)| *blog_id != id);
        Ok(self.items.lock().unwrap().remove(&id).is_some())
    }
}

#[async_trait]
impl BlogStore for MemoryBlogStore {
    async fn create(&self, blog: NewBlog) -> Result<Blog> {
        let now = Utc::now();
        Ok(self.insert(Blog {
            id: Uuid::new_v4(),
            author_id: blog.author_id,
            title: blog.title,
            description: blog.description,
            image: blog.image,
            category: blog.category,
            prep_time: blog.prep_time,
            cooking_time: blog.cooking_time,
            servings: blog.servings,
            ingredients: blog.ingredients,
            instructions: blog.instructions,
            nutrition: blog.nutrition,
            views: 0,
            likes: Vec::new(),
            dislikes: Vec::new(),
            created_at: now,
            updated_at: now,
        }))
    }

    async fn update(&self, id: Uuid, update: &BlogUpdate) -> Result<Option<Blog>> {
        let mut items = self.items.lock().unwrap();
        Ok(items.get_mut(&id).map(|blog| {
            apply_update(update, blog);
            blog.updated_at = Utc::now();
            blog.clone()
        }))
    }

    async fn toggle_saved(&self, user_id: Uuid, blog_id: Uuid) -> Result<bool> {
        let mut saved = self.saved.lock().unwrap();
        let key = (user_id, blog_id);
        if saved.remove(&key) {
            Ok(false)
        } else {
            saved.insert(key);
            Ok(true)
        }
    }
}
