/// Video handlers - HTTP endpoints for recipe videos
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::handlers::listing::{no_blank_entries, trimmed, ListingQuery, RankedQuery};
use crate::middleware::UserId;
use crate::models::{NewVideo, RankedListing};
use crate::services::VideoService;

/// Metadata registered once the media itself has been uploaded to storage
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UploadVideoRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    #[validate(length(min = 1), custom(function = "no_blank_entries"))]
    pub ingredients: Vec<String>,
    #[validate(url)]
    pub video_url: String,
    #[validate(url)]
    pub thumbnail_url: String,
    #[validate(range(min = 0))]
    pub duration: Option<i32>,
}

impl UploadVideoRequest {
    fn into_new_video(self, author_id: Uuid) -> NewVideo {
        NewVideo {
            author_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
            duration: self.duration,
            category: self.category.trim().to_string(),
            ingredients: trimmed(self.ingredients),
        }
    }
}

/// Chronological page of videos
pub async fn list_videos(
    service: web::Data<VideoService>,
    query: web::Query<ListingQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let page = service
        .list(&query.filter(), query.page, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Trending videos
pub async fn get_trending_videos(
    service: web::Data<VideoService>,
    query: web::Query<RankedQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let items = service.trending(&query.filter(), query.limit).await?;
    Ok(HttpResponse::Ok().json(RankedListing { items }))
}

pub async fn upload_video(
    service: web::Data<VideoService>,
    user_id: UserId,
    req: web::Json<UploadVideoRequest>,
) -> Result<HttpResponse> {
    req.validate()?;

    let video = service
        .upload(req.into_inner().into_new_video(user_id.0))
        .await?;
    Ok(HttpResponse::Created().json(video))
}

pub async fn get_video(
    service: web::Data<VideoService>,
    video_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let video = service.get(*video_id).await?;
    Ok(HttpResponse::Ok().json(video))
}

pub async fn delete_video(
    service: web::Data<VideoService>,
    user_id: UserId,
    video_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    service.delete(*video_id, user_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn toggle_video_like(
    service: web::Data<VideoService>,
    user_id: UserId,
    video_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let video = service.toggle_like(*video_id, user_id.0).await?;
    Ok(HttpResponse::Ok().json(video))
}

/// Count one view; anonymous viewers count too
pub async fn increment_video_views(
    service: web::Data<VideoService>,
    video_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let video = service.increment_views(*video_id).await?;
    Ok(HttpResponse::Ok().json(video))
}

pub async fn get_related_videos(
    service: web::Data<VideoService>,
    video_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let items = service.related(*video_id).await?;
    Ok(HttpResponse::Ok().json(RankedListing { items }))
}
