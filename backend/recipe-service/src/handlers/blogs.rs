/// Blog handlers - HTTP endpoints for recipe blog posts
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::error::{AppError, Result};
use crate::handlers::listing::{no_blank_entries, trimmed, ListingQuery, RankedQuery};
use crate::middleware::UserId;
use crate::models::{BlogUpdate, NewBlog, Nutrition, RankedListing};
use crate::services::BlogService;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlogRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[validate(url)]
    pub image: String,
    #[validate(length(min = 1, max = 64))]
    pub category: String,
    #[validate(range(min = 0))]
    pub prep_time: i32,
    #[validate(range(min = 0))]
    pub cooking_time: i32,
    #[validate(range(min = 1))]
    pub servings: Option<i32>,
    #[validate(length(min = 1), custom(function = "no_blank_entries"))]
    pub ingredients: Vec<String>,
    #[validate(length(min = 1), custom(function = "no_blank_entries"))]
    pub instructions: Vec<String>,
    pub nutrition: Option<Nutrition>,
}

impl CreateBlogRequest {
    fn into_new_blog(self, author_id: Uuid) -> NewBlog {
        NewBlog {
            author_id,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image: self.image,
            category: self.category.trim().to_string(),
            prep_time: self.prep_time,
            cooking_time: self.cooking_time,
            servings: self.servings,
            ingredients: trimmed(self.ingredients),
            instructions: trimmed(self.instructions),
            nutrition: self.nutrition.filter(|n| !n.is_empty()),
        }
    }
}

/// Partial update; absent fields keep their stored values
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBlogRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[validate(url)]
    pub image: Option<String>,
    #[validate(length(min = 1, max = 64))]
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub prep_time: Option<i32>,
    #[validate(range(min = 0))]
    pub cooking_time: Option<i32>,
    #[validate(range(min = 1))]
    pub servings: Option<i32>,
    #[validate(length(min = 1))]
    pub ingredients: Option<Vec<String>>,
    #[validate(length(min = 1))]
    pub instructions: Option<Vec<String>>,
    pub nutrition: Option<Nutrition>,
}

impl UpdateBlogRequest {
    fn check(&self) -> Result<()> {
        self.validate()?;
        for list in [&self.ingredients, &self.instructions].into_iter().flatten() {
            no_blank_entries(list).map_err(|_| {
                AppError::InvalidArgument("list entries must not be blank".into())
            })?;
        }
        check_nutrition(self.nutrition.as_ref())
    }

    fn into_update(self) -> BlogUpdate {
        BlogUpdate {
            title: self.title.map(|s| s.trim().to_string()),
            description: self.description.map(|s| s.trim().to_string()),
            image: self.image,
            category: self.category.map(|s| s.trim().to_string()),
            prep_time: self.prep_time,
            cooking_time: self.cooking_time,
            servings: self.servings,
            ingredients: self.ingredients.map(trimmed),
            instructions: self.instructions.map(trimmed),
            nutrition: self.nutrition,
        }
    }
}

fn check_nutrition(nutrition: Option<&Nutrition>) -> Result<()> {
    let Some(n) = nutrition else {
        return Ok(());
    };

    let invalid = [n.calories, n.protein, n.carbohydrates, n.fats]
        .into_iter()
        .flatten()
        .any(|value| !value.is_finite() || value < 0.0);
    if invalid {
        let mut errors = validator::ValidationErrors::new();
        errors.add("nutrition", ValidationError::new("non_negative"));
        return Err(errors.into());
    }
    Ok(())
}

/// Chronological page of blogs
pub async fn list_blogs(
    service: web::Data<BlogService>,
    query: web::Query<ListingQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let page = service
        .list(&query.filter(), query.page, query.limit)
        .await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Featured blogs
pub async fn get_featured_blogs(
    service: web::Data<BlogService>,
    query: web::Query<RankedQuery>,
) -> Result<HttpResponse> {
    query.validate()?;

    let items = service.featured(&query.filter(), query.limit).await?;
    Ok(HttpResponse::Ok().json(RankedListing { items }))
}

pub async fn create_blog(
    service: web::Data<BlogService>,
    user_id: UserId,
    req: web::Json<CreateBlogRequest>,
) -> Result<HttpResponse> {
    req.validate()?;
    check_nutrition(req.nutrition.as_ref())?;

    let blog = service
        .create(req.into_inner().into_new_blog(user_id.0))
        .await?;
    Ok(HttpResponse::Created().json(blog))
}

pub async fn get_blog(
    service: web::Data<BlogService>,
    blog_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let blog = service.get(*blog_id).await?;
    Ok(HttpResponse::Ok().json(blog))
}

pub async fn update_blog(
    service: web::Data<BlogService>,
    user_id: UserId,
    blog_id: web::Path<Uuid>,
    req: web::Json<UpdateBlogRequest>,
) -> Result<HttpResponse> {
    req.check()?;

    let blog = service
        .update(*blog_id, user_id.0, req.into_inner().into_update())
        .await?;
    Ok(HttpResponse::Ok().json(blog))
}

pub async fn delete_blog(
    service: web::Data<BlogService>,
    user_id: UserId,
    blog_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    service.delete(*blog_id, user_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub async fn toggle_blog_like(
    service: web::Data<BlogService>,
    user_id: UserId,
    blog_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let blog = service.toggle_like(*blog_id, user_id.0).await?;
    Ok(HttpResponse::Ok().json(blog))
}

pub async fn increment_blog_views(
    service: web::Data<BlogService>,
    blog_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let blog = service.increment_views(*blog_id).await?;
    Ok(HttpResponse::Ok().json(blog))
}

/// Save or unsave a blog for the caller
pub async fn toggle_saved_blog(
    service: web::Data<BlogService>,
    user_id: UserId,
    blog_id: web::Path<Uuid>,
) -> Result<HttpResponse> {
    let toggle = service.toggle_saved(*blog_id, user_id.0).await?;
    Ok(HttpResponse::Ok().json(toggle))
}
