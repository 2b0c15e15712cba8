//! Integration Tests: likes, views, saves and authoring
//!
//! Coverage:
//! - toggle-like flips membership and clears a dislike
//! - view counter increments
//! - saved-blog toggle
//! - authentication and ownership checks on write routes

#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use chrono::Duration;
use common::{bearer, blog, video, TestContext};
use recipe_service::models::{Blog, SaveToggle, Video};
use serde_json::{json, Value};
use uuid::Uuid;

#[actix_web::test]
async fn test_toggle_like_twice_restores_state() {
    let ctx = TestContext::new();
    let target = ctx.videos.insert(video("mains", 2, 10, Duration::hours(1)));
    let user = Uuid::new_v4();
    let app = test_app!(ctx);
    let uri = format!("/api/v1/videos/{}/toggle-like", target.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(user))
        .to_request();
    let liked: Video = test::call_and_read_body_json(&app, req).await;
    assert!(liked.likes.contains(&user));
    assert_eq!(liked.likes.len(), 3);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(user))
        .to_request();
    let unliked: Video = test::call_and_read_body_json(&app, req).await;
    assert!(!unliked.likes.contains(&user));
    assert_eq!(unliked.likes, target.likes);
}

#[actix_web::test]
async fn test_like_removes_existing_dislike() {
    let ctx = TestContext::new();
    let user = Uuid::new_v4();
    let mut seeded = blog("baking", 0, 0, Duration::hours(1));
    seeded.dislikes.push(user);
    let target = ctx.blogs.insert(seeded);
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/blogs/{}/toggle-like", target.id))
        .insert_header(bearer(user))
        .to_request();
    let updated: Blog = test::call_and_read_body_json(&app, req).await;

    assert!(updated.likes.contains(&user));
    assert!(!updated.dislikes.contains(&user));
}

#[actix_web::test]
async fn test_toggle_like_requires_authentication() {
    let ctx = TestContext::new();
    let target = ctx.videos.insert(video("mains", 0, 0, Duration::hours(1)));
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/videos/{}/toggle-like", target.id))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(ctx.videos.get(target.id).unwrap().likes.is_empty());
}

#[actix_web::test]
async fn test_invalid_token_is_rejected() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri("/api/v1/videos")
        .insert_header(("Authorization", "Bearer not-a-token"))
        .to_request();
    let err = match test::try_call_service(&app, req).await {
        Ok(resp) => panic!("expected rejection, got {}", resp.status()),
        Err(err) => err,
    };

    assert_eq!(
        err.as_response_error().status_code(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_web::test]
async fn test_toggle_like_unknown_video_is_404() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/videos/{}/toggle-like", Uuid::new_v4()))
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_views_increment_by_one() {
    let ctx = TestContext::new();
    let target = ctx.videos.insert(video("mains", 0, 41, Duration::hours(1)));
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/videos/{}/views", target.id))
        .to_request();
    let updated: Video = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated.views, 42);
    assert_eq!(ctx.videos.get(target.id).unwrap().views, 42);
}

#[actix_web::test]
async fn test_views_on_missing_blog_is_404() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/blogs/{}/views", Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_liking_moves_video_up_trending() {
    let ctx = TestContext::new();
    let leader = ctx.videos.insert(video("mains", 1, 0, Duration::hours(2)));
    let challenger = ctx.videos.insert(video("mains", 0, 0, Duration::hours(2)));
    let app = test_app!(ctx);

    for _ in 0..2 {
        let req = test::TestRequest::post()
            .uri(&format!("/api/v1/videos/{}/toggle-like", challenger.id))
            .insert_header(bearer(Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/videos/trending?limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["items"][0]["id"], challenger.id.to_string());
    assert_eq!(body["items"][1]["id"], leader.id.to_string());
}

#[actix_web::test]
async fn test_save_toggle_flips_state() {
    let ctx = TestContext::new();
    let target = ctx.blogs.insert(blog("baking", 0, 0, Duration::hours(1)));
    let user = Uuid::new_v4();
    let app = test_app!(ctx);
    let uri = format!("/api/v1/blogs/{}/save", target.id);

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(user))
        .to_request();
    let first: SaveToggle = test::call_and_read_body_json(&app, req).await;
    assert!(first.saved);
    assert!(ctx.blogs.is_saved(user, target.id));

    let req = test::TestRequest::post()
        .uri(&uri)
        .insert_header(bearer(user))
        .to_request();
    let second: SaveToggle = test::call_and_read_body_json(&app, req).await;
    assert!(!second.saved);
    assert!(!ctx.blogs.is_saved(user, target.id));
}

#[actix_web::test]
async fn test_save_unknown_blog_is_404() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&format!("/api/v1/blogs/{}/save", Uuid::new_v4()))
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_upload_registers_video_for_caller() {
    let ctx = TestContext::new();
    let user = Uuid::new_v4();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/videos/upload")
        .insert_header(bearer(user))
        .set_json(json!({
            "title": "Pad Thai",
            "description": "Weeknight noodles",
            "category": "noodles",
            "ingredients": ["rice noodles", "tamarind"],
            "videoUrl": "https://cdn.example.com/v/pad-thai.mp4",
            "thumbnailUrl": "https://cdn.example.com/t/pad-thai.jpg",
            "duration": 540
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Video = test::read_body_json(resp).await;
    assert_eq!(created.author_id, user);
    assert_eq!(created.views, 0);
    assert!(created.likes.is_empty());
    assert!(ctx.videos.get(created.id).is_some());
}

#[actix_web::test]
async fn test_upload_rejects_invalid_payload() {
    let ctx = TestContext::new();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/videos/upload")
        .insert_header(bearer(Uuid::new_v4()))
        .set_json(json!({
            "title": "",
            "description": "Weeknight noodles",
            "category": "noodles",
            "ingredients": [],
            "videoUrl": "nope",
            "thumbnailUrl": "https://cdn.example.com/t.jpg"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_only_author_can_delete_video() {
    let ctx = TestContext::new();
    let target = ctx.videos.insert(video("mains", 0, 0, Duration::hours(1)));
    let app = test_app!(ctx);
    let uri = format!("/api/v1/videos/{}", target.id);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(target.author_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_author_updates_blog_partially() {
    let ctx = TestContext::new();
    let target = ctx.blogs.insert(blog("baking", 0, 0, Duration::hours(1)));
    let app = test_app!(ctx);
    let uri = format!("/api/v1/blogs/{}", target.id);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(Uuid::new_v4()))
        .set_json(json!({ "title": "Hijacked" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(target.author_id))
        .set_json(json!({ "title": "Brown Butter Cookies", "servings": 24 }))
        .to_request();
    let updated: Blog = test::call_and_read_body_json(&app, req).await;

    assert_eq!(updated.title, "Brown Butter Cookies");
    assert_eq!(updated.servings, Some(24));
    assert_eq!(updated.description, target.description);
    assert_eq!(updated.ingredients, target.ingredients);
}

#[actix_web::test]
async fn test_create_blog_returns_created() {
    let ctx = TestContext::new();
    let user = Uuid::new_v4();
    let app = test_app!(ctx);

    let req = test::TestRequest::post()
        .uri("/api/v1/blogs/create")
        .insert_header(bearer(user))
        .set_json(json!({
            "title": "Focaccia",
            "description": "Olive oil flatbread",
            "image": "https://cdn.example.com/b/focaccia.jpg",
            "category": "baking",
            "prepTime": 20,
            "cookingTime": 25,
            "ingredients": ["flour", "olive oil"],
            "instructions": ["Mix", "Proof", "Bake"],
            "nutrition": { "calories": 250.0 }
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Blog = test::read_body_json(resp).await;
    assert_eq!(created.author_id, user);
    assert_eq!(created.nutrition.and_then(|n| n.calories), Some(250.0));
}

#[actix_web::test]
async fn test_related_videos_share_category_or_ingredient() {
    let ctx = TestContext::new();
    let mut base = video("curry", 0, 0, Duration::hours(5));
    base.ingredients = vec!["coconut milk".into()];
    let base = ctx.videos.insert(base);

    let same_category = ctx.videos.insert(video("curry", 0, 0, Duration::hours(1)));
    let mut shared = video("soup", 0, 0, Duration::hours(2));
    shared.ingredients = vec!["coconut milk".into(), "lime".into()];
    let shared = ctx.videos.insert(shared);
    ctx.videos.insert(video("dessert", 0, 0, Duration::hours(3)));
    let app = test_app!(ctx);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/videos/{}/related", base.id))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let related: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        related,
        vec![same_category.id.to_string(), shared.id.to_string()]
    );
}
