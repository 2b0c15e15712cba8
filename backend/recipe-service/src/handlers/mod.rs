/// HTTP handlers for recipe content
///
/// This module contains handlers for:
/// - Videos: chronological listing, trending, upload registration, engagement
/// - Blogs: chronological listing, featured, authoring, engagement, saves
///
/// Identity comes from `JwtAuthMiddleware`; write handlers take `UserId`.
pub mod blogs;
pub mod listing;
pub mod videos;

use actix_web::web;

use crate::error::AppError;

pub use blogs::{
    create_blog, delete_blog, get_blog, get_featured_blogs, increment_blog_views, list_blogs,
    toggle_blog_like, toggle_saved_blog, update_blog,
};
pub use listing::{ListingQuery, RankedQuery};
pub use videos::{
    delete_video, get_related_videos, get_trending_videos, get_video, increment_video_views,
    list_videos, toggle_video_like, upload_video,
};

/// Register the content routes. Mounted under `/api/v1`.
///
/// Extractor failures are rendered through `AppError` so every rejection
/// carries the same JSON body as handler errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::InvalidArgument(err.to_string()).into()
    }))
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::InvalidArgument(err.to_string()).into()
    }))
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .service(
        web::scope("/videos")
            .service(web::resource("").route(web::get().to(list_videos)))
            .route("/trending", web::get().to(get_trending_videos))
            .route("/upload", web::post().to(upload_video))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_video))
                    .route(web::delete().to(delete_video)),
            )
            .route("/{id}/related", web::get().to(get_related_videos))
            .route("/{id}/views", web::post().to(increment_video_views))
            .route("/{id}/toggle-like", web::post().to(toggle_video_like)),
    )
    .service(
        web::scope("/blogs")
            .service(web::resource("").route(web::get().to(list_blogs)))
            .route("/featured", web::get().to(get_featured_blogs))
            .route("/create", web::post().to(create_blog))
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_blog))
                    .route(web::patch().to(update_blog))
                    .route(web::delete().to(delete_blog)),
            )
            .route("/{id}/views", web::post().to(increment_blog_views))
            .route("/{id}/toggle-like", web::post().to(toggle_blog_like))
            .route("/{id}/save", web::post().to(toggle_saved_blog)),
    );
}
