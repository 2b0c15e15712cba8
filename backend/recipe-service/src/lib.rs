/// Recipe Service Library
///
/// Serves recipe videos and recipe blog posts for the recipe-sharing platform:
/// chronological listings, trending/featured rankings, and engagement
/// counters (likes, dislikes, views, saved blogs).
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Videos, blogs, and request/response types
/// - `services`: Ranking core and content use-cases
/// - `db`: Storage traits and PostgreSQL stores
/// - `middleware`: Bearer-token identity and request timing
/// - `error`: Error types and handling
/// - `config`: Configuration management
/// - `metrics`: Prometheus collectors
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod openapi;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
