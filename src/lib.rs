/// tea-feed service library
///
/// A feed-ranking API: clients submit posts into categories, react with
/// like/dislike, and retrieve a paginated feed ordered either by raw
/// popularity or by a time-decayed popularity score.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: data structures for posts, categories, likes and feed pages
/// - `services`: business logic (scoring, feed assembly, like toggling)
/// - `db`: persistent store abstraction and the Postgres adapter
/// - `cache`: counter/cache store abstraction, Redis adapter, read-through layer
/// - `middleware`: identity extraction and rate limiting
/// - `error`: error taxonomy and HTTP mapping
/// - `config`: configuration management
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
