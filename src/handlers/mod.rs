/// HTTP request handlers
///
/// Handlers validate and type the inbound request, then delegate to the
/// service layer; the services never re-validate.
pub mod categories;
pub mod feed;
pub mod health;
pub mod posts;

pub use categories::list_categories;
pub use feed::get_feed;
pub use health::{health_check, HealthState};
pub use posts::{create_post, dislike_post, get_post, like_post};
