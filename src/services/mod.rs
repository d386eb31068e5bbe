/// Business logic layer
pub mod categories;
pub mod feed;
pub mod posts;
pub mod score;

pub use categories::CategoryService;
pub use feed::{FeedParams, FeedService};
pub use posts::PostService;
