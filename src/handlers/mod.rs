pub mod auth;
pub mod blog_post;
pub mod category;

pub use auth::*;
