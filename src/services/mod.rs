pub mod auth;
pub mod blog_post;
pub mod cache;
pub mod category;
pub mod seed;
