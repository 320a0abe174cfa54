pub mod blog_post;
pub mod category;
pub mod user;

pub use blog_post::{Entity as BlogPost, Model as BlogPostModel};
pub use category::{Entity as Category, Model as CategoryModel};
pub use user::{Entity as User, Model as UserModel};
