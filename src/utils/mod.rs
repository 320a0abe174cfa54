pub mod jwt;
pub mod keywords;
pub mod password;

pub use jwt::encode_token;
pub use keywords::{join_keywords, split_keywords};
pub use password::{hash_password, verify_password};
