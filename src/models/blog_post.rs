use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DIFFICULTY_BEGINNER: &str = "BEGINNER";
pub const DIFFICULTY_INTERMEDIATE: &str = "INTERMEDIATE";
pub const DIFFICULTY_ADVANCED: &str = "ADVANCED";

pub fn is_valid_difficulty(value: &str) -> bool {
    matches!(
        value,
        DIFFICULTY_BEGINNER | DIFFICULTY_INTERMEDIATE | DIFFICULTY_ADVANCED
    )
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "blog_posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub slug: String,
    pub title_ko: String,
    pub title_en: String,
    pub title_ja: String,
    pub excerpt_ko: Option<String>,
    pub excerpt_en: Option<String>,
    pub excerpt_ja: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub content_ko: String,
    #[sea_orm(column_type = "Text")]
    pub content_en: String,
    #[sea_orm(column_type = "Text")]
    pub content_ja: String,
    pub thumbnail_url: Option<String>,
    pub difficulty: String,
    pub reading_time: Option<i32>,
    pub view_count: i32,
    pub like_count: i32,
    #[sea_orm(column_type = "Text")]
    pub meta_keywords: String,
    pub published: bool,
    pub published_at: Option<DateTime>,
    pub author_id: i32,
    pub category_id: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_values() {
        assert!(is_valid_difficulty("BEGINNER"));
        assert!(is_valid_difficulty("INTERMEDIATE"));
        assert!(is_valid_difficulty("ADVANCED"));
        assert!(!is_valid_difficulty("beginner"));
        assert!(!is_valid_difficulty("EXPERT"));
    }
}
