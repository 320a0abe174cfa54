use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Id,
    Slug,
    TitleKo,
    TitleEn,
    TitleJa,
    ExcerptKo,
    ExcerptEn,
    ExcerptJa,
    ContentKo,
    ContentEn,
    ContentJa,
    ThumbnailUrl,
    Difficulty,
    ReadingTime,
    ViewCount,
    LikeCount,
    MetaKeywords,
    Published,
    PublishedAt,
    AuthorId,
    CategoryId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BlogPosts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BlogPosts::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Slug)
                            .string_len(200)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(BlogPosts::TitleKo).string_len(200).not_null())
                    .col(ColumnDef::new(BlogPosts::TitleEn).string_len(200).not_null())
                    .col(ColumnDef::new(BlogPosts::TitleJa).string_len(200).not_null())
                    .col(ColumnDef::new(BlogPosts::ExcerptKo).string_len(500).null())
                    .col(ColumnDef::new(BlogPosts::ExcerptEn).string_len(500).null())
                    .col(ColumnDef::new(BlogPosts::ExcerptJa).string_len(500).null())
                    .col(ColumnDef::new(BlogPosts::ContentKo).text().not_null())
                    .col(ColumnDef::new(BlogPosts::ContentEn).text().not_null())
                    .col(ColumnDef::new(BlogPosts::ContentJa).text().not_null())
                    .col(ColumnDef::new(BlogPosts::ThumbnailUrl).string_len(500).null())
                    .col(
                        ColumnDef::new(BlogPosts::Difficulty)
                            .string_len(20)
                            .not_null()
                            .default("BEGINNER"),
                    )
                    .col(ColumnDef::new(BlogPosts::ReadingTime).integer().null())
                    .col(
                        ColumnDef::new(BlogPosts::ViewCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::LikeCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::MetaKeywords)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::Published)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(BlogPosts::PublishedAt).timestamp().null())
                    .col(ColumnDef::new(BlogPosts::AuthorId).integer().not_null())
                    .col(ColumnDef::new(BlogPosts::CategoryId).integer().not_null())
                    .col(
                        ColumnDef::new(BlogPosts::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BlogPosts::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_author_id")
                            .from(BlogPosts::Table, BlogPosts::AuthorId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_blog_posts_category_id")
                            .from(BlogPosts::Table, BlogPosts::CategoryId)
                            .to(Categories::Table, Categories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_category_id")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::CategoryId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BlogPosts::Table).to_owned())
            .await
    }
}
