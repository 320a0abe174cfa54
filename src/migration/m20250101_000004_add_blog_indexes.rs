use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum BlogPosts {
    Table,
    Published,
    PublishedAt,
    ViewCount,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Listing queries filter on published and order by publish time.
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_published_published_at")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::Published)
                    .col(BlogPosts::PublishedAt)
                    .to_owned(),
            )
            .await?;

        // Featured posts order by view count.
        manager
            .create_index(
                Index::create()
                    .name("idx_blog_posts_view_count")
                    .table(BlogPosts::Table)
                    .col(BlogPosts::ViewCount)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_blog_posts_published_published_at")
                    .table(BlogPosts::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_blog_posts_view_count")
                    .table(BlogPosts::Table)
                    .to_owned(),
            )
            .await
    }
}
