use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Slug,
    NameKo,
    NameEn,
    NameJa,
    DescriptionKo,
    DescriptionEn,
    DescriptionJa,
    Icon,
    Color,
    SortOrder,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Categories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Categories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Categories::Slug)
                            .string_len(100)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Categories::NameKo).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::NameEn).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::NameJa).string_len(100).not_null())
                    .col(ColumnDef::new(Categories::DescriptionKo).string_len(500).null())
                    .col(ColumnDef::new(Categories::DescriptionEn).string_len(500).null())
                    .col(ColumnDef::new(Categories::DescriptionJa).string_len(500).null())
                    .col(ColumnDef::new(Categories::Icon).string_len(20).null())
                    .col(ColumnDef::new(Categories::Color).string_len(20).null())
                    .col(
                        ColumnDef::new(Categories::SortOrder)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Categories::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Categories::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Categories::Table).to_owned())
            .await
    }
}
