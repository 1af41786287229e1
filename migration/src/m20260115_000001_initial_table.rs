use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShortUrl::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShortUrl::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShortUrl::Key).string().not_null())
                    .col(ColumnDef::new(ShortUrl::SecretKey).string().not_null())
                    .col(ColumnDef::new(ShortUrl::TargetUrl).text().not_null())
                    .col(
                        ColumnDef::new(ShortUrl::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::ClickCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShortUrl::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Uniqueness covers every row, active or not. Deactivated links keep
        // their key forever, so the key space is never recycled.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_key")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::Key)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_secret_key")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::SecretKey)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Non-unique, for reverse lookups by destination.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_target_url")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::TargetUrl)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_short_urls_created_at")
                    .table(ShortUrl::Table)
                    .col(ShortUrl::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_short_urls_created_at").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_short_urls_target_url").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_short_urls_secret_key").to_owned())
            .await?;

        manager
            .drop_index(Index::drop().name("idx_short_urls_key").to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(ShortUrl::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShortUrl {
    #[sea_orm(iden = "short_urls")]
    Table,
    Id,
    Key,
    SecretKey,
    TargetUrl,
    IsActive,
    ClickCount,
    CreatedAt,
}
