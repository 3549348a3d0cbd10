// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

/// 抓取相关表迁移（scraped_page、scraped_article、scraping_error）
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ScrapedPage::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapedPage::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ScrapedPage::Url)
                            .string_len(500)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ScrapedPage::Title).string_len(255))
                    .col(ColumnDef::new(ScrapedPage::StatusCode).integer())
                    .col(ColumnDef::new(ScrapedPage::ContentLength).integer())
                    .col(
                        ColumnDef::new(ScrapedPage::ScrapedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ScrapedArticle::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapedArticle::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapedArticle::PageId).integer().not_null())
                    .col(ColumnDef::new(ScrapedArticle::Title).string_len(255).not_null())
                    .col(ColumnDef::new(ScrapedArticle::Author).string_len(100).not_null())
                    .col(ColumnDef::new(ScrapedArticle::PublishDate).string_len(50).not_null())
                    .col(ColumnDef::new(ScrapedArticle::ContentPreview).text().not_null())
                    .col(ColumnDef::new(ScrapedArticle::ArticleUrl).text().not_null())
                    .col(
                        ColumnDef::new(ScrapedArticle::ExtractedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scraped_article_page")
                            .from(ScrapedArticle::Table, ScrapedArticle::PageId)
                            .to(ScrapedPage::Table, ScrapedPage::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // page_id is null when the failure precedes the page row
        manager
            .create_table(
                Table::create()
                    .table(ScrapingError::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ScrapingError::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ScrapingError::PageId).integer().null())
                    .col(
                        ColumnDef::new(ScrapingError::UrlAttempted)
                            .string_len(500)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ScrapingError::ErrorType).string_len(100).not_null())
                    .col(ColumnDef::new(ScrapingError::ErrorMessage).text().not_null())
                    .col(
                        ColumnDef::new(ScrapingError::OccurredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scraping_error_page")
                            .from(ScrapingError::Table, ScrapingError::PageId)
                            .to(ScrapedPage::Table, ScrapedPage::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scraped_article_page_id")
                    .table(ScrapedArticle::Table)
                    .col(ScrapedArticle::PageId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_scraping_error_page_id")
                    .table(ScrapingError::Table)
                    .col(ScrapingError::PageId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ScrapingError::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScrapedArticle::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ScrapedPage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ScrapedPage {
    Table,
    Id,
    Url,
    Title,
    StatusCode,
    ContentLength,
    ScrapedAt,
}

#[derive(DeriveIden)]
enum ScrapedArticle {
    Table,
    Id,
    PageId,
    Title,
    Author,
    PublishDate,
    ContentPreview,
    ArticleUrl,
    ExtractedAt,
}

#[derive(DeriveIden)]
enum ScrapingError {
    Table,
    Id,
    PageId,
    UrlAttempted,
    ErrorType,
    ErrorMessage,
    OccurredAt,
}
