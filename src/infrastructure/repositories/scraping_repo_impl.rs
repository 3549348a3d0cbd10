// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::domain::models::scraping::{
    ExtractedArticle, NewScrapedPage, NewScrapingError, ScrapedArticle, ScrapedPage, ScrapingError,
};
use crate::domain::repositories::scraping_repository::ScrapingRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::infrastructure::database::entities::{
    scraped_article as article_entity, scraped_page as page_entity,
    scraping_error as error_entity,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::sync::Arc;

/// 抓取结果仓库实现
#[derive(Clone)]
pub struct ScrapingRepositoryImpl {
    db: Arc<DatabaseConnection>,
}

impl ScrapingRepositoryImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn insert_page_with_articles(
        txn: &DatabaseTransaction,
        page: &NewScrapedPage,
        articles: &[ExtractedArticle],
    ) -> Result<i32, RepositoryError> {
        let now = Utc::now();

        let page_model = page_entity::ActiveModel {
            url: Set(page.url.clone()),
            title: Set(Some(page.title.clone())),
            status_code: Set(Some(i32::from(page.status_code))),
            content_length: Set(Some(
                i32::try_from(page.content_length).unwrap_or(i32::MAX),
            )),
            scraped_at: Set(now.into()),
            ..Default::default()
        }
        .insert(txn)
        .await?;

        for article in articles {
            article_entity::ActiveModel {
                page_id: Set(page_model.id),
                title: Set(article.title.clone()),
                author: Set(article.author.clone()),
                publish_date: Set(article.publish_date.clone()),
                content_preview: Set(article.content_preview.clone()),
                article_url: Set(article.article_url.clone()),
                extracted_at: Set(now.into()),
                ..Default::default()
            }
            .insert(txn)
            .await?;
        }

        Ok(page_model.id)
    }
}

impl From<page_entity::Model> for ScrapedPage {
    fn from(model: page_entity::Model) -> Self {
        Self {
            id: model.id,
            url: model.url,
            title: model.title,
            status_code: model.status_code,
            content_length: model.content_length,
            scraped_at: model.scraped_at,
        }
    }
}

impl From<article_entity::Model> for ScrapedArticle {
    fn from(model: article_entity::Model) -> Self {
        Self {
            id: model.id,
            page_id: model.page_id,
            title: model.title,
            author: model.author,
            publish_date: model.publish_date,
            content_preview: model.content_preview,
            article_url: model.article_url,
            extracted_at: model.extracted_at,
        }
    }
}

impl From<error_entity::Model> for ScrapingError {
    fn from(model: error_entity::Model) -> Self {
        Self {
            id: model.id,
            page_id: model.page_id,
            url_attempted: model.url_attempted,
            error_type: model.error_type,
            error_message: model.error_message,
            occurred_at: model.occurred_at,
        }
    }
}

#[async_trait]
impl ScrapingRepository for ScrapingRepositoryImpl {
    async fn page_exists(&self, url: &str) -> Result<bool, RepositoryError> {
        let count = page_entity::Entity::find()
            .filter(page_entity::Column::Url.eq(url))
            .count(self.db.as_ref())
            .await?;

        Ok(count > 0)
    }

    async fn save_page(
        &self,
        page: &NewScrapedPage,
        articles: &[ExtractedArticle],
    ) -> Result<i32, RepositoryError> {
        let txn = self.db.begin().await?;

        match Self::insert_page_with_articles(&txn, page, articles).await {
            Ok(page_id) => {
                txn.commit().await?;
                Ok(page_id)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn record_error(&self, error: &NewScrapingError) -> Result<(), RepositoryError> {
        let txn = self.db.begin().await?;

        let model = error_entity::ActiveModel {
            page_id: Set(error.page_id),
            url_attempted: Set(error.url_attempted.clone()),
            error_type: Set(error.error_type.clone()),
            error_message: Set(error.error_message.clone()),
            occurred_at: Set(Utc::now().into()),
            ..Default::default()
        };

        match model.insert(&txn).await {
            Ok(_) => {
                txn.commit().await?;
                Ok(())
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn find_page_by_url(&self, url: &str) -> Result<Option<ScrapedPage>, RepositoryError> {
        let model = page_entity::Entity::find()
            .filter(page_entity::Column::Url.eq(url))
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn find_articles_by_page(
        &self,
        page_id: i32,
    ) -> Result<Vec<ScrapedArticle>, RepositoryError> {
        let models = article_entity::Entity::find()
            .filter(article_entity::Column::PageId.eq(page_id))
            .order_by_asc(article_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_errors_by_url(&self, url: &str) -> Result<Vec<ScrapingError>, RepositoryError> {
        let models = error_entity::Entity::find()
            .filter(error_entity::Column::UrlAttempted.eq(url))
            .order_by_asc(error_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }
}
