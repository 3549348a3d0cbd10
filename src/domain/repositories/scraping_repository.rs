// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::scraping::{
    ExtractedArticle, NewScrapedPage, NewScrapingError, ScrapedArticle, ScrapedPage, ScrapingError,
};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 抓取结果仓库特质
///
/// 页面、文章和错误记录只追加，不修改
#[async_trait]
pub trait ScrapingRepository: Send + Sync {
    /// URL 是否已经有页面记录
    async fn page_exists(&self, url: &str) -> Result<bool, RepositoryError>;
    /// 在同一个事务中写入页面及其文章，返回页面ID
    async fn save_page(
        &self,
        page: &NewScrapedPage,
        articles: &[ExtractedArticle],
    ) -> Result<i32, RepositoryError>;
    /// 在独立事务中写入一条错误记录
    async fn record_error(&self, error: &NewScrapingError) -> Result<(), RepositoryError>;
    /// 根据URL查找页面
    async fn find_page_by_url(&self, url: &str) -> Result<Option<ScrapedPage>, RepositoryError>;
    /// 页面下的全部文章
    async fn find_articles_by_page(&self, page_id: i32) -> Result<Vec<ScrapedArticle>, RepositoryError>;
    /// 某个URL的全部错误记录
    async fn find_errors_by_url(&self, url: &str) -> Result<Vec<ScrapingError>, RepositoryError>;
}
