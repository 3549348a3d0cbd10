// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::report::{
    AuthorArticlesRow, ErrorWithPageRow, PageArticlesRow, PageErrorsRow, ScrapingSummary,
};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 作者报表的行数上限
pub const AUTHOR_REPORT_LIMIT: u64 = 20;

/// 抓取报表服务特质
#[async_trait]
pub trait ScrapingReportService: Send + Sync {
    /// 页面、文章、错误总数以及每页平均文章数
    async fn summary(&self) -> Result<ScrapingSummary, RepositoryError>;

    /// 含有文章的页面，按文章数降序
    async fn pages_with_articles(&self) -> Result<Vec<PageArticlesRow>, RepositoryError>;

    /// 全部页面及其错误数和错误类型，按错误数降序
    async fn pages_with_errors(&self) -> Result<Vec<PageErrorsRow>, RepositoryError>;

    /// 全部错误及其关联页面，最新的在前
    async fn errors_with_pages(&self) -> Result<Vec<ErrorWithPageRow>, RepositoryError>;

    /// 按作者统计文章数（不含 `Unknown`），最多 20 行
    async fn articles_by_author(&self) -> Result<Vec<AuthorArticlesRow>, RepositoryError>;
}
