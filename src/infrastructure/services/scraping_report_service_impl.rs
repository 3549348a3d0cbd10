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

use crate::domain::models::report::{
    AuthorArticlesRow, ErrorWithPageRow, PageArticlesRow, PageErrorsRow, ScrapingSummary,
};
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::services::scraping_report_service::{
    ScrapingReportService, AUTHOR_REPORT_LIMIT,
};
use crate::infrastructure::database::dialect::{distinct_string_agg, placeholder, split_aggregate};
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, FromQueryResult, Statement};
use std::sync::Arc;
use tracing::error;

/// 页面错误统计的原始行，错误类型尚未拆分
#[derive(Debug, FromQueryResult)]
struct PageErrorsRaw {
    url: String,
    title: Option<String>,
    status_code: Option<i32>,
    error_count: i64,
    error_types: Option<String>,
}

impl From<PageErrorsRaw> for PageErrorsRow {
    fn from(raw: PageErrorsRaw) -> Self {
        Self {
            url: raw.url,
            title: raw.title,
            status_code: raw.status_code,
            error_count: raw.error_count,
            error_types: split_aggregate(raw.error_types),
        }
    }
}

/// 作者统计的原始行，来源URL尚未拆分
#[derive(Debug, FromQueryResult)]
struct AuthorArticlesRaw {
    author: String,
    article_count: i64,
    source_count: i64,
    sources: Option<String>,
}

impl From<AuthorArticlesRaw> for AuthorArticlesRow {
    fn from(raw: AuthorArticlesRaw) -> Self {
        Self {
            author: raw.author,
            article_count: raw.article_count,
            source_count: raw.source_count,
            sources: split_aggregate(raw.sources),
        }
    }
}

fn log_failure(report: &'static str) -> impl Fn(DbErr) -> RepositoryError {
    move |e| {
        error!("{} report failed: {}", report, e);
        e.into()
    }
}

/// 抓取报表服务实现
pub struct ScrapingReportServiceImpl {
    db: Arc<DatabaseConnection>,
}

impl ScrapingReportServiceImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ScrapingReportService for ScrapingReportServiceImpl {
    async fn summary(&self) -> Result<ScrapingSummary, RepositoryError> {
        let stmt = Statement::from_string(
            self.db.get_database_backend(),
            r#"SELECT
                (SELECT COUNT(*) FROM scraped_page) AS total_pages,
                (SELECT COUNT(*) FROM scraped_article) AS total_articles,
                (SELECT COUNT(*) FROM scraping_error) AS total_errors,
                (SELECT CAST(COALESCE(AVG(per_page.articles_count), 0) AS DOUBLE PRECISION)
                    FROM (
                        SELECT (SELECT COUNT(*) FROM scraped_article sa WHERE sa.page_id = sp.id)
                            AS articles_count
                        FROM scraped_page sp
                    ) per_page
                ) AS avg_articles_per_page"#,
        );

        let summary = ScrapingSummary::find_by_statement(stmt)
            .one(self.db.as_ref())
            .await
            .map_err(log_failure("Summary"))?;

        Ok(summary.unwrap_or(ScrapingSummary {
            total_pages: 0,
            total_articles: 0,
            total_errors: 0,
            avg_articles_per_page: 0.0,
        }))
    }

    async fn pages_with_articles(&self) -> Result<Vec<PageArticlesRow>, RepositoryError> {
        let stmt = Statement::from_string(
            self.db.get_database_backend(),
            r#"SELECT sp.id, sp.url, sp.title AS page_title, sp.scraped_at,
                COUNT(sa.id) AS articles_count
            FROM scraped_page sp
            INNER JOIN scraped_article sa ON sp.id = sa.page_id
            GROUP BY sp.id, sp.url, sp.title, sp.scraped_at
            ORDER BY articles_count DESC, sp.id"#,
        );

        PageArticlesRow::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(log_failure("INNER JOIN"))
    }

    async fn pages_with_errors(&self) -> Result<Vec<PageErrorsRow>, RepositoryError> {
        let backend = self.db.get_database_backend();
        let sql = format!(
            r#"SELECT sp.url, sp.title, sp.status_code,
                COUNT(se.id) AS error_count,
                {} AS error_types
            FROM scraped_page sp
            LEFT JOIN scraping_error se ON sp.id = se.page_id
            GROUP BY sp.id, sp.url, sp.title, sp.status_code
            ORDER BY error_count DESC, sp.url"#,
            distinct_string_agg(backend, "se.error_type")
        );

        let rows = PageErrorsRaw::find_by_statement(Statement::from_string(backend, sql))
            .all(self.db.as_ref())
            .await
            .map_err(log_failure("LEFT JOIN"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn errors_with_pages(&self) -> Result<Vec<ErrorWithPageRow>, RepositoryError> {
        let stmt = Statement::from_string(
            self.db.get_database_backend(),
            r#"SELECT se.id, se.url_attempted, se.error_type, se.error_message, se.occurred_at,
                sp.url AS page_url, sp.title AS page_title
            FROM scraping_error se
            LEFT JOIN scraped_page sp ON se.page_id = sp.id
            ORDER BY se.occurred_at DESC, se.id DESC"#,
        );

        ErrorWithPageRow::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(log_failure("Errors"))
    }

    async fn articles_by_author(&self) -> Result<Vec<AuthorArticlesRow>, RepositoryError> {
        let backend = self.db.get_database_backend();
        let sql = format!(
            r#"SELECT sa.author, COUNT(sa.id) AS article_count,
                COUNT(DISTINCT sa.page_id) AS source_count,
                {} AS sources
            FROM scraped_article sa
            INNER JOIN scraped_page sp ON sa.page_id = sp.id
            WHERE sa.author <> {}
            GROUP BY sa.author
            ORDER BY article_count DESC, sa.author
            LIMIT {}"#,
            distinct_string_agg(backend, "sp.url"),
            placeholder(backend, 1),
            AUTHOR_REPORT_LIMIT
        );
        let stmt = Statement::from_sql_and_values(backend, sql, ["Unknown".into()]);

        let rows = AuthorArticlesRaw::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(log_failure("Author"))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
