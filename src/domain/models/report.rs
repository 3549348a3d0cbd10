// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use sea_orm::FromQueryResult;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// 报表行
///
/// 同一行数据有两种访问形态：按列名访问的关联形态，
/// 以及按列顺序访问的位置形态。
pub trait ReportRow {
    /// 列名，顺序与 `values` 一致
    const COLUMNS: &'static [&'static str];

    /// 位置形态
    fn values(&self) -> Vec<Value>;

    /// 关联形态
    fn to_associative(&self) -> Map<String, Value> {
        Self::COLUMNS
            .iter()
            .map(|c| c.to_string())
            .zip(self.values())
            .collect()
    }
}

/// 待处理任务及其用户、分类（INNER JOIN）
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct PendingTaskRow {
    pub description: String,
    pub status: String,
    pub user_name: String,
    pub category_name: String,
}

impl ReportRow for PendingTaskRow {
    const COLUMNS: &'static [&'static str] = &["description", "status", "user_name", "category_name"];

    fn values(&self) -> Vec<Value> {
        vec![
            json!(self.description),
            json!(self.status),
            json!(self.user_name),
            json!(self.category_name),
        ]
    }
}

/// 分类下的待处理任务数（LEFT JOIN）
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct CategoryPendingCountRow {
    pub category_name: String,
    pub pending_tasks_count: i64,
}

impl ReportRow for CategoryPendingCountRow {
    const COLUMNS: &'static [&'static str] = &["category_name", "pending_tasks_count"];

    fn values(&self) -> Vec<Value> {
        vec![json!(self.category_name), json!(self.pending_tasks_count)]
    }
}

/// 用户及其任务（RIGHT JOIN），没有任务的用户对应空描述
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct UserTaskRow {
    pub user_name: String,
    pub task_description: Option<String>,
}

impl ReportRow for UserTaskRow {
    const COLUMNS: &'static [&'static str] = &["user_name", "task_description"];

    fn values(&self) -> Vec<Value> {
        vec![json!(self.user_name), json!(self.task_description)]
    }
}

/// 抓取汇总统计
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ScrapingSummary {
    pub total_pages: i64,
    pub total_articles: i64,
    pub total_errors: i64,
    /// 各页面文章数的平均值，没有页面时为 0
    pub avg_articles_per_page: f64,
}

/// 含文章的页面（INNER JOIN）
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct PageArticlesRow {
    pub id: i32,
    pub url: String,
    pub page_title: Option<String>,
    pub scraped_at: DateTime<FixedOffset>,
    pub articles_count: i64,
}

impl ReportRow for PageArticlesRow {
    const COLUMNS: &'static [&'static str] =
        &["id", "url", "page_title", "scraped_at", "articles_count"];

    fn values(&self) -> Vec<Value> {
        vec![
            json!(self.id),
            json!(self.url),
            json!(self.page_title),
            json!(self.scraped_at.to_rfc3339()),
            json!(self.articles_count),
        ]
    }
}

/// 页面及其错误统计（LEFT JOIN）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageErrorsRow {
    pub url: String,
    pub title: Option<String>,
    pub status_code: Option<i32>,
    pub error_count: i64,
    /// 去重后的错误类型
    pub error_types: Vec<String>,
}

impl ReportRow for PageErrorsRow {
    const COLUMNS: &'static [&'static str] =
        &["url", "title", "status_code", "error_count", "error_types"];

    fn values(&self) -> Vec<Value> {
        vec![
            json!(self.url),
            json!(self.title),
            json!(self.status_code),
            json!(self.error_count),
            json!(self.error_types),
        ]
    }
}

/// 错误及其关联页面（LEFT JOIN）
#[derive(Debug, Clone, PartialEq, Serialize, FromQueryResult)]
pub struct ErrorWithPageRow {
    pub id: i32,
    pub url_attempted: String,
    pub error_type: Option<String>,
    pub error_message: Option<String>,
    pub occurred_at: DateTime<FixedOffset>,
    pub page_url: Option<String>,
    pub page_title: Option<String>,
}

impl ReportRow for ErrorWithPageRow {
    const COLUMNS: &'static [&'static str] = &[
        "id",
        "url_attempted",
        "error_type",
        "error_message",
        "occurred_at",
        "page_url",
        "page_title",
    ];

    fn values(&self) -> Vec<Value> {
        vec![
            json!(self.id),
            json!(self.url_attempted),
            json!(self.error_type),
            json!(self.error_message),
            json!(self.occurred_at.to_rfc3339()),
            json!(self.page_url),
            json!(self.page_title),
        ]
    }
}

/// 按作者统计的文章数
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorArticlesRow {
    pub author: String,
    pub article_count: i64,
    /// 涉及的不同页面数
    pub source_count: i64,
    /// 去重排序后的来源页面URL
    pub sources: Vec<String>,
}

impl ReportRow for AuthorArticlesRow {
    const COLUMNS: &'static [&'static str] =
        &["author", "article_count", "source_count", "sources"];

    fn values(&self) -> Vec<Value> {
        vec![
            json!(self.author),
            json!(self.article_count),
            json!(self.source_count),
            json!(self.sources),
        ]
    }
}
