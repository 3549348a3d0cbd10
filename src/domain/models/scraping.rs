// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 已抓取的页面
///
/// 每个URL只会有一条记录，写入后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    pub id: i32,
    pub url: String,
    /// `<title>` 中的标题
    pub title: Option<String>,
    /// HTTP 状态码
    pub status_code: Option<i32>,
    /// HTML 内容长度（字符数）
    pub content_length: Option<i32>,
    pub scraped_at: DateTime<FixedOffset>,
}

impl fmt::Display for ScrapedPage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ID: {} | URL: {} | Status: ", self.id, self.url)?;
        match self.status_code {
            Some(code) => write!(f, "{}", code),
            None => write!(f, "N/A"),
        }
    }
}

/// 从页面中提取出的文章
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedArticle {
    pub id: i32,
    pub page_id: i32,
    pub title: String,
    pub author: String,
    /// 发布日期，保持页面上的原始文本
    pub publish_date: String,
    pub content_preview: String,
    pub article_url: String,
    pub extracted_at: DateTime<FixedOffset>,
}

impl fmt::Display for ScrapedArticle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ID: {} | Title: {} | Author: {}",
            self.id, self.title, self.author
        )
    }
}

/// 抓取过程中记录的错误
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapingError {
    pub id: i32,
    /// 失败发生在页面入库之前时为空
    pub page_id: Option<i32>,
    pub url_attempted: String,
    pub error_type: String,
    pub error_message: String,
    pub occurred_at: DateTime<FixedOffset>,
}

impl fmt::Display for ScrapingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ID: {} | Type: {} | URL: {}",
            self.id, self.error_type, self.url_attempted
        )
    }
}

/// 待写入的页面
#[derive(Debug, Clone, PartialEq)]
pub struct NewScrapedPage {
    pub url: String,
    pub title: String,
    pub status_code: u16,
    pub content_length: usize,
}

/// 启发式提取出的文章字段，缺失的字段已填充占位值
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedArticle {
    pub title: String,
    pub author: String,
    pub publish_date: String,
    pub content_preview: String,
    pub article_url: String,
}

/// 待写入的错误记录
#[derive(Debug, Clone, PartialEq)]
pub struct NewScrapingError {
    pub page_id: Option<i32>,
    pub url_attempted: String,
    pub error_type: String,
    pub error_message: String,
}

/// 单个URL的抓取结果
#[derive(Debug, Clone, PartialEq)]
pub enum ScrapeOutcome {
    /// 该URL之前已经抓取过，本次未发起请求
    AlreadyScraped,
    /// 抓取并入库成功
    Scraped { page_id: i32, articles: usize },
    /// 抓取失败，已尽力写入错误记录
    Failed { error_type: String, message: String },
}

impl ScrapeOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, ScrapeOutcome::Failed { .. })
    }
}

/// 多URL抓取统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScrapeBatchStats {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    pub failed_urls: Vec<String>,
}
