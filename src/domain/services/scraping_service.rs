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
    NewScrapedPage, NewScrapingError, ScrapeBatchStats, ScrapeOutcome,
};
use crate::domain::repositories::scraping_repository::ScrapingRepository;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::services::extraction_service::{truncate_chars, ExtractionService};
use crate::engines::traits::{EngineError, PageFetcher};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};
use url::Url;

/// 单个URL抓取失败的原因
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// URL 无法解析
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// 获取页面失败
    #[error(transparent)]
    Engine(#[from] EngineError),
    /// 持久化失败
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl ScrapeError {
    /// 写入错误记录的类型名称
    pub fn kind(&self) -> &'static str {
        match self {
            ScrapeError::InvalidUrl(_) => "InvalidUrl",
            ScrapeError::Engine(e) => e.kind(),
            ScrapeError::Repository(_) => "Database",
        }
    }
}

/// 抓取服务
///
/// 下载页面、提取文章并保存结果。每个URL只抓取一次，失败不重试。
pub struct ScrapingService<R: ScrapingRepository, F: PageFetcher> {
    /// 抓取结果仓库
    repo: Arc<R>,
    /// 页面获取引擎
    fetcher: Arc<F>,
}

impl<R: ScrapingRepository, F: PageFetcher> ScrapingService<R, F> {
    /// 创建新的抓取服务实例
    pub fn new(repo: Arc<R>, fetcher: Arc<F>) -> Self {
        Self { repo, fetcher }
    }

    /// 抓取单个URL
    ///
    /// 已抓取过的URL直接返回 `AlreadyScraped`，不会发起请求。
    /// 失败时页面和文章都不会写入，改为写入一条错误记录。
    #[instrument(skip(self))]
    pub async fn scrape_url(&self, url: &str) -> ScrapeOutcome {
        match self.try_scrape(url).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let error_type = e.kind().to_string();
                let message = e.to_string();
                warn!("Failed to scrape {}: {}", url, message);

                let record = NewScrapingError {
                    page_id: None,
                    url_attempted: url.to_string(),
                    error_type: error_type.clone(),
                    error_message: message.clone(),
                };
                if let Err(record_err) = self.repo.record_error(&record).await {
                    error!("Failed to record scraping error for {}: {}", url, record_err);
                }

                ScrapeOutcome::Failed {
                    error_type,
                    message,
                }
            }
        }
    }

    async fn try_scrape(&self, url: &str) -> Result<ScrapeOutcome, ScrapeError> {
        if self.repo.page_exists(url).await? {
            info!("URL already scraped: {}", url);
            return Ok(ScrapeOutcome::AlreadyScraped);
        }

        let page_url = Url::parse(url)?;

        info!("Downloading {} with {}", url, self.fetcher.name());
        let response = self.fetcher.fetch(url).await?;

        let extracted = ExtractionService::extract(&response.content, &page_url);
        let page = NewScrapedPage {
            url: url.to_string(),
            title: truncate_chars(&extracted.title, 255),
            status_code: response.status_code,
            content_length: response.content.chars().count(),
        };

        let page_id = self.repo.save_page(&page, &extracted.articles).await?;
        info!(
            "Extracted {} articles from {}",
            extracted.articles.len(),
            url
        );

        Ok(ScrapeOutcome::Scraped {
            page_id,
            articles: extracted.articles.len(),
        })
    }

    /// 依次抓取多个URL
    ///
    /// 严格顺序执行，单个URL失败不影响后续URL
    pub async fn scrape_urls(&self, urls: &[String]) -> ScrapeBatchStats {
        let mut stats = ScrapeBatchStats {
            total: urls.len(),
            ..Default::default()
        };

        for url in urls {
            if self.scrape_url(url).await.is_success() {
                stats.success += 1;
            } else {
                stats.failed += 1;
                stats.failed_urls.push(url.clone());
            }
        }

        stats
    }
}
