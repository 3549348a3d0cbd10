// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::create_test_db;
use async_trait::async_trait;
use sea_orm::DbErr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use taskfy::config::settings::DEFAULT_USER_AGENT;
use taskfy::domain::models::scraping::{
    ExtractedArticle, NewScrapedPage, NewScrapingError, ScrapeOutcome, ScrapedArticle,
    ScrapedPage, ScrapingError,
};
use taskfy::domain::repositories::scraping_repository::ScrapingRepository;
use taskfy::domain::repositories::task_repository::RepositoryError;
use taskfy::domain::services::scraping_service::ScrapingService;
use taskfy::engines::reqwest_engine::ReqwestEngine;
use taskfy::engines::traits::{EngineError, FetchResponse, PageFetcher};
use taskfy::infrastructure::repositories::scraping_repo_impl::ScrapingRepositoryImpl;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BLOG_HTML: &str = r#"
    <html>
        <head><title>Café Blog</title></head>
        <body>
            <article class="post"><h2>One</h2><span class="author">Ana</span><a href="/1">r</a></article>
            <article class="post"><h2>Two</h2><span class="author">Bob</span><a href="/2">r</a></article>
        </body>
    </html>
"#;

/// 返回固定页面并统计调用次数
struct StubFetcher {
    calls: AtomicUsize,
}

impl StubFetcher {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchResponse, EngineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(FetchResponse {
            status_code: 200,
            content: BLOG_HTML.to_string(),
        })
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}

/// 保存页面总是失败的仓库，可选地让错误记录也失败
struct BrokenRepository {
    fail_record: bool,
    recorded: Mutex<Vec<NewScrapingError>>,
    record_attempts: AtomicUsize,
}

impl BrokenRepository {
    fn new(fail_record: bool) -> Self {
        Self {
            fail_record,
            recorded: Mutex::new(Vec::new()),
            record_attempts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ScrapingRepository for BrokenRepository {
    async fn page_exists(&self, _url: &str) -> Result<bool, RepositoryError> {
        Ok(false)
    }

    async fn save_page(
        &self,
        _page: &NewScrapedPage,
        _articles: &[ExtractedArticle],
    ) -> Result<i32, RepositoryError> {
        Err(DbErr::Custom("disk full".to_string()).into())
    }

    async fn record_error(&self, error: &NewScrapingError) -> Result<(), RepositoryError> {
        self.record_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_record {
            return Err(DbErr::Custom("connection lost".to_string()).into());
        }
        self.recorded.lock().unwrap().push(error.clone());
        Ok(())
    }

    async fn find_page_by_url(&self, _url: &str) -> Result<Option<ScrapedPage>, RepositoryError> {
        Ok(None)
    }

    async fn find_articles_by_page(
        &self,
        _page_id: i32,
    ) -> Result<Vec<ScrapedArticle>, RepositoryError> {
        Ok(Vec::new())
    }

    async fn find_errors_by_url(&self, _url: &str) -> Result<Vec<ScrapingError>, RepositoryError> {
        Ok(Vec::new())
    }
}

fn http_engine() -> Arc<ReqwestEngine> {
    Arc::new(ReqwestEngine::new(DEFAULT_USER_AGENT, Duration::from_secs(5)).unwrap())
}

#[tokio::test]
async fn test_scrape_saves_page_once() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/blog"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(BLOG_HTML, "text/html"))
        .expect(1)
        .mount(&server)
        .await;

    let service = ScrapingService::new(repo.clone(), http_engine());
    let url = format!("{}/blog", server.uri());

    let first = service.scrape_url(&url).await;
    let ScrapeOutcome::Scraped { page_id, articles } = first else {
        panic!("expected a scraped page, got {:?}", first);
    };
    assert_eq!(articles, 2);

    let page = repo.find_page_by_url(&url).await.unwrap().unwrap();
    assert_eq!(page.id, page_id);
    assert_eq!(page.title.as_deref(), Some("Café Blog"));
    assert_eq!(page.status_code, Some(200));
    // Counted in characters, not bytes
    assert_eq!(page.content_length, Some(BLOG_HTML.chars().count() as i32));
    assert_ne!(BLOG_HTML.chars().count(), BLOG_HTML.len());

    let saved = repo.find_articles_by_page(page_id).await.unwrap();
    let titles: Vec<&str> = saved.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["One", "Two"]);
    assert_eq!(saved[0].article_url, format!("{}/1", server.uri()));

    assert_eq!(service.scrape_url(&url).await, ScrapeOutcome::AlreadyScraped);
    assert!(repo.find_errors_by_url(&url).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_network_failure_records_error_without_page() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let service = ScrapingService::new(repo.clone(), http_engine());
    let url = format!("http://127.0.0.1:{}/", port);

    let outcome = service.scrape_url(&url).await;
    assert!(matches!(
        &outcome,
        ScrapeOutcome::Failed { error_type, .. } if error_type == "Network"
    ));

    assert!(repo.find_page_by_url(&url).await.unwrap().is_none());
    let errors = repo.find_errors_by_url(&url).await.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].page_id, None);
    assert_eq!(errors[0].error_type, "Network");
    assert!(!errors[0].error_message.is_empty());
}

#[tokio::test]
async fn test_http_error_status_is_recorded() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let service = ScrapingService::new(repo.clone(), http_engine());
    let url = format!("{}/missing", server.uri());

    let outcome = service.scrape_url(&url).await;
    assert!(!outcome.is_success());

    assert!(repo.find_page_by_url(&url).await.unwrap().is_none());
    let errors = repo.find_errors_by_url(&url).await.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type, "HttpStatus");
}

#[tokio::test]
async fn test_invalid_url_is_not_fetched() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let fetcher = Arc::new(StubFetcher::new());
    let service = ScrapingService::new(repo.clone(), fetcher.clone());

    let outcome = service.scrape_url("not a url").await;

    assert!(matches!(
        &outcome,
        ScrapeOutcome::Failed { error_type, .. } if error_type == "InvalidUrl"
    ));
    assert_eq!(fetcher.calls(), 0);
    let errors = repo.find_errors_by_url("not a url").await.unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].error_type, "InvalidUrl");
}

#[tokio::test]
async fn test_scrape_urls_counts_outcomes() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let fetcher = Arc::new(StubFetcher::new());
    let service = ScrapingService::new(repo, fetcher.clone());

    let urls = vec![
        "https://a.example.com/".to_string(),
        "::broken::".to_string(),
        "https://b.example.com/".to_string(),
        "https://a.example.com/".to_string(),
    ];
    let stats = service.scrape_urls(&urls).await;

    assert_eq!(stats.total, 4);
    assert_eq!(stats.success, 3);
    assert_eq!(stats.failed, 1);
    assert_eq!(stats.failed_urls, vec!["::broken::".to_string()]);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_persist_failure_is_recorded_as_database_error() {
    let repo = Arc::new(BrokenRepository::new(false));
    let fetcher = Arc::new(StubFetcher::new());
    let service = ScrapingService::new(repo.clone(), fetcher.clone());

    let outcome = service.scrape_url("https://a.example.com/").await;

    assert!(matches!(
        &outcome,
        ScrapeOutcome::Failed { error_type, .. } if error_type == "Database"
    ));
    assert_eq!(fetcher.calls(), 1);
    let recorded = repo.recorded.lock().unwrap();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].page_id, None);
    assert_eq!(recorded[0].url_attempted, "https://a.example.com/");
    assert_eq!(recorded[0].error_type, "Database");
    assert!(recorded[0].error_message.contains("disk full"));
}

#[tokio::test]
async fn test_failure_to_record_error_does_not_stop_batch() {
    let repo = Arc::new(BrokenRepository::new(true));
    let fetcher = Arc::new(StubFetcher::new());
    let service = ScrapingService::new(repo.clone(), fetcher.clone());

    let urls = vec![
        "https://a.example.com/".to_string(),
        "https://b.example.com/".to_string(),
    ];
    let stats = service.scrape_urls(&urls).await;

    assert_eq!(stats.total, 2);
    assert_eq!(stats.success, 0);
    assert_eq!(stats.failed, 2);
    assert_eq!(stats.failed_urls, urls);
    assert_eq!(fetcher.calls(), 2);
    assert_eq!(repo.record_attempts.load(Ordering::SeqCst), 2);
    assert!(repo.recorded.lock().unwrap().is_empty());
}
