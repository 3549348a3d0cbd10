// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::helpers::create_test_db;
use std::sync::Arc;
use taskfy::domain::models::scraping::{ExtractedArticle, NewScrapedPage, NewScrapingError};
use taskfy::domain::repositories::scraping_repository::ScrapingRepository;
use taskfy::domain::services::scraping_report_service::ScrapingReportService;
use taskfy::infrastructure::repositories::scraping_repo_impl::ScrapingRepositoryImpl;
use taskfy::infrastructure::services::scraping_report_service_impl::ScrapingReportServiceImpl;

fn page(url: &str, title: &str) -> NewScrapedPage {
    NewScrapedPage {
        url: url.to_string(),
        title: title.to_string(),
        status_code: 200,
        content_length: 1024,
    }
}

fn article(title: &str, author: &str) -> ExtractedArticle {
    ExtractedArticle {
        title: title.to_string(),
        author: author.to_string(),
        publish_date: "N/A".to_string(),
        content_preview: String::new(),
        article_url: String::new(),
    }
}

fn failure(page_id: Option<i32>, url: &str, error_type: &str) -> NewScrapingError {
    NewScrapingError {
        page_id,
        url_attempted: url.to_string(),
        error_type: error_type.to_string(),
        error_message: format!("{} while fetching {}", error_type, url),
    }
}

/// 三个页面，分别有 3、1、0 篇文章，返回页面ID
async fn seed_pages(repo: &ScrapingRepositoryImpl) -> (i32, i32, i32) {
    let a = repo
        .save_page(
            &page("https://a.example.com/", "A"),
            &[article("A1", "Ana"), article("A2", "Ana"), article("A3", "Unknown")],
        )
        .await
        .unwrap();
    let b = repo
        .save_page(&page("https://b.example.com/", "B"), &[article("B1", "Ana")])
        .await
        .unwrap();
    let c = repo
        .save_page(&page("https://c.example.com/", "C"), &[])
        .await
        .unwrap();
    (a, b, c)
}

#[tokio::test]
async fn test_summary_on_empty_database() {
    let test_db = create_test_db().await;
    let reports = ScrapingReportServiceImpl::new(test_db.db.clone());

    let summary = reports.summary().await.unwrap();

    assert_eq!(summary.total_pages, 0);
    assert_eq!(summary.total_articles, 0);
    assert_eq!(summary.total_errors, 0);
    assert_eq!(summary.avg_articles_per_page, 0.0);
    assert!(reports.pages_with_articles().await.unwrap().is_empty());
    assert!(reports.articles_by_author().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_summary_and_pages_with_articles() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let (a, b, _) = seed_pages(&repo).await;
    repo.record_error(&failure(None, "https://down.example.com/", "Timeout"))
        .await
        .unwrap();
    let reports = ScrapingReportServiceImpl::new(test_db.db.clone());

    let summary = reports.summary().await.unwrap();
    assert_eq!(summary.total_pages, 3);
    assert_eq!(summary.total_articles, 4);
    assert_eq!(summary.total_errors, 1);
    assert!((summary.avg_articles_per_page - 4.0 / 3.0).abs() < 1e-9);

    let rows = reports.pages_with_articles().await.unwrap();
    let counts: Vec<(i32, i64)> = rows.iter().map(|r| (r.id, r.articles_count)).collect();
    assert_eq!(counts, vec![(a, 3), (b, 1)]);
    assert_eq!(rows[0].page_title.as_deref(), Some("A"));
}

#[tokio::test]
async fn test_pages_with_errors_lists_every_page() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let (a, _, _) = seed_pages(&repo).await;
    for error_type in ["Timeout", "HttpStatus", "Timeout"] {
        repo.record_error(&failure(Some(a), "https://a.example.com/", error_type))
            .await
            .unwrap();
    }
    let reports = ScrapingReportServiceImpl::new(test_db.db.clone());

    let rows = reports.pages_with_errors().await.unwrap();

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].url, "https://a.example.com/");
    assert_eq!(rows[0].error_count, 3);
    assert_eq!(rows[0].error_types, vec!["HttpStatus", "Timeout"]);
    assert_eq!(rows[0].status_code, Some(200));
    for row in &rows[1..] {
        assert_eq!(row.error_count, 0);
        assert!(row.error_types.is_empty());
    }
    assert_eq!(rows[1].url, "https://b.example.com/");
    assert_eq!(rows[2].url, "https://c.example.com/");
}

#[tokio::test]
async fn test_errors_with_pages_newest_first() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    let (a, _, _) = seed_pages(&repo).await;
    repo.record_error(&failure(Some(a), "https://a.example.com/", "HttpStatus"))
        .await
        .unwrap();
    repo.record_error(&failure(None, "https://down.example.com/", "Network"))
        .await
        .unwrap();
    let reports = ScrapingReportServiceImpl::new(test_db.db.clone());

    let rows = reports.errors_with_pages().await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].url_attempted, "https://down.example.com/");
    assert_eq!(rows[0].page_url, None);
    assert_eq!(rows[0].page_title, None);
    assert_eq!(rows[1].error_type.as_deref(), Some("HttpStatus"));
    assert_eq!(rows[1].page_url.as_deref(), Some("https://a.example.com/"));
    assert_eq!(rows[1].page_title.as_deref(), Some("A"));
}

#[tokio::test]
async fn test_articles_by_author_skips_unknown() {
    let test_db = create_test_db().await;
    let repo = Arc::new(ScrapingRepositoryImpl::new(test_db.db.clone()));
    seed_pages(&repo).await;
    repo.save_page(
        &page("https://d.example.com/", "D"),
        &[article("D1", "Bob"), article("D2", "Bob")],
    )
    .await
    .unwrap();
    let reports = ScrapingReportServiceImpl::new(test_db.db.clone());

    let rows = reports.articles_by_author().await.unwrap();
    let summary: Vec<(&str, i64, i64)> = rows
        .iter()
        .map(|r| (r.author.as_str(), r.article_count, r.source_count))
        .collect();

    assert_eq!(summary, vec![("Ana", 3, 2), ("Bob", 2, 1)]);
    assert_eq!(
        rows[0].sources,
        vec!["https://a.example.com/", "https://b.example.com/"]
    );
    assert_eq!(rows[1].sources, vec!["https://d.example.com/"]);
}
