// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::batch::{DeleteReport, UpsertReport};
use crate::domain::models::report::{
    AuthorArticlesRow, ErrorWithPageRow, PageArticlesRow, PageErrorsRow, ReportRow,
    ScrapingSummary,
};
use crate::domain::models::scraping::ScrapeBatchStats;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::services::extraction_service::truncate_chars;
use crate::domain::services::report_service::ReportService;
use crate::domain::services::scraping_report_service::ScrapingReportService;
use std::future::Future;
use std::io::{self, Write};

/// 控制台最多显示的错误条数
pub const MAX_ERRORS_SHOWN: usize = 10;
/// 控制台显示的错误信息最大字符数
pub const ERROR_MESSAGE_CHARS: usize = 100;

const SEPARATOR_WIDTH: usize = 60;

pub fn separator<W: Write>(out: &mut W, ch: char) -> io::Result<()> {
    writeln!(out, "{}", ch.to_string().repeat(SEPARATOR_WIDTH))
}

/// 打印一张报表的关联形态
pub fn print_associative<W: Write, R: ReportRow>(out: &mut W, rows: &[R]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No results found.");
    }
    for row in rows {
        writeln!(out, "{}", serde_json::Value::Object(row.to_associative()))?;
    }
    Ok(())
}

/// 打印一张报表的位置形态
pub fn print_positional<W: Write, R: ReportRow>(out: &mut W, rows: &[R]) -> io::Result<()> {
    if rows.is_empty() {
        return writeln!(out, "No results found.");
    }
    for row in rows {
        writeln!(out, "{}", serde_json::Value::Array(row.values()))?;
    }
    Ok(())
}

/// 执行两次查询，先打印关联形态再打印位置形态
async fn print_both_shapes<W, R, F, Fut>(out: &mut W, name: &str, query: F) -> io::Result<()>
where
    W: Write,
    R: ReportRow,
    F: Fn() -> Fut,
    Fut: Future<Output = Result<Vec<R>, RepositoryError>>,
{
    writeln!(out, "\n--- {} (as map) ---", name)?;
    match query().await {
        Ok(rows) => print_associative(out, &rows)?,
        Err(e) => {
            writeln!(out, "Query failed: {}", e)?;
            return Ok(());
        }
    }

    writeln!(out, "\n--- {} (as list) ---", name)?;
    match query().await {
        Ok(rows) => print_positional(out, &rows),
        Err(e) => writeln!(out, "Query failed: {}", e),
    }
}

/// 打印三张任务报表
pub async fn print_task_reports<W: Write>(
    out: &mut W,
    reports: &dyn ReportService,
) -> io::Result<()> {
    writeln!(out, "\nTaskfy reports")?;
    separator(out, '=')?;

    print_both_shapes(out, "Report 1: INNER JOIN (pending tasks)", || {
        reports.pending_tasks()
    })
    .await?;
    print_both_shapes(out, "Report 2: LEFT JOIN (pending tasks per category)", || {
        reports.pending_count_by_category()
    })
    .await?;
    print_both_shapes(out, "Report 3: RIGHT JOIN (users and their tasks)", || {
        reports.users_with_tasks()
    })
    .await
}

pub fn print_upsert_report<W: Write>(out: &mut W, report: &UpsertReport) -> io::Result<()> {
    writeln!(
        out,
        "Success! {} tasks updated and {} tasks inserted.",
        report.summary.updated.len(),
        report.summary.inserted.len()
    )?;
    writeln!(out, "\n--- Post-upsert check (latest {} tasks) ---", report.verification.len())?;
    for task in &report.verification {
        writeln!(out, "{}", task)?;
    }
    Ok(())
}

pub fn print_delete_report<W: Write>(out: &mut W, report: &DeleteReport) -> io::Result<()> {
    for id in &report.summary.skipped {
        writeln!(out, "   [SKIP] Task ID {} not found for deletion.", id)?;
    }
    writeln!(out, "Success! {} tasks removed.", report.summary.deleted.len())?;
    writeln!(out, "\n--- Post-delete check ---")?;
    if report.verified() {
        writeln!(out, "Confirmed: none of the deleted IDs remain in the database.")
    } else {
        writeln!(out, "Warning: these tasks are still present: {:?}", report.remaining)
    }
}

pub fn print_scrape_stats<W: Write>(out: &mut W, stats: &ScrapeBatchStats) -> io::Result<()> {
    separator(out, '=')?;
    writeln!(out, "Scraping finished")?;
    writeln!(out, "Total URLs: {}", stats.total)?;
    writeln!(out, "Success: {}", stats.success)?;
    writeln!(out, "Failed: {}", stats.failed)?;
    for url in &stats.failed_urls {
        writeln!(out, "  - {}", url)?;
    }
    separator(out, '=')
}

pub fn print_summary<W: Write>(out: &mut W, summary: &ScrapingSummary) -> io::Result<()> {
    writeln!(out, "\n--- Summary ---")?;
    writeln!(out, "Pages scraped: {}", summary.total_pages)?;
    writeln!(out, "Articles extracted: {}", summary.total_articles)?;
    writeln!(out, "Errors recorded: {}", summary.total_errors)?;
    writeln!(
        out,
        "Average articles per page: {:.2}",
        summary.avg_articles_per_page
    )
}

pub fn print_pages_with_articles<W: Write>(out: &mut W, rows: &[PageArticlesRow]) -> io::Result<()> {
    writeln!(out, "\n--- Pages with articles (INNER JOIN) ---")?;
    if rows.is_empty() {
        return writeln!(out, "No pages with articles.");
    }
    for row in rows {
        writeln!(
            out,
            "[{}] {} | {} | {} articles | {}",
            row.id,
            row.url,
            row.page_title.as_deref().unwrap_or("No Title"),
            row.articles_count,
            row.scraped_at.format("%Y-%m-%d %H:%M:%S")
        )?;
    }
    Ok(())
}

pub fn print_pages_with_errors<W: Write>(out: &mut W, rows: &[PageErrorsRow]) -> io::Result<()> {
    writeln!(out, "\n--- Pages and their errors (LEFT JOIN) ---")?;
    if rows.is_empty() {
        return writeln!(out, "No pages scraped.");
    }
    for row in rows {
        let status = row
            .status_code
            .map(|s| s.to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let types = if row.error_types.is_empty() {
            "-".to_string()
        } else {
            row.error_types.join(", ")
        };
        writeln!(
            out,
            "{} | status {} | {} errors | {}",
            row.url, status, row.error_count, types
        )?;
    }
    Ok(())
}

/// 打印最近的错误，最多 10 条，错误信息截断到 100 个字符
pub fn print_recent_errors<W: Write>(out: &mut W, rows: &[ErrorWithPageRow]) -> io::Result<()> {
    writeln!(out, "\n--- Recent errors ---")?;
    if rows.is_empty() {
        return writeln!(out, "No errors recorded.");
    }
    for row in rows.iter().take(MAX_ERRORS_SHOWN) {
        let message = truncate_chars(row.error_message.as_deref().unwrap_or(""), ERROR_MESSAGE_CHARS);
        writeln!(
            out,
            "[{}] {} | {} | {}",
            row.occurred_at.format("%Y-%m-%d %H:%M:%S"),
            row.url_attempted,
            row.error_type.as_deref().unwrap_or("Unknown"),
            message
        )?;
    }
    Ok(())
}

pub fn print_authors<W: Write>(out: &mut W, rows: &[AuthorArticlesRow]) -> io::Result<()> {
    writeln!(out, "\n--- Articles by author ---")?;
    if rows.is_empty() {
        return writeln!(out, "No identified authors.");
    }
    for row in rows {
        writeln!(
            out,
            "{}: {} articles from {} pages",
            row.author, row.article_count, row.source_count
        )?;
        writeln!(out, "  Sources: {}", row.sources.join(" | "))?;
    }
    Ok(())
}

/// 打印全部抓取报表，单个报表失败时打印错误并继续
pub async fn print_scraping_reports<W: Write>(
    out: &mut W,
    reports: &dyn ScrapingReportService,
) -> io::Result<()> {
    writeln!(out, "\nScraping reports")?;
    separator(out, '=')?;

    match reports.summary().await {
        Ok(summary) => print_summary(out, &summary)?,
        Err(e) => writeln!(out, "Summary failed: {}", e)?,
    }
    match reports.pages_with_articles().await {
        Ok(rows) => print_pages_with_articles(out, &rows)?,
        Err(e) => writeln!(out, "Pages with articles failed: {}", e)?,
    }
    match reports.pages_with_errors().await {
        Ok(rows) => print_pages_with_errors(out, &rows)?,
        Err(e) => writeln!(out, "Pages with errors failed: {}", e)?,
    }
    match reports.errors_with_pages().await {
        Ok(rows) => print_recent_errors(out, &rows)?,
        Err(e) => writeln!(out, "Errors report failed: {}", e)?,
    }
    match reports.articles_by_author().await {
        Ok(rows) => print_authors(out, &rows)?,
        Err(e) => writeln!(out, "Author report failed: {}", e)?,
    }

    separator(out, '=')
}
