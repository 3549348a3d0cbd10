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

use crate::config::settings::Settings;
use crate::domain::services::batch_service::BatchService;
use crate::domain::services::scraping_service::ScrapingService;
use crate::domain::services::task_service::TaskService;
use crate::engines::reqwest_engine::ReqwestEngine;
use crate::infrastructure::repositories::category_repo_impl::CategoryRepositoryImpl;
use crate::infrastructure::repositories::scraping_repo_impl::ScrapingRepositoryImpl;
use crate::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use crate::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use crate::infrastructure::services::report_service_impl::ReportServiceImpl;
use crate::infrastructure::services::scraping_report_service_impl::ScrapingReportServiceImpl;
use crate::presentation::console;
use crate::presentation::menu::Menu;
use clap::{Parser, Subcommand};
use sea_orm::DatabaseConnection;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "taskfy")]
#[command(about = "Task tracker with batch loading, SQL reports and a small web scraper")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactive task menu (default)
    Menu,

    /// Upsert then delete tasks from JSON files
    Batch {
        /// Upsert records file (defaults to batch.upsert_file)
        #[arg(long)]
        upsert_file: Option<PathBuf>,
        /// Delete records file (defaults to batch.delete_file)
        #[arg(long)]
        delete_file: Option<PathBuf>,
    },

    /// Print the task reports
    Reports,

    /// Scrape URLs (defaults to scraper.urls)
    Scrape {
        /// URLs to scrape
        urls: Vec<String>,
        /// Print the scraping reports afterwards
        #[arg(long)]
        reports: bool,
    },

    /// Print the scraping reports
    ScrapeReports,

    /// Manage users
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Register a user
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// List users
    List,
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Register a category
    Add {
        #[arg(long)]
        name: String,
    },
    /// List categories
    List,
}

fn task_service(db: &Arc<DatabaseConnection>) -> TaskService {
    TaskService::new(
        Arc::new(TaskRepositoryImpl::new(db.clone())),
        Arc::new(UserRepositoryImpl::new(db.clone())),
        Arc::new(CategoryRepositoryImpl::new(db.clone())),
    )
}

/// 执行子命令
pub async fn run(
    command: Commands,
    settings: &Settings,
    db: Arc<DatabaseConnection>,
) -> anyhow::Result<()> {
    let mut out = io::stdout();

    match command {
        Commands::Menu => {
            let service = task_service(&db);
            let stdin = io::stdin();
            Menu::new(&service, stdin.lock(), io::stdout()).run().await?;
        }
        Commands::Batch {
            upsert_file,
            delete_file,
        } => {
            let batch = BatchService::new(Arc::new(TaskRepositoryImpl::new(db.clone())));
            let upsert_file = upsert_file.unwrap_or_else(|| PathBuf::from(&settings.batch.upsert_file));
            let delete_file = delete_file.unwrap_or_else(|| PathBuf::from(&settings.batch.delete_file));

            console::separator(&mut out, '=')?;
            match batch.upsert_from_file(&upsert_file).await {
                Ok(report) => console::print_upsert_report(&mut out, &report)?,
                Err(e) => writeln!(out, "Upsert failed: {}", e)?,
            }
            console::separator(&mut out, '=')?;
            match batch.delete_from_file(&delete_file).await {
                Ok(report) => console::print_delete_report(&mut out, &report)?,
                Err(e) => writeln!(out, "Delete failed: {}", e)?,
            }
        }
        Commands::Reports => {
            let reports = ReportServiceImpl::new(db.clone());
            console::print_task_reports(&mut out, &reports).await?;
        }
        Commands::Scrape { urls, reports } => {
            let urls = if urls.is_empty() {
                settings.scraper.urls.clone()
            } else {
                urls
            };
            let fetcher = ReqwestEngine::new(
                &settings.scraper.user_agent,
                Duration::from_secs(settings.scraper.timeout_secs),
            )?;
            let scraper = ScrapingService::new(
                Arc::new(ScrapingRepositoryImpl::new(db.clone())),
                Arc::new(fetcher),
            );

            let stats = scraper.scrape_urls(&urls).await;
            console::print_scrape_stats(&mut out, &stats)?;

            if reports {
                let reports = ScrapingReportServiceImpl::new(db.clone());
                console::print_scraping_reports(&mut out, &reports).await?;
            }
        }
        Commands::ScrapeReports => {
            let reports = ScrapingReportServiceImpl::new(db.clone());
            console::print_scraping_reports(&mut out, &reports).await?;
        }
        Commands::User { command } => {
            let service = task_service(&db);
            match command {
                UserCommands::Add { name, email } => {
                    let user = service.create_user(&name, &email).await?;
                    writeln!(out, "User created: {}", user)?;
                }
                UserCommands::List => {
                    for user in service.list_users().await? {
                        writeln!(out, "{}", user)?;
                    }
                }
            }
        }
        Commands::Category { command } => {
            let service = task_service(&db);
            match command {
                CategoryCommands::Add { name } => {
                    let category = service.create_category(&name).await?;
                    writeln!(out, "Category created: {}", category)?;
                }
                CategoryCommands::List => {
                    for category in service.list_categories().await? {
                        writeln!(out, "{}", category)?;
                    }
                }
            }
        }
    }

    Ok(())
}
