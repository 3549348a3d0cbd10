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

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use taskfy::config::settings::Settings;
use taskfy::infrastructure::database::connection;
use taskfy::presentation::cli::{self, Cli, Commands};
use taskfy::utils::telemetry;
use tracing::{error, info};

/// 主函数
///
/// 加载配置、连接数据库并确保表结构存在，然后执行子命令
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load .env and initialize logging
    dotenvy::dotenv().ok();
    telemetry::init_telemetry();
    let args = Cli::parse();

    // 2. Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    info!("Configuration loaded");

    // 3. Connect to database; unreachable database is fatal
    let db_settings = &settings.database;
    let db = match connection::create_pool(db_settings).await {
        Ok(db) => db,
        Err(e) => {
            error!(
                "Cannot connect to database '{}' on {}:{} as '{}': {}",
                db_settings.name, db_settings.host, db_settings.port, db_settings.user, e
            );
            return Err(e).context("Database connection failed");
        }
    };
    if let Err(e) = connection::check_connection(&db).await {
        error!(
            "Database '{}' on {}:{} is not reachable as '{}': {}",
            db_settings.name, db_settings.host, db_settings.port, db_settings.user, e
        );
        return Err(e).context("Database connection check failed");
    }

    // 4. Create tables
    connection::init_schema(&db)
        .await
        .context("Failed to create database schema")?;

    // 5. Run the command
    cli::run(args.command.unwrap_or(Commands::Menu), &settings, Arc::new(db)).await
}
