// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use taskfy::config::settings::DatabaseSettings;
use taskfy::domain::services::task_service::TaskService;
use taskfy::infrastructure::database::connection;
use taskfy::infrastructure::repositories::category_repo_impl::CategoryRepositoryImpl;
use taskfy::infrastructure::repositories::task_repo_impl::TaskRepositoryImpl;
use taskfy::infrastructure::repositories::user_repo_impl::UserRepositoryImpl;
use tempfile::TempDir;

/// 临时 SQLite 数据库，已执行全部迁移
pub struct TestDb {
    pub db: Arc<DatabaseConnection>,
    // Keep the directory alive for the lifetime of the test
    _dir: TempDir,
}

pub async fn create_test_db() -> TestDb {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("taskfy_test.db").display()
    );

    let settings = DatabaseSettings {
        url: Some(url.clone()),
        host: "localhost".to_string(),
        port: 0,
        user: "test".to_string(),
        password: String::new(),
        name: "taskfy_test".to_string(),
        max_connections: Some(5),
        min_connections: Some(1),
        connect_timeout: Some(5),
        idle_timeout: None,
    };

    let db = connection::connect(&url, &settings)
        .await
        .expect("Failed to open test database");
    connection::check_connection(&db)
        .await
        .expect("Test database not reachable");
    connection::init_schema(&db)
        .await
        .expect("Failed to run migrations");

    TestDb {
        db: Arc::new(db),
        _dir: dir,
    }
}

impl TestDb {
    pub fn task_repo(&self) -> Arc<TaskRepositoryImpl> {
        Arc::new(TaskRepositoryImpl::new(self.db.clone()))
    }

    pub fn task_service(&self) -> TaskService {
        TaskService::new(
            self.task_repo(),
            Arc::new(UserRepositoryImpl::new(self.db.clone())),
            Arc::new(CategoryRepositoryImpl::new(self.db.clone())),
        )
    }
}

/// 登记一个用户和一个分类，返回 (user_id, category_id)
pub async fn seed_owner(service: &TaskService) -> (i32, i32) {
    let user = service
        .create_user("Ana", "ana@example.com")
        .await
        .expect("Failed to seed user");
    let category = service
        .create_category("Home")
        .await
        .expect("Failed to seed category");
    (user.id, category.id)
}
