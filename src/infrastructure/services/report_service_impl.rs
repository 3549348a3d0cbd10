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

use crate::domain::models::report::{CategoryPendingCountRow, PendingTaskRow, UserTaskRow};
use crate::domain::models::task::TaskStatus;
use crate::domain::repositories::task_repository::RepositoryError;
use crate::domain::services::report_service::ReportService;
use crate::infrastructure::database::dialect::placeholder;
use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DatabaseConnection, FromQueryResult, Statement};
use std::sync::Arc;
use tracing::error;

/// 任务报表服务实现
///
/// 直接执行SQL，结果映射到报表行结构
pub struct ReportServiceImpl {
    db: Arc<DatabaseConnection>,
}

impl ReportServiceImpl {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ReportService for ReportServiceImpl {
    async fn pending_tasks(&self) -> Result<Vec<PendingTaskRow>, RepositoryError> {
        let backend = self.db.get_database_backend();
        let sql = format!(
            r#"SELECT t.description, t.status, u.name AS user_name, c.name AS category_name
            FROM task t
            INNER JOIN "user" u ON t.user_id = u.id
            INNER JOIN category c ON t.category_id = c.id
            WHERE t.status = {}
            ORDER BY t.id"#,
            placeholder(backend, 1)
        );
        let stmt = Statement::from_sql_and_values(
            backend,
            sql,
            [TaskStatus::Pending.to_string().into()],
        );

        PendingTaskRow::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("INNER JOIN report failed: {}", e);
                e.into()
            })
    }

    async fn pending_count_by_category(
        &self,
    ) -> Result<Vec<CategoryPendingCountRow>, RepositoryError> {
        let backend = self.db.get_database_backend();
        let sql = format!(
            r#"SELECT c.name AS category_name, COUNT(t.id) AS pending_tasks_count
            FROM category c
            LEFT JOIN task t ON c.id = t.category_id AND t.status = {}
            GROUP BY c.id, c.name
            ORDER BY c.name"#,
            placeholder(backend, 1)
        );
        let stmt = Statement::from_sql_and_values(
            backend,
            sql,
            [TaskStatus::Pending.to_string().into()],
        );

        CategoryPendingCountRow::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("LEFT JOIN report failed: {}", e);
                e.into()
            })
    }

    async fn users_with_tasks(&self) -> Result<Vec<UserTaskRow>, RepositoryError> {
        let stmt = Statement::from_string(
            self.db.get_database_backend(),
            r#"SELECT u.name AS user_name, t.description AS task_description
            FROM task t
            RIGHT JOIN "user" u ON t.user_id = u.id
            ORDER BY u.name, u.id, t.id"#,
        );

        UserTaskRow::find_by_statement(stmt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| {
                error!("RIGHT JOIN report failed: {}", e);
                e.into()
            })
    }
}
