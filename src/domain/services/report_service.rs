// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::report::{CategoryPendingCountRow, PendingTaskRow, UserTaskRow};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 任务报表服务特质
///
/// 固定的三条联表查询
#[async_trait]
pub trait ReportService: Send + Sync {
    /// 待处理任务及其用户和分类（INNER JOIN）
    async fn pending_tasks(&self) -> Result<Vec<PendingTaskRow>, RepositoryError>;

    /// 每个分类的待处理任务数，包括数量为 0 的分类（LEFT JOIN）
    async fn pending_count_by_category(&self) -> Result<Vec<CategoryPendingCountRow>, RepositoryError>;

    /// 全部用户及其任务，没有任务的用户也列出一次（RIGHT JOIN）
    async fn users_with_tasks(&self) -> Result<Vec<UserTaskRow>, RepositoryError>;
}
