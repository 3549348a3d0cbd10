// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::batch::{DeleteSummary, UpsertRecord, UpsertSummary};
use crate::domain::models::task::{NewTask, Task, TaskStatus};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
    /// 批处理记录无效，整批回滚
    #[error("Invalid record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },
}

/// 任务仓库特质
///
/// 每个方法使用独立的事务，成功时提交，失败时回滚
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// 创建新任务
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError>;
    /// 按ID顺序列出全部任务
    async fn find_all(&self) -> Result<Vec<Task>, RepositoryError>;
    /// 按状态列出任务
    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, RepositoryError>;
    /// 根据ID查找任务
    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError>;
    /// 标记任务已完成，任务不存在时返回 false
    async fn mark_completed(&self, id: i32) -> Result<bool, RepositoryError>;
    /// 删除任务，任务不存在时返回 false
    async fn delete(&self, id: i32) -> Result<bool, RepositoryError>;
    /// 在同一个事务中执行一批 upsert，任何一条失败则整批回滚
    async fn upsert_batch(&self, records: &[UpsertRecord]) -> Result<UpsertSummary, RepositoryError>;
    /// 在同一个事务中删除一批任务，不存在的ID被跳过
    async fn delete_batch(&self, ids: &[i32]) -> Result<DeleteSummary, RepositoryError>;
    /// 最近修改/创建的任务（ID 降序）
    async fn find_latest(&self, limit: u64) -> Result<Vec<Task>, RepositoryError>;
    /// 给定ID中仍然存在的那些
    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, RepositoryError>;
}
