// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::batch::{DeleteRecord, DeleteReport, UpsertRecord, UpsertReport};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

/// upsert 之后回读的任务数
pub const VERIFY_LATEST: u64 = 5;

/// 批处理错误
#[derive(Error, Debug)]
pub enum BatchError {
    /// 文件不存在或无法读取
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 文件内容不是合法的记录数组
    #[error("Failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// 数据库操作失败，整批已回滚
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 批处理服务
///
/// 从 JSON 文件读取记录，在单个事务中批量 upsert 或删除任务
pub struct BatchService {
    tasks: Arc<dyn TaskRepository>,
}

impl BatchService {
    pub fn new(tasks: Arc<dyn TaskRepository>) -> Self {
        Self { tasks }
    }

    /// 读取 JSON 数组文件
    pub async fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, BatchError> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BatchError::Io {
                path: path.to_path_buf(),
                source,
            })?;

        serde_json::from_str(&content).map_err(|source| BatchError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// 从文件执行 upsert
    pub async fn upsert_from_file(&self, path: &Path) -> Result<UpsertReport, BatchError> {
        info!("Starting upsert using {}", path.display());
        let records: Vec<UpsertRecord> = Self::load_records(path).await.inspect_err(|e| {
            error!("{}", e);
        })?;
        self.upsert(&records).await
    }

    /// 从文件执行删除
    pub async fn delete_from_file(&self, path: &Path) -> Result<DeleteReport, BatchError> {
        info!("Starting delete using {}", path.display());
        let records: Vec<DeleteRecord> = Self::load_records(path).await.inspect_err(|e| {
            error!("{}", e);
        })?;
        self.delete(&records).await
    }

    /// 批量 upsert
    ///
    /// 任何一条记录失败则整批回滚。提交后回读最近的任务作为核对。
    pub async fn upsert(&self, records: &[UpsertRecord]) -> Result<UpsertReport, BatchError> {
        if records.is_empty() {
            info!("No upsert records, nothing to do");
            return Ok(UpsertReport::default());
        }

        let summary = self.tasks.upsert_batch(records).await.inspect_err(|e| {
            error!("Upsert failed: {}", e);
        })?;
        info!(
            "{} tasks updated and {} tasks inserted",
            summary.updated.len(),
            summary.inserted.len()
        );

        let verification = self.tasks.find_latest(VERIFY_LATEST).await?;
        for task in &verification {
            info!("Verify upsert: {}", task);
        }

        Ok(UpsertReport {
            summary,
            verification,
        })
    }

    /// 批量删除
    ///
    /// 没有 `id_task` 的记录被忽略；提交后核对尝试删除的ID都已不存在。
    pub async fn delete(&self, records: &[DeleteRecord]) -> Result<DeleteReport, BatchError> {
        let ids: Vec<i32> = records.iter().filter_map(|r| r.id).collect();
        if ids.is_empty() {
            info!("No delete records, nothing to do");
            return Ok(DeleteReport::default());
        }

        let summary = self.tasks.delete_batch(&ids).await.inspect_err(|e| {
            error!("Delete failed: {}", e);
        })?;
        for id in &summary.skipped {
            info!("Task {} not found for deletion", id);
        }
        info!("{} tasks deleted", summary.deleted.len());

        let remaining = self.tasks.find_existing_ids(&ids).await?;
        if remaining.is_empty() {
            info!("Verify delete: none of the deleted ids remain");
        } else {
            warn!("Verify delete: tasks still present: {:?}", remaining);
        }

        Ok(DeleteReport { summary, remaining })
    }
}
