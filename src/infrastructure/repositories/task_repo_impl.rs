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

use crate::domain::models::batch::{DeleteSummary, UpsertRecord, UpsertSummary};
use crate::domain::models::task::{NewTask, Task, TaskStatus};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::infrastructure::database::entities::task as task_entity;
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// 任务仓库实现
///
/// 基于SeaORM实现的任务数据访问层
#[derive(Clone)]
pub struct TaskRepositoryImpl {
    /// 数据库连接
    db: Arc<DatabaseConnection>,
}

impl TaskRepositoryImpl {
    /// 创建新的任务仓库实例
    ///
    /// # 参数
    ///
    /// * `db` - 数据库连接
    ///
    /// # 返回值
    ///
    /// 返回新的任务仓库实例
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// 在事务内处理一批 upsert 记录
    async fn apply_upserts(
        txn: &DatabaseTransaction,
        records: &[UpsertRecord],
    ) -> Result<UpsertSummary, RepositoryError> {
        let mut summary = UpsertSummary::default();

        for (index, record) in records.iter().enumerate() {
            let existing = match record.id {
                Some(id) => task_entity::Entity::find_by_id(id).one(txn).await?,
                None => None,
            };

            match existing {
                Some(model) => {
                    let id = model.id;
                    let mut active: task_entity::ActiveModel = model.into();
                    if let Some(description) = &record.description {
                        active.description = Set(description.clone());
                    }
                    if let Some(status) = record.status {
                        active.status = Set(status.to_string());
                    }
                    if let Some(user_id) = record.user_id {
                        active.user_id = Set(user_id);
                    }
                    if let Some(category_id) = record.category_id {
                        active.category_id = Set(category_id);
                    }
                    active.update(txn).await?;
                    debug!("Upsert record #{} updated task {}", index, id);
                    summary.updated.push(id);
                }
                None => {
                    let (description, user_id, category_id) =
                        match (&record.description, record.user_id, record.category_id) {
                            (Some(d), Some(u), Some(c)) => (d.clone(), u, c),
                            _ => {
                                return Err(RepositoryError::InvalidRecord {
                                    index,
                                    reason: "insert requires description, user_id_fk and category_id_fk"
                                        .to_string(),
                                })
                            }
                        };

                    let active = task_entity::ActiveModel {
                        description: Set(description),
                        status: Set(record.status.unwrap_or_default().to_string()),
                        creation_date: Set(Utc::now().into()),
                        user_id: Set(user_id),
                        category_id: Set(category_id),
                        ..Default::default()
                    };
                    let inserted = active.insert(txn).await?;
                    debug!("Upsert record #{} inserted task {}", index, inserted.id);
                    summary.inserted.push(inserted.id);
                }
            }
        }

        Ok(summary)
    }

    /// 在事务内逐条删除
    async fn apply_deletes(
        txn: &DatabaseTransaction,
        ids: &[i32],
    ) -> Result<DeleteSummary, RepositoryError> {
        let mut summary = DeleteSummary::default();

        for &id in ids {
            let result = task_entity::Entity::delete_by_id(id).exec(txn).await?;
            if result.rows_affected > 0 {
                summary.deleted.push(id);
            } else {
                debug!("Task {} not found for deletion, skipped", id);
                summary.skipped.push(id);
            }
        }

        Ok(summary)
    }
}

impl From<task_entity::Model> for Task {
    fn from(model: task_entity::Model) -> Self {
        Self {
            id: model.id,
            description: model.description,
            status: model.status.parse().unwrap_or_default(),
            creation_date: model.creation_date,
            user_id: model.user_id,
            category_id: model.category_id,
        }
    }
}

#[async_trait]
impl TaskRepository for TaskRepositoryImpl {
    async fn create(&self, task: &NewTask) -> Result<Task, RepositoryError> {
        let txn = self.db.begin().await?;

        let model = task_entity::ActiveModel {
            description: Set(task.description.clone()),
            status: Set(TaskStatus::Pending.to_string()),
            creation_date: Set(Utc::now().into()),
            user_id: Set(task.user_id),
            category_id: Set(task.category_id),
            ..Default::default()
        };

        match model.insert(&txn).await {
            Ok(inserted) => {
                txn.commit().await?;
                Ok(inserted.into())
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn find_all(&self) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .order_by_asc(task_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_status(&self, status: TaskStatus) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Status.eq(status.to_string()))
            .order_by_asc(task_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Task>, RepositoryError> {
        let model = task_entity::Entity::find_by_id(id)
            .one(self.db.as_ref())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn mark_completed(&self, id: i32) -> Result<bool, RepositoryError> {
        let txn = self.db.begin().await?;

        let Some(model) = task_entity::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(false);
        };

        let mut active: task_entity::ActiveModel = model.into();
        active.status = Set(TaskStatus::Completed.to_string());

        match active.update(&txn).await {
            Ok(_) => {
                txn.commit().await?;
                Ok(true)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, RepositoryError> {
        let txn = self.db.begin().await?;

        match task_entity::Entity::delete_by_id(id).exec(&txn).await {
            Ok(result) => {
                txn.commit().await?;
                Ok(result.rows_affected > 0)
            }
            Err(e) => {
                txn.rollback().await?;
                Err(e.into())
            }
        }
    }

    async fn upsert_batch(
        &self,
        records: &[UpsertRecord],
    ) -> Result<UpsertSummary, RepositoryError> {
        let txn = self.db.begin().await?;

        match Self::apply_upserts(&txn, records).await {
            Ok(summary) => {
                txn.commit().await?;
                Ok(summary)
            }
            Err(e) => {
                warn!("Upsert batch failed, rolling back: {}", e);
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn delete_batch(&self, ids: &[i32]) -> Result<DeleteSummary, RepositoryError> {
        let txn = self.db.begin().await?;

        match Self::apply_deletes(&txn, ids).await {
            Ok(summary) => {
                txn.commit().await?;
                Ok(summary)
            }
            Err(e) => {
                warn!("Delete batch failed, rolling back: {}", e);
                txn.rollback().await?;
                Err(e)
            }
        }
    }

    async fn find_latest(&self, limit: u64) -> Result<Vec<Task>, RepositoryError> {
        let models = task_entity::Entity::find()
            .order_by_desc(task_entity::Column::Id)
            .limit(limit)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_existing_ids(&self, ids: &[i32]) -> Result<Vec<i32>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = task_entity::Entity::find()
            .filter(task_entity::Column::Id.is_in(ids.iter().copied()))
            .order_by_asc(task_entity::Column::Id)
            .all(self.db.as_ref())
            .await?;

        Ok(models.into_iter().map(|m| m.id).collect())
    }
}
