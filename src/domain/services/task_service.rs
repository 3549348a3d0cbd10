// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::{Category, NewCategory};
use crate::domain::models::task::{DomainError, NewTask, Task, TaskStatus};
use crate::domain::models::user::{NewUser, User};
use crate::domain::repositories::task_repository::{RepositoryError, TaskRepository};
use crate::domain::repositories::user_repository::{CategoryRepository, UserRepository};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use validator::Validate;

/// 任务服务错误
#[derive(Error, Debug)]
pub enum TaskServiceError {
    /// 输入未通过验证
    #[error(transparent)]
    Validation(#[from] DomainError),
    /// 数据访问失败
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// 任务服务
///
/// 任务的增删改查，以及任务外键所需的用户和分类登记
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    users: Arc<dyn UserRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl TaskService {
    /// 创建新的任务服务实例
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            tasks,
            users,
            categories,
        }
    }

    /// 创建待处理任务
    ///
    /// # 参数
    ///
    /// * `description` - 任务描述（1-255 个字符）
    /// * `user_id` - 所属用户ID
    /// * `category_id` - 所属分类ID
    ///
    /// # 返回值
    ///
    /// * `Ok(Task)` - 新建的任务
    /// * `Err(TaskServiceError)` - 验证失败或数据库错误
    pub async fn create(
        &self,
        description: &str,
        user_id: i32,
        category_id: i32,
    ) -> Result<Task, TaskServiceError> {
        let new_task = NewTask::new(description.trim(), user_id, category_id);
        new_task.validate().map_err(DomainError::from)?;

        let task = self.tasks.create(&new_task).await.inspect_err(|e| {
            error!("Failed to create task: {}", e);
        })?;
        info!("Task {} created", task.id);
        Ok(task)
    }

    /// 全部任务，按ID排序
    pub async fn list_all(&self) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self.tasks.find_all().await.inspect_err(|e| {
            error!("Failed to list tasks: {}", e);
        })?)
    }

    /// 待处理任务，按ID排序
    pub async fn list_pending(&self) -> Result<Vec<Task>, TaskServiceError> {
        Ok(self
            .tasks
            .find_by_status(TaskStatus::Pending)
            .await
            .inspect_err(|e| {
                error!("Failed to list pending tasks: {}", e);
            })?)
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.tasks.find_by_id(id).await.inspect_err(|e| {
            error!("Failed to load task {}: {}", id, e);
        })?)
    }

    /// 标记任务已完成，任务不存在时返回 `false`
    pub async fn mark_completed(&self, id: i32) -> Result<bool, TaskServiceError> {
        Ok(self.tasks.mark_completed(id).await.inspect_err(|e| {
            error!("Failed to complete task {}: {}", id, e);
        })?)
    }

    /// 删除任务，任务不存在时返回 `false`
    pub async fn delete(&self, id: i32) -> Result<bool, TaskServiceError> {
        Ok(self.tasks.delete(id).await.inspect_err(|e| {
            error!("Failed to delete task {}: {}", id, e);
        })?)
    }

    /// 登记用户
    pub async fn create_user(&self, name: &str, email: &str) -> Result<User, TaskServiceError> {
        let new_user = NewUser {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
        };
        new_user.validate().map_err(DomainError::from)?;

        Ok(self.users.create(&new_user).await.inspect_err(|e| {
            error!("Failed to create user: {}", e);
        })?)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, TaskServiceError> {
        Ok(self.users.find_all().await?)
    }

    /// 登记分类
    pub async fn create_category(&self, name: &str) -> Result<Category, TaskServiceError> {
        let new_category = NewCategory {
            name: name.trim().to_string(),
        };
        new_category.validate().map_err(DomainError::from)?;

        Ok(self.categories.create(&new_category).await.inspect_err(|e| {
            error!("Failed to create category: {}", e);
        })?)
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, TaskServiceError> {
        Ok(self.categories.find_all().await?)
    }
}
