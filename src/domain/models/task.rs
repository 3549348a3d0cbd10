// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use validator::Validate;

/// 任务实体
///
/// 一条待办事项。每个任务属于一个用户和一个分类，
/// 状态只在 Pending 与 Completed 之间变化。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// 任务唯一标识符
    pub id: i32,
    /// 任务描述
    pub description: String,
    /// 任务状态
    pub status: TaskStatus,
    /// 创建时间
    pub creation_date: DateTime<FixedOffset>,
    /// 所属用户ID
    pub user_id: i32,
    /// 所属分类ID
    pub category_id: i32,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "ID: {} | Status: {} | Description: {}",
            self.id, self.status, self.description
        )
    }
}

/// 任务状态枚举
///
/// 存储为文本 `Pending` / `Completed`。历史数据文件里使用葡萄牙语标签
/// （`Pendente` / `Concluída`），反序列化与解析时一并接受，不区分大小写。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "String")]
pub enum TaskStatus {
    /// 待处理
    #[default]
    Pending,
    /// 已完成
    Completed,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TaskStatus::Pending => write!(f, "Pending"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

impl FromStr for TaskStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" | "pendente" => Ok(TaskStatus::Pending),
            "completed" | "concluída" | "concluida" => Ok(TaskStatus::Completed),
            other => Err(DomainError::ValidationError(format!(
                "unknown task status '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// 新建任务参数
#[derive(Debug, Clone, Validate)]
pub struct NewTask {
    /// 任务描述
    #[validate(length(min = 1, max = 255, message = "description must be 1-255 characters"))]
    pub description: String,
    /// 所属用户ID
    pub user_id: i32,
    /// 所属分类ID
    pub category_id: i32,
}

impl NewTask {
    pub fn new(description: impl Into<String>, user_id: i32, category_id: i32) -> Self {
        Self {
            description: description.into(),
            user_id,
            category_id,
        }
    }
}

/// 领域错误类型
#[derive(Error, Debug)]
pub enum DomainError {
    /// 验证错误，当输入数据不符合领域规则时发生
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl From<validator::ValidationErrors> for DomainError {
    fn from(errors: validator::ValidationErrors) -> Self {
        DomainError::ValidationError(errors.to_string())
    }
}
