// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::task::{Task, TaskStatus};
use serde::{Deserialize, Serialize};

/// upsert 文件中的一条记录
///
/// 字段名沿用数据文件的格式（`id_task`、`user_id_fk`、`category_id_fk`）。
/// 除插入新任务时必需的字段外，其余字段缺省即表示“保持不变”。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpsertRecord {
    #[serde(rename = "id_task", default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(rename = "user_id_fk", alias = "user_id", default)]
    pub user_id: Option<i32>,
    #[serde(rename = "category_id_fk", alias = "category_id", default)]
    pub category_id: Option<i32>,
}

/// 删除文件中的一条记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteRecord {
    #[serde(rename = "id_task", default)]
    pub id: Option<i32>,
}

/// upsert 批次结果
#[derive(Debug, Clone, Default)]
pub struct UpsertSummary {
    /// 被更新的任务ID（按处理顺序）
    pub updated: Vec<i32>,
    /// 新插入的任务ID（按处理顺序）
    pub inserted: Vec<i32>,
}

/// upsert 执行报告，包含提交后的回读结果
#[derive(Debug, Clone, Default)]
pub struct UpsertReport {
    pub summary: UpsertSummary,
    /// 提交后回读的最近修改/创建的任务
    pub verification: Vec<Task>,
}

/// 删除批次结果
#[derive(Debug, Clone, Default)]
pub struct DeleteSummary {
    /// 已删除的任务ID
    pub deleted: Vec<i32>,
    /// 不存在而跳过的任务ID
    pub skipped: Vec<i32>,
}

/// 删除执行报告
#[derive(Debug, Clone, Default)]
pub struct DeleteReport {
    pub summary: DeleteSummary,
    /// 提交后仍然存在的ID，正常情况下为空
    pub remaining: Vec<i32>,
}

impl DeleteReport {
    /// 尝试删除的ID在提交后是否都已不存在
    pub fn verified(&self) -> bool {
        self.remaining.is_empty()
    }
}
