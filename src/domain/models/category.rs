// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// 任务分类实体
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// 分类唯一标识符
    pub id: i32,
    /// 分类名称，全局唯一（如 "Work"）
    pub name: String,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ID: {} | Name: {}", self.id, self.name)
    }
}

/// 新建分类参数
#[derive(Debug, Clone, Validate)]
pub struct NewCategory {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
}
