// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::category::{Category, NewCategory};
use crate::domain::models::user::{NewUser, User};
use crate::domain::repositories::task_repository::RepositoryError;
use async_trait::async_trait;

/// 用户仓库特质
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 创建用户，邮箱重复时返回数据库错误
    async fn create(&self, user: &NewUser) -> Result<User, RepositoryError>;
    /// 按ID顺序列出全部用户
    async fn find_all(&self) -> Result<Vec<User>, RepositoryError>;
}

/// 分类仓库特质
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// 创建分类，名称重复时返回数据库错误
    async fn create(&self, category: &NewCategory) -> Result<Category, RepositoryError>;
    /// 按ID顺序列出全部分类
    async fn find_all(&self) -> Result<Vec<Category>, RepositoryError>;
}
