// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 该模块定义了领域层的仓库接口，遵循依赖倒置原则。
/// 仓库接口定义了数据持久化的抽象契约，具体实现由基础设施层提供。
///
/// 包含的仓库接口：
/// - 任务仓库（task_repository）：任务的增删改查与批处理
/// - 用户/分类仓库（user_repository）：任务外键指向的用户和分类
/// - 抓取仓库（scraping_repository）：页面、文章和错误记录
pub mod scraping_repository;
pub mod task_repository;
pub mod user_repository;
