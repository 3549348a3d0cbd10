// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 任务（task）、用户（user）、分类（category）
/// - 批处理记录与结果（batch）
/// - 抓取的页面、文章和错误（scraping）
/// - 报表行（report）
///
/// 这些都是普通的数据结构，与数据库实体分离，
/// 由仓库实现负责两者之间的转换。
pub mod batch;
pub mod category;
pub mod report;
pub mod scraping;
pub mod task;
pub mod user;
