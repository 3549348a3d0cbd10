// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 该模块包含系统的核心业务逻辑服务，这些服务封装了复杂的
/// 业务规则和领域逻辑，协调多个领域对象来完成业务操作。
///
/// 包含的服务：
/// - 任务服务（task_service）：任务的增删改查及用户、分类登记
/// - 批处理服务（batch_service）：从 JSON 文件批量 upsert/删除任务
/// - 报表服务（report_service）：任务相关的联表报表
/// - 提取服务（extraction_service）：从 HTML 中启发式提取文章
/// - 抓取服务（scraping_service）：下载页面并保存提取结果
/// - 抓取报表服务（scraping_report_service）：抓取结果的统计报表
pub mod batch_service;
pub mod extraction_service;
pub mod report_service;
pub mod scraping_report_service;
pub mod scraping_service;
pub mod task_service;
