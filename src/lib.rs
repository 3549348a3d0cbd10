// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心业务实体、服务和仓库接口
pub mod domain;

/// 引擎模块
///
/// 页面获取引擎
pub mod engines;

/// 基础设施模块
///
/// 数据库连接、实体、仓库实现和报表查询
pub mod infrastructure;

/// 表示层模块
///
/// 命令行、交互菜单和控制台报表输出
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;
