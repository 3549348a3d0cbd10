// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务接口的数据库实现
pub mod report_service_impl;
pub mod scraping_report_service_impl;
