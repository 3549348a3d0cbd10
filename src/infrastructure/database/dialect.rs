// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm::DbBackend;

/// 第 `n` 个（从 1 开始）绑定参数的占位符
pub fn placeholder(backend: DbBackend, n: usize) -> String {
    match backend {
        DbBackend::Postgres => format!("${}", n),
        _ => "?".to_string(),
    }
}

/// 去重后以逗号连接的字符串聚合
pub fn distinct_string_agg(backend: DbBackend, expr: &str) -> String {
    match backend {
        DbBackend::Postgres => format!("STRING_AGG(DISTINCT {}, ',')", expr),
        DbBackend::MySql => format!("GROUP_CONCAT(DISTINCT {} SEPARATOR ',')", expr),
        _ => format!("GROUP_CONCAT(DISTINCT {})", expr),
    }
}

/// 拆分聚合结果，排序并去掉空项
pub fn split_aggregate(value: Option<String>) -> Vec<String> {
    let mut items: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    items.sort();
    items.dedup();
    items
}
