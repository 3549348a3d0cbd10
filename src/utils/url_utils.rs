// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use url::{ParseError, Url};

/// 将文章链接解析为绝对URL
///
/// 以 `http` 开头的链接原样返回，其余（相对路径、协议相对路径等）
/// 基于页面URL解析
pub fn resolve_article_url(page_url: &Url, href: &str) -> Result<String, ParseError> {
    if href.starts_with("http") {
        return Ok(href.to_string());
    }
    Ok(page_url.join(href)?.to_string())
}
