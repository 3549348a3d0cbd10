// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use async_trait::async_trait;
use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 服务器返回 4xx/5xx
    #[error("HTTP status {status} for {url}")]
    HttpStatus { status: u16, url: String },
    /// 超时
    #[error("Timeout after {0}s")]
    Timeout(u64),
    /// 连接、DNS 等网络层错误
    #[error("Request failed: {0}")]
    Network(#[source] reqwest::Error),
    /// 响应体无法解码
    #[error("Failed to decode body: {0}")]
    Decode(#[source] reqwest::Error),
}

impl EngineError {
    /// 错误类型名称，写入错误记录的 `error_type` 列
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::HttpStatus { .. } => "HttpStatus",
            EngineError::Timeout(_) => "Timeout",
            EngineError::Network(_) => "Network",
            EngineError::Decode(_) => "Decode",
        }
    }
}

/// 抓取响应
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP状态码
    pub status_code: u16,
    /// 响应内容
    pub content: String,
}

/// 页面获取特质
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// 以 GET 请求获取页面，非 2xx/3xx 状态视为失败
    async fn fetch(&self, url: &str) -> Result<FetchResponse, EngineError>;

    /// 引擎名称
    fn name(&self) -> &'static str;
}
