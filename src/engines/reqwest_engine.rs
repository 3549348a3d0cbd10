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

use crate::engines::traits::{EngineError, FetchResponse, PageFetcher};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，使用固定的浏览器 User-Agent
pub struct ReqwestEngine {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestEngine {
    /// 创建引擎
    ///
    /// # 参数
    ///
    /// * `user_agent` - 每个请求携带的 User-Agent
    /// * `timeout` - 单个请求的超时时间
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(EngineError::Network)?;

        Ok(Self { client, timeout })
    }

    fn classify(&self, error: reqwest::Error) -> EngineError {
        if error.is_timeout() {
            EngineError::Timeout(self.timeout.as_secs())
        } else {
            EngineError::Network(error)
        }
    }
}

#[async_trait]
impl PageFetcher for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 目标URL
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchResponse)` - 抓取响应
    /// * `Err(EngineError)` - 抓取过程中出现的错误
    async fn fetch(&self, url: &str) -> Result<FetchResponse, EngineError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status.is_client_error() || status.is_server_error() {
            return Err(EngineError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content = response.text().await.map_err(|e| {
            if e.is_timeout() {
                EngineError::Timeout(self.timeout.as_secs())
            } else {
                EngineError::Decode(e)
            }
        })?;
        debug!(
            "{} fetched {} ({} bytes, status {})",
            self.name(),
            url,
            content.len(),
            status
        );

        Ok(FetchResponse {
            status_code: status.as_u16(),
            content,
        })
    }

    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
