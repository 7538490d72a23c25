//! 作业状态 API 客户端
//!
//! 每个轮询周期发出一次 GET 请求，不在内部重试；
//! 重试由轮询循环的固定间隔自然完成。

use crate::config::BotConfig;
use crate::error::{BotError, Result};
use reqwest::StatusCode;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

/// 作业状态数据源
pub trait HomeworkSource {
    /// 查询 `from_date` 之后发生变化的作业
    fn fetch(&self, from_date: i64) -> Result<Value>;
}

/// 基于 `reqwest::blocking` 的 API 客户端
pub struct PracticumClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    /// 创建新客户端
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BotError::UnknownRequest(format!("cannot create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            token: token.into(),
        })
    }

    /// 从配置创建客户端
    pub fn from_config(config: &BotConfig) -> Result<Self> {
        Self::new(
            config.endpoint.clone(),
            config.practicum_token.clone(),
            config.request_timeout,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HomeworkSource for PracticumClient {
    fn fetch(&self, from_date: i64) -> Result<Value> {
        debug!(endpoint = %self.endpoint, from_date, "Requesting homework statuses");

        let start = Instant::now();
        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .map_err(map_transport_error)?;

        let status = response.status();
        debug!(status = %status, elapsed_ms = start.elapsed().as_millis(), "Homework API responded");

        if status != StatusCode::OK {
            return Err(BotError::Http { status: status.as_u16() });
        }

        let body = response
            .text()
            .map_err(map_transport_error)?;

        serde_json::from_str(&body).map_err(|e| BotError::Decode(e.to_string()))
    }
}

/// 构造请求失败属于意外错误；其余传输层故障（含读取响应体时超时、断连）都是网络错误
fn map_transport_error(e: reqwest::Error) -> BotError {
    if e.is_builder() {
        BotError::UnknownRequest(e.to_string())
    } else {
        BotError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_from_config() {
        let config = BotConfig {
            practicum_token: "token".to_string(),
            ..Default::default()
        };
        let client = PracticumClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), crate::config::PRACTICUM_ENDPOINT);
    }

    #[test]
    fn test_invalid_url_is_unknown_request() {
        let client = PracticumClient::new("not a url", "token", Duration::from_secs(1)).unwrap();
        let err = client.fetch(0).unwrap_err();
        assert_eq!(err.kind(), "UnknownRequestError");
    }
}
