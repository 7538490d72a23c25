//! Telegram 渠道（Bot API `sendMessage`）

use crate::config::BotConfig;
use crate::error::{BotError, Result};
use crate::notification::channel::NotificationChannel;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Telegram 渠道配置
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token
    pub bot_token: String,
    /// Chat ID
    pub chat_id: String,
    /// Bot API 基础地址
    pub api_base: String,
    /// 请求超时
    pub timeout: Duration,
}

impl From<&BotConfig> for TelegramConfig {
    fn from(config: &BotConfig) -> Self {
        Self {
            bot_token: config.telegram_token.clone(),
            chat_id: config.telegram_chat_id.clone(),
            api_base: config.telegram_api_base.clone(),
            timeout: config.request_timeout,
        }
    }
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Bot API 通用响应
#[derive(Debug, Deserialize)]
struct TelegramApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram 渠道
pub struct TelegramChannel {
    client: reqwest::blocking::Client,
    config: TelegramConfig,
}

impl TelegramChannel {
    pub fn new(config: TelegramConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| BotError::Telegram(format!("cannot create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.config.api_base, self.config.bot_token, method)
    }
}

impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &str {
        "telegram"
    }

    fn send(&self, text: &str) -> Result<()> {
        let body = SendMessageRequest {
            chat_id: &self.config.chat_id,
            text,
        };

        // token 是 URL 的一部分，错误信息里去掉 URL
        let response = self
            .client
            .post(self.api_url("sendMessage"))
            .json(&body)
            .send()
            .map_err(|e| BotError::Telegram(e.without_url().to_string()))?;

        let status = response.status();
        let result: TelegramApiResponse = response
            .json()
            .map_err(|e| BotError::Telegram(format!("invalid response ({}): {}", status, e.without_url())))?;

        if !result.ok {
            return Err(BotError::Telegram(
                result.description.unwrap_or_else(|| format!("status {}", status)),
            ));
        }

        debug!(chat_id = %self.config.chat_id, "Telegram sendMessage ok");
        Ok(())
    }
}
