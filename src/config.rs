//! 配置加载
//!
//! 必需的环境变量：
//! 1. `PRACTICUM_TOKEN` - Практикум.Домашка API token
//! 2. `TELEGRAM_TOKEN` - Telegram bot token
//! 3. `TELEGRAM_CHAT_ID` - 接收通知的 chat
//!
//! 可选覆盖：`PRACTICUM_ENDPOINT`、`TELEGRAM_API_BASE`、`RETRY_INTERVAL_SECS`。
//! 工作目录下的 `.env` 文件会在启动时加载，不覆盖已存在的环境变量。

use crate::error::{BotError, Result};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

/// 作业状态 API 地址
pub const PRACTICUM_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Telegram Bot API 基础地址
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// 默认轮询间隔（秒）
pub const DEFAULT_RETRY_SECS: u64 = 600;

/// 默认请求超时（秒）
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const ENV_TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const ENV_TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// 机器人配置
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Практикум API token
    pub practicum_token: String,
    /// Telegram bot token
    pub telegram_token: String,
    /// 目标 chat
    pub telegram_chat_id: String,
    /// 作业状态 API 地址（测试时可指向本地服务）
    pub endpoint: String,
    /// Telegram Bot API 基础地址
    pub telegram_api_base: String,
    /// 两次轮询之间的固定间隔
    pub retry_interval: Duration,
    /// 单次 HTTP 请求超时
    pub request_timeout: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            practicum_token: String::new(),
            telegram_token: String::new(),
            telegram_chat_id: String::new(),
            endpoint: PRACTICUM_ENDPOINT.to_string(),
            telegram_api_base: TELEGRAM_API_BASE.to_string(),
            retry_interval: Duration::from_secs(DEFAULT_RETRY_SECS),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl BotConfig {
    /// 从任意查找函数加载配置
    ///
    /// 空字符串视同缺失；所有缺失项一次性报告。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mut missing = Vec::new();
        let mut required = |key: &'static str| {
            get(key).unwrap_or_else(|| {
                missing.push(key);
                String::new()
            })
        };
        let practicum_token = required(ENV_PRACTICUM_TOKEN);
        let telegram_token = required(ENV_TELEGRAM_TOKEN);
        let telegram_chat_id = required(ENV_TELEGRAM_CHAT_ID);

        if !missing.is_empty() {
            return Err(BotError::Configuration { missing });
        }

        let mut config = Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            ..Default::default()
        };

        if let Some(endpoint) = get("PRACTICUM_ENDPOINT") {
            debug!(endpoint = %endpoint, "Using PRACTICUM_ENDPOINT override");
            config.endpoint = endpoint;
        }
        if let Some(base) = get("TELEGRAM_API_BASE") {
            config.telegram_api_base = base.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("RETRY_INTERVAL_SECS") {
            match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => config.retry_interval = Duration::from_secs(secs),
                _ => warn!(value = %raw, "Ignoring invalid RETRY_INTERVAL_SECS"),
            }
        }

        Ok(config)
    }

    /// 先查进程环境，再回退到 `.env` 内容
    pub fn from_env_file(path: &Path) -> Result<Self> {
        Self::from_lookup(env_lookup(path))
    }

    /// 仅含 Telegram 参数的配置，用于启动失败时通知 chat
    ///
    /// token 或 chat 缺失时返回 None。
    pub fn alert_only_from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let telegram_token = get(ENV_TELEGRAM_TOKEN)?;
        let telegram_chat_id = get(ENV_TELEGRAM_CHAT_ID)?;

        let mut config = Self {
            telegram_token,
            telegram_chat_id,
            ..Default::default()
        };
        if let Some(base) = get("TELEGRAM_API_BASE") {
            config.telegram_api_base = base.trim_end_matches('/').to_string();
        }
        Some(config)
    }
}

/// 进程环境优先、`.env` 兜底的查找函数
pub fn env_lookup(path: &Path) -> impl Fn(&str) -> Option<String> {
    let file_vars = read_env_file(path);
    move |key: &str| std::env::var(key).ok().or_else(|| file_vars.get(key).cloned())
}

/// 读取 `.env` 文件；文件不存在或无法解析时返回空表
pub fn read_env_file(path: &Path) -> HashMap<String, String> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "No .env file loaded");
            return HashMap::new();
        }
    };

    let mut vars = HashMap::new();
    for item in iter {
        match item {
            Ok((key, value)) => {
                vars.insert(key, value);
            }
            Err(e) => warn!(path = %path.display(), error = %e, "Skipping malformed .env line"),
        }
    }
    vars
}
