//! 错误类型 - 轮询、校验、格式化与通知各阶段的统一错误

use thiserror::Error;

/// 库内统一 Result 别名
pub type Result<T> = std::result::Result<T, BotError>;

/// 机器人错误
///
/// 每个变体对应一类故障，`kind()` 给出稳定的类名供日志使用。
#[derive(Error, Debug)]
pub enum BotError {
    /// 网络/传输层故障（连接被拒绝、超时、DNS）
    #[error("Сетевая ошибка при подключении к серверу домашки: {0}")]
    Network(String),

    /// 非 200 状态码
    #[error("HTTP-запрос вернул неверный код состояния: {status}")]
    Http { status: u16 },

    /// 响应体不是合法 JSON
    #[error("Ошибка декодирования JSON: {0}")]
    Decode(String),

    /// 响应结构不符合预期
    #[error("Не верный формат ответа API {0}")]
    ApiFormat(String),

    /// 未登记的作业状态
    #[error("Недокументированный статус домашней работы: \"{status}\"")]
    Status { status: String },

    /// 请求过程中的其他意外错误
    #[error("Другая ошибка при запросе к API: {0}")]
    UnknownRequest(String),

    /// 缺少必需的环境变量
    #[error("Не установлены переменные окружения: {}", .missing.join(", "))]
    Configuration { missing: Vec<&'static str> },

    /// Telegram Bot API 发送失败
    #[error("Ошибка при отправке сообщения в telegram: {0}")]
    Telegram(String),
}

impl BotError {
    /// 错误类名
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::Network(_) => "NetworkError",
            BotError::Http { .. } => "HTTPError",
            BotError::Decode(_) => "DecodeError",
            BotError::ApiFormat(_) => "APIFormatError",
            BotError::Status { .. } => "StatusError",
            BotError::UnknownRequest(_) => "UnknownRequestError",
            BotError::Configuration { .. } => "ConfigurationError",
            BotError::Telegram(_) => "TelegramError",
        }
    }

    pub fn api_format(context: impl Into<String>) -> Self {
        BotError::ApiFormat(context.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_carries_status() {
        let err = BotError::Http { status: 503 };
        assert_eq!(err.kind(), "HTTPError");
        assert_eq!(
            err.to_string(),
            "HTTP-запрос вернул неверный код состояния: 503"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = BotError::Status { status: "archived".to_string() };
        assert_eq!(err.kind(), "StatusError");
        assert!(err.to_string().contains("\"archived\""));
    }

    #[test]
    fn test_configuration_error_lists_missing() {
        let err = BotError::Configuration {
            missing: vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"],
        };
        assert_eq!(err.kind(), "ConfigurationError");
        assert!(err.to_string().ends_with("PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"));
    }
}
