//! 通知器 - 向配置的 chat 发送消息，失败只记录不上抛

use super::channel::{NotificationChannel, SendResult};
use tracing::{error, info};

/// 通知器
pub struct Notifier {
    channel: Box<dyn NotificationChannel>,
    /// 是否为 dry-run 模式
    dry_run: bool,
}

impl Notifier {
    pub fn new(channel: Box<dyn NotificationChannel>) -> Self {
        Self {
            channel,
            dry_run: false,
        }
    }

    /// 设置 dry-run 模式
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn channel_name(&self) -> &str {
        self.channel.name()
    }

    /// 发送消息
    ///
    /// 渠道错误（限流、网络抖动等）在这里被吸收，调用方只拿到 `SendResult`。
    pub fn send_message(&self, message: &str) -> SendResult {
        if self.dry_run {
            info!(channel = self.channel.name(), message = %message, "[DRY-RUN] Would send message");
            return SendResult::Skipped("dry-run".to_string());
        }

        match self.channel.send(message) {
            Ok(()) => {
                info!("Бот отправил сообщение \"{}\"", message);
                SendResult::Sent
            }
            Err(e) => {
                error!(channel = self.channel.name(), error_kind = e.kind(), "{}", e);
                SendResult::Failed(e.to_string())
            }
        }
    }
}
