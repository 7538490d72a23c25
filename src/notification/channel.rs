//! 通知渠道 trait 定义

use crate::error::Result;

/// 发送结果
#[derive(Debug, Clone, PartialEq)]
pub enum SendResult {
    /// 发送成功
    Sent,
    /// 跳过（dry-run 等）
    Skipped(String),
    /// 发送失败
    Failed(String),
}

impl SendResult {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendResult::Sent)
    }
}

/// 通知渠道 trait
pub trait NotificationChannel {
    /// 渠道名称（用于日志）
    fn name(&self) -> &str;

    /// 同步发送一条文本消息
    fn send(&self, text: &str) -> Result<()>;
}
