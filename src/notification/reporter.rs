//! 故障上报 - 把轮询失败转发到 chat，抑制连续重复的文本
//!
//! 只记住上一条上报内容，不保存完整历史。
//! 同一故障每个周期都会出现，连续相同的文本只发一次；
//! 故障消失（`reset`）或文本变化后再次上报。

use super::channel::SendResult;
use super::notifier::Notifier;
use tracing::debug;

/// 上报结果
#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    /// 已尝试发送
    Attempted(SendResult),
    /// 与上一条相同，已抑制
    Suppressed,
}

/// 故障上报器
#[derive(Debug, Default)]
pub struct ErrorReporter {
    last_message: Option<String>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 上报一条故障文本
    ///
    /// 发送失败不会再次触发上报；无论结果如何都记住本次文本，
    /// 避免同一条发不出去的消息每个周期都重发。
    pub fn report(&mut self, notifier: &Notifier, message: &str) -> ReportOutcome {
        if self.last_message.as_deref() == Some(message) {
            debug!(message = %message, "Error notification suppressed (same as last)");
            return ReportOutcome::Suppressed;
        }

        let result = notifier.send_message(message);
        self.last_message = Some(message.to_string());
        ReportOutcome::Attempted(result)
    }

    /// 故障恢复后清空，下次同样的故障会重新上报
    pub fn reset(&mut self) {
        if self.last_message.take().is_some() {
            debug!("Error reporter reset after successful poll");
        }
    }

    pub fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::notifier::tests::MockChannel;

    #[test]
    fn test_identical_errors_sent_once() {
        let channel = MockChannel::default();
        let notifier = Notifier::new(Box::new(channel.clone()));
        let mut reporter = ErrorReporter::new();

        assert_eq!(
            reporter.report(&notifier, "boom"),
            ReportOutcome::Attempted(SendResult::Sent)
        );
        assert_eq!(reporter.report(&notifier, "boom"), ReportOutcome::Suppressed);
        assert_eq!(channel.sent.borrow().len(), 1);
    }

    #[test]
    fn test_changed_error_is_sent() {
        let channel = MockChannel::default();
        let notifier = Notifier::new(Box::new(channel.clone()));
        let mut reporter = ErrorReporter::new();

        reporter.report(&notifier, "first");
        reporter.report(&notifier, "second");
        reporter.report(&notifier, "first");

        assert_eq!(*channel.sent.borrow(), vec!["first", "second", "first"]);
    }

    #[test]
    fn test_reset_allows_same_error_again() {
        let channel = MockChannel::default();
        let notifier = Notifier::new(Box::new(channel.clone()));
        let mut reporter = ErrorReporter::new();

        reporter.report(&notifier, "boom");
        reporter.reset();
        assert!(reporter.last_message().is_none());
        reporter.report(&notifier, "boom");

        assert_eq!(channel.sent.borrow().len(), 2);
    }

    #[test]
    fn test_failed_delivery_is_remembered() {
        let channel = MockChannel {
            fail: true,
            ..Default::default()
        };
        let notifier = Notifier::new(Box::new(channel));
        let mut reporter = ErrorReporter::new();

        assert!(matches!(
            reporter.report(&notifier, "boom"),
            ReportOutcome::Attempted(SendResult::Failed(_))
        ));
        assert_eq!(reporter.last_message(), Some("boom"));
        assert_eq!(reporter.report(&notifier, "boom"), ReportOutcome::Suppressed);
    }
}
