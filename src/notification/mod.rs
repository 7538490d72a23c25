//! 通知层 - 渠道、通知器与故障上报
//!
//! # 使用示例
//! ```ignore
//! use homework_status_bot::notification::{Notifier, TelegramChannel, TelegramConfig};
//!
//! let channel = TelegramChannel::new(TelegramConfig::from(&config))?;
//! let notifier = Notifier::new(Box::new(channel));
//! notifier.send_message("Hello");
//! ```

pub mod channel;
pub mod channels;
pub mod notifier;
pub mod reporter;

pub use channel::{NotificationChannel, SendResult};
pub use channels::{TelegramChannel, TelegramConfig};
pub use notifier::Notifier;
pub use reporter::{ErrorReporter, ReportOutcome};
