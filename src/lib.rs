//! Homework Status Bot - 轮询 Практикум.Домашка 并把审核状态变化推送到 Telegram

pub mod config;
pub mod error;
pub mod homework;
pub mod notification;
pub mod poller;
pub mod practicum;

pub use config::BotConfig;
pub use error::{BotError, Result};
pub use homework::{check_response, parse_status, HomeworkStatus};
pub use notification::{ErrorReporter, NotificationChannel, Notifier, ReportOutcome, SendResult, TelegramChannel};
pub use poller::{CycleOutcome, PollOutcome, PollState, Poller, Sleeper, ThreadSleeper};
pub use practicum::{HomeworkSource, PracticumClient};
