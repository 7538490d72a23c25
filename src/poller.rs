//! 轮询循环 - 请求 → 校验 → 格式化 → 通知 → 固定休眠
//!
//! 游标策略：
//! 1. 整批记录全部格式化成功后才发送通知
//! 2. 任一记录失败则整批作废，游标不动，下个周期重查同一窗口
//! 3. 通知发送完成后才推进游标，且只向前推进
//!
//! 查询窗口是至少一次（失败的周期会重查同一窗口），但作业通知的投递是至多一次：
//! 某条通知发送失败时游标照样推进，这次状态变化不会再被通知。
//!
//! 每个周期内的任何错误都在 `run_cycle` 边界被吸收：记录日志，
//! 并通过 `ErrorReporter` 尽力通知 chat。

use crate::config::BotConfig;
use crate::error::{BotError, Result};
use crate::homework::{check_response, current_date, parse_status};
use crate::notification::{ErrorReporter, Notifier, ReportOutcome, SendResult};
use crate::practicum::HomeworkSource;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// 休眠抽象（测试中替换为不等待的实现）
pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// 使用 `std::thread::sleep` 的默认实现
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// 单次轮询成功的结果
#[derive(Debug, Clone, PartialEq)]
pub struct PollOutcome {
    /// 本批作业记录数
    pub homeworks: usize,
    /// 成功送达的通知数
    pub sent: usize,
    /// 未实际发送的通知数（dry-run）
    pub skipped: usize,
    /// 送达失败的通知数（已记录日志，不影响游标）
    pub failed: usize,
    /// 推进后的游标
    pub cursor: i64,
}

/// 一个完整周期的结果
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// 轮询成功
    Polled(PollOutcome),
    /// 轮询失败，已记录并（可能）上报
    Failed {
        kind: &'static str,
        message: String,
        report: Option<ReportOutcome>,
    },
}

/// 循环自有状态：时间游标与故障上报缓存
#[derive(Debug)]
pub struct PollState {
    cursor: i64,
    reporter: ErrorReporter,
}

impl PollState {
    pub fn new(cursor: i64) -> Self {
        Self {
            cursor,
            reporter: ErrorReporter::new(),
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    fn advance(&mut self, next: i64) {
        if next >= self.cursor {
            self.cursor = next;
        } else {
            warn!(cursor = self.cursor, current_date = next, "Server time went backwards, keeping cursor");
        }
    }
}

/// 轮询器
pub struct Poller {
    source: Box<dyn HomeworkSource>,
    notifier: Notifier,
    state: PollState,
    interval: Duration,
    sleeper: Box<dyn Sleeper>,
    /// 是否把故障转发到 chat
    report_errors: bool,
}

impl Poller {
    /// 创建轮询器，游标初始化为当前时间
    pub fn new(source: Box<dyn HomeworkSource>, notifier: Notifier, config: &BotConfig) -> Self {
        Self {
            source,
            notifier,
            state: PollState::new(chrono::Utc::now().timestamp()),
            interval: config.retry_interval,
            sleeper: Box::new(ThreadSleeper),
            report_errors: true,
        }
    }

    /// 设置初始游标
    pub fn with_cursor(mut self, cursor: i64) -> Self {
        self.state = PollState::new(cursor);
        self
    }

    /// 设置休眠实现
    pub fn with_sleeper(mut self, sleeper: Box<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// 设置轮询间隔
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// 是否把故障转发到 chat
    pub fn with_error_reports(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn cursor(&self) -> i64 {
        self.state.cursor()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// 执行一次轮询；失败时不修改任何状态
    pub fn poll_once(&mut self) -> Result<PollOutcome> {
        let response = self.source.fetch(self.state.cursor)?;
        let homeworks = check_response(&response)?;
        let next_cursor = current_date(&response)?;

        let messages = homeworks
            .iter()
            .map(parse_status)
            .collect::<Result<Vec<String>>>()?;

        if messages.is_empty() {
            debug!("В ответе отсутствуют новые статусы");
        }

        let mut sent = 0;
        let mut skipped = 0;
        let mut failed = 0;
        for message in &messages {
            match self.notifier.send_message(message) {
                result if result.is_sent() => sent += 1,
                SendResult::Failed(_) => failed += 1,
                _ => skipped += 1,
            }
        }

        self.state.advance(next_cursor);

        Ok(PollOutcome {
            homeworks: messages.len(),
            sent,
            skipped,
            failed,
            cursor: self.state.cursor,
        })
    }

    /// 执行一个周期（不含休眠），吸收所有错误
    pub fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once() {
            Ok(outcome) => {
                self.state.reporter.reset();
                if outcome.homeworks > 0 {
                    info!(
                        homeworks = outcome.homeworks,
                        sent = outcome.sent,
                        skipped = outcome.skipped,
                        failed = outcome.failed,
                        cursor = outcome.cursor,
                        "Poll cycle delivered status changes"
                    );
                }
                CycleOutcome::Polled(outcome)
            }
            Err(e) => self.handle_failure(e),
        }
    }

    fn handle_failure(&mut self, e: BotError) -> CycleOutcome {
        let message = format!("Сбой в работе программы: {}", e);
        error!(error_kind = e.kind(), cursor = self.state.cursor, "{}", message);

        let report = if self.report_errors {
            Some(self.state.reporter.report(&self.notifier, &message))
        } else {
            None
        };

        CycleOutcome::Failed {
            kind: e.kind(),
            message,
            report,
        }
    }

    /// 执行 `cycles` 个周期，周期之间休眠；最后一个周期后不休眠
    pub fn run_for(&mut self, cycles: usize) -> Vec<CycleOutcome> {
        let mut outcomes = Vec::with_capacity(cycles);
        for i in 0..cycles {
            outcomes.push(self.run_cycle());
            if i + 1 < cycles {
                self.sleeper.sleep(self.interval);
            }
        }
        outcomes
    }

    /// 永久运行，直到进程被外部终止
    pub fn run(&mut self) -> ! {
        info!(
            cursor = self.state.cursor,
            interval_secs = self.interval.as_secs(),
            channel = self.notifier.channel_name(),
            "Starting homework status polling"
        );
        loop {
            self.run_cycle();
            self.sleeper.sleep(self.interval);
        }
    }
}
