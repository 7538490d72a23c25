//! Homework Status Bot CLI
//!
//! 轮询作业审核状态并推送到 Telegram

use anyhow::Result;
use clap::Parser;
use homework_status_bot::{
    BotConfig, BotError, CycleOutcome, Notifier, Poller, PracticumClient, TelegramChannel,
    config::env_lookup, notification::TelegramConfig,
};
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "hwbot")]
#[command(about = "Homework Status Bot - 轮询作业审核状态并推送到 Telegram")]
#[command(version)]
struct Cli {
    /// 只执行一个轮询周期后退出
    #[arg(long)]
    once: bool,
    /// 轮询间隔（秒），覆盖 RETRY_INTERVAL_SECS
    #[arg(long, short)]
    interval: Option<u64>,
    /// Dry-run 模式（只打印不发送）
    #[arg(long)]
    dry_run: bool,
    /// .env 文件路径
    #[arg(long, default_value = ".env")]
    env_file: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("homework_status_bot=debug,hwbot=debug"));

    fmt()
        .with_writer(std::io::stdout)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let env_file = Path::new(&cli.env_file);
    let mut config = match BotConfig::from_env_file(env_file) {
        Ok(config) => config,
        Err(e @ BotError::Configuration { .. }) => {
            error!(error_kind = e.kind(), "{}", e);
            send_startup_alert(env_file, &e.to_string());
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(secs) = cli.interval.filter(|s| *s > 0) {
        config.retry_interval = Duration::from_secs(secs);
    }

    let source = PracticumClient::from_config(&config)?;
    let channel = TelegramChannel::new(TelegramConfig::from(&config))?;
    let notifier = Notifier::new(Box::new(channel)).with_dry_run(cli.dry_run);
    let mut poller = Poller::new(Box::new(source), notifier, &config);

    if cli.once {
        info!(cursor = poller.cursor(), "Running a single poll cycle");
        if let CycleOutcome::Failed { message, .. } = poller.run_cycle() {
            anyhow::bail!(message);
        }
        return Ok(());
    }

    poller.run()
}

/// 启动失败时，若 Telegram 参数齐全，尽力把错误发到 chat
fn send_startup_alert(env_file: &Path, message: &str) {
    let Some(alert) = BotConfig::alert_only_from_lookup(env_lookup(env_file)) else {
        return;
    };
    match TelegramChannel::new(TelegramConfig::from(&alert)) {
        Ok(channel) => {
            Notifier::new(Box::new(channel)).send_message(message);
        }
        Err(e) => error!(error_kind = e.kind(), "{}", e),
    }
}
