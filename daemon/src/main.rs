//! stakegov daemon: bootstraps the state machine and replays operation logs.

mod config;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use config::DaemonConfig;
use stakegov_dao::{Dao, OperationLog};
use stakegov_utils::LogFormat;

#[derive(Parser)]
#[command(name = "stakegov-daemon", about = "stakegov ledger and governance state machine")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "STAKEGOV_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "STAKEGOV_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "STAKEGOV_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Apply a JSON-lines operation log to a fresh genesis state.
    Replay {
        /// Path to the operation log.
        log: PathBuf,

        /// Print the final state as JSON after the results.
        #[arg(long)]
        snapshot: bool,
    },
    /// Print the default configuration as TOML.
    DefaultConfig,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => DaemonConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DaemonConfig::default(),
    };
    let config = DaemonConfig {
        log_level: cli.log_level.unwrap_or(file_config.log_level),
        log_format: cli.log_format.unwrap_or(file_config.log_format),
        ..file_config
    };

    stakegov_utils::init_logging(config.log_format, &config.log_level);

    match cli.command {
        Command::Replay { log, snapshot } => replay(&config, &log, snapshot),
        Command::DefaultConfig => {
            print!("{}", DaemonConfig::default().to_toml_string()?);
            Ok(())
        }
    }
}

fn replay(config: &DaemonConfig, path: &Path, snapshot: bool) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading operation log {}", path.display()))?;
    let log = OperationLog::parse(&text)?;
    tracing::info!(entries = log.len(), path = %path.display(), "operation log loaded");

    let mut dao = Dao::genesis(&config.genesis)?;
    let results = log.replay(&mut dao);

    for (index, (entry, result)) in log.entries().iter().zip(&results).enumerate() {
        let line = match result {
            Ok(receipt) => serde_json::json!({
                "index": index,
                "op": entry.op.name(),
                "caller": entry.caller,
                "height": entry.height,
                "ok": receipt,
            }),
            Err(e) => serde_json::json!({
                "index": index,
                "op": entry.op.name(),
                "caller": entry.caller,
                "height": entry.height,
                "error": { "code": e.code().as_u32(), "message": e.to_string() },
            }),
        };
        println!("{line}");
    }

    if !dao.check_conservation() {
        anyhow::bail!("conservation check failed after replay");
    }
    if snapshot {
        println!("{}", serde_json::to_string_pretty(&dao)?);
    }
    Ok(())
}
