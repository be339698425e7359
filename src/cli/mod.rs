//! CLI module for the Antigravity console client
//!
//! Uses clap for argument parsing and a structured command pattern for the
//! dashboard, chat, and capital-flow operations.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;

use crate::config::{ClientConfig, DEFAULT_ACCOUNT_ID, DEFAULT_BASE_URL};
use crate::logging::{init_logging, LogMode, LoggingConfig};

use commands::capital::{DepositArgs, WithdrawArgs};
use commands::chat::ChatArgs;
use commands::dashboard::DashboardArgs;

#[derive(Parser)]
#[command(name = "antigravity")]
#[command(version)]
#[command(about = "Console client for the Antigravity trading service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Base URL of the trading service
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Account identifier to operate on
    #[arg(long, global = true, default_value = DEFAULT_ACCOUNT_ID)]
    pub account: String,

    /// Also write logs to per-session files in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Watch live portfolio and trade state
    Dashboard(DashboardArgs),

    /// Talk to the system support agent
    Chat(ChatArgs),

    /// Sync a broker-level deposit into the protected capital base
    Deposit(DepositArgs),

    /// Request a withdrawal from accumulated profit
    Withdraw(WithdrawArgs),
}

impl Cli {
    /// Connection settings derived from the global flags
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url.clone(),
            account_id: self.account.clone(),
            ..ClientConfig::default()
        }
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let default_level = match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        };
        let mode = match &self.log_dir {
            Some(dir) => LogMode::ConsoleAndFile(dir.clone()),
            None => LogMode::Console,
        };
        init_logging(LoggingConfig::new(mode, default_level))?;

        let config = self.client_config();

        match self.command {
            Commands::Dashboard(args) => commands::dashboard::execute(config, args).await,
            Commands::Chat(args) => commands::chat::execute(config, args).await,
            Commands::Deposit(args) => commands::capital::execute_deposit(config, args).await,
            Commands::Withdraw(args) => commands::capital::execute_withdraw(config, args).await,
        }
    }
}
