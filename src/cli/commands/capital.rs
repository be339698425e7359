use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::api::{ApiClient, CapitalFlowStatus};
use crate::config::ClientConfig;

#[derive(Args)]
pub struct DepositArgs {
    /// Amount deposited at the broker, in account currency
    pub amount: Decimal,
}

#[derive(Args)]
pub struct WithdrawArgs {
    /// Amount to withdraw, in account currency
    pub amount: Decimal,
}

pub async fn execute_deposit(config: ClientConfig, args: DepositArgs) -> Result<()> {
    let client = ApiClient::new(&config);
    let receipt = client.sync_deposit(&config.account_id, args.amount).await?;

    println!("{} {}", "deposit:".green().bold(), receipt.message);
    if let Some(base) = receipt.new_protected_capital_base {
        println!("  protected capital base is now {}", base.to_string().bold());
    }
    Ok(())
}

pub async fn execute_withdraw(config: ClientConfig, args: WithdrawArgs) -> Result<()> {
    let client = ApiClient::new(&config);
    let receipt = client
        .request_withdrawal(&config.account_id, args.amount)
        .await?;

    match receipt.status {
        CapitalFlowStatus::Success => {
            println!("{} {}", "withdrawal:".green().bold(), receipt.message);
        }
        CapitalFlowStatus::Denied => {
            println!("{} {}", "withdrawal denied:".red().bold(), receipt.message);
        }
    }
    Ok(())
}
