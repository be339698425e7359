use anyhow::Result;
use clap::Args;
use owo_colors::OwoColorize;
use std::sync::Arc;
use tracing::info;

use crate::api::ApiClient;
use crate::config::ClientConfig;
use crate::sync::{portfolio_engine, trade_feed_engine, SyncState};
use crate::types::{PortfolioSnapshot, TradeAction, TradeFeed};

#[derive(Args)]
pub struct DashboardArgs {
    /// Number of recent trades to show
    #[arg(long, default_value = "10")]
    pub depth: usize,
}

/// Run both sync engines and print each published state until Ctrl-C.
pub async fn execute(config: ClientConfig, args: DashboardArgs) -> Result<()> {
    let client = Arc::new(ApiClient::new(&config));

    let mut portfolio = portfolio_engine(Arc::clone(&client), &config)?;
    let mut trades = trade_feed_engine(client, &config)?;

    let mut portfolio_rx = portfolio.subscribe();
    let mut trades_rx = trades.subscribe();

    portfolio.start()?;
    trades.start()?;
    info!(account = %config.account_id, "Dashboard started, press Ctrl-C to exit");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = portfolio_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                print_portfolio(&portfolio_rx.borrow().clone());
            }
            changed = trades_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                print_trades(&trades_rx.borrow().clone(), args.depth);
            }
        }
    }

    portfolio.stop();
    trades.stop();
    info!("Dashboard stopped");
    Ok(())
}

fn print_portfolio(state: &SyncState<PortfolioSnapshot>) {
    if let Some(err) = &state.last_error {
        println!("{} {}", "portfolio sync degraded:".yellow(), err);
    }
    let Some(snapshot) = &state.data else {
        println!("{}", "waiting for first portfolio snapshot...".dimmed());
        return;
    };

    println!("{}", "── Portfolio ──────────────────────────".bold());
    println!("  Protected capital base  {}", snapshot.protected_capital_base.to_string().cyan());
    println!("  Accumulated profit      {}", snapshot.accumulated_profit.to_string().green());
    println!("  Total withdrawals       {}", snapshot.total_withdrawals);
    println!("  Total value             {}", snapshot.total_value().to_string().bold());
}

fn print_trades(state: &SyncState<TradeFeed>, depth: usize) {
    if let Some(err) = &state.last_error {
        println!("{} {}", "trade sync degraded:".yellow(), err);
    }
    let Some(feed) = &state.data else {
        return;
    };
    if feed.is_empty() {
        println!("{}", "Awaiting first trade execution...".dimmed());
        return;
    }

    println!("{}", "── Recent Executions ──────────────────".bold());
    for trade in feed.recent(depth) {
        let action = match trade.action {
            TradeAction::Buy => "BUY ".green().to_string(),
            TradeAction::Sell => "SELL".red().to_string(),
        };
        println!(
            "  {}  {}  {:>12} @ {:>10}  {}  {}",
            trade.timestamp.format("%H:%M:%S"),
            action,
            trade.amount_allocated.to_string(),
            trade.execution_price.to_string(),
            trade.asset_id,
            trade.strategy_used.dimmed(),
        );
    }
}
