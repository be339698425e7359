//! Portfolio snapshot synchronization

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::{ApiClient, TransportError};
use crate::config::ClientConfig;
use crate::sync::engine::{SnapshotSource, SyncEngine, SyncError};
use crate::types::PortfolioSnapshot;

/// Fetches the balance and withdrawal state for one account and merges them
/// into a single snapshot.
pub struct PortfolioSource {
    client: Arc<ApiClient>,
    account_id: String,
}

impl PortfolioSource {
    pub fn new(client: Arc<ApiClient>, account_id: impl Into<String>) -> Result<Self, SyncError> {
        let account_id = account_id.into();
        if account_id.trim().is_empty() {
            return Err(SyncError::EmptyAccountId);
        }
        Ok(Self { client, account_id })
    }
}

#[async_trait]
impl SnapshotSource for PortfolioSource {
    type Snapshot = PortfolioSnapshot;

    /// Both fetches form one logical unit: if either fails, the whole tick
    /// fails and the previously displayed snapshot survives. A half-updated
    /// snapshot is never observable.
    async fn fetch(&self) -> Result<PortfolioSnapshot, TransportError> {
        let (balances, withdrawals) = tokio::try_join!(
            self.client.fetch_portfolio(&self.account_id),
            self.client.fetch_withdrawals(&self.account_id),
        )?;

        Ok(PortfolioSnapshot {
            protected_capital_base: balances.protected_capital_base,
            accumulated_profit: balances.accumulated_profit,
            total_withdrawals: withdrawals.total_withdrawals,
        })
    }
}

pub type PortfolioSyncEngine = SyncEngine<PortfolioSource>;

/// Build a portfolio engine for the configured account
pub fn portfolio_engine(
    client: Arc<ApiClient>,
    config: &ClientConfig,
) -> Result<PortfolioSyncEngine, SyncError> {
    let source = PortfolioSource::new(client, config.account_id.clone())?;
    Ok(SyncEngine::new(source, config.poll_interval))
}
