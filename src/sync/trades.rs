//! Trade feed synchronization

use async_trait::async_trait;
use std::sync::Arc;

use crate::api::{ApiClient, TransportError};
use crate::config::ClientConfig;
use crate::sync::engine::{SnapshotSource, SyncEngine, SyncError};
use crate::types::TradeFeed;

/// Fetches the full trade list for one account. Each tick's list fully
/// replaces the prior feed; there is no incremental patching.
pub struct TradeFeedSource {
    client: Arc<ApiClient>,
    account_id: String,
}

impl TradeFeedSource {
    pub fn new(client: Arc<ApiClient>, account_id: impl Into<String>) -> Result<Self, SyncError> {
        let account_id = account_id.into();
        if account_id.trim().is_empty() {
            return Err(SyncError::EmptyAccountId);
        }
        Ok(Self { client, account_id })
    }
}

#[async_trait]
impl SnapshotSource for TradeFeedSource {
    type Snapshot = TradeFeed;

    async fn fetch(&self) -> Result<TradeFeed, TransportError> {
        let trades = self.client.fetch_trades(&self.account_id).await?;
        Ok(TradeFeed::from_unordered(trades))
    }
}

pub type TradeFeedSyncEngine = SyncEngine<TradeFeedSource>;

/// Build a trade feed engine for the configured account
pub fn trade_feed_engine(
    client: Arc<ApiClient>,
    config: &ClientConfig,
) -> Result<TradeFeedSyncEngine, SyncError> {
    let source = TradeFeedSource::new(client, config.account_id.clone())?;
    Ok(SyncEngine::new(source, config.poll_interval))
}
