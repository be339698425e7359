//! Live synchronization of remote account state
//!
//! A generic polling engine keeps an eventually-consistent local copy of one
//! slice of remote state, with bounded staleness and generation-fenced
//! commits. Concrete sources cover the portfolio snapshot and the trade feed.

pub mod engine;
pub mod portfolio;
pub mod state;
pub mod trades;

pub use engine::{SnapshotSource, SyncEngine, SyncError};
pub use portfolio::{portfolio_engine, PortfolioSource, PortfolioSyncEngine};
pub use state::SyncState;
pub use trades::{trade_feed_engine, TradeFeedSource, TradeFeedSyncEngine};
