//! HTTP access to the trading service
//!
//! The client issues requests and classifies failures; retry policy belongs
//! to the callers. Sync engines retry on their next tick, chat does not
//! auto-retry.

pub mod client;
pub mod error;
pub mod responses;

pub use client::{AgentGateway, ApiClient};
pub use error::TransportError;
pub use responses::{CapitalFlowReceipt, CapitalFlowStatus, PortfolioBalances, WithdrawalSummary};
