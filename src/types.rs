//! Core domain types for the Antigravity client
//!
//! These are the values the sync engines publish and the chat session
//! records. Wire-level response envelopes live next to the API client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Complete view of an account's capital state.
///
/// Replaced wholesale on every successful sync tick; never patched in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Capital firewalled from trading losses. Never negative.
    pub protected_capital_base: Decimal,
    /// Realized profit available for withdrawal or risk. May be negative.
    pub accumulated_profit: Decimal,
    /// Lifetime sum of withdrawals. Never negative.
    pub total_withdrawals: Decimal,
}

impl PortfolioSnapshot {
    /// Total portfolio value, always recomputed from the source fields.
    ///
    /// Not stored anywhere, so it cannot drift from its components.
    pub fn total_value(&self) -> Decimal {
        self.protected_capital_base + self.accumulated_profit
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeAction {
    Buy,
    Sell,
}

/// A single executed trade as reported by the trading engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub asset_id: String,
    pub action: TradeAction,
    pub amount_allocated: Decimal,
    pub execution_price: Decimal,
    pub strategy_used: String,
    /// Risk threshold in force at execution time
    pub cvar_exposure: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Ordered, deduplicated trade feed.
///
/// Ordering invariant: newest first by `timestamp`, with `id` as a stable
/// tie-break so same-timestamp entries never visibly reorder across polls.
/// The full feed is retained; truncation is a read-side concern.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeFeed {
    trades: Vec<Trade>,
}

impl TradeFeed {
    /// Build a feed from an unordered server response.
    ///
    /// Duplicate ids keep their first occurrence.
    pub fn from_unordered(mut trades: Vec<Trade>) -> Self {
        trades.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.id.cmp(&b.id))
        });

        let mut seen: HashSet<String> = HashSet::with_capacity(trades.len());
        trades.retain(|trade| seen.insert(trade.id.clone()));

        Self { trades }
    }

    /// The `n` most recent trades.
    pub fn recent(&self, n: usize) -> &[Trade] {
        &self.trades[..self.trades.len().min(n)]
    }

    pub fn all(&self) -> &[Trade] {
        &self.trades
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }
}

/// Who authored a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// One transcript entry. Ids are monotonic within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub text: String,
}
