//! Wire-level response envelopes

use rust_decimal::Decimal;
use serde::Deserialize;

/// Balance half of a portfolio tick. Unknown fields from richer server
/// payloads are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioBalances {
    pub protected_capital_base: Decimal,
    pub accumulated_profit: Decimal,
}

/// Withdrawal half of a portfolio tick
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalSummary {
    pub total_withdrawals: Decimal,
}

/// Outcome of a capital-flow request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CapitalFlowStatus {
    Success,
    /// Request breached the capital preservation constraint
    Denied,
}

/// Server receipt for deposit-sync and withdrawal requests.
///
/// A denied withdrawal arrives as a well-formed receipt, not an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalFlowReceipt {
    pub status: CapitalFlowStatus,
    pub message: String,
    #[serde(default)]
    pub new_protected_capital_base: Option<Decimal>,
}
