//! Typed client for the trading service REST API

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::api::error::TransportError;
use crate::api::responses::{CapitalFlowReceipt, PortfolioBalances, WithdrawalSummary};
use crate::config::ClientConfig;
use crate::types::Trade;

/// Seam for the conversational endpoint so the chat session can be driven
/// against a stub in tests.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    /// Send one user message and await the agent's raw text reply.
    async fn send_message(&self, text: &str) -> Result<String, TransportError>;
}

/// HTTP client for the trading service.
///
/// Stateless beyond the connection pool; every failure is classified into a
/// [`TransportError`] and no retries happen at this layer.
pub struct ApiClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: config.request_timeout,
        }
    }

    /// Fetch the balance half of the portfolio state
    pub async fn fetch_portfolio(
        &self,
        account_id: &str,
    ) -> Result<PortfolioBalances, TransportError> {
        self.get_json(&format!("/api/v1/portfolio/{}", account_id))
            .await
    }

    /// Fetch the withdrawal half of the portfolio state
    pub async fn fetch_withdrawals(
        &self,
        account_id: &str,
    ) -> Result<WithdrawalSummary, TransportError> {
        self.get_json(&format!("/api/v1/portfolio/{}/withdrawals", account_id))
            .await
    }

    /// Fetch the full trade list for an account
    pub async fn fetch_trades(&self, account_id: &str) -> Result<Vec<Trade>, TransportError> {
        self.get_json(&format!("/api/v1/trades/{}", account_id))
            .await
    }

    /// Send one chat message as text/plain and return the raw text reply
    pub async fn send_chat_message(&self, text: &str) -> Result<String, TransportError> {
        let url = format!("{}/api/v1/agent/chat", self.base_url);
        debug!(%url, "POST chat message");

        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "text/plain")
            .body(text.to_string())
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        response.text().await.map_err(TransportError::from_reqwest)
    }

    /// Report a broker-level deposit so the protected capital base is updated
    pub async fn sync_deposit(
        &self,
        account_id: &str,
        amount: Decimal,
    ) -> Result<CapitalFlowReceipt, TransportError> {
        self.post_capital_flow("/api/v1/portfolio/sync-deposit", account_id, amount)
            .await
    }

    /// Request a withdrawal. A denial for breaching the capital preservation
    /// constraint comes back as a normal receipt.
    pub async fn request_withdrawal(
        &self,
        account_id: &str,
        amount: Decimal,
    ) -> Result<CapitalFlowReceipt, TransportError> {
        self.post_capital_flow("/api/v1/portfolio/request-withdrawal", account_id, amount)
            .await
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::HttpStatus(status.as_u16()));
        }

        let body = response.text().await.map_err(TransportError::from_reqwest)?;
        serde_json::from_str(&body).map_err(|e| TransportError::MalformedResponse(e.to_string()))
    }

    async fn post_capital_flow(
        &self,
        path: &str,
        account_id: &str,
        amount: Decimal,
    ) -> Result<CapitalFlowReceipt, TransportError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, %amount, "POST capital flow");

        let response = self
            .client
            .post(&url)
            .query(&[("userId", account_id), ("amount", &amount.to_string())])
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(TransportError::from_reqwest)?;

        let status = response.status();
        let body = response.text().await.map_err(TransportError::from_reqwest)?;

        // A 400 carrying a parseable receipt is a domain denial, not a
        // transport failure.
        if status.is_success() || status.as_u16() == 400 {
            if let Ok(receipt) = serde_json::from_str::<CapitalFlowReceipt>(&body) {
                return Ok(receipt);
            }
            if status.is_success() {
                return Err(TransportError::MalformedResponse(
                    "capital flow receipt did not match expected shape".to_string(),
                ));
            }
        }

        Err(TransportError::HttpStatus(status.as_u16()))
    }
}

#[async_trait]
impl AgentGateway for ApiClient {
    async fn send_message(&self, text: &str) -> Result<String, TransportError> {
        self.send_chat_message(text).await
    }
}
