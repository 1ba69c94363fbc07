use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::warn;

use crate::{
    configuration::Config,
    provider::AccessGate,
    types::{
        ChangeLtvRequest, CreateOfferRequest, Liquidation, Offer, PoolActionRequest, PoolBalance,
        Position, TokenInfo, TokenPrice, TransactionEnvelope, UpdateOfferRequest,
    },
};

pub const MSG_WALLET_REQUIRED: &str = "Wallet address required for lender operations";
pub const MSG_ACCESS_DENIED: &str = "Access denied: Lavarock NFT required for lender operations";
pub const MSG_VERIFY_FAILED: &str = "Unable to verify Lavarock NFT ownership";

/// Server messages that mean "brand-new wallet, nothing on chain yet".
const EXPECTED_EMPTY_MESSAGES: &[&str] = &["node wallet not found", "failed to get pool balance"];

/// Sentinel the API uses in access-denial messages.
const ACCESS_SENTINEL: &str = "lavarock nft";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Benign absence of data; consumers substitute an empty value.
    ExpectedEmpty,
    /// Request timed out; logged but not surfaced as a notification.
    Timeout,
    /// The wallet lacks the Lavarock NFT; routed to the access modal.
    AccessDenied,
    /// Everything else; surfaced as a toast with the raw message.
    Other,
}

#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
        }
    }

    /// Classifies a raw failure message. Runs once, here at the
    /// boundary; consumers switch on `kind` and never re-parse text.
    pub fn classify(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_lowercase();

        let kind = if EXPECTED_EMPTY_MESSAGES.iter().any(|m| lower.contains(m)) {
            ApiErrorKind::ExpectedEmpty
        } else if lower.contains("timeout") {
            ApiErrorKind::Timeout
        } else if lower.contains(ACCESS_SENTINEL) {
            ApiErrorKind::AccessDenied
        } else {
            ApiErrorKind::Other
        };

        ApiError { kind, message }
    }

    fn from_transport(error: reqwest::Error, timeout_ms: u64) -> Self {
        if error.is_timeout() {
            ApiError::new(
                ApiErrorKind::Timeout,
                format!("Request timeout of {}ms exceeded", timeout_ms),
            )
        } else {
            ApiError::classify(error.to_string())
        }
    }
}

/// Typed client for the LAVARAGE lender API. Owns the access gate and
/// the per-instance wallet context used by the mutating pre-check.
#[derive(Debug)]
pub struct ApiClient {
    config: Config,
    http: Client,
    gate: AccessGate,
    wallet_context: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<ApiClient, crate::error::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        let gate = AccessGate::new(config.clone())?;

        Ok(ApiClient {
            config,
            http,
            gate,
            wallet_context: RwLock::new(None),
        })
    }

    /// Registers the connected wallet as the fallback identity for the
    /// access pre-check.
    pub async fn set_wallet(&self, address: &str) {
        *self.wallet_context.write().await = Some(address.to_owned());
    }

    /// Must run on disconnect so a stale identity never leaks into a
    /// later pre-check.
    pub async fn clear_wallet(&self) {
        *self.wallet_context.write().await = None;
    }

    pub async fn wallet_context(&self) -> Option<String> {
        self.wallet_context.read().await.clone()
    }

    pub fn gate(&self) -> &AccessGate {
        &self.gate
    }

    // ------------------------------------------------------------------
    // Read endpoints
    // ------------------------------------------------------------------

    pub async fn offers(&self) -> Result<Vec<Offer>, ApiError> {
        self.get_json("/offers", &[]).await
    }

    pub async fn lender_offers(&self, lender: &str) -> Result<Vec<Offer>, ApiError> {
        self.get_json("/lender/offers", &[("lenderWallet", lender)])
            .await
    }

    pub async fn lender_positions(&self, lender: &str) -> Result<Vec<Position>, ApiError> {
        self.get_json("/lender/positions", &[("lenderWallet", lender)])
            .await
    }

    pub async fn lender_liquidations(&self, lender: &str) -> Result<Vec<Liquidation>, ApiError> {
        self.get_json("/lender/liquidations", &[("lenderWallet", lender)])
            .await
    }

    pub async fn pool_balance(
        &self,
        lender: &str,
        quote_token: &str,
    ) -> Result<PoolBalance, ApiError> {
        self.get_json(
            "/lender/pools/balance",
            &[("lenderWallet", lender), ("quoteToken", quote_token)],
        )
        .await
    }

    pub async fn token_metadata(&self, address: &str) -> Result<TokenInfo, ApiError> {
        self.get_json("/tokens/metadata", &[("address", address)])
            .await
    }

    pub async fn token_price(&self, address: &str) -> Result<TokenPrice, ApiError> {
        self.get_json("/tokens/price", &[("address", address)]).await
    }

    // ------------------------------------------------------------------
    // Mutating lender endpoints, pre-gated in production mode
    // ------------------------------------------------------------------

    pub async fn create_offer(
        &self,
        request: &CreateOfferRequest,
    ) -> Result<TransactionEnvelope, ApiError> {
        self.ensure_lender_access(Some(request.user_wallet.as_str())).await?;
        self.post_json("/lender/offers/create", request).await
    }

    pub async fn update_offer(
        &self,
        request: &UpdateOfferRequest,
    ) -> Result<TransactionEnvelope, ApiError> {
        self.ensure_lender_access(Some(request.user_wallet.as_str())).await?;
        self.post_json("/lender/offers/update", request).await
    }

    pub async fn change_ltv(
        &self,
        request: &ChangeLtvRequest,
    ) -> Result<TransactionEnvelope, ApiError> {
        self.ensure_lender_access(Some(request.user_wallet.as_str())).await?;
        self.post_json("/lender/offers/changeLTV", request).await
    }

    pub async fn deposit(
        &self,
        request: &PoolActionRequest,
    ) -> Result<TransactionEnvelope, ApiError> {
        self.ensure_lender_access(Some(request.user_wallet.as_str())).await?;
        self.post_json("/lender/pools/deposit", request).await
    }

    pub async fn withdraw(
        &self,
        request: &PoolActionRequest,
    ) -> Result<TransactionEnvelope, ApiError> {
        self.ensure_lender_access(Some(request.user_wallet.as_str())).await?;
        self.post_json("/lender/pools/withdraw", request).await
    }

    /// Ownership pre-check for mutating lender endpoints. Completes
    /// before any network dispatch; skipped outside production mode.
    async fn ensure_lender_access(&self, explicit: Option<&str>) -> Result<(), ApiError> {
        if !self.config.is_production() {
            return Ok(());
        }

        let address = match explicit.filter(|a| !a.is_empty()) {
            Some(a) => Some(a.to_owned()),
            None => self.wallet_context().await,
        };

        let Some(address) = address else {
            return Err(ApiError::new(ApiErrorKind::Other, MSG_WALLET_REQUIRED));
        };

        match self.gate.check_ownership(&address).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(ApiError::new(ApiErrorKind::AccessDenied, MSG_ACCESS_DENIED)),
            Err(e) => {
                warn!("access gate unavailable for {}: {}", address, e);
                Err(ApiError::new(ApiErrorKind::Other, MSG_VERIFY_FAILED))
            }
        }
    }

    // ------------------------------------------------------------------
    // Request plumbing
    // ------------------------------------------------------------------

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    fn timeout_ms(&self) -> u64 {
        self.config.timeout * 1000
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        // cache buster: polled reads must not be served stale by
        // intermediaries
        let ts = Utc::now().timestamp_millis().to_string();

        let response = self
            .http
            .get(self.endpoint(path))
            .header("x-api-key", &self.config.api_key)
            .query(query)
            .query(&[("ts", ts.as_str())])
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout_ms()))?;

        Self::parse(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .http
            .post(self.endpoint(path))
            .header("x-api-key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::from_transport(e, self.timeout_ms()))?;

        Self::parse(response).await
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::classify(e.to_string()));
        }

        let message = match response.json::<Value>().await {
            Ok(body) => body
                .get("message")
                .and_then(Value::as_str)
                .or_else(|| body.get("error").and_then(Value::as_str))
                .map(str::to_owned)
                .unwrap_or_else(|| format!("request failed with status {}", status)),
            Err(_) => format!("request failed with status {}", status),
        };

        Err(ApiError::classify(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Config;

    #[test]
    fn classification_happens_once_at_the_boundary() {
        let e = ApiError::classify("Failed to get pool balance for wallet 7xKq");
        assert_eq!(e.kind, ApiErrorKind::ExpectedEmpty);

        let e = ApiError::classify("node wallet not found");
        assert_eq!(e.kind, ApiErrorKind::ExpectedEmpty);

        let e = ApiError::classify("Request timeout of 30000ms exceeded");
        assert_eq!(e.kind, ApiErrorKind::Timeout);

        let e = ApiError::classify(MSG_ACCESS_DENIED);
        assert_eq!(e.kind, ApiErrorKind::AccessDenied);

        let e = ApiError::classify("internal server error");
        assert_eq!(e.kind, ApiErrorKind::Other);
        assert_eq!(e.message, "internal server error");
    }

    #[tokio::test]
    async fn pre_check_is_skipped_outside_production() {
        let client = ApiClient::new(Config::for_tests()).unwrap();
        assert!(client.ensure_lender_access(None).await.is_ok());
    }

    #[tokio::test]
    async fn pre_check_requires_a_wallet_address_in_production() {
        let mut config = Config::for_tests();
        config.execution_mode = crate::configuration::ExecutionMode::Production;

        let client = ApiClient::new(config).unwrap();
        let err = client.ensure_lender_access(None).await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Other);
        assert_eq!(err.message, MSG_WALLET_REQUIRED);

        // empty explicit address falls back to the (absent) context
        let err = client.ensure_lender_access(Some("")).await.unwrap_err();
        assert_eq!(err.message, MSG_WALLET_REQUIRED);
    }

    #[tokio::test]
    async fn wallet_context_is_cleared_on_disconnect() {
        let client = ApiClient::new(Config::for_tests()).unwrap();
        client.set_wallet("9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM").await;
        assert!(client.wallet_context().await.is_some());

        client.clear_wallet().await;
        assert_eq!(client.wallet_context().await, None);
    }
}
