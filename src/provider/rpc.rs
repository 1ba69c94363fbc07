use std::str::FromStr;
use std::time::Duration;

use base64::{engine::general_purpose, Engine};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use solana_sdk::{pubkey::Pubkey, transaction::VersionedTransaction};
use spl_associated_token_account::get_associated_token_address;

use crate::{
    configuration::Config,
    error::Error,
    types::{RpcBody, RpcContextValue, RpcTokenAmount},
};

/// Direct Solana JSON-RPC access for the two chain reads the portal
/// needs and for transaction submission.
#[derive(Debug)]
pub struct Rpc {
    config: Config,
    http: Client,
}

impl Rpc {
    pub fn new(config: Config) -> Result<Rpc, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Rpc { config, http })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, Error> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let response = self
            .http
            .post(&self.config.rpc_url)
            .json(&body)
            .send()
            .await?
            .json::<RpcBody<T>>()
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc(error.message));
        }

        response
            .result
            .ok_or_else(|| Error::Rpc(format!("empty response for {}", method)))
    }

    /// Native balance in lamports.
    pub async fn get_balance(&self, address: &str) -> Result<u64, Error> {
        let value: RpcContextValue<u64> = self.call("getBalance", json!([address])).await?;
        Ok(value.value)
    }

    /// Balance of `mint` held by `owner`, read from the associated
    /// token account, in ui units.
    pub async fn get_token_balance(&self, owner: &str, mint: &str) -> Result<f64, Error> {
        let owner = Pubkey::from_str(owner).map_err(|e| Error::Rpc(e.to_string()))?;
        let mint = Pubkey::from_str(mint).map_err(|e| Error::Rpc(e.to_string()))?;
        let token_account = get_associated_token_address(&owner, &mint);

        let result: Result<RpcContextValue<RpcTokenAmount>, Error> = self
            .call("getTokenAccountBalance", json!([token_account.to_string()]))
            .await;

        match result {
            Ok(v) => Ok(v.value.ui_amount.unwrap_or(0.0)),
            // a wallet that never held the token has no token account
            Err(Error::Rpc(message))
                if message.to_lowercase().contains("could not find account") =>
            {
                Ok(0.0)
            }
            Err(e) => Err(e),
        }
    }

    /// Submits a signed transaction. No client-side retries; a failed
    /// submission is the caller's to resubmit.
    pub async fn send_transaction(&self, tx: &VersionedTransaction) -> Result<String, Error> {
        let bytes = bincode::serialize(tx)?;
        let encoded = general_purpose::STANDARD.encode(bytes);

        self.call(
            "sendTransaction",
            json!([encoded, {"encoding": "base64", "skipPreflight": false, "maxRetries": 0}]),
        )
        .await
    }
}
