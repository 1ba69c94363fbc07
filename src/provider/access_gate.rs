use std::time::Duration;

use reqwest::Client;
use serde_json::json;
use tracing::warn;

use crate::{
    configuration::Config, error::Error, helpers::is_valid_address, types::AssetsByOwnerBody,
};

/// Collection id of the Lavarock NFT gating lender operations.
pub const LAVAROCK_COLLECTION: &str = "FTRsBjkGmhDPvmhLyGZQccBY5AzBcBQpWNSFX7qGYsmr";

const ASSET_PAGE_LIMIT: u32 = 1000;

#[derive(Debug)]
pub struct AccessGate {
    config: Config,
    http: Client,
}

impl AccessGate {
    pub fn new(config: Config) -> Result<AccessGate, Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(AccessGate { config, http })
    }

    /// Fail-closed ownership answer: indexer failures of any kind read
    /// as "does not own" so a degraded third-party service can never
    /// block the caller indefinitely.
    pub async fn has_required_asset(&self, wallet: &str) -> bool {
        match self.check_ownership(wallet).await {
            Ok(owned) => owned,
            Err(e) => {
                warn!("ownership check failed for {}: {}", wallet, e);
                false
            }
        }
    }

    /// Raw ownership query. One `getAssetsByOwner` page of up to 1000
    /// assets, scanned for the Lavarock collection grouping.
    pub async fn check_ownership(&self, wallet: &str) -> Result<bool, Error> {
        if !is_valid_address(wallet) {
            return Ok(false);
        }

        let body = json!({
            "jsonrpc": "2.0",
            "id": "lender-portal",
            "method": "getAssetsByOwner",
            "params": {
                "ownerAddress": wallet,
                "page": 1,
                "limit": ASSET_PAGE_LIMIT,
            },
        });

        let response = self
            .http
            .post(self.config.indexer_rpc_url())
            .json(&body)
            .send()
            .await?
            .json::<AssetsByOwnerBody>()
            .await?;

        if let Some(error) = response.error {
            return Err(Error::Rpc(error.message));
        }

        let page = response
            .result
            .ok_or_else(|| Error::Rpc(String::from("empty indexer response")))?;

        Ok(page.items.iter().any(|item| {
            item.grouping
                .iter()
                .any(|g| g.group_key == "collection" && g.group_value == LAVAROCK_COLLECTION)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Config;

    #[tokio::test]
    async fn malformed_address_is_not_an_owner() {
        let gate = AccessGate::new(Config::for_tests()).unwrap();
        assert!(!gate.has_required_asset("not-a-wallet").await);
        assert_eq!(gate.check_ownership("abc").await.unwrap(), false);
    }

    #[test]
    fn grouping_scan_matches_only_the_collection_key() {
        let body: AssetsByOwnerBody = serde_json::from_str(&format!(
            r#"{{"result":{{"total":2,"items":[
                {{"id":"a","grouping":[{{"group_key":"creator","group_value":"{c}"}}]}},
                {{"id":"b","grouping":[{{"group_key":"collection","group_value":"{c}"}}]}}
            ]}}}}"#,
            c = LAVAROCK_COLLECTION
        ))
        .unwrap();

        let page = body.result.unwrap();
        let matched: Vec<&str> = page
            .items
            .iter()
            .filter(|item| {
                item.grouping
                    .iter()
                    .any(|g| g.group_key == "collection" && g.group_value == LAVAROCK_COLLECTION)
            })
            .map(|item| item.id.as_str())
            .collect();

        assert_eq!(matched, vec!["b"]);
    }
}
