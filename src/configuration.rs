use std::{env, ops::Deref, str::FromStr, sync::Arc};

use moka::future::Cache;
use tokio::sync::RwLock;
use url::Url;

use crate::{
    cache::token_cache,
    error::Error,
    handler::Feed,
    helpers::NATIVE_MINT,
    notification::Notifier,
    provider::{ApiClient, Rpc, WalletBridge},
    types::{
        Liquidation, Offer, PoolBalance, Position, TokenInfo, TokenPrice, WalletBalance,
    },
};

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

/// The access pre-check on mutating lender endpoints only runs in
/// production; everything else treats the modes identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Production,
    Development,
}

impl FromStr for ExecutionMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<ExecutionMode, Self::Err> {
        match value {
            "production" => Ok(ExecutionMode::Production),
            "development" => Ok(ExecutionMode::Development),
            other => Err(Error::ConfigurationError(format!(
                "unknown execution mode: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub api_key: String,
    pub rpc_url: String,
    pub indexer_url: String,
    pub indexer_api_key: String,
    pub network: String,
    pub execution_mode: ExecutionMode,
    pub enable_polling: bool,
    pub poll_interval_ms: u64,
    pub timeout: u64,
    pub default_quote_token: String,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub wallet_keypair_path: Option<String>,
    pub wallet_label: String,
}

impl Config {
    pub fn is_production(&self) -> bool {
        self.execution_mode == ExecutionMode::Production
    }

    pub fn indexer_rpc_url(&self) -> String {
        format!("{}/?api-key={}", self.indexer_url, self.indexer_api_key)
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

pub fn get_configuration() -> Result<Config, Error> {
    let api_base_url = env::var("API_BASE_URL")?;
    let api_key = env::var("API_KEY")?;
    let rpc_url = env::var("RPC_URL")?;
    let indexer_url = env::var("INDEXER_URL")?;
    let indexer_api_key = env::var("INDEXER_API_KEY")?;
    let network = env_or("NETWORK", "mainnet-beta");
    let execution_mode: ExecutionMode = env_or("EXECUTION_MODE", "production").parse()?;
    let enable_polling: bool = env_or("ENABLE_POLLING", "true").parse()?;
    let poll_interval_ms: u64 = env_or("POLL_INTERVAL_MS", "30000").parse()?;
    let timeout: u64 = env_or("TIMEOUT", "30").parse()?;
    let default_quote_token = env_or("DEFAULT_QUOTE_TOKEN", NATIVE_MINT);

    let server_host = env_or("SERVER_HOST", "0.0.0.0");
    let port: u16 = env_or("PORT", "8080").parse()?;
    let allowed_origins = env_or("ALLOWED_ORIGINS", "*")
        .split(',')
        .map(|item| item.to_owned())
        .collect::<Vec<String>>();

    let wallet_keypair_path = env::var("WALLET_KEYPAIR_PATH").ok();
    let wallet_label = env_or("WALLET_LABEL", "local");

    // fail on malformed endpoints at startup, not on the first request
    Url::parse(&api_base_url)?;
    Url::parse(&rpc_url)?;
    Url::parse(&indexer_url)?;

    Ok(Config {
        api_base_url,
        api_key,
        rpc_url,
        indexer_url,
        indexer_api_key,
        network,
        execution_mode,
        enable_polling,
        poll_interval_ms,
        timeout,
        default_quote_token,
        server_host,
        port,
        allowed_origins,
        wallet_keypair_path,
        wallet_label,
    })
}

pub struct State {
    pub config: Config,
    pub api: ApiClient,
    pub rpc: Rpc,
    pub wallet: WalletBridge,
    pub notifier: Notifier,
    pub token_metadata: Cache<String, TokenInfo>,
    pub token_prices: Cache<String, TokenPrice>,
    pub selected_quote: RwLock<String>,
    pub offers: Feed<Vec<Offer>>,
    pub positions: Feed<Vec<Position>>,
    pub liquidations: Feed<Vec<Liquidation>>,
    pub pool_balance: Feed<PoolBalance>,
    pub wallet_balance: Feed<WalletBalance>,
}

impl State {
    pub fn new(config: Config) -> Result<State, Error> {
        let api = ApiClient::new(config.clone())?;
        let rpc = Rpc::new(config.clone())?;
        let selected_quote = RwLock::new(config.default_quote_token.clone());

        Ok(State {
            config,
            api,
            rpc,
            wallet: WalletBridge::new(),
            notifier: Notifier::new(),
            token_metadata: token_cache(),
            token_prices: token_cache(),
            selected_quote,
            offers: Feed::new(Vec::new()),
            positions: Feed::new(Vec::new()),
            liquidations: Feed::new(Vec::new()),
            pool_balance: Feed::new(PoolBalance::default()),
            wallet_balance: Feed::new(WalletBalance::default()),
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Config {
        Config {
            api_base_url: "http://127.0.0.1:1".to_owned(),
            api_key: "test-key".to_owned(),
            rpc_url: "http://127.0.0.1:1".to_owned(),
            indexer_url: "http://127.0.0.1:1".to_owned(),
            indexer_api_key: "test-indexer-key".to_owned(),
            network: "mainnet-beta".to_owned(),
            execution_mode: ExecutionMode::Development,
            enable_polling: true,
            poll_interval_ms: 30_000,
            timeout: 30,
            default_quote_token: NATIVE_MINT.to_owned(),
            server_host: "127.0.0.1".to_owned(),
            port: 0,
            allowed_origins: vec!["*".to_owned()],
            wallet_keypair_path: None,
            wallet_label: "test".to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn execution_mode_parsing() {
        assert_eq!(
            "production".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Production
        );
        assert_eq!(
            "development".parse::<ExecutionMode>().unwrap(),
            ExecutionMode::Development
        );
        assert!("staging".parse::<ExecutionMode>().is_err());
    }

    #[test]
    fn state_boots_from_a_plain_config() {
        let state = State::new(Config::for_tests()).unwrap();
        assert!(!state.config.is_production());
    }
}
