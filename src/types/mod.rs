pub use self::{
    asset::{AssetGrouping, AssetItem, AssetPage, AssetsByOwnerBody, IndexerError},
    liquidation::Liquidation,
    offer::Offer,
    pool_balance::{PoolBalance, PortfolioSummary},
    position::{Position, PositionStatus},
    request::{
        ChangeLtvParams, ChangeLtvRequest, CreateOfferParams, CreateOfferRequest,
        PoolActionParams, PoolActionRequest, UpdateOfferParams, UpdateOfferRequest,
    },
    rpc_response::{RpcBody, RpcContextValue, RpcErrorBody, RpcTokenAmount},
    token::{TokenInfo, TokenPrice, TokenRef},
    transaction::TransactionEnvelope,
    wallet_balance::WalletBalance,
};

mod asset;
mod liquidation;
mod offer;
mod pool_balance;
mod position;
mod request;
mod rpc_response;
mod token;
mod transaction;
mod wallet_balance;
