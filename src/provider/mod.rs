pub use self::{
    access_gate::{AccessGate, LAVAROCK_COLLECTION},
    api::{
        ApiClient, ApiError, ApiErrorKind, MSG_ACCESS_DENIED, MSG_VERIFY_FAILED,
        MSG_WALLET_REQUIRED,
    },
    rpc::Rpc,
    wallet::{
        WalletBridge, WalletFeatures, ERR_NOT_CONNECTED, ERR_SENDING_UNSUPPORTED,
        ERR_SIGNING_UNSUPPORTED,
    },
};

mod access_gate;
mod api;
mod rpc;
mod wallet;
