use solana_sdk::{
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::VersionedTransaction,
};
use tokio::sync::RwLock;
use tracing::info;

use crate::{error::Error, provider::Rpc};

pub const ERR_NOT_CONNECTED: &str = "Wallet not connected";
pub const ERR_SIGNING_UNSUPPORTED: &str = "Active wallet does not support transaction signing";
pub const ERR_SENDING_UNSUPPORTED: &str = "Active wallet does not support sending transactions";

#[derive(Debug, Clone, Copy)]
pub struct WalletFeatures {
    pub signing: bool,
    pub sending: bool,
}

impl WalletFeatures {
    pub fn full() -> Self {
        WalletFeatures {
            signing: true,
            sending: true,
        }
    }

    pub fn watch_only() -> Self {
        WalletFeatures {
            signing: false,
            sending: false,
        }
    }
}

struct Session {
    name: String,
    keypair: Keypair,
    features: WalletFeatures,
}

/// Signing session for the portal. The service analog of the browser
/// wallet adapter: one named signer at a time, capability-gated sign
/// and sign-and-send, no retries.
#[derive(Default)]
pub struct WalletBridge {
    session: RwLock<Option<Session>>,
}

impl WalletBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn connect(
        &self,
        name: &str,
        keypair: Keypair,
        features: WalletFeatures,
    ) -> String {
        let address = keypair.pubkey().to_string();
        info!("wallet {} connected: {}", name, address);

        *self.session.write().await = Some(Session {
            name: name.to_owned(),
            keypair,
            features,
        });

        address
    }

    pub async fn disconnect(&self) {
        if self.session.write().await.take().is_some() {
            info!("wallet disconnected");
        }
    }

    pub async fn is_connected(&self) -> bool {
        self.session.read().await.is_some()
    }

    pub async fn pubkey(&self) -> Option<Pubkey> {
        self.session
            .read()
            .await
            .as_ref()
            .map(|s| s.keypair.pubkey())
    }

    pub async fn wallet_name(&self) -> Option<String> {
        self.session.read().await.as_ref().map(|s| s.name.clone())
    }

    /// Returns a signed copy of the transaction. The original is left
    /// untouched so a failed submission can be retried from scratch.
    pub async fn sign_transaction(
        &self,
        tx: &VersionedTransaction,
    ) -> Result<VersionedTransaction, Error> {
        let session = self.session.read().await;
        let session = session
            .as_ref()
            .ok_or_else(|| Error::Wallet(ERR_NOT_CONNECTED.to_owned()))?;

        if !session.features.signing {
            return Err(Error::Wallet(ERR_SIGNING_UNSUPPORTED.to_owned()));
        }

        sign_with(tx, &session.keypair)
    }

    /// Signs and submits in one step, returning the signature string.
    pub async fn sign_and_send(
        &self,
        tx: &VersionedTransaction,
        rpc: &Rpc,
    ) -> Result<String, Error> {
        let signed = {
            let session = self.session.read().await;
            let session = session
                .as_ref()
                .ok_or_else(|| Error::Wallet(ERR_NOT_CONNECTED.to_owned()))?;

            if !session.features.sending {
                return Err(Error::Wallet(ERR_SENDING_UNSUPPORTED.to_owned()));
            }
            if !session.features.signing {
                return Err(Error::Wallet(ERR_SIGNING_UNSUPPORTED.to_owned()));
            }

            sign_with(tx, &session.keypair)?
        };

        rpc.send_transaction(&signed).await
    }
}

/// Places the wallet's signature at its required-signer slot, leaving
/// every other byte of the transaction as received.
fn sign_with(tx: &VersionedTransaction, keypair: &Keypair) -> Result<VersionedTransaction, Error> {
    let mut signed = tx.clone();
    let message_bytes = signed.message.serialize();

    let required = signed.message.header().num_required_signatures as usize;
    let position = signed
        .message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| *key == keypair.pubkey())
        .ok_or_else(|| {
            Error::Wallet(format!("wallet {} is not a required signer", keypair.pubkey()))
        })?;

    if signed.signatures.len() < required {
        signed.signatures.resize_with(required, Signature::default);
    }
    signed.signatures[position] = keypair.sign_message(&message_bytes);

    Ok(signed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::Config;
    use crate::helpers::{decode_transaction, encode_transaction};
    use solana_sdk::{
        message::{Message, VersionedMessage},
        system_instruction,
    };

    fn unsigned_transfer(payer: &Keypair) -> VersionedTransaction {
        let instruction =
            system_instruction::transfer(&payer.pubkey(), &Keypair::new().pubkey(), 42);
        let message = Message::new(&[instruction], Some(&payer.pubkey()));
        VersionedTransaction {
            signatures: vec![Signature::default()],
            message: VersionedMessage::Legacy(message),
        }
    }

    #[tokio::test]
    async fn signing_requires_a_session() {
        let bridge = WalletBridge::new();
        let tx = unsigned_transfer(&Keypair::new());

        let err = bridge.sign_transaction(&tx).await.unwrap_err();
        assert_eq!(err.to_string(), format!("Wallet error: {}", ERR_NOT_CONNECTED));
    }

    #[tokio::test]
    async fn watch_only_wallets_cannot_sign_or_send() {
        let bridge = WalletBridge::new();
        let payer = Keypair::new();
        let tx = unsigned_transfer(&payer);
        bridge
            .connect("watcher", payer, WalletFeatures::watch_only())
            .await;

        let err = bridge.sign_transaction(&tx).await.unwrap_err();
        assert!(err.to_string().contains(ERR_SIGNING_UNSUPPORTED));

        let rpc = Rpc::new(Config::for_tests()).unwrap();
        let err = bridge.sign_and_send(&tx, &rpc).await.unwrap_err();
        assert!(err.to_string().contains(ERR_SENDING_UNSUPPORTED));
    }

    #[tokio::test]
    async fn signed_round_trip_preserves_the_message() {
        let bridge = WalletBridge::new();
        let payer = Keypair::new();
        let payer_pubkey = payer.pubkey();
        let tx = unsigned_transfer(&payer);

        // as the API would deliver it: base58 over the wire
        let wire = encode_transaction(&tx).unwrap();
        let decoded = decode_transaction(&wire).unwrap();

        bridge.connect("test", payer, WalletFeatures::full()).await;
        let signed = bridge.sign_transaction(&decoded).await.unwrap();

        let message_bytes = decoded.message.serialize();
        assert_eq!(signed.message.serialize(), message_bytes);
        assert_eq!(signed.signatures.len(), decoded.signatures.len());
        assert!(signed.signatures[0].verify(payer_pubkey.as_ref(), &message_bytes));

        // re-serializing keeps everything but the signature identical
        let re_encoded = encode_transaction(&signed).unwrap();
        let reparsed = decode_transaction(&re_encoded).unwrap();
        assert_eq!(reparsed.message.serialize(), message_bytes);
        assert_eq!(reparsed.signatures[0], signed.signatures[0]);
    }

    #[tokio::test]
    async fn foreign_fee_payer_is_rejected() {
        let bridge = WalletBridge::new();
        let tx = unsigned_transfer(&Keypair::new());
        bridge
            .connect("test", Keypair::new(), WalletFeatures::full())
            .await;

        let err = bridge.sign_transaction(&tx).await.unwrap_err();
        assert!(err.to_string().contains("not a required signer"));
    }
}
