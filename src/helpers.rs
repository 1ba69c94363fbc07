use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use solana_sdk::transaction::VersionedTransaction;

use crate::error::Error;

pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";
pub const NATIVE_SYMBOL: &str = "SOL";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";

pub const NATIVE_DECIMALS: u32 = 9;
pub const DEFAULT_TOKEN_DECIMALS: u32 = 6;

pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

pub fn is_native_token(token: &str) -> bool {
    token == NATIVE_MINT || token.eq_ignore_ascii_case(NATIVE_SYMBOL)
}

/// Decimal count used for base-unit conversion of amounts denominated in
/// `token`. Inherited two-way rule: the native mint is 9, every other
/// token is assumed 6. Not a per-token lookup.
pub fn token_decimals(token: &str) -> u32 {
    if is_native_token(token) {
        NATIVE_DECIMALS
    } else {
        DEFAULT_TOKEN_DECIMALS
    }
}

pub fn pow10(decimals: u32) -> BigDecimal {
    BigDecimal::from(10u64.pow(decimals))
}

/// Converts a user-facing decimal amount into integer on-chain base units.
pub fn to_base_units(amount: f64, decimals: u32) -> Result<u64, Error> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::AmountRange(amount.to_string()));
    }

    let value = BigDecimal::try_from(amount)? * pow10(decimals);
    value
        .with_scale(0)
        .to_u64()
        .ok_or_else(|| Error::AmountRange(amount.to_string()))
}

pub fn from_base_units(raw: &BigDecimal, decimals: u32) -> BigDecimal {
    raw / pow10(decimals)
}

pub fn parse_base_units(raw: &str, decimals: u32) -> Result<BigDecimal, Error> {
    let value = BigDecimal::from_str(raw)?;
    Ok(from_base_units(&value, decimals))
}

/// A well-formed wallet address is base58 text decoding to 32 bytes.
pub fn is_valid_address(address: &str) -> bool {
    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

/// Decodes the base58 transaction string returned by the lender API into
/// a versioned transaction ready for signing.
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction, Error> {
    let bytes = bs58::decode(encoded).into_vec()?;
    let tx = bincode::deserialize::<VersionedTransaction>(&bytes)
        .map_err(|e| Error::TransactionDecode(e.to_string()))?;
    Ok(tx)
}

pub fn encode_transaction(tx: &VersionedTransaction) -> Result<String, Error> {
    let bytes = bincode::serialize(tx)?;
    Ok(bs58::encode(bytes).into_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use solana_sdk::{
        message::{Message, VersionedMessage},
        signature::{Keypair, Signer},
        system_instruction,
    };

    #[test]
    fn native_token_is_nine_decimals_everything_else_six() {
        assert_eq!(token_decimals(NATIVE_MINT), 9);
        assert_eq!(token_decimals("SOL"), 9);
        assert_eq!(token_decimals(USDC_MINT), 6);
        assert_eq!(token_decimals("some-unknown-mint"), 6);
    }

    #[test]
    fn deposit_amount_converts_to_base_units() {
        // 10 on a SOL pool is 10 * 10^9, on a USDC pool 10 * 10^6
        assert_eq!(to_base_units(10.0, token_decimals(NATIVE_MINT)).unwrap(), 10_000_000_000);
        assert_eq!(to_base_units(10.0, token_decimals(USDC_MINT)).unwrap(), 10_000_000);
    }

    #[test]
    fn negative_and_non_finite_amounts_are_rejected() {
        assert!(to_base_units(-1.0, 9).is_err());
        assert!(to_base_units(f64::NAN, 9).is_err());
        assert!(to_base_units(f64::INFINITY, 6).is_err());
    }

    #[test]
    fn base_units_round_trip() {
        let raw = BigDecimal::from(2_500_000u64);
        assert_eq!(from_base_units(&raw, 6), BigDecimal::try_from(2.5).unwrap());
        assert_eq!(
            parse_base_units("2500000", 6).unwrap(),
            BigDecimal::try_from(2.5).unwrap()
        );
    }

    #[test]
    fn address_validation() {
        let keypair = Keypair::new();
        assert!(is_valid_address(&keypair.pubkey().to_string()));
        assert!(!is_valid_address("not-base58-0OIl"));
        // valid base58 but not 32 bytes
        assert!(!is_valid_address("abc"));
    }

    #[test]
    fn transaction_codec_round_trip() {
        let payer = Keypair::new();
        let instruction =
            system_instruction::transfer(&payer.pubkey(), &Keypair::new().pubkey(), 1_000);
        let message = Message::new(&[instruction], Some(&payer.pubkey()));
        let tx = VersionedTransaction {
            signatures: vec![Default::default()],
            message: VersionedMessage::Legacy(message),
        };

        let encoded = encode_transaction(&tx).unwrap();
        let decoded = decode_transaction(&encoded).unwrap();
        assert_eq!(decoded.message.serialize(), tx.message.serialize());
        assert!(decode_transaction("!!not-base58!!").is_err());
    }
}
