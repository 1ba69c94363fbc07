use std::{
    env::VarError,
    io::Error as IO_ERROR,
    num::{ParseIntError, TryFromIntError as TRY_FROM_INT_ERROR},
    str::ParseBoolError as PARSE_BOOL_ERROR,
    string::FromUtf8Error as FROM_UTF8_ERROR,
};

use actix_web::ResponseError;
use anyhow::Error as ANYHOW_ERROR;
use base64::DecodeError as BASE64_DECODE_ERROR;
use bigdecimal::ParseBigDecimalError as BIG_DECIMAL_ERROR;
use bincode::Error as BINCODE_ERROR;
use bs58::decode::Error as BS58_DECODE_ERROR;
use reqwest::Error as REQWEST_ERROR;
use serde_json::Error as JSON_ERROR;
use thiserror::Error;
use tokio::{task::JoinError, time::error::Elapsed};
use tracing::subscriber::SetGlobalDefaultError as TRACING_GLOBAL_DEFAULT_ERROR;
use url::ParseError as URL_ERROR;

use crate::provider::ApiError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Io(#[from] IO_ERROR),

    #[error("{0}")]
    URL(#[from] URL_ERROR),

    #[error("{0}")]
    INT(#[from] ParseIntError),

    #[error("{0}")]
    VAR(#[from] VarError),

    #[error("{0}")]
    TokioJoinError(#[from] JoinError),

    #[error("{0}")]
    TokioElapsedError(#[from] Elapsed),

    #[error("{0}")]
    Base64DecodeError(#[from] BASE64_DECODE_ERROR),

    #[error("{0}")]
    Bs58DecodeError(#[from] BS58_DECODE_ERROR),

    #[error("{0}")]
    BincodeError(#[from] BINCODE_ERROR),

    #[error("{0}")]
    BigDecimalError(#[from] BIG_DECIMAL_ERROR),

    #[error("{0}")]
    JsonError(#[from] JSON_ERROR),

    #[error("{0}")]
    ReqwestError(#[from] REQWEST_ERROR),

    #[error("{0}")]
    ParseBoolError(#[from] PARSE_BOOL_ERROR),

    #[error("{0}")]
    FromUtf8Error(#[from] FROM_UTF8_ERROR),

    #[error("{0}")]
    TryFromIntError(#[from] TRY_FROM_INT_ERROR),

    #[error("Tracing error: {0}")]
    SetGlobalDefaultError(#[from] TRACING_GLOBAL_DEFAULT_ERROR),

    #[error("{0}")]
    AnyHowError(#[from] ANYHOW_ERROR),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("{0}")]
    Api(#[from] ApiError),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Transaction decode error: {0}")]
    TransactionDecode(String),

    #[error("Rpc error: {0}")]
    Rpc(String),

    #[error("Amount out of range: {0}")]
    AmountRange(String),

    #[error("Server end with error: {0}")]
    ServerError(String),

    #[error("Task message error: {0}")]
    TaskError(String),
}

impl ResponseError for Error {}
