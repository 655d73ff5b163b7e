//! Error types for the DAO governance client

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("No wallet available: {0}")]
    WalletUnavailable(String),

    #[error("Wallet authorization refused: {0}")]
    WalletRejected(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not a DAO member: {0}")]
    Membership(String),

    #[error("Contract call failed: {0}")]
    Contract(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Another transaction is pending for this session")]
    OperationPending,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
