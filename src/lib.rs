//! DAO governance client
//!
//! A command-line client for an NFT-gated DAO. Two pre-deployed contracts do
//! all the real work: a membership NFT, and a governance contract holding
//! proposals, votes, and the treasury. This crate manages the wallet/contract
//! session around them:
//! - derives a signing identity through a wallet capability boundary
//! - reads balances, ownership, and the proposal list over JSON-RPC
//! - submits proposals, casts votes, executes proposals, and withdraws the
//!   treasury, waiting for one confirmation per write
//! - refreshes its immutable view-state snapshot after every mutation

pub mod abi;
pub mod config;
pub mod contracts;
pub mod session;
pub mod views;
pub mod wallet;

mod error;

// Re-export commonly used types
pub use config::{Config, Network, RpcConfig};
pub use error::{Error, Result};
pub use session::{DaoSession, DaoSnapshot};
pub use views::{ProposalPhase, ProposalView, TreasuryView, Vote};
