//! Wallet management
//!
//! This module owns the signing identity for the session. The private key
//! never leaves [`KeyWallet`]; the rest of the crate only sees the derived
//! address and alloy's signing handle.

mod provider;
mod signer;

pub use provider::{AbsentWallet, Authorization, EnvKeyWallet, WalletProvider};
pub use signer::KeyWallet;
