//! Wallet capability boundary
//!
//! A session never reads ambient key material itself; it asks a
//! [`WalletProvider`] for an authorized account. This keeps "no wallet
//! present" and "authorization refused" as ordinary error outcomes and lets
//! tests inject both without touching the process environment.

use crate::wallet::KeyWallet;
use crate::{Error, Result};
use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use async_trait::async_trait;

/// A granted account: the address plus alloy's signing handle.
pub struct Authorization {
    pub address: Address,
    pub wallet: EthereumWallet,
}

/// Source of a signing identity.
///
/// The counterpart of a browser's injected wallet object: `authorize` is the
/// `eth_requestAccounts` analog and may fail because no wallet exists
/// ([`Error::WalletUnavailable`]) or because access was refused
/// ([`Error::WalletRejected`]).
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Request account access.
    async fn authorize(&self) -> Result<Authorization>;
}

/// Wallet provider backed by a private key in the environment.
pub struct EnvKeyWallet {
    var_name: String,
}

impl EnvKeyWallet {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
        }
    }
}

impl Default for EnvKeyWallet {
    fn default() -> Self {
        Self::new(crate::config::PRIVATE_KEY_ENV)
    }
}

#[async_trait]
impl WalletProvider for EnvKeyWallet {
    async fn authorize(&self) -> Result<Authorization> {
        let wallet = KeyWallet::from_env(&self.var_name)?;
        tracing::debug!(address = %wallet.address(), "Derived signing identity");
        Ok(Authorization {
            address: wallet.address(),
            wallet: wallet.wallet().clone(),
        })
    }
}

/// A provider for environments with no wallet at all. Used in tests and as
/// the explicit "absent" variant of the capability.
pub struct AbsentWallet;

#[async_trait]
impl WalletProvider for AbsentWallet {
    async fn authorize(&self) -> Result<Authorization> {
        Err(Error::WalletUnavailable(
            "no wallet is configured for this environment".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RejectingWallet;

    #[async_trait]
    impl WalletProvider for RejectingWallet {
        async fn authorize(&self) -> Result<Authorization> {
            Err(Error::WalletRejected("user denied account access".into()))
        }
    }

    #[tokio::test]
    async fn test_absent_wallet_reports_unavailable() {
        let result = AbsentWallet.authorize().await;
        assert!(matches!(result, Err(Error::WalletUnavailable(_))));
    }

    #[tokio::test]
    async fn test_rejecting_wallet_reports_rejection() {
        let result = RejectingWallet.authorize().await;
        assert!(matches!(result, Err(Error::WalletRejected(_))));
    }

    #[tokio::test]
    async fn test_env_key_wallet_missing_var() {
        let provider = EnvKeyWallet::new("DAO_CLIENT_TEST_KEY_THAT_IS_NEVER_SET");
        let result = provider.authorize().await;
        assert!(matches!(result, Err(Error::WalletUnavailable(_))));
    }

    #[tokio::test]
    async fn test_env_key_wallet_derives_address() {
        // Well-known anvil test key
        std::env::set_var(
            "DAO_CLIENT_TEST_KEY",
            "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
        );
        let provider = EnvKeyWallet::new("DAO_CLIENT_TEST_KEY");
        let auth = provider.authorize().await.unwrap();
        assert_eq!(
            format!("{:?}", auth.address).to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }
}
