//! Wallet/contract session manager
//!
//! A [`DaoSession`] exists only after a successful wallet authorization and
//! provider hookup; there is no half-connected state to defend against. All
//! view-state flows out as immutable [`DaoSnapshot`] values, re-fetched after
//! every successful mutation, and mutations serialize through an exclusion
//! token so a second write cannot start while one is outstanding.

use crate::config::{Config, RpcConfig};
use crate::contracts::{GovernanceDao, MembershipToken};
use crate::views::{ProposalView, TreasuryView, Vote};
use crate::wallet::WalletProvider;
use crate::{abi, Error, Result};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use serde::Serialize;
use tokio::sync::{Mutex, MutexGuard};

/// Immutable view of everything the client displays.
///
/// Numeric fields are the remote contract's values verbatim; nothing is
/// tallied locally.
#[derive(Debug, Clone, Serialize)]
pub struct DaoSnapshot {
    pub account: Address,
    pub nft_balance: U256,
    pub treasury: TreasuryView,
    pub proposals: Vec<ProposalView>,
}

impl DaoSnapshot {
    /// Whether the connected account may withdraw the treasury.
    ///
    /// Display optimization only; the real gate is enforced on-chain.
    pub fn can_withdraw(&self) -> bool {
        self.treasury.is_owner(self.account)
    }
}

/// An established wallet/contract session.
pub struct DaoSession {
    account: Address,
    dao: GovernanceDao,
    nft: MembershipToken,
    /// Exclusion token for mutating calls. `try_lock` failing is the
    /// "pending" state; a second submission cannot race a boolean flag.
    tx_token: Mutex<()>,
}

impl DaoSession {
    /// Establish a session: authorize an account with the wallet capability,
    /// connect the RPC provider, and bind the two contract endpoints.
    ///
    /// Failure (wallet absent, authorization refused, no RPC for the chain)
    /// is reported once and not retried; no session exists afterwards.
    pub async fn connect(
        wallet: &dyn WalletProvider,
        rpc: &RpcConfig,
        config: &Config,
    ) -> Result<Self> {
        let auth = wallet.authorize().await?;

        let chain_id = config.network.chain_id();
        let rpc_url = rpc.get(chain_id).ok_or_else(|| {
            Error::Config(format!("No RPC URL configured for chain {}", chain_id))
        })?;
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| Error::Config(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;

        let provider = ProviderBuilder::new()
            .wallet(auth.wallet)
            .connect_http(url)
            .erased();

        tracing::info!(
            account = %auth.address,
            network = config.network.name(),
            dao = %config.contracts.dao,
            nft = %config.contracts.nft,
            "Wallet connected"
        );

        Ok(Self {
            account: auth.address,
            dao: GovernanceDao::new(provider.clone(), config.contracts.dao),
            nft: MembershipToken::new(provider, config.contracts.nft),
            tx_token: Mutex::new(()),
        })
    }

    /// The connected account address.
    pub fn account(&self) -> Address {
        self.account
    }

    /// Membership NFT count for the connected account.
    pub async fn nft_balance(&self) -> Result<U256> {
        self.nft.balance_of(self.account).await
    }

    /// Treasury balance (ether decimal string) and contract owner.
    pub async fn treasury(&self) -> Result<TreasuryView> {
        let balance = self.dao.treasury_balance().await?;
        let owner = self.dao.owner().await?;
        Ok(TreasuryView {
            balance: abi::format_ether(balance),
            owner,
        })
    }

    /// Fetch every proposal, in index order.
    ///
    /// One round-trip for the count plus one per proposal; fine while the
    /// proposal count stays small, which is the contract's expected regime.
    pub async fn proposals(&self) -> Result<Vec<ProposalView>> {
        let count = self.dao.num_proposals().await?;
        let mut proposals = Vec::with_capacity(count as usize);
        for id in 0..count {
            proposals.push(self.dao.proposal(id).await?);
        }
        Ok(proposals)
    }

    /// Re-read the full view-state.
    pub async fn snapshot(&self) -> Result<DaoSnapshot> {
        Ok(DaoSnapshot {
            account: self.account,
            nft_balance: self.nft_balance().await?,
            treasury: self.treasury().await?,
            proposals: self.proposals().await?,
        })
    }

    /// Create a proposal for the given NFT token id.
    ///
    /// The token id is validated locally before any remote call; membership
    /// (at least one NFT) is checked before the write is issued.
    pub async fn submit_proposal(&self, token_id: &str) -> Result<DaoSnapshot> {
        let token_id = parse_token_id(token_id)?;
        let _pending = self.begin_mutation()?;

        let membership = self.nft_balance().await?;
        if membership.is_zero() {
            return Err(Error::Membership(
                "creating a proposal requires holding at least one membership NFT".to_string(),
            ));
        }

        let tx_hash = self.dao.create_proposal(token_id).await?;
        tracing::info!(%tx_hash, %token_id, "Proposal created");

        self.snapshot().await
    }

    /// Vote YAY or NAY on a proposal.
    pub async fn cast_vote(&self, proposal_id: u64, vote: Vote) -> Result<DaoSnapshot> {
        let _pending = self.begin_mutation()?;

        let tx_hash = self.dao.cast_vote(proposal_id, vote).await?;
        tracing::info!(%tx_hash, proposal_id, %vote, "Vote cast");

        self.snapshot().await
    }

    /// Execute a proposal. Deadline and authorization checks are the
    /// contract's job; nothing is pre-validated here.
    pub async fn execute_proposal(&self, proposal_id: u64) -> Result<DaoSnapshot> {
        let _pending = self.begin_mutation()?;

        let tx_hash = self.dao.execute_proposal(proposal_id).await?;
        tracing::info!(%tx_hash, proposal_id, "Proposal executed");

        self.snapshot().await
    }

    /// Withdraw the treasury to the owner account.
    ///
    /// The contract enforces the owner restriction; callers that are not the
    /// owner get the revert back verbatim.
    pub async fn withdraw_treasury(&self) -> Result<(TxHash, TreasuryView)> {
        let _pending = self.begin_mutation()?;

        let tx_hash = self.dao.withdraw_ether().await?;
        tracing::info!(%tx_hash, "Treasury withdrawn");

        let treasury = self.treasury().await?;
        Ok((tx_hash, treasury))
    }

    fn begin_mutation(&self) -> Result<MutexGuard<'_, ()>> {
        self.tx_token.try_lock().map_err(|_| Error::OperationPending)
    }
}

/// Validate a proposal token id: non-empty decimal digits only.
///
/// This is the only client-side input validation; everything else surfaces
/// as a remote rejection.
fn parse_token_id(raw: &str) -> Result<U256> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidArgument(
            "token id must not be empty".to_string(),
        ));
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidArgument(format!(
            "token id must be a non-negative integer, got {:?}",
            raw
        )));
    }
    U256::from_str_radix(trimmed, 10)
        .map_err(|e| Error::InvalidArgument(format!("token id out of range: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ContractsConfig, Network};
    use crate::wallet::AbsentWallet;
    use alloy::providers::DynProvider;
    use std::collections::HashMap;

    fn offline_session() -> DaoSession {
        // Provider construction performs no I/O; nothing here may be awaited.
        let url: url::Url = "http://127.0.0.1:1".parse().unwrap();
        let provider: DynProvider = ProviderBuilder::new().connect_http(url).erased();
        let account: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap();
        DaoSession {
            account,
            dao: GovernanceDao::new(provider.clone(), Address::ZERO),
            nft: MembershipToken::new(provider, Address::ZERO),
            tx_token: Mutex::new(()),
        }
    }

    #[test]
    fn test_parse_token_id_accepts_decimal() {
        assert_eq!(parse_token_id("0").unwrap(), U256::ZERO);
        assert_eq!(parse_token_id("42").unwrap(), U256::from(42u64));
        assert_eq!(parse_token_id(" 7 ").unwrap(), U256::from(7u64));
    }

    #[test]
    fn test_parse_token_id_rejects_garbage() {
        assert!(matches!(
            parse_token_id(""),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_token_id("abc"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_token_id("-1"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_token_id("1.5"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            parse_token_id("0x10"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_token_id_never_reaches_the_chain() {
        // The provider points at a closed port; an attempted remote call
        // would error with an RPC failure, not InvalidArgument.
        let session = offline_session();
        let result = session.submit_proposal("not-a-number").await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_second_mutation_is_rejected_while_pending() {
        let session = offline_session();
        let _held = session.tx_token.try_lock().unwrap();

        let result = session.submit_proposal("1").await;
        assert!(matches!(result, Err(Error::OperationPending)));

        let result = session.execute_proposal(0).await;
        assert!(matches!(result, Err(Error::OperationPending)));
    }

    #[tokio::test]
    async fn test_connect_with_absent_wallet_fails_cleanly() {
        let config = Config {
            network: Network::Localhost,
            contracts: ContractsConfig {
                dao: Address::ZERO,
                nft: Address::ZERO,
            },
        };
        let rpc = RpcConfig::with_urls(HashMap::from([(
            Network::Localhost.chain_id(),
            "http://127.0.0.1:8545".to_string(),
        )]));

        let result = DaoSession::connect(&AbsentWallet, &rpc, &config).await;
        assert!(matches!(result, Err(Error::WalletUnavailable(_))));
    }

    #[test]
    fn test_snapshot_owner_gate() {
        let account: Address = "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266".parse().unwrap();
        let other: Address = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8".parse().unwrap();

        let snapshot = DaoSnapshot {
            account,
            nft_balance: U256::from(1u64),
            treasury: TreasuryView {
                balance: "0".to_string(),
                owner: account,
            },
            proposals: Vec::new(),
        };
        assert!(snapshot.can_withdraw());

        let snapshot = DaoSnapshot {
            treasury: TreasuryView {
                balance: "0".to_string(),
                owner: other,
            },
            ..snapshot
        };
        assert!(!snapshot.can_withdraw());
    }
}
