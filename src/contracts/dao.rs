//! DAO governance contract
//!
//! Wraps the remote contract's surface: `owner()`, `numProposals()`, the
//! `proposals(uint256)` getter, and the four state-changing calls. Proposal
//! lifecycle and vote tallying live entirely on-chain; this module only
//! encodes arguments and decodes return words.

use crate::contracts::{read_call, write_call};
use crate::views::{ProposalView, Vote};
use crate::{abi, Error, Result};
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{DynProvider, Provider};
use chrono::{DateTime, Utc};

pub struct GovernanceDao {
    provider: DynProvider,
    address: Address,
}

impl GovernanceDao {
    pub fn new(provider: DynProvider, address: Address) -> Self {
        Self { provider, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Native balance held by the contract (the treasury), in wei.
    pub async fn treasury_balance(&self) -> Result<U256> {
        self.provider
            .get_balance(self.address)
            .await
            .map_err(|e| Error::Rpc(e.to_string()))
    }

    /// The contract owner, the only account allowed to withdraw.
    pub async fn owner(&self) -> Result<Address> {
        let data = abi::calldata("owner()");
        let out = read_call(&self.provider, self.address, data).await?;
        abi::word_address(&out, 0)
            .ok_or_else(|| Error::Contract("short return data from owner".to_string()))
    }

    /// Total number of proposals ever created.
    pub async fn num_proposals(&self) -> Result<u64> {
        let data = abi::calldata("numProposals()");
        let out = read_call(&self.provider, self.address, data).await?;
        let count = abi::word_u256(&out, 0)
            .ok_or_else(|| Error::Contract("short return data from numProposals".to_string()))?;
        u64::try_from(count)
            .map_err(|_| Error::Contract(format!("proposal count out of range: {}", count)))
    }

    /// Fetch one proposal by index.
    pub async fn proposal(&self, proposal_id: u64) -> Result<ProposalView> {
        let mut data = abi::calldata("proposals(uint256)");
        abi::push_u256(&mut data, U256::from(proposal_id));

        let out = read_call(&self.provider, self.address, data).await?;
        decode_proposal(proposal_id, &out)
    }

    /// Create a proposal to purchase the given NFT token id.
    pub async fn create_proposal(&self, token_id: U256) -> Result<TxHash> {
        let mut data = abi::calldata("createProposal(uint256)");
        abi::push_u256(&mut data, token_id);
        write_call(&self.provider, self.address, data).await
    }

    /// Cast a vote on an active proposal.
    pub async fn cast_vote(&self, proposal_id: u64, vote: Vote) -> Result<TxHash> {
        let mut data = abi::calldata("voteOnProposal(uint256,uint8)");
        abi::push_u256(&mut data, U256::from(proposal_id));
        abi::push_u256(&mut data, U256::from(vote.choice()));
        write_call(&self.provider, self.address, data).await
    }

    /// Execute a proposal whose deadline has passed.
    pub async fn execute_proposal(&self, proposal_id: u64) -> Result<TxHash> {
        let mut data = abi::calldata("executeProposal(uint256)");
        abi::push_u256(&mut data, U256::from(proposal_id));
        write_call(&self.provider, self.address, data).await
    }

    /// Withdraw the treasury. The contract restricts this to the owner.
    pub async fn withdraw_ether(&self) -> Result<TxHash> {
        let data = abi::calldata("withdrawEther()");
        write_call(&self.provider, self.address, data).await
    }
}

/// Decode the five return words of `proposals(uint256)`:
/// (nftTokenId, deadline, yayVotes, nayVotes, executed).
fn decode_proposal(proposal_id: u64, data: &[u8]) -> Result<ProposalView> {
    let short =
        || Error::Contract(format!("short return data for proposal {}", proposal_id));

    let nft_token_id = abi::word_u256(data, 0).ok_or_else(short)?;
    let deadline_secs = abi::word_u256(data, 1).ok_or_else(short)?;
    let yay_votes = abi::word_u256(data, 2).ok_or_else(short)?;
    let nay_votes = abi::word_u256(data, 3).ok_or_else(short)?;
    let executed = abi::word_bool(data, 4).ok_or_else(short)?;

    let deadline_secs = i64::try_from(deadline_secs).map_err(|_| {
        Error::Contract(format!(
            "proposal {} deadline out of range: {}",
            proposal_id, deadline_secs
        ))
    })?;
    let deadline: DateTime<Utc> = DateTime::from_timestamp(deadline_secs, 0).ok_or_else(|| {
        Error::Contract(format!(
            "proposal {} deadline out of range: {}",
            proposal_id, deadline_secs
        ))
    })?;

    Ok(ProposalView {
        proposal_id,
        nft_token_id: nft_token_id.to_string(),
        deadline,
        yay_votes,
        nay_votes,
        executed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proposal_words(
        token_id: u64,
        deadline: u64,
        yay: u64,
        nay: u64,
        executed: bool,
    ) -> Vec<u8> {
        let mut data = Vec::new();
        abi::push_u256(&mut data, U256::from(token_id));
        abi::push_u256(&mut data, U256::from(deadline));
        abi::push_u256(&mut data, U256::from(yay));
        abi::push_u256(&mut data, U256::from(nay));
        abi::push_u256(&mut data, U256::from(u8::from(executed)));
        data
    }

    #[test]
    fn test_decode_proposal() {
        let data = proposal_words(7, 1_717_243_200, 3, 1, false);
        let view = decode_proposal(2, &data).unwrap();

        assert_eq!(view.proposal_id, 2);
        assert_eq!(view.nft_token_id, "7");
        assert_eq!(view.deadline.timestamp(), 1_717_243_200);
        assert_eq!(view.yay_votes, U256::from(3u64));
        assert_eq!(view.nay_votes, U256::from(1u64));
        assert!(!view.executed);
    }

    #[test]
    fn test_decode_proposal_executed_flag() {
        let data = proposal_words(0, 1_717_243_200, 0, 0, true);
        let view = decode_proposal(0, &data).unwrap();
        assert!(view.executed);
    }

    #[test]
    fn test_decode_proposal_short_data() {
        // Only four words present
        let data = proposal_words(7, 1_717_243_200, 3, 1, false);
        let result = decode_proposal(0, &data[..128]);
        assert!(matches!(result, Err(Error::Contract(_))));
    }

    #[test]
    fn test_decode_proposal_rejects_absurd_deadline() {
        let mut data = Vec::new();
        abi::push_u256(&mut data, U256::from(1u64));
        abi::push_u256(&mut data, U256::MAX); // deadline far beyond i64 range
        abi::push_u256(&mut data, U256::ZERO);
        abi::push_u256(&mut data, U256::ZERO);
        abi::push_u256(&mut data, U256::ZERO);

        assert!(decode_proposal(0, &data).is_err());
    }
}
