//! Read-only projections of on-chain state
//!
//! Everything here is a snapshot sourced from the remote contracts. Vote
//! tallies and balances are owned by the chain; the local copies are
//! staleness-tolerant and only ever replaced by a re-fetch, never mutated.

use alloy::primitives::{Address, U256};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A ballot choice. Encoded on the wire as 0 (YAY) or 1 (NAY).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Yay,
    Nay,
}

impl Vote {
    /// Wire encoding expected by `voteOnProposal`.
    pub fn choice(&self) -> u8 {
        match self {
            Vote::Yay => 0,
            Vote::Nay => 1,
        }
    }
}

impl FromStr for Vote {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s.to_lowercase().as_str() {
            "yay" | "yes" => Ok(Vote::Yay),
            "nay" | "no" => Ok(Vote::Nay),
            other => Err(Error::InvalidArgument(format!(
                "Unknown vote choice: {} (expected yay or nay)",
                other
            ))),
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Yay => write!(f, "YAY"),
            Vote::Nay => write!(f, "NAY"),
        }
    }
}

/// Lifecycle position of a proposal, derived from its cached fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalPhase {
    /// Deadline in the future, votes still accepted
    Active,
    /// Deadline passed, awaiting one-time execution
    Executable,
    /// Already executed
    Executed,
}

impl fmt::Display for ProposalPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalPhase::Active => write!(f, "active"),
            ProposalPhase::Executable => write!(f, "executable"),
            ProposalPhase::Executed => write!(f, "executed"),
        }
    }
}

/// One proposal as read from the governance contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalView {
    /// Index in the contract's proposal mapping
    pub proposal_id: u64,
    /// NFT token id the proposal wants to purchase
    pub nft_token_id: String,
    /// Voting deadline
    pub deadline: DateTime<Utc>,
    pub yay_votes: U256,
    pub nay_votes: U256,
    pub executed: bool,
}

impl ProposalView {
    /// Classify the proposal relative to `now`.
    ///
    /// The chain's own clock is authoritative for execution; this is a
    /// display classification over the cached snapshot.
    pub fn phase(&self, now: DateTime<Utc>) -> ProposalPhase {
        if self.executed {
            ProposalPhase::Executed
        } else if self.deadline > now {
            ProposalPhase::Active
        } else {
            ProposalPhase::Executable
        }
    }

    /// The choice currently ahead in the tally.
    pub fn leading(&self) -> Vote {
        if self.yay_votes > self.nay_votes {
            Vote::Yay
        } else {
            Vote::Nay
        }
    }
}

/// Treasury state of the DAO contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreasuryView {
    /// Native balance in ether units, as a decimal string
    pub balance: String,
    /// Contract owner, the only account allowed to withdraw
    pub owner: Address,
}

impl TreasuryView {
    /// Whether `account` is the owner.
    ///
    /// The original UI compared address strings case-insensitively; parsing
    /// both sides into [`Address`] makes the comparison canonical.
    pub fn is_owner(&self, account: Address) -> bool {
        self.owner == account
    }
}
