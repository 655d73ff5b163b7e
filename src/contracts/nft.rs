//! Membership NFT contract
//!
//! DAO membership is "holds at least one token"; the only call this client
//! needs is the ERC-721 `balanceOf`.

use crate::contracts::read_call;
use crate::{abi, Error, Result};
use alloy::primitives::{Address, U256};
use alloy::providers::DynProvider;

pub struct MembershipToken {
    provider: DynProvider,
    address: Address,
}

impl MembershipToken {
    pub fn new(provider: DynProvider, address: Address) -> Self {
        Self { provider, address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Number of membership NFTs held by `account`.
    pub async fn balance_of(&self, account: Address) -> Result<U256> {
        let mut data = abi::calldata("balanceOf(address)");
        abi::push_address(&mut data, account);

        let out = read_call(&self.provider, self.address, data).await?;
        abi::word_u256(&out, 0)
            .ok_or_else(|| Error::Contract("short return data from balanceOf".to_string()))
    }
}
