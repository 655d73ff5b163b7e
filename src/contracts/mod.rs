//! Typed wrappers over the two remote contracts
//!
//! Both contracts are opaque collaborators: every function here is a remote
//! procedure whose authorization and atomicity are enforced on-chain. Reads
//! go through `eth_call`; writes are signed transactions that block until one
//! confirmation, per the durability assumption the rest of the client makes.

mod dao;
mod nft;

pub use dao::GovernanceDao;
pub use nft::MembershipToken;

use crate::abi::parse_revert_reason;
use crate::{Error, Result};
use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;

/// Issue a read-only `eth_call` and return the raw return data.
pub(crate) async fn read_call(
    provider: &DynProvider,
    to: Address,
    calldata: Vec<u8>,
) -> Result<Bytes> {
    let tx = TransactionRequest::default()
        .to(to)
        .input(Bytes::from(calldata).into());

    provider
        .call(tx)
        .await
        .map_err(|e| Error::Contract(parse_revert_reason(&e.to_string())))
}

/// Sign and submit a state-changing call, then wait for one confirmation.
///
/// Returns the transaction hash once the receipt lands. A receipt with a
/// failed status is reported as a contract error, same as an early revert.
pub(crate) async fn write_call(
    provider: &DynProvider,
    to: Address,
    calldata: Vec<u8>,
) -> Result<TxHash> {
    let tx = TransactionRequest::default()
        .to(to)
        .input(Bytes::from(calldata).into());

    let pending = provider
        .send_transaction(tx)
        .await
        .map_err(|e| Error::Contract(parse_revert_reason(&e.to_string())))?;

    let tx_hash = *pending.tx_hash();
    tracing::debug!(%tx_hash, "Transaction submitted, waiting for confirmation");

    let receipt = pending
        .get_receipt()
        .await
        .map_err(|e| Error::Rpc(e.to_string()))?;

    if !receipt.status() {
        return Err(Error::Contract(format!(
            "transaction {} reverted",
            receipt.transaction_hash
        )));
    }

    Ok(receipt.transaction_hash)
}
