//! Transaction delivery module for the swap submitter.
//!
//! This module is the RPC-facing seam of the pipeline: it estimates the gas
//! fee bid from current network conditions, reads fresh account state,
//! broadcasts the signed transaction, and polls for the mined receipt.
//! Every failure here is terminal for the run; there are no retries.

use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use swapper_types::{FeeParameters, SignedTransaction, TransactionHash, TransactionReceipt};
use thiserror::Error;

pub mod fees;

/// Re-export implementations
pub mod implementations {
	pub mod evm {
		pub mod alloy;
	}
}

/// Errors that can occur during transaction delivery operations.
#[derive(Debug, Error)]
pub enum DeliveryError {
	/// Error that occurs during network communication.
	#[error("Network error: {0}")]
	Network(String),
	/// Error that occurs when the RPC endpoint cannot be used.
	#[error("Invalid RPC endpoint: {0}")]
	Endpoint(String),
	/// Error that occurs when the transaction is not mined before the deadline.
	#[error("Transaction was not mined within {0} seconds")]
	ReceiptTimeout(u64),
}

/// Trait defining the interface for transaction delivery providers.
///
/// Implemented by the concrete RPC client; the pipeline only sees this
/// interface, which keeps the submission flow testable without a node.
#[async_trait]
pub trait DeliveryInterface: Send + Sync {
	/// Derives a gas fee bid from current network conditions.
	///
	/// Reads the pending block's base fee; falls back to the node's
	/// suggested legacy gas price when the chain reports none.
	async fn estimate_fees(&self) -> Result<FeeParameters, DeliveryError>;

	/// The chain ID reported by the node.
	async fn chain_id(&self) -> Result<u64, DeliveryError>;

	/// The account's transaction count including pending transactions.
	async fn pending_nonce(&self, address: Address) -> Result<u64, DeliveryError>;

	/// The account's native currency balance in wei.
	async fn native_balance(&self, address: Address) -> Result<U256, DeliveryError>;

	/// Broadcasts a signed raw transaction and returns its hash.
	///
	/// Node rejection (nonce too low, insufficient funds) is fatal; the
	/// caller must re-invoke the whole run with refreshed state.
	async fn broadcast(&self, tx: &SignedTransaction) -> Result<TransactionHash, DeliveryError>;

	/// Polls the node until the transaction is mined or the deadline passes.
	///
	/// On timeout the run fails without re-broadcasting. A mined-but-reverted
	/// transaction is returned as a receipt with `success == false`, not as
	/// an error.
	async fn wait_for_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError>;
}
