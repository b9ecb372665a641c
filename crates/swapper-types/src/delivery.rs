//! Transaction submission types for blockchain interactions.
//!
//! This module defines the transaction shape assembled by the pipeline and
//! the hash and receipt types returned by the network.

use crate::fees::FeeParameters;
use alloy_primitives::{Address, Bytes, U256};

/// Blockchain transaction hash as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionHash(pub Vec<u8>);

/// A fully signed transaction, RLP-encoded and ready to broadcast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedTransaction(pub Vec<u8>);

/// Unsigned transaction produced by the assembler.
///
/// Built once from the encoded payload, fee parameters, and freshly fetched
/// account state; never mutated after signing.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transaction {
	/// Sender account address.
	pub from: Address,
	/// Recipient contract address (the router).
	pub to: Address,
	/// Opaque encoded call payload.
	pub data: Bytes,
	/// Native currency attached to the call, in wei.
	pub value: U256,
	/// Static gas limit ceiling; never computed from simulation.
	pub gas_limit: u64,
	/// The account's pending transaction count at assembly time.
	pub nonce: u64,
	/// Chain the transaction is valid on.
	pub chain_id: u64,
	/// Gas fee bid.
	pub fees: FeeParameters,
}

/// Transaction receipt containing execution details.
///
/// Read-only result of a mined transaction; a `success` of false means the
/// transaction was mined but reverted on chain.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TransactionReceipt {
	/// The hash of the transaction.
	pub hash: TransactionHash,
	/// The block number where the transaction was included.
	pub block_number: u64,
	/// Whether the transaction executed successfully.
	pub success: bool,
}
