//! Local private-key account implementation.
//!
//! Signs transactions in-process with a key held in memory. The key arrives
//! as a `SecretString` from configuration and is parsed exactly once.

use crate::{AccountError, AccountInterface};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::{EthereumWallet, TransactionBuilder};
use alloy_primitives::Address;
use alloy_rpc_types::TransactionRequest;
use alloy_signer_local::PrivateKeySigner;
use async_trait::async_trait;
use swapper_types::{FeeParameters, SecretString, SignedTransaction, Transaction};

/// Account implementation backed by a local private key.
pub struct LocalAccount {
	/// Parsed signing key.
	signer: PrivateKeySigner,
}

impl LocalAccount {
	/// Creates a local account from the configured private key.
	///
	/// Fails with `AccountError::InvalidKey` when the key is not a valid
	/// 32-byte hex string.
	pub fn new(private_key: &SecretString) -> Result<Self, AccountError> {
		let signer: PrivateKeySigner = private_key.with_exposed(|key| {
			key.parse()
				.map_err(|_| AccountError::InvalidKey("Invalid private key format".to_string()))
		})?;
		Ok(Self { signer })
	}
}

/// Maps an assembled transaction onto an RPC transaction request.
///
/// The fee shape decides whether the request carries EIP-1559 caps or a
/// single legacy gas price; the two are never set together.
fn to_request(tx: &Transaction) -> TransactionRequest {
	let request = TransactionRequest::default()
		.with_from(tx.from)
		.with_to(tx.to)
		.with_input(tx.data.clone())
		.with_value(tx.value)
		.with_nonce(tx.nonce)
		.with_gas_limit(tx.gas_limit)
		.with_chain_id(tx.chain_id);

	match tx.fees {
		FeeParameters::Eip1559 {
			max_fee_per_gas,
			max_priority_fee_per_gas,
		} => request
			.with_max_fee_per_gas(max_fee_per_gas)
			.with_max_priority_fee_per_gas(max_priority_fee_per_gas),
		FeeParameters::Legacy { gas_price } => request.with_gas_price(gas_price),
	}
}

#[async_trait]
impl AccountInterface for LocalAccount {
	fn address(&self) -> Address {
		self.signer.address()
	}

	async fn sign_transaction(&self, tx: &Transaction) -> Result<SignedTransaction, AccountError> {
		let wallet = EthereumWallet::from(self.signer.clone());
		let request = to_request(tx);

		let envelope = request
			.build(&wallet)
			.await
			.map_err(|e| AccountError::SigningFailed(e.to_string()))?;

		Ok(SignedTransaction(envelope.encoded_2718()))
	}
}
