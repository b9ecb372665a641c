//! Alloy-based EVM delivery implementation.
//!
//! Talks to a single HTTP JSON-RPC node through an Alloy provider. The
//! provider only reads chain state and broadcasts raw bytes; signing happens
//! upstream in the account crate.

use crate::fees::FeeSettings;
use crate::{DeliveryError, DeliveryInterface};
use alloy_primitives::{Address, FixedBytes, U256};
use alloy_provider::{DynProvider, Provider, ProviderBuilder};
use alloy_rpc_types::BlockNumberOrTag;
use async_trait::async_trait;
use std::time::Duration;
use swapper_types::{
	truncate_id, with_0x_prefix, FeeParameters, SignedTransaction, TransactionHash,
	TransactionReceipt,
};

/// Delivery implementation backed by an Alloy HTTP provider.
pub struct AlloyDelivery {
	/// Type-erased provider for the configured endpoint.
	provider: DynProvider,
	/// Configured fee bid inputs.
	fees: FeeSettings,
	/// Seconds between receipt polls.
	poll_interval: Duration,
	/// Deadline for the receipt poll loop.
	receipt_timeout: Duration,
}

impl AlloyDelivery {
	/// Creates a delivery instance for the given HTTP endpoint.
	pub fn new(
		rpc_url: &str,
		fees: FeeSettings,
		poll_interval: Duration,
		receipt_timeout: Duration,
	) -> Result<Self, DeliveryError> {
		let url = rpc_url
			.parse()
			.map_err(|e| DeliveryError::Endpoint(format!("Invalid RPC URL {}: {}", rpc_url, e)))?;
		let provider = ProviderBuilder::new().connect_http(url).erased();

		Ok(Self {
			provider,
			fees,
			poll_interval,
			receipt_timeout,
		})
	}
}

#[async_trait]
impl DeliveryInterface for AlloyDelivery {
	async fn estimate_fees(&self) -> Result<FeeParameters, DeliveryError> {
		let pending = self
			.provider
			.get_block_by_number(BlockNumberOrTag::Pending)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get pending block: {}", e)))?;

		let base_fee = pending
			.and_then(|block| block.header.base_fee_per_gas)
			.map(u128::from)
			.unwrap_or(0);

		if base_fee == 0 {
			// Chain without a fee market; bid the node's suggested price.
			let gas_price = self
				.provider
				.get_gas_price()
				.await
				.map_err(|e| DeliveryError::Network(format!("Failed to get gas price: {}", e)))?;
			tracing::warn!(
				gas_price,
				"Pending block reports no base fee, falling back to legacy gas price"
			);
			return Ok(FeeParameters::Legacy { gas_price });
		}

		Ok(self.fees.params_for_base_fee(base_fee))
	}

	async fn chain_id(&self) -> Result<u64, DeliveryError> {
		self.provider
			.get_chain_id()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get chain ID: {}", e)))
	}

	async fn pending_nonce(&self, address: Address) -> Result<u64, DeliveryError> {
		self.provider
			.get_transaction_count(address)
			.pending()
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get nonce: {}", e)))
	}

	async fn native_balance(&self, address: Address) -> Result<U256, DeliveryError> {
		self.provider
			.get_balance(address)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to get balance: {}", e)))
	}

	async fn broadcast(&self, tx: &SignedTransaction) -> Result<TransactionHash, DeliveryError> {
		let pending = self
			.provider
			.send_raw_transaction(&tx.0)
			.await
			.map_err(|e| DeliveryError::Network(format!("Failed to send transaction: {}", e)))?;

		let tx_hash = *pending.tx_hash();
		tracing::info!(
			tx_hash = %with_0x_prefix(&hex::encode(tx_hash.0)),
			"Submitted transaction"
		);

		Ok(TransactionHash(tx_hash.0.to_vec()))
	}

	async fn wait_for_receipt(
		&self,
		hash: &TransactionHash,
	) -> Result<TransactionReceipt, DeliveryError> {
		let tx_hash = FixedBytes::<32>::from_slice(&hash.0);
		let start_time = tokio::time::Instant::now();

		tracing::info!(
			tx_hash = %truncate_id(&hex::encode(&hash.0)),
			timeout_secs = self.receipt_timeout.as_secs(),
			"Waiting for transaction to be mined"
		);

		loop {
			let receipt = self
				.provider
				.get_transaction_receipt(tx_hash)
				.await
				.map_err(|e| DeliveryError::Network(format!("Failed to get receipt: {}", e)))?;

			if let Some(receipt) = receipt {
				return Ok(TransactionReceipt {
					hash: TransactionHash(receipt.transaction_hash.0.to_vec()),
					block_number: receipt.block_number.unwrap_or(0),
					success: receipt.status(),
				});
			}

			if start_time.elapsed() >= self.receipt_timeout {
				return Err(DeliveryError::ReceiptTimeout(self.receipt_timeout.as_secs()));
			}

			tracing::debug!("Transaction not yet mined, polling again");
			tokio::time::sleep(self.poll_interval).await;
		}
	}
}
