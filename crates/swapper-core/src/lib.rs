//! Core pipeline for the universal-router swap submitter.
//!
//! One run executes four stages in order, each exactly once: estimate the
//! gas fee bid, encode the wrap-then-swap command payload, assemble and sign
//! one transaction, then broadcast it and wait for the mined receipt. There
//! is no branching besides error paths and no retry at any stage.

use alloy_primitives::U256;
use std::time::Duration;
use swapper_account::implementations::local::LocalAccount;
use swapper_account::{AccountError, AccountService};
use swapper_config::Config;
use swapper_delivery::fees::FeeSettings;
use swapper_delivery::implementations::evm::alloy::AlloyDelivery;
use swapper_delivery::{DeliveryError, DeliveryInterface};
use swapper_router::RouterError;
use swapper_types::{with_0x_prefix, TransactionReceipt};
use thiserror::Error;

pub mod assembler;

pub use assembler::{assemble_transaction, build_swap_sequence, deadline_after};

/// Errors that can occur during a swap run.
///
/// Every variant is terminal: the run aborts and must be re-invoked by the
/// caller with refreshed state.
#[derive(Debug, Error)]
pub enum SwapperError {
	/// Error from the signing account.
	#[error("Account error: {0}")]
	Account(#[from] AccountError),
	/// Error while building or encoding the command payload.
	#[error("Router error: {0}")]
	Router(#[from] RouterError),
	/// Error from the RPC-facing delivery layer.
	#[error("Delivery error: {0}")]
	Delivery(#[from] DeliveryError),
	/// Error merging the pipeline outputs into a transaction.
	#[error("Assembly error: {0}")]
	Assembly(String),
	/// The sender cannot cover the attached value plus the gas ceiling.
	#[error("Insufficient funds: {0}")]
	InsufficientFunds(String),
}

/// One-shot engine wiring the pipeline stages together.
pub struct SwapEngine {
	config: Config,
	account: AccountService,
	delivery: Box<dyn DeliveryInterface>,
}

impl SwapEngine {
	/// Creates an engine with explicit account and delivery implementations.
	pub fn new(config: Config, account: AccountService, delivery: Box<dyn DeliveryInterface>) -> Self {
		Self {
			config,
			account,
			delivery,
		}
	}

	/// Builds the engine from validated configuration, wiring the local
	/// signer and the HTTP delivery provider.
	pub fn from_config(config: Config) -> Result<Self, SwapperError> {
		let account = AccountService::new(Box::new(LocalAccount::new(&config.account.private_key)?));
		let fees = FeeSettings::from_bid(config.gas.priority_fee_gwei, config.gas.base_fee_multiplier);
		let delivery = AlloyDelivery::new(
			&config.network.rpc_url,
			fees,
			Duration::from_secs(config.submission.poll_interval_secs),
			Duration::from_secs(config.submission.timeout_secs),
		)?;
		Ok(Self::new(config, account, Box::new(delivery)))
	}

	/// Runs the pipeline once and returns the mined receipt.
	///
	/// A receipt with `success == false` means the transaction was mined but
	/// reverted on chain; that is reported as a normal outcome, not an error.
	pub async fn run(&self) -> Result<TransactionReceipt, SwapperError> {
		let sender = self.account.address();
		tracing::info!(
			swapper = %self.config.swapper.id,
			sender = %sender,
			"Starting swap run"
		);

		// Stage 1: fee estimation from current network conditions.
		let fees = self.delivery.estimate_fees().await?;
		tracing::info!(?fees, "Estimated gas fee bid");

		// Stage 2: command assembly and encoding.
		let sequence = build_swap_sequence(&self.config.swap)?;
		let deadline = deadline_after(self.config.swap.deadline_offset_secs);
		let payload = sequence.encode(deadline)?;
		tracing::info!(
			payload = %with_0x_prefix(&hex::encode(&payload)),
			deadline,
			"Encoded swap payload"
		);

		// Stage 3: transaction assembly from freshly fetched account state.
		let chain_id = self.delivery.chain_id().await?;
		let nonce = self.delivery.pending_nonce(sender).await?;
		let tx = assemble_transaction(
			sender,
			self.config.swap.router,
			payload,
			self.config.swap.amount_in,
			sequence.wrapped_value(),
			self.config.gas.gas_limit,
			nonce,
			chain_id,
			fees,
		)?;
		tracing::info!(chain_id, nonce, "Assembled transaction");

		// The worst case the node may charge: attached value plus the full
		// gas ceiling at the bid price.
		let balance = self.delivery.native_balance(sender).await?;
		let required = tx.value + U256::from(tx.gas_limit) * U256::from(tx.fees.price_ceiling());
		if balance < required {
			return Err(SwapperError::InsufficientFunds(format!(
				"balance {} wei is below the required {} wei",
				balance, required
			)));
		}

		// Stage 4: sign, broadcast, and wait for the mined receipt.
		let signed = self.account.sign(&tx).await?;
		let hash = self.delivery.broadcast(&signed).await?;
		let receipt = self.delivery.wait_for_receipt(&hash).await?;

		if receipt.success {
			tracing::info!(block = receipt.block_number, "Swap executed successfully");
		} else {
			tracing::warn!(block = receipt.block_number, "Swap transaction reverted on chain");
		}

		Ok(receipt)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::Address;
	use async_trait::async_trait;
	use std::sync::atomic::{AtomicUsize, Ordering};
	use std::sync::Arc;
	use swapper_types::{FeeParameters, SignedTransaction, TransactionHash};

	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	/// What the mock node does once the transaction is broadcast.
	#[derive(Clone, Copy)]
	enum MinedOutcome {
		Mined { success: bool },
		NeverMined,
	}

	struct MockDelivery {
		balance: U256,
		outcome: MinedOutcome,
		broadcasts: Arc<AtomicUsize>,
	}

	#[async_trait]
	impl DeliveryInterface for MockDelivery {
		async fn estimate_fees(&self) -> Result<FeeParameters, DeliveryError> {
			Ok(FeeParameters::Eip1559 {
				max_fee_per_gas: 2_200_000_000,
				max_priority_fee_per_gas: 1_000_000_000,
			})
		}

		async fn chain_id(&self) -> Result<u64, DeliveryError> {
			Ok(11155111)
		}

		async fn pending_nonce(&self, _address: Address) -> Result<u64, DeliveryError> {
			Ok(3)
		}

		async fn native_balance(&self, _address: Address) -> Result<U256, DeliveryError> {
			Ok(self.balance)
		}

		async fn broadcast(
			&self,
			_tx: &SignedTransaction,
		) -> Result<TransactionHash, DeliveryError> {
			self.broadcasts.fetch_add(1, Ordering::SeqCst);
			Ok(TransactionHash(vec![0xab; 32]))
		}

		async fn wait_for_receipt(
			&self,
			hash: &TransactionHash,
		) -> Result<TransactionReceipt, DeliveryError> {
			match self.outcome {
				MinedOutcome::Mined { success } => Ok(TransactionReceipt {
					hash: hash.clone(),
					block_number: 123,
					success,
				}),
				MinedOutcome::NeverMined => Err(DeliveryError::ReceiptTimeout(300)),
			}
		}
	}

	fn test_config() -> Config {
		format!(
			r#"
[swapper]
id = "test-swapper"

[account]
private_key = "{TEST_KEY}"

[network]
rpc_url = "http://localhost:8545"

[swap]
router = "0x3fC91A3afd70395Cd496C647d5a6CC9D4B2b7FAD"
wrapped_native = "0xfFf9976782d46CC05630D1f6eBAb18b2324d6B14"
token_out = "0xaA8E23Fb1079EA71e0a56F48a2aA51851D8433D0"
fee_tier = 3000
amount_in = "10000000000000"

[gas]
gas_limit = 500000
"#
		)
		.parse()
		.unwrap()
	}

	fn test_engine(balance: U256, outcome: MinedOutcome) -> (SwapEngine, Arc<AtomicUsize>) {
		let broadcasts = Arc::new(AtomicUsize::new(0));
		let delivery = MockDelivery {
			balance,
			outcome,
			broadcasts: Arc::clone(&broadcasts),
		};
		let config = test_config();
		let account = AccountService::new(Box::new(
			LocalAccount::new(&config.account.private_key).unwrap(),
		));
		(SwapEngine::new(config, account, Box::new(delivery)), broadcasts)
	}

	// Plenty for value + gas ceiling at the mocked bid.
	fn funded() -> U256 {
		U256::from(10u128).pow(U256::from(18))
	}

	#[tokio::test]
	async fn test_run_returns_successful_receipt() {
		let (engine, broadcasts) = test_engine(funded(), MinedOutcome::Mined { success: true });
		let receipt = engine.run().await.unwrap();
		assert!(receipt.success);
		assert_eq!(receipt.block_number, 123);
		assert_eq!(broadcasts.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_reverted_receipt_is_not_an_error() {
		let (engine, _) = test_engine(funded(), MinedOutcome::Mined { success: false });
		let receipt = engine.run().await.unwrap();
		assert!(!receipt.success);
	}

	#[tokio::test]
	async fn test_receipt_timeout_aborts_without_rebroadcast() {
		let (engine, broadcasts) = test_engine(funded(), MinedOutcome::NeverMined);
		let result = engine.run().await;
		assert!(matches!(
			result,
			Err(SwapperError::Delivery(DeliveryError::ReceiptTimeout(_)))
		));
		assert_eq!(broadcasts.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_insufficient_balance_aborts_before_broadcast() {
		let (engine, broadcasts) = test_engine(U256::ZERO, MinedOutcome::Mined { success: true });
		let result = engine.run().await;
		assert!(matches!(result, Err(SwapperError::InsufficientFunds(_))));
		assert_eq!(broadcasts.load(Ordering::SeqCst), 0);
	}
}
