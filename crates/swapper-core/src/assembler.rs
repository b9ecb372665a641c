//! Command-sequence construction and transaction assembly.
//!
//! The pipeline's middle stages: turn the configured swap into an ordered
//! command sequence, then merge the encoded payload, fee bid, and freshly
//! fetched account state into one unsigned transaction.

use crate::SwapperError;
use alloy_primitives::{Address, Bytes, U256};
use std::time::{SystemTime, UNIX_EPOCH};
use swapper_config::SwapConfig;
use swapper_router::{CommandSequence, RouterError};
use swapper_types::{FeeParameters, Recipient, RouterCommand, Transaction};

/// Unix timestamp `offset_secs` from now, used as the payload expiry.
pub fn deadline_after(offset_secs: u64) -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.unwrap_or_default()
		.as_secs()
		+ offset_secs
}

/// Builds the two-step wrap-then-swap command sequence for a configured swap.
///
/// The wrap step leaves the wrapped tokens with the router, and the swap
/// step spends that router balance (`payer_is_sender = false`), sending the
/// bought tokens back to the original sender.
pub fn build_swap_sequence(swap: &SwapConfig) -> Result<CommandSequence, RouterError> {
	let mut sequence = CommandSequence::new();
	sequence.push(RouterCommand::WrapNative {
		recipient: Recipient::Router,
		amount: swap.amount_in,
	})?;
	sequence.push(RouterCommand::V3SwapExactIn {
		recipient: Recipient::Sender,
		amount_in: swap.amount_in,
		min_amount_out: swap.min_amount_out,
		path: swap.path(),
		payer_is_sender: false,
	})?;
	Ok(sequence)
}

/// Merges payload, fee bid, and fresh account state into an unsigned transaction.
///
/// The attached value must equal the amount the wrap steps consume;
/// assembly fails on any mismatch. The gas limit is the configured static
/// ceiling, never the result of simulation.
#[allow(clippy::too_many_arguments)]
pub fn assemble_transaction(
	sender: Address,
	router: Address,
	payload: Bytes,
	value: U256,
	wrapped_value: U256,
	gas_limit: u64,
	nonce: u64,
	chain_id: u64,
	fees: FeeParameters,
) -> Result<Transaction, SwapperError> {
	if value != wrapped_value {
		return Err(SwapperError::Assembly(format!(
			"Attached value {} does not match wrapped amount {}",
			value, wrapped_value
		)));
	}

	Ok(Transaction {
		from: sender,
		to: router,
		data: payload,
		value,
		gas_limit,
		nonce,
		chain_id,
		fees,
	})
}
