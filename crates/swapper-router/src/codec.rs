//! Command sequence assembly and calldata encoding.
//!
//! The router executes `execute(bytes commands, bytes[] inputs, uint256
//! deadline)`: one command byte per step, one ABI-encoded input blob per
//! step, and an expiry timestamp. Step order is preserved exactly as pushed.

use crate::RouterError;
use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{sol, SolCall, SolValue};
use swapper_types::{RouterCommand, SwapPath};

sol! {
	/// Universal router entrypoint executing an encoded command sequence.
	interface IUniversalRouter {
		function execute(bytes commands, bytes[] inputs, uint256 deadline) external payable;
	}
}

/// Command byte for an exact-input swap through fee-tier pools.
pub const CMD_V3_SWAP_EXACT_IN: u8 = 0x00;

/// Command byte for wrapping attached native currency.
pub const CMD_WRAP_NATIVE: u8 = 0x0b;

/// Ordered list of router steps, built by explicit appends.
///
/// `push` validates step ordering as the sequence grows: a swap paid from
/// the router's own balance is rejected unless an earlier step leaves funds
/// with the router.
#[derive(Debug, Default)]
pub struct CommandSequence {
	commands: Vec<RouterCommand>,
}

impl CommandSequence {
	/// Creates an empty command sequence.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a step, enforcing the funding order invariant.
	pub fn push(&mut self, command: RouterCommand) -> Result<(), RouterError> {
		if let RouterCommand::V3SwapExactIn {
			payer_is_sender: false,
			..
		} = &command
		{
			if !self.commands.iter().any(RouterCommand::funds_router) {
				return Err(RouterError::UnfundedSwap);
			}
		}
		self.commands.push(command);
		Ok(())
	}

	/// Number of steps in the sequence.
	pub fn len(&self) -> usize {
		self.commands.len()
	}

	/// True when no steps have been pushed.
	pub fn is_empty(&self) -> bool {
		self.commands.is_empty()
	}

	/// Total native currency consumed by wrap steps in this sequence.
	///
	/// The transaction that carries the payload must attach exactly this
	/// value, since the wrap steps spend it.
	pub fn wrapped_value(&self) -> U256 {
		self.commands.iter().fold(U256::ZERO, |total, command| {
			match command {
				RouterCommand::WrapNative { amount, .. } => total + amount,
				_ => total,
			}
		})
	}

	/// Encodes the sequence into `execute` calldata.
	///
	/// Encoding is deterministic: identical steps and deadline always yield
	/// identical bytes. The deadline is a unix timestamp after which the
	/// router rejects the whole payload.
	pub fn encode(&self, deadline: u64) -> Result<Bytes, RouterError> {
		if self.commands.is_empty() {
			return Err(RouterError::EmptySequence);
		}

		let mut command_bytes = Vec::with_capacity(self.commands.len());
		let mut inputs = Vec::with_capacity(self.commands.len());
		for command in &self.commands {
			command_bytes.push(command_byte(command));
			inputs.push(encode_input(command)?);
		}

		let call = IUniversalRouter::executeCall {
			commands: command_bytes.into(),
			inputs,
			deadline: U256::from(deadline),
		};
		Ok(call.abi_encode().into())
	}
}

/// The command byte the router dispatches on for a step.
fn command_byte(command: &RouterCommand) -> u8 {
	match command {
		RouterCommand::WrapNative { .. } => CMD_WRAP_NATIVE,
		RouterCommand::V3SwapExactIn { .. } => CMD_V3_SWAP_EXACT_IN,
	}
}

/// ABI-encodes the input blob for a single step.
fn encode_input(command: &RouterCommand) -> Result<Bytes, RouterError> {
	match command {
		RouterCommand::WrapNative { recipient, amount } => {
			Ok((recipient.sentinel(), *amount).abi_encode_params().into())
		},
		RouterCommand::V3SwapExactIn {
			recipient,
			amount_in,
			min_amount_out,
			path,
			payer_is_sender,
		} => {
			if path.fee_tier > SwapPath::MAX_FEE_TIER {
				return Err(RouterError::InvalidPath(format!(
					"fee tier {} exceeds the 3-byte layout",
					path.fee_tier
				)));
			}
			Ok((
				recipient.sentinel(),
				*amount_in,
				*min_amount_out,
				Bytes::from(path.pack()),
				*payer_is_sender,
			)
				.abi_encode_params()
				.into())
		},
	}
}
