//! Reference decoder for `execute` calldata.
//!
//! The live pipeline never decodes the payload it built; this module exists
//! so tests can verify step ordering and parameters by round-tripping the
//! encoded bytes.

use crate::codec::{IUniversalRouter, CMD_V3_SWAP_EXACT_IN, CMD_WRAP_NATIVE};
use crate::RouterError;
use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};
use swapper_types::{Recipient, RouterCommand, SwapPath};

/// Typed view of a decoded `execute` payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedExecution {
	/// Expiry timestamp the payload was encoded with.
	pub deadline: U256,
	/// Steps in dispatch order.
	pub commands: Vec<RouterCommand>,
}

/// Decodes `execute` calldata back into typed steps.
pub fn decode_execute(calldata: &[u8]) -> Result<DecodedExecution, RouterError> {
	let call = IUniversalRouter::executeCall::abi_decode(calldata)
		.map_err(|e| RouterError::Malformed(e.to_string()))?;

	if call.commands.len() != call.inputs.len() {
		return Err(RouterError::Malformed(format!(
			"{} command bytes but {} inputs",
			call.commands.len(),
			call.inputs.len()
		)));
	}

	let mut commands = Vec::with_capacity(call.commands.len());
	for (byte, input) in call.commands.iter().zip(&call.inputs) {
		// Low 6 bits select the command; the high bit is the allow-revert flag.
		commands.push(decode_step(byte & 0x3f, input)?);
	}

	Ok(DecodedExecution {
		deadline: call.deadline,
		commands,
	})
}

fn decode_step(command: u8, input: &Bytes) -> Result<RouterCommand, RouterError> {
	match command {
		CMD_WRAP_NATIVE => {
			let (sentinel, amount) = <(Address, U256)>::abi_decode_params(input)
				.map_err(|e| RouterError::Malformed(e.to_string()))?;
			Ok(RouterCommand::WrapNative {
				recipient: recipient_from(sentinel)?,
				amount,
			})
		},
		CMD_V3_SWAP_EXACT_IN => {
			let (sentinel, amount_in, min_amount_out, path, payer_is_sender) =
				<(Address, U256, U256, Bytes, bool)>::abi_decode_params(input)
					.map_err(|e| RouterError::Malformed(e.to_string()))?;
			let path = SwapPath::unpack(&path).ok_or_else(|| {
				RouterError::InvalidPath(format!("{} bytes is not a single-pool path", path.len()))
			})?;
			Ok(RouterCommand::V3SwapExactIn {
				recipient: recipient_from(sentinel)?,
				amount_in,
				min_amount_out,
				path,
				payer_is_sender,
			})
		},
		other => Err(RouterError::UnknownCommand(other)),
	}
}

fn recipient_from(sentinel: Address) -> Result<Recipient, RouterError> {
	Recipient::from_sentinel(sentinel)
		.ok_or_else(|| RouterError::Malformed(format!("unknown recipient sentinel {}", sentinel)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::CommandSequence;
	use alloy_primitives::address;

	fn test_path() -> SwapPath {
		SwapPath {
			token_in: address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
			fee_tier: 3000,
			token_out: address!("aA8E23Fb1079EA71e0a56F48a2aA51851D8433D0"),
		}
	}

	#[test]
	fn test_round_trip_preserves_steps_and_order() {
		let wrap = RouterCommand::WrapNative {
			recipient: Recipient::Router,
			amount: U256::from(10_000_000_000_000u64),
		};
		let swap = RouterCommand::V3SwapExactIn {
			recipient: Recipient::Sender,
			amount_in: U256::from(10_000_000_000_000u64),
			min_amount_out: U256::ZERO,
			path: test_path(),
			payer_is_sender: false,
		};

		let mut sequence = CommandSequence::new();
		sequence.push(wrap.clone()).unwrap();
		sequence.push(swap.clone()).unwrap();
		let payload = sequence.encode(1_700_000_000).unwrap();

		let decoded = decode_execute(&payload).unwrap();
		assert_eq!(decoded.deadline, U256::from(1_700_000_000u64));
		// Wrap strictly precedes the swap that consumes its output.
		assert_eq!(decoded.commands, vec![wrap, swap]);
	}

	#[test]
	fn test_garbage_rejected() {
		assert!(matches!(
			decode_execute(&[0x00, 0x01, 0x02]),
			Err(RouterError::Malformed(_))
		));
	}
}
