//! Router command types describing the steps of a swap.
//!
//! A swap through the universal router is an ordered sequence of typed steps.
//! Step order matters: a swap that is paid from the router's own balance must
//! be preceded by a step that leaves funds with the router (the wrap step).

use alloy_primitives::{Address, U256};

/// Sentinel address the router interprets as "the original message sender".
pub const MSG_SENDER: Address = Address::with_last_byte(1);

/// Sentinel address the router interprets as "the router contract itself".
pub const ADDRESS_THIS: Address = Address::with_last_byte(2);

/// Designates who receives the output of a router step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Recipient {
	/// The router contract holds the output for a later step.
	Router,
	/// The output is sent back to the original sender.
	Sender,
}

impl Recipient {
	/// The sentinel address encoded into the step input for this recipient.
	pub fn sentinel(&self) -> Address {
		match self {
			Recipient::Router => ADDRESS_THIS,
			Recipient::Sender => MSG_SENDER,
		}
	}

	/// Maps a sentinel address back to a recipient designation.
	pub fn from_sentinel(address: Address) -> Option<Self> {
		if address == ADDRESS_THIS {
			Some(Recipient::Router)
		} else if address == MSG_SENDER {
			Some(Recipient::Sender)
		} else {
			None
		}
	}
}

/// Single-pool swap path: token-in, fee tier, token-out.
///
/// The byte form is the packed layout the router's swap step consumes:
/// 20 bytes token-in, 3 bytes big-endian fee tier, 20 bytes token-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SwapPath {
	/// Token being spent.
	pub token_in: Address,
	/// Pool fee tier in hundredths of a basis point (e.g. 3000 = 0.3%).
	pub fee_tier: u32,
	/// Token being bought.
	pub token_out: Address,
}

/// Packed single-pool path length: 20 + 3 + 20 bytes.
pub const PACKED_PATH_LEN: usize = 43;

impl SwapPath {
	/// Largest encodable fee tier; the packed layout gives the tier 3 bytes.
	pub const MAX_FEE_TIER: u32 = (1 << 24) - 1;

	/// Packs the path into the router's byte layout.
	pub fn pack(&self) -> Vec<u8> {
		let mut out = Vec::with_capacity(PACKED_PATH_LEN);
		out.extend_from_slice(self.token_in.as_slice());
		// 3-byte big-endian fee tier
		out.extend_from_slice(&self.fee_tier.to_be_bytes()[1..]);
		out.extend_from_slice(self.token_out.as_slice());
		out
	}

	/// Recovers a single-pool path from its packed byte layout.
	///
	/// Returns None if the slice is not exactly one pool hop long.
	pub fn unpack(bytes: &[u8]) -> Option<Self> {
		if bytes.len() != PACKED_PATH_LEN {
			return None;
		}
		let token_in = Address::from_slice(&bytes[..20]);
		let fee_tier = u32::from_be_bytes([0, bytes[20], bytes[21], bytes[22]]);
		let token_out = Address::from_slice(&bytes[23..]);
		Some(Self {
			token_in,
			fee_tier,
			token_out,
		})
	}
}

/// One typed step in a router command sequence.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RouterCommand {
	/// Wraps attached native currency into the wrapped token.
	WrapNative {
		/// Who holds the wrapped tokens afterwards.
		recipient: Recipient,
		/// Amount of native currency to wrap, in wei.
		amount: U256,
	},
	/// Swaps an exact input amount along a fee-tier pool path.
	V3SwapExactIn {
		/// Who receives the bought tokens.
		recipient: Recipient,
		/// Exact amount of the input token to spend.
		amount_in: U256,
		/// Minimum acceptable output amount; the swap reverts below it.
		min_amount_out: U256,
		/// Pool path from input token to output token.
		path: SwapPath,
		/// True when the caller pays the input token; false when the router
		/// pays from its own balance left by a prior step.
		payer_is_sender: bool,
	},
}

impl RouterCommand {
	/// True for steps that leave funds under the router's control.
	pub fn funds_router(&self) -> bool {
		matches!(
			self,
			RouterCommand::WrapNative {
				recipient: Recipient::Router,
				..
			}
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::address;

	#[test]
	fn test_sentinel_round_trip() {
		assert_eq!(Recipient::from_sentinel(Recipient::Router.sentinel()), Some(Recipient::Router));
		assert_eq!(Recipient::from_sentinel(Recipient::Sender.sentinel()), Some(Recipient::Sender));
		assert_eq!(
			Recipient::from_sentinel(address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14")),
			None
		);
	}

	#[test]
	fn test_path_pack_layout() {
		let path = SwapPath {
			token_in: address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
			fee_tier: 3000,
			token_out: address!("aA8E23Fb1079EA71e0a56F48a2aA51851D8433D0"),
		};
		let packed = path.pack();
		assert_eq!(packed.len(), PACKED_PATH_LEN);
		assert_eq!(&packed[..20], path.token_in.as_slice());
		// 3000 = 0x000bb8
		assert_eq!(&packed[20..23], &[0x00, 0x0b, 0xb8]);
		assert_eq!(&packed[23..], path.token_out.as_slice());
	}

	#[test]
	fn test_path_unpack_round_trip() {
		let path = SwapPath {
			token_in: address!("fFf9976782d46CC05630D1f6eBAb18b2324d6B14"),
			fee_tier: 500,
			token_out: address!("aA8E23Fb1079EA71e0a56F48a2aA51851D8433D0"),
		};
		assert_eq!(SwapPath::unpack(&path.pack()), Some(path));
		assert_eq!(SwapPath::unpack(&[0u8; 10]), None);
	}

	#[test]
	fn test_funds_router() {
		let wrap = RouterCommand::WrapNative {
			recipient: Recipient::Router,
			amount: U256::from(1),
		};
		assert!(wrap.funds_router());

		let wrap_to_sender = RouterCommand::WrapNative {
			recipient: Recipient::Sender,
			amount: U256::from(1),
		};
		assert!(!wrap_to_sender.funds_router());
	}
}
