//! Gas fee parameter types.
//!
//! Fee parameters come in exactly one of two shapes: the EIP-1559 pair of
//! fee caps, or a single legacy gas price for chains that do not report a
//! base fee. The enum makes the two shapes mutually exclusive.

/// Gas fee bid attached to a transaction.
///
/// Computed once from current network conditions and consumed once during
/// transaction assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FeeParameters {
	/// EIP-1559 fee caps in wei.
	Eip1559 {
		/// Maximum total fee per unit of gas the sender is willing to pay.
		max_fee_per_gas: u128,
		/// Portion of the fee paid to the block producer.
		max_priority_fee_per_gas: u128,
	},
	/// Legacy single gas price in wei, used when the chain reports no base fee.
	Legacy {
		/// Gas price in wei.
		gas_price: u128,
	},
}

impl FeeParameters {
	/// Returns true for the legacy single-price shape.
	pub fn is_legacy(&self) -> bool {
		matches!(self, FeeParameters::Legacy { .. })
	}

	/// Worst-case price per unit of gas for this bid.
	///
	/// Used to bound the total cost of a transaction before submission.
	pub fn price_ceiling(&self) -> u128 {
		match self {
			FeeParameters::Eip1559 {
				max_fee_per_gas, ..
			} => *max_fee_per_gas,
			FeeParameters::Legacy { gas_price } => *gas_price,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_price_ceiling_eip1559() {
		let fees = FeeParameters::Eip1559 {
			max_fee_per_gas: 2_200_000_000,
			max_priority_fee_per_gas: 1_000_000_000,
		};
		assert_eq!(fees.price_ceiling(), 2_200_000_000);
		assert!(!fees.is_legacy());
	}

	#[test]
	fn test_price_ceiling_legacy() {
		let fees = FeeParameters::Legacy {
			gas_price: 1_500_000_000,
		};
		assert_eq!(fees.price_ceiling(), 1_500_000_000);
		assert!(fees.is_legacy());
	}
}
