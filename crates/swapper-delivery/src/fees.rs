//! Gas fee bid arithmetic.
//!
//! The fee shape is decided by the network (does the pending block carry a
//! base fee?), but the arithmetic itself is pure and lives here so it can be
//! tested without a node.

use swapper_types::FeeParameters;

/// Configured inputs of the fee bid: the priority fee and the headroom
/// multiplier applied to the observed base fee.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeSettings {
	/// Priority fee (tip) in wei.
	pub priority_fee_wei: u128,
	/// Multiplier applied to the observed base fee; at least 1.0.
	pub base_fee_multiplier: f64,
}

impl FeeSettings {
	/// Builds fee settings from a gwei-denominated priority bid.
	pub fn from_bid(priority_fee_gwei: f64, base_fee_multiplier: f64) -> Self {
		Self {
			priority_fee_wei: priority_fee_to_wei(priority_fee_gwei),
			base_fee_multiplier,
		}
	}

	/// EIP-1559 fee parameters for an observed non-zero base fee.
	///
	/// `max_fee_per_gas = floor(base_fee * multiplier) + priority_fee`.
	pub fn params_for_base_fee(&self, base_fee: u128) -> FeeParameters {
		let scaled = ((base_fee as f64) * self.base_fee_multiplier).floor() as u128;
		FeeParameters::Eip1559 {
			max_fee_per_gas: scaled + self.priority_fee_wei,
			max_priority_fee_per_gas: self.priority_fee_wei,
		}
	}
}

/// Converts a gwei-denominated priority fee to wei, rounding half up.
pub fn priority_fee_to_wei(priority_fee_gwei: f64) -> u128 {
	(priority_fee_gwei * 1e9).round() as u128
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_priority_fee_conversion() {
		assert_eq!(priority_fee_to_wei(1.0), 1_000_000_000);
		assert_eq!(priority_fee_to_wei(1.5), 1_500_000_000);
		assert_eq!(priority_fee_to_wei(0.0), 0);
	}

	#[test]
	fn test_reference_scenario() {
		// base fee 1 gwei, multiplier 1.2, tip 1 gwei
		let settings = FeeSettings::from_bid(1.0, 1.2);
		assert_eq!(
			settings.params_for_base_fee(1_000_000_000),
			FeeParameters::Eip1559 {
				max_fee_per_gas: 2_200_000_000,
				max_priority_fee_per_gas: 1_000_000_000,
			}
		);
	}

	#[test]
	fn test_multiplier_one_is_identity_on_base_fee() {
		let settings = FeeSettings::from_bid(0.0, 1.0);
		assert_eq!(
			settings.params_for_base_fee(7_777),
			FeeParameters::Eip1559 {
				max_fee_per_gas: 7_777,
				max_priority_fee_per_gas: 0,
			}
		);
	}

	#[test]
	fn test_scaled_base_fee_is_floored() {
		// 999 * 1.5 = 1498.5, floored to 1498
		let settings = FeeSettings::from_bid(0.0, 1.5);
		assert_eq!(
			settings.params_for_base_fee(999),
			FeeParameters::Eip1559 {
				max_fee_per_gas: 1_498,
				max_priority_fee_per_gas: 0,
			}
		);
	}
}
