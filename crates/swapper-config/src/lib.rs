//! Configuration module for the universal-router swap submitter.
//!
//! Configuration is loaded from a TOML file with `${ENV_VAR}` interpolation
//! so secrets (the signing key, the RPC endpoint) come from the environment
//! rather than the file itself. The configuration is validated once at load
//! time; nothing reads ambient environment state after that.

use alloy_primitives::{Address, U256};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use swapper_types::{deserialize_u256, without_0x_prefix, SecretString, SwapPath};
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error that occurs during file I/O operations.
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
	/// Error that occurs when parsing TOML configuration.
	#[error("Configuration error: {0}")]
	Parse(String),
	/// Error that occurs when configuration validation fails.
	#[error("Validation error: {0}")]
	Validation(String),
}

impl From<toml::de::Error> for ConfigError {
	fn from(err: toml::de::Error) -> Self {
		// Extract just the message without the input dump
		ConfigError::Parse(err.message().to_string())
	}
}

/// Main configuration structure for the swap submitter.
///
/// Contains everything one run needs: the instance identity, the signing
/// account, the target network, the swap description, the gas bid settings,
/// and the submission polling settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
	/// Configuration specific to this swapper instance.
	pub swapper: SwapperConfig,
	/// Configuration for the signing account.
	pub account: AccountConfig,
	/// Configuration for the target network.
	pub network: NetworkConfig,
	/// Description of the swap to perform.
	pub swap: SwapConfig,
	/// Gas fee bid settings.
	pub gas: GasConfig,
	/// Submission and receipt-polling settings.
	#[serde(default)]
	pub submission: SubmissionConfig,
}

/// Configuration specific to this swapper instance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwapperConfig {
	/// Unique identifier for this instance, used in log lines.
	pub id: String,
}

/// Configuration for the signing account.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccountConfig {
	/// The private signing key, normally injected as `${PRIVATE_KEY}`.
	pub private_key: SecretString,
}

/// Configuration for the target network.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NetworkConfig {
	/// HTTP JSON-RPC endpoint, normally injected as `${RPC_URL}`.
	pub rpc_url: String,
}

/// Description of the swap to perform.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwapConfig {
	/// Universal router contract address.
	pub router: Address,
	/// Wrapped-native token address (input side of the pool path).
	pub wrapped_native: Address,
	/// Output token address (the stablecoin).
	pub token_out: Address,
	/// Pool fee tier in hundredths of a basis point.
	pub fee_tier: u32,
	/// Amount of native currency to wrap and swap, in wei.
	#[serde(deserialize_with = "deserialize_u256")]
	pub amount_in: U256,
	/// Minimum acceptable output amount. Defaults to zero: no slippage
	/// protection, which is only suitable for test traffic.
	#[serde(default, deserialize_with = "deserialize_u256")]
	pub min_amount_out: U256,
	/// Seconds from now until the router rejects the command payload.
	#[serde(default = "default_deadline_offset_secs")]
	pub deadline_offset_secs: u64,
}

impl SwapConfig {
	/// The single-pool path described by this configuration.
	pub fn path(&self) -> SwapPath {
		SwapPath {
			token_in: self.wrapped_native,
			fee_tier: self.fee_tier,
			token_out: self.token_out,
		}
	}
}

/// Returns the default deadline offset in seconds.
fn default_deadline_offset_secs() -> u64 {
	1000
}

/// Gas fee bid settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GasConfig {
	/// Priority fee bid in gwei, converted to wei when estimating.
	#[serde(default = "default_priority_fee_gwei")]
	pub priority_fee_gwei: f64,
	/// Multiplier applied to the observed base fee; must be at least 1.0.
	#[serde(default = "default_base_fee_multiplier")]
	pub base_fee_multiplier: f64,
	/// Static gas limit ceiling; execution that needs more reverts on chain.
	pub gas_limit: u64,
}

/// Returns the default priority fee bid in gwei.
fn default_priority_fee_gwei() -> f64 {
	1.0
}

/// Returns the default base fee multiplier.
fn default_base_fee_multiplier() -> f64 {
	1.2
}

/// Submission and receipt-polling settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubmissionConfig {
	/// Seconds between receipt polls.
	#[serde(default = "default_poll_interval_secs")]
	pub poll_interval_secs: u64,
	/// Seconds to wait for the transaction to be mined before giving up.
	#[serde(default = "default_receipt_timeout_secs")]
	pub timeout_secs: u64,
}

impl Default for SubmissionConfig {
	fn default() -> Self {
		Self {
			poll_interval_secs: default_poll_interval_secs(),
			timeout_secs: default_receipt_timeout_secs(),
		}
	}
}

/// Returns the default receipt poll interval in seconds.
fn default_poll_interval_secs() -> u64 {
	7
}

/// Returns the default receipt timeout in seconds.
fn default_receipt_timeout_secs() -> u64 {
	300
}

/// Resolves environment variables in a string.
///
/// Replaces `${VAR_NAME}` with the value of the environment variable, and
/// supports `${VAR_NAME:-default_value}` fallbacks. Input is limited to 1MB.
pub(crate) fn resolve_env_vars(input: &str) -> Result<String, ConfigError> {
	const MAX_INPUT_SIZE: usize = 1024 * 1024;
	if input.len() > MAX_INPUT_SIZE {
		return Err(ConfigError::Validation(format!(
			"Configuration file too large: {} bytes (max: {} bytes)",
			input.len(),
			MAX_INPUT_SIZE
		)));
	}

	let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]{0,127})(?::-([^}]{0,256}))?\}")
		.map_err(|e| ConfigError::Parse(format!("Regex error: {}", e)))?;

	let mut result = input.to_string();
	let mut replacements = Vec::new();

	for cap in re.captures_iter(input) {
		let full_match = cap.get(0).unwrap();
		let var_name = cap.get(1).unwrap().as_str();
		let default_value = cap.get(2).map(|m| m.as_str());

		let value = match std::env::var(var_name) {
			Ok(v) => v,
			Err(_) => match default_value {
				Some(default) => default.to_string(),
				None => {
					return Err(ConfigError::Validation(format!(
						"Environment variable '{}' not found",
						var_name
					)))
				},
			},
		};

		replacements.push((full_match.start(), full_match.end(), value));
	}

	// Apply replacements in reverse order to maintain positions
	for (start, end, value) in replacements.iter().rev() {
		result.replace_range(start..end, value);
	}

	Ok(result)
}

impl Config {
	/// Loads and validates configuration from a TOML file.
	pub async fn from_file(path: &str) -> Result<Self, ConfigError> {
		let content = tokio::fs::read_to_string(path).await?;
		content.parse()
	}

	/// Validates the configuration so every later stage can assume it.
	///
	/// Checks the signing key shape, the RPC endpoint, address sanity, the
	/// fee-tier bound, amount and gas settings, and the polling settings.
	fn validate(&self) -> Result<(), ConfigError> {
		if self.swapper.id.is_empty() {
			return Err(ConfigError::Validation("Swapper ID cannot be empty".into()));
		}

		self.account.private_key.with_exposed(|key| {
			let hex_part = without_0x_prefix(key);
			if hex_part.len() != 64 || !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
				return Err(ConfigError::Validation(
					"Private key must be a 32-byte hex string".into(),
				));
			}
			Ok(())
		})?;

		if self.network.rpc_url.is_empty() {
			return Err(ConfigError::Validation("RPC URL cannot be empty".into()));
		}
		if !self.network.rpc_url.starts_with("http://") && !self.network.rpc_url.starts_with("https://") {
			return Err(ConfigError::Validation(format!(
				"RPC URL must be an http(s) endpoint: {}",
				self.network.rpc_url
			)));
		}

		if self.swap.router == Address::ZERO {
			return Err(ConfigError::Validation(
				"Router address cannot be zero".into(),
			));
		}
		if self.swap.wrapped_native == Address::ZERO || self.swap.token_out == Address::ZERO {
			return Err(ConfigError::Validation(
				"Token addresses cannot be zero".into(),
			));
		}
		if self.swap.wrapped_native == self.swap.token_out {
			return Err(ConfigError::Validation(
				"Input and output token must differ".into(),
			));
		}
		if self.swap.fee_tier > SwapPath::MAX_FEE_TIER {
			return Err(ConfigError::Validation(format!(
				"Fee tier {} does not fit the 3-byte path layout",
				self.swap.fee_tier
			)));
		}
		if self.swap.amount_in.is_zero() {
			return Err(ConfigError::Validation(
				"Swap amount_in must be greater than 0".into(),
			));
		}
		if self.swap.deadline_offset_secs == 0 {
			return Err(ConfigError::Validation(
				"Deadline offset must be greater than 0".into(),
			));
		}

		if !self.gas.base_fee_multiplier.is_finite() || self.gas.base_fee_multiplier < 1.0 {
			return Err(ConfigError::Validation(format!(
				"Base fee multiplier must be at least 1.0, got {}",
				self.gas.base_fee_multiplier
			)));
		}
		if !self.gas.priority_fee_gwei.is_finite() || self.gas.priority_fee_gwei < 0.0 {
			return Err(ConfigError::Validation(format!(
				"Priority fee must be non-negative, got {}",
				self.gas.priority_fee_gwei
			)));
		}
		if self.gas.gas_limit == 0 {
			return Err(ConfigError::Validation(
				"Gas limit must be greater than 0".into(),
			));
		}

		if self.submission.poll_interval_secs == 0 {
			return Err(ConfigError::Validation(
				"Receipt poll interval must be greater than 0".into(),
			));
		}
		if self.submission.timeout_secs < self.submission.poll_interval_secs {
			return Err(ConfigError::Validation(
				"Receipt timeout cannot be shorter than the poll interval".into(),
			));
		}

		Ok(())
	}
}

/// Parses configuration from a TOML string.
///
/// Environment variables are resolved first and the configuration is
/// validated after parsing.
impl FromStr for Config {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let resolved = resolve_env_vars(s)?;
		let config: Config = toml::from_str(&resolved)?;
		config.validate()?;
		Ok(config)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TEST_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

	fn base_config(key: &str, rpc: &str) -> String {
		format!(
			r#"
[swapper]
id = "test-swapper"

[account]
private_key = "{key}"

[network]
rpc_url = "{rpc}"

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
	}

	#[test]
	fn test_env_var_resolution() {
		std::env::set_var("SWAPPER_TEST_HOST", "localhost");
		let result = resolve_env_vars("url = \"http://${SWAPPER_TEST_HOST}:8545\"").unwrap();
		assert_eq!(result, "url = \"http://localhost:8545\"");
		std::env::remove_var("SWAPPER_TEST_HOST");
	}

	#[test]
	fn test_env_var_with_default() {
		let result = resolve_env_vars("value = \"${SWAPPER_MISSING_VAR:-fallback}\"").unwrap();
		assert_eq!(result, "value = \"fallback\"");
	}

	#[test]
	fn test_missing_env_var_error() {
		let result = resolve_env_vars("value = \"${SWAPPER_MISSING_VAR}\"");
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("SWAPPER_MISSING_VAR"));
	}

	#[test]
	fn test_config_parses_with_defaults() {
		let config: Config = base_config(TEST_KEY, "http://localhost:8545")
			.parse()
			.unwrap();
		assert_eq!(config.swapper.id, "test-swapper");
		assert_eq!(config.swap.min_amount_out, U256::ZERO);
		assert_eq!(config.swap.deadline_offset_secs, 1000);
		assert_eq!(config.gas.priority_fee_gwei, 1.0);
		assert_eq!(config.gas.base_fee_multiplier, 1.2);
		assert_eq!(config.submission.poll_interval_secs, 7);
		assert_eq!(config.submission.timeout_secs, 300);
		assert_eq!(config.swap.path().fee_tier, 3000);
	}

	#[test]
	fn test_config_with_env_key() {
		std::env::set_var("SWAPPER_TEST_PRIVATE_KEY", TEST_KEY);
		let config: Config = base_config("${SWAPPER_TEST_PRIVATE_KEY}", "http://localhost:8545")
			.parse()
			.unwrap();
		config
			.account
			.private_key
			.with_exposed(|key| assert_eq!(key, TEST_KEY));
		std::env::remove_var("SWAPPER_TEST_PRIVATE_KEY");
	}

	#[test]
	fn test_malformed_private_key_rejected() {
		let result: Result<Config, _> = base_config("0x1234", "http://localhost:8545").parse();
		assert!(result.is_err());
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("Private key must be a 32-byte hex string"));
	}

	#[test]
	fn test_non_http_rpc_url_rejected() {
		let result: Result<Config, _> = base_config(TEST_KEY, "ws://localhost:8545").parse();
		assert!(result.is_err());
	}

	#[test]
	fn test_multiplier_below_one_rejected() {
		let mut raw = base_config(TEST_KEY, "http://localhost:8545");
		raw.push_str("base_fee_multiplier = 0.9\n");
		let result: Result<Config, _> = raw.parse();
		assert!(result.is_err());
		assert!(result.unwrap_err().to_string().contains("at least 1.0"));
	}

	#[test]
	fn test_zero_gas_limit_rejected() {
		let raw =
			base_config(TEST_KEY, "http://localhost:8545").replace("gas_limit = 500000", "gas_limit = 0");
		let result: Result<Config, _> = raw.parse();
		assert!(result.is_err());
	}

	#[test]
	fn test_zero_amount_rejected() {
		let raw = base_config(TEST_KEY, "http://localhost:8545")
			.replace(r#"amount_in = "10000000000000""#, r#"amount_in = "0""#);
		let result: Result<Config, _> = raw.parse();
		assert!(result.is_err());
	}

	#[test]
	fn test_oversized_fee_tier_rejected() {
		let raw = base_config(TEST_KEY, "http://localhost:8545")
			.replace("fee_tier = 3000", "fee_tier = 16777216");
		let result: Result<Config, _> = raw.parse();
		assert!(result.is_err());
	}

	#[tokio::test]
	async fn test_from_file() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		std::fs::write(&path, base_config(TEST_KEY, "http://localhost:8545")).unwrap();

		let config = Config::from_file(path.to_str().unwrap()).await.unwrap();
		assert_eq!(config.swapper.id, "test-swapper");
	}

	#[tokio::test]
	async fn test_from_file_missing() {
		let result = Config::from_file("/nonexistent/config.toml").await;
		assert!(matches!(result, Err(ConfigError::Io(_))));
	}
}
