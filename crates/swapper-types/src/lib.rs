//! Common types module for the universal-router swap submitter.
//!
//! This module defines the core data types shared by the swapper crates:
//! gas fee parameters, router command descriptions, transaction and receipt
//! representations, and utilities for handling secrets and hex strings.

/// Router command types describing the steps of a swap.
pub mod commands;
/// Transaction submission types for blockchain interactions.
pub mod delivery;
/// Gas fee parameter types.
pub mod fees;
/// Secure string type for private keys.
pub mod secret_string;
/// Hex formatting and deserialization utilities.
pub mod utils;

// Re-export all types for convenient access
pub use commands::*;
pub use delivery::*;
pub use fees::*;
pub use secret_string::SecretString;
pub use utils::{deserialize_u256, truncate_id, with_0x_prefix, without_0x_prefix};
