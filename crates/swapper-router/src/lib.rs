//! Universal-router command encoding for the swap submitter.
//!
//! This module turns an ordered list of typed router steps into the opaque
//! calldata the universal router's `execute` entrypoint consumes. The
//! payload is treated as opaque everywhere downstream; the decoder exists
//! as a reference for verifying encodings in tests.

use thiserror::Error;

pub mod codec;
pub mod decode;

pub use codec::{CommandSequence, CMD_V3_SWAP_EXACT_IN, CMD_WRAP_NATIVE};
pub use decode::{decode_execute, DecodedExecution};

/// Errors that can occur while building or encoding a command sequence.
#[derive(Debug, Error)]
pub enum RouterError {
	/// Error that occurs when encoding an empty command sequence.
	#[error("Command sequence is empty")]
	EmptySequence,
	/// Error that occurs when a router-paid swap has no prior funding step.
	#[error("Swap paid from the router balance requires a preceding step that funds the router")]
	UnfundedSwap,
	/// Error that occurs when a pool path cannot be encoded.
	#[error("Invalid pool path: {0}")]
	InvalidPath(String),
	/// Error that occurs when a payload cannot be decoded.
	#[error("Malformed payload: {0}")]
	Malformed(String),
	/// Error that occurs when a payload contains an unsupported command byte.
	#[error("Unsupported command byte: {0:#04x}")]
	UnknownCommand(u8),
}
