//! Account management module for the swap submitter.
//!
//! This module provides the signing seam of the pipeline: it turns an
//! assembled, unsigned transaction into a signed raw envelope ready for
//! broadcast. Key custody is behind the `AccountInterface` trait so the
//! pipeline never touches the private key directly.

use alloy_primitives::Address;
use async_trait::async_trait;
use swapper_types::{SignedTransaction, Transaction};
use thiserror::Error;

/// Re-export implementations
pub mod implementations {
	pub mod local;
}

/// Errors that can occur during account operations.
#[derive(Debug, Error)]
pub enum AccountError {
	/// Error that occurs when signing operations fail.
	#[error("Signing failed: {0}")]
	SigningFailed(String),
	/// Error that occurs when a cryptographic key is invalid or malformed.
	#[error("Invalid key: {0}")]
	InvalidKey(String),
}

/// Trait defining the interface for account implementations.
///
/// An account implementation owns a signing key, exposes the derived
/// address, and signs assembled transactions.
#[async_trait]
pub trait AccountInterface: Send + Sync {
	/// The address derived from the signing key.
	fn address(&self) -> Address;

	/// Signs an assembled transaction into a broadcastable raw envelope.
	///
	/// Fails if the request is incomplete or the signer rejects it.
	async fn sign_transaction(&self, tx: &Transaction) -> Result<SignedTransaction, AccountError>;
}

/// Service that manages account operations.
///
/// Thin wrapper over the configured account implementation, giving the
/// pipeline a stable signing entry point.
pub struct AccountService {
	/// The underlying account implementation.
	implementation: Box<dyn AccountInterface>,
}

impl AccountService {
	/// Creates a new AccountService with the specified implementation.
	pub fn new(implementation: Box<dyn AccountInterface>) -> Self {
		Self { implementation }
	}

	/// The sender address for transactions signed by this service.
	pub fn address(&self) -> Address {
		self.implementation.address()
	}

	/// Signs a transaction using the managed account.
	pub async fn sign(&self, tx: &Transaction) -> Result<SignedTransaction, AccountError> {
		self.implementation.sign_transaction(tx).await
	}
}
