use crypto::{Hash256, PublicKey, SecretKey};

use crate::{Destination, TxSource};

/// Error reported by the external signer
#[derive(thiserror::Error, Debug, PartialEq)]
#[error("{0}")]
pub struct SigningError(pub String);

/// Everything the external signer needs to produce a transaction
///
/// The fee is implicit in the balance of sources over destinations; it is
/// repeated here so signers need not re-derive it.
pub struct SigningRequest<'a> {
    /// Assembled inputs
    pub sources: &'a [TxSource],
    /// Outputs, including any change entry
    pub destinations: &'a [Destination],
    /// The network fee left unclaimed by the destinations
    pub fee: u64,
    /// Raw extra bytes to embed
    pub extra: &'a [u8],
    /// Unlock time for the created outputs
    pub unlock_time: u64,
    /// Whether to use the compact range-proof variant
    pub use_bulletproofs: bool,
}

/// A signed, serialized transaction
#[derive(Debug)]
pub struct SignedTransaction {
    /// The serialized transaction
    pub blob: Vec<u8>,
    /// Hash of the signed transaction
    pub tx_hash: Hash256,
    /// The one-time transaction secret key
    pub tx_secret_key: SecretKey,
    /// The one-time transaction public key
    pub tx_public_key: PublicKey,
}

/// The ring-signature and range-proof machinery, behind a boundary
///
/// Implementations do all the actual cryptography; this crate treats the
/// call as a single opaque, side-effect-free operation.
pub trait TransactionSigner {
    /// Signs the requested transaction
    fn sign_transaction(
        &self,
        request: &SigningRequest<'_>,
    ) -> Result<SignedTransaction, SigningError>;
}
