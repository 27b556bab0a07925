#![deny(missing_docs)]
//! Client-side transaction construction for a light wallet
//!
//! A light wallet delegates output discovery to an untrusted server but
//! never lets secret keys leave the client. This crate covers the local
//! half of that protocol: fee and fork-rule policy, recovery of
//! confidential amounts and blinding masks, assembly of decoy rings from
//! server-supplied candidates, balance-checked source/destination building,
//! key-image derivation, and the two-phase prepare/build send flow.
//!
//! Ring signatures and range proofs themselves are produced behind the
//! [`TransactionSigner`] boundary; nothing in this crate signs anything.

use serde::{Deserialize, Serialize};

use crypto::{
    ecc::{CompressedPoint, Scalar},
    PublicKey,
};

pub mod address;
pub mod confidential;
pub mod config;
pub mod construction;
mod derivation;
mod error;
pub mod fee;
pub mod fork;
pub mod key_image;
pub mod ring;
pub mod send;
mod signer;
#[cfg(test)]
mod test_support;
pub mod unlock;

pub use address::{AccountKeys, Address, AddressKind};
pub use confidential::ConfidentialData;
pub use derivation::Derivation;
pub use error::Error;
pub use signer::{SignedTransaction, SigningError, SigningRequest, TransactionSigner};

/// An owned, unspent output as reported by the light wallet server
///
/// All keys are 64-character hex strings; they are validated at the point
/// of use, not at construction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpendableOutput {
    /// Amount carried by the output
    pub amount: u64,
    /// The output's destination key
    pub public_key: String,
    /// Confidential blob, present iff the output hides its amount
    pub confidential: Option<ConfidentialData>,
    /// Position of the output in the global output set
    pub global_index: u64,
    /// Position of the output within its owning transaction's output list
    pub local_index: u64,
    /// Public key of the owning transaction
    pub tx_public_key: String,
}

/// A candidate ring member supplied by the server
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecoyOutput {
    /// Position of the decoy in the global output set
    pub global_index: u64,
    /// The decoy's destination key
    pub public_key: String,
    /// Confidential blob, present iff the decoy hides its amount
    pub confidential: Option<ConfidentialData>,
}

/// Decoy candidates for one spent output
///
/// The amount key matters only for legacy outputs, where rings mix within
/// an amount category. Confidential pools are amount-agnostic but keep the
/// key for protocol compatibility.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DecoyPool {
    /// Amount category of the real output this pool may ring with
    pub amount: u64,
    /// The candidates
    pub outputs: Vec<DecoyOutput>,
}

/// One member of an assembled ring
#[derive(Clone, Debug, PartialEq)]
pub struct RingMember {
    /// Position in the global output set
    pub global_index: u64,
    /// The member's destination key
    pub destination_key: CompressedPoint,
    /// The member's amount commitment (parsed or reconstructed)
    pub commitment: CompressedPoint,
}

/// One fully assembled transaction input, ready for the signer
pub struct TxSource {
    /// Amount being spent
    pub amount: u64,
    /// Whether the real output hides its amount
    pub is_confidential: bool,
    /// The ring, strictly increasing by global index
    pub ring: Vec<RingMember>,
    /// Position of the real output inside the ring
    pub real_index: usize,
    /// Position of the real output within its owning transaction
    pub real_output_local_index: u64,
    /// The recovered blinding mask (identity for plain outputs)
    pub real_commitment_mask: Scalar,
    /// Public key of the transaction that created the real output
    pub owning_tx_public_key: PublicKey,
}

/// An amount paid to an address
///
/// Change travels as an ordinary destination entry paying the sender.
#[derive(Clone)]
pub struct Destination {
    /// The receiving address
    pub address: Address,
    /// Amount to pay
    pub amount: u64,
}
