//! Recovery of a received output's mask and amount from its signature data

use serde::{Deserialize, Serialize};

use crypto::{ecc::CompressedPoint, SecretKey};
use ensure_macro::ensure;

use crate::{
    ecdh::{ecdh_decode, EcdhTuple},
    Commitment,
};

/// Error type for confidential output decoding
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// Returned for the null type (nothing to decode) and unknown type tags
    #[error("Unsupported ring signature type")]
    UnsupportedSignatureType,

    /// Returned when the output index is outside the signature's ECDH or
    /// commitment lists
    #[error("Output index {index} out of range ({count} outputs)")]
    OutputIndexOutOfRange {
        /// The requested output index
        index: usize,
        /// The number of outputs carried by the signature
        count: usize,
    },

    /// Returned when the decrypted mask/amount do not reproduce the
    /// published commitment
    #[error("Decoded amount does not match the output commitment")]
    CommitmentMismatch,
}

/// Ring signature type tags, as serialized on the wire
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum RctType {
    /// No confidential data (coinbase and pre-RingCT transactions)
    Null = 0,
    /// Aggregate ring signature over all inputs
    Full = 1,
    /// One ring signature per input
    Simple = 2,
    /// Simple variant with bulletproof range proofs
    Bulletproof = 3,
}

impl RctType {
    /// Maps a wire tag to a known type
    pub fn from_tag(tag: u8) -> Result<RctType, Error> {
        match tag {
            0 => Ok(RctType::Null),
            1 => Ok(RctType::Full),
            2 => Ok(RctType::Simple),
            3 => Ok(RctType::Bulletproof),
            _ => Err(Error::UnsupportedSignatureType),
        }
    }
}

/// The subset of a ring signature a light wallet sees when decoding its own
/// outputs: the type tag, the encrypted mask/amount tuples and the output
/// commitments
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RctSignature {
    /// Signature type tag
    pub signature_type: RctType,
    /// One encrypted tuple per output
    pub ecdh_info: Vec<EcdhTuple>,
    /// One commitment per output
    pub output_commitments: Vec<CompressedPoint>,
}

/// A successfully decoded output
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedOutput {
    /// The recovered blinding mask
    pub mask: SecretKey,
    /// The recovered amount
    pub amount: u64,
}

/// Recovers the mask and amount of the output at `output_index`
///
/// Only the addressed output's tuple and commitment are read; other ring
/// members' data never enters the computation. The recovered pair is
/// checked against the published commitment before being returned.
pub fn decode(
    signature: &RctSignature,
    shared_secret: &SecretKey,
    output_index: usize,
) -> Result<DecodedOutput, Error> {
    match signature.signature_type {
        RctType::Null => return Err(Error::UnsupportedSignatureType),
        RctType::Full | RctType::Simple | RctType::Bulletproof => {}
    }

    let count = signature.ecdh_info.len().min(signature.output_commitments.len());
    ensure!(
        output_index < signature.ecdh_info.len()
            && output_index < signature.output_commitments.len(),
        Error::OutputIndexOutOfRange {
            index: output_index,
            count,
        }
    );

    let mut tuple = signature.ecdh_info[output_index].clone();
    ecdh_decode(&mut tuple, shared_secret);

    let commitment = Commitment {
        value: tuple.amount,
        mask: tuple.mask,
    };
    ensure!(
        commitment.to_public().compress() == signature.output_commitments[output_index],
        Error::CommitmentMismatch
    );

    let mut amount_bytes = [0u8; 8];
    amount_bytes.copy_from_slice(&tuple.amount.as_bytes()[..8]);

    Ok(DecodedOutput {
        mask: tuple.mask,
        amount: u64::from_le_bytes(amount_bytes),
    })
}
