//! Recovery of confidential output data from server-supplied blobs
//!
//! The server hands every confidential output a 192-character hex blob:
//! the amount commitment, the encrypted blinding mask and the encrypted
//! amount, 64 characters each. Only the view key holder can strip the
//! encryption; the server never sees a mask in the clear.

use serde::{Deserialize, Serialize};

use crypto::{
    ecc::{self, hash_to_scalar, CompressedPoint, Scalar},
    CNFastHash, Digest, PublicKey, ScalarExt, SecretKey,
};
use ringct::{DecodedOutput, RctSignature};

use crate::{derivation::Derivation, error::Error};

const FIELD_HEX_LEN: usize = 64;

/// The packed commitment ‖ encrypted-mask ‖ encrypted-amount blob carried
/// by a confidential output
///
/// Kept as the raw string; fields are parsed strictly on access. An absent
/// blob (a plain output) is represented as `Option::None` at the use
/// sites, never as an empty string.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidentialData(String);

impl ConfidentialData {
    /// Wraps a raw blob string
    pub fn new(blob: impl Into<String>) -> Self {
        ConfidentialData(blob.into())
    }

    /// The raw blob
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn field(&self, index: usize) -> Result<&str, Error> {
        if !self.0.is_ascii() {
            return Err(Error::MalformedOutputData);
        }
        self.0
            .get(index * FIELD_HEX_LEN..(index + 1) * FIELD_HEX_LEN)
            .ok_or(Error::MissingConfidentialCommitment)
    }

    /// The output's amount commitment
    pub fn commitment(&self) -> Result<CompressedPoint, Error> {
        ecc::point_from_hex(self.field(0)?).map_err(|_| Error::MalformedOutputData)
    }

    /// The encrypted blinding mask
    pub fn encrypted_mask(&self) -> Result<Scalar, Error> {
        Scalar::from_hex(self.field(1)?).map_err(|_| Error::MalformedOutputData)
    }

    /// The encrypted amount
    pub fn encrypted_amount(&self) -> Result<Scalar, Error> {
        Scalar::from_hex(self.field(2)?).map_err(|_| Error::MalformedOutputData)
    }
}

/// Parses the commitment of a possibly-confidential output
///
/// `None` means a plain output, whose commitment is reconstructed from the
/// cleartext amount instead.
pub fn recover_commitment(
    blob: Option<&ConfidentialData>,
) -> Result<Option<CompressedPoint>, Error> {
    match blob {
        None => Ok(None),
        Some(data) => data.commitment().map(Some),
    }
}

/// Decrypts the blinding mask of a received confidential output
///
/// The mask is hidden by `H_s(derivation_to_scalar(D, index))` where `D` is
/// the view-key/tx-key shared secret; subtracting that scalar restores it.
pub fn recover_mask(
    blob: Option<&ConfidentialData>,
    view_secret_key: &SecretKey,
    tx_public_key: &PublicKey,
    output_index: u64,
) -> Result<Option<Scalar>, Error> {
    let data = match blob {
        None => return Ok(None),
        Some(data) => data,
    };

    let encrypted_mask = data.encrypted_mask()?;
    let derivation =
        Derivation::from(view_secret_key, tx_public_key).ok_or(Error::KeyDerivationFailed)?;
    let output_scalar = derivation.to_scalar(output_index);
    let mask_key = hash_to_scalar(CNFastHash::digest(output_scalar.as_bytes()));

    Ok(Some(encrypted_mask - mask_key))
}

/// Recovers the mask and amount of an output from its ring signature data
///
/// Thin wrapper over [`ringct::decode`] that folds its errors into this
/// crate's taxonomy.
pub fn decode_confidential_output(
    signature: &RctSignature,
    shared_secret: &SecretKey,
    output_index: usize,
) -> Result<DecodedOutput, Error> {
    ringct::decode(signature, shared_secret, output_index).map_err(|err| match err {
        ringct::Error::UnsupportedSignatureType => Error::UnsupportedSignatureType,
        ringct::Error::OutputIndexOutOfRange { .. } | ringct::Error::CommitmentMismatch => {
            Error::MalformedOutputData
        }
    })
}
