//! Key image derivation for received outputs
//!
//! The key image is the double-spend tag the wallet reports alongside each
//! spent output: deterministic per output, unlinkable to the output key
//! without the spend secret.

use crypto::{
    ecc::{hash_to_point, BASEPOINT_TABLE},
    CNFastHash, Digest, KeyImage, PublicKey, SecretKey,
};

use crate::{derivation::Derivation, error::Error};

/// Derives the key image of the output at `output_index` of the
/// transaction with key `tx_public_key`
///
/// The output secret key is `x = H_s(aR ‖ index) + b`; the key image is
/// `x · H_p(X)` where `X` is the output's public key as the rest of the
/// network sees it.
pub fn derive_key_image(
    spend_public_key: &PublicKey,
    spend_secret_key: &SecretKey,
    view_secret_key: &SecretKey,
    tx_public_key: &PublicKey,
    output_index: u64,
) -> Result<KeyImage, Error> {
    let derivation =
        Derivation::from(view_secret_key, tx_public_key).ok_or(Error::KeyDerivationFailed)?;

    let output_scalar = derivation.to_scalar(output_index);
    let output_secret_key = output_scalar + spend_secret_key;
    let output_public_key = &output_scalar * &BASEPOINT_TABLE + spend_public_key;

    Ok(output_secret_key
        * hash_to_point(CNFastHash::digest(
            output_public_key.compress().as_bytes(),
        )))
}
