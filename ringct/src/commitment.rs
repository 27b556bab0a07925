//! Pedersen commitments `C = xG + aH`

use serde::{Deserialize, Serialize};

use crypto::{
    curve25519_dalek::traits::MultiscalarMul,
    ecc::{Point, BASEPOINT},
    SecretKey,
};

use crate::MASK_BASEPOINT;

/// An opened commitment to an amount
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Commitment {
    /// The committed amount `a`, as a scalar
    pub value: SecretKey,
    /// The blinding factor `x`
    pub mask: SecretKey,
}

impl Commitment {
    /// Commits to the given amount under a random blinding factor
    pub fn commit_to_value(amount: u64) -> Commitment {
        Commitment {
            value: SecretKey::from(amount),
            mask: SecretKey::random(&mut rand::rngs::OsRng),
        }
    }

    /// The deterministic commitment used for outputs whose amount is public
    ///
    /// Plain outputs commit with the identity mask so that every observer
    /// can reconstruct the same point from the cleartext amount.
    pub fn zero(amount: u64) -> Commitment {
        Commitment {
            value: SecretKey::from(amount),
            mask: SecretKey::one(),
        }
    }

    /// Computes the commitment point `xG + aH`
    pub fn to_public(&self) -> Point {
        Point::multiscalar_mul(&[self.mask, self.value], &[BASEPOINT, *MASK_BASEPOINT])
    }
}
