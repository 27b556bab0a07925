//! Key types built on the curve primitives

use serde::{Deserialize, Serialize};

use crate::ecc::{Point, Scalar, BASEPOINT_TABLE};

/// A 256-bit scalar used as a private key
pub type SecretKey = Scalar;

/// A point on the curve, usually a scalar multiple of the basepoint
pub type PublicKey = Point;

/// The double-spend tag of a spent output
pub type KeyImage = PublicKey;

/// A secret key together with its public counterpart
#[derive(Clone, Serialize, Deserialize)]
pub struct KeyPair {
    /// The secret key
    pub secret_key: SecretKey,
    /// The public key
    pub public_key: PublicKey,
}

impl KeyPair {
    /// Generates a random keypair using the OS CSPRNG
    pub fn generate() -> Self {
        Self::from(Scalar::random(&mut rand::rngs::OsRng))
    }
}

impl From<Scalar> for KeyPair {
    fn from(secret_key: SecretKey) -> Self {
        KeyPair {
            public_key: &secret_key * &BASEPOINT_TABLE,
            secret_key,
        }
    }
}
