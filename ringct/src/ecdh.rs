//! ECDH hiding of amounts and masks
//!
//! Both halves of the tuple are blinded by scalars derived from the shared
//! secret: `Hs(secret)` for the mask and `Hs(Hs(secret))` for the amount.
//! Encoding and decoding are exact inverses in the scalar group.

use serde::{Deserialize, Serialize};

use crypto::{ecc::hash_to_scalar, CNFastHash, Digest, SecretKey};

/// The encrypted (or decrypted) mask/amount pair attached to an output
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EcdhTuple {
    /// Blinding mask
    pub mask: SecretKey,
    /// Amount, as a scalar
    pub amount: SecretKey,
}

fn shared_scalars(shared_secret: &SecretKey) -> (SecretKey, SecretKey) {
    let first = hash_to_scalar(CNFastHash::digest(shared_secret.as_bytes()));
    let second = hash_to_scalar(CNFastHash::digest(first.as_bytes()));
    (first, second)
}

/// Encrypts the tuple in place under the given shared secret
pub fn ecdh_encode(tuple: &mut EcdhTuple, shared_secret: &SecretKey) {
    let (mask_key, amount_key) = shared_scalars(shared_secret);
    tuple.mask += mask_key;
    tuple.amount += amount_key;
}

/// Decrypts the tuple in place under the given shared secret
pub fn ecdh_decode(tuple: &mut EcdhTuple, shared_secret: &SecretKey) {
    let (mask_key, amount_key) = shared_scalars(shared_secret);
    tuple.mask -= mask_key;
    tuple.amount -= amount_key;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto::ecc::Scalar;

    #[test]
    fn encode_then_decode_is_identity() {
        let shared_secret = Scalar::random(&mut rand::rngs::OsRng);
        let mask = Scalar::random(&mut rand::rngs::OsRng);

        let mut tuple = EcdhTuple {
            mask,
            amount: Scalar::from(1_000_000u64),
        };
        ecdh_encode(&mut tuple, &shared_secret);
        assert_ne!(tuple.mask, mask);

        ecdh_decode(&mut tuple, &shared_secret);
        assert_eq!(tuple.mask, mask);
        assert_eq!(tuple.amount, Scalar::from(1_000_000u64));
    }

    #[test]
    fn decoding_under_the_wrong_secret_garbles() {
        let mut tuple = EcdhTuple {
            mask: Scalar::from(7u64),
            amount: Scalar::from(42u64),
        };
        ecdh_encode(&mut tuple, &Scalar::from(1u64));
        ecdh_decode(&mut tuple, &Scalar::from(2u64));
        assert_ne!(tuple.amount, Scalar::from(42u64));
    }
}
