use crypto::{
    ecc::{hash_to_scalar, Point, Scalar},
    CNFastHash, Digest, PublicKey,
};

/// The Diffie–Hellman style shared secret `8 · (secret · Public)`
///
/// Sender and receiver arrive at the same point from opposite key halves,
/// which is what lets a view key recognize and decrypt outputs.
pub struct Derivation(Point);

impl Derivation {
    /// Derives the shared secret from a secret and a public key
    ///
    /// Rejects non-canonical scalars rather than silently reducing them.
    pub fn from(secret: &Scalar, public_key: &PublicKey) -> Option<Self> {
        if !secret.is_canonical() {
            return None;
        }

        Some(Derivation((secret * public_key).mul_by_cofactor()))
    }

    /// Expands the derivation into the per-output scalar
    /// `H_s(derivation ‖ output_index)`
    pub fn to_scalar(&self, output_index: u64) -> Scalar {
        let mut hasher = CNFastHash::new();
        hasher.input(self.0.compress().as_bytes());
        hasher.input(varint::serialize(output_index));

        hash_to_scalar(hasher.result())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto::ecc::BASEPOINT_TABLE;

    #[test]
    fn both_sides_derive_the_same_secret() {
        // Receiver: view secret a against tx public key R = rG
        // Sender: tx secret r against view public key A = aG
        let a = Scalar::from(11u64);
        let r = Scalar::from(22u64);

        let receiver = Derivation::from(&a, &(&r * &BASEPOINT_TABLE)).unwrap();
        let sender = Derivation::from(&r, &(&a * &BASEPOINT_TABLE)).unwrap();

        assert_eq!(receiver.to_scalar(0), sender.to_scalar(0));
        assert_ne!(receiver.to_scalar(0), receiver.to_scalar(1));
    }

    #[test]
    fn non_canonical_scalars_are_rejected() {
        let non_canonical = Scalar::from_bits([0xff; 32]);
        assert!(Derivation::from(&non_canonical, &(&Scalar::one() * &BASEPOINT_TABLE)).is_none());
    }
}
