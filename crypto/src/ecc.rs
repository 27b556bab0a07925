//! Ed25519 scalar and point plumbing
//!
//! Re-exports the `curve25519-dalek` types under the names the rest of the
//! workspace uses, plus the two hash-to-group mappings the protocol needs.

use clear_on_drop::ClearOnDrop;

use crate::{CNFastHash, Digest};

pub use curve25519_dalek::constants::ED25519_BASEPOINT_COMPRESSED as BASEPOINT_COMPRESSED;
pub use curve25519_dalek::constants::ED25519_BASEPOINT_POINT as BASEPOINT;
pub use curve25519_dalek::constants::ED25519_BASEPOINT_TABLE as BASEPOINT_TABLE;
pub use curve25519_dalek::edwards::CompressedEdwardsY as CompressedPoint;
pub use curve25519_dalek::edwards::EdwardsPoint as Point;
pub use curve25519_dalek::scalar::Scalar;

/// Helper extension trait for `Scalar`
pub trait ScalarExt {
    /// Builds a `Scalar` from a 32-byte slice, reducing mod the group order
    fn from_slice(data: &[u8]) -> Scalar {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(data);
        Scalar::from_bytes_mod_order(buf)
    }

    /// Parses a `Scalar` from a 64-character hex string
    ///
    /// The intermediate decode buffer is wiped on return, since this is the
    /// path secret material takes across the hex boundary.
    fn from_hex(data: &str) -> Result<Scalar, hex::FromHexError> {
        if data.len() != 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        let decoded = ClearOnDrop::new(hex::decode(data)?);
        Ok(Scalar::from_slice(&decoded))
    }
}

impl ScalarExt for Scalar {}

/// Parses a compressed point from a 64-character hex string
///
/// Only the encoding is checked here. Callers that need to do arithmetic on
/// the point must `decompress()` and handle rejection themselves.
pub fn point_from_hex(data: &str) -> Result<CompressedPoint, hex::FromHexError> {
    if data.len() != 64 {
        return Err(hex::FromHexError::InvalidStringLength);
    }
    Ok(CompressedPoint::from_slice(&hex::decode(data)?))
}

/// Reduces a 32-byte hash to a `Scalar`
pub fn hash_to_scalar(hash: crate::Hash256Data) -> Scalar {
    Scalar::from_slice(&hash)
}

/// Maps a 32-byte hash to a torsion-free point on the curve
///
/// Decompress-and-retry: the hash is reinterpreted as a compressed point and
/// rehashed until it lands on the curve, then the cofactor is cleared. The
/// loop terminates after two iterations on average.
pub fn hash_to_point(hash: crate::Hash256Data) -> Point {
    let mut candidate = CNFastHash::digest(&hash);
    loop {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(&candidate);
        if let Some(point) = CompressedPoint(buf).decompress() {
            return point.mul_by_cofactor();
        }
        candidate = CNFastHash::digest(&candidate);
    }
}
