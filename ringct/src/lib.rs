#![deny(missing_docs)]
//! Ring confidential transaction data handled client-side
//!
//! The wallet never produces ring signatures itself (that is the signer's
//! job), but it does need the commitment arithmetic and the ECDH amount
//! hiding scheme: recovering blinding masks for outputs it owns and
//! reconstructing commitments for ring members.

use lazy_static::lazy_static;

use crypto::{
    ecc::{hash_to_point, Point, BASEPOINT_COMPRESSED},
    CNFastHash, Digest,
};

mod commitment;
mod decode;
mod ecdh;

pub use commitment::Commitment;
pub use decode::{decode, DecodedOutput, Error, RctSignature, RctType};
pub use ecdh::{ecdh_decode, ecdh_encode, EcdhTuple};

lazy_static! {
    /// The second Pedersen basepoint `H`, derived from the curve basepoint
    /// by hashing to the curve
    pub static ref MASK_BASEPOINT: Point =
        hash_to_point(CNFastHash::digest(BASEPOINT_COMPRESSED.as_bytes()));
}
