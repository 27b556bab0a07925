#![deny(missing_docs)]
//! Curve and hash primitives shared by the wallet core
//!
//! Everything here is a thin layer over `curve25519-dalek` and Keccak. The
//! wallet's protocol logic lives in `transfer_util`; this crate only knows
//! about scalars, points and hashes.

pub mod ecc;
mod hash;
mod keys;

pub use curve25519_dalek;
pub use digest::Digest;

pub use ecc::ScalarExt;
pub use hash::{CNFastHash, Hash256, Hash256Data, Hash8, Hash8Data};
pub use keys::{KeyImage, KeyPair, PublicKey, SecretKey};
