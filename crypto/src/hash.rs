//! Keccak hashing and fixed-size hash containers

use std::convert::TryFrom;
use std::fmt::{Display, Formatter};

use digest::Digest;
use serde::{Deserialize, Serialize};
use sha3::Keccak256Full;

/// Raw bytes of a 256-bit hash
pub type Hash256Data = generic_array::GenericArray<u8, generic_array::typenum::U32>;

/// Raw bytes of a 64-bit hash (payment IDs)
pub type Hash8Data = generic_array::GenericArray<u8, generic_array::typenum::U8>;

/// A 256-bit hash value
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Hash256(Hash256Data);

impl Hash256 {
    /// The all-zero hash
    pub fn null_hash() -> Self {
        Hash256(Hash256Data::default())
    }

    /// Borrows the underlying bytes
    pub fn data(&self) -> &Hash256Data {
        &self.0
    }
}

impl Display for Hash256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<Hash256Data> for Hash256 {
    fn from(data: Hash256Data) -> Self {
        Hash256(data)
    }
}

impl TryFrom<&str> for Hash256 {
    type Error = hex::FromHexError;
    fn try_from(data: &str) -> Result<Self, Self::Error> {
        if data.len() != 64 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        Ok(Hash256(Hash256Data::clone_from_slice(&hex::decode(data)?)))
    }
}

/// A 64-bit hash value, used as a short payment ID
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Hash8(Hash8Data);

impl Hash8 {
    /// Borrows the underlying bytes
    pub fn data(&self) -> &Hash8Data {
        &self.0
    }
}

impl Display for Hash8 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl From<Hash8Data> for Hash8 {
    fn from(data: Hash8Data) -> Self {
        Hash8(data)
    }
}

impl TryFrom<&str> for Hash8 {
    type Error = hex::FromHexError;
    fn try_from(data: &str) -> Result<Self, Self::Error> {
        if data.len() != 16 {
            return Err(hex::FromHexError::InvalidStringLength);
        }
        Ok(Hash8(Hash8Data::clone_from_slice(&hex::decode(data)?)))
    }
}

/// The protocol's fast hash (Keccak-256, pre-NIST padding)
pub struct CNFastHash {
    hasher: Keccak256Full,
}

impl Digest for CNFastHash {
    type OutputSize = digest::generic_array::typenum::U32;

    fn new() -> Self {
        CNFastHash {
            hasher: Keccak256Full::new(),
        }
    }
    fn input<B: AsRef<[u8]>>(&mut self, data: B) {
        self.hasher.input(data);
    }
    fn chain<B: AsRef<[u8]>>(self, data: B) -> Self {
        CNFastHash {
            hasher: self.hasher.chain(data),
        }
    }
    fn result(self) -> Hash256Data {
        *Hash256Data::from_slice(&self.hasher.result()[..32])
    }
    fn result_reset(&mut self) -> Hash256Data {
        *Hash256Data::from_slice(&self.hasher.result_reset()[..32])
    }
    fn reset(&mut self) {
        self.hasher.reset()
    }
    fn digest(data: &[u8]) -> Hash256Data {
        *Hash256Data::from_slice(&Keccak256Full::digest(data)[..32])
    }
    fn output_size() -> usize {
        32
    }
}
