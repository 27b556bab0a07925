//! Minimal address and account-key records
//!
//! Base58 encoding, mnemonics and seed handling live outside this crate;
//! the builder only needs the public key pair behind an address, which
//! flavor of address it is, and a way to check that the caller's secret
//! keys actually belong to the account they claim to spend from.

use crypto::{ecc::BASEPOINT_TABLE, Hash8, PublicKey, SecretKey};

/// The flavor of a destination address
#[derive(Clone, Debug, PartialEq)]
pub enum AddressKind {
    /// A plain account address
    Standard,
    /// A subaddress
    Subaddress,
    /// A standard address with an embedded short payment ID
    Integrated(Hash8),
}

/// The key material behind a parsed address
#[derive(Clone, Debug, PartialEq)]
pub struct Address {
    /// Public spend key
    pub spend_public_key: PublicKey,
    /// Public view key
    pub view_public_key: PublicKey,
    /// Address flavor
    pub kind: AddressKind,
}

impl Address {
    /// A standard address over the given keys
    pub fn standard(spend_public_key: PublicKey, view_public_key: PublicKey) -> Self {
        Address {
            spend_public_key,
            view_public_key,
            kind: AddressKind::Standard,
        }
    }
}

/// The sender's address together with its secret keys
#[derive(Clone)]
pub struct AccountKeys {
    /// The account's own address
    pub address: Address,
    /// Secret spend key
    pub spend_secret_key: SecretKey,
    /// Secret view key
    pub view_secret_key: SecretKey,
}

impl AccountKeys {
    /// Builds an account whose address is derived from the secret keys
    pub fn from_secret_keys(spend_secret_key: SecretKey, view_secret_key: SecretKey) -> Self {
        AccountKeys {
            address: Address::standard(
                &spend_secret_key * &BASEPOINT_TABLE,
                &view_secret_key * &BASEPOINT_TABLE,
            ),
            spend_secret_key,
            view_secret_key,
        }
    }

    /// Checks that both secret keys reproduce the address's public keys
    pub fn verify_keys(&self) -> bool {
        &self.spend_secret_key * &BASEPOINT_TABLE == self.address.spend_public_key
            && &self.view_secret_key * &BASEPOINT_TABLE == self.address.view_public_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto::ecc::Scalar;

    #[test]
    fn derived_accounts_verify() {
        let account = AccountKeys::from_secret_keys(Scalar::from(7u64), Scalar::from(8u64));
        assert!(account.verify_keys());
    }

    #[test]
    fn key_substitution_is_detected() {
        let mut account = AccountKeys::from_secret_keys(Scalar::from(7u64), Scalar::from(8u64));
        account.spend_secret_key = Scalar::from(9u64);
        assert!(!account.verify_keys());
    }
}
