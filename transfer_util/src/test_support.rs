//! Shared fixtures: deterministic accounts, outputs, decoy pools and stub
//! signers

use crypto::{
    ecc::{Scalar, BASEPOINT_TABLE},
    CNFastHash, Digest, Hash256, KeyPair, PublicKey,
};
use ringct::{ecdh_encode, Commitment, EcdhTuple};

use crate::{
    address::{AccountKeys, Address, AddressKind},
    derivation::Derivation,
    fee,
    signer::{SignedTransaction, SigningError, SigningRequest, TransactionSigner},
    ConfidentialData, DecoyOutput, DecoyPool, Destination, SpendableOutput,
};

pub(crate) fn test_account() -> AccountKeys {
    AccountKeys::from_secret_keys(Scalar::from(3u64), Scalar::from(5u64))
}

fn point_hex(seed: u64) -> String {
    hex::encode(
        (&Scalar::from(seed) * &BASEPOINT_TABLE)
            .compress()
            .to_bytes(),
    )
}

pub(crate) fn plain_output(amount: u64, global_index: u64) -> SpendableOutput {
    SpendableOutput {
        amount,
        public_key: point_hex(global_index + 1000),
        confidential: None,
        global_index,
        local_index: 0,
        tx_public_key: point_hex(global_index + 2000),
    }
}

pub(crate) fn plain_decoys(indices: &[u64]) -> DecoyPool {
    DecoyPool {
        amount: 0,
        outputs: indices
            .iter()
            .map(|&global_index| DecoyOutput {
                global_index,
                public_key: point_hex(global_index + 3000),
                confidential: None,
            })
            .collect(),
    }
}

pub(crate) fn confidential_decoys(indices: &[u64]) -> DecoyPool {
    DecoyPool {
        amount: 0,
        outputs: indices
            .iter()
            .map(|&global_index| DecoyOutput {
                global_index,
                public_key: point_hex(global_index + 3000),
                confidential: Some(ConfidentialData::new(format!(
                    "{}{}{}",
                    hex::encode(
                        Commitment::commit_to_value(1)
                            .to_public()
                            .compress()
                            .to_bytes()
                    ),
                    "00".repeat(32),
                    "00".repeat(32),
                ))),
            })
            .collect(),
    }
}

/// Packs a commitment ‖ encrypted-mask ‖ encrypted-amount blob the way the
/// server would, for an output readable by `view_secret`
pub(crate) fn confidential_blob(
    amount: u64,
    mask: Scalar,
    view_secret: &Scalar,
    tx_public_key: &PublicKey,
    output_index: u64,
) -> ConfidentialData {
    let output_scalar = Derivation::from(view_secret, tx_public_key)
        .unwrap()
        .to_scalar(output_index);

    let mut tuple = EcdhTuple {
        mask,
        amount: Scalar::from(amount),
    };
    ecdh_encode(&mut tuple, &output_scalar);

    let commitment = Commitment {
        value: Scalar::from(amount),
        mask,
    };
    ConfidentialData::new(format!(
        "{}{}{}",
        hex::encode(commitment.to_public().compress().to_bytes()),
        hex::encode(tuple.mask.to_bytes()),
        hex::encode(tuple.amount.to_bytes()),
    ))
}

pub(crate) fn confidential_spendable_output(
    amount: u64,
    global_index: u64,
    account: &AccountKeys,
) -> (SpendableOutput, Scalar) {
    let tx_keypair = KeyPair::from(Scalar::from(global_index + 5000));
    let mask = Scalar::from(global_index + 7000);
    let blob = confidential_blob(
        amount,
        mask,
        &account.view_secret_key,
        &tx_keypair.public_key,
        0,
    );

    let output = SpendableOutput {
        amount,
        public_key: point_hex(global_index + 1000),
        confidential: Some(blob),
        global_index,
        local_index: 0,
        tx_public_key: hex::encode(tx_keypair.public_key.compress().to_bytes()),
    };
    (output, mask)
}

pub(crate) fn test_destination(amount: u64) -> Destination {
    Destination {
        address: Address::standard(
            &Scalar::from(101u64) * &BASEPOINT_TABLE,
            &Scalar::from(102u64) * &BASEPOINT_TABLE,
        ),
        amount,
    }
}

pub(crate) fn subaddress_destination() -> Destination {
    let mut destination = test_destination(0);
    destination.address.kind = AddressKind::Subaddress;
    destination
}

/// A signer that produces a blob of exactly the estimator's size (plus an
/// optional pad), so fee and size checks behave like the real pipeline
#[derive(Default)]
pub(crate) struct EstimateSigner {
    pub extra_bytes: usize,
}

impl TransactionSigner for EstimateSigner {
    fn sign_transaction(
        &self,
        request: &SigningRequest<'_>,
    ) -> Result<SignedTransaction, SigningError> {
        let mixin = request
            .sources
            .first()
            .map(|source| source.ring.len() as u32 - 1)
            .unwrap_or(0);
        let size = fee::estimate_rct_tx_size(
            request.sources.len(),
            mixin,
            request.destinations.len() + 1,
            request.extra.len(),
            request.use_bulletproofs,
        ) + self.extra_bytes;

        let blob = vec![0u8; size];
        let keypair = KeyPair::from(Scalar::from(424_242u64));
        Ok(SignedTransaction {
            tx_hash: Hash256::from(CNFastHash::digest(&blob)),
            blob,
            tx_secret_key: keypair.secret_key,
            tx_public_key: keypair.public_key,
        })
    }
}

/// A signer that always fails
pub(crate) struct RefusingSigner;

impl TransactionSigner for RefusingSigner {
    fn sign_transaction(
        &self,
        _request: &SigningRequest<'_>,
    ) -> Result<SignedTransaction, SigningError> {
        Err(SigningError("refused".into()))
    }
}
