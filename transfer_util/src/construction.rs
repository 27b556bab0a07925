//! Source/destination assembly and the balance-checked build
//!
//! This is the last stop before the signer: every input is turned into a
//! ring-bearing source, every hex key is validated, and the books must
//! balance exactly — the surplus of inputs over outputs has to equal the
//! fee the caller computed earlier, or the build is refused.

use ensure_macro::ensure;

use crypto::ecc::{self, Scalar};

use crate::{
    confidential,
    error::Error,
    fee,
    fork::{self, ForkRules},
    ring,
    signer::{SignedTransaction, SigningRequest, TransactionSigner},
    AccountKeys, DecoyPool, Destination, SpendableOutput, TxSource,
};

/// Builds and signs a transaction spending `spend_outputs` towards
/// `destinations`
///
/// `destinations` must already include any change entry; the declared
/// `fee` is checked against the input surplus, not taken on trust. With a
/// `ring_size` above 1, one decoy pool per spent output is required.
/// `size_limit_override` replaces the fork-derived byte ceiling when
/// non-zero.
///
/// Validation failures are reported in a fixed order, and nothing is
/// handed to the signer until every check has passed.
#[allow(clippy::too_many_arguments)]
pub fn create_transaction<R, S>(
    account: &AccountKeys,
    destinations: &[Destination],
    spend_outputs: &[SpendableOutput],
    decoy_pools: &[DecoyPool],
    fee: u64,
    extra: &[u8],
    ring_size: u32,
    rules: &R,
    unlock_time: u64,
    signer: &S,
    size_limit_override: u64,
) -> Result<SignedTransaction, Error>
where
    R: ForkRules + ?Sized,
    S: TransactionSigner + ?Sized,
{
    let mixin = ring_size.saturating_sub(1) as usize;
    let bulletproof = rules.use_fork_rules(fork::bulletproof_fork_version(), 0);

    ensure!(!destinations.is_empty(), Error::NoDestinations);
    if mixin > 0 {
        ensure!(
            decoy_pools.len() == spend_outputs.len(),
            Error::DecoyPoolCountMismatch
        );
        for pool in decoy_pools {
            ensure!(pool.outputs.len() >= mixin, Error::InsufficientDecoys);
        }
    }
    ensure!(account.verify_keys(), Error::InvalidSecretKeys);

    let mut needed_money: u64 = 0;
    for destination in destinations {
        needed_money = needed_money
            .checked_add(destination.amount)
            .ok_or(Error::OutputAmountOverflow)?;
    }

    let mut found_money: u64 = 0;
    let mut sources = Vec::with_capacity(spend_outputs.len());
    for (output_index, output) in spend_outputs.iter().enumerate() {
        found_money = found_money
            .checked_add(output.amount)
            .ok_or(Error::InputAmountOverflow)?;

        let decoys: &[_] = if mixin > 0 {
            &decoy_pools[output_index].outputs
        } else {
            &[]
        };
        let (ring, real_index) = ring::assemble_ring(output, decoys, ring_size)?;

        let tx_public_key = ecc::point_from_hex(&output.tx_public_key)
            .map_err(|_| Error::InvalidPublicKey)?
            .decompress()
            .ok_or(Error::KeyDerivationFailed)?;

        let real_commitment_mask = confidential::recover_mask(
            output.confidential.as_ref(),
            &account.view_secret_key,
            &tx_public_key,
            output.local_index,
        )?
        .unwrap_or_else(Scalar::one);

        sources.push(TxSource {
            amount: output.amount,
            is_confidential: output.confidential.is_some(),
            ring,
            real_index,
            real_output_local_index: output.local_index,
            real_commitment_mask,
            owning_tx_public_key: tx_public_key,
        });
    }

    if found_money > needed_money {
        let surplus = found_money - needed_money;
        ensure!(
            surplus == fee,
            Error::FeeMismatch {
                declared: fee,
                surplus,
            }
        );
    } else if found_money < needed_money {
        return Err(Error::InsufficientFunds {
            available: found_money,
            required: needed_money,
        });
    }

    log::debug!(
        "built {} sources spending {} towards {} destinations plus fee {}",
        sources.len(),
        found_money,
        destinations.len(),
        fee
    );

    let signed = signer.sign_transaction(&SigningRequest {
        sources: &sources,
        destinations,
        fee,
        extra,
        unlock_time,
        use_bulletproofs: bulletproof,
    })?;

    let size_limit = fee::upper_transaction_size_limit(size_limit_override, rules);
    ensure!(
        (signed.blob.len() as u64) < size_limit,
        Error::TransactionTooLarge
    );

    Ok(signed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fork::hardcoded_lightwallet_rules;
    use crate::test_support::{
        confidential_decoys, confidential_spendable_output, plain_decoys, plain_output,
        test_account, test_destination, EstimateSigner, RefusingSigner,
    };
    use crate::signer::SigningError;


    fn build(
        destinations: &[Destination],
        outputs: &[SpendableOutput],
        pools: &[DecoyPool],
        fee: u64,
        ring_size: u32,
    ) -> Result<SignedTransaction, Error> {
        create_transaction(
            &test_account(),
            destinations,
            outputs,
            pools,
            fee,
            &[],
            ring_size,
            &hardcoded_lightwallet_rules,
            0,
            &EstimateSigner::default(),
            0,
        )
    }

    #[test]
    fn it_spends_a_plain_output_with_exact_change() {
        // One 1000 input, one 900 destination, fee 100, no decoys
        let signed = build(
            &[test_destination(900)],
            &[plain_output(1000, 40)],
            &[],
            100,
            1,
        )
        .unwrap();
        assert!(!signed.blob.is_empty());
    }

    #[test]
    fn it_rejects_a_surplus_that_is_not_the_fee() {
        // Surplus of 50 against a declared fee of 100
        let result = build(
            &[test_destination(950)],
            &[plain_output(1000, 40)],
            &[],
            100,
            1,
        );
        assert_eq!(
            result.unwrap_err(),
            Error::FeeMismatch {
                declared: 100,
                surplus: 50
            }
        );
    }

    #[test]
    fn it_rejects_overspending() {
        let result = build(
            &[test_destination(1200)],
            &[plain_output(1000, 40)],
            &[],
            100,
            1,
        );
        assert_eq!(
            result.unwrap_err(),
            Error::InsufficientFunds {
                available: 1000,
                required: 1200
            }
        );
    }

    #[test]
    fn perturbing_either_side_breaks_conservation() {
        let outputs = [plain_output(1000, 40)];
        assert!(build(&[test_destination(900)], &outputs, &[], 100, 1).is_ok());
        assert!(matches!(
            build(&[test_destination(901)], &outputs, &[], 100, 1),
            Err(Error::FeeMismatch { .. })
        ));
        assert!(matches!(
            build(&[test_destination(900)], &outputs, &[], 101, 1),
            Err(Error::FeeMismatch { .. })
        ));
    }

    #[test]
    fn it_requires_destinations() {
        assert_eq!(
            build(&[], &[plain_output(1000, 40)], &[], 100, 1).unwrap_err(),
            Error::NoDestinations
        );
    }

    #[test]
    fn it_requires_one_pool_per_output() {
        let result = build(
            &[test_destination(900)],
            &[plain_output(1000, 40)],
            &[],
            100,
            7,
        );
        assert_eq!(result.unwrap_err(), Error::DecoyPoolCountMismatch);
    }

    #[test]
    fn it_rejects_short_decoy_pools_before_touching_keys() {
        // Five decoys for a ring of seven
        let result = build(
            &[test_destination(900)],
            &[plain_output(1000, 40)],
            &[plain_decoys(&[10, 20, 30, 50, 60])],
            100,
            7,
        );
        assert_eq!(result.unwrap_err(), Error::InsufficientDecoys);
    }

    #[test]
    fn it_builds_full_rings_from_pools() {
        let signed = build(
            &[test_destination(900)],
            &[plain_output(1000, 40)],
            &[plain_decoys(&[10, 20, 30, 50, 60, 70])],
            100,
            7,
        );
        assert!(signed.is_ok());
    }

    #[test]
    fn it_rejects_mismatched_secret_keys() {
        let mut account = test_account();
        account.view_secret_key = Scalar::from(999u64);
        let result = create_transaction(
            &account,
            &[test_destination(900)],
            &[plain_output(1000, 40)],
            &[],
            100,
            &[],
            1,
            &hardcoded_lightwallet_rules,
            0,
            &EstimateSigner::default(),
            0,
        );
        assert_eq!(result.unwrap_err(), Error::InvalidSecretKeys);
    }

    #[test]
    fn it_rejects_overflowing_amounts() {
        let destinations = [
            test_destination(u64::max_value()),
            test_destination(u64::max_value()),
        ];
        assert_eq!(
            build(&destinations, &[plain_output(1000, 40)], &[], 0, 1).unwrap_err(),
            Error::OutputAmountOverflow
        );

        let outputs = [
            plain_output(u64::max_value(), 40),
            plain_output(u64::max_value(), 41),
        ];
        assert_eq!(
            build(&[test_destination(900)], &outputs, &[], 0, 1).unwrap_err(),
            Error::InputAmountOverflow
        );
    }

    #[test]
    fn it_validates_output_keys() {
        let mut output = plain_output(1000, 40);
        output.public_key = "deadbeef".into();
        assert_eq!(
            build(&[test_destination(900)], &[output], &[], 100, 1).unwrap_err(),
            Error::InvalidPublicKey
        );

        let mut output = plain_output(1000, 40);
        output.tx_public_key = "xyz".into();
        assert_eq!(
            build(&[test_destination(900)], &[output], &[], 100, 1).unwrap_err(),
            Error::InvalidPublicKey
        );
    }

    #[test]
    fn it_spends_confidential_outputs() {
        let (output, _mask) = confidential_spendable_output(1000, 40, &test_account());
        let pools = [confidential_decoys(&[10, 20, 30, 50, 60, 70])];
        let signed = create_transaction(
            &test_account(),
            &[test_destination(900)],
            &[output],
            &pools,
            100,
            &[],
            7,
            &hardcoded_lightwallet_rules,
            0,
            &EstimateSigner::default(),
            0,
        );
        assert!(signed.is_ok());
    }

    #[test]
    fn truncated_real_blobs_are_refused() {
        let (mut output, _) = confidential_spendable_output(1000, 40, &test_account());
        output.confidential = Some(crate::ConfidentialData::new("ab".repeat(40)));
        let pools = [confidential_decoys(&[10, 20, 30, 50, 60, 70])];
        let result = create_transaction(
            &test_account(),
            &[test_destination(900)],
            &[output],
            &pools,
            100,
            &[],
            7,
            &hardcoded_lightwallet_rules,
            0,
            &EstimateSigner::default(),
            0,
        );
        assert_eq!(result.unwrap_err(), Error::MissingConfidentialCommitment);
    }

    #[test]
    fn signer_failures_surface_as_errors() {
        let result = create_transaction(
            &test_account(),
            &[test_destination(900)],
            &[plain_output(1000, 40)],
            &[],
            100,
            &[],
            1,
            &hardcoded_lightwallet_rules,
            0,
            &RefusingSigner,
            0,
        );
        assert_eq!(
            result.unwrap_err(),
            Error::SigningFailed(SigningError("refused".into()))
        );
    }

    #[test]
    fn oversized_transactions_are_rejected() {
        let result = create_transaction(
            &test_account(),
            &[test_destination(900)],
            &[plain_output(1000, 40)],
            &[],
            100,
            &[],
            1,
            &hardcoded_lightwallet_rules,
            0,
            &EstimateSigner::default(),
            100,
        );
        assert_eq!(result.unwrap_err(), Error::TransactionTooLarge);
    }
}
