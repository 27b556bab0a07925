//! Fee policy tied to the network's fork history
//!
//! Fees are priced per kilobyte of serialized transaction, scaled by a
//! priority multiplier whose table changed across forks. The byte-size
//! estimators reproduce the serialized layout field by field so that
//! upfront estimates track real blob sizes; the bulletproof constant is
//! kept in its original `(2*6+4+5)*32+3` form, since the resulting fees
//! must match what the rest of the network computes.

use ensure_macro::ensure;

use crate::{config, error::Error, fork};
use crate::fork::ForkRules;

/// The ring size every transaction uses
pub fn fixed_ring_size() -> u32 {
    7
}

/// Decoys per ring under the fixed ring size
pub fn fixed_mixin_count() -> u32 {
    fixed_ring_size() - 1
}

/// Priority used when the caller passes 0
pub fn default_priority() -> u32 {
    1
}

/// The fee algorithm version in force under the given rules
///
/// Version 1 activated with protocol v3 (two weeks early), version 2 with
/// protocol v5.
pub fn fee_algorithm<R: ForkRules + ?Sized>(rules: &R) -> u8 {
    if rules.use_fork_rules(5, 0) {
        2
    } else if rules.use_fork_rules(3, -720 * 14) {
        1
    } else {
        0
    }
}

/// Looks up the fee multiplier for a priority level
///
/// Priority 0 falls through to `default_priority`, then to the algorithm's
/// own default (1 before algorithm 2, 2 from it). Anything outside the
/// algorithm's 1..=3 or 1..=4 range is rejected rather than clamped.
pub fn fee_multiplier(priority: u32, default_priority: u32, algorithm: u8) -> Result<u64, Error> {
    const OLD_MULTIPLIERS: [u64; 3] = [1, 2, 3];
    const NEW_MULTIPLIERS: [u64; 3] = [1, 20, 166];
    const NEWER_MULTIPLIERS: [u64; 4] = [1, 4, 20, 166];

    let mut priority = if priority == 0 { default_priority } else { priority };
    if priority == 0 {
        priority = if algorithm >= 2 { 2 } else { 1 };
    }

    let max_priority = if algorithm >= 2 { 4 } else { 3 };
    ensure!(
        priority >= 1 && priority <= max_priority,
        Error::InvalidPriority
    );

    let index = (priority - 1) as usize;
    match algorithm {
        0 => Ok(OLD_MULTIPLIERS[index]),
        1 => Ok(NEW_MULTIPLIERS[index]),
        2 => Ok(NEWER_MULTIPLIERS[index]),
        _ => Err(Error::InvalidPriority),
    }
}

/// Estimates the serialized size of a confidential transaction
pub fn estimate_rct_tx_size(
    n_inputs: usize,
    mixin: u32,
    n_outputs: usize,
    extra_size: usize,
    bulletproof: bool,
) -> usize {
    let ring_size = mixin as usize + 1;
    let mut size = 0;

    // tx prefix: version, unlock time, counts
    size += 1 + 6;
    // vin: key offsets and key image per input
    size += n_inputs * (1 + 6 + ring_size * 2 + 32);
    // vout
    size += n_outputs * (6 + 32);
    size += extra_size;

    // rct signature type tag
    size += 1;
    // range proofs
    size += if bulletproof {
        ((2 * 6 + 4 + 5) * 32 + 3) * n_outputs
    } else {
        (2 * 64 * 32 + 32 + 64 * 32) * n_outputs
    };
    // MLSAGs
    size += n_inputs * (64 * ring_size + 32);
    // mix ring is reconstructed by verifiers, not serialized
    // pseudo-output commitments
    size += 32 * n_inputs;
    // ecdh info
    size += 2 * 32 * n_outputs;
    // output commitments
    size += 32 * n_outputs;
    // fee field
    size += 4;

    size
}

/// Estimates the serialized size of a transaction of either kind
///
/// Confidential transactions get an implicit extra output for the change;
/// legacy transactions are priced at a flat per-ring-member byte cost.
pub fn estimate_tx_size(
    use_rct: bool,
    n_inputs: usize,
    mixin: u32,
    n_outputs: usize,
    extra_size: usize,
    bulletproof: bool,
) -> usize {
    if use_rct {
        estimate_rct_tx_size(n_inputs, mixin, n_outputs + 1, extra_size, bulletproof)
    } else {
        n_inputs * (mixin as usize + 1) * config::APPROXIMATE_INPUT_BYTES + extra_size
    }
}

/// Computes the fee for a transaction of the given byte size
///
/// Sizes round up to whole kilobytes, never down.
pub fn calculate_fee(fee_per_kb: u64, byte_size: usize, fee_multiplier: u64) -> u64 {
    let kilobytes = (byte_size as u64 + 1023) / 1024;
    kilobytes * fee_per_kb * fee_multiplier
}

/// A conservative upfront fee estimate, before the transaction's real
/// shape is known
///
/// Uses a fixed reference shape of two inputs, two outputs, the fixed ring
/// size and no extra bytes.
pub fn estimated_network_fee<R: ForkRules + ?Sized>(
    fee_per_kb: u64,
    priority: u32,
    rules: &R,
) -> Result<u64, Error> {
    let bulletproof = rules.use_fork_rules(fork::bulletproof_fork_version(), 0);
    let multiplier = fee_multiplier(priority, default_priority(), fee_algorithm(rules))?;
    let estimated_size = estimate_rct_tx_size(2, fixed_mixin_count(), 2, 0, bulletproof);

    Ok(calculate_fee(fee_per_kb, estimated_size, multiplier))
}

/// The byte ceiling a signed transaction must stay under
///
/// Derived from the fork-dependent full-reward block zone minus the space
/// reserved for the coinbase, unless the caller supplies a ceiling.
pub fn upper_transaction_size_limit<R: ForkRules + ?Sized>(
    limit_override: u64,
    rules: &R,
) -> u64 {
    if limit_override > 0 {
        return limit_override;
    }

    let full_reward_zone = if rules.use_fork_rules(5, 10) {
        config::BLOCK_GRANTED_FULL_REWARD_ZONE_V5
    } else if rules.use_fork_rules(2, 10) {
        config::BLOCK_GRANTED_FULL_REWARD_ZONE_V2
    } else {
        config::BLOCK_GRANTED_FULL_REWARD_ZONE_V1
    };

    full_reward_zone - config::COINBASE_BLOB_RESERVED_SIZE
}
