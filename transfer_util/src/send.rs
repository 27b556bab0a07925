//! The two-phase send protocol
//!
//! Fee depends on the final byte size, the byte size depends on the rings,
//! and the rings depend on decoys the caller has not fetched yet. The
//! protocol resolves that loop by iterating across two calls:
//!
//! 1. [`prepare_params_for_get_decoys`] picks outputs and a fee under an
//!    assumed shape; the caller fetches decoys for the selected outputs.
//! 2. [`try_create_transaction`] builds and signs the real transaction. If
//!    the signed blob turns out to need a higher fee than assumed, it
//!    reports [`SendStep2Result::MustReconstruct`] with the corrected fee,
//!    and the caller re-runs phase 1 feeding that fee back in.
//!
//! Every piece of carry-over state travels through the phase-1 return
//! value; there is no session object, so concurrent transfers never share
//! anything.

use ensure_macro::ensure;

use crypto::{Hash256, PublicKey, SecretKey};

use crate::{
    construction,
    error::Error,
    fee,
    fork::ForkRules,
    signer::TransactionSigner,
    AccountKeys, Address, AddressKind, DecoyPool, Destination, SpendableOutput,
};

/// Everything phase 1 decides, echoed back into phase 2 by the caller
#[derive(Clone, Debug)]
pub struct PreparedTransferParams {
    /// The outputs to spend, in selection order
    pub using_outputs: Vec<SpendableOutput>,
    /// Decoys required per spent output
    pub mixin: u32,
    /// The fee the transfer is being attempted under
    pub using_fee: u64,
    /// Amount reaching the recipient, excluding the fee
    pub final_total_without_fee: u64,
    /// Surplus returning to the sender
    pub change_amount: u64,
}

/// The outcome of phase 2
#[derive(Debug)]
pub enum SendStep2Result {
    /// The assembled transaction needs a higher fee than was assumed.
    /// Re-run phase 1 with `fee_actually_needed` as the previously
    /// attempted fee; this is expected protocol behavior, not a failure.
    MustReconstruct {
        /// The fee the real transaction shape requires
        fee_actually_needed: u64,
    },
    /// The transfer is signed and ready for broadcast
    Complete(CompletedTransfer),
}

/// The signed artifact handed back to the caller for broadcast
#[derive(Debug)]
pub struct CompletedTransfer {
    /// The serialized signed transaction, hex encoded
    pub signed_tx_hex: String,
    /// Hash of the signed transaction
    pub tx_hash: Hash256,
    /// The one-time transaction secret key
    pub tx_secret_key: SecretKey,
    /// The one-time transaction public key
    pub tx_public_key: PublicKey,
}

/// Phase 1: select outputs and a fee, so the caller can fetch decoys
///
/// Outputs are accumulated greedily in the order given until they cover
/// the amount plus the attempted fee, re-estimating the fee as each input
/// grows the transaction. Sweeping takes every output and turns the whole
/// balance minus fee into the sent amount.
pub fn prepare_params_for_get_decoys<R: ForkRules + ?Sized>(
    sending_amount: u64,
    is_sweeping: bool,
    priority: u32,
    unspent_outputs: &[SpendableOutput],
    fee_per_kb: u64,
    previously_attempted_fee: Option<u64>,
    rules: &R,
) -> Result<PreparedTransferParams, Error> {
    let mixin = fee::fixed_mixin_count();
    let bulletproof = rules.use_fork_rules(crate::fork::bulletproof_fork_version(), 0);
    let multiplier = fee::fee_multiplier(priority, fee::default_priority(), fee::fee_algorithm(rules))?;

    let mut spendable_balance: u64 = 0;
    for output in unspent_outputs {
        spendable_balance = spendable_balance
            .checked_add(output.amount)
            .ok_or(Error::InputAmountOverflow)?;
    }

    let attempted_fee = match previously_attempted_fee {
        Some(fee) => fee,
        None => fee::estimated_network_fee(fee_per_kb, priority, rules)?,
    };

    // Fee under the actual shape: n selected inputs, recipient plus change
    let shape_fee = |n_inputs: usize| {
        let estimated_size = fee::estimate_tx_size(true, n_inputs, mixin, 2, 0, bulletproof);
        fee::calculate_fee(fee_per_kb, estimated_size, multiplier).max(attempted_fee)
    };

    if is_sweeping {
        let using_outputs = unspent_outputs.to_vec();
        ensure!(!using_outputs.is_empty(), Error::InsufficientFunds {
            available: 0,
            required: attempted_fee,
        });
        let using_fee = shape_fee(using_outputs.len());
        ensure!(
            spendable_balance > using_fee,
            Error::InsufficientFunds {
                available: spendable_balance,
                required: using_fee,
            }
        );
        log::debug!(
            "sweeping {} outputs totalling {} with fee {}",
            using_outputs.len(),
            spendable_balance,
            using_fee
        );
        return Ok(PreparedTransferParams {
            final_total_without_fee: spendable_balance - using_fee,
            change_amount: 0,
            mixin,
            using_fee,
            using_outputs,
        });
    }

    ensure!(
        spendable_balance >= sending_amount,
        Error::InsufficientFunds {
            available: spendable_balance,
            required: sending_amount,
        }
    );

    let mut using_outputs: Vec<SpendableOutput> = Vec::new();
    let mut total: u64 = 0;
    let mut using_fee = attempted_fee;
    for output in unspent_outputs {
        if !using_outputs.is_empty() && total >= sending_amount.saturating_add(using_fee) {
            break;
        }
        total += output.amount;
        using_outputs.push(output.clone());
        using_fee = shape_fee(using_outputs.len());
    }
    ensure!(
        total >= sending_amount.saturating_add(using_fee),
        Error::InsufficientFunds {
            available: spendable_balance,
            required: sending_amount.saturating_add(using_fee),
        }
    );

    log::debug!(
        "selected {} of {} outputs for {} + fee {}",
        using_outputs.len(),
        unspent_outputs.len(),
        sending_amount,
        using_fee
    );

    Ok(PreparedTransferParams {
        final_total_without_fee: sending_amount,
        change_amount: total - sending_amount - using_fee,
        mixin,
        using_fee,
        using_outputs,
    })
}

/// Phase 2: build the concrete transaction, or ask for another round
///
/// `params` is phase 1's return value; `decoy_pools` are the decoys the
/// caller fetched for the selected outputs in the meantime. A manual
/// `payment_id` is refused for destinations that cannot take one; its
/// encoding into `extra` is the marshalling layer's business, not ours.
#[allow(clippy::too_many_arguments)]
pub fn try_create_transaction<R, S>(
    account: &AccountKeys,
    to_address: &Address,
    payment_id: Option<&str>,
    params: &PreparedTransferParams,
    priority: u32,
    fee_per_kb: u64,
    decoy_pools: &[DecoyPool],
    extra: &[u8],
    unlock_time: u64,
    rules: &R,
    signer: &S,
) -> Result<SendStep2Result, Error>
where
    R: ForkRules + ?Sized,
    S: TransactionSigner + ?Sized,
{
    if payment_id.is_some() {
        ensure!(
            to_address.kind != AddressKind::Subaddress,
            Error::InvalidPaymentIdForSubaddress
        );
        ensure!(
            !matches!(to_address.kind, AddressKind::Integrated(_)),
            Error::ConflictingPaymentId
        );
    }

    let mut destinations = vec![Destination {
        address: to_address.clone(),
        amount: params.final_total_without_fee,
    }];
    if params.change_amount > 0 {
        destinations.push(Destination {
            address: account.address.clone(),
            amount: params.change_amount,
        });
    }

    let signed = construction::create_transaction(
        account,
        &destinations,
        &params.using_outputs,
        decoy_pools,
        params.using_fee,
        extra,
        params.mixin + 1,
        rules,
        unlock_time,
        signer,
        0,
    )?;

    let multiplier = fee::fee_multiplier(priority, fee::default_priority(), fee::fee_algorithm(rules))?;
    let fee_actually_needed = fee::calculate_fee(fee_per_kb, signed.blob.len(), multiplier);
    if fee_actually_needed > params.using_fee {
        log::debug!(
            "fee drift: assumed {}, the signed transaction needs {}",
            params.using_fee,
            fee_actually_needed
        );
        return Ok(SendStep2Result::MustReconstruct { fee_actually_needed });
    }

    Ok(SendStep2Result::Complete(CompletedTransfer {
        signed_tx_hex: hex::encode(&signed.blob),
        tx_hash: signed.tx_hash,
        tx_secret_key: signed.tx_secret_key,
        tx_public_key: signed.tx_public_key,
    }))
}
