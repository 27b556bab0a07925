//! Spendability checks for received outputs

use std::time::{SystemTime, UNIX_EPOCH};

use crate::{config, fork::Network};

/// Whether an output created at `block_height` may be spent now
///
/// Combines the transaction's own unlock time with the network's minimum
/// spendable age.
pub fn is_transfer_unlocked(
    unlock_time: u64,
    block_height: u64,
    blockchain_height: u64,
    network: Network,
) -> bool {
    if !is_tx_spendtime_unlocked(unlock_time, block_height, blockchain_height, network) {
        return false;
    }

    block_height + config::DEFAULT_TX_SPENDABLE_AGE <= blockchain_height
}

/// Whether a transaction's unlock time has passed
///
/// Values below [`config::MAX_BLOCK_NUMBER`] are block indices, anything
/// above is a unix timestamp. The timestamp leeway constant changed at the
/// network's v2 fork.
pub fn is_tx_spendtime_unlocked(
    unlock_time: u64,
    block_height: u64,
    blockchain_height: u64,
    network: Network,
) -> bool {
    if unlock_time < config::MAX_BLOCK_NUMBER {
        return blockchain_height.saturating_sub(1) + config::LOCKED_TX_ALLOWED_DELTA_BLOCKS
            >= unlock_time;
    }

    let current_time = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    let leeway = if block_height < network.v2_fork_height() {
        config::LOCKED_TX_ALLOWED_DELTA_SECONDS_V1
    } else {
        config::LOCKED_TX_ALLOWED_DELTA_SECONDS_V2
    };

    current_time + leeway >= unlock_time
}
