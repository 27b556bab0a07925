//! Protocol constants
//!
//! Fork-dependent values are deliberately absent; those go through the
//! [`ForkRules`](crate::fork::ForkRules) oracle.

/// Block size granted the full reward before the first size fork
pub const BLOCK_GRANTED_FULL_REWARD_ZONE_V1: u64 = 20_000;
/// Block size granted the full reward from protocol v2
pub const BLOCK_GRANTED_FULL_REWARD_ZONE_V2: u64 = 60_000;
/// Block size granted the full reward from protocol v5
pub const BLOCK_GRANTED_FULL_REWARD_ZONE_V5: u64 = 300_000;
/// Bytes reserved in a block for the coinbase transaction
pub const COINBASE_BLOB_RESERVED_SIZE: u64 = 600;

/// Per-ring-member byte estimate for pre-confidential transactions
pub const APPROXIMATE_INPUT_BYTES: usize = 80;

/// Unlock times below this are block indices, above it timestamps
pub const MAX_BLOCK_NUMBER: u64 = 500_000_000;
/// Blocks an output must age before it may be spent
pub const DEFAULT_TX_SPENDABLE_AGE: u64 = 10;
/// Leeway when interpreting an unlock time as a block index
pub const LOCKED_TX_ALLOWED_DELTA_BLOCKS: u64 = 1;
/// Leeway when interpreting an unlock time as a timestamp, before v2
pub const LOCKED_TX_ALLOWED_DELTA_SECONDS_V1: u64 = 60 * 60 * 24 * 3;
/// Leeway when interpreting an unlock time as a timestamp, from v2
pub const LOCKED_TX_ALLOWED_DELTA_SECONDS_V2: u64 = 60 * 5 * 10;
