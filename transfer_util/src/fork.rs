//! Fork-rule oracle and network identifiers
//!
//! The wallet never decides for itself whether a consensus rule is active;
//! it asks the injected oracle. A node-backed client answers from chain
//! state, tests substitute whatever rule set they need.

/// Answers "is this consensus rule active"
///
/// `early_blocks` shifts the activation height: negative values treat the
/// rule as active that many blocks before its nominal fork height.
pub trait ForkRules {
    /// Whether the rule introduced at `version` applies
    fn use_fork_rules(&self, version: u8, early_blocks: i64) -> bool;
}

impl<F> ForkRules for F
where
    F: Fn(u8, i64) -> bool,
{
    fn use_fork_rules(&self, version: u8, early_blocks: i64) -> bool {
        self(version, early_blocks)
    }
}

/// The light wallet default: every fork this code knows about is live
///
/// Light wallet servers track the current network, so the client assumes
/// the newest rules rather than querying chain height. Usable anywhere a
/// [`ForkRules`] is expected, like any other `fn(u8, i64) -> bool`.
pub fn hardcoded_lightwallet_rules(_version: u8, _early_blocks: i64) -> bool {
    true
}

/// Protocol version that introduced bulletproof range proofs
pub fn bulletproof_fork_version() -> u8 {
    8
}

/// Which chain the wallet is talking to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Network {
    /// The live network
    Mainnet,
    /// The public test network
    Testnet,
    /// The staging network
    Stagenet,
}

impl Network {
    /// Height at which protocol v2 activated on this chain
    pub fn v2_fork_height(self) -> u64 {
        match self {
            Network::Mainnet => 1_009_827,
            Network::Testnet => 624_634,
            Network::Stagenet => u64::max_value(),
        }
    }
}
