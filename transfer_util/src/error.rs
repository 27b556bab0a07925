use crate::signer::SigningError;

/// Error type for all transaction construction operations
///
/// Every validation failure aborts the running operation and surfaces as
/// exactly one of these; no partially built transaction is ever returned.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// Returned when there are no transaction destinations
    #[error("No transaction destinations")]
    NoDestinations,

    /// Returned when the number of decoy pools does not match the number of
    /// outputs being spent
    #[error("Expected one decoy pool per spent output")]
    DecoyPoolCountMismatch,

    /// Returned when a decoy pool cannot fill a ring to the requested size
    #[error("Not enough decoys to assemble the ring")]
    InsufficientDecoys,

    /// Returned when the given secret keys do not match the account's
    /// public address keys
    #[error("Secret keys do not match the account address")]
    InvalidSecretKeys,

    /// Returned when the sum of destination amounts overflows
    #[error("Sum of destination amounts overflows")]
    OutputAmountOverflow,

    /// Returned when the sum of spent output amounts overflows
    #[error("Sum of input amounts overflows")]
    InputAmountOverflow,

    /// Returned when a hex-encoded public key fails strict validation
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Returned when a ring member that must carry a commitment does not
    #[error("Ring member is missing its amount commitment")]
    MissingConfidentialCommitment,

    /// Returned when a plain decoy is offered for a confidential real
    /// output
    #[error("Plain and confidential outputs cannot share a ring")]
    MixedConfidentialityInRing,

    /// Returned when a confidential blob or signature field fails to parse
    #[error("Malformed output data")]
    MalformedOutputData,

    /// Returned when the input surplus does not equal the declared fee
    #[error("Declared fee {declared} does not match input surplus {surplus}")]
    FeeMismatch {
        /// The fee the caller computed earlier
        declared: u64,
        /// The surplus actually left by inputs minus outputs
        surplus: u64,
    },

    /// Returned when the spendable balance cannot cover the requested
    /// transfer
    #[error("Need {required} but only {available} is spendable")]
    InsufficientFunds {
        /// Total balance available across the offered outputs
        available: u64,
        /// Balance the transfer would need
        required: u64,
    },

    /// Returned when the external signer rejects the transaction
    #[error("Signing failed: {0}")]
    SigningFailed(#[from] SigningError),

    /// Returned when the signed transaction exceeds the network size
    /// ceiling
    #[error("Signed transaction exceeds the size ceiling")]
    TransactionTooLarge,

    /// Returned for priorities outside the fee algorithm's valid range
    #[error("Invalid priority")]
    InvalidPriority,

    /// Returned when the key derivation primitive rejects its inputs
    #[error("Key derivation failed")]
    KeyDerivationFailed,

    /// Returned for ring signature types this wallet cannot decode
    #[error("Unsupported ring signature type")]
    UnsupportedSignatureType,

    /// Returned when a manual payment ID is combined with a subaddress
    /// destination
    #[error("Payment IDs cannot be used with subaddress destinations")]
    InvalidPaymentIdForSubaddress,

    /// Returned when a manual payment ID is combined with an integrated
    /// address, which already carries one
    #[error("Destination address already carries a payment ID")]
    ConflictingPaymentId,
}
