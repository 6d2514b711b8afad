//! Enumerated errors related to the creation and signing of the deposit reclaim transaction.

use bitcoin::{
    taproot::{TaprootBuilder, TaprootBuilderError},
    Amount,
};
use thiserror::Error;

/// Error during building of the deposit reclaim transaction.
#[derive(Debug, Error)]
pub enum ReclaimTxBuilderError {
    /// A caller-supplied parameter could not be parsed.
    #[error("invalid parameter: {0}")]
    InvalidParameter(#[from] ParameterError),

    /// The protocol parameters are not well-formed.
    #[error("invalid protocol params: {0}")]
    Params(#[from] ParamsError),

    /// A key could not be used for signing.
    #[error("invalid key: {0}")]
    Crypto(#[from] CryptoError),

    /// Error building the reclaim transaction.
    #[error("could not build reclaim transaction: {0}")]
    ReclaimTransaction(#[from] ReclaimTransactionError),

    /// Error computing the signature hash.
    #[error("could not compute sighash: {0}")]
    Sighash(#[from] SighashError),

    /// Error while building the taproot tree.
    #[error("could not build taproot tree")]
    BuildFailed(#[from] TaprootBuilderError),

    /// Error while finalizing the taproot tree, i.e., the tree is not complete.
    #[error("could not finalize the taproot tree")]
    IncompleteTree,
}

/// Result type alias that has [`ReclaimTxBuilderError`] as the error type for succinctness.
pub type ReclaimTxBuilderResult<T> = Result<T, ReclaimTxBuilderError>;

/// The unmodified [`TaprootBuilder`] is returned if the tree could not be finalized in the call to
/// [`TaprootBuilder::finalize`].
impl From<TaprootBuilder> for ReclaimTxBuilderError {
    fn from(_value: TaprootBuilder) -> Self {
        ReclaimTxBuilderError::IncompleteTree
    }
}

/// Error while parsing a caller-supplied parameter.
///
/// Every variant names the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// The value is not valid hex (odd length or non-hex characters).
    #[error("{field} is not valid hex: {reason}")]
    InvalidHex {
        /// Name of the offending field.
        field: &'static str,

        /// Why decoding failed.
        reason: String,
    },

    /// The decoded value does not have the expected size.
    #[error("{field} must be {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending field.
        field: &'static str,

        /// Expected size in bytes.
        expected: usize,

        /// Actual size in bytes.
        actual: usize,
    },

    /// The value is not a valid bitcoin address.
    #[error("{field} is not a valid bitcoin address: {reason}")]
    InvalidAddress {
        /// Name of the offending field.
        field: &'static str,

        /// Why parsing failed.
        reason: String,
    },

    /// The address is valid but does not belong to the expected network.
    #[error("{field} does not belong to the {network} network")]
    WrongNetwork {
        /// Name of the offending field.
        field: &'static str,

        /// The expected network.
        network: bitcoin::Network,
    },

    /// The address is not a Pay-to-Taproot address.
    #[error("{field} is not a taproot (P2TR) address")]
    NotTaprootAddress {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Error in the protocol parameters used to rebuild the escrow tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamsError {
    /// No verifier keys were configured.
    #[error("verifier key set cannot be empty")]
    NoVerifierKeys,

    /// The chain tag is empty or does not fit in a single script push.
    #[error("chain tag size must be between 1 and {max} bytes, got {actual}")]
    InvalidChainTag {
        /// Maximum size of a script push.
        max: usize,

        /// Actual size of the tag.
        actual: usize,
    },

    /// The timelock depth is zero or its sequence does not fit the BIP 68 height field.
    #[error("reclaim timelock must be between 1 and {max} blocks, got {actual}")]
    InvalidTimelock {
        /// Maximum allowed depth.
        max: u16,

        /// Configured depth.
        actual: u16,
    },
}

/// Error with the key material used for signing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The private key is not a valid secp256k1 scalar.
    #[error("private key is not a valid secp256k1 secret key")]
    InvalidKey,

    /// The tweak is out of range or tweaking produced the point at infinity.
    #[error("could not tweak the signing key")]
    InvalidTweak,
}

/// Error computing the taproot script-path signature hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SighashError {
    /// The number of prevouts does not match the number of transaction inputs.
    #[error("expected {inputs} prevouts, got {prevouts}")]
    PrevoutsSize {
        /// Number of transaction inputs.
        inputs: usize,

        /// Number of prevouts supplied.
        prevouts: usize,
    },

    /// The input index does not exist in the transaction.
    #[error("input index {index} out of bounds for {inputs} inputs")]
    InputIndexOutOfBounds {
        /// Requested input index.
        index: usize,

        /// Number of transaction inputs.
        inputs: usize,
    },
}

/// Error building the reclaim transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReclaimTransactionError {
    /// The fee would consume the whole deposit.
    #[error("fee {fee} must be less than the deposit amount {amount}")]
    FeeExceedsAmount {
        /// The requested fee.
        fee: Amount,

        /// The deposit amount.
        amount: Amount,
    },

    /// The tweaked signing key is not the key committed to in the reclaim leaf.
    #[error("private key does not control the depositor address")]
    SignerKeyMismatch,

    /// The control block does not prove the reclaim leaf against the derived output key. This
    /// means the control block does not have the right commitment.
    #[error("control block generation invalid")]
    ControlBlockError,
}

/// The address is not a P2TR address, or its witness program is not a valid x-only key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("not a taproot address")]
pub struct NotTaprootAddress;
