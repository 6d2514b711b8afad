//! Build the transaction that reclaims a deposit.
//!
//! A deposit is locked in a taproot output with two script leaves: one with which the verifiers
//! move the funds into the bridge and one with which the depositor can take them back after a
//! relative timelock. This crate rebuilds that script tree from the [`params::ReclaimParams`] it
//! was created with, and creates and signs the transaction that spends the depositor's leaf.

use bitcoin::{taproot::ControlBlock, ScriptBuf, Transaction, TxOut};
use builder::TxBuilder;
use errors::ReclaimTxBuilderResult;

pub mod builder;
pub mod constants;
pub mod errors;
pub mod hashes;
pub mod operations;
pub mod params;
pub mod parse;
pub mod prelude;
pub mod reclaim;
pub mod scripts;
pub mod sighash;
pub mod signer;
pub mod taproot;

/// Trait for any transaction that spends a deposit output.
///
/// This is implemented by any struct that contains the information needed to create such a
/// transaction.
pub trait TxKind {
    /// Computes the witness elements required to spend the inputs in order (except the signatures).
    fn compute_spend_infos(
        &self,
        builder: &TxBuilder,
    ) -> ReclaimTxBuilderResult<Vec<(ScriptBuf, ControlBlock)>>;

    /// Computes the prevouts required to sign a taproot transaction.
    fn compute_prevouts(&self, builder: &TxBuilder) -> ReclaimTxBuilderResult<Vec<TxOut>>;

    /// Create the transaction with the help of a [`TxBuilder`].
    fn create_unsigned_tx(&self, builder: &TxBuilder) -> ReclaimTxBuilderResult<Transaction>;
}
