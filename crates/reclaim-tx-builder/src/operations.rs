//! Standalone wrappers over [`bitcoin`] to create transactions.

use bitcoin::{
    absolute::LockTime, transaction, Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn,
    TxOut, Witness,
};

/// Create a version 2 bitcoin [`Transaction`] without an absolute locktime for the given
/// transaction inputs and outputs.
pub fn create_tx(tx_ins: Vec<TxIn>, tx_outs: Vec<TxOut>) -> Transaction {
    Transaction {
        version: transaction::Version(2),
        lock_time: LockTime::from_consensus(0),
        input: tx_ins,
        output: tx_outs,
    }
}

/// Create a list of [`TxIn`]'s from given [`OutPoint`]'s and their `sequence`.
///
/// The `witness` and `script_sig` are left blank.
pub fn create_tx_ins(utxos: impl IntoIterator<Item = (OutPoint, Sequence)>) -> Vec<TxIn> {
    utxos
        .into_iter()
        .map(|(previous_output, sequence)| TxIn {
            previous_output,
            sequence,
            script_sig: ScriptBuf::default(),
            witness: Witness::new(),
        })
        .collect()
}

/// Create a list of [`TxOut`]'s based on pairs of scripts and corresponding amounts.
pub fn create_tx_outs(
    scripts_and_amounts: impl IntoIterator<Item = (ScriptBuf, Amount)>,
) -> Vec<TxOut> {
    scripts_and_amounts
        .into_iter()
        .map(|(script_pubkey, value)| TxOut {
            script_pubkey,
            value,
        })
        .collect()
}
