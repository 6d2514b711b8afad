//! Provides the context shared by the steps that build a reclaim transaction.

use bitcoin::{
    key::Secp256k1, secp256k1::All, taproot::ControlBlock, ScriptBuf, Transaction, TxOut,
};

use crate::{errors::ReclaimTxBuilderResult, params::ReclaimParams, TxKind};

/// A builder for transactions that spend deposit outputs.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    /// The parameters the deposit output was created with.
    params: ReclaimParams,

    /// The secp engine used to derive and verify keys.
    secp: Secp256k1<All>,
}

impl TxBuilder {
    /// Create a new [`TxBuilder`] with the context required to build transactions of various
    /// [`TxKind`].
    ///
    /// # Errors
    ///
    /// If the `params` are not well-formed.
    pub fn new(params: ReclaimParams, secp: Secp256k1<All>) -> ReclaimTxBuilderResult<Self> {
        params.check_well_formed()?;

        Ok(Self { params, secp })
    }

    /// Get the parameters of the deposit output.
    pub fn params(&self) -> &ReclaimParams {
        &self.params
    }

    /// Get the secp engine used by the builder.
    pub fn secp(&self) -> &Secp256k1<All> {
        &self.secp
    }

    /// Construct the transaction of particular [`TxKind`] along with information required to
    /// produce a fully-signed valid transaction.
    pub fn construct_signing_data<K: TxKind>(
        &self,
        tx_kind: &K,
    ) -> ReclaimTxBuilderResult<TxSigningData> {
        let unsigned_tx = tx_kind.create_unsigned_tx(self)?;
        let spend_infos = tx_kind.compute_spend_infos(self)?;
        let prevouts = tx_kind.compute_prevouts(self)?;

        Ok(TxSigningData {
            unsigned_tx,
            spend_infos,
            prevouts,
        })
    }
}

/// The output of the transaction builder that contains all the information necessary to produce a
/// valid signature.
#[derive(Debug, Clone)]
pub struct TxSigningData {
    /// The unsigned transaction (with the `script_sig` and `witness` fields not set).
    pub unsigned_tx: Transaction,

    /// The leaf script and control block required to spend each input in the unsigned transaction
    /// respectively.
    pub spend_infos: Vec<(ScriptBuf, ControlBlock)>,

    /// The list of prevouts for each input in the unsigned transaction respectively.
    pub prevouts: Vec<TxOut>,
}
