//! Builders related to reclaiming a deposit after its timelock has matured.

use bitcoin::{
    consensus::encode::serialize_hex, key::Secp256k1, secp256k1::SecretKey, taproot::ControlBlock,
    Address, Amount, Network, OutPoint, ScriptBuf, Transaction, TxOut, XOnlyPublicKey,
};
use tracing::{debug, info};

use crate::{
    builder::{TxBuilder, TxSigningData},
    errors::{ParameterError, ReclaimTransactionError, ReclaimTxBuilderResult},
    operations::{create_tx, create_tx_ins, create_tx_outs},
    params::ReclaimParams,
    parse::{parse_depositor_address, parse_el_address, parse_txid, ExtractP2trPubkey},
    scripts::{leaf_hash, DepositLeaves},
    sighash::script_spend_sighash,
    signer::TweakedSigner,
    taproot::ReclaimTapTree,
    TxKind,
};

/// The information required to take a deposit back to the depositor's address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReclaimInfo {
    /// The deposit output being spent.
    deposit_outpoint: OutPoint,

    /// The amount locked in the deposit output.
    deposit_amount: Amount,

    /// The fee paid by the reclaim transaction.
    fee: Amount,

    /// The taproot address that the deposit was made from and that receives the funds back.
    depositor_address: Address,

    /// The execution layer address that the deposit was made to.
    el_address: [u8; 20],
}

impl ReclaimInfo {
    /// Create a new reclaim request.
    ///
    /// # Errors
    ///
    /// If the `fee` would consume the whole deposit or the `depositor_address` is not a taproot
    /// address.
    pub fn new(
        deposit_outpoint: OutPoint,
        deposit_amount: Amount,
        fee: Amount,
        depositor_address: Address,
        el_address: [u8; 20],
    ) -> ReclaimTxBuilderResult<Self> {
        if fee >= deposit_amount {
            return Err(ReclaimTransactionError::FeeExceedsAmount {
                fee,
                amount: deposit_amount,
            })?;
        }

        depositor_address
            .extract_p2tr_pubkey()
            .map_err(|_e| ParameterError::NotTaprootAddress { field: "address" })?;

        Ok(Self {
            deposit_outpoint,
            deposit_amount,
            fee,
            depositor_address,
            el_address,
        })
    }

    /// Create a new reclaim request from the textual inputs of a caller.
    pub fn parse(
        network: Network,
        address: &str,
        el_address: &str,
        txid: &str,
        vout: u32,
        deposit_amount: Amount,
        fee: Amount,
    ) -> ReclaimTxBuilderResult<Self> {
        let depositor_address = parse_depositor_address(address, network)?;
        let el_address = parse_el_address(el_address)?;
        let txid = parse_txid(txid)?;

        Self::new(
            OutPoint::new(txid, vout),
            deposit_amount,
            fee,
            depositor_address,
            el_address,
        )
    }

    /// Get the deposit output being spent.
    pub fn deposit_outpoint(&self) -> &OutPoint {
        &self.deposit_outpoint
    }

    /// Get the amount locked in the deposit output.
    pub fn deposit_amount(&self) -> Amount {
        self.deposit_amount
    }

    /// Get the fee.
    pub fn fee(&self) -> Amount {
        self.fee
    }

    /// Get the depositor's address.
    pub fn depositor_address(&self) -> &Address {
        &self.depositor_address
    }

    /// Get the execution layer address.
    pub fn el_address(&self) -> &[u8; 20] {
        &self.el_address
    }

    /// The amount returned to the depositor.
    pub fn reclaim_amount(&self) -> Amount {
        // fee < deposit_amount is checked on construction
        self.deposit_amount - self.fee
    }

    /// The output key of the depositor address, which is the key checked by the reclaim leaf.
    pub fn depositor_key(&self) -> ReclaimTxBuilderResult<XOnlyPublicKey> {
        Ok(self
            .depositor_address
            .extract_p2tr_pubkey()
            .map_err(|_e| ParameterError::NotTaprootAddress { field: "address" })?)
    }

    /// Rebuilds the script tree of the deposit output.
    pub fn tap_tree(&self, builder: &TxBuilder) -> ReclaimTxBuilderResult<ReclaimTapTree> {
        let params = builder.params();
        let leaves = DepositLeaves::new(params, &self.el_address, &self.depositor_key()?)?;
        let tree = ReclaimTapTree::new(builder.secp(), params, leaves)?;

        debug!(
            deposit_address = %tree.deposit_address(params.network),
            "rebuilt deposit tree"
        );

        Ok(tree)
    }
}

impl TxKind for ReclaimInfo {
    fn compute_spend_infos(
        &self,
        builder: &TxBuilder,
    ) -> ReclaimTxBuilderResult<Vec<(ScriptBuf, ControlBlock)>> {
        let tree = self.tap_tree(builder)?;
        let control_block = tree.reclaim_control_block(builder.secp())?;

        Ok(vec![(tree.reclaim_script().clone(), control_block)])
    }

    fn compute_prevouts(&self, builder: &TxBuilder) -> ReclaimTxBuilderResult<Vec<TxOut>> {
        let tree = self.tap_tree(builder)?;

        Ok(vec![TxOut {
            script_pubkey: tree.script_pubkey(),
            value: self.deposit_amount,
        }])
    }

    fn create_unsigned_tx(&self, builder: &TxBuilder) -> ReclaimTxBuilderResult<Transaction> {
        let sequence = builder.params().reclaim_sequence();
        let tx_ins = create_tx_ins([(self.deposit_outpoint, sequence)]);

        let tx_outs = create_tx_outs([(
            self.depositor_address.script_pubkey(),
            self.reclaim_amount(),
        )]);

        Ok(create_tx(tx_ins, tx_outs))
    }
}

/// Builds the fully signed transaction that sends the deposit in `info` back to the depositor.
///
/// # Errors
///
/// If the `params` are not well-formed, or `secret_key` does not control the depositor address.
pub fn build_reclaim_tx(
    params: &ReclaimParams,
    secret_key: &SecretKey,
    info: &ReclaimInfo,
) -> ReclaimTxBuilderResult<Transaction> {
    let builder = TxBuilder::new(params.clone(), Secp256k1::new())?;
    let secp = builder.secp();

    let signer = TweakedSigner::new(secp, secret_key)?;
    if signer.x_only_public_key() != info.depositor_key()? {
        return Err(ReclaimTransactionError::SignerKeyMismatch)?;
    }

    let TxSigningData {
        mut unsigned_tx,
        spend_infos,
        prevouts,
    } = builder.construct_signing_data(info)?;

    for (input_index, (script, control_block)) in spend_infos.into_iter().enumerate() {
        let sighash =
            script_spend_sighash(&unsigned_tx, input_index, &prevouts, leaf_hash(&script))?;
        let signature = signer.sign(secp, &sighash);

        let witness = &mut unsigned_tx.input[input_index].witness;
        witness.push(signature.serialize());
        witness.push(&script);
        witness.push(control_block.serialize());
    }

    let signed_tx = unsigned_tx;
    info!(
        txid = %signed_tx.compute_txid(),
        deposit = %info.deposit_outpoint(),
        "signed reclaim transaction"
    );

    Ok(signed_tx)
}

/// Same as [`build_reclaim_tx`] but returns the consensus-encoded transaction as hex.
pub fn build_reclaim_tx_hex(
    params: &ReclaimParams,
    secret_key: &SecretKey,
    info: &ReclaimInfo,
) -> ReclaimTxBuilderResult<String> {
    let signed_tx = build_reclaim_tx(params, secret_key, info)?;

    Ok(serialize_hex(&signed_tx))
}
