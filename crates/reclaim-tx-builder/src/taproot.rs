//! Composes the deposit taproot output from the internal key and the two deposit leaves.

use bitcoin::{
    key::{Secp256k1, TweakedPublicKey},
    secp256k1::{All, XOnlyPublicKey},
    taproot::{ControlBlock, LeafVersion, TapNodeHash, TaprootBuilder, TaprootSpendInfo},
    Address, Network, ScriptBuf,
};
use tracing::debug;

use crate::{
    errors::{ReclaimTransactionError, ReclaimTxBuilderResult},
    params::ReclaimParams,
    scripts::DepositLeaves,
};

/// The script tree of a deposit output.
///
/// Both leaves sit at depth 1 under the internal key of the [`ReclaimParams`]. This must be the
/// same shape as the tree the deposit address was generated from, otherwise the output key differs
/// from the one of the real deposit output.
#[derive(Debug, Clone)]
pub struct ReclaimTapTree {
    leaves: DepositLeaves,
    spend_info: TaprootSpendInfo,
}

impl ReclaimTapTree {
    /// Builds the tree for `leaves` under the internal key in `params`.
    pub fn new(
        secp: &Secp256k1<All>,
        params: &ReclaimParams,
        leaves: DepositLeaves,
    ) -> ReclaimTxBuilderResult<Self> {
        let spend_info = TaprootBuilder::new()
            .add_leaf(1, leaves.bridge_move.clone())?
            .add_leaf(1, leaves.reclaim.clone())?
            .finalize(secp, params.internal_key)?;

        debug!(
            output_key = %spend_info.output_key(),
            merkle_root = ?spend_info.merkle_root(),
            "built deposit tree"
        );

        Ok(Self { leaves, spend_info })
    }

    /// The leaves committed to in the tree.
    pub fn leaves(&self) -> &DepositLeaves {
        &self.leaves
    }

    /// The reclaim leaf.
    pub fn reclaim_script(&self) -> &ScriptBuf {
        &self.leaves.reclaim
    }

    /// The root of the script tree.
    pub fn merkle_root(&self) -> Option<TapNodeHash> {
        self.spend_info.merkle_root()
    }

    /// The tweaked output key of the deposit output.
    pub fn output_key(&self) -> TweakedPublicKey {
        self.spend_info.output_key()
    }

    /// The `OP_1 <output key>` script pubkey of the deposit output.
    pub fn script_pubkey(&self) -> ScriptBuf {
        ScriptBuf::new_p2tr_tweaked(self.output_key())
    }

    /// The address of the deposit output on `network`.
    ///
    /// Compare this with the address that the deposit was actually sent to: if they differ, the
    /// tree was rebuilt from the wrong parameters and the reclaim transaction will not be valid.
    pub fn deposit_address(&self, network: Network) -> Address {
        Address::p2tr_tweaked(self.output_key(), network)
    }

    /// Creates the control block that proves the reclaim leaf is part of this tree.
    ///
    /// # Errors
    ///
    /// If the control block does not verify against the output key.
    pub fn reclaim_control_block(
        &self,
        secp: &Secp256k1<All>,
    ) -> ReclaimTxBuilderResult<ControlBlock> {
        let reclaim_script = self.reclaim_script();

        let control_block = self
            .spend_info
            .control_block(&(reclaim_script.clone(), LeafVersion::TapScript))
            .ok_or(ReclaimTransactionError::ControlBlockError)?;

        let output_key: XOnlyPublicKey = self.output_key().to_inner();
        if !control_block.verify_taproot_commitment(secp, output_key, reclaim_script) {
            return Err(ReclaimTransactionError::ControlBlockError)?;
        }

        Ok(control_block)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bitcoin::{
        hex::{Case, DisplayHex},
        secp256k1::XOnlyPublicKey,
    };
    use strata_test_utils::reclaim::{
        generate_keypairs, TEST_CONTROL_BLOCK, TEST_DEPOSITOR_KEY, TEST_DEPOSIT_ADDRESS,
        TEST_EL_ADDRESS,
    };

    use super::*;

    fn test_tree(params: &ReclaimParams) -> ReclaimTapTree {
        let secp = Secp256k1::new();
        let depositor_key = XOnlyPublicKey::from_str(TEST_DEPOSITOR_KEY).unwrap();
        let leaves = DepositLeaves::new(params, &TEST_EL_ADDRESS, &depositor_key).unwrap();

        ReclaimTapTree::new(&secp, params, leaves).expect("should build tree")
    }

    #[test]
    fn test_rebuilt_tree_matches_deposit_address() {
        let params = ReclaimParams::testnet();
        let tree = test_tree(&params);

        assert_eq!(
            tree.deposit_address(params.network).to_string(),
            TEST_DEPOSIT_ADDRESS,
            "rebuilt tree should yield the address the deposit was sent to"
        );
        assert_eq!(
            tree.output_key().to_inner().to_string(),
            "a4b4c21550b953e2d39469ba2b7887034d453c2d4fe5311a24b1cf1e145c42f3"
        );
        assert_eq!(
            tree.merkle_root().unwrap().to_string(),
            "fa184bb5537b2ccf04c12d66ab431e54bdf4fbccafee1d79df44dd848e0351cc"
        );

        let script_pubkey = tree.script_pubkey();
        assert!(script_pubkey.is_p2tr());
        assert_eq!(script_pubkey.len(), 34);
    }

    #[test]
    fn test_reclaim_control_block() {
        let secp = Secp256k1::new();
        let tree = test_tree(&ReclaimParams::testnet());

        let control_block = tree
            .reclaim_control_block(&secp)
            .expect("should produce a valid control block");

        assert_eq!(
            control_block.serialize().to_hex_string(Case::Lower),
            TEST_CONTROL_BLOCK
        );
        assert_eq!(control_block.merkle_branch.len(), 1, "sibling is the only node");
        assert!(!control_block.verify_taproot_commitment(
            &secp,
            tree.output_key().to_inner(),
            &tree.leaves().bridge_move
        ));
    }

    #[test]
    fn test_control_block_with_other_keys() {
        let secp = Secp256k1::new();

        for _ in 0..5 {
            let (pubkeys, _) = generate_keypairs(4);
            let mut keys = pubkeys.iter().map(|pk| pk.x_only_public_key().0);

            let mut params = ReclaimParams::testnet();
            params.internal_key = keys.next().unwrap();
            params.verifier_keys = keys.collect();

            let tree = test_tree(&params);
            let control_block = tree
                .reclaim_control_block(&secp)
                .expect("should produce a valid control block");

            assert!(control_block.verify_taproot_commitment(
                &secp,
                tree.output_key().to_inner(),
                tree.reclaim_script()
            ));
        }
    }

    #[test]
    fn test_different_params_change_deposit_address() {
        let params = ReclaimParams::testnet();
        let deposit_address = test_tree(&params).deposit_address(params.network);

        let mut other = params.clone();
        other.reclaim_after_blocks = 144;
        assert_ne!(test_tree(&other).deposit_address(other.network), deposit_address);

        let mut other = params.clone();
        other.bridge_amount = bitcoin::Amount::from_sat(100_000_000);
        assert_ne!(test_tree(&other).deposit_address(other.network), deposit_address);

        let mut other = params.clone();
        other.chain_tag = b"strata".to_vec();
        assert_ne!(
            test_tree(&other).deposit_address(other.network),
            deposit_address,
            "every parameter should be committed to in the output key"
        );
    }
}
