//! Parameters of the deposit escrow that do not change for the lifetime of a deposit.

use bitcoin::{
    blockdata::constants::MAX_SCRIPT_ELEMENT_SIZE, secp256k1::XOnlyPublicKey, Amount, Network,
    Sequence,
};
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        BRIDGE_AMOUNT, CHAIN_TAG, INTERNAL_KEY, NETWORK, RECLAIM_AFTER_BLOCKS, VERIFIER_KEYS,
    },
    errors::ParamsError,
};

/// The parameters that the deposit taproot output was created with.
///
/// The script tree is rebuilt from these on every call, so these must be exactly the values used
/// when the deposit address was generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReclaimParams {
    /// The bitcoin network of the deposit and of the depositor address.
    pub network: Network,

    /// The internal key of the deposit taproot output.
    pub internal_key: XOnlyPublicKey,

    /// The verifier keys that must all sign to move the deposit into the bridge, in script
    /// order.
    pub verifier_keys: Vec<XOnlyPublicKey>,

    /// The tag identifying the destination chain.
    #[serde(with = "hex::serde")]
    pub chain_tag: Vec<u8>,

    /// The amount that gets bridged.
    #[serde(with = "bitcoin::amount::serde::as_sat")]
    pub bridge_amount: Amount,

    /// The number of confirmations after which the depositor can reclaim.
    pub reclaim_after_blocks: u16,
}

impl ReclaimParams {
    /// The parameters of the testnet deposits.
    pub fn testnet() -> Self {
        Self {
            network: NETWORK,
            internal_key: *INTERNAL_KEY,
            verifier_keys: VERIFIER_KEYS.clone(),
            chain_tag: CHAIN_TAG.to_vec(),
            bridge_amount: BRIDGE_AMOUNT,
            reclaim_after_blocks: RECLAIM_AFTER_BLOCKS,
        }
    }

    /// Checks that the params can produce a valid script tree and reclaim input.
    pub fn check_well_formed(&self) -> Result<(), ParamsError> {
        if self.verifier_keys.is_empty() {
            return Err(ParamsError::NoVerifierKeys);
        }

        if self.chain_tag.is_empty() || self.chain_tag.len() > MAX_SCRIPT_ELEMENT_SIZE {
            return Err(ParamsError::InvalidChainTag {
                max: MAX_SCRIPT_ELEMENT_SIZE,
                actual: self.chain_tag.len(),
            });
        }

        // the sequence is one more than the depth and must still fit in 16 bits
        let max = u16::MAX - 1;
        if self.reclaim_after_blocks == 0 || self.reclaim_after_blocks > max {
            return Err(ParamsError::InvalidTimelock {
                max,
                actual: self.reclaim_after_blocks,
            });
        }

        Ok(())
    }

    /// The sequence of the reclaim input.
    ///
    /// The spend is only valid strictly after [`Self::reclaim_after_blocks`] confirmations, so
    /// this is a BIP 68 block-based relative lock of one more block.
    pub fn reclaim_sequence(&self) -> Sequence {
        Sequence::from_height(self.reclaim_after_blocks.saturating_add(1))
    }
}

impl Default for ReclaimParams {
    fn default() -> Self {
        Self::testnet()
    }
}
