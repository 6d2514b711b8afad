//! Builds the two tapscript leaves of the deposit taproot output.
//!
//! Both leaves must be byte-identical to the ones the deposit address was created with, or the
//! rebuilt output key will not match the deposit output.

use bitcoin::{
    consensus::Encodable,
    hashes::Hash,
    opcodes::{
        all::{OP_CHECKSIG, OP_CHECKSIGVERIFY, OP_CSV, OP_DROP, OP_ENDIF, OP_IF},
        OP_0,
    },
    script::{Builder, PushBytes},
    secp256k1::XOnlyPublicKey,
    taproot::LeafVersion,
    Amount, ScriptBuf, TapLeafHash,
};
use tracing::debug;

use crate::{
    constants::BRIDGE_AMOUNT_SIZE,
    errors::{ParamsError, ReclaimTxBuilderResult},
    hashes::{finalize, tagged_engine, TaggedHashDomain},
    params::ReclaimParams,
};

/// Data committed to in the bridge-move leaf.
///
/// This is appended to the leaf inside an `OP_0 OP_IF .. OP_ENDIF` branch which can never be
/// executed. It only exists so that the destination and amount become part of the script tree and
/// thus of the deposit output key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepositAnnotation<'a> {
    /// Tag of the destination chain.
    chain_tag: &'a [u8],

    /// The execution layer address that the bridged funds are minted to.
    el_address: &'a [u8; 20],

    /// The bridged amount.
    bridge_amount: Amount,
}

impl<'a> DepositAnnotation<'a> {
    /// Creates a new annotation.
    pub fn new(chain_tag: &'a [u8], el_address: &'a [u8; 20], bridge_amount: Amount) -> Self {
        Self {
            chain_tag,
            el_address,
            bridge_amount,
        }
    }

    /// The bridge amount as a fixed-width big-endian value.
    pub fn bridge_amount_bytes(&self) -> [u8; BRIDGE_AMOUNT_SIZE] {
        self.bridge_amount.to_sat().to_be_bytes()
    }

    /// Appends the unexecuted annotation branch to `builder`.
    fn append_to(&self, builder: Builder) -> ReclaimTxBuilderResult<Builder> {
        let chain_tag = <&PushBytes>::try_from(self.chain_tag).map_err(|_e| {
            ParamsError::InvalidChainTag {
                max: bitcoin::blockdata::constants::MAX_SCRIPT_ELEMENT_SIZE,
                actual: self.chain_tag.len(),
            }
        })?;

        Ok(builder
            .push_opcode(OP_0)
            .push_opcode(OP_IF)
            .push_slice(chain_tag)
            .push_slice(self.el_address)
            .push_slice(self.bridge_amount_bytes())
            .push_opcode(OP_ENDIF))
    }
}

/// Create the script with which the verifiers move the deposit into the bridge.
///
/// All verifiers must sign: every key but the last is checked with `OP_CHECKSIGVERIFY` and the
/// last with `OP_CHECKSIG`, followed by the [`DepositAnnotation`].
pub fn bridge_move_script(
    verifier_keys: &[XOnlyPublicKey],
    annotation: &DepositAnnotation<'_>,
) -> ReclaimTxBuilderResult<ScriptBuf> {
    let (last_key, other_keys) = verifier_keys
        .split_last()
        .ok_or(ParamsError::NoVerifierKeys)?;

    let mut builder = Builder::new();
    for key in other_keys {
        builder = builder
            .push_x_only_key(key)
            .push_opcode(OP_CHECKSIGVERIFY);
    }

    let builder = builder.push_x_only_key(last_key).push_opcode(OP_CHECKSIG);

    Ok(annotation.append_to(builder)?.into_script())
}

/// Create the script with which the depositor takes their funds back after
/// `reclaim_after_blocks` confirmations.
///
/// The `depositor_key` is the output key of the depositor's taproot address.
pub fn reclaim_script(reclaim_after_blocks: u16, depositor_key: &XOnlyPublicKey) -> ScriptBuf {
    Builder::new()
        .push_int(i64::from(reclaim_after_blocks))
        .push_opcode(OP_CSV)
        .push_opcode(OP_DROP)
        .push_x_only_key(depositor_key)
        .push_opcode(OP_CHECKSIG)
        .into_script()
}

/// Computes the tapleaf hash of a tapscript `script`.
pub fn leaf_hash(script: &ScriptBuf) -> TapLeafHash {
    let mut engine = tagged_engine(TaggedHashDomain::TapLeaf);

    LeafVersion::TapScript
        .to_consensus()
        .consensus_encode(&mut engine)
        .expect("engines don't error");
    script
        .consensus_encode(&mut engine)
        .expect("engines don't error");

    TapLeafHash::from_byte_array(finalize(engine))
}

/// The two leaves of the deposit script tree, in tree order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepositLeaves {
    /// The leaf that the verifiers spend to move the deposit into the bridge.
    pub bridge_move: ScriptBuf,

    /// The leaf that the depositor spends to take their funds back.
    pub reclaim: ScriptBuf,
}

impl DepositLeaves {
    /// Builds both leaves for a deposit to `el_address` from the depositor whose taproot output
    /// key is `depositor_key`.
    pub fn new(
        params: &ReclaimParams,
        el_address: &[u8; 20],
        depositor_key: &XOnlyPublicKey,
    ) -> ReclaimTxBuilderResult<Self> {
        let annotation = DepositAnnotation::new(&params.chain_tag, el_address, params.bridge_amount);

        let bridge_move = bridge_move_script(&params.verifier_keys, &annotation)?;
        let reclaim = reclaim_script(params.reclaim_after_blocks, depositor_key);

        debug!(
            bridge_move_leaf = %leaf_hash(&bridge_move),
            reclaim_leaf = %leaf_hash(&reclaim),
            "built deposit leaves"
        );

        Ok(Self {
            bridge_move,
            reclaim,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bitcoin::hex::{Case, DisplayHex};
    use strata_test_utils::reclaim::{generate_keypairs, TEST_DEPOSITOR_KEY, TEST_EL_ADDRESS};

    use super::*;
    use crate::errors::ReclaimTxBuilderError;

    fn depositor_key() -> XOnlyPublicKey {
        XOnlyPublicKey::from_str(TEST_DEPOSITOR_KEY).unwrap()
    }

    #[test]
    fn test_bridge_move_script_single_verifier() {
        let params = ReclaimParams::testnet();
        let annotation =
            DepositAnnotation::new(&params.chain_tag, &TEST_EL_ADDRESS, params.bridge_amount);

        let script = bridge_move_script(&params.verifier_keys, &annotation).unwrap();

        assert_eq!(
            script.as_bytes().to_hex_string(Case::Lower),
            concat!(
                "20",
                "9fb3a961d8b1f4ec1caa220c6a50b815febc0b689ddf0b9ddfbf99cb74479e41",
                "ac",
                "0063",
                "06636974726561",
                "141111111111111111111111111111111111111111",
                "08000000003b9aca00",
                "68"
            ),
            "bridge-move leaf should match the deposit template byte for byte"
        );
    }

    #[test]
    fn test_bridge_move_script_multiple_verifiers() {
        let (pubkeys, _) = generate_keypairs(3);
        let keys: Vec<XOnlyPublicKey> = pubkeys
            .iter()
            .map(|pk| pk.x_only_public_key().0)
            .collect();
        let params = ReclaimParams::testnet();
        let annotation =
            DepositAnnotation::new(&params.chain_tag, &TEST_EL_ADDRESS, params.bridge_amount);

        let script = bridge_move_script(&keys, &annotation).unwrap();
        let bytes = script.as_bytes();

        // 3 x (push 32 + key + checksig(verify))
        for (i, key) in keys.iter().enumerate() {
            let offset = i * 34;
            assert_eq!(bytes[offset], 0x20);
            assert_eq!(&bytes[offset + 1..offset + 33], &key.serialize());

            let expected_op = if i == keys.len() - 1 {
                OP_CHECKSIG
            } else {
                OP_CHECKSIGVERIFY
            };
            assert_eq!(
                bytes[offset + 33],
                expected_op.to_u8(),
                "only the last verifier should use OP_CHECKSIG"
            );
        }

        assert_eq!(&bytes[3 * 34..3 * 34 + 2], &[OP_0.to_u8(), OP_IF.to_u8()]);
        assert_eq!(*bytes.last().unwrap(), OP_ENDIF.to_u8());
    }

    #[test]
    fn test_bridge_move_script_without_verifiers() {
        let params = ReclaimParams::testnet();
        let annotation =
            DepositAnnotation::new(&params.chain_tag, &TEST_EL_ADDRESS, params.bridge_amount);

        assert!(
            matches!(
                bridge_move_script(&[], &annotation),
                Err(ReclaimTxBuilderError::Params(ParamsError::NoVerifierKeys))
            ),
            "should error if there are no verifier keys"
        );
    }

    #[test]
    fn test_annotation_amount_is_fixed_width() {
        let annotation = DepositAnnotation::new(b"citrea", &TEST_EL_ADDRESS, Amount::from_sat(1));

        assert_eq!(annotation.bridge_amount_bytes(), [0, 0, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_reclaim_script() {
        let script = reclaim_script(200, &depositor_key());

        assert_eq!(
            script.as_bytes().to_hex_string(Case::Lower),
            format!("02c800b27520{}ac", TEST_DEPOSITOR_KEY),
            "depth 200 should be pushed as the minimal little-endian number c800"
        );
    }

    #[test]
    fn test_reclaim_script_minimal_depth_push() {
        // small depths use the OP_N opcodes
        let script = reclaim_script(16, &depositor_key());
        assert_eq!(script.as_bytes()[0], 0x60);

        // a depth without the sign bit set needs no padding byte
        let script = reclaim_script(100, &depositor_key());
        assert_eq!(&script.as_bytes()[..2], &[0x01, 0x64]);

        let script = reclaim_script(1008, &depositor_key());
        assert_eq!(&script.as_bytes()[..3], &[0x02, 0xf0, 0x03]);
    }

    #[test]
    fn test_leaf_hash() {
        let leaves =
            DepositLeaves::new(&ReclaimParams::testnet(), &TEST_EL_ADDRESS, &depositor_key())
                .unwrap();

        for script in [&leaves.bridge_move, &leaves.reclaim] {
            assert_eq!(
                leaf_hash(script),
                TapLeafHash::from_script(script, LeafVersion::TapScript),
                "leaf hash should agree with rust-bitcoin"
            );
        }

        assert_eq!(
            leaf_hash(&leaves.reclaim).as_byte_array().as_slice().to_hex_string(Case::Lower),
            "ef9525e38f2a0a595aebb078717d0265f914dcee1d179b947feb7ce3ceb12d6e"
        );
    }
}
