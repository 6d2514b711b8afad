//! Taproot script-path signature hash (BIP 341) for `SIGHASH_DEFAULT`.

use bitcoin::{
    consensus::Encodable,
    hashes::{sha256, Hash, HashEngine},
    TapLeafHash, TapSighash, Transaction, TxOut,
};

use crate::{
    errors::SighashError,
    hashes::{finalize, tagged_engine, TaggedHashDomain},
};

/// The sighash epoch.
const SIGHASH_EPOCH: u8 = 0;

/// `SIGHASH_DEFAULT`, commits to all inputs and outputs.
const SIGHASH_DEFAULT: u8 = 0x00;

/// Script-path spend without an annex.
const SPEND_TYPE_SCRIPT_PATH: u8 = 1 << 1;

/// Key version of BIP 342 tapscript.
const KEY_VERSION_0: u8 = 0x00;

/// No `OP_CODESEPARATOR` executed.
const NO_CODESEPARATOR: u32 = 0xffff_ffff;

/// Computes the digest to sign when spending input `input_index` of `tx` via the leaf with hash
/// `leaf_hash`.
///
/// `prevouts` are the outputs spent by the inputs of `tx`, in input order.
pub fn script_spend_sighash(
    tx: &Transaction,
    input_index: usize,
    prevouts: &[TxOut],
    leaf_hash: TapLeafHash,
) -> Result<TapSighash, SighashError> {
    if prevouts.len() != tx.input.len() {
        return Err(SighashError::PrevoutsSize {
            inputs: tx.input.len(),
            prevouts: prevouts.len(),
        });
    }

    if input_index >= tx.input.len() {
        return Err(SighashError::InputIndexOutOfBounds {
            index: input_index,
            inputs: tx.input.len(),
        });
    }

    let mut engine = tagged_engine(TaggedHashDomain::TapSighash);

    engine.input(&[SIGHASH_EPOCH, SIGHASH_DEFAULT]);
    encode(&tx.version, &mut engine);
    encode(&tx.lock_time, &mut engine);

    engine.input(&sha_prevouts(tx));
    engine.input(&sha_amounts(prevouts));
    engine.input(&sha_script_pubkeys(prevouts));
    engine.input(&sha_sequences(tx));
    engine.input(&sha_outputs(tx));

    engine.input(&[SPEND_TYPE_SCRIPT_PATH]);
    encode(&(input_index as u32), &mut engine);

    engine.input(leaf_hash.as_byte_array());
    engine.input(&[KEY_VERSION_0]);
    encode(&NO_CODESEPARATOR, &mut engine);

    Ok(TapSighash::from_byte_array(finalize(engine)))
}

fn encode<T: Encodable + ?Sized>(value: &T, engine: &mut sha256::HashEngine) {
    value
        .consensus_encode(engine)
        .expect("engines don't error");
}

fn sha_prevouts(tx: &Transaction) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    for input in &tx.input {
        encode(&input.previous_output, &mut engine);
    }

    sha256::Hash::from_engine(engine).to_byte_array()
}

fn sha_amounts(prevouts: &[TxOut]) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    for prevout in prevouts {
        encode(&prevout.value.to_sat(), &mut engine);
    }

    sha256::Hash::from_engine(engine).to_byte_array()
}

fn sha_script_pubkeys(prevouts: &[TxOut]) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    for prevout in prevouts {
        encode(&prevout.script_pubkey, &mut engine);
    }

    sha256::Hash::from_engine(engine).to_byte_array()
}

fn sha_sequences(tx: &Transaction) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    for input in &tx.input {
        encode(&input.sequence, &mut engine);
    }

    sha256::Hash::from_engine(engine).to_byte_array()
}

fn sha_outputs(tx: &Transaction) -> [u8; 32] {
    let mut engine = sha256::Hash::engine();
    for output in &tx.output {
        encode(output, &mut engine);
    }

    sha256::Hash::from_engine(engine).to_byte_array()
}
