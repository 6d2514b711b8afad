//! Parses the caller-supplied inputs of a reclaim into typed values.
//!
//! Everything here runs before any script, hash or signature is computed, so malformed input never
//! reaches the cryptographic code.

use bitcoin::{
    hashes::Hash, secp256k1::SecretKey, Address, AddressType, Network, Txid, XOnlyPublicKey,
};

use crate::errors::{CryptoError, NotTaprootAddress, ParameterError, ReclaimTxBuilderResult};

/// Size of a raw secp256k1 private key.
const SECRET_KEY_SIZE: usize = 32;

/// Size of an execution layer address.
const EL_ADDRESS_SIZE: usize = 20;

/// Size of a txid.
const TXID_SIZE: usize = 32;

/// Extracts the output key from a Pay-to-Taproot address.
pub trait ExtractP2trPubkey {
    /// Returns the x-only key in the witness program of a P2TR address.
    fn extract_p2tr_pubkey(&self) -> Result<XOnlyPublicKey, NotTaprootAddress>;
}

impl ExtractP2trPubkey for Address {
    fn extract_p2tr_pubkey(&self) -> Result<XOnlyPublicKey, NotTaprootAddress> {
        match self.address_type() {
            Some(AddressType::P2tr) => {}
            _ => return Err(NotTaprootAddress),
        }

        let witness_program = self.witness_program().ok_or(NotTaprootAddress)?;

        XOnlyPublicKey::from_slice(witness_program.program().as_bytes())
            .map_err(|_e| NotTaprootAddress)
    }
}

fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>, ParameterError> {
    hex::decode(value).map_err(|e| ParameterError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// Parses the depositor's raw private key from hex.
///
/// # Errors
///
/// Malformed hex is an [`ParameterError::InvalidHex`]. A decoded value that is not a valid
/// secp256k1 scalar, including one of the wrong size, is a [`CryptoError::InvalidKey`].
pub fn parse_secret_key(secret_key: &str) -> ReclaimTxBuilderResult<SecretKey> {
    let bytes = decode_hex("private-key", secret_key)?;

    if bytes.len() != SECRET_KEY_SIZE {
        return Err(CryptoError::InvalidKey)?;
    }

    Ok(SecretKey::from_slice(&bytes).map_err(|_e| CryptoError::InvalidKey)?)
}

/// Parses an execution layer address, with or without a `0x` prefix.
pub fn parse_el_address(el_address: &str) -> Result<[u8; EL_ADDRESS_SIZE], ParameterError> {
    let el_address = el_address.strip_prefix("0x").unwrap_or(el_address);
    let bytes = decode_hex("evm-address", el_address)?;

    bytes
        .as_slice()
        .try_into()
        .map_err(|_e| ParameterError::InvalidLength {
            field: "evm-address",
            expected: EL_ADDRESS_SIZE,
            actual: bytes.len(),
        })
}

/// Parses a txid as displayed by explorers and RPCs.
///
/// The displayed form is the reverse of the byte order used on the wire.
pub fn parse_txid(txid: &str) -> Result<Txid, ParameterError> {
    let bytes = decode_hex("txid", txid)?;

    let mut bytes: [u8; TXID_SIZE] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_e| ParameterError::InvalidLength {
                field: "txid",
                expected: TXID_SIZE,
                actual: bytes.len(),
            })?;
    bytes.reverse();

    Ok(Txid::from_byte_array(bytes))
}

/// Parses the depositor's address and checks that it is a P2TR address on `network`.
pub fn parse_depositor_address(address: &str, network: Network) -> Result<Address, ParameterError> {
    let address = address
        .parse::<Address<_>>()
        .map_err(|e| ParameterError::InvalidAddress {
            field: "address",
            reason: e.to_string(),
        })?
        .require_network(network)
        .map_err(|_e| ParameterError::WrongNetwork {
            field: "address",
            network,
        })?;

    address
        .extract_p2tr_pubkey()
        .map_err(|_e| ParameterError::NotTaprootAddress { field: "address" })?;

    Ok(address)
}
