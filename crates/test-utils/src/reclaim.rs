//! Fixtures for the deposit reclaim transaction.
//!
//! The depositor key and the deposit outpoint are arbitrary, the escrow parameters are the testnet
//! ones. The expected values were computed independently of this codebase.

use std::{collections::HashSet, str::FromStr};

use bitcoin::{Address, Amount, Network, Txid};
use rand::rngs::OsRng;
use secp256k1::{Keypair, PublicKey, SecretKey, SECP256K1};

/// Hex encoding of the depositor's private key.
pub const TEST_SECRET_KEY_HEX: &str =
    "abababababababababababababababababababababababababababababababab";

/// The depositor's BIP 86 taproot address on testnet.
pub const TEST_DEPOSITOR_ADDRESS: &str =
    "tb1pwumwrmky0y5m5vsarnxs5fz37gvaxfcgxrf5zu3slg48pzsdn8zqfcxywh";

/// The output key of [`TEST_DEPOSITOR_ADDRESS`].
pub const TEST_DEPOSITOR_KEY: &str =
    "7736e1eec47929ba321d1ccd0a2451f219d3270830d3417230fa2a708a0d99c4";

/// The execution layer address the deposit was made to.
pub const TEST_EL_ADDRESS: [u8; 20] = [0x11; 20];

/// The txid of the deposit transaction as displayed by explorers.
pub const TEST_DEPOSIT_TXID: &str =
    "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

/// The amount locked in the deposit output.
pub const TEST_DEPOSIT_AMOUNT: Amount = Amount::from_sat(1_000_000_000);

/// The default reclaim fee.
pub const TEST_FEE: Amount = Amount::from_sat(1_000);

/// The taproot address of the deposit output.
pub const TEST_DEPOSIT_ADDRESS: &str =
    "tb1p5j6vy92sh9f795u5dxazk7y8qdx520pdfljnzx3yk883u9zugtesc7fpln";

/// The signature hash of the reclaim input with [`TEST_FEE`].
pub const TEST_RECLAIM_SIGHASH: &str =
    "6d18001a81e524fc86ae43c0323ba1eaee2e078270395822da3e221ee1f06920";

/// The control block proving the reclaim leaf.
pub const TEST_CONTROL_BLOCK: &str = concat!(
    "c0",
    "93c7378d96518a75448821c4f7c8f4bae7ce60f804d03d1f0628dd5dd0f5de51",
    "55724ec6b3cdf37951bf7f304cc545af92580769e735bc7dc650b2ca72d5786a"
);

/// The fully signed reclaim transaction with [`TEST_FEE`].
pub const TEST_RECLAIM_TX_HEX: &str = concat!(
    "02000000",
    "0001",
    "01",
    "1f1e1d1c1b1a191817161514131211100f0e0d0c0b0a090807060504030201000000000000",
    "c9000000",
    "01",
    "18c69a3b00000000",
    "225120",
    "7736e1eec47929ba321d1ccd0a2451f219d3270830d3417230fa2a708a0d99c4",
    "03",
    "40",
    "ad222c0162b5e305860fbf49884f10582efd0c36b632fb1bcf45a271c0f0ed44",
    "b58e47b6b41b87453cf88707356af625a4d59d27a65493dc0c2607f76f1272cd",
    "27",
    "02c800b27520",
    "7736e1eec47929ba321d1ccd0a2451f219d3270830d3417230fa2a708a0d99c4",
    "ac",
    "41",
    "c0",
    "93c7378d96518a75448821c4f7c8f4bae7ce60f804d03d1f0628dd5dd0f5de51",
    "55724ec6b3cdf37951bf7f304cc545af92580769e735bc7dc650b2ca72d5786a",
    "00000000"
);

/// The signature of the reclaim transaction with a fee of 2000 sats.
pub const TEST_RECLAIM_SIG_FEE_2000: &str = concat!(
    "318b9a116174d3dfc9a1548f3287ae5acc0dfc72bdad4ed509debb2a4b852c8e",
    "a813c11e074e6a6b73d78c96be2606fd0f15febdfe296c568eab0ae1630b803b"
);

/// The depositor's private key.
pub fn test_secret_key() -> SecretKey {
    SecretKey::from_str(TEST_SECRET_KEY_HEX).expect("valid test key")
}

/// The deposit txid.
pub fn test_deposit_txid() -> Txid {
    Txid::from_str(TEST_DEPOSIT_TXID).expect("valid test txid")
}

/// The BIP 86 key-path-only taproot address of `secret_key`.
pub fn depositor_address(secret_key: &SecretKey, network: Network) -> Address {
    let (x_only_pk, _) = secret_key.x_only_public_key(SECP256K1);

    Address::p2tr(SECP256K1, x_only_pk, None, network)
}

/// Generate `count` (public key, private key) pairs as two separate [`Vec`].
pub fn generate_keypairs(count: usize) -> (Vec<PublicKey>, Vec<SecretKey>) {
    let mut secret_keys: Vec<SecretKey> = Vec::with_capacity(count);
    let mut pubkeys: Vec<PublicKey> = Vec::with_capacity(count);

    let mut pubkeys_set: HashSet<PublicKey> = HashSet::new();

    while pubkeys_set.len() != count {
        let sk = SecretKey::new(&mut OsRng);
        let keypair = Keypair::from_secret_key(SECP256K1, &sk);
        let pubkey = PublicKey::from_keypair(&keypair);

        if pubkeys_set.insert(pubkey) {
            secret_keys.push(sk);
            pubkeys.push(pubkey);
        }
    }

    (pubkeys, secret_keys)
}
