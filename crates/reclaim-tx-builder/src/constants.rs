//! Constants of the testnet deposit escrow.
//!
//! These are the values the deposit addresses were generated with. Any change here changes the
//! rebuilt script tree and hence the output key of the deposit being reclaimed.

use std::str::FromStr;

use bitcoin::{secp256k1::XOnlyPublicKey, Amount, Network};

/// The network that the deposits are made on.
pub const NETWORK: Network = Network::Testnet;

/// The amount of each deposit that gets bridged, committed to in the bridge-move leaf.
pub const BRIDGE_AMOUNT: Amount = Amount::from_sat(1_000_000_000);

/// Size of the big-endian bridge amount pushed in the bridge-move leaf.
pub const BRIDGE_AMOUNT_SIZE: usize = 8;

/// Tag of the destination chain in the bridge-move leaf.
pub const CHAIN_TAG: &[u8] = b"citrea";

/// The number of blocks after which the depositor can take their funds back.
pub const RECLAIM_AFTER_BLOCKS: u16 = 200;

/// Link where the serialized reclaim transaction can be submitted.
pub const BROADCAST_URL: &str = "https://mempool.space/testnet4/tx/push";

lazy_static::lazy_static! {
    /// The internal key of the deposit taproot output.
    pub static ref INTERNAL_KEY: XOnlyPublicKey =
        XOnlyPublicKey::from_str("93c7378d96518a75448821c4f7c8f4bae7ce60f804d03d1f0628dd5dd0f5de51").unwrap();

    /// The keys of the verifiers that can move the deposit to the bridge.
    pub static ref VERIFIER_KEYS: Vec<XOnlyPublicKey> = vec![
        XOnlyPublicKey::from_str("9fb3a961d8b1f4ec1caa220c6a50b815febc0b689ddf0b9ddfbf99cb74479e41").unwrap(),
    ];
}
