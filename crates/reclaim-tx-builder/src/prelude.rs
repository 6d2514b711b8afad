//! Re-exports of the types and functions needed to build a reclaim transaction.

pub use super::{
    builder::{TxBuilder, TxSigningData},
    constants::BROADCAST_URL,
    errors::{ReclaimTxBuilderError, ReclaimTxBuilderResult},
    params::ReclaimParams,
    parse::{parse_secret_key, ExtractP2trPubkey},
    reclaim::{build_reclaim_tx, build_reclaim_tx_hex, ReclaimInfo},
    taproot::ReclaimTapTree,
    TxKind,
};
