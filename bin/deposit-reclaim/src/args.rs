//! Parses command-line arguments for the deposit-reclaim CLI.

use std::path::PathBuf;

use argh::FromArgs;

/// The fee paid by the reclaim transaction if none is given, in BTC.
pub(crate) const DEFAULT_FEE: &str = "0.00001";

#[derive(Debug, FromArgs)]
#[argh(name = "deposit-reclaim")]
#[argh(
    description = "Creates the transaction that takes a deposit back to the depositor after its timelock has expired"
)]
pub(crate) struct Args {
    #[argh(
        option,
        description = "hex encoded private key that controls the depositor address"
    )]
    pub private_key: String,

    #[argh(
        option,
        description = "taproot address that the deposit was made from and that receives the funds"
    )]
    pub address: String,

    #[argh(
        option,
        description = "EVM address that the deposit was made to, with or without the 0x prefix"
    )]
    pub evm_address: String,

    #[argh(option, description = "txid of the deposit transaction")]
    pub txid: String,

    #[argh(option, description = "index of the deposit output in the deposit transaction")]
    pub vout: u32,

    #[argh(option, description = "amount of the deposit output in BTC")]
    pub amount: String,

    #[argh(
        option,
        default = "String::from(DEFAULT_FEE)",
        description = "fee paid by the reclaim transaction in BTC (default: 0.00001)"
    )]
    pub fee: String,

    #[argh(
        option,
        description = "path to a TOML file with the deposit parameters (default: built-in testnet parameters)"
    )]
    pub params: Option<PathBuf>,

    #[argh(
        option,
        description = "address of the deposit output; if given, the address rebuilt from the parameters must match it"
    )]
    pub deposit_address: Option<String>,
}
