use std::path::PathBuf;

use bitcoin::Address;
use strata_reclaim_tx_builder::errors::{ParamsError, ReclaimTxBuilderError};
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CliError {
    #[error("Invalid input: {0}")]
    UserInput(#[from] UserInputError),

    #[error("Invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("Could not create reclaim transaction: {0}")]
    Build(#[from] ReclaimTxBuilderError),

    #[error("Internal error: {0}")]
    Internal(#[source] anyhow::Error),
}

#[derive(Debug, Error)]
pub(crate) enum UserInputError {
    #[error("{field} must be a non-negative amount in BTC, got {value:?}")]
    InvalidAmount { field: &'static str, value: String },

    #[error("{field} of {value} BTC exceeds the total supply")]
    AmountTooLarge { field: &'static str, value: String },

    #[error("fee must be greater than zero")]
    ZeroFee,

    #[error("invalid deposit address: {0}")]
    InvalidDepositAddress(String),

    #[error("deposit address {expected} does not match {derived} rebuilt from the deposit parameters")]
    DepositAddressMismatch { expected: String, derived: Address },
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,

        #[source]
        source: std::io::Error,
    },

    #[error("malformed params: {0}")]
    Malformed(#[from] toml::de::Error),

    #[error("invalid params: {0}")]
    InvalidParams(#[from] ParamsError),
}
