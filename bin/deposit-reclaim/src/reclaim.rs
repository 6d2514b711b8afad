//! Creates the reclaim transaction from the command-line arguments.

use bitcoin::{key::Secp256k1, Address, Amount};
use strata_reclaim_tx_builder::prelude::*;
use tracing::{debug, info};

use crate::{
    amount::parse_btc_amount,
    args::Args,
    config::load_params,
    errors::{CliError, UserInputError},
};

/// Builds the signed reclaim transaction described by `args` and returns it as hex.
pub(crate) fn create_reclaim_tx(args: &Args) -> Result<String, CliError> {
    let params = match &args.params {
        Some(path) => load_params(path)?,
        None => ReclaimParams::testnet(),
    };

    let deposit_amount = parse_btc_amount("amount", &args.amount)?;
    let fee = parse_btc_amount("fee", &args.fee)?;
    if fee == Amount::ZERO {
        return Err(UserInputError::ZeroFee)?;
    }

    let secret_key = parse_secret_key(&args.private_key)?;
    let info = ReclaimInfo::parse(
        params.network,
        &args.address,
        &args.evm_address,
        &args.txid,
        args.vout,
        deposit_amount,
        fee,
    )?;

    debug!(
        deposit = %info.deposit_outpoint(),
        %deposit_amount,
        %fee,
        "parsed reclaim request"
    );

    if let Some(expected) = &args.deposit_address {
        check_deposit_address(&params, &info, expected)?;
    }

    let tx_hex = build_reclaim_tx_hex(&params, &secret_key, &info)?;

    Ok(tx_hex)
}

/// Checks that the deposit tree rebuilt for `info` commits to the `expected` deposit address.
fn check_deposit_address(
    params: &ReclaimParams,
    info: &ReclaimInfo,
    expected: &str,
) -> Result<(), CliError> {
    let expected_address = expected
        .parse::<Address<_>>()
        .map_err(|e| UserInputError::InvalidDepositAddress(e.to_string()))?
        .require_network(params.network)
        .map_err(|e| UserInputError::InvalidDepositAddress(e.to_string()))?;

    let builder = TxBuilder::new(params.clone(), Secp256k1::new())?;
    let derived = info.tap_tree(&builder)?.deposit_address(params.network);

    if derived != expected_address {
        return Err(UserInputError::DepositAddressMismatch {
            expected: expected.to_owned(),
            derived,
        })?;
    }

    info!(deposit_address = %derived, "deposit address matches the rebuilt tree");

    Ok(())
}

/// Formats the message shown to the user for a signed transaction.
pub(crate) fn render_output(tx_hex: &str) -> String {
    format!(
        "Hex for the reclaim tx:\n{tx_hex}\nYou can broadcast the tx using the following link:\n{BROADCAST_URL}\n"
    )
}
