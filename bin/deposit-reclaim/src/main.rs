//! Creates the transaction with which a depositor takes back a deposit whose timelock has expired.
//!
//! The transaction is only printed, broadcasting it is left to the user.

mod amount;
mod args;
mod config;
mod errors;
mod reclaim;

use std::{
    io::{self, Write},
    process,
};

use args::Args;
use errors::CliError;
use reclaim::{create_reclaim_tx, render_output};
use strata_common::logging::{self, LoggerConfig};

fn main() {
    let args: Args = argh::from_env();

    logging::init(LoggerConfig::with_base_name("deposit-reclaim"));

    if let Err(e) = run(&args) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let tx_hex = create_reclaim_tx(args)?;

    io::stdout()
        .lock()
        .write_all(render_output(&tx_hex).as_bytes())
        .map_err(|e| CliError::Internal(e.into()))?;

    Ok(())
}
