use std::io::Write;

use anyhow::Context;
use clap::Args;
use log::info;

use crate::adapter::TransactionAnnouncer;
use crate::model::{MaxFee, SignedTransaction};
use crate::Result;

/// Options shared by the commands announcing a transaction.
#[derive(Debug, Clone, Default, Args)]
pub struct AnnounceTransactionsOptions {
    /// Profile to sign the transaction with.
    #[arg(short = 'p', long, env = "NEM2_CLI_PROFILE")]
    pub profile: Option<String>,

    /// Maximum fee to spend to announce the transaction (absolute amount).
    #[arg(short = 'f', long)]
    pub max_fee: Option<MaxFee>,
}

/// Announce the signed transaction to the node and report it.
pub fn announce_transaction(
    announcer: &dyn TransactionAnnouncer,
    transaction: &SignedTransaction,
    url: &str,
    output: &mut dyn Write,
) -> Result<()> {
    let response = announcer
        .announce(url, transaction)
        .with_context(|| format!("Transaction {} was not announced.", transaction.hash))?;
    info!("Transaction {} announced: {}", transaction.hash, response.message);

    writeln!(output, "Transaction announced correctly")?;
    writeln!(output, "Hash:    {}", transaction.hash)?;
    writeln!(output, "Signer:  {}", transaction.signer)?;

    Ok(())
}
