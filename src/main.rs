use std::{io::stdout, path::PathBuf};

use clap::{Parser, Subcommand};
use log::{debug, error, info};

use nem2_cli::{
    adapter::{HttpTransactionAnnouncer, JsonFileProfileStorage, TerminalPrompter},
    command::{AccountMosaicRestrictionCommand, CommandOptions},
    service::ProfileManager,
    Result,
};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "nem2_cli", version, about = "NEM2 wallet command line interface")]
struct CLIArguments {
    /// Path of the profile file (defaults to ~/.nem2rc.json).
    #[arg(long, global = true, env = "NEM2_CLI_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Announce transactions.
    #[command(subcommand)]
    Transaction(TransactionCommand),
}

#[derive(Debug, Subcommand)]
enum TransactionCommand {
    /// Allow or block incoming transactions containing a given set of mosaics.
    #[command(name = "accountmosaicrestriction")]
    AccountMosaicRestriction(CommandOptions),
}

struct Application {
    storage: JsonFileProfileStorage,
}

impl Application {
    fn new(config: Option<PathBuf>) -> Result<Self> {
        let storage = match config {
            Some(path) => JsonFileProfileStorage::new(path),
            None => JsonFileProfileStorage::in_home_directory()?,
        };

        Ok(Self { storage })
    }

    fn run(self, command: Command) -> Result<()> {
        info!("Starting NEM2_CLI version {}", env!("CARGO_PKG_VERSION"));
        debug!("Using profile file: '{}'.", self.storage.path().display());

        let profile_manager = ProfileManager::new(self.storage);

        match command {
            Command::Transaction(TransactionCommand::AccountMosaicRestriction(options)) => {
                let command = AccountMosaicRestrictionCommand::new(
                    profile_manager,
                    HttpTransactionAnnouncer::new()?,
                );
                command.execute(options, TerminalPrompter::stdio(), &mut stdout())?;
            }
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    let arguments = CLIArguments::parse();
    env_logger::init();
    let application = Application::new(arguments.config)?;

    let result = application.run(arguments.command);

    match &result {
        Ok(_) => {
            info!("NEM2_CLI completed successfully");
        }
        Err(error) => {
            error!("NEM2_CLI failed with error: {:#}", error);
        }
    };

    result
}
