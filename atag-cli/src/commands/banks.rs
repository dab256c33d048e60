//! `bank` subcommands

use super::App;
use crate::cli::BankCommand;
use crate::CliResult;
use atag_common::banks::{sanitize_bank, BankStore};
use tracing::info;

pub fn run(app: &mut App, command: BankCommand) -> CliResult<()> {
    match command {
        BankCommand::List => {
            let active = app.active_bank();
            for bank in app.bank_store().list_banks()? {
                let marker = if bank == active { "*" } else { " " };
                println!("{} {}", marker, bank);
            }
        }
        BankCommand::Use { name } => {
            let bank = sanitize_bank(&name);
            // Creates the vocabulary file on first use
            app.bank_store().read_vocabulary(&bank)?;
            app.prefs.last_used_bank = Some(bank.clone());
            app.save_prefs()?;
            info!(bank = %bank, "Switched bank");
            println!("Using bank {}", bank);
        }
        BankCommand::Current => println!("{}", app.active_bank()),
    }
    Ok(())
}
