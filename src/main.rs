use anyhow::Result;

use scrim_elo_tracker::cli::Command;
use scrim_elo_tracker::{handle_balance, handle_ingest, handle_process, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Ingest { file } => handle_ingest(file),
        Command::Process { min_games } => handle_process(*min_games),
        Command::Balance { names, attribute } => handle_balance(names, attribute.as_deref()),
    }
}
