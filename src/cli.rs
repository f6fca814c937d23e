use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "scrim scoreboard elo tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Parse a scoreboard dump and merge it into the match log
    Ingest {
        /// Text file with scoreboard content pasted from the game client
        file: PathBuf,
    },
    /// Recompute elo ratings from the match log and print the ranking
    Process {
        /// Hide players with fewer games than this from the printed table
        #[arg(short, long, default_value_t = 1)]
        min_games: i32,
    },
    /// Search balanced team splits for the given roster
    Balance {
        /// Player names, separated by spaces or commas
        #[arg(required = true)]
        names: Vec<String>,
        /// Balance on a skill API attribute (e.g. "aim") instead of stored elo
        #[arg(long)]
        attribute: Option<String>,
    },
}
