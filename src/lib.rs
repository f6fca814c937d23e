pub mod balance;
pub mod cli;
pub mod config;
pub mod domain;
pub mod fetchers;
pub mod match_store;
pub mod parser;
pub mod rating;
pub mod services;
pub mod storage;

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use colored::Colorize;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::{PlayerRating, SkillProfile, TeamConfiguration};
use crate::fetchers::LeetifyClient;
use crate::services::balancing::BalancingService;
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;
use crate::storage::Store;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_ingest(file: &Path) -> Result<()> {
    let config = AppConfig::new();
    let service = IngestionService::new(open_store(&config)?)?;
    let report = service.run(file)?;

    println!(
        "Parsed {} matches, {} new. Total in log: {}",
        report.parsed, report.new_count, report.total
    );
    Ok(())
}

pub fn handle_process(min_games: i32) -> Result<()> {
    let config = AppConfig::new();
    let store = open_store(&config)?;
    let service = ProcessingService::new(config, store);
    let ratings = service.run()?;

    print_rankings(&ratings, min_games);
    Ok(())
}

pub fn handle_balance(names: &[String], attribute: Option<&str>) -> Result<()> {
    let config = AppConfig::new();
    let roster = split_roster_args(names);
    let store = open_store(&config)?;
    let service = BalancingService::new(config, store);

    let configs = match attribute {
        Some(attribute) => {
            let ids = service.load_skill_ids()?;
            let profiles = fetch_skill_profiles(&ids)?;
            service.run_with_profiles(&roster, &profiles, attribute)?
        }
        None => service.run(&roster)?,
    };

    print_configurations(&configs);
    Ok(())
}

fn open_store(config: &AppConfig) -> Result<Store> {
    let data_dir =
        std::env::var("SCRIM_DATA_DIR").unwrap_or_else(|_| config.data.data_dir.clone());
    Store::new(data_dir)
}

fn fetch_skill_profiles(
    ids: &HashMap<String, String>,
) -> Result<HashMap<String, SkillProfile>> {
    let config = AppConfig::new();
    let api_key = std::env::var(config.leetify.api_key_env).unwrap_or_default();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let client = LeetifyClient::new(&config.leetify, api_key)?;
        client.fetch_profiles(ids).await
    })
}

/// Roster names arrive either as separate arguments or comma-joined.
fn split_roster_args(names: &[String]) -> Vec<String> {
    names
        .iter()
        .flat_map(|chunk| chunk.split(','))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn print_rankings(ratings: &[PlayerRating], min_games: i32) {
    println!(
        "{:<4} {:<20} {:>7} {:>7} {:>6} {:>5} {:>7} {:>7}",
        "#", "Player", "ELO", "Change", "Games", "Wins", "Losses", "Win %"
    );

    let visible = ratings.iter().filter(|r| r.games >= min_games);
    for (idx, player) in visible.enumerate() {
        let change = format!("{:+.0}", player.elo_change);
        let change = if player.elo_change >= 0.0 {
            change.green()
        } else {
            change.red()
        };

        println!(
            "{:<4} {:<20} {:>7.0} {:>7} {:>6} {:>5} {:>7} {:>6.1}%",
            idx + 1,
            player.name,
            player.elo,
            change,
            player.games,
            player.wins,
            player.losses,
            player.win_rate
        );
    }
}

fn print_configurations(configs: &[TeamConfiguration]) {
    for config in configs {
        let heading = format!(
            "Configuration #{} - rating difference {:.2}",
            config.rank, config.elo_difference
        );
        println!("\n{}", heading.bold());
        println!(
            "  Team 1 (avg {:.2}): {}",
            config.team1_avg_elo,
            config.team1.join(", ")
        );
        println!(
            "  Team 2 (avg {:.2}): {}",
            config.team2_avg_elo,
            config.team2.join(", ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_args_split_on_commas_and_trim() {
        let args = vec!["alice, bob".to_string(), "carol".to_string(), ",".to_string()];
        assert_eq!(split_roster_args(&args), ["alice", "bob", "carol"]);
    }
}
