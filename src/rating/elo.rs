use std::collections::HashMap;

use log::info;

use crate::config::settings::RatingSettings;
use crate::domain::{MatchRecord, PlayerMatchStat, PlayerRating, WinningTeam, parse_scoreboard_date};

use super::types::{RatingMap, round2};

/// Replays match history in chronological order and produces the rating
/// snapshot. Pure function of its inputs; every recompute starts from
/// scratch.
pub fn calculate_ratings(
    records: &[MatchRecord],
    settings: &RatingSettings,
    initial_overrides: &RatingMap,
) -> Vec<PlayerRating> {
    info!("Replaying {} matches for rating calculation", records.len());

    let ordered = chronological(records);

    let mut ledger: HashMap<String, PlayerLedger> = HashMap::new();
    let mut encounter_order: Vec<String> = Vec::new();

    let mut rated = 0;
    for record in ordered {
        if !record.is_rateable() {
            continue;
        }
        apply_match(record, settings, initial_overrides, &mut ledger, &mut encounter_order);
        rated += 1;
    }

    info!("Rated {} matches covering {} players", rated, ledger.len());
    build_snapshot(&ledger, &encounter_order)
}

/// Standard logistic expected score with team averages as proxy ratings.
pub fn expected_score(own_avg: f64, other_avg: f64) -> f64 {
    1.0 / (1.0 + 10f64.powf((other_avg - own_avg) / 400.0))
}

/// Per-player running state during the replay. Created on first processed
/// match, never destroyed within a run.
struct PlayerLedger {
    elo: f64,
    initial_elo: f64,
    games: i32,
    wins: i32,
    losses: i32,
}

/// Ascending by best-effort parsed date; unparsable dates replay first in
/// input order. Input ordering must not matter beyond that, so the sort
/// is mandatory and stable.
fn chronological(records: &[MatchRecord]) -> Vec<&MatchRecord> {
    let mut ordered: Vec<&MatchRecord> = records.iter().collect();
    ordered.sort_by_key(|r| parse_scoreboard_date(&r.date));
    ordered
}

fn apply_match(
    record: &MatchRecord,
    settings: &RatingSettings,
    overrides: &RatingMap,
    ledger: &mut HashMap<String, PlayerLedger>,
    encounter_order: &mut Vec<String>,
) {
    for player in record.team1_players.iter().chain(&record.team2_players) {
        ensure_player(&player.name, settings, overrides, ledger, encounter_order);
    }

    let team1_avg = side_average(&record.team1_players, ledger);
    let team2_avg = side_average(&record.team2_players, ledger);

    let team1_won = record.winning_team == WinningTeam::TeamOne;
    apply_side(
        &record.team1_players,
        expected_score(team1_avg, team2_avg),
        team1_won,
        settings.k_factor,
        ledger,
    );
    apply_side(
        &record.team2_players,
        expected_score(team2_avg, team1_avg),
        !team1_won,
        settings.k_factor,
        ledger,
    );
}

fn ensure_player(
    name: &str,
    settings: &RatingSettings,
    overrides: &RatingMap,
    ledger: &mut HashMap<String, PlayerLedger>,
    encounter_order: &mut Vec<String>,
) {
    if ledger.contains_key(name) {
        return;
    }

    let initial = overrides
        .get(name)
        .copied()
        .unwrap_or(settings.default_initial_elo);
    ledger.insert(
        name.to_string(),
        PlayerLedger {
            elo: initial,
            initial_elo: initial,
            games: 0,
            wins: 0,
            losses: 0,
        },
    );
    encounter_order.push(name.to_string());
}

/// Arithmetic mean of the side's pre-update ratings.
fn side_average(players: &[PlayerMatchStat], ledger: &HashMap<String, PlayerLedger>) -> f64 {
    let total: f64 = players
        .iter()
        .filter_map(|p| ledger.get(&p.name))
        .map(|l| l.elo)
        .sum();
    total / players.len() as f64
}

/// Every member of a side moves by the same team-average-driven delta.
/// Deliberately not per-player-expected; the uniform delta is part of the
/// rating model.
fn apply_side(
    players: &[PlayerMatchStat],
    expected: f64,
    won: bool,
    k_factor: f64,
    ledger: &mut HashMap<String, PlayerLedger>,
) {
    let actual = if won { 1.0 } else { 0.0 };
    let delta = k_factor * (actual - expected);

    for player in players {
        if let Some(entry) = ledger.get_mut(&player.name) {
            entry.elo += delta;
            entry.games += 1;
            if won {
                entry.wins += 1;
            } else {
                entry.losses += 1;
            }
        }
    }
}

/// One snapshot row per player, ordered by final elo descending with ties
/// kept in first-encounter order.
fn build_snapshot(
    ledger: &HashMap<String, PlayerLedger>,
    encounter_order: &[String],
) -> Vec<PlayerRating> {
    let mut rows: Vec<PlayerRating> = encounter_order
        .iter()
        .filter_map(|name| ledger.get(name).map(|entry| build_row(name, entry)))
        .collect();

    rows.sort_by(|a, b| b.elo.partial_cmp(&a.elo).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

fn build_row(name: &str, entry: &PlayerLedger) -> PlayerRating {
    let win_rate = if entry.games > 0 {
        entry.wins as f64 / entry.games as f64 * 100.0
    } else {
        0.0
    };

    PlayerRating {
        name: name.to_string(),
        elo: round2(entry.elo),
        initial_elo: round2(entry.initial_elo),
        elo_change: round2(entry.elo - entry.initial_elo),
        games: entry.games,
        wins: entry.wins,
        losses: entry.losses,
        win_rate: round2(win_rate),
    }
}
