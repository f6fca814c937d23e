use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};
use log::info;

use crate::config::settings::BalanceSettings;
use crate::domain::{SkillProfile, TeamConfiguration};
use crate::rating::RatingMap;
use crate::rating::types::round2;

use super::combinations::IndexCombinations;

/// Exhaustive search over team splits of the roster. Enumerates every
/// C(2N, N) choice of team one, drops the mirrored duplicates, and ranks
/// the unique splits by the gap between the two sides' average ratings.
/// No pruning; practical only for small fixed team sizes.
///
/// Fails when the roster does not hold exactly `2 * team_size` names.
pub fn balance_teams(
    roster: &[String],
    ratings: &RatingMap,
    settings: &BalanceSettings,
) -> Result<Vec<TeamConfiguration>> {
    let expected = settings.team_size * 2;
    if roster.len() != expected {
        bail!("Need exactly {} players, got {}", expected, roster.len());
    }

    let mut seen: HashSet<(Vec<String>, Vec<String>)> = HashSet::new();
    let mut splits: Vec<Split> = Vec::new();

    for combo in IndexCombinations::new(roster.len(), settings.team_size) {
        let (team1, team2) = split_roster(roster, &combo);
        if !seen.insert(canonical_pair(&team1, &team2)) {
            continue;
        }

        splits.push(Split::new(team1, team2, ratings, settings.fallback_rating));
    }

    info!(
        "Evaluated {} unique splits for a roster of {}",
        splits.len(),
        roster.len()
    );

    splits.sort_by(|a, b| {
        a.difference
            .partial_cmp(&b.difference)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    splits.truncate(settings.result_limit);

    Ok(splits
        .into_iter()
        .enumerate()
        .map(|(idx, split)| split.into_configuration(idx + 1, ratings, settings.fallback_rating))
        .collect())
}

/// Project one attribute (e.g. `"aim"`) out of fetched skill profiles so
/// the same split search can run on an external rating instead of elo.
/// Missing attributes simply stay absent and hit the balancer fallback.
pub fn project_attribute(
    profiles: &HashMap<String, SkillProfile>,
    attribute: &str,
) -> RatingMap {
    profiles
        .iter()
        .filter_map(|(name, profile)| {
            profile.get(attribute).map(|value| (name.clone(), *value))
        })
        .collect()
}

struct Split {
    team1: Vec<String>,
    team2: Vec<String>,
    team1_avg: f64,
    team2_avg: f64,
    difference: f64,
}

impl Split {
    fn new(team1: Vec<String>, team2: Vec<String>, ratings: &RatingMap, fallback: f64) -> Self {
        let team1_avg = side_average(&team1, ratings, fallback);
        let team2_avg = side_average(&team2, ratings, fallback);

        Self {
            team1,
            team2,
            team1_avg,
            team2_avg,
            difference: (team1_avg - team2_avg).abs(),
        }
    }

    fn into_configuration(
        self,
        rank: usize,
        ratings: &RatingMap,
        fallback: f64,
    ) -> TeamConfiguration {
        let team1 = sort_by_rating_descending(self.team1, ratings, fallback);
        let team2 = sort_by_rating_descending(self.team2, ratings, fallback);

        TeamConfiguration {
            rank,
            team1_elos: member_ratings(&team1, ratings, fallback),
            team2_elos: member_ratings(&team2, ratings, fallback),
            team1,
            team2,
            team1_avg_elo: round2(self.team1_avg),
            team2_avg_elo: round2(self.team2_avg),
            elo_difference: round2(self.difference),
        }
    }
}

fn split_roster(roster: &[String], combo: &[usize]) -> (Vec<String>, Vec<String>) {
    let mut in_team1 = vec![false; roster.len()];
    for &idx in combo {
        in_team1[idx] = true;
    }

    let team1 = combo.iter().map(|&idx| roster[idx].clone()).collect();
    let team2 = roster
        .iter()
        .enumerate()
        .filter(|(idx, _)| !in_team1[*idx])
        .map(|(_, name)| name.clone())
        .collect();
    (team1, team2)
}

/// Order-insensitive identity of a split: both sides sorted, then the
/// pair itself sorted, so a split and its mirror collapse to one key.
fn canonical_pair(team1: &[String], team2: &[String]) -> (Vec<String>, Vec<String>) {
    let mut one = team1.to_vec();
    let mut two = team2.to_vec();
    one.sort();
    two.sort();
    if one <= two { (one, two) } else { (two, one) }
}

fn lookup(name: &str, ratings: &RatingMap, fallback: f64) -> f64 {
    ratings.get(name).copied().unwrap_or(fallback)
}

fn side_average(side: &[String], ratings: &RatingMap, fallback: f64) -> f64 {
    let total: f64 = side.iter().map(|name| lookup(name, ratings, fallback)).sum();
    total / side.len() as f64
}

/// Display ordering inside a side; does not affect the ranking.
fn sort_by_rating_descending(
    mut side: Vec<String>,
    ratings: &RatingMap,
    fallback: f64,
) -> Vec<String> {
    side.sort_by(|a, b| {
        lookup(b, ratings, fallback)
            .partial_cmp(&lookup(a, ratings, fallback))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    side
}

fn member_ratings(side: &[String], ratings: &RatingMap, fallback: f64) -> HashMap<String, f64> {
    side.iter()
        .map(|name| (name.clone(), round2(lookup(name, ratings, fallback))))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn settings(team_size: usize, result_limit: usize) -> BalanceSettings {
        BalanceSettings {
            team_size,
            result_limit,
            fallback_rating: 1000.0,
        }
    }

    #[test]
    fn wrong_roster_size_is_a_validation_error() {
        let roster = names(&["a", "b", "c"]);
        let result = balance_teams(&roster, &RatingMap::new(), &settings(2, 5));
        assert!(result.is_err());
    }

    #[test]
    fn ten_player_roster_yields_unique_splits() {
        let roster: Vec<String> = (0..10).map(|i| format!("p{i}")).collect();
        let mut ratings = RatingMap::new();
        for (i, name) in roster.iter().enumerate() {
            ratings.insert(name.clone(), 900.0 + (i as f64) * 25.0);
        }

        let configs = balance_teams(&roster, &ratings, &settings(5, 300)).unwrap();
        assert_eq!(configs.len(), 126);

        let mut keys = HashSet::new();
        for config in &configs {
            assert!(keys.insert(canonical_pair(&config.team1, &config.team2)));
        }

        let best = configs[0].elo_difference;
        assert!(configs.iter().all(|c| c.elo_difference >= best));
    }

    #[test]
    fn best_split_pairs_strong_with_weak() {
        let roster = names(&["a", "b", "c", "d"]);
        let mut ratings = RatingMap::new();
        ratings.insert("a".to_string(), 1200.0);
        ratings.insert("b".to_string(), 1100.0);
        ratings.insert("c".to_string(), 1000.0);
        ratings.insert("d".to_string(), 900.0);

        let configs = balance_teams(&roster, &ratings, &settings(2, 5)).unwrap();
        let best = &configs[0];

        assert_eq!(best.rank, 1);
        assert_eq!(best.elo_difference, 0.0);
        let mut sides = [best.team1.clone(), best.team2.clone()];
        sides.sort();
        assert_eq!(sides[0], names(&["a", "d"]));
        assert_eq!(sides[1], names(&["b", "c"]));
    }

    #[test]
    fn unknown_players_use_the_fallback_rating() {
        let roster = names(&["a", "b", "x", "y"]);
        let mut ratings = RatingMap::new();
        ratings.insert("a".to_string(), 1000.0);
        ratings.insert("b".to_string(), 1000.0);

        let configs = balance_teams(&roster, &ratings, &settings(2, 1)).unwrap();
        assert_eq!(configs[0].elo_difference, 0.0);
        assert_eq!(configs[0].team1_elos.len(), 2);
    }

    #[test]
    fn sides_are_listed_strongest_first() {
        let roster = names(&["a", "b", "c", "d"]);
        let mut ratings = RatingMap::new();
        ratings.insert("a".to_string(), 900.0);
        ratings.insert("b".to_string(), 1300.0);
        ratings.insert("c".to_string(), 1100.0);
        ratings.insert("d".to_string(), 1000.0);

        let configs = balance_teams(&roster, &ratings, &settings(2, 10)).unwrap();
        for config in configs {
            let t1: Vec<f64> = config
                .team1
                .iter()
                .map(|n| lookup(n, &ratings, 1000.0))
                .collect();
            assert!(t1.windows(2).all(|w| w[0] >= w[1]));
        }
    }

    #[test]
    fn result_limit_caps_the_returned_slice() {
        let roster: Vec<String> = (0..10).map(|i| format!("p{i}")).collect();
        let configs = balance_teams(&roster, &RatingMap::new(), &settings(5, 5)).unwrap();
        assert_eq!(configs.len(), 5);
    }

    #[test]
    fn attribute_projection_feeds_the_same_search() {
        let mut profiles: HashMap<String, SkillProfile> = HashMap::new();
        for (name, aim) in [("a", 80.0), ("b", 60.0), ("c", 55.0), ("d", 35.0)] {
            let mut profile = SkillProfile::new();
            profile.insert("aim".to_string(), aim);
            profile.insert("utility".to_string(), 50.0);
            profiles.insert(name.to_string(), profile);
        }

        let aim = project_attribute(&profiles, "aim");
        let roster = names(&["a", "b", "c", "d"]);
        let zero_fallback = BalanceSettings {
            team_size: 2,
            result_limit: 1,
            fallback_rating: 0.0,
        };

        let configs = balance_teams(&roster, &aim, &zero_fallback).unwrap();
        let best = &configs[0];
        let mut sides = [best.team1.clone(), best.team2.clone()];
        sides.sort();
        assert_eq!(sides[0], names(&["a", "d"]));

        assert!(project_attribute(&profiles, "clutch").is_empty());
    }
}
