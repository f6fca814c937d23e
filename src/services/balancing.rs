use std::collections::HashMap;

use anyhow::Result;
use log::info;

use crate::balance::{balance_teams, project_attribute};
use crate::config::settings::{AppConfig, BalanceSettings};
use crate::domain::{AliasTable, PlayerRating, SkillProfile, TeamConfiguration};
use crate::rating::{RatingMap, rating_map};
use crate::storage::{
    ALIAS_TABLE_FILE, BEST_BALANCE_FILE, RATING_SNAPSHOT_FILE, SKILL_IDS_FILE, Store,
};

/// Runs the split search against stored elos (or fetched skill profiles)
/// and keeps the best configuration on disk.
pub struct BalancingService {
    config: AppConfig,
    store: Store,
}

impl BalancingService {
    pub fn new(config: AppConfig, store: Store) -> Self {
        Self { config, store }
    }

    /// Balance the roster on the current elo snapshot.
    pub fn run(&self, names: &[String]) -> Result<Vec<TeamConfiguration>> {
        info!("=== Starting Team Balancing ===\n");

        let roster = self.normalized_roster(names)?;
        let ratings = self.load_snapshot_ratings()?;
        info!("  → {} rated players available\n", ratings.len());

        let configs = balance_teams(&roster, &ratings, &self.config.balance)?;
        self.persist_best(&configs)?;

        info!("=== Balancing Complete ===");
        Ok(configs)
    }

    /// Balance the roster on one attribute of externally fetched skill
    /// profiles instead of stored elo.
    pub fn run_with_profiles(
        &self,
        names: &[String],
        profiles: &HashMap<String, SkillProfile>,
        attribute: &str,
    ) -> Result<Vec<TeamConfiguration>> {
        info!("=== Starting Team Balancing (attribute: {attribute}) ===\n");

        let roster = self.normalized_roster(names)?;
        let ratings = project_attribute(profiles, attribute);
        info!("  → {} profiles carry '{attribute}'\n", ratings.len());

        // External attributes have no meaningful elo baseline; players
        // without a profile count as zero.
        let settings = BalanceSettings {
            team_size: self.config.balance.team_size,
            result_limit: self.config.balance.result_limit,
            fallback_rating: 0.0,
        };

        let configs = balance_teams(&roster, &ratings, &settings)?;
        self.persist_best(&configs)?;

        info!("=== Balancing Complete ===");
        Ok(configs)
    }

    /// Name → external profile id table for the skill API.
    pub fn load_skill_ids(&self) -> Result<HashMap<String, String>> {
        Ok(self.store.load_json(SKILL_IDS_FILE)?.unwrap_or_default())
    }

    fn normalized_roster(&self, names: &[String]) -> Result<Vec<String>> {
        let aliases: AliasTable = self.store.load_json(ALIAS_TABLE_FILE)?.unwrap_or_default();
        Ok(aliases.normalize_all(names))
    }

    fn load_snapshot_ratings(&self) -> Result<RatingMap> {
        let snapshot: Vec<PlayerRating> = self
            .store
            .load_json(RATING_SNAPSHOT_FILE)?
            .unwrap_or_default();
        Ok(rating_map(&snapshot))
    }

    fn persist_best(&self, configs: &[TeamConfiguration]) -> Result<()> {
        if let Some(best) = configs.first() {
            self.store.save_json(BEST_BALANCE_FILE, best)?;
        }
        Ok(())
    }
}
