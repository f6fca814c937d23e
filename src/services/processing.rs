use anyhow::Result;
use log::info;
use serde_json::Value;

use crate::config::settings::AppConfig;
use crate::domain::{AliasTable, MatchRecord, PlayerRating};
use crate::rating::{self, RatingMap};
use crate::storage::{ALIAS_TABLE_FILE, INITIAL_ELOS_FILE, MATCH_LOG_FILE, RATING_SNAPSHOT_FILE, Store};

/// Recomputes the full rating snapshot from the match log. The snapshot
/// is regenerated from scratch on every run, never patched.
pub struct ProcessingService {
    config: AppConfig,
    store: Store,
}

impl ProcessingService {
    pub fn new(config: AppConfig, store: Store) -> Self {
        Self { config, store }
    }

    pub fn run(&self) -> Result<Vec<PlayerRating>> {
        info!("=== Starting Rating Recompute ===\n");

        let aliases = self.load_aliases()?;
        let overrides = self.load_overrides(&aliases)?;
        info!("  → {} initial elo overrides\n", overrides.len());

        let records: Vec<MatchRecord> = self.store.load_jsonl(MATCH_LOG_FILE)?;
        info!("  → Loaded {} matches from log\n", records.len());

        let ratings = rating::calculate_ratings(&records, &self.config.rating, &overrides);
        self.store.save_json(RATING_SNAPSHOT_FILE, &ratings)?;
        info!("  → Snapshot covers {} players\n", ratings.len());

        info!("=== Recompute Complete ===");
        Ok(ratings)
    }

    fn load_aliases(&self) -> Result<AliasTable> {
        Ok(self.store.load_json(ALIAS_TABLE_FILE)?.unwrap_or_default())
    }

    fn load_overrides(&self, aliases: &AliasTable) -> Result<RatingMap> {
        match self.store.load_json::<Value>(INITIAL_ELOS_FILE)? {
            Some(value) => Ok(rating::parse_initial_elos(&value, aliases)),
            None => Ok(RatingMap::new()),
        }
    }
}
