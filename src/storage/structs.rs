use anyhow::{Context, Result};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const MATCH_LOG_FILE: &str = "matches.jsonl";
pub const RATING_SNAPSHOT_FILE: &str = "player_elos.json";
pub const ALIAS_TABLE_FILE: &str = "player_aliases.json";
pub const INITIAL_ELOS_FILE: &str = "initial_elos.json";
pub const BEST_BALANCE_FILE: &str = "balanced_teams.json";
pub const SKILL_IDS_FILE: &str = "skill_ids.json";

/// File-backed store for the match log and the derived snapshots. Every
/// writer rewrites its file whole; a missing file reads as an empty
/// baseline, never an error.
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    /// Open (and create if needed) a store rooted at `data_dir`.
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();
        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;
        Ok(Self { data_dir })
    }

    /// Save data as pretty-printed JSON
    pub fn save_json<T: Serialize>(&self, file_name: &str, data: &T) -> Result<()> {
        let file_path = self.build_path(file_name);

        let json = serde_json::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(&file_path, json)
            .with_context(|| format!("Failed to write {}", file_path.display()))?;

        info!("Saved {}", file_path.display());
        Ok(())
    }

    /// Load a JSON file, or `None` when it does not exist yet
    pub fn load_json<T: for<'de> Deserialize<'de>>(&self, file_name: &str) -> Result<Option<T>> {
        let file_path = self.build_path(file_name);
        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;
        let data = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse JSON from {}", file_path.display()))?;

        Ok(Some(data))
    }

    /// Save records as newline-delimited JSON, one object per line
    pub fn save_jsonl<T: Serialize>(&self, file_name: &str, items: &[T]) -> Result<()> {
        let file_path = self.build_path(file_name);

        let mut out = String::new();
        for item in items {
            out.push_str(&serde_json::to_string(item).context("Failed to serialize record")?);
            out.push('\n');
        }
        fs::write(&file_path, out)
            .with_context(|| format!("Failed to write {}", file_path.display()))?;

        info!("Saved {} records to {}", items.len(), file_path.display());
        Ok(())
    }

    /// Load newline-delimited JSON; a missing file is an empty set
    pub fn load_jsonl<T: for<'de> Deserialize<'de>>(&self, file_name: &str) -> Result<Vec<T>> {
        let file_path = self.build_path(file_name);
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read {}", file_path.display()))?;

        let mut items = Vec::new();
        for (line_no, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let item = serde_json::from_str(line).with_context(|| {
                format!("Failed to parse line {} of {}", line_no + 1, file_path.display())
            })?;
            items.push(item);
        }
        Ok(items)
    }

    fn build_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }
}
