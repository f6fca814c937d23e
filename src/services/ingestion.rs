use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::domain::AliasTable;
use crate::match_store::merge_matches;
use crate::parser::ScoreboardParser;
use crate::storage::{ALIAS_TABLE_FILE, MATCH_LOG_FILE, Store};

/// Outcome of one ingestion pass over a scoreboard dump.
pub struct IngestReport {
    pub parsed: usize,
    pub new_count: usize,
    pub total: usize,
}

pub struct IngestionService {
    store: Store,
    parser: ScoreboardParser,
}

impl IngestionService {
    pub fn new(store: Store) -> Result<Self> {
        Ok(Self {
            store,
            parser: ScoreboardParser::new()?,
        })
    }

    pub fn run(&self, input: &Path) -> Result<IngestReport> {
        let text = fs::read_to_string(input)
            .with_context(|| format!("Failed to read scoreboard file {}", input.display()))?;
        self.ingest_text(&text)
    }

    /// Parse scoreboard text and merge the result into the match log.
    /// The log file is rewritten whole, newest match first.
    pub fn ingest_text(&self, text: &str) -> Result<IngestReport> {
        info!("=== Starting Scoreboard Ingestion ===\n");

        let aliases = self.load_aliases()?;

        let incoming = self.parser.parse(text, &aliases);
        let parsed = incoming.len();
        info!("  → Parsed {} matches from input\n", parsed);

        let existing = self.store.load_jsonl(MATCH_LOG_FILE)?;
        info!("  → Loaded {} stored matches\n", existing.len());

        let (merged, new_count) = merge_matches(existing, incoming);
        self.store.save_jsonl(MATCH_LOG_FILE, &merged)?;
        info!("  → Merged: {} new, {} in log\n", new_count, merged.len());

        info!("=== Ingestion Complete ===");
        Ok(IngestReport {
            parsed,
            new_count,
            total: merged.len(),
        })
    }

    fn load_aliases(&self) -> Result<AliasTable> {
        Ok(self.store.load_json(ALIAS_TABLE_FILE)?.unwrap_or_default())
    }
}
