use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::{AliasTable, PlayerMatchStat};

use super::scoreboard::PLAYER_TABLE_MARKER;

/// A stats line needs at least ping, kills, assists and deaths to count
const MIN_STAT_FIELDS: usize = 4;

/// Parses the (name line, stats line) pair that makes up one player entry
/// in the scoreboard table.
pub struct StatLineParser {
    star_count_regex: Regex,
    percentage_regex: Regex,
}

impl StatLineParser {
    pub fn new() -> Result<Self> {
        let star_count_regex =
            Regex::new(r"★(\d+)").context("Failed to compile MVP star regex")?;
        let percentage_regex =
            Regex::new(r"(\d+)%").context("Failed to compile percentage regex")?;

        Ok(Self {
            star_count_regex,
            percentage_regex,
        })
    }

    /// Returns `None` when the pair is not a valid player entry: a blank
    /// name, the table header itself, or fewer than four stat fields.
    pub fn parse_pair(
        &self,
        name_line: &str,
        stats_line: &str,
        aliases: &AliasTable,
    ) -> Option<PlayerMatchStat> {
        let name = name_line.trim();
        if name.is_empty() || name == PLAYER_TABLE_MARKER {
            return None;
        }

        let parts: Vec<&str> = stats_line.split('\t').map(str::trim).collect();
        if parts.len() < MIN_STAT_FIELDS {
            return None;
        }

        Some(PlayerMatchStat {
            name: aliases.normalize(name),
            ping: parse_numeric(parts[0]),
            kills: parse_numeric(parts[1]),
            assists: parse_numeric(parts[2]),
            deaths: parse_numeric(parts[3]),
            mvp_stars: self.parse_mvp_stars(parts.get(4).copied().unwrap_or("")),
            headshot_percentage: self.parse_percentage(parts.get(5).copied().unwrap_or("")),
            score: parts.get(6).map(|p| parse_numeric(p)).unwrap_or(0),
        })
    }

    /// `""` ⇒ 0, `"★"` ⇒ 1, `"★3"` ⇒ 3
    pub fn parse_mvp_stars(&self, text: &str) -> u32 {
        let text = text.trim();
        if text.is_empty() {
            return 0;
        }

        if let Some(captures) = self.star_count_regex.captures(text) {
            return captures[1].parse().unwrap_or(1);
        }

        if text.contains('★') { 1 } else { 0 }
    }

    /// `"45%"` ⇒ Some(45); anything else is absent, not zero
    pub fn parse_percentage(&self, text: &str) -> Option<u32> {
        let captures = self.percentage_regex.captures(text.trim())?;
        captures[1].parse().ok()
    }
}

/// Numeric stat fields that are not a pure digit run default to 0.
fn parse_numeric(text: &str) -> i64 {
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        text.parse().unwrap_or(0)
    } else {
        0
    }
}
