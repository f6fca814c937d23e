use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Numeric attribute map returned by the external skill-rating API
/// (aim, positioning, utility and friends).
pub type SkillProfile = HashMap<String, f64>;

/// One player's row in a scoreboard, as captured from the pasted text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerMatchStat {
    pub name: String,
    pub ping: i64,
    pub kills: i64,
    pub assists: i64,
    pub deaths: i64,
    pub mvp_stars: u32,
    pub headshot_percentage: Option<u32>,
    pub score: i64,
}

/// Which side took the match. `Undecided` covers draws and score-less
/// partial parses and is skipped by the rating replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WinningTeam {
    Undecided,
    TeamOne,
    TeamTwo,
}

impl Default for WinningTeam {
    fn default() -> Self {
        WinningTeam::Undecided
    }
}

impl From<WinningTeam> for u8 {
    fn from(value: WinningTeam) -> Self {
        match value {
            WinningTeam::Undecided => 0,
            WinningTeam::TeamOne => 1,
            WinningTeam::TeamTwo => 2,
        }
    }
}

impl TryFrom<u8> for WinningTeam {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WinningTeam::Undecided),
            1 => Ok(WinningTeam::TeamOne),
            2 => Ok(WinningTeam::TeamTwo),
            other => Err(format!("invalid winning_team value: {other}")),
        }
    }
}

impl WinningTeam {
    /// Strictly greater score wins; equal scores stay undecided.
    pub fn from_scores(team1_score: i64, team2_score: i64) -> Self {
        if team1_score > team2_score {
            WinningTeam::TeamOne
        } else if team2_score > team1_score {
            WinningTeam::TeamTwo
        } else {
            WinningTeam::Undecided
        }
    }
}

/// Canonical record of a single match, one JSON object per line in the log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub map: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_duration: Option<String>,
    #[serde(default)]
    pub team1_score: i64,
    #[serde(default)]
    pub team2_score: i64,
    #[serde(default)]
    pub team1_players: Vec<PlayerMatchStat>,
    #[serde(default)]
    pub team2_players: Vec<PlayerMatchStat>,
    #[serde(default)]
    pub winning_team: WinningTeam,
}

impl MatchRecord {
    pub fn is_rateable(&self) -> bool {
        !self.team1_players.is_empty()
            && !self.team2_players.is_empty()
            && self.winning_team != WinningTeam::Undecided
    }
}

/// A player's rating snapshot row, regenerated from scratch on every recompute
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerRating {
    pub name: String,
    pub elo: f64,
    pub initial_elo: f64,
    pub elo_change: f64,
    pub games: i32,
    pub wins: i32,
    pub losses: i32,
    pub win_rate: f64,
}

/// One ranked team split produced by the balancer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamConfiguration {
    pub rank: usize,
    pub team1: Vec<String>,
    pub team2: Vec<String>,
    pub team1_avg_elo: f64,
    pub team2_avg_elo: f64,
    pub elo_difference: f64,
    pub team1_elos: HashMap<String, f64>,
    pub team2_elos: HashMap<String, f64>,
}
