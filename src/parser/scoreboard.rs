use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::{AliasTable, MatchRecord, PlayerMatchStat, WinningTeam};

use super::fields::StatLineParser;

/// A line starting with this token opens a new match; the remainder of the
/// line is the map name.
pub(super) const MATCH_HEADER_MARKER: &str = "Competitive";
/// Marks the header row of the player table.
pub(super) const PLAYER_TABLE_MARKER: &str = "Player Name";

const WAIT_TIME_LABEL: &str = "Wait Time:";
const DURATION_LABEL: &str = "Match Duration:";

/// How many lines the metadata scan may consume before giving up and
/// looking for the player table instead.
const META_SCAN_WINDOW: usize = 10;

/// Named states of the line machine. Each state consumes at most one
/// player pair (two lines) per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    SeekHeader,
    ReadDate,
    ReadMeta,
    SeekPlayerHeader,
    ReadTeamOne,
    ReadTeamTwo,
}

/// Line-oriented scoreboard parser. One pass over the input, tolerant of
/// malformed and partial matches; never returns an error from `parse`.
pub struct ScoreboardParser {
    score_line_regex: Regex,
    stat_lines: StatLineParser,
}

impl ScoreboardParser {
    pub fn new() -> Result<Self> {
        let score_line_regex = Regex::new(r"^(\d+)\s*:\s*(\d+)$")
            .context("Failed to compile score line regex")?;

        Ok(Self {
            score_line_regex,
            stat_lines: StatLineParser::new()?,
        })
    }

    /// Parse every match found in a pasted scoreboard dump, in input order.
    /// Captured names are normalized through the alias table.
    pub fn parse(&self, text: &str, aliases: &AliasTable) -> Vec<MatchRecord> {
        Machine::new(self, text, aliases).run()
    }

    fn match_score_line(&self, line: &str) -> Option<(i64, i64)> {
        let captures = self.score_line_regex.captures(line)?;
        let team1 = captures[1].parse().ok()?;
        let team2 = captures[2].parse().ok()?;
        Some((team1, team2))
    }
}

/// In-flight match data, finalized into a `MatchRecord` when the match
/// ends or input runs out.
#[derive(Default)]
struct Draft {
    active: bool,
    map: String,
    date: String,
    wait_time: Option<String>,
    match_duration: Option<String>,
    scores: Option<(i64, i64)>,
    team1: Vec<PlayerMatchStat>,
    team2: Vec<PlayerMatchStat>,
    meta_lines_scanned: usize,
}

struct Machine<'a> {
    parser: &'a ScoreboardParser,
    aliases: &'a AliasTable,
    lines: Vec<&'a str>,
    cursor: usize,
    state: State,
    draft: Draft,
    matches: Vec<MatchRecord>,
}

impl<'a> Machine<'a> {
    fn new(parser: &'a ScoreboardParser, text: &'a str, aliases: &'a AliasTable) -> Self {
        Self {
            parser,
            aliases,
            lines: text.lines().collect(),
            cursor: 0,
            state: State::SeekHeader,
            draft: Draft::default(),
            matches: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<MatchRecord> {
        while self.cursor < self.lines.len() {
            match self.state {
                State::SeekHeader => self.seek_header(),
                State::ReadDate => self.read_date(),
                State::ReadMeta => self.read_meta(),
                State::SeekPlayerHeader => self.seek_player_header(),
                State::ReadTeamOne => self.read_team_one(),
                State::ReadTeamTwo => self.read_team_two(),
            }
        }

        // Input ended mid-match; whatever was captured still counts.
        self.finish_match();
        self.matches
    }

    fn current_line(&self) -> &'a str {
        self.lines[self.cursor].trim()
    }

    fn seek_header(&mut self) {
        let line = self.current_line();
        if line.starts_with(MATCH_HEADER_MARKER) {
            let map = line[MATCH_HEADER_MARKER.len()..].trim().to_string();
            self.draft = Draft {
                active: true,
                map,
                ..Draft::default()
            };
            self.state = State::ReadDate;
        }
        self.cursor += 1;
    }

    fn read_date(&mut self) {
        let line = self.current_line();
        if line.is_empty() {
            self.cursor += 1;
            return;
        }

        // Taken verbatim; validation happens at sort time, not here.
        self.draft.date = line.to_string();
        self.cursor += 1;
        self.state = State::ReadMeta;
    }

    fn read_meta(&mut self) {
        if self.draft.meta_lines_scanned >= META_SCAN_WINDOW {
            self.state = State::SeekPlayerHeader;
            return;
        }

        let line = self.current_line();
        if let Some(value) = label_value(line, DURATION_LABEL) {
            self.draft.match_duration = Some(value);
            self.cursor += 1;
            self.state = State::SeekPlayerHeader;
            return;
        }

        if let Some(value) = label_value(line, WAIT_TIME_LABEL) {
            self.draft.wait_time = Some(value);
        }
        self.draft.meta_lines_scanned += 1;
        self.cursor += 1;
    }

    fn seek_player_header(&mut self) {
        if self.current_line().contains(PLAYER_TABLE_MARKER) {
            self.state = State::ReadTeamOne;
        }
        self.cursor += 1;
    }

    fn read_team_one(&mut self) {
        let line = self.current_line();
        if line.is_empty() {
            self.cursor += 1;
            return;
        }

        if let Some(scores) = self.parser.match_score_line(line) {
            self.draft.scores = Some(scores);
            self.cursor += 1;
            self.state = State::ReadTeamTwo;
            return;
        }

        match self.parse_pair_at_cursor() {
            Some(player) => {
                self.draft.team1.push(player);
                self.cursor += 2;
            }
            // Discard the bad entry, not the match.
            None => self.cursor += 1,
        }
    }

    fn read_team_two(&mut self) {
        let line = self.current_line();
        if line.is_empty() {
            self.cursor += 1;
            return;
        }

        if line.starts_with(MATCH_HEADER_MARKER) {
            self.finish_match();
            self.state = State::SeekHeader;
            return;
        }

        if self.next_line_opens_match() {
            self.finish_match();
            self.cursor += 1;
            self.state = State::SeekHeader;
            return;
        }

        match self.parse_pair_at_cursor() {
            Some(player) => {
                self.draft.team2.push(player);
                self.cursor += 2;
            }
            None => {
                self.cursor += 1;
                // A broken pair after at least one captured player is the
                // end of the roster, not an error.
                if !self.draft.team2.is_empty() {
                    self.finish_match();
                    self.state = State::SeekHeader;
                }
            }
        }
    }

    fn parse_pair_at_cursor(&self) -> Option<PlayerMatchStat> {
        let stats_line = self.lines.get(self.cursor + 1)?;
        self.parser
            .stat_lines
            .parse_pair(self.lines[self.cursor], stats_line, self.aliases)
    }

    fn next_line_opens_match(&self) -> bool {
        self.lines
            .get(self.cursor + 1)
            .map(|l| l.trim().starts_with(MATCH_HEADER_MARKER))
            .unwrap_or(false)
    }

    fn finish_match(&mut self) {
        let draft = std::mem::take(&mut self.draft);
        if !draft.active {
            return;
        }
        if draft.team1.is_empty() && draft.team2.is_empty() {
            return;
        }

        let (team1_score, team2_score) = draft.scores.unwrap_or((0, 0));
        let winning_team = match draft.scores {
            Some((one, two)) => WinningTeam::from_scores(one, two),
            None => WinningTeam::Undecided,
        };

        self.matches.push(MatchRecord {
            date: draft.date,
            map: draft.map,
            wait_time: draft.wait_time,
            match_duration: draft.match_duration,
            team1_score,
            team2_score,
            team1_players: draft.team1,
            team2_players: draft.team2,
            winning_team,
        });
    }
}

fn label_value(line: &str, label: &str) -> Option<String> {
    let idx = line.find(label)?;
    let value = line[idx + label.len()..].trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
