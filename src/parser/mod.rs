mod fields;
mod scoreboard;

pub use fields::StatLineParser;
pub use scoreboard::ScoreboardParser;
