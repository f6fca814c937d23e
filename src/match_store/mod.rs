mod match_key;
mod merge;

pub use match_key::match_key;
pub use merge::merge_matches;
