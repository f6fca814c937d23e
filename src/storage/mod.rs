mod structs;

pub use structs::{
    ALIAS_TABLE_FILE, BEST_BALANCE_FILE, INITIAL_ELOS_FILE, MATCH_LOG_FILE, RATING_SNAPSHOT_FILE,
    SKILL_IDS_FILE, Store,
};
