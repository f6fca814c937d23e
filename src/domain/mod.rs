pub mod aliases;
pub mod dates;
pub mod models;

pub use aliases::AliasTable;
pub use dates::parse_scoreboard_date;
pub use models::*;
