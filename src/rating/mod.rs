pub mod elo;
pub mod overrides;
pub mod types;

pub use elo::calculate_ratings;
pub use overrides::parse_initial_elos;
pub use types::{RatingMap, RatingValue, rating_map};
