use std::collections::HashMap;

use crate::domain::PlayerRating;

pub type RatingValue = f64;
pub type RatingMap = HashMap<String, RatingValue>;

/// Project a rating snapshot down to the name → elo lookup the balancer
/// works with.
pub fn rating_map(ratings: &[PlayerRating]) -> RatingMap {
    ratings
        .iter()
        .map(|r| (r.name.clone(), r.elo))
        .collect()
}

/// Snapshot values are stored with two decimals, as displayed.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_two_decimals() {
        assert_eq!(round2(1016.0049), 1016.0);
        assert_eq!(round2(983.9951), 984.0);
        assert_eq!(round2(47.12499), 47.12);
    }
}
