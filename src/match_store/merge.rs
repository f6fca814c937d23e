use std::collections::HashMap;

use crate::domain::{MatchRecord, parse_scoreboard_date};

use super::match_key::match_key;

/// Merge freshly parsed records into the existing set, keyed by match
/// identity. An incoming record with a known key overwrites the stored
/// one (last parsed wins). Returns the merged set ordered newest first
/// and the number of keys that were not present before.
pub fn merge_matches(
    existing: Vec<MatchRecord>,
    incoming: Vec<MatchRecord>,
) -> (Vec<MatchRecord>, usize) {
    let mut order: Vec<String> = Vec::new();
    let mut by_key: HashMap<String, MatchRecord> = HashMap::new();

    for record in existing {
        let key = match_key(&record);
        if !by_key.contains_key(&key) {
            order.push(key.clone());
        }
        by_key.insert(key, record);
    }

    let mut new_count = 0;
    for record in incoming {
        let key = match_key(&record);
        if !by_key.contains_key(&key) {
            new_count += 1;
            order.push(key.clone());
        }
        by_key.insert(key, record);
    }

    let mut merged: Vec<MatchRecord> = order
        .into_iter()
        .filter_map(|key| by_key.remove(&key))
        .collect();
    sort_newest_first(&mut merged);

    (merged, new_count)
}

/// Newest first by best-effort parsed date; unparsable dates fall back to
/// the epoch and keep their relative order at the end (stable sort).
fn sort_newest_first(records: &mut [MatchRecord]) {
    records.sort_by_key(|r| std::cmp::Reverse(parse_scoreboard_date(&r.date)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WinningTeam;

    fn record(date: &str, map: &str) -> MatchRecord {
        MatchRecord {
            date: date.to_string(),
            map: map.to_string(),
            wait_time: None,
            match_duration: None,
            team1_score: 13,
            team2_score: 7,
            team1_players: Vec::new(),
            team2_players: Vec::new(),
            winning_team: WinningTeam::TeamOne,
        }
    }

    #[test]
    fn remerging_the_same_records_adds_nothing() {
        let batch = vec![
            record("2024-11-03 21:14:09 GMT", "Dust II"),
            record("2024-11-04 19:02:51 GMT", "Mirage"),
        ];

        let (merged, first_pass) = merge_matches(Vec::new(), batch.clone());
        assert_eq!(first_pass, 2);

        let (remerged, second_pass) = merge_matches(merged.clone(), batch);
        assert_eq!(second_pass, 0);
        assert_eq!(remerged.len(), merged.len());
    }

    #[test]
    fn incoming_record_overwrites_existing_entry() {
        let mut stored = record("2024-11-03 21:14:09 GMT", "Dust II");
        stored.wait_time = Some("0:10".to_string());

        let mut reparsed = record("2024-11-03 21:14:09 GMT", "Dust II");
        reparsed.wait_time = Some("0:42".to_string());

        let (merged, new_count) = merge_matches(vec![stored], vec![reparsed]);
        assert_eq!(new_count, 0);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].wait_time.as_deref(), Some("0:42"));
    }

    #[test]
    fn merged_set_is_ordered_newest_first() {
        let old = record("2024-01-01 10:00:00 GMT", "Train");
        let newer = record("2024-06-01 10:00:00 GMT", "Nuke");
        let newest = record("2024-11-01 10:00:00 GMT", "Inferno");

        let (merged, _) = merge_matches(vec![old, newest], vec![newer]);
        let maps: Vec<&str> = merged.iter().map(|r| r.map.as_str()).collect();
        assert_eq!(maps, ["Inferno", "Nuke", "Train"]);
    }

    #[test]
    fn unparsable_dates_sink_to_the_end_in_input_order() {
        let dated = record("2024-06-01 10:00:00 GMT", "Nuke");
        let mystery_a = record("last tuesday", "Cache");
        let mystery_b = record("", "Cobblestone");

        let (merged, _) = merge_matches(Vec::new(), vec![mystery_a, dated, mystery_b]);
        let maps: Vec<&str> = merged.iter().map(|r| r.map.as_str()).collect();
        assert_eq!(maps, ["Nuke", "Cache", "Cobblestone"]);
    }
}
