use serde::Deserialize;
use serde_json::Value;

use crate::domain::AliasTable;

use super::types::RatingMap;

#[derive(Deserialize)]
struct OverrideEntry {
    name: String,
    elo: f64,
}

/// Initial-elo override table, accepted in either of the shapes the data
/// files have used: a flat `{"name": elo}` object or a list of
/// `{"name": ..., "elo": ...}` pairs. Names collapse through the alias
/// table before use; entries that fit neither shape are ignored.
pub fn parse_initial_elos(value: &Value, aliases: &AliasTable) -> RatingMap {
    let mut overrides = RatingMap::new();

    match value {
        Value::Object(entries) => {
            for (name, elo) in entries {
                if let Some(elo) = elo.as_f64() {
                    overrides.insert(aliases.normalize(name), elo);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                if let Ok(entry) = OverrideEntry::deserialize(item) {
                    overrides.insert(aliases.normalize(&entry.name), entry.elo);
                }
            }
        }
        _ => {}
    }

    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_flat_object_form() {
        let value = json!({"alice": 1200.0, "bob": 950});
        let overrides = parse_initial_elos(&value, &AliasTable::new());

        assert_eq!(overrides.get("alice"), Some(&1200.0));
        assert_eq!(overrides.get("bob"), Some(&950.0));
    }

    #[test]
    fn reads_name_elo_pair_list_form() {
        let value = json!([
            {"name": "alice", "elo": 1200.0},
            {"name": "bob", "elo": 950.0},
            {"nick": "broken"}
        ]);
        let overrides = parse_initial_elos(&value, &AliasTable::new());

        assert_eq!(overrides.len(), 2);
        assert_eq!(overrides.get("alice"), Some(&1200.0));
    }

    #[test]
    fn names_are_alias_normalized() {
        let mut aliases = AliasTable::new();
        aliases.insert("smurf", "alice");

        let value = json!({"smurf": 1300.0});
        let overrides = parse_initial_elos(&value, &aliases);

        assert_eq!(overrides.get("alice"), Some(&1300.0));
        assert!(overrides.get("smurf").is_none());
    }

    #[test]
    fn non_numeric_entries_are_ignored() {
        let value = json!({"alice": "strong"});
        assert!(parse_initial_elos(&value, &AliasTable::new()).is_empty());
    }
}
