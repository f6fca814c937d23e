use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Static alias table mapping raw display names to canonical identities.
/// Consulted by the parser, the override loader and the balancer so that
/// aliases collapse at ingestion time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    entries: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, alias: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(alias.into(), canonical.into());
    }

    /// Canonical identity for a raw display name. Names without an alias
    /// entry are already canonical.
    pub fn normalize(&self, name: &str) -> String {
        self.entries
            .get(name)
            .cloned()
            .unwrap_or_else(|| name.to_string())
    }

    pub fn normalize_all(&self, names: &[String]) -> Vec<String> {
        names.iter().map(|n| self.normalize(n)).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_alias_collapses_to_canonical_name() {
        let mut table = AliasTable::new();
        table.insert("smurf_acct", "alice");

        assert_eq!(table.normalize("smurf_acct"), "alice");
        assert_eq!(table.normalize("alice"), "alice");
        assert_eq!(table.normalize("unseen"), "unseen");
    }

    #[test]
    fn deserializes_from_flat_json_object() {
        let table: AliasTable = serde_json::from_str(r#"{"aka": "bob"}"#).unwrap();
        assert_eq!(table.normalize("aka"), "bob");
        assert_eq!(table.len(), 1);
    }
}
