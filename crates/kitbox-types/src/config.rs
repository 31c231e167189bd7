//! Persisted kit enablement document.
//!
//! On disk the document looks like:
//!
//! ```json
//! { "enabledKits": ["memkit", "textkit"] }
//! ```
//!
//! Unknown fields are ignored on read so newer files stay loadable.

use serde::{Deserialize, Serialize};

/// Which kits the user wants enabled across sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitsConfig {
    /// Enabled kit ids, in enablement order.
    #[serde(rename = "enabledKits", default)]
    pub enabled_kits: Vec<String>,
}

impl KitsConfig {
    /// Build a config from an ordered list of ids, dropping duplicates.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        for id in ids {
            config.push(id.into());
        }
        config
    }

    /// Collapse duplicate ids, keeping first occurrence order.
    pub fn normalized(self) -> Self {
        Self::from_ids(self.enabled_kits)
    }

    /// Whether `id` is recorded as enabled.
    pub fn contains(&self, id: &str) -> bool {
        self.enabled_kits.iter().any(|k| k == id)
    }

    fn push(&mut self, id: String) {
        if !self.contains(&id) {
            self.enabled_kits.push(id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_field() {
        let cfg: KitsConfig = serde_json::from_str(r#"{"enabledKits":["a","b"]}"#).unwrap();
        assert_eq!(cfg.enabled_kits, vec!["a", "b"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let cfg: KitsConfig =
            serde_json::from_str(r#"{"enabledKits":["a"],"theme":"dark","v":2}"#).unwrap();
        assert_eq!(cfg.enabled_kits, vec!["a"]);
    }

    #[test]
    fn missing_field_defaults_to_empty() {
        let cfg: KitsConfig = serde_json::from_str("{}").unwrap();
        assert!(cfg.enabled_kits.is_empty());
    }

    #[test]
    fn serializes_with_camel_case_key() {
        let cfg = KitsConfig::from_ids(["memkit"]);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(json, r#"{"enabledKits":["memkit"]}"#);
    }

    #[test]
    fn normalized_collapses_duplicates_in_order() {
        let cfg = KitsConfig {
            enabled_kits: vec!["b".into(), "a".into(), "b".into(), "c".into(), "a".into()],
        };
        assert_eq!(cfg.normalized().enabled_kits, vec!["b", "a", "c"]);
    }

    #[test]
    fn contains_matches_exact_id() {
        let cfg = KitsConfig::from_ids(["x", "y"]);
        assert!(cfg.contains("x"));
        assert!(!cfg.contains("z"));
        assert!(!cfg.contains("X"));
    }
}
