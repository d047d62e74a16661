//! Consumer-side merging of property sets.
//!
//! The loader never merges; it returns every set it produced, in order. When a
//! single key/value view is needed, [`merge`] flattens a sequence of sets with
//! an explicit precedence rule.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::foundation::{PropertySet, PropertyValue};

/// Precedence rule for keys that appear in more than one set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
    /// A later set overrides an earlier one.
    #[default]
    LastWriteWins,
    /// The first set that defines a key keeps it.
    FirstWriteWins,
}

/// A merged value together with the name of the set it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergedValue {
    /// The winning value.
    pub value: PropertyValue,
    /// Name of the set that supplied it.
    pub origin: String,
}

/// The flattened result of [`merge`], ordered by first appearance of each key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MergedProperties {
    entries: Vec<(String, MergedValue)>,
    index: HashMap<String, usize>,
}

impl MergedProperties {
    /// Looks up the winning value for `key`.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.get_with_origin(key).map(|m| &m.value)
    }

    /// Looks up the winning value for `key` together with its origin.
    pub fn get_with_origin(&self, key: &str) -> Option<&MergedValue> {
        self.index.get(key).map(|&pos| &self.entries[pos].1)
    }

    /// Iterates merged entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MergedValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no keys were merged.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn apply(&mut self, key: &str, value: &PropertyValue, origin: &str, policy: MergePolicy) {
        let merged = MergedValue {
            value: value.clone(),
            origin: origin.to_string(),
        };
        match (self.index.get(key), policy) {
            (Some(&pos), MergePolicy::LastWriteWins) => self.entries[pos].1 = merged,
            (Some(_), MergePolicy::FirstWriteWins) => {}
            (None, _) => {
                self.index.insert(key.to_string(), self.entries.len());
                self.entries.push((key.to_string(), merged));
            }
        }
    }
}

/// Flattens `sets` into one key/value view using `policy`.
pub fn merge<'a, I>(sets: I, policy: MergePolicy) -> MergedProperties
where
    I: IntoIterator<Item = &'a PropertySet>,
{
    let mut merged = MergedProperties::default();
    for set in sets {
        for (key, value) in set.iter() {
            merged.apply(key, value, set.name(), policy);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sets() -> Vec<PropertySet> {
        vec![
            PropertySet::from_entries("defaults", [("port", "8080"), ("host", "localhost")]),
            PropertySet::from_entries("override", [("port", "9090"), ("debug", "true")]),
        ]
    }

    #[test]
    fn test_last_write_wins() {
        let merged = merge(&sets(), MergePolicy::LastWriteWins);
        assert_eq!(merged.get("port"), Some(&PropertyValue::from("9090")));
        assert_eq!(merged.get_with_origin("port").unwrap().origin, "override");
        assert_eq!(merged.len(), 3);
        assert_eq!(
            merged.iter().map(|(k, _)| k).collect::<Vec<_>>(),
            vec!["port", "host", "debug"]
        );
    }

    #[test]
    fn test_first_write_wins() {
        let merged = merge(&sets(), MergePolicy::FirstWriteWins);
        assert_eq!(merged.get("port"), Some(&PropertyValue::from("8080")));
        assert_eq!(merged.get_with_origin("port").unwrap().origin, "defaults");
        assert_eq!(merged.get("debug"), Some(&PropertyValue::from("true")));
    }
}
