//! Named, ordered collections of configuration entries.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::value::PropertyValue;

/// One named, ordered collection of configuration entries.
///
/// A set originates from one logical source, e.g. one document of a
/// multi-document YAML file. Entries keep the order in which keys were first
/// seen. Sets are assembled through [`PropertySetBuilder`] and are read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertySet {
    name: String,
    #[serde(serialize_with = "serialize_entries")]
    entries: Vec<(String, PropertyValue)>,
}

impl PropertySet {
    /// Starts building a set with the given origin name.
    pub fn builder(name: impl Into<String>) -> PropertySetBuilder {
        PropertySetBuilder::new(name)
    }

    /// Creates a set from `(key, value)` pairs. Later duplicates replace
    /// earlier values.
    pub fn from_entries<I, K, V>(name: impl Into<String>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PropertyValue>,
    {
        let mut builder = PropertySetBuilder::new(name);
        for (key, value) in entries {
            builder.insert(key, value);
        }
        builder.build()
    }

    /// Origin identifier of this set.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&PropertyValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Returns `true` if the key is present (even with an empty value).
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Consumes the set and returns its entries.
    pub fn into_entries(self) -> Vec<(String, PropertyValue)> {
        self.entries
    }
}

fn serialize_entries<S>(
    entries: &[(String, PropertyValue)],
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(entries.len()))?;
    for (key, value) in entries {
        map.serialize_entry(key, value)?;
    }
    map.end()
}

/// Builder used by strategies to assemble a [`PropertySet`].
#[derive(Debug)]
pub struct PropertySetBuilder {
    name: String,
    entries: Vec<(String, PropertyValue)>,
    index: HashMap<String, usize>,
}

impl PropertySetBuilder {
    /// Creates an empty builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Inserts an entry. An existing key keeps its position and gets the new
    /// value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&pos) => self.entries[pos].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
        self
    }

    /// Chained variant of [`insert`](Self::insert).
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns `true` if nothing has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finishes the set.
    pub fn build(self) -> PropertySet {
        PropertySet {
            name: self.name,
            entries: self.entries,
        }
    }
}
