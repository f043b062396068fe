//! Field values supplied per input item.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Named field values for a single item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<String, Value>);

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse `name=value` pairs as given on a command line. Values stay strings;
    /// the request builder coerces them to the declared field kind.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| format!("expected name=value, got '{pair}'"))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(format!("empty field name in '{pair}'"));
            }
            values.insert(name, value);
        }
        Ok(values)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FieldValues {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut values = Self::new();
        for (k, v) in iter {
            values.insert(k, v);
        }
        values
    }
}

/// Per-item access to host-bound parameters.
///
/// `field` returns `None` when the host has no value bound for the item; the
/// request builder then applies the catalog default or reports the field as
/// missing.
pub trait FieldSource {
    fn item_count(&self) -> usize;
    fn field(&self, name: &str, item: usize) -> Option<Value>;
}

impl FieldSource for [FieldValues] {
    fn item_count(&self) -> usize {
        self.len()
    }

    fn field(&self, name: &str, item: usize) -> Option<Value> {
        self.get(item).and_then(|values| values.get(name)).cloned()
    }
}

impl FieldSource for Vec<FieldValues> {
    fn item_count(&self) -> usize {
        self.as_slice().item_count()
    }

    fn field(&self, name: &str, item: usize) -> Option<Value> {
        self.as_slice().field(name, item)
    }
}

/// Split a semicolon-delimited option list, trimming each entry.
///
/// Entries that are blank after trimming are dropped, so a blank input
/// yields no options.
pub fn parse_poll_options(raw: &str) -> Vec<String> {
    raw.split(';')
        .map(str::trim)
        .filter(|option| !option.is_empty())
        .map(String::from)
        .collect()
}
