//! Nested info dictionaries returned alongside observations.
//!
//! Values are strings, integers, floats, or nested dictionaries. Keys
//! stay sorted so the rendered form is stable across runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A value in an info dictionary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Str(String),
    Int(i64),
    Float(f64),
    Dict(InfoDict),
}

/// String-keyed map of info values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct InfoDict {
    entries: BTreeMap<String, InfoValue>,
}

impl InfoDict {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_str(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), InfoValue::Str(value.into()));
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) {
        self.entries.insert(key.into(), InfoValue::Int(value));
    }

    pub fn set_float(&mut self, key: impl Into<String>, value: f64) {
        self.entries.insert(key.into(), InfoValue::Float(value));
    }

    pub fn set_dict(&mut self, key: impl Into<String>, value: InfoDict) {
        self.entries.insert(key.into(), InfoValue::Dict(value));
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&InfoValue> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &InfoValue)> {
        self.entries.iter()
    }
}

impl std::fmt::Display for InfoValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InfoValue::Str(s) => write!(f, "\"{s}\""),
            InfoValue::Int(i) => write!(f, "{i}"),
            InfoValue::Float(x) => write!(f, "{x}"),
            InfoValue::Dict(d) => write!(f, "{d}"),
        }
    }
}

impl std::fmt::Display for InfoDict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        write!(f, "}}")
    }
}
