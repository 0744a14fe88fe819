//! Interview actions and their learned values.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::constants::VALUE_KEY_SEPARATOR;
use crate::errors::{AnamnesisResult, StoreError};

/// Kind of move an interview can make next: a single question, or a
/// mutually-exclusive question group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Question,
    Group,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Question => "question",
            ActionKind::Group => "group",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "question" => Some(ActionKind::Question),
            "group" => Some(ActionKind::Group),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One selectable interview action.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub kind: ActionKind,
    pub id: String,
}

impl Action {
    pub fn question(id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Question,
            id: id.into(),
        }
    }

    pub fn group(id: impl Into<String>) -> Self {
        Self {
            kind: ActionKind::Group,
            id: id.into(),
        }
    }

    /// Composite persistence key, `<kind>::<id>`.
    pub fn key(&self) -> String {
        format!("{}{}{}", self.kind.as_str(), VALUE_KEY_SEPARATOR, self.id)
    }

    /// Parse a composite key. Splits on the first separator only, so ids
    /// that themselves contain the separator round-trip.
    pub fn parse_key(key: &str) -> Option<Self> {
        let (kind, id) = key.split_once(VALUE_KEY_SEPARATOR)?;
        Some(Self {
            kind: ActionKind::parse(kind)?,
            id: id.to_string(),
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.kind, VALUE_KEY_SEPARATOR, self.id)
    }
}

/// Learned per-action values.
///
/// The greedy policy asks the highest-valued relevant action; actions the
/// trainer never visited default to 0.0. Built offline, read-only while
/// serving.
#[derive(Debug, Clone, Default)]
pub struct ValueTable {
    values: FxHashMap<Action, f64>,
}

impl ValueTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `action`, defaulting to 0.0 when unseen.
    pub fn value_of(&self, action: &Action) -> f64 {
        self.values.get(action).copied().unwrap_or(0.0)
    }

    pub fn get(&self, action: &Action) -> Option<f64> {
        self.values.get(action).copied()
    }

    pub fn set(&mut self, action: Action, value: f64) {
        self.values.insert(action, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Action, f64)> {
        self.values.iter().map(|(a, v)| (a, *v))
    }

    /// Flat, key-sorted form used on disk.
    pub fn to_flat_map(&self) -> BTreeMap<String, f64> {
        self.values.iter().map(|(a, v)| (a.key(), *v)).collect()
    }

    pub fn from_flat_map<I>(entries: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        let mut values = FxHashMap::default();
        for (key, value) in entries {
            let action =
                Action::parse_key(&key).ok_or_else(|| StoreError::InvalidKey { key: key.clone() })?;
            values.insert(action, value);
        }
        Ok(Self { values })
    }

    pub fn from_json_str(text: &str) -> AnamnesisResult<Self> {
        let flat: BTreeMap<String, f64> = serde_json::from_str(text).map_err(StoreError::from)?;
        Ok(Self::from_flat_map(flat)?)
    }

    /// Load the flat JSON artifact produced by training.
    pub fn load(path: impl AsRef<Path>) -> AnamnesisResult<Self> {
        let text = std::fs::read_to_string(path).map_err(StoreError::from)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> AnamnesisResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_flat_map()).map_err(StoreError::from)?)
    }

    /// Write the flat JSON artifact. Keys are sorted for stable diffs.
    pub fn save(&self, path: impl AsRef<Path>) -> AnamnesisResult<()> {
        let text = self.to_json_string()?;
        std::fs::write(path, text).map_err(StoreError::from)?;
        Ok(())
    }
}
