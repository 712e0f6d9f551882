use crate::entry::RawModelEntry;
use crate::error::{Dataset, ModelError, Result};
use crate::version::ModelVersion;
use serde::de::{self, DeserializeOwned, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::marker::PhantomData;

/// Model data partitioned by version, as decoded from an archive entry.
///
/// Version keys are compared after parsing, so `"5.1.0"` and `"05.1.0"` in
/// the same document are a duplicate and fail to decode.
#[derive(Debug, Clone, PartialEq)]
pub struct VersionedTable<T> {
    versions: BTreeMap<ModelVersion, T>,
}

/// Commands dataset: a flat list of entries per version.
pub type CommandsTable = VersionedTable<Vec<RawModelEntry>>;

/// Predictions dataset: trigger command to follow-up entries, per version.
pub type PredictionsTable = VersionedTable<TriggerEntries>;

impl<T> VersionedTable<T> {
    pub fn new() -> Self {
        Self {
            versions: BTreeMap::new(),
        }
    }

    /// Available versions, ascending.
    pub fn versions(&self) -> Vec<ModelVersion> {
        self.versions.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Take the data for exactly `version`, discarding every other version.
    pub fn select(mut self, dataset: Dataset, version: &ModelVersion) -> Result<T> {
        match self.versions.remove(version) {
            Some(value) => Ok(value),
            None => Err(ModelError::VersionNotFound {
                dataset,
                requested: *version,
                available: self.versions(),
            }),
        }
    }
}

impl<T> Default for VersionedTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> VersionedTable<T> {
    pub fn from_json(dataset: Dataset, text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| ModelError::Deserialization { dataset, source })
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for VersionedTable<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TableVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for TableVisitor<T> {
            type Value = VersionedTable<T>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of version strings to model data")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut versions = BTreeMap::new();
                while let Some((version, value)) = map.next_entry::<ModelVersion, T>()? {
                    match versions.entry(version) {
                        Entry::Vacant(slot) => {
                            slot.insert(value);
                        }
                        Entry::Occupied(slot) => {
                            return Err(de::Error::custom(format!(
                                "duplicate version key {}",
                                slot.key()
                            )));
                        }
                    }
                }
                Ok(VersionedTable { versions })
            }
        }

        deserializer.deserialize_map(TableVisitor(PhantomData))
    }
}

/// Trigger/entries pairs of one version in source order.
///
/// Repeated trigger keys are kept as separate pairs so the collection builder
/// can apply its duplicate policy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriggerEntries(Vec<(String, Vec<RawModelEntry>)>);

impl TriggerEntries {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, trigger: impl Into<String>, entries: Vec<RawModelEntry>) {
        self.0.push((trigger.into(), entries));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RawModelEntry])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl IntoIterator for TriggerEntries {
    type Item = (String, Vec<RawModelEntry>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Vec<RawModelEntry>)> for TriggerEntries {
    fn from_iter<I: IntoIterator<Item = (String, Vec<RawModelEntry>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for TriggerEntries {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

impl<'de> Deserialize<'de> for TriggerEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct TriggerVisitor;

        impl<'de> Visitor<'de> for TriggerVisitor {
            type Value = TriggerEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of trigger commands to entry lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((trigger, entries)) = map.next_entry::<String, Vec<RawModelEntry>>()? {
                    pairs.push((trigger, entries));
                }
                Ok(TriggerEntries(pairs))
            }
        }

        deserializer.deserialize_map(TriggerVisitor)
    }
}
