use crate::entry::{PredictiveCommand, RawModelEntry};
use crate::error::{Dataset, ModelError, Result};
use crate::table::TriggerEntries;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use tracing::warn;

/// What to do when one version of the predictions data lists the same
/// trigger command more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateTriggerPolicy {
    /// Fail the load with a malformed entry error.
    #[default]
    Reject,
    /// Keep the entries of the last occurrence.
    LastWriteWins,
    /// Append later entries after earlier ones.
    Merge,
}

/// Known commands, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandCollection {
    commands: Vec<PredictiveCommand>,
}

impl CommandCollection {
    /// Transform every entry, stopping at the first one that fails.
    pub fn build(entries: Vec<RawModelEntry>) -> Result<Self> {
        let commands = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry.transform().map_err(|reason| {
                    ModelError::malformed(Dataset::Commands, format!("index {}", index), reason)
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { commands })
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PredictiveCommand> {
        self.commands.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PredictiveCommand> {
        self.commands.iter()
    }

    pub fn as_slice(&self) -> &[PredictiveCommand] {
        &self.commands
    }

    /// Index of the first command with the given name, ignoring ASCII case.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.commands
            .iter()
            .position(|c| c.name().eq_ignore_ascii_case(name))
    }
}

impl<'a> IntoIterator for &'a CommandCollection {
    type Item = &'a PredictiveCommand;
    type IntoIter = std::slice::Iter<'a, PredictiveCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

/// Follow-up suggestions keyed by the command that precedes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredictionCollection {
    predictions: HashMap<String, Vec<PredictiveCommand>>,
}

impl PredictionCollection {
    pub fn build(triggers: TriggerEntries, policy: DuplicateTriggerPolicy) -> Result<Self> {
        let mut predictions: HashMap<String, Vec<PredictiveCommand>> =
            HashMap::with_capacity(triggers.len());

        for (trigger, entries) in triggers {
            let commands = entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    entry.transform().map_err(|reason| {
                        ModelError::malformed(
                            Dataset::Predictions,
                            format!("trigger '{}' index {}", trigger, index),
                            reason,
                        )
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            match predictions.entry(trigger) {
                Entry::Vacant(slot) => {
                    slot.insert(commands);
                }
                Entry::Occupied(mut slot) => match policy {
                    DuplicateTriggerPolicy::Reject => {
                        return Err(ModelError::malformed(
                            Dataset::Predictions,
                            format!("trigger '{}'", slot.key()),
                            "duplicate trigger key",
                        ));
                    }
                    DuplicateTriggerPolicy::LastWriteWins => {
                        warn!(trigger = %slot.key(), "Duplicate trigger, keeping last occurrence");
                        slot.insert(commands);
                    }
                    DuplicateTriggerPolicy::Merge => {
                        warn!(trigger = %slot.key(), "Duplicate trigger, merging entries");
                        slot.get_mut().extend(commands);
                    }
                },
            }
        }

        Ok(Self { predictions })
    }

    /// Suggestions following `trigger`, in source order.
    pub fn get(&self, trigger: &str) -> Option<&[PredictiveCommand]> {
        self.predictions.get(trigger).map(Vec::as_slice)
    }

    pub fn contains_trigger(&self, trigger: &str) -> bool {
        self.predictions.contains_key(trigger)
    }

    /// Number of distinct triggers.
    pub fn len(&self) -> usize {
        self.predictions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }

    /// Trigger commands, sorted.
    pub fn triggers(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.predictions.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Number of suggestions across all triggers.
    pub fn total_suggestions(&self) -> usize {
        self.predictions.values().map(Vec::len).sum()
    }
}
