use crate::archive::DataLayout;
use crate::collection::{CommandCollection, DuplicateTriggerPolicy, PredictionCollection};
use crate::config::schema::StoreConfig;
use crate::error::{Dataset, Result};
use crate::table::{CommandsTable, PredictionsTable};
use crate::version::ModelVersion;
use once_cell::sync::OnceCell;
use std::panic;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
}

/// Loads the commands and predictions datasets and holds them for the rest
/// of the process.
///
/// Each dataset is loaded at most once. A failed load leaves the dataset
/// unloaded so the caller can retry; a successful one is never replaced.
/// Collections handed out are immutable and can be read from any thread.
#[derive(Debug)]
pub struct ModelStore {
    layout: DataLayout,
    config: StoreConfig,
    commands: OnceCell<CommandCollection>,
    predictions: OnceCell<PredictionCollection>,
}

impl ModelStore {
    /// Store over the data directory named by `config`.
    pub fn new(config: StoreConfig) -> Result<Self> {
        let layout = config.layout()?;
        Ok(Self::from_layout(layout, config))
    }

    /// Store over an explicit layout; `config.data_dir` is ignored.
    pub fn from_layout(layout: DataLayout, config: StoreConfig) -> Self {
        Self {
            layout,
            config,
            commands: OnceCell::new(),
            predictions: OnceCell::new(),
        }
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn state(&self, dataset: Dataset) -> LoadState {
        let loaded = match dataset {
            Dataset::Commands => self.commands.get().is_some(),
            Dataset::Predictions => self.predictions.get().is_some(),
        };
        if loaded {
            LoadState::Loaded
        } else {
            LoadState::Unloaded
        }
    }

    /// Known commands, loading them on first use.
    pub fn commands(&self) -> Result<&CommandCollection> {
        self.commands
            .get_or_try_init(|| load_commands(&self.layout, &self.config.commands_version))
    }

    /// Follow-up predictions, loading them on first use.
    pub fn predictions(&self) -> Result<&PredictionCollection> {
        self.predictions.get_or_try_init(|| {
            load_predictions(
                &self.layout,
                &self.config.predictions_version,
                self.config.duplicate_triggers,
            )
        })
    }

    /// Load both datasets side by side. Returns the commands error first if
    /// both fail.
    pub fn load_all(&self) -> Result<()> {
        std::thread::scope(|s| {
            let commands = s.spawn(|| self.commands().map(|_| ()));
            let predictions = self.predictions().map(|_| ());
            let commands = match commands.join() {
                Ok(result) => result,
                Err(payload) => panic::resume_unwind(payload),
            };
            commands.and(predictions)
        })
    }
}

/// Read, decode and transform the commands dataset for `version`.
pub fn load_commands(layout: &DataLayout, version: &ModelVersion) -> Result<CommandCollection> {
    let archive = layout.resolve(Dataset::Commands)?;
    let text = archive.read_entry()?;
    let table = CommandsTable::from_json(Dataset::Commands, &text)?;
    debug!(versions = table.len(), "Decoded commands table");

    let entries = table.select(Dataset::Commands, version)?;
    let collection = CommandCollection::build(entries)?;
    info!(
        %version,
        commands = collection.len(),
        "Loaded commands model"
    );
    Ok(collection)
}

/// Read, decode and transform the predictions dataset for `version`.
pub fn load_predictions(
    layout: &DataLayout,
    version: &ModelVersion,
    policy: DuplicateTriggerPolicy,
) -> Result<PredictionCollection> {
    let archive = layout.resolve(Dataset::Predictions)?;
    let text = archive.read_entry()?;
    let table = PredictionsTable::from_json(Dataset::Predictions, &text)?;
    debug!(versions = table.len(), "Decoded predictions table");

    let triggers = table.select(Dataset::Predictions, version)?;
    let collection = PredictionCollection::build(triggers, policy)?;
    info!(
        %version,
        triggers = collection.len(),
        suggestions = collection.total_suggestions(),
        "Loaded predictions model"
    );
    Ok(collection)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_store_is_shareable() {
        assert_send_sync::<ModelStore>();
    }

    #[test]
    fn test_missing_data_dir_leaves_store_unloaded() {
        let store = ModelStore::from_layout(
            DataLayout::from_data_dir("/nonexistent/cmdsense/Data"),
            StoreConfig::default(),
        );
        assert!(store.commands().is_err());
        assert!(store.load_all().is_err());
        assert_eq!(store.state(Dataset::Commands), LoadState::Unloaded);
        assert_eq!(store.state(Dataset::Predictions), LoadState::Unloaded);
    }
}
