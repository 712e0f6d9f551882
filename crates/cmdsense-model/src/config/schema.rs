use crate::archive::DataLayout;
use crate::collection::DuplicateTriggerPolicy;
use crate::error::Result;
use crate::version::ModelVersion;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the model archives. Defaults to `Data` next to the
    /// executable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_version")]
    pub commands_version: ModelVersion,
    #[serde(default = "default_version")]
    pub predictions_version: ModelVersion,
    #[serde(default)]
    pub duplicate_triggers: DuplicateTriggerPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            commands_version: default_version(),
            predictions_version: default_version(),
            duplicate_triggers: DuplicateTriggerPolicy::default(),
        }
    }
}

fn default_version() -> ModelVersion {
    ModelVersion::new(5, 1, 0)
}

impl StoreConfig {
    /// Layout for the configured data directory, or the one beside the
    /// executable when none is set.
    pub fn layout(&self) -> Result<DataLayout> {
        match &self.data_dir {
            Some(dir) => Ok(DataLayout::from_data_dir(dir.clone())),
            None => DataLayout::beside_executable(),
        }
    }
}
