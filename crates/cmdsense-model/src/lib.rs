pub mod archive;
pub mod collection;
pub mod config;
pub mod entry;
pub mod error;
pub mod store;
pub mod table;
pub mod version;

pub use archive::{ArchiveRef, DataLayout};
pub use collection::{CommandCollection, DuplicateTriggerPolicy, PredictionCollection};
pub use config::schema::StoreConfig;
pub use entry::{PredictiveCommand, RawModelEntry};
pub use error::{Dataset, ModelError, Result};
pub use store::{LoadState, ModelStore};
pub use version::ModelVersion;
