use crate::version::ModelVersion;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ModelError>;

/// The two independently loaded datasets of a model store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Commands,
    Predictions,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Commands => write!(f, "commands"),
            Dataset::Predictions => write!(f, "predictions"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model data not found at {0}")]
    NotFound(PathBuf),

    #[error("Corrupt archive {path}: {reason}")]
    CorruptArchive {
        path: PathBuf,
        reason: String,
        #[source]
        source: Option<zip::result::ZipError>,
    },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to deserialize {dataset} model: {source}")]
    Deserialization {
        dataset: Dataset,
        #[source]
        source: serde_json::Error,
    },

    #[error("Version {requested} not found in {dataset} model (available: {})", format_versions(.available))]
    VersionNotFound {
        dataset: Dataset,
        requested: ModelVersion,
        available: Vec<ModelVersion>,
    },

    #[error("Malformed {dataset} entry at {location}: {reason}")]
    MalformedEntry {
        dataset: Dataset,
        location: String,
        reason: String,
    },
}

impl ModelError {
    /// Attach dataset and position context to an entry transform failure.
    pub(crate) fn malformed(dataset: Dataset, location: String, reason: impl Into<String>) -> Self {
        ModelError::MalformedEntry {
            dataset,
            location,
            reason: reason.into(),
        }
    }
}

fn format_versions(versions: &[ModelVersion]) -> String {
    if versions.is_empty() {
        return "none".to_string();
    }
    versions
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_not_found_lists_available() {
        let err = ModelError::VersionNotFound {
            dataset: Dataset::Commands,
            requested: "9.9.9".parse().unwrap(),
            available: vec!["5.1.0".parse().unwrap(), "5.2.0".parse().unwrap()],
        };
        assert_eq!(
            err.to_string(),
            "Version 9.9.9 not found in commands model (available: 5.1.0, 5.2.0)"
        );
    }

    #[test]
    fn test_version_not_found_empty_table() {
        let err = ModelError::VersionNotFound {
            dataset: Dataset::Predictions,
            requested: "5.1.0".parse().unwrap(),
            available: vec![],
        };
        assert!(err.to_string().ends_with("(available: none)"));
    }
}
