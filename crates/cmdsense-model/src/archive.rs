use crate::error::{Dataset, ModelError, Result};
use std::fs::File;
use std::io::{self, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

pub const DATA_DIRECTORY_NAME: &str = "Data";
pub const COMMANDS_MODEL_ZIP: &str = "CommandsModel.zip";
pub const COMMANDS_MODEL_JSON: &str = "CommandsModel.json";
pub const PREDICTIONS_MODEL_ZIP: &str = "PredictionsModel.zip";
pub const PREDICTIONS_MODEL_JSON: &str = "PredictionsModel.json";

/// Where the model archives live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    data_dir: PathBuf,
}

impl DataLayout {
    /// Layout rooted at `base_dir`, with archives under `base_dir/Data`.
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: base_dir.as_ref().join(DATA_DIRECTORY_NAME),
        }
    }

    /// Layout whose archives sit directly in `data_dir`.
    pub fn from_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Layout next to the running executable.
    pub fn beside_executable() -> Result<Self> {
        let exe = std::env::current_exe().map_err(|source| ModelError::Io {
            path: PathBuf::from("<current executable>"),
            source,
        })?;
        let dir = exe
            .parent()
            .ok_or_else(|| ModelError::NotFound(exe.clone()))?;
        Ok(Self::new(dir))
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Reference to a dataset's archive, without touching the filesystem.
    pub fn archive(&self, dataset: Dataset) -> ArchiveRef {
        let (zip, json) = match dataset {
            Dataset::Commands => (COMMANDS_MODEL_ZIP, COMMANDS_MODEL_JSON),
            Dataset::Predictions => (PREDICTIONS_MODEL_ZIP, PREDICTIONS_MODEL_JSON),
        };
        ArchiveRef::new(self.data_dir.join(zip), json)
    }

    /// Reference to a dataset's archive, checking that the data directory and
    /// archive file exist.
    pub fn resolve(&self, dataset: Dataset) -> Result<ArchiveRef> {
        if !self.data_dir.is_dir() {
            return Err(ModelError::NotFound(self.data_dir.clone()));
        }
        let archive = self.archive(dataset);
        if !archive.path().is_file() {
            return Err(ModelError::NotFound(archive.path().to_path_buf()));
        }
        debug!(%dataset, path = %archive.path().display(), "Resolved model archive");
        Ok(archive)
    }

    /// Resolve both archives, commands first.
    pub fn resolve_all(&self) -> Result<(ArchiveRef, ArchiveRef)> {
        Ok((
            self.resolve(Dataset::Commands)?,
            self.resolve(Dataset::Predictions)?,
        ))
    }
}

/// A compressed archive and the single entry to read from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRef {
    path: PathBuf,
    entry_name: String,
}

impl ArchiveRef {
    pub fn new(path: impl Into<PathBuf>, entry_name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            entry_name: entry_name.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }

    /// Read the named entry as UTF-8 text.
    ///
    /// The file handle is owned by the archive reader and released when this
    /// returns, on success and on every error path.
    pub fn read_entry(&self) -> Result<String> {
        let file = File::open(&self.path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => ModelError::NotFound(self.path.clone()),
            _ => ModelError::Io {
                path: self.path.clone(),
                source,
            },
        })?;
        debug!(path = %self.path.display(), entry = %self.entry_name, "Reading archive entry");
        read_entry_from(file, &self.path, &self.entry_name)
    }
}

/// Read `entry_name` out of an archive stream. `path` is only used for errors.
pub(crate) fn read_entry_from<R: Read + Seek>(
    reader: R,
    path: &Path,
    entry_name: &str,
) -> Result<String> {
    let mut archive = ZipArchive::new(reader).map_err(|e| corrupt(path, "cannot open archive", e))?;

    let mut entry = match archive.by_name(entry_name) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => {
            return Err(ModelError::CorruptArchive {
                path: path.to_path_buf(),
                reason: format!("entry '{}' not found", entry_name),
                source: Some(ZipError::FileNotFound),
            });
        }
        Err(ZipError::Io(source)) => {
            return Err(ModelError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
        Err(e) => return Err(corrupt(path, "cannot open entry", e)),
    };

    let mut text = String::with_capacity(entry.size().min(64 * 1024 * 1024) as usize);
    entry
        .read_to_string(&mut text)
        .map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(text)
}

fn corrupt(path: &Path, reason: &str, source: ZipError) -> ModelError {
    ModelError::CorruptArchive {
        path: path.to_path_buf(),
        reason: format!("{}: {}", reason, source),
        source: Some(source),
    }
}
