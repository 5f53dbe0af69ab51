//! String-keyed persistent storage
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::num::ParseIntError;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A key-value store mapping strings to strings
pub(crate) trait Store: fmt::Debug {
    /// Fetch the value stored under `key`, or `None` if there is none
    fn get(&self, key: &str) -> Result<Option<String>, LoadError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        (**self).set(key, value)
    }
}

/// A store backed by a JSON object in a file on disk.
///
/// The file is read on every access; a missing file is treated as an empty
/// store.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub(crate) fn new(path: PathBuf) -> FileStore {
        FileStore { path }
    }

    /// Return the default store file path
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("gridsnake").join("store.json"))
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        let mut entries = self.read_all().map_err(SaveError::reread)?;
        entries.insert(key.to_owned(), value.to_owned());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string_pretty(&entries).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        Ok(())
    }
}

/// A store that lives only as long as the process
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct MemoryStore(HashMap<String, String>);

impl Store for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, LoadError> {
        Ok(self.0.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SaveError> {
        self.0.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to load data from store")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    pub(crate) fn no_path() -> Self {
        LoadError(LoadErrorSource::NoPath)
    }

    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }

    pub(crate) fn parse(key: &str, e: ParseIntError) -> Self {
        LoadError(LoadErrorSource::Parse {
            key: key.to_owned(),
            source: e,
        })
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to determine path to local data directory")]
    NoPath,
    #[error("failed to read store file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize store file")]
    Deserialize(#[source] serde_json::Error),
    #[error("invalid value stored under {key:?}")]
    Parse {
        key: String,
        #[source]
        source: ParseIntError,
    },
}

#[derive(Debug, Error)]
#[error("Failed to save data to store")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn reread(e: LoadError) -> Self {
        SaveError(SaveErrorSource::Reread(e))
    }

    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to read existing entries")]
    Reread(#[source] LoadError),
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize store")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write store file")]
    Write(#[source] std::io::Error),
}
