//! Flat-file JSON store
//!
//! Every document lives in one JSON file under the data directory and is
//! read and rewritten wholesale. Writes go through a temporary file in the
//! same directory followed by a rename, so readers never observe a
//! half-written document.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use config::{Config, Environment};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

/// Default data directory, relative to the working directory
pub const DEFAULT_DATA_DIR: &str = "data";

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the JSON documents
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Create a StoreConfig for an explicit directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create a new StoreConfig from environment variables
    ///
    /// # Environment Variables
    /// - `PARKING_DATA_DIR`: Data directory (default: "data")
    pub fn from_env() -> StoreResult<Self> {
        let settings = Config::builder()
            .set_default("data_dir", DEFAULT_DATA_DIR)
            .map_err(|e| StoreError::Configuration(e.to_string()))?
            .add_source(Environment::with_prefix("PARKING"))
            .build()
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        let data_dir = settings
            .get_string("data_dir")
            .map_err(|e| StoreError::Configuration(e.to_string()))?;

        if data_dir.trim().is_empty() {
            return Err(StoreError::Configuration(
                "PARKING_DATA_DIR must not be empty".to_string(),
            ));
        }

        Ok(Self::new(data_dir))
    }
}

/// Handle on the data directory
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open the store, creating the data directory when it does not exist
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        fs::create_dir_all(&config.data_dir).map_err(|source| StoreError::Io {
            path: config.data_dir.clone(),
            source,
        })?;

        info!("JSON store opened at {}", config.data_dir.display());
        Ok(Self {
            root: config.data_dir.clone(),
        })
    }

    /// Data directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of a document
    pub fn path(&self, document: &str) -> PathBuf {
        self.root.join(document)
    }

    /// Read a whole document.
    ///
    /// A missing or blank document reads as `T::default()`. A document that
    /// exists but does not deserialize into `T` is rejected.
    pub fn read<T>(&self, document: &str) -> StoreResult<T>
    where
        T: DeserializeOwned + Default,
    {
        let path = self.path(document);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Document {} not found, reading as empty", path.display());
                return Ok(T::default());
            }
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(T::default());
        }

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt { path, source })
    }

    /// Replace a whole document with `value`, pretty-printed with a
    /// four-space indent.
    pub fn write<T>(&self, document: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let path = self.path(document);
        let io_error = |source: io::Error| StoreError::Io {
            path: path.clone(),
            source,
        };

        let mut buffer = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        value
            .serialize(&mut serializer)
            .map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?;
        buffer.push(b'\n');

        let mut file = NamedTempFile::new_in(&self.root).map_err(io_error)?;
        file.write_all(&buffer).map_err(io_error)?;
        file.as_file().sync_all().map_err(io_error)?;
        file.persist(&path).map_err(|e| io_error(e.error))?;

        debug!("Document {} written ({} bytes)", path.display(), buffer.len());
        Ok(())
    }

    /// Check that the data directory is still reachable
    pub fn health_check(&self) -> StoreResult<bool> {
        match fs::metadata(&self.root) {
            Ok(meta) => Ok(meta.is_dir()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io {
                path: self.root.clone(),
                source,
            }),
        }
    }
}
