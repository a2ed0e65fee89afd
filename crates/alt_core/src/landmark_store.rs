//! Persistence of preprocessed landmark data.
//!
//! Landmark preprocessing is expensive, so its result is kept behind the
//! [`LandmarkStore`] trait and looked up by graph identity and landmark count
//! before it is computed again.
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::PathBuf,
};

use log::debug;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::landmarks::LandmarkData;

/// Identifies one set of landmark data
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreKey {
    /// Caller chosen name of the graph, e.g. the stem of its input file
    pub graph_id: String,
    pub num_landmarks: usize,
}

impl StoreKey {
    pub fn new(graph_id: impl Into<String>, num_landmarks: usize) -> Self {
        StoreKey {
            graph_id: graph_id.into(),
            num_landmarks,
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}_{}.landmarks", self.graph_id, self.num_landmarks)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error on landmark file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode landmark data")]
    Encode(#[from] bincode::error::EncodeError),
    #[error("failed to decode landmark data")]
    Decode(#[from] bincode::error::DecodeError),
}

pub trait LandmarkStore {
    /// Returns `Ok(None)` if nothing is stored under `key`
    fn load(&self, key: &StoreKey) -> Result<Option<LandmarkData>, StoreError>;

    fn save(&mut self, key: &StoreKey, data: &LandmarkData) -> Result<(), StoreError>;
}

/// One bincode file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileLandmarkStore {
    dir: PathBuf,
}

impl FileLandmarkStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileLandmarkStore { dir: dir.into() }
    }

    pub fn path(&self, key: &StoreKey) -> PathBuf {
        self.dir.join(key.file_name())
    }
}

impl LandmarkStore for FileLandmarkStore {
    fn load(&self, key: &StoreKey) -> Result<Option<LandmarkData>, StoreError> {
        let path = self.path(key);
        if !path.exists() {
            debug!("No landmark file at {}", path.display());
            return Ok(None);
        }

        let file = File::open(&path).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        let mut reader = BufReader::new(file);
        let data: LandmarkData =
            bincode::serde::decode_from_std_read(&mut reader, bincode::config::standard())?;

        debug!("Loaded landmark data from {}", path.display());
        Ok(Some(data))
    }

    fn save(&mut self, key: &StoreKey, data: &LandmarkData) -> Result<(), StoreError> {
        let path = self.path(key);
        let io_error = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(&self.dir).map_err(io_error)?;
        let file = File::create(&path).map_err(io_error)?;
        let mut writer = BufWriter::new(file);
        bincode::serde::encode_into_std_write(data, &mut writer, bincode::config::standard())?;

        debug!("Saved landmark data to {}", path.display());
        Ok(())
    }
}

/// Keeps landmark data for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryLandmarkStore {
    entries: FxHashMap<StoreKey, LandmarkData>,
}

impl MemoryLandmarkStore {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl LandmarkStore for MemoryLandmarkStore {
    fn load(&self, key: &StoreKey) -> Result<Option<LandmarkData>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &StoreKey, data: &LandmarkData) -> Result<(), StoreError> {
        self.entries.insert(key.clone(), data.clone());
        Ok(())
    }
}
