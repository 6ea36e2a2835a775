//! Tile cache persistence.
//!
//! One file per named map under a base directory. A missing file loads as
//! an empty cache, never an error; a corrupt file fails the whole load so
//! a map can never come up half-populated.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use crate::cache::TileCache;

/// File extension for persisted tile caches.
const MAP_FILE_EXT: &str = "tiles";

/// Storage manager for persisting named map caches to disk.
///
/// Caches are stored as `{base_dir}/{name}.tiles`.
pub struct MapStorage {
    base_dir: PathBuf,
}

impl MapStorage {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        MapStorage {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Get the file path for a named map
    fn map_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{}", name, MAP_FILE_EXT))
    }

    /// Ensure the storage directory exists
    fn ensure_dir(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.base_dir)
    }

    /// Check if a saved cache exists for a map name
    pub fn exists(&self, name: &str) -> bool {
        self.map_path(name).exists()
    }

    /// Persist a map's tile cache under its name.
    ///
    /// Uses bincode for efficient binary serialization.
    pub fn save(&self, name: &str, cache: &TileCache) -> Result<(), StorageError> {
        self.ensure_dir()?;

        let file = File::create(self.map_path(name))?;
        let writer = BufWriter::new(file);

        bincode::serialize_into(writer, cache)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        Ok(())
    }

    /// Load the tile cache for a named map.
    ///
    /// A map with no saved file yields an empty cache.
    pub fn load(&self, name: &str) -> Result<TileCache, StorageError> {
        let path = self.map_path(name);

        if !path.exists() {
            return Ok(TileCache::new());
        }

        let file = File::open(&path)?;
        let reader = BufReader::new(file);

        let cache: TileCache = bincode::deserialize_from(reader)
            .map_err(|e| StorageError::Deserialization(e.to_string()))?;

        Ok(cache)
    }

    /// Delete a saved cache (if it exists).
    pub fn delete(&self, name: &str) -> std::io::Result<()> {
        let path = self.map_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Names of all maps saved under this directory.
    pub fn list_maps(&self) -> Result<Vec<String>, StorageError> {
        if !self.base_dir.exists() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let entry = entry?;
            let path = entry.path();

            if path.extension().and_then(|e| e.to_str()) == Some(MAP_FILE_EXT) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }

        Ok(names)
    }
}

/// Errors that can occur while saving or loading a map cache.
#[derive(Debug)]
pub enum StorageError {
    /// IO error (permissions, disk full, etc.)
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
    /// Deserialization error (corrupted file, version mismatch)
    Deserialization(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "IO error: {}", e),
            StorageError::Serialization(e) => write!(f, "Serialization error: {}", e),
            StorageError::Deserialization(e) => write!(f, "Deserialization error: {}", e),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}
