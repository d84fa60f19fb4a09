//! File-backed storage backend.
//!
//! One file per key inside a directory. File names are the hex encoding of the
//! key, so any key maps to a portable file name.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use super::{StorageBackend, StorageError};

const FILE_EXTENSION: &str = "json";

/// Storage persisted under a directory, similar to a browser profile's local storage.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the storage directory. It is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir
            .join(hex::encode(key.as_bytes()))
            .with_extension(FILE_EXTENSION)
    }
}

impl StorageBackend for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Io(path, err)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|err| StorageError::Io(self.dir.clone(), err))?;

        // Write to a sibling file first so a crash never leaves a half-written value
        let path = self.path_for(key);
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, value).map_err(|err| StorageError::Io(tmp.clone(), err))?;
        fs::rename(&tmp, &path).map_err(|err| StorageError::Io(path, err))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::Io(path, err)),
        }
    }
}
