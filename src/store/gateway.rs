//! File persistence for the student collection.
//!
//! The collection is one pretty-printed JSON array, read and rewritten as a
//! unit. Writes go through a temp file in the target directory followed by
//! an atomic rename, so an interrupted save never leaves a half-written
//! store behind.

use crate::core::{Result, StoreError, Student};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct FileGateway {
    path: PathBuf,
}

impl FileGateway {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole collection.
    ///
    /// A missing store file is an empty collection, not an error. An
    /// unreadable or unparseable file is also downgraded to an empty
    /// collection: the failure is logged but not propagated, so callers
    /// cannot tell it apart from a legitimately empty store. The warn
    /// event is the only trace of it.
    pub fn load(&self) -> Vec<Student> {
        if !self.path.exists() {
            return Vec::new();
        }
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "failed to read store file, treating collection as empty"
                );
                return Vec::new();
            }
        };
        match serde_json::from_str(&data) {
            Ok(students) => students,
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    %err,
                    "failed to parse store file, treating collection as empty"
                );
                Vec::new()
            }
        }
    }

    /// Serializes the full collection and replaces the store file in one
    /// unit.
    pub fn save(&self, students: &[Student]) -> Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(students)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path)
            .map_err(|err| StoreError::Persist(err.to_string()))?;
        Ok(())
    }
}
