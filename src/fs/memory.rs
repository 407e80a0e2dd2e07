//! In-memory filesystem for tests.
//!
//! Mirrors the behavior of [`super::OsFs`] closely enough for whole-run
//! tests: files live in directories that must exist, listings are sorted,
//! and individual paths can be made to fail on demand.

use super::SentinelFs;
use crate::error::{Result, SerieError};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
struct MemoryFile {
    contents: Vec<u8>,
    executable: bool,
}

/// A test double that keeps directories and files in maps.
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, MemoryFile>,
    failing: BTreeSet<PathBuf>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an empty file, creating its parent directories.
    pub fn add_empty(&mut self, path: impl AsRef<Path>) {
        self.add_file(path, "");
    }

    /// Seed a file with contents, creating its parent directories.
    pub fn add_file(&mut self, path: impl AsRef<Path>, contents: &str) {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            self.insert_dirs(parent);
        }
        self.files.insert(
            path.to_path_buf(),
            MemoryFile {
                contents: contents.as_bytes().to_vec(),
                executable: false,
            },
        );
    }

    /// Names of the files in `dir`, sorted. Empty for unknown directories.
    pub fn files_in(&self, dir: impl AsRef<Path>) -> Vec<String> {
        self.names_in(dir.as_ref())
    }

    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files
            .get(path.as_ref())
            .map(|file| String::from_utf8_lossy(&file.contents).into_owned())
    }

    pub fn set_executable(&mut self, path: impl AsRef<Path>) {
        if let Some(file) = self.files.get_mut(path.as_ref()) {
            file.executable = true;
        }
    }

    pub fn is_executable(&self, path: impl AsRef<Path>) -> bool {
        self.files
            .get(path.as_ref())
            .map(|file| file.executable)
            .unwrap_or(false)
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        path.as_os_str().is_empty() || self.dirs.contains(path)
    }

    /// Make every operation touching `path` fail from now on.
    pub fn fail_on(&mut self, path: impl AsRef<Path>) {
        self.failing.insert(path.as_ref().to_path_buf());
    }

    fn insert_dirs(&mut self, dir: &Path) {
        for ancestor in dir.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                self.dirs.insert(ancestor.to_path_buf());
            }
        }
    }

    fn names_in(&self, dir: &Path) -> Vec<String> {
        self.files
            .keys()
            .filter(|path| path.parent() == Some(dir))
            .filter_map(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .collect()
    }

    fn check(&self, path: &Path) -> Result<()> {
        if self.failing.contains(path) {
            return Err(SerieError::fs(
                path,
                io::Error::new(io::ErrorKind::Other, "injected failure"),
            ));
        }
        Ok(())
    }

    fn check_parent(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or(Path::new(""));
        if self.is_dir(parent) {
            Ok(())
        } else {
            Err(not_found(path))
        }
    }
}

fn not_found(path: &Path) -> SerieError {
    SerieError::fs(
        path,
        io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
    )
}

impl SentinelFs for MemoryFs {
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        self.check(dir)?;
        if !self.is_dir(dir) {
            return Err(not_found(dir));
        }
        Ok(self.names_in(dir))
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        self.check(path)?;
        self.files
            .get(path)
            .map(|file| file.contents.len() as u64)
            .ok_or_else(|| not_found(path))
    }

    fn touch(&mut self, path: &Path) -> Result<()> {
        self.check(path)?;
        self.check_parent(path)?;
        self.files.entry(path.to_path_buf()).or_default();
        Ok(())
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        self.check(path)?;
        self.files
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path))
    }

    fn strip_exec(&mut self, path: &Path) -> Result<()> {
        self.check(path)?;
        let file = self.files.get_mut(path).ok_or_else(|| not_found(path))?;
        file.executable = false;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path) || self.is_dir(path)
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        self.check(path)?;
        self.insert_dirs(path);
        Ok(())
    }

    fn write_file(&mut self, path: &Path, contents: &[u8]) -> Result<()> {
        self.check(path)?;
        self.check_parent(path)?;
        let file = self.files.entry(path.to_path_buf()).or_default();
        file.contents = contents.to_vec();
        Ok(())
    }
}
