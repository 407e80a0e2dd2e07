//! Filesystem collaborator
//!
//! Every path handed to a [`SentinelFs`] is relative to the tracked root
//! directory; the empty path is the root itself. [`OsFs`] talks to the real
//! disk, [`memory::MemoryFs`] keeps everything in memory for tests, and
//! [`dry_run::DryRunFs`] reads through to another filesystem without writing.

pub mod dry_run;
pub mod memory;

pub use dry_run::DryRunFs;
pub use memory::MemoryFs;

use crate::error::{Result, SerieError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Operations the walker and the reconciliation engine need from storage
pub trait SentinelFs {
    /// Names of the regular files directly inside `dir`, sorted.
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>>;

    fn file_size(&self, path: &Path) -> Result<u64>;

    /// Create an empty file without executable bits.
    fn touch(&mut self, path: &Path) -> Result<()>;

    fn remove_file(&mut self, path: &Path) -> Result<()>;

    /// Clear executable bits; a no-op when none are set.
    fn strip_exec(&mut self, path: &Path) -> Result<()>;

    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and any missing parents; a no-op when present.
    fn create_dir_all(&mut self, path: &Path) -> Result<()>;

    /// Replace a file's contents, used for the HTML report.
    fn write_file(&mut self, path: &Path, contents: &[u8]) -> Result<()>;
}

/// [`SentinelFs`] backed by the real filesystem under `root`
#[derive(Debug, Clone)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.as_os_str().is_empty() {
            self.root.clone()
        } else {
            self.root.join(path)
        }
    }
}

impl SentinelFs for OsFs {
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        let full = self.resolve(dir);
        let mut names = Vec::new();

        let walker = WalkDir::new(&full)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| SerieError::fs(&full, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            match entry.file_name().to_str() {
                Some(name) => names.push(name.to_string()),
                None => {
                    tracing::debug!("Skipping non-UTF8 filename: {:?}", entry.path());
                }
            }
        }

        Ok(names)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        let full = self.resolve(path);
        std::fs::symlink_metadata(&full)
            .map(|metadata| metadata.len())
            .map_err(|e| SerieError::fs(full, e))
    }

    fn touch(&mut self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .map_err(|e| SerieError::fs(&full, e))?;
        self.strip_exec(path)
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        std::fs::remove_file(&full).map_err(|e| SerieError::fs(full, e))
    }

    #[cfg(unix)]
    fn strip_exec(&mut self, path: &Path) -> Result<()> {
        use std::os::unix::fs::PermissionsExt;

        let full = self.resolve(path);
        let metadata = std::fs::symlink_metadata(&full).map_err(|e| SerieError::fs(&full, e))?;
        let mode = metadata.permissions().mode();
        if mode & 0o111 != 0 {
            std::fs::set_permissions(&full, std::fs::Permissions::from_mode(mode & !0o111))
                .map_err(|e| SerieError::fs(&full, e))?;
        }
        Ok(())
    }

    #[cfg(not(unix))]
    fn strip_exec(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        let full = self.resolve(path);
        std::fs::create_dir_all(&full).map_err(|e| SerieError::fs(full, e))
    }

    fn write_file(&mut self, path: &Path, contents: &[u8]) -> Result<()> {
        let full = self.resolve(path);
        std::fs::write(&full, contents).map_err(|e| SerieError::fs(full, e))
    }
}
