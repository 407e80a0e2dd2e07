//! Read-through view of another filesystem that never writes.

use super::SentinelFs;
use crate::error::Result;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Reads go to the wrapped filesystem. Directories that would be created
/// are remembered so later listings see them empty; file writes are
/// dropped.
pub struct DryRunFs<'a, F: SentinelFs + ?Sized> {
    inner: &'a F,
    planned_dirs: BTreeSet<PathBuf>,
}

impl<'a, F: SentinelFs + ?Sized> DryRunFs<'a, F> {
    pub fn new(inner: &'a F) -> Self {
        Self {
            inner,
            planned_dirs: BTreeSet::new(),
        }
    }

    /// Directories the run would have created.
    pub fn planned_dirs(&self) -> impl Iterator<Item = &Path> {
        self.planned_dirs.iter().map(PathBuf::as_path)
    }

    fn is_planned(&self, path: &Path) -> bool {
        self.planned_dirs
            .iter()
            .any(|dir| dir.starts_with(path))
    }
}

impl<F: SentinelFs + ?Sized> SentinelFs for DryRunFs<'_, F> {
    fn list_dir(&self, dir: &Path) -> Result<Vec<String>> {
        if !self.inner.exists(dir) && self.is_planned(dir) {
            return Ok(Vec::new());
        }
        self.inner.list_dir(dir)
    }

    fn file_size(&self, path: &Path) -> Result<u64> {
        self.inner.file_size(path)
    }

    fn touch(&mut self, path: &Path) -> Result<()> {
        trace!(file = %path.display(), "Dry run: skipping create");
        Ok(())
    }

    fn remove_file(&mut self, path: &Path) -> Result<()> {
        trace!(file = %path.display(), "Dry run: skipping delete");
        Ok(())
    }

    fn strip_exec(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path) || self.is_planned(path)
    }

    fn create_dir_all(&mut self, path: &Path) -> Result<()> {
        if !self.inner.exists(path) {
            self.planned_dirs.insert(path.to_path_buf());
        }
        Ok(())
    }

    fn write_file(&mut self, path: &Path, _contents: &[u8]) -> Result<()> {
        trace!(file = %path.display(), "Dry run: skipping write");
        Ok(())
    }
}
