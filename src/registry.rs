//! Registry: the per-invocation aggregate root
//!
//! Built fresh for every run: discovery fills it, commands mutate it,
//! reconciliation reads it, then it is dropped.

use crate::grammar::SyntaxMode;
use crate::namespace::NamespaceRegistry;
use std::path::{Path, PathBuf};

/// Consecutive indices rendered into one filename.
pub const CHUNK_SIZE: u32 = 20;

#[derive(Debug, Clone)]
pub struct Registry {
    pub namespaces: NamespaceRegistry,
    discovered: Vec<PathBuf>,
    syntax: SyntaxMode,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            namespaces: NamespaceRegistry::new(),
            discovered: Vec::new(),
            syntax: SyntaxMode::Current,
        }
    }

    pub fn chunk_size(&self) -> u32 {
        CHUNK_SIZE
    }

    /// Sentinel paths found on disk this run, relative to the root.
    pub fn discovered(&self) -> &[PathBuf] {
        &self.discovered
    }

    pub fn record_discovered(&mut self, path: PathBuf) {
        self.discovered.push(path);
    }

    pub fn is_discovered(&self, path: &Path) -> bool {
        self.discovered.iter().any(|known| known == path)
    }

    pub fn syntax(&self) -> SyntaxMode {
        self.syntax
    }

    pub fn set_syntax(&mut self, syntax: SyntaxMode) {
        self.syntax = syntax;
    }

    /// Mode used for writing. Legacy names cannot carry a namespace, so
    /// any named namespace forces current syntax.
    pub fn render_syntax(&self) -> SyntaxMode {
        match self.syntax {
            SyntaxMode::Legacy if self.namespaces.has_named() => SyntaxMode::Current,
            mode => mode,
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
