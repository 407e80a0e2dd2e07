//! Breadth-first discovery of sentinel files
//!
//! Starts at the root, follows link files into their subdirectories, and
//! merges every item file into the registry. Directories named by links are
//! created on the way so a dangling link repairs itself.

use crate::error::Result;
use crate::fs::SentinelFs;
use crate::grammar::{self, SentinelName, SyntaxObservations};
use crate::registry::Registry;
use crate::state;
use std::collections::{HashSet, VecDeque};
use std::path::PathBuf;
use tracing::{debug, trace, warn};

/// Walks linked directories and fills a [`Registry`]
pub struct DirectoryWalker<'a, F: SentinelFs + ?Sized> {
    fs: &'a mut F,
}

impl<'a, F: SentinelFs + ?Sized> DirectoryWalker<'a, F> {
    pub fn new(fs: &'a mut F) -> Self {
        Self { fs }
    }

    /// Discover every sentinel reachable from the root and settle the
    /// run's syntax mode.
    pub fn discover(&mut self, registry: &mut Registry) -> Result<()> {
        // Each entry is a directory (`None` for the root) and the namespace
        // whose link led there.
        let mut queue: VecDeque<(Option<PathBuf>, Option<String>)> =
            VecDeque::from([(None, None)]);
        let mut visited: HashSet<Option<PathBuf>> = HashSet::new();
        let mut syntax = SyntaxObservations::default();

        while let Some((current, owner)) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            let dir = current.clone().unwrap_or_default();

            debug!(dir = %dir.display(), owner = ?owner, "Scanning directory");

            for filename in self.fs.list_dir(&dir)? {
                let path = dir.join(&filename);
                if self.fs.file_size(&path)? != 0 {
                    continue;
                }

                match grammar::parse(&filename) {
                    SentinelName::Item(item) => {
                        if item.highest_index() > state::MAX_INDEX {
                            warn!(file = %path.display(), "Skipping sentinel with an oversized index");
                            continue;
                        }
                        let qualified = grammar::nest(owner.as_deref(), &item.namespace);
                        let name = match registry.namespaces.entry(&qualified) {
                            Ok(name) => name,
                            Err(e) => {
                                warn!(file = %path.display(), error = %e, "Skipping sentinel with unusable namespace");
                                continue;
                            }
                        };
                        syntax.record(item.syntax);
                        let namespace = registry.namespaces.get_or_create(&name);
                        for (index, state) in &item.runs {
                            if *index == 0 {
                                trace!(file = %path.display(), "Ignoring index 0");
                                continue;
                            }
                            namespace.merge(*index, *state);
                        }
                        if item.end.is_some() {
                            let declared = item.highest_index();
                            let max = namespace.max().map_or(declared, |m| m.max(declared));
                            namespace.set_max(max);
                        }
                        trace!(file = %path.display(), namespace = %name, "Item file");
                        registry.record_discovered(path);
                    }
                    SentinelName::Link(link) => {
                        let qualified = grammar::nest(owner.as_deref(), &link.namespace);
                        let name = match registry.namespaces.entry(&qualified) {
                            Ok(name) => name,
                            Err(e) => {
                                warn!(file = %path.display(), error = %e, "Skipping sentinel with unusable namespace");
                                continue;
                            }
                        };
                        syntax.record(grammar::SyntaxMode::Current);
                        registry.namespaces.set_subdir(&name, link.subdir);

                        if let Some(subdir) = registry.namespaces.linked_dir(&name) {
                            let target = Some(subdir.clone());
                            if !visited.contains(&target)
                                && !queue.iter().any(|(queued, _)| *queued == target)
                            {
                                self.fs.create_dir_all(&subdir)?;
                                queue.push_back((target, Some(name.clone())));
                            }
                        }
                        trace!(file = %path.display(), namespace = %name, "Link file");
                        registry.record_discovered(path);
                    }
                    SentinelName::Unrecognized => {
                        trace!(file = %path.display(), "Not a sentinel");
                    }
                }
            }
        }

        let mode = syntax.resolve(registry.namespaces.has_named());
        debug!(
            files = registry.discovered().len(),
            syntax = ?mode,
            "Discovery complete"
        );
        registry.set_syntax(mode);
        Ok(())
    }
}
