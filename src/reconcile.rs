//! Reconciliation: from registry state back to filenames
//!
//! Every namespace is rendered into the full set of filenames it should
//! own. The plan then compares that desired set with what discovery found:
//! matching files stay, missing ones are created, the rest are deleted.
//! All creations happen before any deletion and a kept file is never
//! touched beyond clearing its executable bits.

use crate::error::Result;
use crate::fs::SentinelFs;
use crate::grammar::{self, EndMarker, SyntaxMode, LINK_SEPARATOR, SYNTAX_MARKER};
use crate::namespace::{relative_name, Namespace};
use crate::registry::Registry;
use crate::state;
use serde::Serialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Filesystem changes needed to match the registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcilePlan {
    pub create: Vec<PathBuf>,
    pub delete: Vec<PathBuf>,
    pub keep: Vec<PathBuf>,
}

/// Counts of what a run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub created: usize,
    pub deleted: usize,
    pub kept: usize,
}

impl ReconcilePlan {
    pub fn is_noop(&self) -> bool {
        self.create.is_empty() && self.delete.is_empty()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            created: self.create.len(),
            deleted: self.delete.len(),
            kept: self.keep.len(),
        }
    }

    /// Carry out the plan. Stops at the first failure; changes already
    /// made are not rolled back.
    pub fn apply<F: SentinelFs + ?Sized>(&self, fs: &mut F) -> Result<RunSummary> {
        for path in &self.create {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !fs.exists(parent) {
                    fs.create_dir_all(parent)?;
                }
            }
            info!(file = %path.display(), "Creating sentinel");
            fs.touch(path)?;
        }
        for path in &self.keep {
            debug!(file = %path.display(), "Keeping sentinel");
            fs.strip_exec(path)?;
        }
        for path in &self.delete {
            info!(file = %path.display(), "Removing sentinel");
            fs.remove_file(path)?;
        }
        Ok(self.summary())
    }
}

/// Renders desired filenames from a registry
pub struct ReconciliationEngine<'a> {
    registry: &'a Registry,
    syntax: SyntaxMode,
}

impl<'a> ReconciliationEngine<'a> {
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            syntax: registry.render_syntax(),
        }
    }

    /// Every filename the registry should own, without duplicates, in
    /// namespace order.
    pub fn desired(&self) -> Vec<PathBuf> {
        let mut desired = Vec::new();
        for (name, namespace) in self.registry.namespaces.iter() {
            self.render_namespace(name, namespace, &mut desired);
        }
        let mut seen = HashSet::new();
        desired.retain(|path| seen.insert(path.clone()));
        desired
    }

    /// Compare desired filenames with the discovered ones.
    pub fn plan(&self) -> ReconcilePlan {
        let desired = self.desired();
        let wanted: HashSet<&PathBuf> = desired.iter().collect();
        let mut plan = ReconcilePlan::default();

        for path in &desired {
            if !self.registry.is_discovered(path) {
                plan.create.push(path.clone());
            }
        }
        for path in self.registry.discovered() {
            if wanted.contains(path) {
                plan.keep.push(path.clone());
            } else {
                plan.delete.push(path.clone());
            }
        }

        debug!(
            create = plan.create.len(),
            delete = plan.delete.len(),
            keep = plan.keep.len(),
            "Reconciliation planned"
        );
        plan
    }

    fn render_namespace(&self, name: &str, namespace: &Namespace, out: &mut Vec<PathBuf>) {
        if let Some(subdir) = namespace.subdir() {
            out.push(self.link_path(name, subdir));
        }

        let Some(length) = namespace.render_length() else {
            return;
        };
        let (dir, prefix) = self.item_prefix(name);
        let width = state::digit_width(length);
        let chunk = self.registry.chunk_size();
        let declared = namespace.max();
        let marker = if namespace.is_complete() {
            EndMarker::Complete
        } else {
            EndMarker::Incomplete
        };

        let mut start = 1u32;
        loop {
            let end = start.saturating_add(chunk - 1).min(length);
            let mut filename = prefix.clone();
            // The chunk ending the series is always written so the length survives.
            let mut keep = end == length;

            for index in start..=end {
                let item_state = namespace.state(index);
                keep |= item_state != state::StateValue::None;
                filename.push_str(&state::encode(index, item_state, width));
            }
            if let Some(max) = declared.filter(|max| (start..=end).contains(max)) {
                if max == end {
                    filename.push(marker.as_char());
                }
                keep = true;
            }

            if keep {
                out.push(dir.join(filename));
            }
            if end == length {
                break;
            }
            start = end + 1;
        }
    }

    /// Directory and filename prefix for a namespace's item files.
    fn item_prefix(&self, name: &str) -> (PathBuf, String) {
        if self.syntax == SyntaxMode::Legacy {
            return (PathBuf::new(), String::new());
        }
        match self.registry.namespaces.anchor(name) {
            Some((anchor, dir)) => (dir, marker_prefix(relative_name(name, anchor))),
            None => (PathBuf::new(), marker_prefix(name)),
        }
    }

    /// Link file for `name`, placed in its nearest linked ancestor's
    /// directory. Its target is already stored relative to that directory.
    fn link_path(&self, name: &str, target: &Path) -> PathBuf {
        let (parent_dir, local) = match self.registry.namespaces.ancestor_anchor(name) {
            Some((anchor, dir)) => (dir, relative_name(name, anchor)),
            None => (PathBuf::new(), name),
        };
        parent_dir.join(format!(
            "{}{}{}{}",
            SYNTAX_MARKER,
            local,
            LINK_SEPARATOR,
            grammar::encode_subdir(target)
        ))
    }
}

fn marker_prefix(local: &str) -> String {
    if local.is_empty() {
        SYNTAX_MARKER.to_string()
    } else {
        format!("{}{}{}", SYNTAX_MARKER, local, grammar::NAMESPACE_SEPARATOR)
    }
}
