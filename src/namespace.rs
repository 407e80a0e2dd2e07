//! Namespaces: named series with their own index space
//!
//! Names are canonicalized on entry so that every alias of a series lands
//! on the same [`Namespace`]: `:` folds into `_` and a trailing numeral is
//! re-padded to two digits (`s1`, `s01` and `s001` are one namespace).

use crate::error::{Result, SerieError};
use crate::grammar::{self, NAMESPACE_SEPARATOR};
use crate::state::{StateFlag, StateValue};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// One series: sparse item states plus optional declared end and link
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    items: BTreeMap<u32, StateValue>,
    max: Option<u32>,
    subdir: Option<PathBuf>,
}

impl Namespace {
    /// State of an index; unknown indices read as NONE.
    pub fn state(&self, index: u32) -> StateValue {
        self.items.get(&index).copied().unwrap_or_default()
    }

    /// OR a decoded state into an index.
    pub fn merge(&mut self, index: u32, state: StateValue) {
        let entry = self.items.entry(index).or_default();
        *entry = entry.merge(state);
    }

    /// Set or clear one flag, creating the index at NONE first.
    pub fn apply(&mut self, index: u32, flag: StateFlag, set: bool) {
        let entry = self.items.entry(index).or_default();
        *entry = if set {
            entry.with(flag)
        } else {
            entry.without(flag)
        };
    }

    /// Highest index present in the map, NONE entries included.
    pub fn highest_known(&self) -> Option<u32> {
        self.items.keys().next_back().copied()
    }

    pub fn max(&self) -> Option<u32> {
        self.max
    }

    pub fn set_max(&mut self, max: u32) {
        self.max = Some(max);
    }

    /// Link target, relative to the directory of the nearest linked
    /// ancestor (the root when there is none).
    pub fn subdir(&self) -> Option<&Path> {
        self.subdir.as_deref()
    }

    pub fn set_subdir(&mut self, subdir: Option<PathBuf>) {
        self.subdir = subdir;
    }

    /// Number of indices to render: the declared end when present,
    /// otherwise the highest known index.
    pub fn render_length(&self) -> Option<u32> {
        self.max.or_else(|| self.highest_known()).filter(|&n| n > 0)
    }

    /// True when every index from 1 through the declared end is obtained.
    pub fn is_complete(&self) -> bool {
        match self.max {
            Some(max) => (1..=max).all(|index| self.state(index).obtained()),
            None => false,
        }
    }
}

/// All namespaces of one run, keyed by canonical name
#[derive(Debug, Clone, Default)]
pub struct NamespaceRegistry {
    namespaces: BTreeMap<String, Namespace>,
}

impl NamespaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonicalize a raw namespace name.
    pub fn resolve(raw: &str) -> Result<String> {
        let name = raw.replace(':', "_");
        if name.ends_with(NAMESPACE_SEPARATOR) {
            return Err(SerieError::NamespaceName {
                name,
                reason: "must not end with '_'".to_string(),
            });
        }
        if name.is_empty() {
            return Ok(name);
        }
        if !grammar::is_valid_name_segment(&name) || name.contains(['/', '\\']) {
            return Err(SerieError::NamespaceName {
                name,
                reason: "must not start with a digit or contain [ ] $ ! @ ~ / \\".to_string(),
            });
        }
        Ok(fold_numeral(&name))
    }

    /// Canonicalize `raw` and make sure the namespace exists.
    pub fn entry(&mut self, raw: &str) -> Result<String> {
        let name = Self::resolve(raw)?;
        self.get_or_create(&name);
        Ok(name)
    }

    /// Namespace by canonical name, created empty on first reference.
    pub fn get_or_create(&mut self, name: &str) -> &mut Namespace {
        self.namespaces.entry(name.to_string()).or_default()
    }

    pub fn get(&self, name: &str) -> Option<&Namespace> {
        self.namespaces.get(name)
    }

    pub fn set_max(&mut self, name: &str, max: u32) {
        self.get_or_create(name).set_max(max);
    }

    pub fn get_max(&self, name: &str) -> Option<u32> {
        self.get(name).and_then(Namespace::max)
    }

    pub fn set_subdir(&mut self, name: &str, subdir: PathBuf) {
        self.get_or_create(name).set_subdir(Some(subdir));
    }

    pub fn get_subdir(&self, name: &str) -> Option<&Path> {
        self.get(name).and_then(Namespace::subdir)
    }

    /// Directory a linked namespace's files live in, relative to the root.
    pub fn linked_dir(&self, name: &str) -> Option<PathBuf> {
        self.linked(name).map(|(_, dir)| dir)
    }

    /// Reverse lookup: which namespace's files live in `dir`.
    pub fn find_by_subdir(&self, dir: &Path) -> Option<&str> {
        self.namespaces
            .keys()
            .find(|name| self.linked_dir(name).as_deref() == Some(dir))
            .map(String::as_str)
    }

    /// Detach every subdir link. Files already in those directories are
    /// left where they are.
    pub fn clear_subdirs(&mut self) {
        for namespace in self.namespaces.values_mut() {
            namespace.set_subdir(None);
        }
    }

    /// Canonical names in lexicographic order, root first.
    pub fn list(&self) -> Vec<&str> {
        self.namespaces.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Namespace)> {
        self.namespaces
            .iter()
            .map(|(name, namespace)| (name.as_str(), namespace))
    }

    /// True when any namespace other than the root exists.
    pub fn has_named(&self) -> bool {
        self.namespaces.keys().any(|name| !name.is_empty())
    }

    /// Nearest linked namespace among `name` and its `_`-separated
    /// ancestors, longest first, with its resolved directory.
    pub fn anchor(&self, name: &str) -> Option<(&str, PathBuf)> {
        self.linked(name).or_else(|| self.ancestor_anchor(name))
    }

    /// Nearest linked namespace among the strict ancestors of `name`.
    pub fn ancestor_anchor(&self, name: &str) -> Option<(&str, PathBuf)> {
        name.rmatch_indices(NAMESPACE_SEPARATOR)
            .find_map(|(pos, _)| self.linked(&name[..pos]))
    }

    // Targets are stored relative to the nearest linked ancestor and
    // resolved on every lookup.
    fn linked(&self, name: &str) -> Option<(&str, PathBuf)> {
        let (key, namespace) = self.namespaces.get_key_value(name)?;
        let local = namespace.subdir()?;
        let dir = match self.ancestor_anchor(name) {
            Some((_, parent)) => parent.join(local),
            None => local.to_path_buf(),
        };
        Some((key.as_str(), dir))
    }
}

/// Re-pad a trailing numeral to two digits, dropping extra leading zeros.
fn fold_numeral(name: &str) -> String {
    let digits_start = name
        .char_indices()
        .rev()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(pos, c)| pos + c.len_utf8())
        .unwrap_or(0);
    let (prefix, digits) = name.split_at(digits_start);
    if digits.is_empty() {
        return name.to_string();
    }
    let trimmed = digits.trim_start_matches('0');
    let trimmed = if trimmed.is_empty() { "0" } else { trimmed };
    format!("{}{:0>2}", prefix, trimmed)
}

/// `name` with the `anchor` prefix and its separator removed.
pub fn relative_name<'a>(name: &'a str, anchor: &str) -> &'a str {
    if anchor.is_empty() {
        return name;
    }
    name.strip_prefix(anchor)
        .map(|rest| rest.trim_start_matches(NAMESPACE_SEPARATOR))
        .unwrap_or(name)
}
