//! Sentinel filename grammar
//!
//! Two grammars share the directory with arbitrary user files:
//!
//! - item files: `[@_]<namespace>_<runs>[+|#]`, where runs come from
//!   [`crate::state`] and the trailing mark declares the series end
//!   (`+` incomplete, `#` complete);
//! - link files: `@_<namespace>~<subdir>`, where `_` stands for the path
//!   separator inside `<subdir>`.
//!
//! Parsing is pure; the walker decides what to do with the result.

use crate::state::{self, StateValue};
use std::path::{Component, Path, PathBuf};

/// Separator between namespace segments, and between namespace and runs.
pub const NAMESPACE_SEPARATOR: char = '_';

/// Separator between a link's namespace and its subdirectory.
pub const LINK_SEPARATOR: char = '~';

/// Marker opening every current-syntax filename.
pub const SYNTAX_MARKER: &str = "@_";

/// Alternate marker accepted when reading.
const ALT_SYNTAX_MARKER: &str = "@:";

/// Characters that never appear in a namespace segment.
pub const FORBIDDEN_NAME_CHARS: &[char] = &['[', ']', '$', '!', '@', ':', '~'];

/// Filename-prefix convention in force for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxMode {
    /// Bare runs, no marker; predates namespaces.
    Legacy,
    /// `@_` marker, namespaces and links.
    Current,
}

/// Declared-end mark trailing an item file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndMarker {
    Incomplete,
    Complete,
}

impl EndMarker {
    pub fn as_char(self) -> char {
        match self {
            EndMarker::Incomplete => '+',
            EndMarker::Complete => '#',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(EndMarker::Incomplete),
            '#' => Some(EndMarker::Complete),
            _ => None,
        }
    }
}

/// A parsed item filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFile {
    pub syntax: SyntaxMode,
    /// Namespace local to the directory the file sits in; empty for root.
    pub namespace: String,
    pub runs: Vec<(u32, StateValue)>,
    pub end: Option<EndMarker>,
}

impl ItemFile {
    /// Highest index among this file's runs.
    pub fn highest_index(&self) -> u32 {
        self.runs.iter().map(|(index, _)| *index).max().unwrap_or(0)
    }
}

/// A parsed link filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFile {
    /// Namespace local to the directory the file sits in.
    pub namespace: String,
    /// Target directory, relative to the directory the file sits in.
    pub subdir: PathBuf,
}

/// Result of tokenizing one filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentinelName {
    Item(ItemFile),
    Link(LinkFile),
    Unrecognized,
}

/// Classify a bare filename (no directory part).
pub fn parse(filename: &str) -> SentinelName {
    if let Some(item) = parse_item(filename) {
        return SentinelName::Item(item);
    }
    if let Some(link) = parse_link(filename) {
        return SentinelName::Link(link);
    }
    SentinelName::Unrecognized
}

fn parse_item(filename: &str) -> Option<ItemFile> {
    let (syntax, mut rest) = match filename
        .strip_prefix(SYNTAX_MARKER)
        .or_else(|| filename.strip_prefix(ALT_SYNTAX_MARKER))
    {
        Some(rest) => (SyntaxMode::Current, rest),
        None => (SyntaxMode::Legacy, filename),
    };

    let end = rest.chars().last().and_then(EndMarker::from_char);
    if end.is_some() {
        rest = &rest[..rest.len() - 1];
    }

    let (name_segment, runs_segment) = match rest.rfind(NAMESPACE_SEPARATOR) {
        Some(pos) => (Some(&rest[..pos]), &rest[pos + 1..]),
        None => (None, rest),
    };
    if let Some(name) = name_segment {
        if !is_valid_name_segment(name) {
            return None;
        }
    }

    let runs = state::decode(runs_segment)?;

    let namespace = match syntax {
        SyntaxMode::Current => name_segment.unwrap_or("").to_string(),
        SyntaxMode::Legacy => legacy_namespace(filename),
    };

    Some(ItemFile {
        syntax,
        namespace,
        runs,
        end,
    })
}

/// Legacy names only carry a namespace when splitting yields three or
/// more segments; the first and last segments are dropped.
fn legacy_namespace(filename: &str) -> String {
    let parts: Vec<&str> = filename.split(NAMESPACE_SEPARATOR).collect();
    if parts.len() < 3 {
        return String::new();
    }
    parts[1..parts.len() - 1].join("_")
}

fn parse_link(filename: &str) -> Option<LinkFile> {
    let rest = filename.strip_prefix(SYNTAX_MARKER)?;
    let (namespace, target) = rest.split_once(LINK_SEPARATOR)?;
    if !is_valid_name_segment(namespace) {
        return None;
    }
    let subdir = decode_subdir(target)?;
    if subdir.as_os_str().is_empty() {
        return None;
    }
    Some(LinkFile {
        namespace: namespace.to_string(),
        subdir,
    })
}

/// A namespace segment must not start with a digit and must avoid the
/// characters reserved by both grammars.
pub fn is_valid_name_segment(name: &str) -> bool {
    match name.chars().next() {
        None => false,
        Some(first) if first.is_ascii_digit() => false,
        Some(_) => !name.contains(FORBIDDEN_NAME_CHARS),
    }
}

/// Turn the `_`-separated link target into a relative path. `None` when a
/// segment would leave the tracked tree (`.`, `..`, a drive prefix).
pub fn decode_subdir(target: &str) -> Option<PathBuf> {
    let mut subdir = PathBuf::new();
    for part in target
        .split(|c| c == NAMESPACE_SEPARATOR || c == '/' || c == '\\')
        .filter(|part| !part.is_empty())
    {
        let mut components = Path::new(part).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => subdir.push(part),
            _ => return None,
        }
    }
    Some(subdir)
}

/// Write a relative path in link-target form.
pub fn encode_subdir(subdir: &Path) -> String {
    subdir
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("_")
}

/// Qualify a directory-local namespace with the namespace owning the
/// directory. An empty local name collapses to the owner itself.
pub fn nest(owner: Option<&str>, local: &str) -> String {
    match owner {
        Some(owner) if local.is_empty() => owner.to_string(),
        Some(owner) if owner.is_empty() => local.to_string(),
        Some(owner) => format!("{}{}{}", owner, NAMESPACE_SEPARATOR, local),
        None => local.to_string(),
    }
}

/// Syntax evidence gathered during discovery
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntaxObservations {
    pub saw_current: bool,
    pub saw_legacy: bool,
}

impl SyntaxObservations {
    pub fn record(&mut self, syntax: SyntaxMode) {
        match syntax {
            SyntaxMode::Current => self.saw_current = true,
            SyntaxMode::Legacy => self.saw_legacy = true,
        }
    }

    /// Decide the run's mode. Legacy survives only when legacy files were
    /// seen, no current ones were, and every namespace is the root.
    pub fn resolve(self, has_named_namespace: bool) -> SyntaxMode {
        if self.saw_current {
            SyntaxMode::Current
        } else if self.saw_legacy && !has_named_namespace {
            SyntaxMode::Legacy
        } else {
            SyntaxMode::Current
        }
    }
}
