//! Command tokens and their effect on the registry
//!
//! Token forms, checked in order:
//!
//! - control words: `html`, `text`, `m`/`migration`, `f`/`flatten`;
//! - links: `<namespace>~<subdir>`;
//! - mutations: `[<namespace>(:|_)]<flags><selectors>` or
//!   `[<namespace>(:|_)]e[<max>]`.
//!
//! Flags are any of `+` (obtained), `-` (not obtained), `s` (reviewed),
//! `u` (not reviewed), defaulting to `+`. Selectors are comma-separated
//! integers or inclusive ranges.

use crate::console::Console;
use crate::error::{Result, SerieError};
use crate::fs::SentinelFs;
use crate::grammar::{self, SyntaxMode, LINK_SEPARATOR};
use crate::registry::Registry;
use crate::state::{self, StateFlag};
use std::ops::RangeInclusive;
use tracing::{debug, warn};

/// Switches collected from control tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub html: bool,
    pub text: bool,
}

/// One flag change applied to each selected index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagOp {
    pub flag: StateFlag,
    pub set: bool,
}

impl FlagOp {
    fn from_char(c: char) -> Option<Self> {
        let (flag, set) = match c {
            '+' => (StateFlag::Obtained, true),
            '-' => (StateFlag::Obtained, false),
            's' => (StateFlag::Reviewed, true),
            'u' => (StateFlag::Reviewed, false),
            _ => return None,
        };
        Some(FlagOp { flag, set })
    }
}

/// A single index or an inclusive range, always low to high
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    Single(u32),
    Range(u32, u32),
}

impl Selector {
    /// Parse one comma-separated element.
    pub fn parse(element: &str) -> Option<Self> {
        if is_number(element) {
            return parse_index(element).map(Selector::Single);
        }
        let (start, end) = element.split_once('-')?;
        if !is_number(start) || !is_number(end) {
            return None;
        }
        let (start, end) = (parse_index(start)?, parse_index(end)?);
        Some(Selector::Range(start.min(end), start.max(end)))
    }

    pub fn indices(self) -> RangeInclusive<u32> {
        match self {
            Selector::Single(index) => index..=index,
            Selector::Range(start, end) => start..=end,
        }
    }
}

fn is_number(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// Indices start at 1.
fn parse_index(text: &str) -> Option<u32> {
    text.parse()
        .ok()
        .filter(|index| (1..=state::MAX_INDEX).contains(index))
}

/// What a mutation token does to its namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    Flags {
        ops: Vec<FlagOp>,
        selectors: Vec<Selector>,
        rejected: Vec<String>,
    },
    /// `e`: freeze the end at the highest known index.
    EndAtHighest,
    /// `e<n>`
    EndAt(u32),
    /// `e` followed by something that is not an index.
    InvalidEnd(String),
}

impl Mutation {
    pub fn parse(remainder: &str) -> Self {
        if let Some(end) = remainder.strip_prefix('e') {
            if end.is_empty() {
                return Mutation::EndAtHighest;
            }
            return match parse_index(end).filter(|_| is_number(end)) {
                Some(max) => Mutation::EndAt(max),
                None => Mutation::InvalidEnd(remainder.to_string()),
            };
        }

        let mut ops = Vec::new();
        let mut rest = remainder;
        while let Some(op) = rest.chars().next().and_then(FlagOp::from_char) {
            ops.push(op);
            rest = &rest[1..];
        }
        if ops.is_empty() {
            ops.push(FlagOp {
                flag: StateFlag::Obtained,
                set: true,
            });
        }

        let mut selectors = Vec::new();
        let mut rejected = Vec::new();
        for element in rest.split(',') {
            match Selector::parse(element) {
                Some(selector) => selectors.push(selector),
                None => rejected.push(element.to_string()),
            }
        }

        Mutation::Flags {
            ops,
            selectors,
            rejected,
        }
    }
}

/// A parsed command token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Html,
    Text,
    Migrate,
    Flatten,
    Link { namespace: String, target: String },
    Mutate { namespace: String, mutation: Mutation },
}

impl Command {
    pub fn parse(token: &str) -> Self {
        match token {
            "html" => return Command::Html,
            "text" => return Command::Text,
            "m" | "migration" => return Command::Migrate,
            "f" | "flatten" => return Command::Flatten,
            _ => {}
        }

        if let Some((namespace, target)) = token.split_once(LINK_SEPARATOR) {
            return Command::Link {
                namespace: namespace.to_string(),
                target: target.to_string(),
            };
        }

        let (namespace, remainder) = token
            .rsplit_once(':')
            .or_else(|| token.rsplit_once(grammar::NAMESPACE_SEPARATOR))
            .unwrap_or(("", token));

        Command::Mutate {
            namespace: namespace.to_string(),
            mutation: Mutation::parse(remainder),
        }
    }
}

/// Applies commands to a registry
pub struct MutationInterpreter<'a, F: SentinelFs + ?Sized, C: Console + ?Sized> {
    fs: &'a mut F,
    console: &'a mut C,
}

impl<'a, F: SentinelFs + ?Sized, C: Console + ?Sized> MutationInterpreter<'a, F, C> {
    pub fn new(fs: &'a mut F, console: &'a mut C) -> Self {
        Self { fs, console }
    }

    /// Parse and apply tokens left to right.
    pub fn apply_all<S: AsRef<str>>(
        &mut self,
        tokens: &[S],
        registry: &mut Registry,
    ) -> Result<RunOptions> {
        let mut options = RunOptions::default();
        for token in tokens {
            let command = Command::parse(token.as_ref());
            debug!(token = token.as_ref(), command = ?command, "Applying command");
            self.apply(&command, registry, &mut options)?;
        }
        Ok(options)
    }

    pub fn apply(
        &mut self,
        command: &Command,
        registry: &mut Registry,
        options: &mut RunOptions,
    ) -> Result<()> {
        match command {
            Command::Html => options.html = true,
            Command::Text => options.text = true,
            Command::Migrate => registry.set_syntax(SyntaxMode::Current),
            Command::Flatten => registry.namespaces.clear_subdirs(),
            Command::Link { namespace, target } => self.link(registry, namespace, target)?,
            Command::Mutate {
                namespace,
                mutation,
            } => self.mutate(registry, namespace, mutation)?,
        }
        Ok(())
    }

    fn link(&mut self, registry: &mut Registry, raw: &str, target: &str) -> Result<()> {
        let name = registry.namespaces.entry(raw)?;
        if name.is_empty() {
            return Err(SerieError::NamespaceName {
                name,
                reason: "the root namespace cannot be linked".to_string(),
            });
        }

        let Some(relative) = grammar::decode_subdir(target) else {
            self.console.err(&format!(
                "Can't link [{}] outside the tracked directory: [{}]",
                name, target
            ));
            return Ok(());
        };
        if relative.as_os_str().is_empty() {
            return Ok(());
        }
        let subdir = match registry.namespaces.ancestor_anchor(&name) {
            Some((_, parent_dir)) => parent_dir.join(&relative),
            None => relative.clone(),
        };

        if let Some(other) = registry.namespaces.find_by_subdir(&subdir) {
            if other != name {
                self.console.err(&format!(
                    "Directory [{}] is already linked to [{}]",
                    subdir.display(),
                    other
                ));
                return Ok(());
            }
        }

        self.fs.create_dir_all(&subdir)?;
        registry.namespaces.set_subdir(&name, relative);
        Ok(())
    }

    fn mutate(&mut self, registry: &mut Registry, raw: &str, mutation: &Mutation) -> Result<()> {
        let name = registry.namespaces.entry(raw)?;
        let namespace = registry.namespaces.get_or_create(&name);

        match mutation {
            Mutation::EndAtHighest => match namespace.highest_known() {
                Some(highest) => namespace.set_max(highest),
                None => warn!(namespace = %name, "Nothing to end in an empty namespace"),
            },
            Mutation::EndAt(max) => namespace.set_max(*max),
            Mutation::InvalidEnd(text) => {
                self.console
                    .err(&SerieError::SelectorParse(text.clone()).to_string());
            }
            Mutation::Flags {
                ops,
                selectors,
                rejected,
            } => {
                for element in rejected {
                    self.console
                        .err(&SerieError::SelectorParse(element.clone()).to_string());
                }
                for selector in selectors {
                    for index in selector.indices() {
                        for op in ops {
                            namespace.apply(index, op.flag, op.set);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
