//! One invocation from discovery to reports
//!
//! A run rebuilds the registry from scratch, applies the command tokens,
//! reconciles the filesystem, and then writes whichever reports were asked
//! for. Nothing is carried over between runs.

use crate::command::{MutationInterpreter, RunOptions};
use crate::config::ReportConfig;
use crate::console::Console;
use crate::error::Result;
use crate::fs::{DryRunFs, SentinelFs};
use crate::reconcile::{ReconcilePlan, ReconciliationEngine, RunSummary};
use crate::registry::Registry;
use crate::report;
use crate::walker::DirectoryWalker;
use tracing::{debug, info};

/// Tracker bound to one directory tree
pub struct Serie<F: SentinelFs, C: Console> {
    fs: F,
    console: C,
    report: ReportConfig,
}

impl<F: SentinelFs, C: Console> Serie<F, C> {
    pub fn new(fs: F, console: C) -> Self {
        Self {
            fs,
            console,
            report: ReportConfig::default(),
        }
    }

    pub fn with_report(mut self, report: ReportConfig) -> Self {
        self.report = report;
        self
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn fs_mut(&mut self) -> &mut F {
        &mut self.fs
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn into_parts(self) -> (F, C) {
        (self.fs, self.console)
    }

    /// Discover the tree and apply `tokens` to a fresh registry.
    pub fn prepare<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<(Registry, RunOptions)> {
        prepare(&mut self.fs, &mut self.console, tokens)
    }

    /// Plan the changes `tokens` would make without writing anything,
    /// not even the directories links would create.
    pub fn plan<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<ReconcilePlan> {
        let mut dry_run = DryRunFs::new(&self.fs);
        let (registry, _) = prepare(&mut dry_run, &mut self.console, tokens)?;
        for dir in dry_run.planned_dirs() {
            debug!(dir = %dir.display(), "Dry run: directory would be created");
        }
        Ok(ReconciliationEngine::new(&registry).plan())
    }

    /// Run `tokens` against the tree: reconcile, then write reports.
    pub fn run<S: AsRef<str>>(&mut self, tokens: &[S]) -> Result<RunSummary> {
        let (registry, options) = self.prepare(tokens)?;

        let plan = ReconciliationEngine::new(&registry).plan();
        let summary = plan.apply(&mut self.fs)?;
        info!(
            created = summary.created,
            deleted = summary.deleted,
            kept = summary.kept,
            "Reconciled sentinels"
        );

        self.write_html(&registry, &options)?;
        if options.text {
            for line in report::text_lines(&registry) {
                self.console.out(&line);
            }
        }
        Ok(summary)
    }

    /// The HTML report is refreshed whenever it was requested or already
    /// exists, and removed once there is nothing to show.
    fn write_html(&mut self, registry: &Registry, options: &RunOptions) -> Result<()> {
        let path = self.report.html_file.as_path();
        let present = self.fs.exists(path);
        if !options.html && !present {
            return Ok(());
        }

        match report::html_document(registry) {
            Some(document) => {
                debug!(file = %path.display(), "Writing HTML report");
                self.fs.write_file(path, document.as_bytes())
            }
            None if present => {
                debug!(file = %path.display(), "Removing empty HTML report");
                self.fs.remove_file(path)
            }
            None => Ok(()),
        }
    }
}

fn prepare<F, C, S>(fs: &mut F, console: &mut C, tokens: &[S]) -> Result<(Registry, RunOptions)>
where
    F: SentinelFs + ?Sized,
    C: Console + ?Sized,
    S: AsRef<str>,
{
    let mut registry = Registry::new();
    DirectoryWalker::new(fs).discover(&mut registry)?;
    let options = MutationInterpreter::new(fs, console).apply_all(tokens, &mut registry)?;
    Ok((registry, options))
}
