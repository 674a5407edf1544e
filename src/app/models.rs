use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Represents the final configuration after merging presets and CLI args.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    pub ignore_rules: BTreeSet<String>,
    pub replace_existing: bool,
    pub follow_source_symlinks: bool,
    pub confirm_before_run: bool,
}

/// A single source file paired with the place its link will live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTask {
    pub source_path: PathBuf,
    pub target_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    SourceIsLink,
    TargetExists,
    TargetIsDirectory,
    NotUnderRoot,
    DirectoryCreation,
    RemoveFailed,
    LinkFailed,
}

impl SkipReason {
    /// Skips caused by a filesystem operation going wrong rather than by policy.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            SkipReason::NotUnderRoot
                | SkipReason::DirectoryCreation
                | SkipReason::RemoveFailed
                | SkipReason::LinkFailed
        )
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::SourceIsLink => "source is a link",
            SkipReason::TargetExists => "target already exists",
            SkipReason::TargetIsDirectory => "target is a directory",
            SkipReason::NotUnderRoot => "path is not under the source root",
            SkipReason::DirectoryCreation => "unable to create directory",
            SkipReason::RemoveFailed => "unable to remove existing target",
            SkipReason::LinkFailed => "unable to create link",
        };
        f.write_str(text)
    }
}

/// Terminal state for one candidate file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created { replaced: bool },
    Skipped(SkipReason),
}

/// Totals for a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LinkReport {
    pub created: usize,
    pub replaced: usize,
    pub skipped: usize,
    pub ignored: usize,
    pub failed: usize,
}

impl LinkReport {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Created { replaced } => {
                self.created += 1;
                if *replaced {
                    self.replaced += 1;
                }
            }
            Outcome::Skipped(reason) => {
                self.skipped += 1;
                if reason.is_failure() {
                    self.failed += 1;
                }
            }
        }
    }
}
