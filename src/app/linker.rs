use crate::app::error::ReclinkError;
use crate::app::mapper::map_path;
use crate::app::matcher::IgnoreMatcher;
use crate::app::models::{LinkReport, LinkTask, Outcome, RuntimeConfig, SkipReason};
use ignore::WalkBuilder;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Fails early on targets where file symlinks cannot be created at all.
pub fn ensure_supported_platform() -> Result<(), ReclinkError> {
    if cfg!(any(unix, windows)) {
        Ok(())
    } else {
        Err(ReclinkError::UnsupportedPlatform)
    }
}

/// Walks the source tree and mirrors every file into the target tree as a link.
pub struct TreeLinker<'a> {
    config: &'a RuntimeConfig,
    matcher: IgnoreMatcher,
}

impl<'a> TreeLinker<'a> {
    pub fn new(config: &'a RuntimeConfig) -> Self {
        Self {
            config,
            matcher: IgnoreMatcher::new(&config.source_root, &config.ignore_rules),
        }
    }

    pub fn run(&self) -> LinkReport {
        let mut report = LinkReport::default();
        let ignored = Arc::new(AtomicUsize::new(0));

        let prune = self.matcher.clone();
        let ignored_count = Arc::clone(&ignored);
        // Plain filesystem walk: no gitignore, no hidden-file rules, one thread.
        let walker = WalkBuilder::new(&self.config.source_root)
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(move |entry| {
                if !prune.is_ignored(entry.path()) {
                    return true;
                }
                if entry.file_type().is_some_and(|t| t.is_dir()) {
                    log::info!("ignoring folder: {}", entry.path().display());
                } else {
                    log::info!("ignoring file: {}", entry.path().display());
                }
                ignored_count.fetch_add(1, Ordering::Relaxed);
                false
            })
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    let Some(file_type) = entry.file_type() else {
                        continue;
                    };
                    if file_type.is_dir() {
                        continue;
                    }
                    let path = entry.path();
                    if file_type.is_symlink() && path.is_dir() {
                        log::info!("skipping, source is a directory link: {}", path.display());
                        continue;
                    }
                    if !file_type.is_file() && !file_type.is_symlink() {
                        log::info!("skipping, not a regular file: {}", path.display());
                        continue;
                    }
                    let outcome = self.link_file(path, file_type.is_symlink());
                    report.record(&outcome);
                }
                Err(err) => {
                    log::warn!("Error walking entry: {}", err);
                    report.failed += 1;
                }
            }
        }

        report.ignored = ignored.load(Ordering::Relaxed);
        report
    }

    fn link_file(&self, source: &Path, source_is_link: bool) -> Outcome {
        if source_is_link && !self.config.follow_source_symlinks {
            log::warn!("skipping link, source is a link: {}", source.display());
            return Outcome::Skipped(SkipReason::SourceIsLink);
        }

        let target = match map_path(&self.config.source_root, &self.config.target_root, source) {
            Ok(target) => target,
            Err(err) => {
                log::warn!("skipping link, {}: {:#}", SkipReason::NotUnderRoot, err);
                return Outcome::Skipped(SkipReason::NotUnderRoot);
            }
        };

        self.resolve(&LinkTask {
            source_path: source.to_path_buf(),
            target_path: target,
        })
    }

    fn resolve(&self, task: &LinkTask) -> Outcome {
        let target = &task.target_path;
        let mut replaced = false;

        // symlink_metadata so a dangling link still counts as present.
        if target.symlink_metadata().is_ok() {
            if !self.config.replace_existing {
                log::info!("skipping link, target already exists: {}", target.display());
                return Outcome::Skipped(SkipReason::TargetExists);
            }
            if target.is_dir() {
                log::warn!("skipping link, target is a directory: {}", target.display());
                return Outcome::Skipped(SkipReason::TargetIsDirectory);
            }
            if let Err(err) = fs::remove_file(target) {
                log::warn!("unable to remove existing target {}: {}", target.display(), err);
                return Outcome::Skipped(SkipReason::RemoveFailed);
            }
            replaced = true;
        } else if let Some(parent) = target.parent() {
            if !parent.is_dir() {
                log::info!("creating directories for file: {}", target.display());
                if let Err(err) = create_dirs(parent) {
                    log::warn!("unable to create directory at: {}: {}", parent.display(), err);
                    return Outcome::Skipped(SkipReason::DirectoryCreation);
                }
            }
        }

        if let Err(err) = create_symlink(&task.source_path, target) {
            log::warn!("unable to link {}: {}", target.display(), err);
            return Outcome::Skipped(SkipReason::LinkFailed);
        }
        log::info!(
            "linking file: {} to {}",
            task.source_path.display(),
            target.display()
        );
        Outcome::Created { replaced }
    }
}

#[cfg(unix)]
fn create_dirs(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(path)
}

#[cfg(not(unix))]
fn create_dirs(path: &Path) -> io::Result<()> {
    fs::DirBuilder::new().recursive(true).create(path)
}

/// Create a symlink at `link` pointing to `original`.
#[cfg(unix)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(original, link)
}

#[cfg(windows)]
fn create_symlink(original: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(original, link)
}

#[cfg(not(any(unix, windows)))]
fn create_symlink(_original: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::from(io::ErrorKind::Unsupported))
}
