//! Directory walk and in-place `.tmpl` -> `.html` renames

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::RenameError;
use crate::{HTML_SUFFIX, TMPL_SUFFIX};

/// Map a file name to its renamed form
///
/// Returns `None` when the name does not end with `.tmpl`. A file named
/// exactly `.tmpl` maps to `.html`.
pub fn target_name(name: &str) -> Option<String> {
    name.strip_suffix(TMPL_SUFFIX)
        .map(|stem| format!("{}{}", stem, HTML_SUFFIX))
}

/// Map a raw file name to its renamed form
///
/// On unix the suffix is matched on bytes, so names that are not UTF-8 are
/// still renamed when they end with `.tmpl`.
#[cfg(unix)]
pub fn target_file_name(name: &OsStr) -> Option<OsString> {
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let stem = name.as_bytes().strip_suffix(TMPL_SUFFIX.as_bytes())?;
    let mut renamed = Vec::with_capacity(stem.len() + HTML_SUFFIX.len());
    renamed.extend_from_slice(stem);
    renamed.extend_from_slice(HTML_SUFFIX.as_bytes());
    Some(OsString::from_vec(renamed))
}

/// Map a raw file name to its renamed form
///
/// Names that are not valid unicode never match.
#[cfg(not(unix))]
pub fn target_file_name(name: &OsStr) -> Option<OsString> {
    name.to_str().and_then(target_name).map(OsString::from)
}

/// What to do when the target `.html` path already exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// Let the rename replace the existing file
    #[default]
    Overwrite,
    /// Leave both files in place and move on
    Skip,
    /// Fail with [`RenameError::TargetExists`]
    Error,
}

impl fmt::Display for ConflictPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Overwrite => "overwrite",
            Self::Skip => "skip",
            Self::Error => "error",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for ConflictPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "skip" => Ok(Self::Skip),
            "error" | "fail" => Ok(Self::Error),
            _ => Err(format!("Unknown conflict policy: {}. Use: overwrite, skip, or error", s)),
        }
    }
}

/// Switches controlling a single run
#[derive(Debug, Clone, Default)]
pub struct RenameOptions {
    /// Collision handling when the target exists
    pub on_conflict: ConflictPolicy,
    /// Log and record errors instead of aborting on the first one
    pub keep_going: bool,
    /// Follow symbolic links while walking
    pub follow_links: bool,
    /// Report what would be renamed without touching the filesystem
    pub dry_run: bool,
}

/// A single rename within one directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rename {
    pub from: PathBuf,
    pub to: PathBuf,
}

impl fmt::Display for Rename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from.display(), self.to.display())
    }
}

/// Outcome of a run
#[derive(Debug, Default)]
pub struct RenameReport {
    /// Renames applied (or, on a dry run, the ones that would be)
    pub renamed: Vec<Rename>,
    /// Renames left alone because the target existed
    pub skipped: Vec<Rename>,
    /// Errors recorded while `keep_going` was set
    pub failures: Vec<RenameError>,
}

impl RenameReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

enum Applied {
    Renamed,
    Skipped,
}

/// Renames every `.tmpl` file under a root directory
pub struct Renamer {
    root: PathBuf,
    options: RenameOptions,
}

impl Renamer {
    /// Create a renamer rooted at `root`
    ///
    /// Fails with [`RenameError::NotADirectory`] when the root is missing or
    /// is not a directory. Nothing on disk is touched.
    pub fn new(root: impl AsRef<Path>, options: RenameOptions) -> Result<Self, RenameError> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(RenameError::NotADirectory { path: root });
        }
        debug!("Renamer rooted at {} ({:?})", root.display(), options);
        Ok(Self { root, options })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect every candidate rename without modifying anything
    ///
    /// Walk errors abort unless `keep_going` is set, in which case they are
    /// logged and dropped.
    pub fn plan(&self) -> Result<Vec<Rename>, RenameError> {
        let mut failures = Vec::new();
        self.walk(&mut failures)
    }

    /// Plan, then apply each rename, writing one report line per rename to `out`
    pub fn run<W: Write>(&self, out: &mut W) -> Result<RenameReport, RenameError> {
        let mut report = RenameReport::default();
        let plan = self.walk(&mut report.failures)?;
        info!("Found {} template(s) under {}", plan.len(), self.root.display());

        let verb = if self.options.dry_run { "Would rename" } else { "Renamed" };

        for rename in plan {
            match self.apply(&rename) {
                Ok(Applied::Renamed) => {
                    writeln!(out, "{}: {}", verb, rename).map_err(RenameError::Output)?;
                    report.renamed.push(rename);
                }
                Ok(Applied::Skipped) => report.skipped.push(rename),
                Err(e) if self.options.keep_going => {
                    warn!("{}", e);
                    report.failures.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Run complete: {} renamed, {} skipped, {} failed",
            report.renamed.len(),
            report.skipped.len(),
            report.failures.len()
        );
        Ok(report)
    }

    fn walk(&self, failures: &mut Vec<RenameError>) -> Result<Vec<Rename>, RenameError> {
        let walker = WalkDir::new(&self.root)
            .follow_links(self.options.follow_links)
            .sort_by_file_name();

        let mut plan = Vec::new();
        let mut seen = HashSet::new();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if self.options.keep_going => {
                    let e = RenameError::from(e);
                    warn!("{}", e);
                    failures.push(e);
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            // Symlinks report as symlinks unless followed; only regular files qualify
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(new_name) = target_file_name(entry.file_name()) else {
                continue;
            };

            // A followed link can reach the same directory twice
            if self.options.follow_links && !seen.insert(canonical_entry(entry.path())) {
                debug!("Already planned via another path: {}", entry.path().display());
                continue;
            }

            let from = entry.path().to_path_buf();
            let to = from.with_file_name(new_name);
            debug!("Planned {} -> {}", from.display(), to.display());
            plan.push(Rename { from, to });
        }

        Ok(plan)
    }

    fn apply(&self, rename: &Rename) -> Result<Applied, RenameError> {
        // symlink_metadata so a dangling link still counts as occupying the name
        if fs::symlink_metadata(&rename.to).is_ok() {
            match self.options.on_conflict {
                ConflictPolicy::Overwrite => {
                    debug!("Overwriting existing {}", rename.to.display());
                }
                ConflictPolicy::Skip => {
                    warn!("Skipping {}: target already exists", rename);
                    return Ok(Applied::Skipped);
                }
                ConflictPolicy::Error => {
                    return Err(RenameError::TargetExists {
                        from: rename.from.clone(),
                        to: rename.to.clone(),
                    });
                }
            }
        }

        if self.options.dry_run {
            return Ok(Applied::Renamed);
        }

        fs::rename(&rename.from, &rename.to).map_err(|source| RenameError::Rename {
            from: rename.from.clone(),
            to: rename.to.clone(),
            source,
        })?;

        Ok(Applied::Renamed)
    }
}

/// Identify a directory entry by its canonical parent and its own name
///
/// The entry itself is not canonicalized, so two links to one file stay distinct.
fn canonical_entry(path: &Path) -> PathBuf {
    match (path.parent().map(fs::canonicalize), path.file_name()) {
        (Some(Ok(parent)), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}
