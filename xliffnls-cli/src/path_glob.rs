use std::path::{Path, PathBuf};

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

/// Include/exclude glob patterns, matched against paths relative to a root directory.
#[derive(Debug, Clone, Default)]
pub struct FileSelector {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl FileSelector {
    pub fn new<S: Into<String>>(include: impl IntoIterator<Item = S>) -> Self {
        Self {
            include: include.into_iter().map(Into::into).collect(),
            exclude: Vec::new(),
        }
    }

    pub fn excluding<S: Into<String>>(mut self, exclude: impl IntoIterator<Item = S>) -> Self {
        self.exclude.extend(exclude.into_iter().map(Into::into));
        self
    }

    /// Walk `root` and return every file matching an include pattern and no exclude pattern,
    /// sorted by path. A missing root yields no files.
    ///
    /// Ignore files and hidden-file rules are not applied: a file is selected by the patterns
    /// alone. Entries the walk cannot read are returned in [`Selection::unreadable`].
    pub fn collect(&self, root: &Path) -> Result<Selection, String> {
        let include = build_set(&self.include)?;
        let exclude = build_set(&self.exclude)?;

        let mut selection = Selection::default();
        if !root.is_dir() {
            return Ok(selection);
        }

        let walker = WalkBuilder::new(root).standard_filters(false).build();

        for dent in walker {
            let dent = match dent {
                Ok(d) => d,
                Err(error) => {
                    let path = error_path(&error).unwrap_or(root).to_path_buf();
                    selection.unreadable.push(WalkFailure { path, error });
                    continue;
                }
            };
            if !dent.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }
            let Ok(relative) = dent.path().strip_prefix(root) else {
                continue;
            };
            // Patterns are written with '/' separators on every platform
            let relative = relative.to_string_lossy().replace('\\', "/");
            if include.is_match(&relative) && !exclude.is_match(&relative) {
                selection.files.push(dent.path().to_path_buf());
            }
        }
        selection.files.sort();
        Ok(selection)
    }
}

/// Files selected below a root.
#[derive(Debug, Default)]
pub struct Selection {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<WalkFailure>,
}

/// A directory entry the walk could not read.
#[derive(Debug)]
pub struct WalkFailure {
    pub path: PathBuf,
    pub error: ignore::Error,
}

fn error_path(error: &ignore::Error) -> Option<&Path> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}

// literal_separator so that '*' does not cross directories
fn build_set(patterns: &[String]) -> Result<GlobSet, String> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob: Glob = GlobBuilder::new(pat)
            .literal_separator(true)
            .build()
            .map_err(|e| format!("Invalid glob pattern '{}': {}", pat, e))?;
        builder.add(glob);
    }
    builder
        .build()
        .map_err(|e| format!("Failed to build glob set: {}", e))
}
