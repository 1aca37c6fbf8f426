use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Extension predicates that classify files of the tree.
#[derive(Debug, Clone, Copy)]
pub struct FileKinds<'a> {
    pub source_extensions: &'a [String],
    pub markup_extensions: &'a [String],
}

impl FileKinds<'_> {
    fn is_source_file(&self, path: &Path) -> bool {
        has_extension(path, self.source_extensions)
    }

    fn is_markup_file(&self, path: &Path) -> bool {
        has_extension(path, self.markup_extensions)
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|wanted| wanted == ext))
}

/// Files found under a tree, sorted by path.
#[derive(Debug, Default)]
pub struct FileScan {
    pub source_files: Vec<String>,
    pub markup_files: Vec<String>,
    /// Paths that could not be accessed while walking.
    pub skipped_count: usize,
}

/// Check if a pattern contains glob wildcards (* or ?).
/// Patterns without wildcards are treated as literal directory paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Enumerate source and markup files under `base_dir`.
///
/// `includes` narrows the walk to sub-directories (all of `base_dir` when
/// empty); `ignores` removes literal path prefixes or glob matches.
pub fn scan_files(
    base_dir: &Path,
    includes: &[String],
    ignore_patterns: &[String],
    kinds: FileKinds<'_>,
) -> FileScan {
    let mut source_files = BTreeSet::new();
    let mut markup_files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignore_paths: Vec<PathBuf> = Vec::new();
    let mut glob_patterns: Vec<Pattern> = Vec::new();

    for p in ignore_patterns {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => glob_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignore_paths.push(base_dir.join(p));
        }
    }

    let dirs_to_scan: Vec<PathBuf> = if includes.is_empty() {
        vec![base_dir.to_path_buf()]
    } else {
        let mut paths = Vec::new();
        for inc in includes {
            if is_glob_pattern(inc) {
                let full_pattern = base_dir.join(inc);
                match glob(&full_pattern.to_string_lossy()) {
                    Ok(entries) => paths.extend(entries.flatten().filter(|e| e.is_dir())),
                    Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
                }
            } else {
                let path = base_dir.join(inc);
                if path.exists() {
                    paths.push(path);
                } else {
                    warn!(path = %path.display(), "include path does not exist");
                }
            }
        }
        paths
    };

    for dir in dirs_to_scan {
        for entry in WalkDir::new(dir) {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    warn!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();
            let path_str = path.to_string_lossy();

            if literal_ignore_paths
                .iter()
                .any(|ignore_path| path.starts_with(ignore_path))
            {
                continue;
            }

            if glob_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }
            if kinds.is_source_file(path) {
                source_files.insert(path_str.into_owned());
            } else if kinds.is_markup_file(path) {
                markup_files.insert(path_str.into_owned());
            }
        }
    }

    debug!(
        sources = source_files.len(),
        markup = markup_files.len(),
        "file tree scanned"
    );

    FileScan {
        source_files: source_files.into_iter().collect(),
        markup_files: markup_files.into_iter().collect(),
        skipped_count,
    }
}
