//! Run context shared by every bundle check.
//!
//! Resolves configuration (CLI > config file > defaults), enumerates the
//! file tree once, and runs the per-bundle pipeline:
//! base keys + entry set → [`analyze`].

use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::{debug, info};

use super::{
    analyzer::{KeySet, ScanResult, analyze},
    builder::{BuildOutcome, build_entry_set},
    bundle::BundleKind,
    error::ConfigurationError,
    files::{FileKinds, FileScan, scan_files},
    markup::MarkupEvaluator,
};
use crate::config::{Config, load_config};

/// Values given on the command line; `None` falls back to the config file.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub root: PathBuf,
    pub source_root: Option<PathBuf>,
    pub lang_bundle: Option<PathBuf>,
    pub menu_bundle: Option<PathBuf>,
}

impl CheckOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }
}

/// Everything known about one bundle after a check.
#[derive(Debug)]
pub struct BundleReport {
    pub kind: BundleKind,
    pub key_set: KeySet,
    pub build: BuildOutcome,
    pub result: ScanResult,
}

pub struct CheckContext {
    pub config: Config,
    /// Directory that relative config paths are resolved against.
    pub project_root: PathBuf,
    pub files: FileScan,
    /// True if a config file was found.
    pub config_from_file: bool,
}

impl CheckContext {
    pub fn new(options: &CheckOptions) -> Result<Self> {
        let loaded = load_config(&options.root)?;
        let config_from_file = loaded.from_file();
        let mut config = loaded.config;

        let project_root = loaded
            .base_dir
            .clone()
            .unwrap_or_else(|| options.root.clone());

        if let Some(source_root) = &options.source_root {
            config.source_root = source_root.to_string_lossy().into_owned();
        }
        if let Some(lang_bundle) = &options.lang_bundle {
            config.lang_bundle = lang_bundle.to_string_lossy().into_owned();
        }
        if let Some(menu_bundle) = &options.menu_bundle {
            config.menu_bundle = menu_bundle.to_string_lossy().into_owned();
        }

        let source_root = resolve(&project_root, &config.source_root);
        if !source_root.is_dir() {
            return Err(ConfigurationError::MissingSourceRoot { path: source_root }.into());
        }

        let files = scan_files(
            &source_root,
            &config.includes,
            &config.ignores,
            FileKinds {
                source_extensions: &config.source_extensions,
                markup_extensions: &config.markup_extensions,
            },
        );

        info!(
            root = %source_root.display(),
            sources = files.source_files.len(),
            markup = files.markup_files.len(),
            "scanning file tree"
        );

        Ok(Self {
            config,
            project_root,
            files,
            config_from_file,
        })
    }

    pub fn bundle_path(&self, kind: BundleKind) -> PathBuf {
        resolve(&self.project_root, self.config.bundle_path(kind))
    }

    /// Compare the keys used in the tree with the base resource file of `kind`.
    pub fn check_bundle(
        &self,
        kind: BundleKind,
        evaluator: &dyn MarkupEvaluator,
    ) -> Result<BundleReport, ConfigurationError> {
        let bundle_path = self.bundle_path(kind);
        let (key_set, build) = rayon::join(
            || KeySet::load(&bundle_path),
            || build_entry_set(&self.files, kind, evaluator),
        );
        let key_set = key_set?;

        for duplicate in key_set.duplicates() {
            debug!(
                key = %duplicate.key,
                line = duplicate.line,
                first_line = duplicate.first_line,
                "duplicate key in {}",
                key_set.file_path()
            );
        }

        let result = analyze(&build.entries, &key_set);
        Ok(BundleReport {
            kind,
            key_set,
            build,
            result,
        })
    }

    pub fn markup_files_checked(&self, kinds: &[BundleKind]) -> usize {
        if kinds.iter().any(|k| k.reads_markup()) {
            self.files.markup_files.len()
        } else {
            0
        }
    }
}

/// Join a configured path onto `base` unless it is absolute.
fn resolve(base: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path.strip_prefix(".").unwrap_or(path))
    }
}
