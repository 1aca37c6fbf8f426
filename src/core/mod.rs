//! Core analysis engine.
//!
//! ## Pipeline
//!
//! 1. `files`: enumerate source and markup files of the tree
//! 2. `scanner` / `markup`: extract keys per file (parallel, independent)
//! 3. `builder`: merge per-file results into one [`EntrySet`] per bundle
//! 4. `analyzer`: diff the entry set against the base resource file
//!
//! `context` wires the phases together for a configured project.

pub mod analyzer;
pub mod builder;
pub mod bundle;
pub mod context;
pub mod entries;
pub mod error;
pub mod files;
pub mod key;
pub mod markup;
pub mod properties;
pub mod scanner;
pub mod source;

pub use analyzer::{DuplicateKey, KeySet, ScanResult, analyze};
pub use builder::{BuildOutcome, build_entry_set, source_entries};
pub use bundle::BundleKind;
pub use context::{BundleReport, CheckContext, CheckOptions};
pub use entries::{EntrySet, LocalizationEntry};
pub use error::{
    ConfigurationError, ExtractionError, FileExtractionError, MarkupError, PropertiesError,
    SkipReason, SkippedFile,
};
pub use files::{FileKinds, FileScan, scan_files};
pub use key::LocalizationKey;
pub use markup::{
    FxmlEvaluator, KeyResolver, MarkupEvaluator, RecordingResolver, collect_markup_keys,
};
pub use scanner::{KeyOccurrence, scan_call_sites};
pub use source::SourceLocation;
