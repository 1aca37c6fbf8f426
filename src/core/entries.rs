use std::{cmp::Ordering, collections::BTreeMap};

use serde::Serialize;

use super::{bundle::BundleKind, key::LocalizationKey, source::SourceLocation};

/// A key referenced from code or markup.
///
/// Identity is `(bundle, properties key)`; the location only tells a
/// developer where to look.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizationEntry {
    pub location: SourceLocation,
    pub key: LocalizationKey,
    pub bundle: BundleKind,
    /// The source line of the call, when the entry comes from a call site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
}

impl LocalizationEntry {
    pub fn new(location: SourceLocation, key: LocalizationKey, bundle: BundleKind) -> Self {
        Self {
            location,
            key,
            bundle,
            source_line: None,
        }
    }

    pub fn with_source_line(mut self, source_line: impl Into<String>) -> Self {
        self.source_line = Some(source_line.into());
        self
    }

    pub fn properties_key(&self) -> &str {
        self.key.properties_key()
    }
}

impl PartialEq for LocalizationEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for LocalizationEntry {}

impl PartialOrd for LocalizationEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for LocalizationEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.properties_key()
            .cmp(other.properties_key())
            .then_with(|| self.bundle.cmp(&other.bundle))
    }
}

impl std::hash::Hash for LocalizationEntry {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.properties_key().hash(state);
        self.bundle.hash(state);
    }
}

/// Entries deduplicated by identity, sorted by key.
///
/// The first inserted entry for a key is its representative; locations of
/// later duplicates are kept as further usages.
#[derive(Debug, Clone, Default)]
pub struct EntrySet {
    entries: BTreeMap<LocalizationEntry, Vec<SourceLocation>>,
}

impl EntrySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entry: LocalizationEntry) {
        match self.entries.get_mut(&entry) {
            Some(usages) => usages.push(entry.location),
            None => {
                self.entries.insert(entry, Vec::new());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Representative entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = &LocalizationEntry> {
        self.entries.keys()
    }

    /// Locations of an entry other than its representative one.
    pub fn other_usages(&self, entry: &LocalizationEntry) -> &[SourceLocation] {
        self.entries.get(entry).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Extend<LocalizationEntry> for EntrySet {
    fn extend<T: IntoIterator<Item = LocalizationEntry>>(&mut self, iter: T) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl FromIterator<LocalizationEntry> for EntrySet {
    fn from_iter<T: IntoIterator<Item = LocalizationEntry>>(iter: T) -> Self {
        let mut set = EntrySet::new();
        set.extend(iter);
        set
    }
}
