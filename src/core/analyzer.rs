//! Comparison of used keys against the base resource file.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use serde::Serialize;

use super::{
    entries::{EntrySet, LocalizationEntry},
    error::{ConfigurationError, PropertiesError},
    key::LocalizationKey,
    properties::parse_properties,
};

/// A key defined more than once in a base resource file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuplicateKey {
    pub key: String,
    /// Line of the ignored definition.
    pub line: usize,
    /// Line of the definition that was kept.
    pub first_line: usize,
}

/// Authoritative keys of one bundle, in properties-key form.
#[derive(Debug, Clone, Default)]
pub struct KeySet {
    file_path: String,
    keys: BTreeMap<String, usize>,
    duplicates: Vec<DuplicateKey>,
}

impl KeySet {
    /// Load from a base resource file.
    pub fn load(path: &Path) -> Result<Self, ConfigurationError> {
        let content =
            fs::read_to_string(path).map_err(|source| ConfigurationError::UnreadableBundle {
                path: PathBuf::from(path),
                source,
            })?;
        Self::parse(&path.to_string_lossy(), &content).map_err(|source| {
            ConfigurationError::MalformedBundle {
                path: PathBuf::from(path),
                source,
            }
        })
    }

    /// Parse resource file content. The first definition of a key wins.
    pub fn parse(file_path: &str, content: &str) -> Result<Self, PropertiesError> {
        let mut keys: BTreeMap<String, usize> = BTreeMap::new();
        let mut duplicates = Vec::new();

        for entry in parse_properties(content)? {
            let key = LocalizationKey::from_resource(&entry.key).into_properties_key();
            match keys.get(&key) {
                Some(&first_line) => duplicates.push(DuplicateKey {
                    key,
                    line: entry.line,
                    first_line,
                }),
                None => {
                    keys.insert(key, entry.line);
                }
            }
        }

        Ok(Self {
            file_path: file_path.to_string(),
            keys,
            duplicates,
        })
    }

    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    pub fn contains(&self, properties_key: &str) -> bool {
        self.keys.contains_key(properties_key)
    }

    /// Line where a key is defined.
    pub fn line_of(&self, properties_key: &str) -> Option<usize> {
        self.keys.get(properties_key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn duplicates(&self) -> &[DuplicateKey] {
        &self.duplicates
    }
}

/// Outcome of comparing one bundle's used keys with its base keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Used but not defined, sorted by key.
    pub missing_keys: Vec<LocalizationEntry>,
    /// Defined but not used, sorted by key.
    pub obsolete_keys: BTreeSet<String>,
}

impl ScanResult {
    pub fn is_clean(&self) -> bool {
        self.missing_keys.is_empty() && self.obsolete_keys.is_empty()
    }
}

/// Set differences between `entries` and `base_keys`.
pub fn analyze(entries: &EntrySet, base_keys: &KeySet) -> ScanResult {
    let missing_keys = entries
        .iter()
        .filter(|entry| !base_keys.contains(entry.properties_key()))
        .cloned()
        .collect();

    let used: BTreeSet<&str> = entries.iter().map(LocalizationEntry::properties_key).collect();
    let obsolete_keys = base_keys
        .iter()
        .filter(|key| !used.contains(key))
        .map(str::to_string)
        .collect();

    ScanResult {
        missing_keys,
        obsolete_keys,
    }
}
