use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::BundleKind;

pub const CONFIG_FILE_NAME: &str = ".l10nscanrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_source_root")]
    pub source_root: String,
    #[serde(default)]
    pub includes: Vec<String>,
    #[serde(default)]
    pub ignores: Vec<String>,
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
    #[serde(default = "default_markup_extensions")]
    pub markup_extensions: Vec<String>,
    #[serde(default = "default_lang_bundle")]
    pub lang_bundle: String,
    #[serde(default = "default_menu_bundle")]
    pub menu_bundle: String,
}

fn default_source_root() -> String {
    "src/main".to_string()
}

fn default_source_extensions() -> Vec<String> {
    vec!["java".to_string()]
}

fn default_markup_extensions() -> Vec<String> {
    vec!["fxml".to_string()]
}

fn default_lang_bundle() -> String {
    "src/main/resources/l10n/JabRef_en.properties".to_string()
}

fn default_menu_bundle() -> String {
    "src/main/resources/l10n/Menu_en.properties".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            includes: Vec::new(),
            ignores: Vec::new(),
            source_extensions: default_source_extensions(),
            markup_extensions: default_markup_extensions(),
            lang_bundle: default_lang_bundle(),
            menu_bundle: default_menu_bundle(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern in `ignores` or `includes` is
    /// invalid, or if no source extension is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Patterns without wildcards are literal directory paths
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.source_extensions.is_empty() {
            bail!("'sourceExtensions' must name at least one extension");
        }
        if self.markup_extensions.is_empty() {
            bail!("'markupExtensions' must name at least one extension");
        }

        Ok(())
    }

    /// Base resource file of a bundle, relative to the project root.
    pub fn bundle_path(&self, kind: BundleKind) -> &str {
        match kind {
            BundleKind::Lang => &self.lang_bundle,
            BundleKind::Menu => &self.menu_bundle,
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Search `start_dir` and its ancestors for a config file, stopping at the repository root.
pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory holding the config file; paths in the config are relative to it.
    pub base_dir: Option<PathBuf>,
}

impl ConfigLoadResult {
    pub fn from_file(&self) -> bool {
        self.base_dir.is_some()
    }
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                base_dir: path.parent().map(Path::to_path_buf),
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: None,
        }),
    }
}
