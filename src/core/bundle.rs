use std::sync::LazyLock;

use clap::ValueEnum;
use regex::Regex;
use serde::Serialize;

static LANG_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Localization\s*\.\s*lang\s*\(").unwrap());

static MENU_CALL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Localization\s*\.\s*menuTitle\s*\(").unwrap());

/// Key namespace a call site belongs to.
///
/// Each kind has its own base resource file; keys of different kinds are
/// never compared with each other.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum BundleKind {
    /// Messages requested through `Localization.lang(...)`.
    Lang,
    /// Menu titles requested through `Localization.menuTitle(...)`.
    Menu,
}

impl BundleKind {
    pub fn all() -> Vec<BundleKind> {
        vec![BundleKind::Lang, BundleKind::Menu]
    }

    /// Pattern matching the call up to and including its opening parenthesis.
    pub fn call_pattern(self) -> &'static Regex {
        match self {
            BundleKind::Lang => &LANG_CALL_REGEX,
            BundleKind::Menu => &MENU_CALL_REGEX,
        }
    }

    /// Only the message bundle is referenced from markup documents.
    pub fn reads_markup(self) -> bool {
        matches!(self, BundleKind::Lang)
    }
}

impl std::fmt::Display for BundleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BundleKind::Lang => write!(f, "lang"),
            BundleKind::Menu => write!(f, "menu"),
        }
    }
}
