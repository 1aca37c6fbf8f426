//! l10nscan - localization key consistency checker
//!
//! l10nscan finds the localization keys a Java/FXML code base requests
//! through `Localization.lang(...)`, `Localization.menuTitle(...)` and `%key`
//! markup references, then compares them with the base `.properties`
//! resource files. Keys used but not defined are reported as missing, keys
//! defined but never used as obsolete.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (argument parsing, commands, reporting)
//! - `config`: Configuration file loading and parsing
//! - `core`: Extraction and analysis engine
//! - `issues`: Issue type definitions for reporting

pub mod cli;
pub mod config;
pub mod core;
pub mod issues;
