//! Canonical form of localization keys.
//!
//! Keys are written in code as plain text (`"Open file: %0"`) but stored in
//! `.properties` files in escaped form (`Open_file\:_%0`). Both sides of the
//! comparison are mapped into the escaped form before they are compared.

use serde::Serialize;

use super::error::ExtractionError;

/// A localization key in its raw and properties-file form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LocalizationKey {
    text: String,
    properties_key: String,
}

impl LocalizationKey {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let properties_key = escape_properties_key(&text);
        Self {
            text,
            properties_key,
        }
    }

    /// Key as read from a resource file, where surrounding whitespace is not part of the key.
    pub fn from_resource(text: &str) -> Self {
        Self::new(text.trim())
    }

    /// Key text as written at the call site.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Key as it must appear in a `.properties` file.
    pub fn properties_key(&self) -> &str {
        &self.properties_key
    }

    pub fn into_properties_key(self) -> String {
        self.properties_key
    }

    pub fn is_empty(&self) -> bool {
        self.properties_key.trim().is_empty()
    }

    /// Reject keys that could never round-trip through a resource file.
    ///
    /// `line` and `col` locate the call site for the error.
    pub fn validate(&self, line: usize, col: usize) -> Result<(), ExtractionError> {
        if self.properties_key.ends_with('_') {
            return Err(ExtractionError::TrailingSpace {
                key: self.text.clone(),
                line,
                col,
            });
        }
        if self.properties_key.contains("\\n") {
            return Err(ExtractionError::EmbeddedNewline {
                key: self.text.clone(),
                line,
                col,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for LocalizationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.properties_key)
    }
}

/// Space, `=` and `:` are separators in property keys.
fn escape_properties_key(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' ' => escaped.push('_'),
            '=' => escaped.push_str("\\="),
            ':' => escaped.push_str("\\:"),
            _ => escaped.push(c),
        }
    }
    escaped
}
