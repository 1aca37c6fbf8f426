//! Key collection from markup (FXML) documents.
//!
//! Markup references keys through resource lookups that are resolved while
//! the document is evaluated. Instead of resolving against real bundles, the
//! evaluator is given a [`RecordingResolver`] that remembers every requested
//! key and answers with a placeholder, so evaluation always runs to the end.

use roxmltree::{Document, Node};

use super::{error::MarkupError, key::LocalizationKey};

/// Value handed back for every recorded lookup.
pub const PLACEHOLDER_VALUE: &str = "test";

/// Resolves resource keys for a markup evaluator.
pub trait KeyResolver {
    fn resolve(&mut self, key: &str) -> String;
}

/// Resolver that records every key it is asked for.
#[derive(Debug, Default)]
pub struct RecordingResolver {
    keys: Vec<String>,
}

impl RecordingResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_keys(self) -> Vec<String> {
        self.keys
    }
}

impl KeyResolver for RecordingResolver {
    fn resolve(&mut self, key: &str) -> String {
        self.keys.push(key.to_string());
        PLACEHOLDER_VALUE.to_string()
    }
}

/// Evaluates a markup document, resolving its resource references through `resolver`.
pub trait MarkupEvaluator: Sync {
    fn evaluate(&self, source: &str, resolver: &mut dyn KeyResolver) -> Result<(), MarkupError>;
}

/// FXML evaluation limited to resource resolution.
///
/// Attribute values and property-element text of the form `%key` are
/// resource lookups; a leading `\` escapes the prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct FxmlEvaluator;

const RESOURCE_KEY_PREFIX: char = '%';
const ESCAPE_PREFIX: char = '\\';

impl MarkupEvaluator for FxmlEvaluator {
    fn evaluate(&self, source: &str, resolver: &mut dyn KeyResolver) -> Result<(), MarkupError> {
        let document = Document::parse(source).map_err(|e| MarkupError::new(e.to_string()))?;

        for node in document.descendants().filter(|n| n.is_element()) {
            for attribute in node.attributes() {
                resolve_value(attribute.value(), resolver);
            }
            if let Some(text) = property_element_text(node) {
                resolve_value(text, resolver);
            }
        }

        Ok(())
    }
}

fn resolve_value(value: &str, resolver: &mut dyn KeyResolver) {
    if value.starts_with(ESCAPE_PREFIX) {
        return;
    }
    if let Some(key) = value.strip_prefix(RESOURCE_KEY_PREFIX) {
        resolver.resolve(key);
    }
}

/// Text of a property element such as `<text>%Save</text>`.
///
/// Property elements are named in lower camel case and contain only text.
fn property_element_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    let starts_lowercase = node
        .tag_name()
        .name()
        .chars()
        .next()
        .is_some_and(char::is_lowercase);
    if !starts_lowercase || node.children().any(|c| c.is_element()) {
        return None;
    }
    node.text().map(str::trim)
}

/// Keys referenced by one markup document, normalized and without empties.
pub fn collect_markup_keys(
    source: &str,
    evaluator: &dyn MarkupEvaluator,
) -> Result<Vec<LocalizationKey>, MarkupError> {
    let mut resolver = RecordingResolver::new();
    evaluator.evaluate(source, &mut resolver)?;

    Ok(resolver
        .into_keys()
        .into_iter()
        .map(LocalizationKey::new)
        .filter(|key| !key.is_empty())
        .collect())
}
