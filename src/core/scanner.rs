//! Call-site scanner for source files.
//!
//! Finds `Localization.lang(...)` / `Localization.menuTitle(...)` calls and
//! recovers the literal key passed as their first argument. Matching is
//! lexical: a call pattern inside a comment or a string literal is reported
//! like any other call site.
//!
//! Extraction of one call runs in two passes over immutable text:
//!
//! 1. [`argument_list`] walks from the opening parenthesis to its matching
//!    closing parenthesis, tracking depth while skipping string and char
//!    literals and comments.
//! 2. [`first_argument_literal`] collects the text inside quotes until a
//!    comma outside quotes ends the first argument. Comments are skipped. Quoted segments joined
//!    by `+` are concatenated into one key.

use std::{iter::Peekable, str::CharIndices};

use serde::Serialize;

use super::{
    bundle::BundleKind, error::ExtractionError, key::LocalizationKey, source::LineIndex,
};

/// Longest call text quoted in an unbalanced-parentheses error.
const SNIPPET_MAX_CHARS: usize = 60;

/// A key found at a call site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyOccurrence {
    pub key: LocalizationKey,
    pub line: usize,
    pub col: usize,
    /// The source line containing the start of the call.
    pub source_line: String,
}

/// Extract every key passed to a call of `kind` in `content`.
///
/// Calls without a literal key (e.g. `Localization.lang(message)`) are
/// skipped. The first malformed call aborts the scan of this text.
pub fn scan_call_sites(
    content: &str,
    kind: BundleKind,
) -> Result<Vec<KeyOccurrence>, ExtractionError> {
    let index = LineIndex::new(content);
    let mut occurrences = Vec::new();

    for call in kind.call_pattern().find_iter(content) {
        let (line, col) = index.position(content, call.start());

        let Some(args) = argument_list(content, call.end()) else {
            return Err(ExtractionError::UnbalancedParentheses {
                line,
                col,
                snippet: snippet(&content[call.start()..]),
            });
        };

        let key = LocalizationKey::new(first_argument_literal(args));
        key.validate(line, col)?;

        if key.is_empty() {
            continue;
        }

        occurrences.push(KeyOccurrence {
            key,
            line,
            col,
            source_line: index.line_text(content, line).to_string(),
        });
    }

    Ok(occurrences)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lexeme {
    Code,
    StringLiteral,
    CharLiteral,
}

/// Text between the opening parenthesis ending at `start` and its matching
/// closing parenthesis, or `None` if the text ends first.
fn argument_list(content: &str, start: usize) -> Option<&str> {
    let rest = &content[start..];
    let mut depth = 1usize;
    let mut lexeme = Lexeme::Code;
    let mut chars = rest.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match lexeme {
            Lexeme::Code => match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(&rest[..i]);
                    }
                }
                '"' => lexeme = Lexeme::StringLiteral,
                '\'' => lexeme = Lexeme::CharLiteral,
                '/' => skip_comment(&mut chars),
                _ => {}
            },
            Lexeme::StringLiteral | Lexeme::CharLiteral => match c {
                '\\' => {
                    chars.next();
                }
                '"' if lexeme == Lexeme::StringLiteral => lexeme = Lexeme::Code,
                '\'' if lexeme == Lexeme::CharLiteral => lexeme = Lexeme::Code,
                _ => {}
            },
        }
    }

    None
}

/// Quoted text of the first argument.
///
/// `\"` inside quotes yields a literal quote; any other escape is kept as
/// written so the key can be checked for `\n`.
fn first_argument_literal(args: &str) -> String {
    let mut key = String::new();
    let mut in_quotes = false;
    let mut chars = args.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        match (in_quotes, c) {
            (true, '\\') => match chars.next() {
                Some((_, '"')) => key.push('"'),
                Some((_, escaped)) => {
                    key.push('\\');
                    key.push(escaped);
                }
                None => key.push('\\'),
            },
            (_, '"') => in_quotes = !in_quotes,
            (true, _) => key.push(c),
            (false, ',') => break,
            (false, '\'') => skip_char_literal(&mut chars),
            (false, '/') => skip_comment(&mut chars),
            (false, _) => {}
        }
    }

    key
}

fn skip_char_literal(chars: &mut Peekable<CharIndices<'_>>) {
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '\'' => return,
            _ => {}
        }
    }
}

/// Skip a `//` or `/* */` comment whose leading `/` was just consumed.
///
/// A lone `/` (division) consumes nothing.
fn skip_comment(chars: &mut Peekable<CharIndices<'_>>) {
    match chars.peek() {
        Some((_, '/')) => {
            for (_, c) in chars.by_ref() {
                if c == '\n' {
                    return;
                }
            }
        }
        Some((_, '*')) => {
            chars.next();
            let mut previous = '\0';
            for (_, c) in chars.by_ref() {
                if previous == '*' && c == '/' {
                    return;
                }
                previous = c;
            }
        }
        _ => {}
    }
}

fn snippet(call: &str) -> String {
    let first_line = call.lines().next().unwrap_or_default();
    if first_line.chars().count() > SNIPPET_MAX_CHARS {
        let cut: String = first_line.chars().take(SNIPPET_MAX_CHARS).collect();
        format!("{}...", cut)
    } else {
        first_line.to_string()
    }
}
