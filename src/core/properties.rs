//! Reader for `.properties` key/value files.
//!
//! Follows the usual line-oriented format:
//! - `#` or `!` as the first non-blank character starts a comment line
//! - a line ending in an odd number of backslashes continues on the next line
//! - the key ends at the first unescaped `=`, `:` or whitespace
//! - `\t`, `\n`, `\r`, `\f` and `\uXXXX` are decoded; any other `\x` yields `x`

use super::error::PropertiesError;

/// One `key=value` pair and the line it starts on (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyEntry {
    pub key: String,
    pub value: String,
    pub line: usize,
}

/// Parse all entries in file order. Duplicate keys are returned as they appear.
pub fn parse_properties(content: &str) -> Result<Vec<PropertyEntry>, PropertiesError> {
    let mut entries = Vec::new();
    let mut lines = content.lines().enumerate();

    while let Some((index, raw)) = lines.next() {
        let line = index + 1;
        let trimmed = raw.trim_start_matches(is_blank);
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        let mut logical = String::from(trimmed);
        while ends_with_continuation(&logical) {
            logical.pop();
            match lines.next() {
                Some((_, next)) => logical.push_str(next.trim_start_matches(is_blank)),
                None => break,
            }
        }

        let (raw_key, raw_value) = split_key_value(&logical);
        entries.push(PropertyEntry {
            key: unescape(raw_key, line)?,
            value: unescape(raw_value, line)?,
            line,
        });
    }

    Ok(entries)
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{c}')
}

fn ends_with_continuation(line: &str) -> bool {
    let backslashes = line.chars().rev().take_while(|&c| c == '\\').count();
    backslashes % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                return (&line[..i], line[i + 1..].trim_start_matches(is_blank));
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches(is_blank);
    let value = rest
        .strip_prefix(['=', ':'])
        .map_or(rest, |v| v.trim_start_matches(is_blank));
    (key, value)
}

fn unescape(text: &str, line: usize) -> Result<String, PropertiesError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\u{c}'),
            Some('u') => {
                let malformed = PropertiesError::MalformedUnicodeEscape { line };
                let unit = hex_unit(&mut chars).ok_or(malformed.clone())?;
                let mut units = vec![unit];
                // A supplementary character is written as two escaped UTF-16 halves.
                if (0xD800..=0xDBFF).contains(&unit) {
                    if chars.next() != Some('\\') || chars.next() != Some('u') {
                        return Err(malformed);
                    }
                    units.push(hex_unit(&mut chars).ok_or(malformed.clone())?);
                }
                for decoded in char::decode_utf16(units) {
                    out.push(decoded.map_err(|_| malformed.clone())?);
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

/// Four hex digits of a `\u` escape as one UTF-16 code unit.
fn hex_unit(chars: &mut std::str::Chars<'_>) -> Option<u16> {
    let hex: String = chars.by_ref().take(4).collect();
    if hex.len() != 4 {
        return None;
    }
    u16::from_str_radix(&hex, 16).ok()
}
