use serde::Serialize;

/// Pure position information in a scanned file (source or markup).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceLocation {
    pub file_path: String,
    pub line: usize,
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }

    /// Location of a whole file, used where no call site exists (markup documents).
    pub fn file(file_path: impl Into<String>) -> Self {
        Self::new(file_path, 1, 1)
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
    }
}

/// Byte offsets where each line of a text starts.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
#[derive(Debug, Clone)]
pub struct LineIndex {
    offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut offsets = vec![0];
        for (i, c) in content.char_indices() {
            if c == '\n' {
                offsets.push(i + 1);
            }
        }
        Self { offsets }
    }

    /// 1-based line and column for a byte offset.
    ///
    /// The column counts characters, not bytes.
    pub fn position(&self, content: &str, offset: usize) -> (usize, usize) {
        let line = match self.offsets.binary_search(&offset) {
            Ok(line) => line + 1,
            Err(line) => line,
        };
        let line_start = self.offsets[line - 1];
        let col = content[line_start..offset].chars().count() + 1;
        (line, col)
    }

    /// Text of a 1-based line without its line terminator.
    pub fn line_text<'a>(&self, content: &'a str, line: usize) -> &'a str {
        let Some(&start) = self.offsets.get(line.saturating_sub(1)) else {
            return "";
        };
        let end = self.offsets.get(line).map_or(content.len(), |next| next - 1);
        content[start..end].trim_end_matches('\r')
    }
}
