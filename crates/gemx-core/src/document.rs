//! Extracted document text.

/// One source file's plain text and its original file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    file_name: String,
    text: String,
}

impl Document {
    pub fn new(file_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            text: text.into(),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Full text, as produced by the document source.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Physical lines; `\r\n` endings are stripped like `\n`.
    pub fn lines(&self) -> Vec<&str> {
        self.text.lines().collect()
    }
}
