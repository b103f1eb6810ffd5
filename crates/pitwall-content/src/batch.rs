//! Commit batches.

/// Content of one staged file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    /// UTF-8 text, committed inline in the tree request.
    Text(String),
    /// Opaque bytes, committed via a blob.
    Binary(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Text(s) => s.as_bytes(),
            Self::Binary(b) => b,
        }
    }
}

/// One staged file: repository path plus content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub path: String,
    pub content: FileContent,
}

/// An ephemeral set of changed files, submitted as one atomic commit and
/// then discarded. Batches accumulate only files whose content differs from
/// the repository, so an empty batch means "nothing to publish".
#[derive(Debug, Clone, Default)]
pub struct CommitBatch {
    files: Vec<StagedFile>,
}

impl CommitBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage a text file.
    pub fn add_text(&mut self, path: impl Into<String>, content: impl Into<String>) {
        self.files.push(StagedFile {
            path: path.into(),
            content: FileContent::Text(content.into()),
        });
    }

    /// Stage a binary file.
    pub fn add_binary(&mut self, path: impl Into<String>, content: Vec<u8>) {
        self.files.push(StagedFile {
            path: path.into(),
            content: FileContent::Binary(content),
        });
    }

    /// Merge another batch's files into this one.
    pub fn extend(&mut self, other: CommitBatch) {
        self.files.extend(other.files);
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Staged paths, in insertion order.
    pub fn paths(&self) -> Vec<&str> {
        self.files.iter().map(|f| f.path.as_str()).collect()
    }

    pub(crate) fn into_files(self) -> Vec<StagedFile> {
        self.files
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_accumulates_in_order() {
        let mut batch = CommitBatch::new();
        assert!(batch.is_empty());

        batch.add_text("a/index.md", "hello");
        batch.add_binary("a/featured.jpg", vec![0xff, 0xd8]);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch.paths(), vec!["a/index.md", "a/featured.jpg"]);
    }

    #[test]
    fn test_extend_unions_files() {
        let mut first = CommitBatch::new();
        first.add_text("a/index.md", "a");
        let mut second = CommitBatch::new();
        second.add_text("b/index.md", "b");

        first.extend(second);
        assert_eq!(first.paths(), vec!["a/index.md", "b/index.md"]);
    }
}
