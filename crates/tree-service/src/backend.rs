use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use tree_store::Document;

/// Storage that owns the tree between requests
pub trait TreeBackend {
    /// Read the stored tree, the empty document if nothing was stored yet
    fn load(&mut self) -> Result<Document>;

    /// Replace the stored tree
    fn store(&mut self, document: &Document) -> Result<()>;
}

impl<B: TreeBackend + ?Sized> TreeBackend for Box<B> {
    fn load(&mut self) -> Result<Document> {
        (**self).load()
    }

    fn store(&mut self, document: &Document) -> Result<()> {
        (**self).store(document)
    }
}

/// Keeps the tree in memory only; it is lost when the process exits
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Document,
}

impl MemoryBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-seeded with a tree
    pub fn with_document(document: Document) -> Self {
        Self { document }
    }

    /// The last stored tree
    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl TreeBackend for MemoryBackend {
    fn load(&mut self) -> Result<Document> {
        Ok(self.document.clone())
    }

    fn store(&mut self, document: &Document) -> Result<()> {
        self.document = document.clone();
        Ok(())
    }
}

/// Persists the tree as a JSON document file
///
/// Writes go to a sibling temporary file which is then renamed over the
/// target, so a crash mid-write never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    /// Create a backend for the given file; the file need not exist yet
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// The backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TreeBackend for JsonFileBackend {
    fn load(&mut self) -> Result<Document> {
        if !self.path.exists() {
            info!("No state file at {}, starting empty", self.path.display());
            return Ok(Document::empty());
        }

        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read state file {}", self.path.display()))?;
        let document = Document::from_json_str(&text)
            .with_context(|| format!("Failed to decode state file {}", self.path.display()))?;

        debug!("Loaded tree from {}", self.path.display());
        Ok(document)
    }

    fn store(&mut self, document: &Document) -> Result<()> {
        let temp = self.temp_path();
        fs::write(&temp, document.to_json_pretty())
            .with_context(|| format!("Failed to write {}", temp.display()))?;
        fs::rename(&temp, &self.path)
            .with_context(|| format!("Failed to replace state file {}", self.path.display()))?;

        debug!("Stored tree to {}", self.path.display());
        Ok(())
    }
}
