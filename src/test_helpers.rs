//! Test utilities: an in-memory filesystem fake and temporary file helpers.

use crate::fs::TailFs;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// An in-memory `TailFs` so tracker behavior can be tested cycle by cycle
/// without real disk I/O or timing.
pub struct MemoryFs {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
    size_queries: AtomicUsize,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self {
            files: Mutex::new(HashMap::new()),
            size_queries: AtomicUsize::new(0),
        }
    }

    /// Create an empty file.
    pub fn create(&self, path: &str) {
        self.files
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), Vec::new());
    }

    /// Append bytes to an existing file.
    pub fn append(&self, path: &str, bytes: &[u8]) {
        let mut files = self.files.lock().unwrap();
        files
            .get_mut(Path::new(path))
            .expect("append to missing file")
            .extend_from_slice(bytes);
    }

    /// Delete a file, simulating mid-session disappearance.
    pub fn remove(&self, path: &str) {
        self.files.lock().unwrap().remove(Path::new(path));
    }

    /// Number of size queries served so far; a proxy for completed polls.
    pub fn size_queries(&self) -> usize {
        self.size_queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TailFs for MemoryFs {
    async fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    async fn size(&self, path: &Path) -> io::Result<u64> {
        self.size_queries.fetch_add(1, Ordering::SeqCst);
        self.files
            .lock()
            .unwrap()
            .get(path)
            .map(|bytes| bytes.len() as u64)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))
    }

    async fn read_at(&self, path: &Path, offset: u64, length: u64) -> io::Result<Vec<u8>> {
        let files = self.files.lock().unwrap();
        let bytes = files
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;

        let start = (offset as usize).min(bytes.len());
        let end = (start + length as usize).min(bytes.len());
        Ok(bytes[start..end].to_vec())
    }
}

/// A tempfile-backed log file for tests against the real filesystem.
pub struct TempLogFile {
    path: PathBuf,
    _temp_dir: tempfile::TempDir,
}

impl TempLogFile {
    /// Create a new empty temporary log file
    pub fn new() -> io::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("test.log");

        File::create(&path)?;

        Ok(Self {
            path,
            _temp_dir: temp_dir,
        })
    }

    /// Create a temporary log file with an initial line of content
    pub fn with_content(content: &str) -> io::Result<Self> {
        let temp_file = Self::new()?;
        temp_file.append_content(content)?;
        Ok(temp_file)
    }

    /// Append a line (newline-terminated) to the file
    pub fn append_content(&self, content: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(file, "{}", content)?;
        file.flush()?;
        Ok(())
    }

    /// Append raw bytes, no newline added
    pub fn append_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        file.write_all(bytes)?;
        file.flush()?;
        Ok(())
    }

    /// Delete the file while keeping the directory alive
    pub fn remove(&self) -> io::Result<()> {
        std::fs::remove_file(&self.path)
    }

    /// Get the path to the temporary file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_fs_roundtrip() {
        let fs = MemoryFs::new();
        fs.create("a.log");
        fs.append("a.log", b"hello");

        assert!(fs.exists(Path::new("a.log")).await);
        assert_eq!(fs.size(Path::new("a.log")).await.unwrap(), 5);
        assert_eq!(fs.read_at(Path::new("a.log"), 1, 3).await.unwrap(), b"ell");
    }

    #[tokio::test]
    async fn test_memory_fs_read_clamps_to_size() {
        let fs = MemoryFs::new();
        fs.create("a.log");
        fs.append("a.log", b"abc");

        assert_eq!(fs.read_at(Path::new("a.log"), 2, 50).await.unwrap(), b"c");
        assert_eq!(
            fs.read_at(Path::new("a.log"), 10, 5).await.unwrap(),
            Vec::<u8>::new()
        );
    }

    #[tokio::test]
    async fn test_memory_fs_remove() {
        let fs = MemoryFs::new();
        fs.create("a.log");
        fs.remove("a.log");

        assert!(!fs.exists(Path::new("a.log")).await);
        assert!(fs.size(Path::new("a.log")).await.is_err());
    }

    #[tokio::test]
    async fn test_temp_log_file_creation() {
        let temp_file = TempLogFile::new().unwrap();
        assert!(temp_file.path().exists());
    }

    #[tokio::test]
    async fn test_temp_log_file_append() {
        let temp_file = TempLogFile::new().unwrap();
        temp_file.append_content("line 1").unwrap();
        temp_file.append_bytes(b"raw").unwrap();

        let content = std::fs::read(temp_file.path()).unwrap();
        assert_eq!(content, b"line 1\nraw");
    }

    #[tokio::test]
    async fn test_temp_log_file_remove() {
        let temp_file = TempLogFile::with_content("soon gone").unwrap();
        temp_file.remove().unwrap();
        assert!(!temp_file.path().exists());
    }
}
