//! The filesystem seam the tracker polls through.
//!
//! The tracker needs exactly three capabilities: an existence check, a size
//! query, and a random-offset read. Modeling them as a trait keeps the poll
//! loop testable against an in-memory fake instead of real disk I/O.

use async_trait::async_trait;
use std::io;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

/// Filesystem operations required to tail a file.
#[async_trait]
pub trait TailFs: Send + Sync {
    /// Whether the path currently exists.
    async fn exists(&self, path: &Path) -> bool;

    /// Current size of the file in bytes.
    async fn size(&self, path: &Path) -> io::Result<u64>;

    /// Read up to `length` bytes starting at `offset`. A short result means
    /// the file held fewer bytes past the offset than expected.
    async fn read_at(&self, path: &Path, offset: u64, length: u64) -> io::Result<Vec<u8>>;
}

/// The real filesystem, via tokio.
pub struct DiskFs;

#[async_trait]
impl TailFs for DiskFs {
    async fn exists(&self, path: &Path) -> bool {
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }

    async fn size(&self, path: &Path) -> io::Result<u64> {
        let metadata = tokio::fs::metadata(path).await?;
        Ok(metadata.len())
    }

    async fn read_at(&self, path: &Path, offset: u64, length: u64) -> io::Result<Vec<u8>> {
        let mut file = File::open(path).await?;
        file.seek(std::io::SeekFrom::Start(offset)).await?;

        let mut buffer = Vec::with_capacity(length as usize);
        file.take(length).read_to_end(&mut buffer).await?;
        Ok(buffer)
    }
}
