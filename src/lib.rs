//! A tail library that streams newly appended bytes from a growing file.
//!
//! This library polls a file being actively written by another process and
//! emits the appended bytes as an async stream, in order, without re-reading
//! bytes already delivered. It is aimed at tailing log files written by a
//! child process. The design is poll-based by construction: no filesystem
//! event APIs are involved, only size checks and offset reads on a timer.
//!
//! The stream closes on its own once the file stops growing for a configured
//! number of consecutive checks. A file that vanishes mid-session surfaces as
//! a fatal error item before the stream ends.
//!
//! # Example
//!
//! ```rust,no_run
//! use tail_stream::tail_file;
//! use tokio_stream::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stream = tail_file("app.log", None).await?;
//!
//!     while let Some(chunk) = stream.next().await {
//!         match chunk {
//!             Ok(bytes) => println!("{} new bytes", bytes.len()),
//!             Err(e) => eprintln!("Error: {}", e),
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

// Internal modules - not part of public API
mod config;
mod error;
mod fs;
mod stream;
mod tracker;

#[cfg(test)]
mod test_helpers;

// Public API exports
pub use config::{
    DEFAULT_CHECK_INTERVAL, DEFAULT_FAILED_CHECK_DELAY, DEFAULT_MAX_FAILED_CHECKS, LogCallback,
    TailOptions,
};
pub use error::{Error, Result};
pub use stream::TailStream;

use std::path::Path;

/// Creates a stream of byte chunks appended to a growing file.
///
/// # Arguments
///
/// * `path` - File path to tail; must exist
/// * `options` - Poll intervals and close threshold (defaults when `None`)
///
/// # Example
///
/// ```rust,no_run
/// use tail_stream::tail_file;
/// use tokio_stream::StreamExt;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let mut stream = tail_file("app.log", None).await?;
///
///     while let Some(chunk) = stream.next().await {
///         let bytes = chunk?;
///         print!("{}", String::from_utf8_lossy(&bytes));
///     }
///
///     Ok(())
/// }
/// ```
pub async fn tail_file<P: AsRef<Path>>(
    path: P,
    options: Option<TailOptions>,
) -> Result<TailStream> {
    TailStream::new(path, options.unwrap_or_default()).await
}
