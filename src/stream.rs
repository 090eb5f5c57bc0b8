//! Stream surface over a tail session.

use crate::config::TailOptions;
use crate::error::{Error, Result};
use crate::fs::{DiskFs, TailFs};
use crate::tracker::Tracker;
use bytes::Bytes;
use futures::Stream;
use std::path::Path;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// A stream of byte chunks appended to a growing file.
///
/// The stream ends (`None`) when the file stops growing for the configured
/// number of consecutive checks, or after yielding a fatal error when the
/// file disappears mid-session.
pub struct TailStream {
    receiver: mpsc::UnboundedReceiver<Result<Bytes>>,
    shutdown_tx: broadcast::Sender<()>,
    _task_handle: JoinHandle<()>,
}

impl TailStream {
    /// Creates a new TailStream for the specified file.
    ///
    /// Fails before any polling starts when the path is empty or does not
    /// exist. On success the first poll runs immediately.
    pub async fn new<P: AsRef<Path>>(path: P, options: TailOptions) -> Result<Self> {
        Self::with_fs(path, options, Arc::new(DiskFs)).await
    }

    pub(crate) async fn with_fs<P: AsRef<Path>>(
        path: P,
        options: TailOptions,
        fs: Arc<dyn TailFs>,
    ) -> Result<Self> {
        let location = path.as_ref().to_path_buf();

        if location.as_os_str().is_empty() {
            return Err(Error::InvalidPath {
                message: "No location was provided".to_string(),
            });
        }
        if !fs.exists(&location).await {
            return Err(Error::NotFound {
                path: location.display().to_string(),
            });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

        let tracker = Tracker::new(location, &options, fs, tx);
        let task_handle = tokio::spawn(tracker.run(shutdown_rx));

        Ok(TailStream {
            receiver: rx,
            shutdown_tx,
            _task_handle: task_handle,
        })
    }

    /// Force-stops the session: no further poll runs and no further data is
    /// emitted. Idempotent; dropping the stream has the same effect.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Check if the tail session has terminated
    #[cfg(test)]
    pub fn is_closed(&self) -> bool {
        self.receiver.is_closed()
    }
}

impl Drop for TailStream {
    fn drop(&mut self) {
        // Send shutdown signal - ignore errors if the task already finished
        let _ = self.shutdown_tx.send(());
    }
}

impl Stream for TailStream {
    type Item = Result<Bytes>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.receiver).poll_recv(cx)
    }
}
