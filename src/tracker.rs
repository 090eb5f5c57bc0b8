//! The poll loop driving one tail session.
//!
//! A `Tracker` owns the read position for one growing file and re-arms a
//! single timer between poll cycles. Each cycle compares the file size
//! against the bytes already delivered, reads the delta at that offset and
//! pushes it downstream, then picks the delay before the next cycle.

use crate::config::{LogCallback, TailOptions};
use crate::error::{Error, Result};
use crate::fs::TailFs;
use bytes::Bytes;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, trace, warn};

/// Empty poll cycles ignored at the start of a session before the close
/// threshold starts counting, giving a slow writer time to produce its
/// first bytes.
pub(crate) const INITIAL_GRACE_CYCLES: i64 = 10;

pub(crate) struct Tracker {
    location: PathBuf,
    /// Bytes already delivered; the read offset for the next cycle.
    bytes_read: u64,
    /// Consecutive empty cycles. Starts below zero so the grace window is
    /// spent before the threshold comparison can trip.
    failed_attempts: i64,
    max_failed_checks: i64,
    check_interval: Duration,
    failed_check_delay: Duration,
    fs: Arc<dyn TailFs>,
    tx: mpsc::UnboundedSender<Result<Bytes>>,
    logger: Option<LogCallback>,
}

impl Tracker {
    pub(crate) fn new(
        location: PathBuf,
        options: &TailOptions,
        fs: Arc<dyn TailFs>,
        tx: mpsc::UnboundedSender<Result<Bytes>>,
    ) -> Self {
        Self {
            location,
            bytes_read: 0,
            failed_attempts: -INITIAL_GRACE_CYCLES,
            max_failed_checks: i64::from(options.max_failed_checks),
            check_interval: options.check_interval,
            failed_check_delay: options.effective_failed_check_delay(),
            fs,
            tx,
            logger: options.logger.clone(),
        }
    }

    /// Run poll cycles until a terminal condition, re-arming one timer
    /// between cycles. The first cycle runs immediately. A shutdown signal
    /// received while waiting cancels the pending timer and ends the
    /// session without another poll.
    pub(crate) async fn run(mut self, mut shutdown_rx: broadcast::Receiver<()>) {
        loop {
            let delay = match self.poll_cycle().await {
                Some(delay) => delay,
                None => break,
            };

            tokio::select! {
                _ = shutdown_rx.recv() => {
                    debug!(location = %self.location.display(), "tail session stopped");
                    break;
                }
                _ = tokio::time::sleep(delay) => {}
            }
        }
    }

    /// One poll cycle. Returns the delay before the next cycle, or `None`
    /// when the session is over (threshold exhausted, file gone, or the
    /// filesystem failed underneath us).
    async fn poll_cycle(&mut self) -> Option<Duration> {
        self.log("Checking for new data...");
        trace!(location = %self.location.display(), "checking for new data");

        if !self.fs.exists(&self.location).await {
            warn!(location = %self.location.display(), "tracked file disappeared");
            let _ = self.tx.send(Err(Error::FileDisappeared {
                path: self.location.display().to_string(),
            }));
            return None;
        }

        let size = match self.fs.size(&self.location).await {
            Ok(size) => size,
            Err(e) => {
                let _ = self.tx.send(Err(e.into()));
                return None;
            }
        };

        let mut delay = self.check_interval;

        if size > self.bytes_read {
            let wanted = size - self.bytes_read;
            self.log(&format!("Found {wanted} new bytes"));
            debug!(bytes = wanted, offset = self.bytes_read, "new data found");
            self.failed_attempts = 0;

            match self.fs.read_at(&self.location, self.bytes_read, wanted).await {
                Ok(chunk) => {
                    let obtained = chunk.len() as u64;
                    self.bytes_read += obtained;

                    if self.tx.send(Ok(Bytes::from(chunk))).is_err() {
                        // Consumer is gone; exhaust the threshold so this
                        // cycle closes the session instead of erroring.
                        self.failed_attempts = self.max_failed_checks;
                    }

                    // A short read means the file changed between the size
                    // check and the read; back off before catching up.
                    delay = if obtained == wanted {
                        self.check_interval
                    } else {
                        self.failed_check_delay
                    };
                }
                Err(_) => {
                    self.failed_attempts = self.max_failed_checks;
                }
            }
        } else {
            self.failed_attempts += 1;
        }

        if self.failed_attempts >= self.max_failed_checks {
            self.log(&format!(
                "{} consecutive checks found no new data. Closing stream.",
                self.failed_attempts
            ));
            debug!(
                checks = self.failed_attempts,
                location = %self.location.display(),
                "no new data, closing stream"
            );
            return None;
        }

        Some(delay)
    }

    fn log(&self, message: &str) {
        if let Some(logger) = &self.logger {
            logger(message);
        }
    }
}
