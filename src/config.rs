//! Configuration for a tail session.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Delay between a poll that found data and the next poll.
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(500);

/// Floor for the delay applied after a short read.
pub const DEFAULT_FAILED_CHECK_DELAY: Duration = Duration::from_millis(2000);

/// Consecutive empty polls tolerated before the stream closes.
pub const DEFAULT_MAX_FAILED_CHECKS: u32 = 22;

/// Optional per-session diagnostic callback, invoked with human-readable
/// progress strings.
pub type LogCallback = Arc<dyn Fn(&str) + Send + Sync>;

/// Options controlling how a file is tailed.
#[derive(Clone)]
pub struct TailOptions {
    /// Delay before the next poll when the previous poll found data.
    pub check_interval: Duration,
    /// Delay before the next poll after a short read. When unset, the larger
    /// of 2000ms and `check_interval` is used.
    pub failed_check_delay: Option<Duration>,
    /// Consecutive empty polls allowed before the stream closes.
    pub max_failed_checks: u32,
    /// Diagnostic callback; `None` means silent.
    pub logger: Option<LogCallback>,
}

impl TailOptions {
    /// The effective short-read delay: the configured value, or the larger of
    /// 2000ms and the check interval.
    pub fn effective_failed_check_delay(&self) -> Duration {
        self.failed_check_delay
            .unwrap_or_else(|| DEFAULT_FAILED_CHECK_DELAY.max(self.check_interval))
    }
}

impl Default for TailOptions {
    fn default() -> Self {
        Self {
            check_interval: DEFAULT_CHECK_INTERVAL,
            failed_check_delay: None,
            max_failed_checks: DEFAULT_MAX_FAILED_CHECKS,
            logger: None,
        }
    }
}

impl fmt::Debug for TailOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TailOptions")
            .field("check_interval", &self.check_interval)
            .field("failed_check_delay", &self.failed_check_delay)
            .field("max_failed_checks", &self.max_failed_checks)
            .field("logger", &self.logger.as_ref().map(|_| "<callback>"))
            .finish()
    }
}
