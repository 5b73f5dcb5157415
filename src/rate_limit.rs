//! Reactive throttling driven by the `X-App-Rate-Limit-Count` header.
//!
//! The upstream reports how many calls the key has made in each policy window.
//! Nothing here paces calls ahead of time: after each call the elapsed time is
//! accumulated per window and, once the reported usage reaches the limit, the
//! caller is blocked until that window should have rolled over.

use crate::error::AppError;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// Header carrying the per-window call counts for the application key.
pub const RATE_COUNT_HEADER: &str = "X-App-Rate-Limit-Count";

/// One `limit` calls per `period` policy plus the time accumulated since the last throttle.
#[derive(Debug, Clone, PartialEq)]
pub struct RateWindow {
    pub limit: u32,
    pub period: Duration,
    /// Wait applied when the limit is hit after the period already ran out.
    pub recovery: Duration,
    /// Usage above the limit forces a wait even once the period has run out.
    pub over_limit_waits: bool,
    pub elapsed: Duration,
}

impl RateWindow {
    pub fn new(limit: u32, period: Duration, recovery: Duration) -> Self {
        RateWindow {
            limit,
            period,
            recovery,
            over_limit_waits: false,
            elapsed: Duration::ZERO,
        }
    }

    pub fn over_limit_waits(mut self) -> Self {
        self.over_limit_waits = true;
        self
    }

    /// Adds `call_time` to the window and returns the wait required before the next call.
    /// Any wait resets the accumulator.
    pub fn record(&mut self, call_time: Duration, usage: u32) -> Option<Duration> {
        self.elapsed += call_time;

        let wait = if usage == self.limit && self.elapsed > self.period {
            Some(self.recovery)
        } else if usage >= self.limit && self.elapsed < self.period {
            Some(self.period - self.elapsed)
        } else if self.over_limit_waits && usage > self.limit {
            Some(self.period.saturating_sub(self.elapsed))
        } else {
            None
        };

        if wait.is_some() {
            self.elapsed = Duration::ZERO;
        }
        wait
    }
}

/// Short and long application windows.
#[derive(Debug, Clone, PartialEq)]
pub struct RatePolicy {
    pub short: RateWindow,
    pub long: RateWindow,
}

impl Default for RatePolicy {
    fn default() -> Self {
        RatePolicy {
            short: RateWindow::new(20, Duration::from_secs(1), Duration::from_secs(5)),
            long: RateWindow::new(100, Duration::from_secs(120), Duration::ZERO).over_limit_waits(),
        }
    }
}

impl RatePolicy {
    /// Parses a policy in the upstream header format, e.g. `20:1,100:120`.
    pub fn parse(spec: &str) -> Result<Self, AppError> {
        let pairs = parse_pairs(spec)
            .filter(|p| p.len() == 2)
            .ok_or_else(|| AppError::ConfigError(format!("invalid rate policy '{}'", spec)))?;
        let defaults = RatePolicy::default();

        Ok(RatePolicy {
            short: RateWindow::new(
                pairs[0].0,
                Duration::from_secs(pairs[0].1),
                defaults.short.recovery,
            ),
            long: RateWindow::new(
                pairs[1].0,
                Duration::from_secs(pairs[1].1),
                defaults.long.recovery,
            )
            .over_limit_waits(),
        })
    }
}

/// Usage counters reported by the upstream for the short and long windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageCounts {
    pub short: u32,
    pub long: u32,
}

impl UsageCounts {
    /// `"3:1,57:120"` -> short 3, long 57. Anything unexpected yields `None`.
    pub fn from_header(value: &str) -> Option<Self> {
        let pairs = parse_pairs(value)?;
        match pairs.as_slice() {
            [(short, _), (long, _), ..] => Some(UsageCounts {
                short: *short,
                long: *long,
            }),
            _ => None,
        }
    }
}

fn parse_pairs(value: &str) -> Option<Vec<(u32, u64)>> {
    value
        .split(',')
        .map(|pair| {
            let (count, period) = pair.trim().split_once(':')?;
            Some((count.trim().parse().ok()?, period.trim().parse().ok()?))
        })
        .collect()
}

/// Blocking delay used by the governor.
pub trait Pause: Send + Sync {
    fn pause(&self, duration: Duration);
}

pub struct ThreadSleep;

impl Pause for ThreadSleep {
    fn pause(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Process-wide throttling state shared by every request using the same key.
pub struct RateGovernor {
    windows: Mutex<RatePolicy>,
    pauser: Arc<dyn Pause>,
}

impl RateGovernor {
    pub fn new(policy: RatePolicy) -> Self {
        Self::with_pause(policy, Arc::new(ThreadSleep))
    }

    pub fn with_pause(policy: RatePolicy, pauser: Arc<dyn Pause>) -> Self {
        RateGovernor {
            windows: Mutex::new(policy),
            pauser,
        }
    }

    fn lock(&self) -> MutexGuard<'_, RatePolicy> {
        self.windows.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Blocks while another caller is serving a throttle delay.
    pub fn wait_turn(&self) {
        drop(self.lock());
    }

    /// Accounts one completed call and sleeps if either window asks for it.
    /// Returns the total time spent waiting.
    pub fn observe(&self, call_time: Duration, usage: Option<UsageCounts>) -> Duration {
        let Some(usage) = usage else {
            warn!("missing or malformed {} header, skipping throttle check", RATE_COUNT_HEADER);
            return Duration::ZERO;
        };

        let mut windows = self.lock();
        debug!(
            short = usage.short,
            long = usage.long,
            short_elapsed_ms = windows.short.elapsed.as_millis() as u64,
            long_elapsed_ms = windows.long.elapsed.as_millis() as u64,
            "checking rate limits"
        );

        let mut waited = Duration::ZERO;

        // Windows are evaluated one after the other; their waits are never merged.
        if let Some(wait) = windows.short.record(call_time, usage.short) {
            warn!(
                "short window at {}/{}, waiting {:?}",
                usage.short, windows.short.limit, wait
            );
            self.pauser.pause(wait);
            waited += wait;
        }
        if let Some(wait) = windows.long.record(call_time, usage.long) {
            warn!(
                "long window at {}/{}, waiting {:?}",
                usage.long, windows.long.limit, wait
            );
            self.pauser.pause(wait);
            waited += wait;
        }

        waited
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> RatePolicy {
        self.lock().clone()
    }
}
