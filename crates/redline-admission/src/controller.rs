//! Sliding-window admission controller

use crate::config::AdmissionConfig;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Only every ~64th check pays for a sweep
const EVICTION_MASK: u32 = 0x3F;

/// Outcome of one admission check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    /// Whether the request may proceed
    pub allowed: bool,
    /// Requests left in the current window after this one
    pub remaining: usize,
    /// Seconds until a denied caller should retry, zero when allowed
    pub retry_after_secs: u64,
    /// Unix timestamp at which the window fully resets
    pub reset_at: u64,
}

struct Window {
    instants: Vec<Instant>,
    length: Duration,
}

/// Admission controller keyed on client identity and endpoint
///
/// All state lives behind one mutex, so two concurrent checks against the
/// same window can never both claim the final slot. Idle windows are swept
/// opportunistically on a small fraction of checks rather than by a
/// background task.
pub struct AdmissionController {
    config: AdmissionConfig,
    windows: Mutex<HashMap<String, Window>>,
}

impl AdmissionController {
    /// Create a controller from a validated configuration
    pub fn new(config: AdmissionConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// The configuration this controller enforces
    pub fn config(&self) -> &AdmissionConfig {
        &self.config
    }

    /// Check whether a request from `key` against `endpoint` is admitted
    ///
    /// Allowed requests are recorded immediately; denied requests leave the
    /// window untouched and carry a retry hint derived from the oldest
    /// still-live instant.
    pub fn check(&self, key: &str, endpoint: &str) -> Decision {
        let tier = self.config.tier_for(endpoint);
        let now = Instant::now();
        let wall = unix_now();

        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());

        let window = windows
            .entry(format!("{}|{}", endpoint, key))
            .or_insert_with(|| Window {
                instants: Vec::new(),
                length: tier.window(),
            });
        let length = window.length;
        window
            .instants
            .retain(|t| now.duration_since(*t) < length);

        let decision = if window.instants.len() >= tier.max_requests {
            let oldest = window.instants[0];
            let until_free = window.length.saturating_sub(now.duration_since(oldest));
            let retry_after_secs = ceil_secs(until_free);
            Decision {
                allowed: false,
                remaining: 0,
                retry_after_secs,
                reset_at: wall + retry_after_secs,
            }
        } else {
            window.instants.push(now);
            Decision {
                allowed: true,
                remaining: tier.max_requests - window.instants.len(),
                retry_after_secs: 0,
                reset_at: wall + ceil_secs(window.length),
            }
        };

        if wall_nanos() & EVICTION_MASK == 0 {
            sweep_windows(&mut windows, now);
        }

        decision
    }

    /// Drop every window that holds no live instants
    pub fn sweep(&self) {
        let mut windows = self.windows.lock().unwrap_or_else(|e| e.into_inner());
        sweep_windows(&mut windows, Instant::now());
    }

    /// Clear all admission state
    pub fn shutdown(&self) {
        self.windows
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }

    /// Number of tracked windows, swept or not
    pub fn active_windows(&self) -> usize {
        self.windows.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

fn sweep_windows(windows: &mut HashMap<String, Window>, now: Instant) {
    windows.retain(|_, w| {
        let length = w.length;
        w.instants.retain(|t| now.duration_since(*t) < length);
        !w.instants.is_empty()
    });
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn wall_nanos() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default()
}

/// Round up to whole seconds, never reporting zero
fn ceil_secs(d: Duration) -> u64 {
    if d.subsec_nanos() > 0 {
        d.as_secs() + 1
    } else {
        d.as_secs().max(1)
    }
}
