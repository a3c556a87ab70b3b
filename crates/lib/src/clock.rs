//! Time provider abstraction
//!
//! The relay keys every stored message by the wall-clock instant it was
//! received. This module provides a [`Clock`] trait so production code can
//! read the real local clock while tests pin the instant and exercise
//! timestamp collisions deterministically.
//!
//! # Example
//!
//! ```
//! use postbox::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let stamp = clock.now_timestamp();
//! assert_eq!(stamp.len(), "2024-01-01 00:00:00.000000".len());
//! ```

use std::fmt::Debug;

use chrono::{DateTime, Local, TimeZone, Utc};

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// Rendering used for store keys: local date and time with microseconds.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// A time provider for receipt timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current time rendered as a store key.
    fn now_timestamp(&self) -> String;
}

/// Production clock using the local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_timestamp(&self) -> String {
        Local::now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Test clock with auto-advancing time.
///
/// Each `now_micros()` or `now_timestamp()` call returns the current value
/// and then advances by one microsecond. Use `hold()` to freeze the clock so
/// consecutive reads collide.
///
/// Timestamps are rendered in UTC so tests do not depend on the host zone.
#[cfg(any(test, feature = "testing"))]
pub struct FixedClock {
    state: Mutex<FixedClockState>,
}

#[cfg(any(test, feature = "testing"))]
struct FixedClockState {
    micros: i64,
    held: bool,
}

/// RAII guard that freezes a [`FixedClock`] while held.
#[cfg(any(test, feature = "testing"))]
pub struct ClockHold<'a>(&'a FixedClock);

#[cfg(any(test, feature = "testing"))]
impl Drop for ClockHold<'_> {
    fn drop(&mut self) {
        self.0.state.lock().unwrap().held = false;
    }
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a new fixed clock at the given microseconds since epoch.
    pub fn new(micros: i64) -> Self {
        Self {
            state: Mutex::new(FixedClockState {
                micros,
                held: false,
            }),
        }
    }

    /// Hold the clock, preventing auto-advance until the guard is dropped.
    pub fn hold(&self) -> ClockHold<'_> {
        self.state.lock().unwrap().held = true;
        ClockHold(self)
    }

    /// Advance the clock by the given number of microseconds.
    pub fn advance(&self, micros: i64) {
        self.state.lock().unwrap().micros += micros;
    }

    /// Get the current time without advancing.
    pub fn get(&self) -> i64 {
        self.state.lock().unwrap().micros
    }

    /// Returns the current time as microseconds since Unix epoch, advancing
    /// unless held.
    pub fn now_micros(&self) -> i64 {
        let mut state = self.state.lock().unwrap();
        if state.held {
            state.micros
        } else {
            let t = state.micros;
            state.micros += 1;
            t
        }
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now_timestamp(&self) -> String {
        render_utc(self.now_micros())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01 00:00:00 UTC
        Self::new(1_704_067_200_000_000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Debug for FixedClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().unwrap();
        f.debug_struct("FixedClock")
            .field("micros", &state.micros)
            .field("held", &state.held)
            .finish()
    }
}

/// Render microseconds since epoch with [`TIMESTAMP_FORMAT`] in UTC.
pub fn render_utc(micros: i64) -> String {
    let secs = micros.div_euclid(1_000_000);
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    Utc.timestamp_opt(secs, nanos)
        .single()
        .map(|dt: DateTime<Utc>| dt.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_else(|| "1970-01-01 00:00:00.000000".to_string())
}
